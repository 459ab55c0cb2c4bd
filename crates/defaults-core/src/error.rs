use defaults_store::EncodedKind;

/// Errors from the structured-value codec.
///
/// The [`Storable`](crate::Storable) path absorbs these into `None`; they are
/// only visible to callers of [`codec`](crate::codec) functions directly.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value could not be serialized into a blob.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The blob could not be deserialized into the requested type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The encoded value has the wrong variant for this codec.
    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        expected: EncodedKind,
        found: EncodedKind,
    },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
