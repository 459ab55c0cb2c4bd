use serde::{Deserialize, Serialize};

/// A value in the store's vocabulary.
///
/// This is the closed set of shapes a [`DefaultsStore`](crate::DefaultsStore)
/// can hold. There is deliberately no null variant: absence is expressed as
/// `Option::None` wherever an `Encoded` may be missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Encoded {
    /// UTF-8 string.
    String(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Double-precision float.
    Double(f64),
    /// Single-precision float.
    Float(f32),
    /// Boolean.
    Bool(bool),
    /// Opaque byte blob.
    Data(Vec<u8>),
    /// Ordered sequence of encoded values.
    Array(Vec<Encoded>),
}

/// Variant tag of an [`Encoded`] value, used in logs and codec errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodedKind {
    String,
    Integer,
    Double,
    Float,
    Bool,
    Data,
    Array,
}

impl Encoded {
    /// The variant tag of this value.
    pub fn kind(&self) -> EncodedKind {
        match self {
            Self::String(_) => EncodedKind::String,
            Self::Integer(_) => EncodedKind::Integer,
            Self::Double(_) => EncodedKind::Double,
            Self::Float(_) => EncodedKind::Float,
            Self::Bool(_) => EncodedKind::Bool,
            Self::Data(_) => EncodedKind::Data,
            Self::Array(_) => EncodedKind::Array,
        }
    }
}

impl std::fmt::Display for EncodedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Double => write!(f, "double"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Data => write!(f, "data"),
            Self::Array => write!(f, "array"),
        }
    }
}
