//! Binary blob codec for structured values.
//!
//! Blobs are bincode with fixed-width integers. Trailing bytes are rejected
//! so a blob written for a shorter shape does not silently decode as a
//! prefix, and both directions are capped at [`MAX_BLOB_SIZE`].

use bincode::Options;
use defaults_store::{Encoded, EncodedKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Largest blob the codec will produce or accept (16 MiB).
pub const MAX_BLOB_SIZE: u64 = 16 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .with_limit(MAX_BLOB_SIZE)
}

/// Serialize a value into a blob.
pub fn to_blob<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Deserialize a blob produced by [`to_blob`].
pub fn from_blob<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Serialize a value into an [`Encoded::Data`].
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> CodecResult<Encoded> {
    to_blob(value).map(Encoded::Data)
}

/// Deserialize an [`Encoded::Data`]; any other variant is rejected.
pub fn decode_value<T: DeserializeOwned>(encoded: &Encoded) -> CodecResult<T> {
    match encoded {
        Encoded::Data(bytes) => from_blob(bytes),
        other => Err(CodecError::UnexpectedKind {
            expected: EncodedKind::Data,
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Labelled {
        label: String,
        weight: f64,
    }

    #[test]
    fn blob_roundtrip() {
        let p = Point { x: -3, y: 14 };
        let blob = to_blob(&p).unwrap();
        assert_eq!(blob.len(), 8);
        assert_eq!(from_blob::<Point>(&blob).unwrap(), p);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut blob = to_blob(&Point { x: 1, y: 2 }).unwrap();
        blob.push(0);
        assert!(matches!(
            from_blob::<Point>(&blob),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn truncated_blob_rejected() {
        let blob = to_blob(&Point { x: 1, y: 2 }).unwrap();
        assert!(from_blob::<Point>(&blob[..5]).is_err());
    }

    #[test]
    fn mismatched_shape_rejected() {
        let blob = to_blob(&Point { x: 1, y: 2 }).unwrap();
        assert!(from_blob::<Labelled>(&blob).is_err());
    }

    #[test]
    fn oversized_length_prefix_rejected() {
        // A string length prefix far beyond the size limit.
        let blob = u64::MAX.to_le_bytes();
        assert!(from_blob::<String>(&blob).is_err());
    }

    #[test]
    fn oversized_value_fails_to_encode() {
        // The length prefix alone pushes this past the limit.
        let payload = vec![0u8; MAX_BLOB_SIZE as usize];
        assert!(matches!(to_blob(&payload), Err(CodecError::Encode(_))));
        assert!(matches!(encode_value(&payload), Err(CodecError::Encode(_))));
    }

    #[test]
    fn decode_value_requires_data() {
        let err = decode_value::<Point>(&Encoded::Integer(5)).unwrap_err();
        match err {
            CodecError::UnexpectedKind { expected, found } => {
                assert_eq!(expected, EncodedKind::Data);
                assert_eq!(found, EncodedKind::Integer);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn encode_value_wraps_data() {
        let encoded = encode_value(&Point { x: 0, y: 0 }).unwrap();
        assert_eq!(encoded.kind(), EncodedKind::Data);
        assert_eq!(
            decode_value::<Point>(&encoded).unwrap(),
            Point { x: 0, y: 0 }
        );
    }
}
