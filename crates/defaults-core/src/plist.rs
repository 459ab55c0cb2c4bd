//! Storable conformance for serde types via the blob codec.

use defaults_store::Encoded;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::codec;

/// A serde type stored as an opaque blob.
///
/// Implement it (normally through [`plist_storable!`](crate::plist_storable))
/// to get `Storable` without writing per-field encoding. Round-tripping a
/// value reproduces it; a blob written for a different shape decodes as
/// `None`. There is no schema evolution.
pub trait PlistStorable: Serialize + DeserializeOwned {
    /// Encode into an [`Encoded::Data`] blob, or `None` if serialization fails.
    fn encode_plist(&self) -> Option<Encoded> {
        match codec::encode_value(self) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                debug!(
                    ty = std::any::type_name::<Self>(),
                    error = %e,
                    "structured value not encodable"
                );
                None
            }
        }
    }

    /// Decode from an [`Encoded::Data`] blob, or `None` on any failure.
    fn decode_plist(encoded: Encoded) -> Option<Self> {
        match codec::decode_value(&encoded) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(
                    ty = std::any::type_name::<Self>(),
                    error = %e,
                    "structured value not decodable"
                );
                None
            }
        }
    }
}

/// Make serde types storable as blobs.
///
/// Expands to `PlistStorable`, `Persistable` and `Retrievable` impls for each
/// listed type.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use defaults_core::{plist_storable, Persistable, Retrievable};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Window {
///     width: i64,
///     height: i64,
/// }
///
/// plist_storable!(Window);
///
/// let w = Window { width: 800, height: 600 };
/// let encoded = w.encode().unwrap();
/// assert_eq!(Window::decode(encoded), Some(w));
/// ```
#[macro_export]
macro_rules! plist_storable {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::PlistStorable for $ty {}

        impl $crate::Persistable for $ty {
            fn encode(&self) -> ::core::option::Option<$crate::Encoded> {
                $crate::PlistStorable::encode_plist(self)
            }
        }

        impl $crate::Retrievable for $ty {
            fn decode(encoded: $crate::Encoded) -> ::core::option::Option<Self> {
                <$ty as $crate::PlistStorable>::decode_plist(encoded)
            }
        }
    )+};
}
