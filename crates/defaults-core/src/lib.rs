//! Typed persistence over an untyped defaults store.
//!
//! A value type becomes usable with a [`UserDefault`] by implementing the two
//! capability contracts:
//!
//! - [`Persistable`] -- turn `self` into an [`Encoded`] value
//! - [`Retrievable`] -- rebuild `Self` from an [`Encoded`] value, or give up
//!
//! Together they make a type [`Storable`]. Conformances ship for:
//!
//! - primitives (`String`, `i64`, `f64`, `f32`, `bool`, [`bytes::Bytes`]),
//!   which are their own encoding
//! - `Vec<T>` of any storable `T`, decoded lossily (bad elements are dropped)
//! - any serde type opted in with [`plist_storable!`], encoded as a binary blob
//!
//! # Failure Model
//!
//! Nothing here panics or returns an error for bad data. A missing key, a
//! value of the wrong shape, or a blob that no longer decodes all surface as
//! `None`. Failures are logged through `tracing` at `debug` (data problems)
//! or `warn` (store I/O problems).
//!
//! ```
//! use std::sync::Arc;
//! use defaults_core::UserDefault;
//! use defaults_store::InMemoryDefaults;
//!
//! let counter = UserDefault::<i64>::new("counter", Arc::new(InMemoryDefaults::new()));
//! counter.set(&42);
//! assert_eq!(counter.get(), Some(42));
//! counter.clear();
//! assert_eq!(counter.get_or(0), 0);
//! ```

pub mod accessor;
pub mod codec;
pub mod error;
pub mod plist;
pub mod standard;
pub mod storable;

pub use accessor::UserDefault;
pub use codec::MAX_BLOB_SIZE;
pub use defaults_store::{DefaultsStore, Encoded, EncodedKind};
pub use error::{CodecError, CodecResult};
pub use plist::PlistStorable;
pub use standard::{install_standard_store, standard_store};
pub use storable::{Persistable, Retrievable, Storable};
