//! Untyped key-value storage for application defaults.
//!
//! This crate is the "platform" half of the typed defaults system: a
//! process-wide mapping from string keys to values drawn from a small, closed
//! vocabulary of encoded forms. Typed access lives in `defaults-core`; this
//! crate never interprets values beyond their [`Encoded`] variant.
//!
//! # Encoded Vocabulary
//!
//! [`Encoded`] is the only shape a store understands: strings, 64-bit
//! integers, doubles, single-precision floats, booleans, byte blobs, and
//! ordered sequences of those. Absence is always `Option::None`.
//!
//! # Storage Backends
//!
//! All backends implement the [`DefaultsStore`] trait:
//!
//! - [`InMemoryDefaults`] -- `HashMap`-based store for tests and embedding
//! - [`FileDefaults`] -- durable store persisted to a single checksummed file
//!
//! # Design Rules
//!
//! 1. Writing `None` for a key removes it.
//! 2. Individual reads and writes are thread-safe; there is no cross-key
//!    transaction and no compare-and-swap. Last write wins.
//! 3. Backend errors are returned as [`StoreError`]; callers decide whether
//!    to absorb them.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{FileDefaultsConfig, SyncMode, WriteMode};
pub use error::{StoreError, StoreResult};
pub use file::FileDefaults;
pub use memory::InMemoryDefaults;
pub use traits::DefaultsStore;
pub use value::{Encoded, EncodedKind};
