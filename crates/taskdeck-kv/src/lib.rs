//! Key-value persistence backends for taskdeck.
//!
//! This library provides the durable-storage collaborator used by the
//! taskdeck project store: a small `get`/`set` string store with a
//! file-backed implementation and an in-memory implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod key;
pub mod memory;
pub mod store;

pub use error::{Error, Result};
pub use file::FileStore;
pub use key::validate_key;
pub use memory::MemoryStore;
pub use store::KeyValueStore;
