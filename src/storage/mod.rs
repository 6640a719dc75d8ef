//! # Storage Layer
//!
//! File-backed document storage with atomic writes.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── fish/
//! │   ├── red.json          # One file per record
//! │   ├── blue.json
//! │   └── blue.json.tmp     # Only while a write is in flight
//! └── birds/
//!     └── robin.json
//! ```
//!
//! ## Concurrency Safety
//!
//! - Writes and deletes take a per-collection lock ([`LockRegistry`])
//! - Reads take no lock
//! - All writes are atomic (temp file + rename), so readers never see a
//!   partially written record
//!
//! ## Key Types
//!
//! - [`Store`] - Entry point: `write`, `read`, `read_all`, `delete`
//! - [`StoreBuilder`] / [`StoreConfig`] - Construction settings
//! - [`Codec`] - Record format ([`JsonCodec`], [`YamlCodec`])
//! - [`StoreError`] - Error kinds surfaced by every operation

mod builder;
mod codec;
mod error;
mod locks;
mod paths;
mod store;

pub use builder::{OpenStatus, Opened, StoreBuilder, StoreConfig};
pub use codec::{Codec, CodecError, JsonCodec, YamlCodec};
pub use error::{Result, StoreError};
pub use locks::{CollectionLock, LockRegistry};
pub use paths::TEMP_SUFFIX;
pub use store::Store;
