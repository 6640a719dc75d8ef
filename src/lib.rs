//! jsondb - an embedded, file-backed document store
//!
//! Records are serde values addressed by a (collection, resource) pair and
//! stored one file per record under a root directory. Writes are
//! serialized per collection and published atomically.

pub mod logging;
pub mod storage;
pub mod cli;

pub use logging::{Level, Logger, NullLogger, TracingLogger};
pub use storage::{Codec, JsonCodec, Opened, Store, StoreBuilder, StoreConfig, StoreError, YamlCodec};
