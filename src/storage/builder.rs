//! Store construction: configuration, builder and the open result

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::codec::{Codec, JsonCodec};
use super::error::{Result, StoreError};
use super::store::Store;
use crate::logging::{Logger, TracingLogger};

/// Settings applied once when a store is constructed
pub struct StoreConfig<C = JsonCodec> {
    /// Sink for diagnostics (default: [`TracingLogger`])
    pub logger: Arc<dyn Logger>,

    /// Record format (default: [`JsonCodec`])
    pub codec: C,

    /// Permissions for created directories, Unix only (default: `0o755`)
    pub dir_mode: u32,

    /// Permissions for record files, Unix only (default: `0o644`)
    pub file_mode: u32,
}

impl<C: Default> Default for StoreConfig<C> {
    fn default() -> Self {
        Self {
            logger: Arc::new(TracingLogger),
            codec: C::default(),
            dir_mode: 0o755,
            file_mode: 0o644,
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for StoreConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("codec", &self.codec)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .finish_non_exhaustive()
    }
}

impl<C> StoreConfig<C> {
    /// Checks the settings before anything touches the filesystem
    pub fn validate(&self) -> Result<()> {
        for (what, mode, owner) in [
            ("dir_mode", self.dir_mode, 0o700),
            ("file_mode", self.file_mode, 0o600),
        ] {
            if mode > 0o777 {
                return Err(StoreError::InvalidConfig(format!(
                    "{what} {mode:o} has bits outside 0777"
                )));
            }
            if mode & owner != owner {
                return Err(StoreError::InvalidConfig(format!(
                    "{what} {mode:o} must grant the owner {owner:o}"
                )));
            }
        }
        Ok(())
    }
}

/// Fluent construction of a [`Store`]
///
/// ```no_run
/// use jsondb::storage::{Store, YamlCodec};
///
/// let store = Store::builder()
///     .root("data")
///     .codec(YamlCodec)
///     .open()?
///     .into_store();
/// # Ok::<(), jsondb::storage::StoreError>(())
/// ```
#[derive(Debug)]
pub struct StoreBuilder<C = JsonCodec> {
    root: Option<PathBuf>,
    config: StoreConfig<C>,
}

impl Default for StoreBuilder<JsonCodec> {
    fn default() -> Self {
        Self {
            root: None,
            config: StoreConfig::default(),
        }
    }
}

impl<C: Codec> StoreBuilder<C> {
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.config.logger = logger;
        self
    }

    /// Switches the record format
    pub fn codec<D: Codec>(self, codec: D) -> StoreBuilder<D> {
        let StoreConfig {
            logger,
            dir_mode,
            file_mode,
            ..
        } = self.config;

        StoreBuilder {
            root: self.root,
            config: StoreConfig {
                logger,
                codec,
                dir_mode,
                file_mode,
            },
        }
    }

    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self
    }

    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Opens (or creates) the store
    pub fn open(self) -> Result<Opened<C>> {
        let root = self
            .root
            .ok_or_else(|| StoreError::InvalidConfig("no root directory given".to_string()))?;

        Store::open_with(root, self.config)
    }
}

/// Whether construction created the root directory or reused it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    Created,
    Existing,
}

/// A ready store plus how its root directory was obtained
#[derive(Debug)]
pub struct Opened<C = JsonCodec> {
    pub store: Store<C>,
    pub status: OpenStatus,
}

impl<C: Codec> Opened<C> {
    /// True when the root directory was already present
    pub fn already_exists(&self) -> bool {
        self.status == OpenStatus::Existing
    }

    /// Discards the status; an existing database is not an error
    pub fn into_store(self) -> Store<C> {
        self.store
    }

    /// Treats a pre-existing root as [`StoreError::AlreadyExists`]
    pub fn strict(self) -> Result<Store<C>> {
        match self.status {
            OpenStatus::Created => Ok(self.store),
            OpenStatus::Existing => Err(StoreError::AlreadyExists {
                root: self.store.root().to_path_buf(),
            }),
        }
    }
}
