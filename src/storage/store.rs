//! The document store
//!
//! Records live at `<root>/<collection>/<resource>.<ext>`. Writers of a
//! collection are serialized through its lock and publish by renaming a
//! fully written temp file over the record, so readers (which take no
//! lock) see either the previous or the new contents, never a torn file.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::builder::{OpenStatus, Opened, StoreBuilder, StoreConfig};
use super::codec::{Codec, JsonCodec};
use super::error::{Result, StoreError};
use super::locks::LockRegistry;
use super::paths;
use crate::logging::Logger;

pub struct Store<C = JsonCodec> {
    root: PathBuf,
    locks: LockRegistry,
    logger: Arc<dyn Logger>,
    codec: C,
    dir_mode: u32,
    file_mode: u32,
}

impl Store<JsonCodec> {
    /// Starts a [`StoreBuilder`] with default settings
    pub fn builder() -> StoreBuilder<JsonCodec> {
        StoreBuilder::default()
    }

    /// Opens a JSON store at `root` with default settings
    pub fn open(root: impl Into<PathBuf>) -> Result<Opened<JsonCodec>> {
        Self::open_with(root, StoreConfig::default())
    }
}

impl<C: Codec> Store<C> {
    /// Opens the store at `root`, creating the directory (and parents) if absent
    ///
    /// An existing root directory is reused and reported through
    /// [`Opened::status`].
    pub fn open_with(root: impl Into<PathBuf>, config: StoreConfig<C>) -> Result<Opened<C>> {
        config.validate()?;

        let root: PathBuf = root.into();
        let root: PathBuf = root.components().collect();
        if root.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "root directory path is empty".to_string(),
            ));
        }

        let StoreConfig {
            logger,
            codec,
            dir_mode,
            file_mode,
        } = config;

        let status = match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(format_args!(
                    "jsondb: using '{}' (database already exists)",
                    root.display()
                ));
                OpenStatus::Existing
            }
            Ok(_) => {
                return Err(StoreError::Io {
                    op: "open database",
                    path: root,
                    source: io::Error::other("not a directory"),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                logger.debug(format_args!(
                    "jsondb: creating database at '{}'...",
                    root.display()
                ));
                create_dir_all(&root, dir_mode)?;
                OpenStatus::Created
            }
            Err(e) => return Err(StoreError::io("inspect", root, e)),
        };

        let store = Self {
            root,
            locks: LockRegistry::new(),
            logger,
            codec,
            dir_mode,
            file_mode,
        };

        Ok(Opened { store, status })
    }

    /// Returns the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the record codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns the logger the store was built with
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Resolves the on-disk path of a record
    pub fn record_path(&self, collection: &str, resource: &str) -> Result<PathBuf> {
        paths::validate_collection(collection)?;
        paths::validate_resource(resource)?;
        Ok(paths::record_path(
            &self.root,
            collection,
            resource,
            self.codec.extension(),
        ))
    }

    /// Persists `value` as `collection/resource`, replacing any previous record
    pub fn write<T>(&self, collection: &str, resource: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let record = self.record_path(collection, resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = paths::collection_dir(&self.root, collection);
        create_dir_all(&dir, self.dir_mode)?;

        let bytes = self
            .codec
            .encode(value)
            .map_err(|source| StoreError::Serialization {
                path: record.clone(),
                source,
            })?;

        let temp = paths::temp_path(&record);
        self.persist(&temp, &record, &bytes)
    }

    /// Writes `bytes` to `temp` and renames it over `record`
    ///
    /// On failure the temp file is removed and `record` is left as it was.
    fn persist(&self, temp: &Path, record: &Path, bytes: &[u8]) -> Result<()> {
        let result = self.write_temp(temp, bytes).and_then(|()| {
            fs::rename(temp, record).map_err(|e| StoreError::io("rename", record, e))
        });

        if result.is_err() {
            let _ = fs::remove_file(temp);
        }

        result
    }

    fn write_temp(&self, temp: &Path, bytes: &[u8]) -> Result<()> {
        // A temp file left by a crash may carry other permissions or be a symlink
        match fs::remove_file(temp) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io("remove stale temp file", temp, e)),
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.file_mode);
        }

        let mut file = options
            .open(temp)
            .map_err(|e| StoreError::io("create temp file", temp, e))?;

        file.write_all(bytes)
            .map_err(|e| StoreError::io("write temp file", temp, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync temp file", temp, e))?;

        Ok(())
    }

    /// Reads and decodes `collection/resource`
    ///
    /// Takes no lock: a concurrent write is either fully visible or not at all.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T> {
        let record = self.record_path(collection, resource)?;

        let bytes = fs::read(&record).map_err(|e| StoreError::io("read", &record, e))?;

        self.codec
            .decode(&bytes)
            .map_err(|source| StoreError::Serialization {
                path: record,
                source,
            })
    }

    /// Reads the raw payload of every record in a collection, in file-name order
    ///
    /// Fails with [`StoreError::NotFound`] when the collection does not exist.
    /// One unreadable record fails the whole call.
    pub fn read_all(&self, collection: &str) -> Result<Vec<Vec<u8>>> {
        paths::validate_collection(collection)?;

        self.record_files(collection)?
            .into_iter()
            .map(|(_, path)| fs::read(&path).map_err(|e| StoreError::io("read", &path, e)))
            .collect()
    }

    /// Like [`Store::read_all`], decoding each payload as `T`
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        paths::validate_collection(collection)?;

        self.record_files(collection)?
            .into_iter()
            .map(|(_, path)| {
                let bytes = fs::read(&path).map_err(|e| StoreError::io("read", &path, e))?;
                self.codec
                    .decode(&bytes)
                    .map_err(|source| StoreError::Serialization { path, source })
            })
            .collect()
    }

    /// Names of the records in a collection, sorted
    pub fn resources(&self, collection: &str) -> Result<Vec<String>> {
        paths::validate_collection(collection)?;

        Ok(self
            .record_files(collection)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Lists committed record files as (resource, path), sorted by path
    ///
    /// Subdirectories and in-flight temp files are skipped.
    fn record_files(&self, collection: &str) -> Result<Vec<(String, PathBuf)>> {
        let dir = paths::collection_dir(&self.root, collection);
        let extension = self.codec.extension();

        let entries = fs::read_dir(&dir).map_err(|e| StoreError::io("list", &dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("list", &dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StoreError::io("inspect", entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if !path.extension().is_some_and(|e| e == extension) {
                continue;
            }

            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((name.to_string(), path));
            }
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    /// Deletes one record, or the whole collection when `resource` is empty
    ///
    /// A directory at `collection/resource` takes precedence over the record
    /// file `collection/resource.<ext>` and is removed recursively.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        paths::validate_collection(collection)?;
        if !resource.is_empty() {
            paths::validate_name(resource)?;
        }

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = paths::collection_dir(&self.root, collection);
        let target = if resource.is_empty() {
            dir
        } else {
            dir.join(resource)
        };

        match fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => {
                return fs::remove_dir_all(&target)
                    .map_err(|e| StoreError::io("remove directory", &target, e));
            }
            Ok(_) if resource.is_empty() => return Err(not_found(target)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if resource.is_empty() {
                    return Err(StoreError::NotFound {
                        path: target,
                        source: e,
                    });
                }
            }
            Err(e) => return Err(StoreError::io("inspect", &target, e)),
        }

        let record = paths::with_extension_suffix(&target, self.codec.extension());
        match fs::metadata(&record) {
            Ok(meta) if meta.is_file() => {
                fs::remove_file(&record).map_err(|e| StoreError::io("remove", &record, e))
            }
            Ok(_) => Err(not_found(record)),
            Err(e) => Err(StoreError::io("inspect", record, e)),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Store<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root)
            .field("codec", &self.codec)
            .field("collections", &self.locks.len())
            .finish_non_exhaustive()
    }
}

fn not_found(path: PathBuf) -> StoreError {
    StoreError::NotFound {
        path,
        source: io::Error::from(io::ErrorKind::NotFound),
    }
}

fn create_dir_all(path: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(path)
        .map_err(|e| StoreError::io("create directory", path, e))
}
