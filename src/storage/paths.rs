//! Mapping from (collection, resource) keys to paths under the root
//!
//! ```text
//! <root>/<collection>/<resource>.<ext>       # committed record
//! <root>/<collection>/<resource>.<ext>.tmp   # in-flight write
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::{Result, StoreError};

/// Suffix appended to a record path while it is being written
pub const TEMP_SUFFIX: &str = ".tmp";

pub fn validate_collection(collection: &str) -> Result<()> {
    if collection.is_empty() {
        return Err(StoreError::MissingCollection);
    }
    validate_name(collection)
}

pub fn validate_resource(resource: &str) -> Result<()> {
    if resource.is_empty() {
        return Err(StoreError::MissingResource);
    }
    validate_name(resource)
}

/// Rejects names that would escape their parent directory
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name == "." || name == ".." {
        "relative directory names are not allowed"
    } else if name.contains(['/', '\\']) {
        "path separators are not allowed"
    } else if name.contains('\0') {
        "NUL bytes are not allowed"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

pub fn record_path(root: &Path, collection: &str, resource: &str, extension: &str) -> PathBuf {
    collection_dir(root, collection).join(format!("{}.{}", resource, extension))
}

/// Temp file co-located with the record: same name plus [`TEMP_SUFFIX`]
pub fn temp_path(record: &Path) -> PathBuf {
    let mut name = OsString::from(record.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Extension-qualified path: `path` with `.<ext>` appended verbatim
pub fn with_extension_suffix(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
