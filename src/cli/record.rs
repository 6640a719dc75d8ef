//! Record CLI commands

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::app::Commands;
use super::output::Output;
use crate::storage::{Codec, OpenStatus, Opened, Store, StoreError};

pub fn run<C: Codec>(cmd: Commands, root: &Path, codec: C, output: &Output) -> Result<()> {
    let Opened { store, status } = Store::builder()
        .root(root)
        .codec(codec)
        .open()
        .with_context(|| format!("Failed to open database: {}", root.display()))?;

    match cmd {
        Commands::Init => init(&store, status, output),
        Commands::Write {
            collection,
            resource,
            value,
        } => write(&store, output, &collection, &resource, value),
        Commands::Read {
            collection,
            resource,
        } => read(&store, output, &collection, &resource),
        Commands::ReadAll { collection } => read_all(&store, output, &collection),
        Commands::List { collection } => list(&store, output, &collection),
        Commands::Delete {
            collection,
            resource,
        } => delete(&store, output, &collection, &resource),
    }
}

fn init<C: Codec>(store: &Store<C>, status: OpenStatus, output: &Output) -> Result<()> {
    let created = status == OpenStatus::Created;

    if output.is_json() {
        output.data(&serde_json::json!({
            "root": store.root().display().to_string(),
            "created": created,
        }));
    } else if created {
        output.success(&format!("Created database at {}", store.root().display()));
    } else {
        output.success(&format!(
            "Using existing database at {}",
            store.root().display()
        ));
    }

    Ok(())
}

fn write<C: Codec>(
    store: &Store<C>,
    output: &Output,
    collection: &str,
    resource: &str,
    value: Option<String>,
) -> Result<()> {
    let text = match value {
        Some(text) => text,
        None => {
            output.verbose_ctx("write", "Reading value from stdin");
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read value from stdin")?;
            buf
        }
    };

    let value: Value = serde_json::from_str(&text).context("Value is not valid JSON")?;

    store
        .write(collection, resource, &value)
        .with_context(|| format!("Failed to write {}/{}", collection, resource))?;

    output.success(&format!("Wrote {}/{}", collection, resource));
    Ok(())
}

fn read<C: Codec>(store: &Store<C>, output: &Output, collection: &str, resource: &str) -> Result<()> {
    let value: Value = store
        .read(collection, resource)
        .with_context(|| format!("Failed to read {}/{}", collection, resource))?;

    output.data(&value);
    Ok(())
}

fn read_all<C: Codec>(store: &Store<C>, output: &Output, collection: &str) -> Result<()> {
    let records = match store.read_all(collection) {
        Ok(records) => records,
        Err(e) if is_missing_collection(store, collection, &e) => {
            output.verbose_ctx("read-all", &format!("Collection '{}' is empty", collection));
            Vec::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read collection {}", collection))
        }
    };

    let values = records
        .iter()
        .map(|bytes| store.codec().decode::<Value>(bytes))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to decode record")?;

    output.verbose_ctx("read-all", &format!("Found {} records", values.len()));

    if output.is_json() {
        output.data(&values);
    } else {
        for value in &values {
            output.data(value);
        }
    }

    Ok(())
}

fn list<C: Codec>(store: &Store<C>, output: &Output, collection: &str) -> Result<()> {
    let names = match store.resources(collection) {
        Ok(names) => names,
        Err(e) if is_missing_collection(store, collection, &e) => Vec::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list collection {}", collection))
        }
    };

    if output.is_json() {
        output.data(&names);
    } else {
        for name in &names {
            output.row(&[name.as_str()]);
        }
    }

    Ok(())
}

fn delete<C: Codec>(store: &Store<C>, output: &Output, collection: &str, resource: &str) -> Result<()> {
    store.delete(collection, resource).with_context(|| {
        if resource.is_empty() {
            format!("Failed to delete collection {}", collection)
        } else {
            format!("Failed to delete {}/{}", collection, resource)
        }
    })?;

    if resource.is_empty() {
        output.success(&format!("Deleted collection {}", collection));
    } else {
        output.success(&format!("Deleted {}/{}", collection, resource));
    }

    Ok(())
}

/// True only when the collection directory itself is absent
///
/// A record vanishing mid-listing also surfaces as `NotFound`, but for its
/// own path; that is a real failure, not an empty collection.
fn is_missing_collection<C: Codec>(store: &Store<C>, collection: &str, err: &StoreError) -> bool {
    match err {
        StoreError::NotFound { path, .. } => *path == store.root().join(collection),
        _ => false,
    }
}
