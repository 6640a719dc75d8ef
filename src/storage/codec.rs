//! Serialization codecs for records
//!
//! A codec turns a value into the bytes stored in `<resource>.<ext>` and
//! back. Output is indented for humans and always ends with a newline.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Marshal/unmarshal pair for a structured text format
pub trait Codec: Send + Sync {
    /// File extension for records, without the leading dot
    fn extension(&self) -> &str;

    /// Serializes a value; the output ends with a newline
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserializes a value from stored bytes
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON, indented with tabs
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        Ok(ensure_newline(buf))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// YAML documents
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let text = serde_yaml::to_string(value)?;
        Ok(ensure_newline(text.into_bytes()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }
}

fn ensure_newline(mut buf: Vec<u8>) -> Vec<u8> {
    if buf.last() != Some(&b'\n') {
        buf.push(b'\n');
    }
    buf
}
