//! Output records handed to the host build system

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bookkeeping block of a node
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Internal {
    /// Node type tag, derived from table name and column id
    #[serde(rename = "type")]
    pub node_type: String,
    /// e.g. "image/png"
    pub media_type: String,
    /// Remote URL of the asset, or the local placeholder path
    pub content: String,
    /// SHA-256 of the cached file
    pub content_digest: String,
}

/// Metadata node describing one cached file asset
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    pub parent: String,
    pub children: Vec<String>,
    pub absolute_path: PathBuf,
    pub extension: String,
    pub name: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub internal: Internal,
}

/// Whether a transformed value is a plain scalar or a structured node
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueShape {
    Scalar,
    Complex,
}

/// Result of a column transform: the node plus the untouched input value
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Transformed {
    pub node: AssetRecord,
    #[serde(rename = "type")]
    pub shape: ValueShape,
    pub value: Value,
}
