//! Input shapes handed over by the CMS layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// UI kind of a Directus single-file column
pub const SINGLE_FILE_UI: &str = "single_file";

/// Table Directus stores uploaded files in
pub const FILES_TABLE: &str = "directus_files";

/// A remote file as described by the CMS.
///
/// Every field is optional: partial CMS data is tolerated here instead of
/// failing later on string operations.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Server-relative URL, e.g. "/uploads/img.png"
    pub url: Option<String>,
    /// Display name, usually with an extension ("Cover.png")
    pub name: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    data: Option<FileDescriptor>,
}

impl FileDescriptor {
    /// Read a descriptor from a raw column value of the form `{ "data": {..} }`.
    ///
    /// Returns `None` for null or absent values and for values that carry no
    /// URL, since there is nothing to fetch for those.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        let envelope: Envelope = serde_json::from_value(value.clone()).ok()?;
        envelope.data.filter(|d| d.remote_path().is_some())
    }

    /// Non-empty URL, if any
    pub fn remote_path(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Column metadata for the field being transformed
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ColumnData {
    pub id: String,
    #[serde(default)]
    pub ui: String,
    #[serde(default)]
    pub related_table: Option<String>,
}

impl ColumnData {
    /// True for single-file columns pointing at the Directus files table
    pub fn is_single_file(&self) -> bool {
        self.ui == SINGLE_FILE_UI && self.related_table.as_deref() == Some(FILES_TABLE)
    }
}

/// Caller-supplied identity inputs used to stamp the record
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct IdentityContext {
    pub table_name: String,
    pub entry_id: String,
    pub column: ColumnData,
    /// Id of the parent entry node
    pub parent_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let value = json!({
            "data": {
                "url": "/uploads/img.png",
                "name": "Cover.png",
                "title": "T",
                "caption": "C",
                "width": 640
            }
        });

        let descriptor = FileDescriptor::from_value(&value).unwrap();
        assert_eq!(descriptor.url.as_deref(), Some("/uploads/img.png"));
        assert_eq!(descriptor.name.as_deref(), Some("Cover.png"));
        assert_eq!(descriptor.title.as_deref(), Some("T"));
        assert_eq!(descriptor.caption.as_deref(), Some("C"));
    }

    #[test]
    fn test_from_value_absent() {
        assert!(FileDescriptor::from_value(&Value::Null).is_none());
        assert!(FileDescriptor::from_value(&json!({})).is_none());
        assert!(FileDescriptor::from_value(&json!({ "data": null })).is_none());
        assert!(FileDescriptor::from_value(&json!({ "data": { "name": "a.png" } })).is_none());
        assert!(FileDescriptor::from_value(&json!({ "data": { "url": "" } })).is_none());
    }

    #[test]
    fn test_from_value_partial() {
        let descriptor = FileDescriptor::from_value(&json!({ "data": { "url": "/a.png" } })).unwrap();
        assert_eq!(descriptor.name, None);
        assert_eq!(descriptor.title, None);
    }

    #[test]
    fn test_single_file_column() {
        let mut column = ColumnData {
            id: "cover".to_string(),
            ui: SINGLE_FILE_UI.to_string(),
            related_table: Some(FILES_TABLE.to_string()),
        };
        assert!(column.is_single_file());

        column.related_table = Some("articles".to_string());
        assert!(!column.is_single_file());

        column.related_table = Some(FILES_TABLE.to_string());
        column.ui = "text_input".to_string();
        assert!(!column.is_single_file());
    }
}
