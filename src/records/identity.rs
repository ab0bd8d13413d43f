//! Record identity shared by the exporter and the reconciler.
//!
//! Gridly only knows one `id` per row. With combined ids that id is
//! `namespace,key`, except for blueprint namespaces which upload as `,key`.
//! Both the upload path and the delete path go through this module so the
//! two sides agree on what a record is called.

use serde::{Deserialize, Serialize};

pub const BLUEPRINTS_MARKER: &str = "blueprints/";

pub fn record_id(namespace: &str, key: &str, use_combined_namespace_id: bool) -> String {
    if !use_combined_namespace_id {
        key.to_string()
    } else if namespace.contains(BLUEPRINTS_MARKER) {
        format!(",{}", key)
    } else {
        format!("{},{}", namespace, key)
    }
}

pub fn strip_namespace(record_id: &str) -> &str {
    match record_id.find(',') {
        Some(idx) => &record_id[idx + 1..],
        None => record_id,
    }
}

/// Id to send in a delete request for a record stored under `path`.
pub fn delete_id(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else if path.starts_with(BLUEPRINTS_MARKER) {
        format!(",{}", key)
    } else {
        format!("{},{}", path, key)
    }
}

/// A record the current run uploaded: `id` is the entry key, `path` its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalRecordRef {
    pub id: String,
    pub path: String,
}

impl LocalRecordRef {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: key.into(),
            path: namespace.into(),
        }
    }

    pub fn from_entry(entry: &crate::localization::LocalizationEntry) -> Self {
        Self::new(entry.namespace.clone(), entry.key.clone())
    }

    pub fn record_id(&self, use_combined_namespace_id: bool) -> String {
        record_id(&self.path, &self.id, use_combined_namespace_id)
    }
}

/// A row of the view's CSV export. `id` is the raw "Record ID" cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteRecordRef {
    pub id: String,
    pub path: String,
}

impl RemoteRecordRef {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    pub fn key(&self) -> &str {
        strip_namespace(&self.id)
    }

    /// Key to compare with local entries. Non-combined ids are the bare key,
    /// commas included.
    pub fn match_key(&self, use_combined_namespace_id: bool) -> &str {
        if use_combined_namespace_id {
            self.key()
        } else {
            &self.id
        }
    }

    pub fn delete_id(&self, use_combined_namespace_id: bool) -> String {
        if use_combined_namespace_id {
            delete_id(&self.path, self.key())
        } else {
            self.id.clone()
        }
    }
}
