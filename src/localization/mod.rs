pub mod culture;

pub use culture::{CultureMap, DEFAULT_CULTURE_MAPPING};

use crate::utils::{GridlySyncError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One gathered text: the native string plus whatever translations exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationEntry {
    pub key: String,
    #[serde(default)]
    pub namespace: String,
    pub native_culture: String,
    pub native_text: String,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    /// Source location the text was gathered from, e.g. `Source/Menu.cpp - line 12`.
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl LocalizationEntry {
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        native_culture: impl Into<String>,
        native_text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            namespace: namespace.into(),
            native_culture: native_culture.into(),
            native_text: native_text.into(),
            translations: BTreeMap::new(),
            context: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_translation(mut self, culture: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(culture.into(), text.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Text for `culture`; the native culture resolves to the native text.
    pub fn localized(&self, culture: &str) -> Option<&str> {
        if culture == self.native_culture {
            return Some(&self.native_text);
        }
        self.translations.get(culture).map(String::as_str)
    }
}

/// Whatever gathers the project's texts.
pub trait EntrySource {
    fn load_entries(&self) -> Result<Vec<LocalizationEntry>>;
}

/// Reads a JSON array of entries from disk.
pub struct JsonEntrySource {
    path: PathBuf,
}

impl JsonEntrySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntrySource for JsonEntrySource {
    fn load_entries(&self) -> Result<Vec<LocalizationEntry>> {
        if !self.path.exists() {
            return Err(GridlySyncError::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let entries: Vec<LocalizationEntry> = serde_json::from_str(&content)?;

        if let Some(pos) = entries.iter().position(|e| e.key.trim().is_empty()) {
            return Err(GridlySyncError::InvalidEntries(format!(
                "entry {} in {} has an empty key",
                pos,
                self.path.display()
            )));
        }

        tracing::debug!(path = %self.path.display(), count = entries.len(), "Loaded entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn native_culture_resolves_to_native_text() {
        let entry =
            LocalizationEntry::new("Menu", "Play", "en", "Play").with_translation("fr-FR", "Jouer");
        assert_eq!(entry.localized("en"), Some("Play"));
        assert_eq!(entry.localized("fr-FR"), Some("Jouer"));
        assert_eq!(entry.localized("de-DE"), None);
    }

    #[test]
    fn json_source_reads_minimal_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"key": "Play", "namespace": "Menu", "native_culture": "en", "native_text": "Play",
                  "translations": {{"fr-FR": "Jouer"}}, "context": "Menu.cpp - line 3"}},
                {{"key": "Quit", "native_culture": "en", "native_text": "Quit"}}
            ]"#
        )
        .unwrap();

        let entries = JsonEntrySource::new(file.path()).load_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].translations.get("fr-FR").map(String::as_str), Some("Jouer"));
        assert_eq!(entries[1].namespace, "");
        assert!(entries[1].metadata.is_empty());
    }

    #[test]
    fn json_source_rejects_empty_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"key": " ", "native_culture": "en", "native_text": "x"}}]"#).unwrap();

        let err = JsonEntrySource::new(file.path()).load_entries().unwrap_err();
        assert!(matches!(err, GridlySyncError::InvalidEntries(_)));
    }

    #[test]
    fn json_source_reports_missing_file() {
        let err = JsonEntrySource::new("/no/such/entries.json").load_entries().unwrap_err();
        assert!(matches!(err, GridlySyncError::FileNotFound(_)));
    }
}
