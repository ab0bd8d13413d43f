use crate::localization::{CultureMap, LocalizationEntry};
use crate::records::chunker::RecordChunker;
use crate::records::identity::record_id;
use crate::utils::{ColumnDataType, ExportOptions, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "columnId")]
    pub column_id: String,
    pub value: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl Cell {
    pub fn text(column_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: CellValue::Text(value.into()),
        }
    }

    pub fn number(column_id: impl Into<String>, value: i64) -> Self {
        Self {
            column_id: column_id.into(),
            value: CellValue::Number(value),
        }
    }
}

/// One upload request body worth of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub index: usize,
    pub rows: Vec<RecordRow>,
}

impl RecordPage {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows)?)
    }
}

pub struct RecordSerializer<'a> {
    options: &'a ExportOptions,
    cultures: &'a CultureMap,
}

impl<'a> RecordSerializer<'a> {
    pub fn new(options: &'a ExportOptions, cultures: &'a CultureMap) -> Self {
        Self { options, cultures }
    }

    pub fn row(&self, entry: &LocalizationEntry) -> RecordRow {
        let options = self.options;
        let mut cells = Vec::new();
        let mut path = None;

        if options.export_namespace() {
            if options.use_path_as_namespace() {
                path = Some(entry.namespace.clone());
            } else if !options.namespace_column_id.is_empty() {
                cells.push(Cell::text(&options.namespace_column_id, &entry.namespace));
            }
        }

        match self.cultures.to_gridly(&entry.native_culture) {
            Some(code) => cells.push(Cell::text(
                format!("{}{}", options.source_language_column_id_prefix, code),
                &entry.native_text,
            )),
            None => tracing::debug!(
                culture = %entry.native_culture,
                key = %entry.key,
                "Native culture has no Gridly mapping, skipping source cell"
            ),
        }

        if options.export_context {
            if let Some(context) = &entry.context {
                cells.push(Cell::text(
                    &options.context_column_id,
                    context.replace(" - line ", ":"),
                ));
            }
        }

        if options.export_metadata {
            for (name, value) in &entry.metadata {
                let Some(column) = options.metadata_mapping.get(name) else {
                    continue;
                };
                cells.push(match column.data_type {
                    ColumnDataType::String => Cell::text(&column.name, value),
                    ColumnDataType::Number => Cell::number(&column.name, parse_leading_int(value)),
                });
            }
        }

        if options.include_target_translations {
            for culture in &options.target_cultures {
                if *culture == entry.native_culture {
                    continue;
                }
                let Some(text) = entry.localized(culture).filter(|t| !t.is_empty()) else {
                    continue;
                };
                let Some(code) = self.cultures.to_gridly(culture) else {
                    tracing::debug!(
                        culture = %culture,
                        "Target culture has no Gridly mapping, skipping"
                    );
                    continue;
                };
                cells.push(Cell::text(
                    format!("{}{}", options.target_language_column_id_prefix, code),
                    text,
                ));
            }
        }

        RecordRow {
            id: record_id(&entry.namespace, &entry.key, options.use_combined_namespace_id),
            path,
            cells,
        }
    }

    pub fn rows(&self, entries: &[LocalizationEntry]) -> Vec<RecordRow> {
        entries.iter().map(|e| self.row(e)).collect()
    }

    /// Splits entries into pages of `export_max_records_per_request` rows.
    pub fn pages(&self, entries: &[LocalizationEntry]) -> Vec<RecordPage> {
        RecordChunker::new(self.options.export_max_records_per_request)
            .split(entries)
            .map(|(range, slice)| RecordPage {
                index: range.index,
                rows: self.rows(slice),
            })
            .collect()
    }

    pub fn json_documents(&self, entries: &[LocalizationEntry]) -> Result<Vec<String>> {
        self.pages(entries).iter().map(RecordPage::to_json).collect()
    }
}

/// Leading optionally-signed integer of `value`, 0 when there is none.
fn parse_leading_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
