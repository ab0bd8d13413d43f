use crate::csv_processor::tokenizer::{is_blank_row, RowTokenizer};
use crate::records::{strip_namespace, RemoteRecordRef};
use crate::utils::{trim_quotes, GridlySyncError, Result};

pub const RECORD_ID_COLUMN: &str = "Record ID";
pub const PATH_COLUMN: &str = "Path";

/// Zero-based positions of the columns reconciliation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordColumns {
    pub record_id: usize,
    pub path: usize,
}

impl RecordColumns {
    fn min_fields(&self) -> usize {
        self.record_id.max(self.path) + 1
    }
}

/// Reads the header row only and finds "Record ID" and "Path".
pub fn locate_columns(csv_text: &str) -> Result<RecordColumns> {
    let mut header = None;
    for row in RowTokenizer::new(csv_text) {
        let row = row?;
        if !is_blank_row(&row) {
            header = Some(row);
            break;
        }
    }
    let header = header.unwrap_or_default();

    let mut record_id = None;
    let mut path = None;
    for (index, name) in header.iter().enumerate() {
        let name = trim_quotes(name.trim());
        if name.eq_ignore_ascii_case(RECORD_ID_COLUMN) {
            record_id = Some(index);
        } else if name.eq_ignore_ascii_case(PATH_COLUMN) {
            path = Some(index);
        }
    }

    let record_id = record_id.ok_or_else(|| GridlySyncError::MissingColumn {
        column: RECORD_ID_COLUMN.to_string(),
    })?;
    let path = path.ok_or_else(|| GridlySyncError::MissingColumn {
        column: PATH_COLUMN.to_string(),
    })?;

    Ok(RecordColumns { record_id, path })
}

/// Parses a view export into one [`RemoteRecordRef`] per data row.
///
/// Fails with [`GridlySyncError::MissingColumn`] before reading any data when
/// the header lacks either column. Rows too short to reach both columns are
/// skipped, as is any repeat of the header.
pub fn parse_remote_records(csv_text: &str) -> Result<Vec<RemoteRecordRef>> {
    let columns = locate_columns(csv_text)?;
    let mut records = Vec::new();
    let mut short_rows = 0usize;

    for row in RowTokenizer::new(csv_text) {
        let row = row?;
        if row.len() < columns.min_fields() {
            if !is_blank_row(&row) {
                short_rows += 1;
            }
            continue;
        }

        let id = trim_quotes(&row[columns.record_id]);
        if strip_namespace(id).eq_ignore_ascii_case(RECORD_ID_COLUMN) {
            continue;
        }
        let path = trim_quotes(&row[columns.path]);
        records.push(RemoteRecordRef::new(id, path));
    }

    if short_rows > 0 {
        tracing::warn!(short_rows, "Skipped CSV rows without Record ID and Path fields");
    }
    tracing::debug!(records = records.len(), ?columns, "Parsed Gridly export");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_record_id_keeps_its_comma() {
        let records = parse_remote_records("Record ID,Path\n\"a,b\",p1\n").unwrap();
        assert_eq!(records, vec![RemoteRecordRef::new("a,b", "p1")]);
        assert_eq!(records[0].key(), "b");
    }

    #[test]
    fn columns_are_found_anywhere_and_case_insensitively() {
        let csv = "src_enUS,path,tg_frFR,record id\nHello,Menu,Bonjour,\"Menu,Hello\"\n";
        assert_eq!(
            locate_columns(csv).unwrap(),
            RecordColumns { record_id: 3, path: 1 }
        );
        assert_eq!(
            parse_remote_records(csv).unwrap(),
            vec![RemoteRecordRef::new("Menu,Hello", "Menu")]
        );
    }

    #[test]
    fn missing_path_column_aborts() {
        let err = parse_remote_records("Record ID,Text\n1,x\n").unwrap_err();
        match err {
            GridlySyncError::MissingColumn { column } => assert_eq!(column, "Path"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_record_id_column_aborts() {
        let err = parse_remote_records("Id,Path\n1,x\n").unwrap_err();
        assert!(matches!(
            err,
            GridlySyncError::MissingColumn { ref column } if column == "Record ID"
        ));
    }

    #[test]
    fn empty_export_is_missing_columns() {
        assert!(matches!(
            parse_remote_records(""),
            Err(GridlySyncError::MissingColumn { .. })
        ));
    }

    #[test]
    fn repeated_header_and_short_rows_are_skipped() {
        let csv = "Record ID,Path,Text\r\n\
Menu,Play,Menu,Play\r\n\
\r\n\
Record ID,Path,Text\r\n\
lonely\r\n\
\"Menu,Quit\",Menu,Quit";
        // Unquoted commas split the first data row: its Record ID cell is just "Menu".
        let records = parse_remote_records(csv).unwrap();
        assert_eq!(
            records,
            vec![
                RemoteRecordRef::new("Menu", "Play"),
                RemoteRecordRef::new("Menu,Quit", "Menu"),
            ]
        );
    }

    #[test]
    fn embedded_quotes_and_newlines_in_other_columns() {
        let csv = "Record ID,Path,src_enUS\n\
\"Dialog,Greet\",Dialog,\"He said \"\"hi\"\"\nthen left\"\n";
        let records = parse_remote_records(csv).unwrap();
        assert_eq!(records, vec![RemoteRecordRef::new("Dialog,Greet", "Dialog")]);
    }

    #[test]
    fn empty_path_cells_are_kept_as_empty() {
        let records = parse_remote_records("Record ID,Path\n\",K\",\n").unwrap();
        assert_eq!(records, vec![RemoteRecordRef::new(",K", "")]);
    }

    #[test]
    fn repeated_header_is_skipped_whatever_its_case() {
        let csv = "record id,path\n\"Menu,Play\",Menu\nRECORD ID,PATH\n";
        assert_eq!(
            parse_remote_records(csv).unwrap(),
            vec![RemoteRecordRef::new("Menu,Play", "Menu")]
        );
    }
}
