use crate::utils::Result;
use csv::StringRecord;

/// Quote-aware row splitter over an in-memory CSV export.
///
/// Fields are comma separated, quoted fields may span lines and use `""` for
/// a literal quote. CR, LF, and CRLF all terminate a row; the last row does
/// not need a terminator.
pub struct RowTokenizer<'a> {
    reader: csv::Reader<&'a [u8]>,
    record: StringRecord,
}

impl<'a> RowTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        Self {
            reader,
            record: StringRecord::new(),
        }
    }
}

impl Iterator for RowTokenizer<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.record.iter().map(|s| s.to_string()).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// True for rows that carry no data at all, such as blank lines.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|field| field.is_empty())
}
