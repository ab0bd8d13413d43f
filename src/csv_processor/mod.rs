pub mod parser;
pub mod tokenizer;

pub use parser::{
    locate_columns, parse_remote_records, RecordColumns, PATH_COLUMN, RECORD_ID_COLUMN,
};
pub use tokenizer::{is_blank_row, RowTokenizer};
