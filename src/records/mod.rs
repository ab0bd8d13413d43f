pub mod chunker;
pub mod identity;
pub mod serializer;

pub use chunker::{ChunkRange, RecordChunker};
pub use identity::{delete_id, record_id, strip_namespace, LocalRecordRef, RemoteRecordRef};
pub use serializer::{Cell, CellValue, RecordPage, RecordRow, RecordSerializer};
