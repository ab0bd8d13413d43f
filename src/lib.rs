pub mod csv_processor;
pub mod gridly;
pub mod localization;
pub mod records;
pub mod sync;
pub mod utils;

pub use csv_processor::{parse_remote_records, RowTokenizer};
pub use gridly::{GridlyApi, GridlyClient};
pub use localization::{CultureMap, EntrySource, JsonEntrySource, LocalizationEntry};
pub use records::{LocalRecordRef, RecordRow, RecordSerializer, RemoteRecordRef};
pub use sync::{
    DeleteCoordinator, DeleteSummary, EventSink, ExportPipeline, ExportReport, ReconcileOutcome,
    Reconciler, SyncEvent, SyncPhase, UploadQueue,
};
pub use utils::{AppConfig, ExportOptions, GridlySyncError, Result};
