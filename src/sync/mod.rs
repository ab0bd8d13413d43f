pub mod batch_delete;
pub mod events;
pub mod pipeline;
pub mod reconcile;
pub mod upload_queue;

pub use batch_delete::{
    plan_batches, BatchFailure, BatchOutcome, BatchTracker, DeleteBatch, DeleteCoordinator,
    DeleteSummary,
};
pub use events::{EventSink, SyncEvent, SyncPhase};
pub use pipeline::{ExportPipeline, ExportReport, ReconcileOutcome};
pub use reconcile::{Reconciler, StaleRecord};
pub use upload_queue::{UploadQueue, UploadRequest, UploadSummary};
