use crate::csv_processor::parse_remote_records;
use crate::gridly::GridlyApi;
use crate::localization::{CultureMap, LocalizationEntry};
use crate::records::{LocalRecordRef, RecordPage, RecordSerializer};
use crate::sync::batch_delete::{DeleteCoordinator, DeleteSummary};
use crate::sync::events::{EventSink, SyncEvent, SyncPhase};
use crate::sync::reconcile::Reconciler;
use crate::sync::upload_queue::UploadQueue;
use crate::utils::{AppConfig, ExportOptions, GridlySyncError, Result};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub enum ReconcileOutcome {
    Skipped,
    Pruned {
        stale: usize,
        summary: DeleteSummary,
    },
    /// Fetching or parsing the export failed; nothing was deleted.
    Failed(GridlySyncError),
}

#[derive(Debug)]
pub struct ExportReport {
    pub run_id: String,
    pub chunks_sent: usize,
    pub entries_updated: usize,
    pub reconcile: ReconcileOutcome,
}

impl ExportReport {
    pub fn entries_deleted(&self) -> usize {
        match &self.reconcile {
            ReconcileOutcome::Pruned { summary, .. } => summary.records_deleted,
            _ => 0,
        }
    }
}

/// Upload, then optionally prune what the upload made stale.
///
/// `Idle → Uploading(i) → Done → FetchingCsv → Parsing → Reconciling →
/// Deleting → Idle`, with `Failed` reachable from uploading and from the
/// sync steps.
pub struct ExportPipeline<A> {
    api: Arc<A>,
    options: ExportOptions,
    delete_batch_size: usize,
    cultures: CultureMap,
    events: EventSink,
    phase: SyncPhase,
}

impl<A: GridlyApi + 'static> ExportPipeline<A> {
    pub fn new(api: Arc<A>, config: &AppConfig) -> Self {
        Self {
            api,
            options: config.export.clone(),
            delete_batch_size: config.delete.max_records_per_request,
            cultures: CultureMap::with_overrides(&config.cultures),
            events: EventSink::default(),
            phase: SyncPhase::Idle,
        }
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    fn set_phase(&mut self, phase: SyncPhase) {
        if self.phase == phase {
            return;
        }
        tracing::debug!(phase = %phase, "Sync phase changed");
        self.events.emit(SyncEvent::PhaseChanged(phase.clone()));
        self.phase = phase;
    }

    pub fn preview(&self, entries: &[LocalizationEntry]) -> Vec<RecordPage> {
        RecordSerializer::new(&self.options, &self.cultures).pages(entries)
    }

    pub async fn export(&mut self, entries: &[LocalizationEntry]) -> Result<ExportReport> {
        let run_id = Uuid::new_v4().to_string();
        self.phase = SyncPhase::Idle;

        let pages = self.preview(entries);
        let local: Vec<LocalRecordRef> = entries.iter().map(LocalRecordRef::from_entry).collect();
        tracing::info!(
            run_id = %run_id,
            entries = entries.len(),
            chunks = pages.len(),
            include_targets = self.options.include_target_translations,
            "Starting export"
        );

        let mut queue = UploadQueue::from_pages(pages);
        let upload = match queue.pump(self.api.as_ref(), &self.events).await {
            Ok(summary) => summary,
            Err(e) => {
                self.set_phase(SyncPhase::Failed);
                self.events.emit(SyncEvent::UploadFinished {
                    success: false,
                    entries_updated: queue.entries_updated(),
                    error: Some(e.to_string()),
                });
                self.phase = SyncPhase::Idle;
                return Err(e);
            }
        };

        self.set_phase(SyncPhase::Done);
        tracing::info!(
            run_id = %run_id,
            entries_updated = upload.entries_updated,
            "Number of entries updated: {}",
            upload.entries_updated
        );
        self.events.emit(SyncEvent::UploadFinished {
            success: true,
            entries_updated: upload.entries_updated,
            error: None,
        });

        let reconcile = if self.options.sync_records && upload.chunks_sent > 0 {
            match self.prune(&local).await {
                Ok((stale, summary)) => ReconcileOutcome::Pruned { stale, summary },
                Err(e) => {
                    tracing::error!(run_id = %run_id, error = %e, "Record sync failed");
                    ReconcileOutcome::Failed(e)
                }
            }
        } else {
            ReconcileOutcome::Skipped
        };

        self.set_phase(SyncPhase::Idle);
        Ok(ExportReport {
            run_id,
            chunks_sent: upload.chunks_sent,
            entries_updated: upload.entries_updated,
            reconcile,
        })
    }

    /// Delete ids for records that `local` makes stale, without deleting.
    pub async fn stale_ids(&mut self, local: &[LocalRecordRef]) -> Result<Vec<String>> {
        self.set_phase(SyncPhase::FetchingCsv);
        let csv = match self.api.export_csv().await {
            Ok(csv) => csv,
            Err(e) => {
                self.set_phase(SyncPhase::Failed);
                return Err(e);
            }
        };

        self.set_phase(SyncPhase::Parsing);
        let remote = match parse_remote_records(&csv) {
            Ok(remote) => remote,
            Err(e) => {
                self.set_phase(SyncPhase::Failed);
                return Err(e);
            }
        };

        self.set_phase(SyncPhase::Reconciling);
        let reconciler = Reconciler::new(self.options.use_combined_namespace_id);
        let ids = reconciler.delete_ids(&remote, local);
        self.events.emit(SyncEvent::StaleRecordsFound { count: ids.len() });
        Ok(ids)
    }

    pub async fn prune(&mut self, local: &[LocalRecordRef]) -> Result<(usize, DeleteSummary)> {
        let ids = self.stale_ids(local).await?;
        if !ids.is_empty() {
            // The coordinator announces this phase on the event channel itself.
            self.phase = SyncPhase::Deleting {
                batches: ids.len().div_ceil(self.delete_batch_size.max(1)),
            };
        }

        let summary = DeleteCoordinator::new(Arc::clone(&self.api), self.delete_batch_size)
            .with_events(self.events.clone())
            .delete_all(&ids)
            .await;

        self.set_phase(SyncPhase::Idle);
        Ok((ids.len(), summary))
    }
}
