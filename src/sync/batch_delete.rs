use crate::gridly::GridlyApi;
use crate::records::RecordChunker;
use crate::sync::events::{EventSink, SyncEvent, SyncPhase};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBatch {
    pub index: usize,
    pub ids: Vec<String>,
}

pub fn plan_batches(ids: &[String], batch_size: usize) -> Vec<DeleteBatch> {
    RecordChunker::new(batch_size)
        .split(ids)
        .map(|(range, slice)| DeleteBatch {
            index: range.index,
            ids: slice.to_vec(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub index: usize,
    pub requested: usize,
    pub result: std::result::Result<(), String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub batches_total: usize,
    pub records_requested: usize,
    pub records_deleted: usize,
    pub failures: Vec<BatchFailure>,
}

impl DeleteSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn error_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(|f| format!("batch {}: {}", f.index, f.error))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Counts batch completions and yields the summary once all have reported.
#[derive(Debug)]
pub struct BatchTracker {
    total: usize,
    completed: usize,
    summary: DeleteSummary,
    reported: bool,
}

impl BatchTracker {
    pub fn new(total: usize, records_requested: usize) -> Self {
        Self {
            total,
            completed: 0,
            summary: DeleteSummary {
                batches_total: total,
                records_requested,
                ..DeleteSummary::default()
            },
            reported: false,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    /// Returns the summary on the completion that makes `completed == total`,
    /// and `None` for every other call.
    pub fn record(&mut self, outcome: BatchOutcome) -> Option<DeleteSummary> {
        if self.completed >= self.total {
            tracing::warn!(batch = outcome.index, "Ignoring completion beyond the planned batches");
            return None;
        }
        self.completed += 1;

        match outcome.result {
            Ok(()) => self.summary.records_deleted += outcome.requested,
            Err(error) => self.summary.failures.push(BatchFailure {
                index: outcome.index,
                error,
            }),
        }

        if self.is_complete() && !self.reported {
            self.reported = true;
            self.summary.failures.sort_by_key(|f| f.index);
            Some(self.summary.clone())
        } else {
            None
        }
    }
}

pub struct DeleteCoordinator<A> {
    api: Arc<A>,
    batch_size: usize,
    events: EventSink,
}

impl<A: GridlyApi + 'static> DeleteCoordinator<A> {
    pub fn new(api: Arc<A>, batch_size: usize) -> Self {
        Self {
            api,
            batch_size,
            events: EventSink::default(),
        }
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    /// Dispatches every batch at once and waits for all of them.
    ///
    /// Completions are drained by this task alone, so the tracker is never
    /// touched concurrently. A failed batch does not stop the others.
    pub async fn delete_all(&self, ids: &[String]) -> DeleteSummary {
        if ids.is_empty() {
            tracing::info!("No records to delete");
            return DeleteSummary::default();
        }

        let batches = plan_batches(ids, self.batch_size);
        let mut tracker = BatchTracker::new(batches.len(), ids.len());
        self.events.emit(SyncEvent::PhaseChanged(SyncPhase::Deleting {
            batches: batches.len(),
        }));

        let mut tasks = JoinSet::new();
        let mut spawned: HashMap<tokio::task::Id, (usize, usize)> = HashMap::new();
        for batch in batches {
            let api = Arc::clone(&self.api);
            let index = batch.index;
            let requested = batch.ids.len();
            let handle = tasks.spawn(async move { api.delete_records(&batch.ids).await });
            spawned.insert(handle.id(), (index, requested));
            tracing::info!(batch = index, records = requested, "Delete request sent");
        }

        let mut summary = None;
        while let Some(joined) = tasks.join_next_with_id().await {
            let (task_id, result) = match joined {
                Ok((id, result)) => (id, result.map_err(|e| e.to_string())),
                Err(e) => (e.id(), Err(format!("delete task aborted: {}", e))),
            };
            let (index, requested) = spawned.get(&task_id).copied().unwrap_or((usize::MAX, 0));

            match &result {
                Ok(()) => tracing::info!(batch = index, records = requested, "Deleted records"),
                Err(error) => {
                    tracing::error!(batch = index, error = %error, "Failed to delete records")
                }
            }
            self.events.emit(SyncEvent::BatchDeleted {
                batch: index,
                success: result.is_ok(),
                error: result.as_ref().err().cloned(),
            });

            if let Some(done) = tracker.record(BatchOutcome {
                index,
                requested,
                result,
            }) {
                summary = Some(done);
            }
        }

        let summary = summary.unwrap_or_else(|| tracker.summary.clone());
        tracing::info!(
            entries_deleted = summary.records_deleted,
            failed_batches = summary.failures.len(),
            "Record deletion finished"
        );
        self.events.emit(SyncEvent::DeleteFinished {
            success: summary.is_success(),
            entries_deleted: summary.records_deleted,
            error: summary.error_message(),
        });
        summary
    }
}
