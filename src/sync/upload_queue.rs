use crate::gridly::GridlyApi;
use crate::records::{RecordPage, RecordRow};
use crate::sync::events::{EventSink, SyncEvent, SyncPhase};
use crate::utils::{GridlySyncError, Result};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub chunk: usize,
    pub rows: Vec<RecordRow>,
}

impl From<RecordPage> for UploadRequest {
    fn from(page: RecordPage) -> Self {
        Self {
            chunk: page.index,
            rows: page.rows,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub chunks_sent: usize,
    pub entries_updated: usize,
}

/// FIFO of prepared uploads with at most one request in flight.
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: VecDeque<UploadRequest>,
    in_flight: bool,
    total: usize,
    entries_updated: usize,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<RecordPage>) -> Self {
        let mut queue = Self::new();
        for page in pages {
            queue.enqueue(page.into());
        }
        queue
    }

    pub fn enqueue(&mut self, request: UploadRequest) {
        self.pending.push_back(request);
        self.total += 1;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn has_requests_pending(&self) -> bool {
        !self.pending.is_empty() || self.in_flight
    }

    pub fn entries_updated(&self) -> usize {
        self.entries_updated
    }

    /// Sends queued uploads one after another until the queue is empty.
    ///
    /// The first failure stops the pump: the remaining uploads are dropped
    /// and the error is returned wrapped with the chunk position.
    pub async fn pump<A: GridlyApi + ?Sized>(
        &mut self,
        api: &A,
        events: &EventSink,
    ) -> Result<UploadSummary> {
        let total = self.total;
        let mut chunks_sent = 0;

        while let Some(request) = self.pending.pop_front() {
            self.in_flight = true;
            events.emit(SyncEvent::PhaseChanged(SyncPhase::Uploading {
                chunk: request.chunk,
                total,
            }));
            tracing::info!(
                chunk_index = request.chunk,
                entries = request.rows.len(),
                "Sending export request"
            );

            let result = api.upload_records(&request.rows).await;
            self.in_flight = false;

            match result {
                Ok(updated) => {
                    self.entries_updated += updated;
                    chunks_sent += 1;
                    events.emit(SyncEvent::ChunkUploaded {
                        chunk: request.chunk,
                        total,
                        updated,
                    });
                }
                Err(e) => {
                    let dropped = self.pending.len();
                    self.pending.clear();
                    tracing::error!(
                        chunk_index = request.chunk,
                        dropped_chunks = dropped,
                        error = %e,
                        "Export request failed, stopping upload"
                    );
                    return Err(GridlySyncError::UploadFailed {
                        chunk: request.chunk + 1,
                        total,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(UploadSummary {
            chunks_sent,
            entries_updated: self.entries_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every upload and fails the n-th one when asked to.
    struct ScriptedApi {
        fail_on: Option<usize>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedApi {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                fail_on,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GridlyApi for ScriptedApi {
        async fn upload_records(&self, rows: &[RecordRow]) -> Result<usize> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(rows.iter().map(|r| r.id.clone()).collect());
            if Some(calls.len() - 1) == self.fail_on {
                return Err(GridlySyncError::HttpStatusError {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(rows.len())
        }

        async fn export_csv(&self) -> Result<String> {
            unreachable!("upload queue never exports")
        }

        async fn delete_records(&self, _ids: &[String]) -> Result<()> {
            unreachable!("upload queue never deletes")
        }
    }

    fn request(chunk: usize, ids: &[&str]) -> UploadRequest {
        UploadRequest {
            chunk,
            rows: ids
                .iter()
                .map(|id| RecordRow {
                    id: id.to_string(),
                    path: None,
                    cells: Vec::new(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn drains_in_fifo_order_and_counts_updates() {
        let api = ScriptedApi::new(None);
        let mut queue = UploadQueue::new();
        queue.enqueue(request(0, &["a", "b"]));
        queue.enqueue(request(1, &["c"]));
        assert!(queue.has_requests_pending());

        let summary = queue.pump(&api, &EventSink::default()).await.unwrap();
        assert_eq!(summary, UploadSummary { chunks_sent: 2, entries_updated: 3 });
        assert!(!queue.has_requests_pending());
        assert_eq!(*api.calls.lock().unwrap(), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[tokio::test]
    async fn failure_stops_the_pump_and_drops_the_rest() {
        let api = ScriptedApi::new(Some(1));
        let mut queue = UploadQueue::new();
        for i in 0..4 {
            queue.enqueue(request(i, &["x"]));
        }

        let err = queue.pump(&api, &EventSink::default()).await.unwrap_err();
        match err {
            GridlySyncError::UploadFailed { chunk, total, source } => {
                assert_eq!((chunk, total), (2, 4));
                assert_eq!(source.status(), Some(500));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls.lock().unwrap().len(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.entries_updated(), 1);
    }

    #[tokio::test]
    async fn emits_phase_and_chunk_events() {
        let api = ScriptedApi::new(None);
        let (sink, mut rx) = EventSink::channel();
        let mut queue = UploadQueue::new();
        queue.enqueue(request(0, &["a"]));

        queue.pump(&api, &sink).await.unwrap();
        assert_eq!(
            rx.recv().await,
            Some(SyncEvent::PhaseChanged(SyncPhase::Uploading { chunk: 0, total: 1 }))
        );
        assert_eq!(
            rx.recv().await,
            Some(SyncEvent::ChunkUploaded { chunk: 0, total: 1, updated: 1 })
        );
    }
}
