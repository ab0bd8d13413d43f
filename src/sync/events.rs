use std::fmt;
use tokio::sync::mpsc;

/// Where an export run currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Uploading { chunk: usize, total: usize },
    Done,
    FetchingCsv,
    Parsing,
    Reconciling,
    Deleting { batches: usize },
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::Uploading { chunk, total } => write!(f, "uploading {}/{}", chunk + 1, total),
            SyncPhase::Done => write!(f, "done"),
            SyncPhase::FetchingCsv => write!(f, "fetching csv"),
            SyncPhase::Parsing => write!(f, "parsing"),
            SyncPhase::Reconciling => write!(f, "reconciling"),
            SyncPhase::Deleting { batches } => write!(f, "deleting ({} batches)", batches),
            SyncPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Progress and completion notifications for whatever drives a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    PhaseChanged(SyncPhase),
    ChunkUploaded {
        chunk: usize,
        total: usize,
        updated: usize,
    },
    UploadFinished {
        success: bool,
        entries_updated: usize,
        error: Option<String>,
    },
    StaleRecordsFound {
        count: usize,
    },
    BatchDeleted {
        batch: usize,
        success: bool,
        error: Option<String>,
    },
    DeleteFinished {
        success: bool,
        entries_deleted: usize,
        error: Option<String>,
    },
}

/// Optional event channel; sending never blocks and a dropped receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<SyncEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: SyncEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_display_is_one_based_for_chunks() {
        assert_eq!(SyncPhase::Uploading { chunk: 0, total: 3 }.to_string(), "uploading 1/3");
        assert_eq!(SyncPhase::Deleting { batches: 2 }.to_string(), "deleting (2 batches)");
    }

    #[tokio::test]
    async fn sink_delivers_and_tolerates_closed_receivers() {
        let (sink, mut rx) = EventSink::channel();
        sink.emit(SyncEvent::StaleRecordsFound { count: 2 });
        assert_eq!(rx.recv().await, Some(SyncEvent::StaleRecordsFound { count: 2 }));

        drop(rx);
        sink.emit(SyncEvent::PhaseChanged(SyncPhase::Idle));
        EventSink::default().emit(SyncEvent::PhaseChanged(SyncPhase::Done));
    }
}
