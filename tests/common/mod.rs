#![allow(dead_code)]

use async_trait::async_trait;
use gridly_sync::{GridlyApi, GridlySyncError, RecordRow, Result};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory stand-in for a Gridly view.
#[derive(Default)]
pub struct FakeGridly {
    pub csv: String,
    pub fail_upload_at: Option<usize>,
    pub fail_csv: bool,
    /// Batches containing this id answer with a 500.
    pub fail_delete_containing: Option<String>,
    /// Batches of exactly this size answer immediately, others wait a little.
    pub fast_batch_len: Option<usize>,
    pub uploads: Mutex<Vec<Vec<RecordRow>>>,
    pub exports: Mutex<usize>,
    pub deletes: Mutex<Vec<Vec<String>>>,
}

impl FakeGridly {
    pub fn with_csv(csv: impl Into<String>) -> Self {
        Self {
            csv: csv.into(),
            ..Self::default()
        }
    }

    pub fn uploaded_ids(&self) -> Vec<Vec<String>> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|rows| rows.iter().map(|r| r.id.clone()).collect())
            .collect()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.deletes.lock().unwrap().iter().flatten().cloned().collect();
        ids.sort();
        ids
    }

    pub fn export_calls(&self) -> usize {
        *self.exports.lock().unwrap()
    }
}

#[async_trait]
impl GridlyApi for FakeGridly {
    async fn upload_records(&self, rows: &[RecordRow]) -> Result<usize> {
        let call = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(rows.to_vec());
            uploads.len() - 1
        };
        if self.fail_upload_at == Some(call) {
            return Err(GridlySyncError::HttpStatusError {
                status: 400,
                body: "invalid column".to_string(),
            });
        }
        Ok(rows.len())
    }

    async fn export_csv(&self) -> Result<String> {
        *self.exports.lock().unwrap() += 1;
        if self.fail_csv {
            return Err(GridlySyncError::HttpStatusError {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.csv.clone())
    }

    async fn delete_records(&self, ids: &[String]) -> Result<()> {
        if self.fast_batch_len != Some(ids.len()) {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        if let Some(poison) = &self.fail_delete_containing {
            if ids.contains(poison) {
                return Err(GridlySyncError::HttpStatusError {
                    status: 500,
                    body: "delete failed".to_string(),
                });
            }
        }
        self.deletes.lock().unwrap().push(ids.to_vec());
        Ok(())
    }
}
