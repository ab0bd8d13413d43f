pub mod client;

pub use client::GridlyClient;

use crate::records::RecordRow;
use crate::utils::Result;
use async_trait::async_trait;

/// The three view endpoints the sync pipeline talks to.
#[async_trait]
pub trait GridlyApi: Send + Sync {
    /// Upserts rows and returns how many records the view reports as updated.
    async fn upload_records(&self, rows: &[RecordRow]) -> Result<usize>;

    async fn export_csv(&self) -> Result<String>;

    /// Deletes records by id. Succeeds only on `204 No Content`.
    async fn delete_records(&self, ids: &[String]) -> Result<()>;
}
