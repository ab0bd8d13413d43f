use crate::gridly::GridlyApi;
use crate::records::RecordRow;
use crate::utils::{ApiConfig, GridlySyncError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;

pub struct GridlyClient {
    client: Client,
    base_url: String,
    api_key: String,
    view_id: String,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    ids: &'a [String],
}

impl GridlyClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            view_id: config.view_id.clone(),
        })
    }

    pub fn records_url(&self) -> String {
        format!("{}/v1/views/{}/records", self.base_url, self.view_id)
    }

    pub fn export_url(&self) -> String {
        format!("{}/v1/views/{}/export", self.base_url, self.view_id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("ApiKey {}", self.api_key))
    }

    async fn check_status(response: Response, accepted: &[StatusCode]) -> Result<Response> {
        let status = response.status();
        if accepted.contains(&status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GridlySyncError::HttpStatusError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl GridlyApi for GridlyClient {
    async fn upload_records(&self, rows: &[RecordRow]) -> Result<usize> {
        let response = self
            .request(Method::POST, self.records_url())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(rows)
            .send()
            .await?;

        let response =
            Self::check_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;

        let body = response.text().await?;
        let updated = match serde_json::from_str::<Vec<serde_json::Value>>(&body) {
            Ok(records) => records.len(),
            Err(e) => {
                tracing::warn!(error = %e, "Upload response was not a JSON array");
                0
            }
        };
        Ok(updated)
    }

    async fn export_csv(&self) -> Result<String> {
        let response = self
            .request(Method::GET, self.export_url())
            .header("Accept", "text/csv")
            .send()
            .await?;

        let response = Self::check_status(response, &[StatusCode::OK]).await?;
        Ok(response.text().await?)
    }

    async fn delete_records(&self, ids: &[String]) -> Result<()> {
        let response = self
            .request(Method::DELETE, self.records_url())
            .header("Content-Type", "application/json")
            .json(&DeleteRequest { ids })
            .send()
            .await?;

        Self::check_status(response, &[StatusCode::NO_CONTENT]).await?;
        Ok(())
    }
}
