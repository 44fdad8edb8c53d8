//! # HTTP Record Service
//!
//! Talks to the record store as JSON over HTTP:
//!
//! - `GET    {server}/api/records?page={page}&limit={size}`
//! - `POST   {server}/api/records` with the full record
//! - `DELETE {server}/api/records/{resource_kind}/{id}`

use super::record_service::RecordService;
use super::wire::{check_page_args, decode_stored_record, ListResponse};
use super::ServiceError;
use crate::dashboard::models::{Page, Record, RecordId};
use anyhow::Result;
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// Upper bound for a single store request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const RECORDS_PATH: &str = "api/records";

/// [`RecordService`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpRecordService {
    client: reqwest::Client,
    records_url: Url,
}

impl HttpRecordService {
    /// Create a service for the store at `server`, e.g. `http://localhost:5000`
    pub fn new(server: &str) -> Result<Self> {
        tracing::debug!("Creating HttpRecordService for '{}'", server);

        // Url::join drops the last segment unless the base ends with '/'
        let mut base = server.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let records_url = Url::parse(&base)
            .and_then(|url| url.join(RECORDS_PATH))
            .map_err(|e| anyhow::anyhow!("Invalid server URL '{server}': {e}"))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        tracing::info!("Record store endpoint: {}", records_url);
        Ok(Self {
            client,
            records_url,
        })
    }

    pub fn records_url(&self) -> &Url {
        &self.records_url
    }

    /// Per-record delete endpoint: `{records_url}/{resource_kind}/{id}`
    pub fn delete_url(&self, resource_kind: &str, id: RecordId) -> Result<Url, ServiceError> {
        let mut url = self.records_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::validation("server URL cannot carry a path"))?
            .push(resource_kind)
            .push(&id.to_string());
        Ok(url)
    }
}

impl RecordService for HttpRecordService {
    async fn list(&self, page_index: usize, page_size: usize) -> Result<Page, ServiceError> {
        check_page_args(page_index, page_size)?;
        tracing::debug!("GET {} page={} limit={}", self.records_url, page_index, page_size);

        let response = self
            .client
            .get(self.records_url.clone())
            .query(&[("page", page_index), ("limit", page_size)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("List request for page {} failed with {}", page_index, status);
            return Err(ServiceError::unexpected_status(status));
        }

        let body = response.text().await?;
        let page = ListResponse::decode(&body)?.into_page(page_index, page_size);
        tracing::debug!(
            "Received page {} with {} records (total {})",
            page.page_index,
            page.items.len(),
            page.total_count
        );
        Ok(page)
    }

    async fn upsert(&self, record: Record) -> Result<Record, ServiceError> {
        tracing::debug!("POST {} id={}", self.records_url, record.id);

        let response = self
            .client
            .post(self.records_url.clone())
            .json(&record)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {}
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let reason = response.text().await.unwrap_or_default();
                tracing::warn!("Store rejected record {}: {}", record.id, reason);
                let message = if reason.trim().is_empty() {
                    format!("store rejected the record (HTTP {})", status.as_u16())
                } else {
                    reason
                };
                return Err(ServiceError::validation(message));
            }
            other => return Err(ServiceError::unexpected_status(other)),
        }

        let body = response.text().await?;
        let stored = decode_stored_record(&body)?;
        tracing::info!("Stored record {}", stored.id);
        Ok(stored)
    }

    async fn remove(&self, resource_kind: &str, id: RecordId) -> Result<(), ServiceError> {
        let url = self.delete_url(resource_kind, id)?;
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::info!("Removed {}/{}", resource_kind, id);
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ServiceError::NotFound {
                resource_kind: resource_kind.to_string(),
                id,
            })
        } else {
            Err(ServiceError::unexpected_status(status))
        }
    }
}
