//! Reqwest-based Elasticsearch sink implementation.

use crate::error::SinkError;
use crate::traits::{EnsureIndex, IngestSink};
use obs_datagen::Record;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Number of records per `_bulk` request.
pub const BULK_CHUNK_SIZE: usize = 1000;

/// Elasticsearch ingestion client with basic-auth credentials.
pub struct ElasticsearchSink {
    client: Client,
    host: String,
    username: String,
    password: String,
}

impl ElasticsearchSink {
    /// Create a sink for the given endpoint, e.g. `http://localhost:9200`.
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }
}

#[async_trait::async_trait]
impl IngestSink for ElasticsearchSink {
    async fn ensure_index(
        &self,
        name: &str,
        mapping: &Value,
    ) -> Result<EnsureIndex, SinkError> {
        let url = self.url(name);
        tracing::debug!("Creating index '{name}' at {url}");

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&json!({"mappings": {"properties": mapping}}))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Created index '{name}'");
            return Ok(EnsureIndex::Created);
        }

        let body = response.text().await.unwrap_or_default();
        if status.as_u16() == 400 && body.contains("resource_already_exists_exception") {
            tracing::debug!("Index '{name}' already exists");
            return Ok(EnsureIndex::AlreadyExists);
        }

        Err(SinkError::UnexpectedStatus {
            status: status.as_u16(),
            url,
            body,
        })
    }

    async fn bulk_write(&self, name: &str, records: &[Record]) -> Result<(), SinkError> {
        let url = self.url("_bulk");

        for chunk in records.chunks(BULK_CHUNK_SIZE) {
            let mut body = String::new();
            for record in chunk {
                body.push_str(&serde_json::to_string(&json!({"index": {"_index": name}})).expect(
                    "in-memory JSON values always serialize",
                ));
                body.push('\n');
                body.push_str(
                    &serde_json::to_string(record).expect("in-memory JSON values always serialize"),
                );
                body.push('\n');
            }

            let response = self
                .client
                .post(&url)
                .basic_auth(&self.username, Some(&self.password))
                .header("content-type", "application/x-ndjson")
                .body(body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SinkError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                    body,
                });
            }

            let summary: Value =
                response
                    .json()
                    .await
                    .map_err(|e| SinkError::InvalidResponse {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

            if summary["errors"].as_bool().unwrap_or(false) {
                let items = summary["items"].as_array();
                let failures: Vec<&Value> = items
                    .map(|items| {
                        items
                            .iter()
                            .filter(|item| item["index"]["error"].is_object())
                            .collect()
                    })
                    .unwrap_or_default();
                let first_reason = failures
                    .first()
                    .and_then(|item| item["index"]["error"]["reason"].as_str())
                    .unwrap_or("unknown")
                    .to_string();
                return Err(SinkError::BulkItemFailures {
                    failed: failures.len(),
                    first_reason,
                });
            }

            tracing::debug!("Bulk-wrote {} records into '{name}'", chunk.len());
        }

        tracing::info!("Ingested {} records into index '{name}'", records.len());
        Ok(())
    }
}
