//! HTTP client for Kibana's saved-object import API.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

use crate::error::DashboardError;
use crate::traits::DashboardSink;

/// Imports saved objects into Kibana (or OpenSearch Dashboards) through the
/// NDJSON `_import` endpoint.
pub struct KibanaSink {
    client: reqwest::Client,
    host: String,
    username: String,
    password: String,
}

impl KibanaSink {
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn import_url(&self) -> String {
        format!("{}/api/saved_objects/_import?overwrite=true", self.host)
    }

    /// Serialize saved objects as NDJSON, one object per line.
    fn ndjson(objects: &[Value]) -> String {
        let mut body = String::new();
        for object in objects {
            body.push_str(&object.to_string());
            body.push('\n');
        }
        body
    }

    /// One import attempt. OpenSearch Dashboards with the security plugin
    /// wants the `securitytenant` header; stock Kibana rejects unknown
    /// headers in some deployments, so callers retry without it.
    async fn try_import(
        &self,
        objects: &[Value],
        with_tenant_header: bool,
    ) -> Result<usize, DashboardError> {
        let url = self.import_url();
        let part = Part::text(Self::ndjson(objects))
            .file_name("objects.ndjson")
            .mime_str("application/ndjson")?;
        let form = Form::new().part("file", part);

        let mut request = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("kbn-xsrf", "true")
            .multipart(form);
        if with_tenant_header {
            request = request.header("securitytenant", "global");
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DashboardError::UnexpectedStatus {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let parsed: Value =
            serde_json::from_str(&body).map_err(|_| DashboardError::ImportRejected(body.clone()))?;
        if parsed["success"] == Value::Bool(false) {
            return Err(DashboardError::ImportRejected(
                parsed["errors"].to_string(),
            ));
        }
        let count = parsed["successCount"].as_u64().unwrap_or(0) as usize;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl DashboardSink for KibanaSink {
    async fn import_objects(&self, objects: &[Value]) -> Result<usize, DashboardError> {
        match self.try_import(objects, true).await {
            Ok(count) => Ok(count),
            Err(first) => {
                tracing::warn!(error = %first, "saved-object import failed, retrying without tenant header");
                self.try_import(objects, false).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_trailing_slash_trimmed() {
        let sink = KibanaSink::new("http://localhost:5601/", "admin", "admin").unwrap();
        assert_eq!(
            sink.import_url(),
            "http://localhost:5601/api/saved_objects/_import?overwrite=true"
        );
    }

    #[test]
    fn test_ndjson_one_line_per_object() {
        let objects = vec![json!({"id": "a"}), json!({"id": "b"})];
        let body = KibanaSink::ndjson(&objects);
        assert_eq!(body.lines().count(), 2);
        assert!(body.ends_with('\n'));
    }
}
