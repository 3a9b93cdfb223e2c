//! HTTP implementation of the backend contract.
//!
//! `HttpBackend` talks to the system of record over its REST API. Every
//! method issues exactly one request; failures are mapped into
//! [`ShambaError`] variants with the collaborator-provided message when the
//! error body carries one. The client never retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use shamba_core::ShambaError;
use shamba_core::backend::{BackendApi, DocumentUpload, SensorAck, SensorReadings};
use shamba_core::error::Result;
use shamba_core::registration::RegistrationRequest;
use shamba_core::status::StatusSnapshot;

use crate::config::BackendConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-based backend client.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    farmer_id: u64,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// Error body shape shared by every backend route.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpBackend {
    /// Creates a client for the configured backend.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-success response into a typed backend error.
    ///
    /// The backend reports failures as `{"message": "..."}`; when the body
    /// does not parse, the HTTP status line is used instead.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ShambaError::backend(extract_backend_message(status, &body)))
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ShambaError::Serialization {
                format: "JSON".to_string(),
                message: e.to_string(),
            })
    }
}

fn transport(err: reqwest::Error) -> ShambaError {
    ShambaError::transport(err.to_string())
}

fn extract_backend_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| format!("backend returned {}", status))
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn fetch_status(
        &self,
        farmer_id: u64,
        season_id: Option<u64>,
    ) -> Result<StatusSnapshot> {
        let url = self.endpoint(&format!("/api/farmer/{}/status", farmer_id));
        tracing::debug!(%url, "GET status");
        let mut request = self.client.get(&url).timeout(REQUEST_TIMEOUT);
        if let Some(season_id) = season_id {
            request = request.query(&[("season_id", season_id)]);
        }
        let response = request.send().await.map_err(transport)?;
        Self::parse(Self::check(response).await?).await
    }

    async fn register(&self, registration: &RegistrationRequest) -> Result<u64> {
        let url = self.endpoint("/api/farmer/register");
        tracing::debug!(%url, "POST registration");
        let response = self
            .client
            .post(&url)
            .json(registration)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        let parsed: RegisterResponse = Self::parse(Self::check(response).await?).await?;
        Ok(parsed.farmer_id)
    }

    async fn upload_document(&self, farmer_id: u64, upload: &DocumentUpload) -> Result<String> {
        let url = self.endpoint(&format!("/api/farmer/{}/upload", farmer_id));
        tracing::debug!(%url, stage_number = upload.stage_number, "POST upload");
        let response = self
            .client
            .post(&url)
            .json(upload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        let parsed: MessageResponse = Self::parse(Self::check(response).await?).await?;
        Ok(parsed.message)
    }

    async fn ingest_sensor(&self, farmer_id: u64, readings: &SensorReadings) -> Result<SensorAck> {
        let url = self.endpoint("/api/iot/ingest");
        tracing::debug!(%url, farmer_id, "POST sensor readings");
        let response = self
            .client
            .post(&url)
            .query(&[("farmer_id", farmer_id)])
            .json(readings)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        Self::parse(Self::check(response).await?).await
    }

    async fn renew_season(&self, farmer_id: u64) -> Result<String> {
        let url = self.endpoint(&format!("/api/farmer/{}/renew", farmer_id));
        tracing::debug!(%url, "POST renew");
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        let parsed: MessageResponse = Self::parse(Self::check(response).await?).await?;
        Ok(parsed.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_extracted_from_error_body() {
        let message = extract_backend_message(
            StatusCode::NOT_FOUND,
            r#"{"message": "Farmer not found"}"#,
        );
        assert_eq!(message, "Farmer not found");
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let message = extract_backend_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(message.contains("502"));
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let backend = HttpBackend::new(BackendConfig::new("http://example.com/"));
        assert_eq!(
            backend.endpoint("/api/farmer/7/status"),
            "http://example.com/api/farmer/7/status"
        );
    }
}
