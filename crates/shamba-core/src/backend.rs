//! Backend collaborator seam.
//!
//! Defines the contract the session controller depends on, decoupling the
//! dialogue logic from the concrete HTTP client (`shamba-interaction`) and
//! allowing tests to substitute a mock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registration::RegistrationRequest;
use crate::status::StatusSnapshot;

/// A document submission for one loan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub stage_number: u32,
    pub file_type: String,
    pub file_name: String,
}

impl DocumentUpload {
    /// Builds an upload for `stage_number` from a raw file name.
    ///
    /// The file type is taken from the name's extension, falling back to
    /// `pdf` when the name has none.
    pub fn from_file_name(stage_number: u32, file_name: &str) -> Self {
        let file_type = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| "pdf".to_string());
        Self {
            stage_number,
            file_type,
            file_name: file_name.to_string(),
        }
    }
}

/// A set of named numeric sensor readings.
///
/// Keys are ordered so serialized payloads are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorReadings(pub BTreeMap<String, f64>);

impl SensorReadings {
    /// Parses raw `key:value` pairs split on commas.
    ///
    /// Pairs with a missing key, a missing value, or a non-numeric value are
    /// silently dropped; `moisture:12,badpair` parses to `{moisture: 12}`.
    pub fn parse(input: &str) -> Self {
        let mut readings = BTreeMap::new();
        for part in input.split(',') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if let Ok(value) = value.trim().parse::<f64>() {
                readings.insert(key.to_string(), value);
            }
        }
        Self(readings)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Acknowledgement returned by the sensor-ingest operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorAck {
    #[serde(default)]
    pub drought_flag: bool,
    #[serde(default)]
    pub message: String,
}

/// The backend system of record, seen from the session engine.
///
/// Every method maps to exactly one request/response call. Implementations
/// must not retry on their own; the engine reports failures and lets the
/// user reissue the command.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetches the full status snapshot for a farmer.
    ///
    /// # Arguments
    ///
    /// * `farmer_id` - The farmer to look up
    /// * `season_id` - Optional past-season reference; `None` means the
    ///   current season
    async fn fetch_status(
        &self,
        farmer_id: u64,
        season_id: Option<u64>,
    ) -> Result<StatusSnapshot>;

    /// Submits a completed registration form.
    ///
    /// # Returns
    ///
    /// The newly assigned farmer identifier.
    async fn register(&self, request: &RegistrationRequest) -> Result<u64>;

    /// Submits a stage document.
    ///
    /// # Returns
    ///
    /// The backend acknowledgement message.
    async fn upload_document(&self, farmer_id: u64, upload: &DocumentUpload) -> Result<String>;

    /// Ingests a set of sensor readings.
    async fn ingest_sensor(&self, farmer_id: u64, readings: &SensorReadings) -> Result<SensorAck>;

    /// Starts a new season for an existing farmer.
    ///
    /// # Returns
    ///
    /// The backend acknowledgement message.
    async fn renew_season(&self, farmer_id: u64) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_parse_well_formed_pairs() {
        let readings = SensorReadings::parse("moisture:12, temp:30");
        assert_eq!(readings.0.get("moisture"), Some(&12.0));
        assert_eq!(readings.0.get("temp"), Some(&30.0));
        assert_eq!(readings.0.len(), 2);
    }

    #[test]
    fn test_sensor_parse_drops_malformed_pairs() {
        let readings = SensorReadings::parse("moisture:12,badpair");
        assert_eq!(readings.0.get("moisture"), Some(&12.0));
        assert_eq!(readings.0.len(), 1);

        assert!(SensorReadings::parse("nope").is_empty());
        assert!(SensorReadings::parse(":5,temp:warm").is_empty());
    }

    #[test]
    fn test_upload_file_type_from_extension() {
        let upload = DocumentUpload::from_file_name(2, "invoice.JPG");
        assert_eq!(upload.file_type, "jpg");
        assert_eq!(upload.file_name, "invoice.JPG");

        let bare = DocumentUpload::from_file_name(1, "soil-test");
        assert_eq!(bare.file_type, "pdf");
    }
}
