//! Forwarding of uploaded records to the ingestion pipeline (NiFi).

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::DataRow;

/// Value of `source` on every forwarded batch
pub const UPLOAD_SOURCE: &str = "excel_addin";

/// Upload settings chosen in the task pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestConfiguration {
    pub skip_duplicate_check: bool,
    /// Passed through as the client sent it
    pub delivery_date: Value,
}

/// Body posted to the ingestion endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestBatch {
    pub source: &'static str,
    pub upload_timestamp: String,
    pub data_type: String,
    pub configuration: IngestConfiguration,
    pub records: Vec<DataRow>,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("NiFi processing failed with status {status}")]
    Rejected { status: u16, details: Option<String> },

    #[error("Upload timeout - NiFi endpoint did not respond in time")]
    Timeout,

    #[error("Unable to connect to NiFi endpoint")]
    Unreachable,
}

/// Destination of accepted uploads
pub trait UploadSink: Send + Sync {
    /// Deliver a batch; returns the endpoint's success status code
    fn forward(&self, batch: &IngestBatch) -> Result<u16, SinkError>;
}

/// Accepts every batch and keeps it for inspection.
#[derive(Debug, Default)]
pub struct MockUploadSink {
    forwarded: Mutex<Vec<IngestBatch>>,
}

impl MockUploadSink {
    /// Batches received so far, oldest first
    pub fn forwarded(&self) -> Vec<IngestBatch> {
        self.forwarded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UploadSink for MockUploadSink {
    fn forward(&self, batch: &IngestBatch) -> Result<u16, SinkError> {
        self.forwarded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch.clone());
        Ok(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch() -> IngestBatch {
        IngestBatch {
            source: UPLOAD_SOURCE,
            upload_timestamp: "2024-01-01T09:30:00.000000".into(),
            data_type: "Windmill Statistics".into(),
            configuration: IngestConfiguration {
                skip_duplicate_check: true,
                delivery_date: Value::Null,
            },
            records: vec![],
            record_count: 0,
        }
    }

    #[test]
    fn test_mock_sink_keeps_batches() {
        let sink = MockUploadSink::default();
        assert_eq!(sink.forward(&batch()), Ok(200));
        assert_eq!(sink.forwarded(), vec![batch()]);
    }

    #[test]
    fn test_batch_wire_shape() {
        let json = serde_json::to_value(batch()).unwrap();
        assert_eq!(json["source"], "excel_addin");
        assert_eq!(
            json["configuration"],
            json!({"skip_duplicate_check": true, "delivery_date": null})
        );
        assert_eq!(json["record_count"], 0);
    }
}
