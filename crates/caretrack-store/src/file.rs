use std::path::{Path, PathBuf};

use caretrack_core::models::event::ClinicalEvent;

use crate::document::AssessmentDocument;
use crate::error::StoreError;
use crate::source::{EventSource, in_range};

/// Reads a JSON array of stored assessment documents, such as a document
/// store export. The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The export's top level must be an array; each element is checked on
    /// its own so one bad document cannot hide the rest.
    async fn read_documents(&self) -> Result<Vec<serde_json::Value>, StoreError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                StoreError::Io(e)
            }
        })?;
        let documents: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;
        tracing::info!(
            path = %self.path.display(),
            documents = documents.len(),
            "loaded assessment documents"
        );
        Ok(documents)
    }
}

impl EventSource for JsonFileStore {
    async fn fetch_events(
        &self,
        patient_id: &str,
        from: jiff::Timestamp,
        to: jiff::Timestamp,
    ) -> Result<Vec<ClinicalEvent>, StoreError> {
        let mut events = Vec::new();
        for (index, raw) in self.read_documents().await?.into_iter().enumerate() {
            let document: AssessmentDocument = match serde_json::from_value(raw) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable stored document");
                    continue;
                }
            };
            if document.client_id != patient_id {
                continue;
            }
            match document.into_event() {
                Ok(event) if in_range(&event, from, to) => events.push(event),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "skipping stored document"),
            }
        }
        Ok(events)
    }
}
