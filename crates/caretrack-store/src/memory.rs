use tokio::sync::RwLock;

use caretrack_core::models::event::ClinicalEvent;

use crate::error::StoreError;
use crate::source::{EventSource, in_range};

/// Events held in memory, for hosts that already have them loaded and for
/// tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<ClinicalEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<ClinicalEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    pub async fn insert(&self, event: ClinicalEvent) {
        self.events.write().await.push(event);
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl EventSource for MemoryStore {
    async fn fetch_events(
        &self,
        patient_id: &str,
        from: jiff::Timestamp,
        to: jiff::Timestamp,
    ) -> Result<Vec<ClinicalEvent>, StoreError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.patient_id == patient_id && in_range(e, from, to))
            .cloned()
            .collect())
    }
}
