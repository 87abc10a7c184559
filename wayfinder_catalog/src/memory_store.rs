use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use wayfinder_core::{ContactQuery, ContactRecord, ContactStatus, ContactStore, Page};

use crate::select_page;

/// Process-local contact store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    records: RwLock<Vec<ContactRecord>>,
}

impl InMemoryContactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, id: &Uuid) -> Option<ContactRecord> {
        self.records.read().await.iter().find(|r| r.id == *id).cloned()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn save_contact(&self, record: &ContactRecord) -> anyhow::Result<Uuid> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            anyhow::bail!("Contact {} already stored", record.id);
        }
        records.push(record.clone());
        debug!("Stored contact {} ({} total)", record.id, records.len());
        Ok(record.id)
    }

    async fn list_contacts(&self, query: &ContactQuery) -> anyhow::Result<Page<ContactRecord>> {
        let records = self.records.read().await.clone();
        Ok(select_page(records, query))
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ContactStatus,
    ) -> anyhow::Result<Option<ContactRecord>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == *id).map(|record| {
            record.set_status(status);
            record.clone()
        }))
    }
}
