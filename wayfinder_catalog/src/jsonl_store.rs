use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;
use wayfinder_core::{ContactQuery, ContactRecord, ContactStatus, ContactStore, Page};

use crate::select_page;

/// Contact store backed by a JSON-lines file, one record per line.
pub struct JsonlContactStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlContactStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unparseable lines are skipped with a warning.
    async fn read_all(&self) -> anyhow::Result<Vec<ContactRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ContactRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping malformed contact at {}:{}: {e}",
                    self.path.display(),
                    index + 1
                ),
            }
        }
        Ok(records)
    }

    async fn ensure_parent(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for JsonlContactStore {
    async fn save_contact(&self, record: &ContactRecord) -> anyhow::Result<Uuid> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        self.ensure_parent().await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended contact {} to {}", record.id, self.path.display());
        Ok(record.id)
    }

    async fn list_contacts(&self, query: &ContactQuery) -> anyhow::Result<Page<ContactRecord>> {
        let records = self.read_all().await?;
        Ok(select_page(records, query))
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ContactStatus,
    ) -> anyhow::Result<Option<ContactRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;

        let Some(record) = records.iter_mut().find(|r| r.id == *id) else {
            return Ok(None);
        };
        record.set_status(status);
        let updated = record.clone();

        let mut content = String::new();
        for record in &records {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }
        let tmp = self.path.with_extension("jsonl.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::{ContactField, ExtractedContact};

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join("wayfinder-tests")
            .join(format!("{}.jsonl", Uuid::now_v7()))
    }

    fn record(email: &str) -> ContactRecord {
        let mut fields = ExtractedContact::default();
        fields.set(ContactField::Email, email);
        ContactRecord::new(fields, format!("email {email}"))
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn round_trips_through_the_file() {
        let store = JsonlContactStore::new(temp_path());
        let contact = record("a@b.io");
        let id = store.save_contact(&contact).await.expect("save works");
        assert_eq!(id, contact.id);

        let page = store
            .list_contacts(&ContactQuery::default())
            .await
            .expect("listing works");
        assert_eq!(page.items, vec![contact]);

        let _ = tokio::fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn missing_file_lists_empty() {
        let store = JsonlContactStore::new(temp_path());
        let page = store
            .list_contacts(&ContactQuery::default())
            .await
            .expect("listing works");
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn status_update_rewrites_file_and_skips_garbage() {
        let path = temp_path();
        let store = JsonlContactStore::new(path.clone());
        let contact = record("a@b.io");
        store.save_contact(&contact).await.expect("save works");

        let mut raw = tokio::fs::read_to_string(&path).await.expect("file exists");
        raw.push_str("not json\n");
        tokio::fs::write(&path, raw).await.expect("write works");

        let updated = store
            .update_status(&contact.id, ContactStatus::Contacted)
            .await
            .expect("update works");
        assert_eq!(updated.map(|r| r.status), Some(ContactStatus::Contacted));

        let page = store
            .list_contacts(&ContactQuery::default())
            .await
            .expect("listing works");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].status, ContactStatus::Contacted);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
