use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use wayfinder_core::{CatalogSource, Service};

use crate::StaticCatalog;

/// Catalog read from a JSON file on first use.
///
/// A failed read is returned to the caller and retried on the next call;
/// the first successful read is kept for the life of the catalog.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    loaded: OnceCell<StaticCatalog>,
}

impl FileCatalog {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            loaded: OnceCell::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn list_services(&self) -> anyhow::Result<Vec<Service>> {
        let catalog = self
            .loaded
            .get_or_try_init(|| StaticCatalog::from_path(&self.path))
            .await?;
        Ok(catalog.services().to_vec())
    }
}
