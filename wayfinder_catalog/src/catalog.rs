use async_trait::async_trait;
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;
use wayfinder_core::{CatalogSource, Service};

const BUILTIN_SERVICES: &str = include_str!("../data/services.json");

/// An immutable catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    services: Vec<Service>,
}

impl StaticCatalog {
    /// Services are normalized on the way in; scan order is preserved.
    #[must_use]
    pub fn from_services(services: Vec<Service>) -> Self {
        Self {
            services: services.into_iter().map(Service::normalized).collect(),
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let services: Vec<Service> = serde_json::from_str(json)?;
        Ok(Self::from_services(services))
    }

    /// The six demo services the directory site ships with.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_SERVICES)
    }

    pub async fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow::anyhow!("Failed to read catalog from {}: {e}", path.display())
        })?;
        let catalog = Self::from_json(&content)?;
        info!(
            "Loaded {} services from {}",
            catalog.services.len(),
            path.display()
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Featured services first, then by name.
    #[must_use]
    pub fn list_sorted(&self) -> Vec<Service> {
        let mut services = self.services.clone();
        services.sort_by(|a, b| match b.featured.cmp(&a.featured) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        });
        services
    }

    /// Accepts `plumbing` as well as `/plumbing`.
    #[must_use]
    pub fn find_by_page_url(&self, url: &str) -> Option<&Service> {
        let wanted = format!("/{}", url.trim().trim_start_matches('/'));
        self.services.iter().find(|s| s.page_url == wanted)
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn list_services(&self) -> anyhow::Result<Vec<Service>> {
        Ok(self.services.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn builtin_catalog_loads_and_is_lowercase() {
        let catalog = StaticCatalog::builtin().expect("builtin catalog should parse");
        assert_eq!(catalog.len(), 6);
        for service in catalog.services() {
            assert!(!service.keywords.is_empty(), "{} has no keywords", service.name);
            assert!(service.keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn sorted_listing_puts_featured_first() {
        let catalog = StaticCatalog::builtin().expect("builtin catalog should parse");
        let names: Vec<String> = catalog.list_sorted().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Electrical Services",
                "Plumbing Services",
                "Tutoring Services",
                "HVAC Services",
                "House Cleaning",
                "Landscaping Services",
            ]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn finds_by_page_url_with_or_without_slash() {
        let catalog = StaticCatalog::builtin().expect("builtin catalog should parse");
        assert_eq!(
            catalog.find_by_page_url("plumbing").map(|s| s.id.as_str()),
            Some("1")
        );
        assert_eq!(
            catalog.find_by_page_url("/hvac").map(|s| s.name.as_str()),
            Some("HVAC Services")
        );
        assert!(catalog.find_by_page_url("/missing").is_none());
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let catalog = StaticCatalog::default();
        let services = catalog.list_services().await;
        assert!(services.is_ok_and(|s| s.is_empty()));
    }
}
