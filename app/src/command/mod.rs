//! One strategy per CLI subcommand, plus the wiring they share.

use std::sync::Arc;
use tracing::info;
use wayfinder_catalog::{FileCatalog, InMemoryContactStore, JsonlContactStore, StaticCatalog};
use wayfinder_config::{Config, ProviderKind};
use wayfinder_core::{CatalogSource, ContactStore, LLMProvider};
use wayfinder_intent::QueryRouter;
use wayfinder_providers::{GeminiProvider, OpenAiCompatibleProvider};

mod chat;
mod contacts;
mod info;
mod init;
mod route;
mod services;
mod version;

pub use chat::ChatStrategy;
pub use contacts::{ContactsAction, ContactsStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use route::{RouteInput, RouteStrategy};
pub use services::{ServicesInput, ServicesStrategy};
pub use version::VersionStrategy;

/// Contract for all command strategies.
///
/// Each strategy is a stateless unit struct with its own input type and is
/// dispatched statically from `main`.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Configured catalog, or the built-in seed catalog.
pub async fn load_catalog(config: &Config) -> anyhow::Result<StaticCatalog> {
    match &config.catalog.path {
        Some(path) => StaticCatalog::from_path(path).await,
        None => StaticCatalog::builtin(),
    }
}

/// Catalog for routing. A configured file is read on first use, so a bad
/// path surfaces as a degraded response rather than a startup failure.
pub fn catalog_source(config: &Config) -> anyhow::Result<Arc<dyn CatalogSource>> {
    match &config.catalog.path {
        Some(path) => {
            info!("Catalog is read from {}", path.display());
            Ok(Arc::new(FileCatalog::new(path.clone())))
        }
        None => {
            let catalog = StaticCatalog::builtin()?;
            info!("Built-in catalog has {} services", catalog.len());
            Ok(Arc::new(catalog))
        }
    }
}

/// Provider for the active section, if it has a usable key.
pub fn build_provider(config: &Config) -> Option<Arc<dyn LLMProvider>> {
    let settings = config.providers.active_provider();
    if !settings.has_usable_key() {
        return None;
    }

    let provider: Arc<dyn LLMProvider> = match config.providers.active {
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(settings.api_key.clone());
            if let Some(model) = &settings.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &settings.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Arc::new(provider)
        }
        ProviderKind::OpenAi => {
            let mut provider = OpenAiCompatibleProvider::new(settings.api_key.clone());
            if let Some(model) = &settings.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &settings.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Arc::new(provider)
        }
    };
    Some(provider)
}

/// JSON-lines store when a path is configured, else in-memory.
pub fn open_contact_store(config: &Config) -> Arc<dyn ContactStore> {
    match &config.contacts.path {
        Some(path) => {
            info!("Contacts are stored in {}", path.display());
            Arc::new(JsonlContactStore::new(path.clone()))
        }
        None => {
            info!("No contacts path configured, keeping contacts in memory");
            Arc::new(InMemoryContactStore::new())
        }
    }
}

pub fn build_router() -> anyhow::Result<QueryRouter> {
    let config = Config::load_or_default()?;
    let mut router = QueryRouter::new(catalog_source(&config)?, config.router_config())
        .with_contact_store(open_contact_store(&config));
    if let Some(provider) = build_provider(&config) {
        info!("AI tier enabled with model {}", provider.model());
        router = router.with_provider(provider);
    } else {
        info!("No usable API key, routing on local heuristics only");
    }
    Ok(router)
}
