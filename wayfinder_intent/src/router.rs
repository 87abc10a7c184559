use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};
use wayfinder_core::{
    CatalogSource, ContactRecord, ContactStore, ExtractedContact, LLMProvider, RouterConfig,
    RouterError, RouterResponse,
};

use crate::extraction::{AiExtractor, ExtractionTier};
use crate::matching::{AiMatcher, MatchingTier, SpecialCommand};

/// Turns one free-text query into one routing response.
///
/// Order per request: validate, extract contact details, check special
/// commands, then match against the catalog. Only validation can fail.
pub struct QueryRouter {
    catalog: Arc<dyn CatalogSource>,
    config: RouterConfig,
    contacts: Option<Arc<dyn ContactStore>>,
    extraction: ExtractionTier,
    matching: MatchingTier,
    pending_saves: TaskTracker,
}

impl QueryRouter {
    /// Router with local heuristics only.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogSource>, config: RouterConfig) -> Self {
        Self {
            catalog,
            config,
            contacts: None,
            extraction: ExtractionTier::local(),
            matching: MatchingTier::local(),
            pending_saves: TaskTracker::new(),
        }
    }

    /// Puts the model in front of both tiers. Ignored when AI is disabled in
    /// the configuration.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        if !self.config.ai_enabled {
            info!("AI disabled, keeping local heuristics for {}", provider.model());
            return self;
        }
        let timeout = self.config.ai_timeout;
        self.extraction = ExtractionTier::new(Some(AiExtractor::new(
            provider.clone(),
            self.config.extraction,
            timeout,
        )));
        self.matching = MatchingTier::new(Some(AiMatcher::new(
            provider,
            self.config.matching,
            timeout,
        )));
        self
    }

    #[must_use]
    pub fn with_contact_store(mut self, store: Arc<dyn ContactStore>) -> Self {
        self.contacts = Some(store);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Extraction and command detection see the trimmed text. Matching and
    /// the search links use the query as given.
    pub async fn route(&self, query: &str) -> Result<RouterResponse, RouterError> {
        let text = query.trim();
        if text.is_empty() {
            return Err(RouterError::validation("Query is required"));
        }
        debug!("Routing query: {text}");

        let extraction = self.extraction.run(text).await;
        if !extraction.contact.is_empty() {
            self.persist(&extraction.contact, query);
            return Ok(RouterResponse::contact_captured(extraction.contact));
        }

        if SpecialCommand::detect(text) == Some(SpecialCommand::Home) {
            info!("Special command: home");
            return Ok(RouterResponse::home());
        }

        let services = match self.catalog.list_services().await {
            Ok(services) => services,
            Err(e) => {
                error!("Catalog unavailable: {e:#}");
                return Ok(RouterResponse::degraded(query));
            }
        };

        let navigation = self.matching.run(query, &services).await;
        Ok(navigation.into_response(query))
    }

    /// Hands the contact to the store without waiting for the result. The
    /// save runs detached and outlives the router.
    fn persist(&self, contact: &ExtractedContact, query: &str) {
        if !self.config.persist_contacts {
            return;
        }
        let Some(store) = self.contacts.clone() else {
            return;
        };
        let record = ContactRecord::new(contact.clone(), query);

        self.pending_saves.spawn(async move {
            match store.save_contact(&record).await {
                Ok(id) => info!("Saved contact {id}"),
                Err(e) => error!("Failed to save contact {}: {e:#}", record.id),
            }
        });
    }

    /// Waits for contact saves still in flight. Callers that exit right after
    /// routing use this so the last save is not cut off.
    pub async fn finish_pending_saves(&self) {
        self.pending_saves.close();
        self.pending_saves.wait().await;
        self.pending_saves.reopen();
    }
}
