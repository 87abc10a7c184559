//! Navigation matching: a model-backed matcher followed by keyword
//! confidence scoring.

mod ai;
pub mod scoring;
mod special;

pub use ai::{AiMatcher, matching_prompt, parse_reply};
pub use scoring::best_match;
pub use special::SpecialCommand;

use tracing::{info, warn};
use wayfinder_core::util::search_links;
use wayfinder_core::{MatchResult, RouterResponse, Service, TierError};

use crate::TierSource;

/// Where a query should send the user, before response assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub result: MatchResult,
    pub home: bool,
    pub external: Vec<String>,
    pub ask_form: Option<bool>,
    pub source: TierSource,
}

impl Navigation {
    #[must_use]
    pub const fn home(source: TierSource) -> Self {
        Self {
            result: MatchResult::none(),
            home: true,
            external: Vec::new(),
            ask_form: None,
            source,
        }
    }

    /// Local scoring outcome; always carries the three search links.
    #[must_use]
    pub fn scored(result: MatchResult, query: &str) -> Self {
        Self {
            result,
            home: false,
            external: search_links(query),
            ask_form: None,
            source: TierSource::LocalHeuristic,
        }
    }

    pub(crate) fn remote(result: MatchResult, external: Vec<String>, ask_form: Option<bool>) -> Self {
        let ask_form = if result.is_match() { ask_form } else { None };
        Self {
            result,
            home: false,
            external,
            ask_form,
            source: TierSource::RemoteAi,
        }
    }

    #[must_use]
    pub fn into_response(self, query: &str) -> RouterResponse {
        if self.home {
            return RouterResponse::home();
        }
        let response = RouterResponse::navigation(&self.result, self.external, query);
        match self.ask_form {
            Some(ask_form) => response.with_ask_form(ask_form),
            None => response,
        }
    }
}

/// One way of resolving a query against the catalog.
pub enum Matcher {
    RemoteAi(AiMatcher),
    LocalHeuristic,
}

impl Matcher {
    #[must_use]
    pub const fn source(&self) -> TierSource {
        match self {
            Self::RemoteAi(_) => TierSource::RemoteAi,
            Self::LocalHeuristic => TierSource::LocalHeuristic,
        }
    }

    pub async fn resolve(&self, query: &str, services: &[Service]) -> Result<Navigation, TierError> {
        match self {
            Self::RemoteAi(ai) => ai.resolve(query, services).await,
            Self::LocalHeuristic => Ok(Navigation::scored(best_match(services, query), query)),
        }
    }
}

/// Matchers tried in order; the first success wins.
///
/// The chain always ends with local scoring, which cannot fail.
pub struct MatchingTier {
    chain: Vec<Matcher>,
}

impl MatchingTier {
    #[must_use]
    pub fn new(ai: Option<AiMatcher>) -> Self {
        let mut chain = Vec::with_capacity(2);
        if let Some(ai) = ai {
            chain.push(Matcher::RemoteAi(ai));
        }
        chain.push(Matcher::LocalHeuristic);
        Self { chain }
    }

    #[must_use]
    pub fn local() -> Self {
        Self::new(None)
    }

    pub async fn run(&self, query: &str, services: &[Service]) -> Navigation {
        for matcher in &self.chain {
            match matcher.resolve(query, services).await {
                Ok(navigation) => {
                    info!(
                        "Matched via {}: {} (confidence {})",
                        matcher.source().as_str(),
                        navigation
                            .result
                            .service
                            .as_ref()
                            .map_or(if navigation.home { "home" } else { "none" }, |s| {
                                s.name.as_str()
                            }),
                        navigation.result.confidence
                    );
                    return navigation;
                }
                Err(e) => warn!(
                    "Matching via {} failed, falling back: {e}",
                    matcher.source().as_str()
                ),
            }
        }

        Navigation::scored(best_match(services, query), query)
    }
}
