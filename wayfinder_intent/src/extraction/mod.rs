//! Contact extraction: a model-backed extractor followed by ordered regex
//! rules.

mod ai;
pub mod rules;

pub use ai::{AiExtractor, extraction_prompt, parse_reply};
pub use rules::{DEFAULT_RULES, FieldRule, RuleDef, extract_with_rules};

use tracing::{info, warn};
use wayfinder_core::{ExtractedContact, TierError};

use crate::TierSource;

/// One way of turning text into contact fields.
pub enum Extractor {
    RemoteAi(AiExtractor),
    LocalHeuristic,
}

impl Extractor {
    #[must_use]
    pub const fn source(&self) -> TierSource {
        match self {
            Self::RemoteAi(_) => TierSource::RemoteAi,
            Self::LocalHeuristic => TierSource::LocalHeuristic,
        }
    }

    pub async fn extract(&self, text: &str) -> Result<ExtractedContact, TierError> {
        match self {
            Self::RemoteAi(ai) => ai.extract(text).await,
            Self::LocalHeuristic => Ok(extract_with_rules(&DEFAULT_RULES, text)),
        }
    }
}

/// Extracted fields together with the extractor that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub contact: ExtractedContact,
    pub source: TierSource,
}

/// Extractors tried in order; the first success wins.
///
/// The chain always ends with the local rules, which cannot fail.
pub struct ExtractionTier {
    chain: Vec<Extractor>,
}

impl ExtractionTier {
    #[must_use]
    pub fn new(ai: Option<AiExtractor>) -> Self {
        let mut chain = Vec::with_capacity(2);
        if let Some(ai) = ai {
            chain.push(Extractor::RemoteAi(ai));
        }
        chain.push(Extractor::LocalHeuristic);
        Self { chain }
    }

    #[must_use]
    pub fn local() -> Self {
        Self::new(None)
    }

    pub async fn run(&self, text: &str) -> Extraction {
        for extractor in &self.chain {
            match extractor.extract(text).await {
                Ok(contact) => {
                    info!(
                        "Extraction via {}: {} field(s)",
                        extractor.source().as_str(),
                        contact.present_fields().len()
                    );
                    return Extraction {
                        contact,
                        source: extractor.source(),
                    };
                }
                Err(e) => warn!(
                    "Extraction via {} failed, falling back: {e}",
                    extractor.source().as_str()
                ),
            }
        }

        Extraction {
            contact: extract_with_rules(&DEFAULT_RULES, text),
            source: TierSource::LocalHeuristic,
        }
    }
}
