#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Query interpretation: contact extraction, navigation matching, and the
//! router that sequences them.
//!
//! Both tiers try a remote model first and fall back to deterministic local
//! heuristics, so every query gets an answer even with the model offline.

pub mod extraction;
pub mod matching;
mod remote;
mod router;

pub use extraction::{AiExtractor, Extraction, ExtractionTier, Extractor};
pub use matching::{AiMatcher, Matcher, MatchingTier, Navigation, SpecialCommand};
pub use remote::generate_once;
pub use router::QueryRouter;

/// Which half of a tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSource {
    RemoteAi,
    LocalHeuristic,
}

impl TierSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteAi => "remote_ai",
            Self::LocalHeuristic => "local_heuristic",
        }
    }
}
