//! Explicit feature flags injected into the query router.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationOptions {
    /// Extraction replies are short JSON objects.
    #[must_use]
    pub const fn extraction() -> Self {
        Self {
            temperature: 0.1,
            max_output_tokens: 256,
        }
    }

    #[must_use]
    pub const fn matching() -> Self {
        Self {
            temperature: 0.1,
            max_output_tokens: 1024,
        }
    }
}

/// Router behaviour switches.
///
/// Derived once from configuration and environment by the caller, never read
/// from process state inside the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Whether the AI tier is attempted before the local heuristics.
    pub ai_enabled: bool,
    /// Whether captured contacts are handed to the contact store.
    pub persist_contacts: bool,
    /// Deadline for the single AI call of each tier.
    #[serde(with = "duration_secs")]
    pub ai_timeout: Duration,
    pub extraction: GenerationOptions,
    pub matching: GenerationOptions,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            ai_enabled: false,
            persist_contacts: true,
            ai_timeout: Duration::from_secs(15),
            extraction: GenerationOptions::extraction(),
            matching: GenerationOptions::matching(),
        }
    }
}

impl RouterConfig {
    /// Heuristics only; no persistence.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            ai_enabled: false,
            persist_contacts: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_ai(mut self, enabled: bool) -> Self {
        self.ai_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_persistence(mut self, enabled: bool) -> Self {
        self.persist_contacts = enabled;
        self
    }

    #[must_use]
    pub const fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
