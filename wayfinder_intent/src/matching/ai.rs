use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use wayfinder_core::response::HOME_MATCH;
use wayfinder_core::util::{encode_query, strip_code_fence};
use wayfinder_core::{GenerationOptions, LLMProvider, MatchResult, Service, TierError};

use super::Navigation;
use crate::TierSource;
use crate::remote::generate_once;

const MAX_EXTERNAL_LINKS: usize = 3;

/// Model-backed navigation matcher.
pub struct AiMatcher {
    provider: Arc<dyn LLMProvider>,
    options: GenerationOptions,
    timeout: Duration,
}

impl AiMatcher {
    #[must_use]
    pub fn new(provider: Arc<dyn LLMProvider>, options: GenerationOptions, timeout: Duration) -> Self {
        Self {
            provider,
            options,
            timeout,
        }
    }

    pub async fn resolve(&self, query: &str, services: &[Service]) -> Result<Navigation, TierError> {
        let prompt = matching_prompt(query, services);
        let reply = generate_once(self.provider.as_ref(), &prompt, &self.options, self.timeout).await?;
        debug!("Matching reply: {reply}");
        parse_reply(&reply, services)
    }
}

#[must_use]
pub fn matching_prompt(query: &str, services: &[Service]) -> String {
    let mut service_list = String::new();
    for service in services {
        let _ = writeln!(
            service_list,
            "- {} ({}) - Keywords: {}",
            service.name,
            service.page_url,
            service.keywords.join(", ")
        );
    }
    let encoded = encode_query(query);

    format!(
        r#"You are a smart routing assistant for a services web application.

Available internal services:
{service_list}
Special commands:
- If the user asks to go "home" or "back": match "{HOME_MATCH}", route "/"

For the user query "{query}":
1. Decide whether the query matches one of the internal services by its keywords
2. On a match, return the exact service name and route
3. Always provide 2-3 relevant external reference links
4. Respond ONLY with valid JSON in exactly this format:

{{
  "internal": {{
    "match": "exact service name or null",
    "route": "exact route path or null"
  }},
  "external": [
    "https://www.google.com/search?q={encoded}",
    "https://en.wikipedia.org/wiki/Special:Search?search={encoded}"
  ],
  "askForm": true
}}

Examples:
- "I need plumbing" gives match "Plumbing Services", route "/plumbing", askForm true
- "math help" gives match "Tutoring Services", route "/tutoring", askForm true
- "go home" gives match "{HOME_MATCH}", route "/", askForm false
- "random topic" gives match null, route null, askForm false

User query: "{query}""#
    )
}

#[derive(Debug, Default, Deserialize)]
struct RawInternal {
    #[serde(default, rename = "match")]
    matched: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReply {
    internal: RawInternal,
    #[serde(default)]
    external: Vec<String>,
    #[serde(default)]
    ask_form: Option<bool>,
}

/// Parses a model reply and repairs it against the catalog.
///
/// The route always comes from the catalog entry named by `match`. A name
/// outside the catalog is dropped, blank links are removed and at most three
/// are kept. `askForm` survives only on a service match.
pub fn parse_reply(reply: &str, services: &[Service]) -> Result<Navigation, TierError> {
    let body = strip_code_fence(reply);
    let raw: RawReply =
        serde_json::from_str(body).map_err(|e| TierError::Malformed(format!("{e}: {body}")))?;

    let external: Vec<String> = raw
        .external
        .iter()
        .map(|link| link.trim())
        .filter(|link| !link.is_empty())
        .take(MAX_EXTERNAL_LINKS)
        .map(str::to_string)
        .collect();

    let matched = raw
        .internal
        .matched
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case("null"));

    let Some(matched) = matched else {
        return Ok(Navigation::remote(MatchResult::none(), external, None));
    };
    if matched.eq_ignore_ascii_case(HOME_MATCH) {
        return Ok(Navigation::home(TierSource::RemoteAi));
    }

    match services.iter().find(|s| s.name.eq_ignore_ascii_case(matched)) {
        Some(service) => Ok(Navigation::remote(
            MatchResult {
                service: Some(service.clone()),
                confidence: 0,
            },
            external,
            raw.ask_form,
        )),
        None => {
            warn!("Model named unknown service {matched:?}, dropping the match");
            Ok(Navigation::remote(MatchResult::none(), external, None))
        }
    }
}
