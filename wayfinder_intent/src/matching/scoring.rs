//! Keyword confidence scoring for the local matcher.
//!
//! Every helper takes the query already lowercased.

use wayfinder_core::{MatchResult, Service};

const KEYWORD_WEIGHT: u32 = 2;
const FULL_NAME_WEIGHT: u32 = 3;
const NAME_WORD_WEIGHT: u32 = 1;
const MIN_NAME_WORD_LEN: usize = 4;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Two points per keyword found in the query.
#[must_use]
pub fn keyword_score(service: &Service, lowered: &str) -> u32 {
    let hits = service
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && lowered.contains(k.as_str()))
        .count();
    KEYWORD_WEIGHT.saturating_mul(count(hits))
}

/// Three points when the whole service name appears in the query.
#[must_use]
pub fn name_score(service: &Service, lowered: &str) -> u32 {
    let name = service.name.trim().to_lowercase();
    if !name.is_empty() && lowered.contains(&name) {
        FULL_NAME_WEIGHT
    } else {
        0
    }
}

/// One point per name word longer than three characters found in the query.
#[must_use]
pub fn name_word_score(service: &Service, lowered: &str) -> u32 {
    let hits = service
        .name
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_NAME_WORD_LEN && lowered.contains(word))
        .count();
    NAME_WORD_WEIGHT.saturating_mul(count(hits))
}

#[must_use]
pub fn confidence(service: &Service, query: &str) -> u32 {
    let lowered = query.to_lowercase();
    keyword_score(service, &lowered)
        .saturating_add(name_score(service, &lowered))
        .saturating_add(name_word_score(service, &lowered))
}

/// Highest-scoring service; the first one scanned wins a tie.
///
/// A best score of zero is no match.
#[must_use]
pub fn best_match(services: &[Service], query: &str) -> MatchResult {
    let mut best = MatchResult::none();
    for service in services {
        let score = confidence(service, query);
        if score > best.confidence {
            best = MatchResult {
                service: Some(service.clone()),
                confidence: score,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plumbing() -> Service {
        Service::new("1", "Plumbing Services", "/plumbing", &["plumber", "faucet", "pipe"])
    }

    fn tutoring() -> Service {
        Service::new("2", "Tutoring Services", "/tutoring", &["math", "tutor"])
    }

    #[test]
    fn sub_scores_are_weighted() {
        let service = plumbing();
        let query = "need a plumber for a faucet";
        assert_eq!(keyword_score(&service, query), 4);
        assert_eq!(name_score(&service, query), 0);
        assert_eq!(name_score(&service, "plumbing services near me"), 3);
        assert_eq!(name_word_score(&service, "plumbing services near me"), 2);
        assert_eq!(confidence(&service, "Plumbing Services near me"), 5);
    }

    #[test]
    fn short_name_words_do_not_count() {
        let service = Service::new("9", "AC Fix", "/ac", &[]);
        assert_eq!(name_word_score(&service, "ac fix"), 0);
        assert_eq!(name_score(&service, "ac fix"), 3);
    }

    #[test]
    fn scoring_is_monotonic_in_keyword_hits() {
        let service = plumbing();
        let base = confidence(&service, "my plumber");
        let more = confidence(&service, "my plumber fixed the faucet");
        let most = confidence(&service, "my plumber fixed the faucet and a pipe");
        assert!(base <= more && more <= most);
    }

    #[test]
    fn picks_the_maximum() {
        let services = vec![tutoring(), plumbing()];
        let result = best_match(&services, "I need a plumber for a leaky faucet");
        assert_eq!(result.service.map(|s| s.name), Some("Plumbing Services".to_string()));
        assert_eq!(result.confidence, 4);
    }

    #[test]
    fn ties_keep_the_first_scanned() {
        let services = vec![
            Service::new("a", "Alpha", "/alpha", &["fix"]),
            Service::new("b", "Beta", "/beta", &["fix"]),
        ];
        let result = best_match(&services, "fix it");
        assert_eq!(result.service.map(|s| s.id), Some("a".to_string()));
    }

    #[test]
    fn zero_is_no_match() {
        let result = best_match(&[plumbing(), tutoring()], "asdkjqwe random gibberish");
        assert!(!result.is_match());
        assert_eq!(result.confidence, 0);
        assert!(!best_match(&[], "plumber").is_match());
    }
}
