//! Text helpers shared by the AI tiers and the response assembler.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, as `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SEARCH_ENGINES: [&str; 3] = [
    "https://www.google.com/search?q=",
    "https://en.wikipedia.org/wiki/Special:Search?search=",
    "https://www.bing.com/search?q=",
];

/// Percent-encodes a query for use in a URL component. Case is preserved.
#[must_use]
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, URI_COMPONENT).to_string()
}

/// The three deterministic reference links for a query.
#[must_use]
pub fn search_links(query: &str) -> Vec<String> {
    let encoded = encode_query(query);
    SEARCH_ENGINES
        .iter()
        .map(|base| format!("{base}{encoded}"))
        .collect()
}

/// Single link used by the degraded response.
#[must_use]
pub fn fallback_search_link(query: &str) -> String {
    format!("{}{}", SEARCH_ENGINES[0], encode_query(query))
}

/// Removes an optional Markdown code fence around a model reply.
///
/// A ```` ```json ```` fence takes precedence over a bare one. Text without
/// fences is only trimmed.
#[must_use]
pub fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let inner = if let Some((_, rest)) = reply.split_once("```json") {
        rest
    } else if let Some((_, rest)) = reply.split_once("```") {
        rest
    } else {
        return reply;
    };
    inner.split_once("```").map_or(inner, |(body, _)| body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_links_encode_and_preserve_case() {
        let links = search_links("Leaky Faucet & more");
        assert_eq!(links.len(), 3);
        assert_eq!(
            links[0],
            "https://www.google.com/search?q=Leaky%20Faucet%20%26%20more"
        );
        assert!(links[1].starts_with("https://en.wikipedia.org/"));
        assert!(links[2].ends_with("Leaky%20Faucet%20%26%20more"));
    }

    #[test]
    fn unreserved_marks_stay_literal() {
        assert_eq!(encode_query("what's up (now)!"), "what's%20up%20(now)!");
        assert_eq!(encode_query("a-b_c.d~e*f"), "a-b_c.d~e*f");
        assert_eq!(encode_query("café/100%?"), "caf%C3%A9%2F100%25%3F");
    }

    #[test]
    fn strip_json_fence() {
        let reply = "Sure!\n```json\n{\"name\": \"John\"}\n```\nanything else";
        assert_eq!(strip_code_fence(reply), "{\"name\": \"John\"}");
    }

    #[test]
    fn strip_bare_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn unterminated_fence_keeps_remainder() {
        assert_eq!(strip_code_fence("```json {\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn plain_reply_is_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }
}
