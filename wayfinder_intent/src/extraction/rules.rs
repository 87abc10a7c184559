//! Ordered regex rules for the local contact extractor.
//!
//! Rules are evaluated in declaration order and the first rule that yields a
//! value for a field wins; later rules for the same field are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;
use wayfinder_core::contact::EMAIL_PATTERN;
use wayfinder_core::{ContactField, ExtractedContact};

/// Which capture to keep when a rule matches several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
}

/// Source form of a rule.
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub id: &'static str,
    pub field: ContactField,
    /// Capture group 1 holds the value.
    pub pattern: String,
    pub occurrence: Occurrence,
}

impl RuleDef {
    fn first(id: &'static str, field: ContactField, pattern: impl Into<String>) -> Self {
        Self {
            id,
            field,
            pattern: pattern.into(),
            occurrence: Occurrence::First,
        }
    }

    pub fn build(&self) -> Result<FieldRule, regex::Error> {
        Ok(FieldRule {
            id: self.id,
            field: self.field,
            regex: Regex::new(&self.pattern)?,
            occurrence: self.occurrence,
        })
    }
}

/// A compiled text → optional value rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub id: &'static str,
    pub field: ContactField,
    regex: Regex,
    occurrence: Occurrence,
}

impl FieldRule {
    /// Trimmed capture, or `None` when the rule does not match or captures blank text.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = match self.occurrence {
            Occurrence::First => self.regex.captures(text),
            Occurrence::Last => self.regex.captures_iter(text).last(),
        }?;
        let value = caps.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

#[must_use]
pub fn default_rule_defs() -> Vec<RuleDef> {
    vec![
        RuleDef::first(
            "name_intro",
            ContactField::Name,
            r"(?i)\b(?:my\s+name\s+is|myself|i\s+am)\s+([a-z]+)",
        ),
        RuleDef::first("email_any", ContactField::Email, format!("({EMAIL_PATTERN})")),
        RuleDef::first(
            "phone_contact_is",
            ContactField::Phone,
            r"(?i)contact\s+is\s+([0-9]{3,15})",
        ),
        RuleDef::first(
            "phone_number_is",
            ContactField::Phone,
            r"(?i)(?:phone\s+is|number\s+is)\s*([0-9]{3,15})",
        ),
        RuleDef::first(
            "phone_contact_info_is",
            ContactField::Phone,
            r"(?i)contact\s+(?:number|info)\s+is\s+([0-9]{3,15})",
        ),
        RuleDef {
            id: "phone_after_keyword",
            field: ContactField::Phone,
            pattern: r"(?i)(?:contact|phone|number)\s*[:=]?\s*([0-9]{3,15})".to_string(),
            occurrence: Occurrence::Last,
        },
        RuleDef::first(
            "description_quoted",
            ContactField::Description,
            r#"(?i)description\s+is\s*["']([^"']+)["']"#,
        ),
        RuleDef::first(
            "message_quoted",
            ContactField::Description,
            r#"(?i)message\s+is\s*["']([^"']+)["']"#,
        ),
        RuleDef::first(
            "description_until_comma",
            ContactField::Description,
            r"(?i)description\s+is\s+([^,]+)",
        ),
    ]
}

/// Compiled default rules. A rule that fails to compile is logged and left out.
pub static DEFAULT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    default_rule_defs()
        .iter()
        .filter_map(|def| {
            def.build()
                .map_err(|e| error!("Extraction rule {} does not compile: {e}", def.id))
                .ok()
        })
        .collect()
});

/// First match per field wins. Pure and deterministic.
#[must_use]
pub fn extract_with_rules(rules: &[FieldRule], text: &str) -> ExtractedContact {
    let mut contact = ExtractedContact::default();
    for rule in rules {
        if contact.get(rule.field).is_some() {
            continue;
        }
        if let Some(value) = rule.apply(text) {
            contact.fill(rule.field, &value);
        }
    }
    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> &'static FieldRule {
        DEFAULT_RULES
            .iter()
            .find(|r| r.id == id)
            .unwrap_or_else(|| panic!("rule {id} missing"))
    }

    #[test]
    fn every_default_rule_compiles() {
        assert_eq!(DEFAULT_RULES.len(), default_rule_defs().len());
    }

    #[test]
    fn name_takes_one_alphabetic_token() {
        let name = rule("name_intro");
        assert_eq!(name.apply("My name is John Smith").as_deref(), Some("John"));
        assert_eq!(name.apply("myself hemanth and").as_deref(), Some("hemanth"));
        assert_eq!(name.apply("Hi, I am Priya.").as_deref(), Some("Priya"));
        assert_eq!(name.apply("my name is 42"), None);
    }

    #[test]
    fn name_needs_a_word_boundary() {
        assert_eq!(rule("name_intro").apply("taxi amount"), None);
    }

    #[test]
    fn email_found_anywhere() {
        let email = rule("email_any");
        assert_eq!(
            email.apply("reach me at jane.doe+work@mail.example.org today").as_deref(),
            Some("jane.doe+work@mail.example.org")
        );
        assert_eq!(email.apply("no address here"), None);
    }

    #[test]
    fn phone_rules_in_isolation() {
        assert_eq!(
            rule("phone_contact_is").apply("my contact is 9876543").as_deref(),
            Some("9876543")
        );
        assert_eq!(
            rule("phone_number_is").apply("phone is 555123").as_deref(),
            Some("555123")
        );
        assert_eq!(
            rule("phone_contact_info_is")
                .apply("my contact info is 7834129871")
                .as_deref(),
            Some("7834129871")
        );
        assert_eq!(
            rule("phone_after_keyword")
                .apply("phone: 111, backup number 22233")
                .as_deref(),
            Some("22233")
        );
        assert_eq!(rule("phone_contact_is").apply("contact is 12"), None);
    }

    #[test]
    fn earlier_phone_rule_wins() {
        let contact = extract_with_rules(&DEFAULT_RULES, "phone is 12345, contact is 67890");
        assert_eq!(contact.phone.as_deref(), Some("67890"));
    }

    #[test]
    fn descriptions_quoted_and_unquoted() {
        assert_eq!(
            rule("description_quoted")
                .apply(r#"description is "fix my sink""#)
                .as_deref(),
            Some("fix my sink")
        );
        assert_eq!(
            rule("message_quoted")
                .apply("message is 'call after 5'")
                .as_deref(),
            Some("call after 5")
        );
        assert_eq!(
            rule("description_until_comma")
                .apply("description is broken heater , thanks")
                .as_deref(),
            Some("broken heater")
        );
    }

    #[test]
    fn quoted_description_beats_unquoted() {
        let contact = extract_with_rules(
            &DEFAULT_RULES,
            r#"description is "leaking pipe", message is "asap""#,
        );
        assert_eq!(contact.description.as_deref(), Some("leaking pipe"));
    }

    #[test]
    fn plain_navigation_text_extracts_nothing() {
        assert!(extract_with_rules(&DEFAULT_RULES, "I need plumbing services").is_empty());
        assert!(extract_with_rules(&DEFAULT_RULES, "take me home").is_empty());
    }
}
