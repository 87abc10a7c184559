use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use wayfinder_core::util::strip_code_fence;
use wayfinder_core::{ContactField, ExtractedContact, GenerationOptions, LLMProvider, TierError};

use crate::remote::generate_once;

/// Model-backed contact extractor.
pub struct AiExtractor {
    provider: Arc<dyn LLMProvider>,
    options: GenerationOptions,
    timeout: Duration,
}

impl AiExtractor {
    #[must_use]
    pub fn new(provider: Arc<dyn LLMProvider>, options: GenerationOptions, timeout: Duration) -> Self {
        Self {
            provider,
            options,
            timeout,
        }
    }

    pub async fn extract(&self, text: &str) -> Result<ExtractedContact, TierError> {
        let prompt = extraction_prompt(text);
        let reply = generate_once(self.provider.as_ref(), &prompt, &self.options, self.timeout).await?;
        debug!("Extraction reply: {reply}");
        parse_reply(&reply)
    }
}

#[must_use]
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract contact information from the text below and answer with ONLY a JSON object containing the fields that are present. Leave out any field the text does not mention.

Fields:
- name: the person's actual name only, no descriptive words
- email: an email address
- phone: a phone or contact number of any length
- description: any message, description or other text that is not a name, email or phone

Text: "{text}"

Answer with valid JSON holding only the fields found in the text:"#
    )
}

/// Reads a model reply into contact fields.
///
/// The reply must be a JSON object, optionally inside a code fence. Unknown
/// keys are ignored, strings are trimmed, and a numeric phone is kept as its
/// decimal text. An object with no usable field is a valid empty answer.
pub fn parse_reply(reply: &str) -> Result<ExtractedContact, TierError> {
    let body = strip_code_fence(reply);
    let value: Value =
        serde_json::from_str(body).map_err(|e| TierError::Malformed(format!("{e}: {body}")))?;
    let Value::Object(map) = value else {
        return Err(TierError::Malformed(format!("expected a JSON object: {body}")));
    };

    let mut contact = ExtractedContact::default();
    for (key, value) in &map {
        let Some(field) = ContactField::from_key(key) else {
            continue;
        };
        match value {
            Value::String(text) => contact.set(field, text),
            Value::Number(number) if field == ContactField::Phone => {
                contact.set(field, &number.to_string());
            }
            _ => {}
        }
    }
    Ok(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::test_support::{Script, ScriptedProvider};

    #[test]
    fn parses_fenced_object() {
        let reply = "Sure!\n```json\n{\"name\": \" John \", \"email\": \"john@example.com\"}\n```";
        let contact = parse_reply(reply).ok();
        assert_eq!(
            contact,
            Some(ExtractedContact {
                name: Some("John".to_string()),
                email: Some("john@example.com".to_string()),
                ..ExtractedContact::default()
            })
        );
    }

    #[test]
    fn numeric_phone_becomes_text_and_unknown_keys_are_ignored() {
        let contact = parse_reply(r#"{"phone": 87091, "age": 31, "name": ""}"#).ok();
        assert_eq!(
            contact,
            Some(ExtractedContact {
                phone: Some("87091".to_string()),
                ..ExtractedContact::default()
            })
        );
    }

    #[test]
    fn empty_object_is_a_valid_answer() {
        assert!(parse_reply("{}").is_ok_and(|c| c.is_empty()));
    }

    #[test]
    fn non_object_replies_are_malformed() {
        assert!(matches!(parse_reply("[1, 2]"), Err(TierError::Malformed(_))));
        assert!(matches!(
            parse_reply("I could not find anything"),
            Err(TierError::Malformed(_))
        ));
    }

    #[test]
    fn prompt_quotes_the_text() {
        let prompt = extraction_prompt("my name is Ann");
        assert!(prompt.contains("Text: \"my name is Ann\""));
        assert!(prompt.contains("description"));
    }

    #[tokio::test]
    async fn extract_sends_one_prompt() {
        let provider = Arc::new(ScriptedProvider::new(Script::Reply(
            r#"{"email": "ann@example.com"}"#.to_string(),
        )));
        let extractor = AiExtractor::new(
            provider.clone(),
            GenerationOptions::extraction(),
            Duration::from_secs(1),
        );

        let contact = extractor.extract("write to ann@example.com").await;
        assert_eq!(
            contact.ok().and_then(|c| c.email),
            Some("ann@example.com".to_string())
        );
        assert_eq!(provider.call_count(), 1);
    }
}
