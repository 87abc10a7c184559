use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;
use wayfinder_core::{ChatMessage, GenerationOptions, LLMProvider, LLMResponse, Usage};

/// Client for any OpenAI-style `/chat/completions` endpoint.
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiCompatibleProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let usage = response["usage"].as_object().map(|u| {
        let count = |key: &str| {
            u32::try_from(u.get(key).and_then(Value::as_u64).unwrap_or(0)).unwrap_or(0)
        };
        Usage {
            prompt_tokens: count("prompt_tokens"),
            completion_tokens: count("completion_tokens"),
            total_tokens: count("total_tokens"),
        }
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for OpenAiCompatibleProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": self.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_output_tokens,
        });

        info!("Sending request to chat completions API: model={}", self.model);

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_response(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parses_choice_content() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{}" } }],
            "usage": { "prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4 }
        });
        let response = parse_response(&body).expect("valid body should parse");
        assert_eq!(response.content, "{}");
        assert_eq!(response.usage.map(|u| u.prompt_tokens), Some(3));
    }

    #[test]
    fn missing_content_is_an_error() {
        assert!(parse_response(&json!({ "choices": [] })).is_err());
    }
}
