use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};
use wayfinder_core::{ChatMessage, GenerationOptions, LLMProvider, LLMResponse, Role, Usage};

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating GeminiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
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

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// System messages become `systemInstruction`; the rest map onto `contents`.
fn build_request(messages: &[ChatMessage], options: &GenerationOptions) -> Value {
    let system: Vec<Value> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| json!({ "text": m.content }))
        .collect();

    let contents: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| {
            let role = if m.role == Role::Assistant { "model" } else { "user" };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    let mut request = json!({
        "contents": contents,
        "generationConfig": {
            "temperature": options.temperature,
            "maxOutputTokens": options.max_output_tokens,
        }
    });
    if !system.is_empty() {
        request["systemInstruction"] = json!({ "parts": system });
    }
    request
}

fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let content = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing candidate text"))?
        .to_string();

    let usage = response["usageMetadata"].as_object().map(|u| {
        let count = |key: &str| {
            u32::try_from(u.get(key).and_then(Value::as_u64).unwrap_or(0)).unwrap_or(0)
        };
        Usage {
            prompt_tokens: count("promptTokenCount"),
            completion_tokens: count("candidatesTokenCount"),
            total_tokens: count("totalTokenCount"),
        }
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> anyhow::Result<LLMResponse> {
        let request = build_request(messages, options);

        info!("Sending request to Gemini API: model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        debug!("Gemini API response: {response}");
        parse_response(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
