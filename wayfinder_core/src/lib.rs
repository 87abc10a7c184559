#![deny(
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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod response;
pub mod util;

pub use catalog::{MatchResult, Service, SubSection};
pub use config::{GenerationOptions, RouterConfig};
pub use contact::{
    ContactField, ContactQuery, ContactRecord, ContactStatus, ContactSubmission, ExtractedContact,
    Page,
};
pub use error::{ContactError, RouterError, TierError};
pub use response::{InternalRoute, RouterResponse, SpecialAction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Remote text-generation collaborator.
///
/// Implementations make exactly one network request per call; retries and
/// deadlines are the caller's concern.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> anyhow::Result<LLMResponse>;

    fn model(&self) -> &str;

    /// Single-prompt completion.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> anyhow::Result<String> {
        let response = self.chat(&[ChatMessage::user(prompt)], options).await?;
        Ok(response.content)
    }
}

/// Read-only source of navigable catalog entries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_services(&self) -> anyhow::Result<Vec<Service>>;
}

/// Persistence collaborator for captured contact details.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn save_contact(&self, record: &ContactRecord) -> anyhow::Result<Uuid>;

    async fn list_contacts(&self, query: &ContactQuery) -> anyhow::Result<Page<ContactRecord>>;

    /// Returns `None` when no record has the given id.
    async fn update_status(
        &self,
        id: &Uuid,
        status: ContactStatus,
    ) -> anyhow::Result<Option<ContactRecord>>;
}
