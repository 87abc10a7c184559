//! Fakes shared by the router integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;
use wayfinder_core::{
    ChatMessage, ContactQuery, ContactRecord, ContactStatus, ContactStore, GenerationOptions,
    LLMProvider, LLMResponse, Page,
};

/// One scripted provider outcome.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(&'static str),
    Fail(&'static str),
    Hang(Duration),
}

/// Provider answering from a queue, one step per call. An exhausted queue fails.
pub struct QueuedProvider {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl QueuedProvider {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for QueuedProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _options: &GenerationOptions,
    ) -> anyhow::Result<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.extend(messages.iter().map(|m| m.content.clone()));
        }
        let step = self.steps.lock().ok().and_then(|mut s| s.pop_front());
        match step {
            Some(Step::Reply(text)) => Ok(LLMResponse {
                content: text.to_string(),
                usage: None,
            }),
            Some(Step::Fail(message)) => anyhow::bail!("{message}"),
            Some(Step::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                anyhow::bail!("woke up after {duration:?}")
            }
            None => anyhow::bail!("no scripted reply left"),
        }
    }

    fn model(&self) -> &str {
        "queued"
    }
}

/// Store that forwards every saved record to a channel, optionally after a
/// delay.
pub struct ChannelStore {
    tx: mpsc::UnboundedSender<ContactRecord>,
    delay: Duration,
}

impl ChannelStore {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ContactRecord>) {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ContactRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, delay }, rx)
    }
}

#[async_trait]
impl ContactStore for ChannelStore {
    async fn save_contact(&self, record: &ContactRecord) -> anyhow::Result<Uuid> {
        tokio::time::sleep(self.delay).await;
        self.tx.send(record.clone())?;
        Ok(record.id)
    }

    async fn list_contacts(&self, query: &ContactQuery) -> anyhow::Result<Page<ContactRecord>> {
        Ok(Page::paginate(Vec::new(), query.page, query.limit))
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _status: ContactStatus,
    ) -> anyhow::Result<Option<ContactRecord>> {
        Ok(None)
    }
}

/// Store whose saves always fail.
pub struct FailingStore;

#[async_trait]
impl ContactStore for FailingStore {
    async fn save_contact(&self, _record: &ContactRecord) -> anyhow::Result<Uuid> {
        anyhow::bail!("disk full")
    }

    async fn list_contacts(&self, query: &ContactQuery) -> anyhow::Result<Page<ContactRecord>> {
        Ok(Page::paginate(Vec::new(), query.page, query.limit))
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _status: ContactStatus,
    ) -> anyhow::Result<Option<ContactRecord>> {
        anyhow::bail!("disk full")
    }
}
