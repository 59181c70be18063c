//! Shared test helpers: a scripted provider and canned documents.

use arise_core::document::DocumentSource;
use arise_core::error::{DocumentError, ProviderError};
use arise_core::message::{Message, MessageToolCall};
use arise_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A provider that replays scripted outcomes in order and records every
/// request it receives. Once the script is exhausted it fails.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(text_response(t))).collect())
    }

    /// Sleep before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        next.unwrap_or_else(|| {
            Err(ProviderError::ApiError {
                status_code: 500,
                message: "script exhausted".into(),
            })
        })
    }
}

pub fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

pub fn call_response(name: &str, arguments: &str) -> ProviderResponse {
    let mut message = Message::assistant("");
    message.tool_calls = vec![MessageToolCall {
        id: format!("call_{name}"),
        name: name.into(),
        arguments: arguments.into(),
    }];
    ProviderResponse {
        message,
        usage: None,
        model: "mock-model".into(),
    }
}

/// An in-memory document collection. `None` = the collection is missing.
pub struct StaticDocuments {
    docs: Option<Vec<(String, Option<String>)>>,
}

impl StaticDocuments {
    pub fn new(docs: &[(&str, &str)]) -> Self {
        Self {
            docs: Some(
                docs.iter()
                    .map(|(n, t)| (n.to_string(), Some(t.to_string())))
                    .collect(),
            ),
        }
    }

    pub fn missing() -> Self {
        Self { docs: None }
    }

    /// Add a document whose type is not extractable.
    pub fn with_skipped(mut self, name: &str) -> Self {
        if let Some(docs) = self.docs.as_mut() {
            docs.push((name.to_string(), None));
        }
        self
    }
}

#[async_trait::async_trait]
impl DocumentSource for StaticDocuments {
    async fn list(&self) -> Result<Vec<String>, DocumentError> {
        match &self.docs {
            Some(docs) => Ok(docs.iter().map(|(n, _)| n.clone()).collect()),
            None => Err(DocumentError::CollectionMissing("docs".into())),
        }
    }

    async fn read_text(&self, filename: &str) -> Result<Option<String>, DocumentError> {
        let docs = self
            .docs
            .as_ref()
            .ok_or_else(|| DocumentError::CollectionMissing("docs".into()))?;
        docs.iter()
            .find(|(n, _)| n == filename)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| DocumentError::Unreadable {
                filename: filename.into(),
                reason: "not found".into(),
            })
    }
}
