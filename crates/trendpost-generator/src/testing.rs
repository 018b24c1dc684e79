//! In-process fakes for the model and search seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use trendpost_core::{GeneratedImage, MemoryStore, TtlStore};
use trendpost_llm::{ChatCompletion, ChatModel, ChatRequest, ImageData, ImageModel, LlmError};
use trendpost_sources::{SourceError, WebSearch};

/// Replies with scripted text in order; repeats the last reply once exhausted.
pub(crate) struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    last: Mutex<Option<String>>,
    pub(crate) requests: Mutex<Vec<ChatRequest>>,
    pub(crate) calls: AtomicUsize,
}

impl ScriptedChat {
    pub(crate) fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|s| Ok(s.into())).collect()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        let chat = Self::new(Vec::<String>::new());
        chat.replies
            .lock()
            .unwrap()
            .push_back(Err(LlmError::EmptyResponse("openrouter")));
        chat
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let content = match next {
            Some(Ok(text)) => {
                *self.last.lock().unwrap() = Some(text.clone());
                text
            }
            Some(Err(e)) => return Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or(LlmError::EmptyResponse("openrouter"))?,
        };
        Ok(ChatCompletion {
            content,
            model: Some("fake/model".to_string()),
            finish_reason: Some("stop".to_string()),
        })
    }
}

pub(crate) enum ImageReply {
    Data(Vec<ImageData>),
    /// Hosted URL derived from the prompt, so different prompts give different images.
    EchoPrompt,
    Error,
}

pub(crate) struct FakeImages {
    reply: ImageReply,
    pub(crate) prompts: Mutex<Vec<String>>,
}

impl FakeImages {
    pub(crate) fn base64(payload: &str) -> Arc<Self> {
        Self::with(ImageReply::Data(vec![ImageData {
            b64_json: Some(payload.to_string()),
            url: None,
        }]))
    }

    pub(crate) fn with(reply: ImageReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageModel for FakeImages {
    async fn generate(&self, prompt: &str) -> Result<Vec<ImageData>, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            ImageReply::Data(data) => Ok(data.clone()),
            ImageReply::EchoPrompt => Ok(vec![ImageData {
                b64_json: None,
                url: Some(format!("https://img.test/{}", prompt.replace(' ', "-"))),
            }]),
            ImageReply::Error => Err(LlmError::UnexpectedStatus {
                service: "together",
                status: 500,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

pub(crate) struct FakeSearch {
    result: Result<String, ()>,
    pub(crate) queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub(crate) fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(text.to_string()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Err(()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl WebSearch for FakeSearch {
    async fn search(&self, query: &str) -> Result<String, SourceError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.result
            .clone()
            .map_err(|()| SourceError::UnexpectedStatus {
                source_name: "google",
                status: 403,
            })
    }
}

pub(crate) fn image_cache() -> Arc<dyn TtlStore<GeneratedImage>> {
    Arc::new(MemoryStore::new(Duration::from_secs(1800)))
}

pub(crate) fn search_cache() -> Arc<dyn TtlStore<String>> {
    Arc::new(MemoryStore::new(Duration::from_secs(1800)))
}
