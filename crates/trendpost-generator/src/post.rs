use std::sync::Arc;

use trendpost_core::Topic;
use trendpost_llm::{ChatCompletion, ChatMessage, ChatModel, ChatRequest, LlmError};
use trendpost_sources::AggregatedContent;

use crate::prompts::{post_user_prompt, POST_SYSTEM_PROMPT};

/// Drafts a post from aggregated source content with one model call.
#[derive(Clone)]
pub struct PostGenerator {
    chat: Arc<dyn ChatModel>,
}

impl PostGenerator {
    #[must_use]
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// # Errors
    ///
    /// Propagates any [`LlmError`] from the model; there is no retry.
    pub async fn generate(
        &self,
        topic: &Topic,
        content: &AggregatedContent,
    ) -> Result<ChatCompletion, LlmError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(POST_SYSTEM_PROMPT),
            ChatMessage::user(post_user_prompt(topic.as_str(), &content.text)),
        ]);
        let completion = self.chat.complete(&request).await?;
        tracing::info!(
            topic = %topic,
            chars = completion.content.len(),
            model = completion.model.as_deref().unwrap_or("unknown"),
            "post drafted"
        );
        Ok(completion)
    }
}
