//! HTTP clients for the chat-completion router (OpenRouter) and the image
//! generation API (Together AI).
//!
//! Both sit behind object-safe traits, [`ChatModel`] and [`ImageModel`], so the
//! generator can be exercised against in-process fakes.

pub mod chat;
pub mod error;
pub mod image;

mod http;

pub use chat::{ChatCompletion, ChatMessage, ChatModel, ChatRequest, OpenRouterClient, Role};
pub use error::LlmError;
pub use image::{ImageData, ImageModel, TogetherImageClient};
