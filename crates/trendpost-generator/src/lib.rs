//! Post and image generation for trendpost.
//!
//! Two interchangeable [`PostStrategy`] implementations turn a niche into a
//! post plus image:
//!
//! - [`PipelineStrategy`]: aggregate sources, one post call, then the image step.
//! - [`AgentStrategy`]: the model drives a bounded search/image tool loop.
//!
//! [`build_strategy`] wires either one from [`trendpost_core::AppConfig`].

pub mod agent;
pub mod error;
pub mod image;
pub mod post;
pub mod prompts;
pub mod strategy;
pub mod wiring;

#[cfg(test)]
mod testing;

pub use agent::{AgentRun, AgentTools, ToolAgent, ToolOutcome, TraceStep};
pub use error::GenerateError;
pub use image::{normalize_image_data, ImageGenerator};
pub use post::PostGenerator;
pub use strategy::{AgentStrategy, PipelineStrategy, PostStrategy};
pub use wiring::{build_image_generator, build_strategy, missing_credentials, Caches};
