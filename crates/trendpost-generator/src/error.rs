use thiserror::Error;
use trendpost_llm::LlmError;
use trendpost_sources::{AggregateError, SourceError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    NoContent(#[from] AggregateError),

    #[error("model invocation failed: {0}")]
    Model(#[from] LlmError),

    #[error("agent stopped after {0} iterations without a final answer")]
    IterationLimit(usize),

    #[error("missing required API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("source setup failed: {0}")]
    SourceSetup(#[from] SourceError),
}
