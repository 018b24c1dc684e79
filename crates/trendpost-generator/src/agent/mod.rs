//! Bounded ReAct loop in which the model drives search and image tools.

pub mod protocol;
pub mod tools;

use std::sync::Arc;

use trendpost_core::{GeneratedImage, Topic};
use trendpost_llm::{ChatMessage, ChatModel, ChatRequest};

use crate::error::GenerateError;
use crate::prompts::{agent_input, agent_system_prompt};
pub use protocol::{parse_step, AgentStep, FormatError};
pub use tools::{AgentTools, ToolOutcome};

const STOP_SEQUENCE: &str = "\nObservation:";

/// One tool invocation recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub tool: String,
    pub input: String,
    pub observation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRun {
    pub output: String,
    /// The first successful image, or the last failure if none succeeded.
    pub image: Option<GeneratedImage>,
    pub steps: Vec<TraceStep>,
}

pub struct ToolAgent {
    chat: Arc<dyn ChatModel>,
    tools: AgentTools,
    max_iterations: usize,
}

impl ToolAgent {
    #[must_use]
    pub fn new(chat: Arc<dyn ChatModel>, tools: AgentTools, max_iterations: usize) -> Self {
        Self {
            chat,
            tools,
            max_iterations,
        }
    }

    /// Runs the loop until the model gives a final answer.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Model`] if a model call fails.
    /// - [`GenerateError::IterationLimit`] after `max_iterations` turns without a final answer.
    pub async fn run(&self, topic: &Topic) -> Result<AgentRun, GenerateError> {
        let system = agent_system_prompt();
        let question = agent_input(topic.as_str());
        let mut scratchpad = String::new();
        let mut steps = Vec::new();
        let mut image: Option<GeneratedImage> = None;

        for iteration in 1..=self.max_iterations {
            let request = ChatRequest::new(vec![
                ChatMessage::system(system.as_str()),
                ChatMessage::user(format!("Question: {question}\nThought:{scratchpad}")),
            ])
            .with_stop(STOP_SEQUENCE);

            let reply = self.chat.complete(&request).await?.content;

            let observation = match parse_step(&reply) {
                Ok(AgentStep::Final { answer }) => {
                    tracing::info!(
                        topic = %topic,
                        iteration,
                        tool_calls = steps.len(),
                        "agent finished"
                    );
                    return Ok(AgentRun {
                        output: answer,
                        image,
                        steps,
                    });
                }
                Ok(AgentStep::Action { tool, input }) => {
                    tracing::info!(iteration, tool = %tool, input = %input, "agent tool call");
                    let outcome = self.tools.run(&tool, &input).await;
                    if let Some(produced) = outcome.image {
                        let keep_existing = image.as_ref().is_some_and(GeneratedImage::is_success);
                        if !keep_existing {
                            image = Some(produced);
                        }
                    }
                    steps.push(TraceStep {
                        tool,
                        input,
                        observation: outcome.observation.clone(),
                    });
                    outcome.observation
                }
                Err(feedback) => {
                    tracing::warn!(iteration, feedback = %feedback, "agent reply did not parse");
                    feedback.to_string()
                }
            };

            scratchpad.push_str(&reply);
            scratchpad.push_str("\nObservation: ");
            scratchpad.push_str(&observation);
            scratchpad.push_str("\nThought:");
        }

        tracing::warn!(
            topic = %topic,
            max_iterations = self.max_iterations,
            "agent hit iteration limit"
        );
        Err(GenerateError::IterationLimit(self.max_iterations))
    }
}

#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;
