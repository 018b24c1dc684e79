//! Parsing of ReAct-style model replies.

use std::sync::LazyLock;

use regex::Regex;

static FINAL_ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Final Answer\s*:\s*(.*)$").expect("valid regex"));

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*:\s*(.*?)\s*\n\s*Action\s*Input\s*:\s*(.*)").expect("valid regex")
});

static ACTION_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Action\s*:").expect("valid regex"));

/// One parsed model turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    Final { answer: String },
    Action { tool: String, input: String },
}

/// The reply did not follow the expected format. The message is fed back to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatError(pub &'static str);

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

const BOTH_PRESENT: &str = "Invalid Format: your reply contained both a final answer and an \
action. Reply with either an Action and Action Input, or a Final Answer.";
const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";

fn clean_input(raw: &str) -> String {
    // Models sometimes keep writing past the stop sequence.
    let raw = raw.split("\nObservation").next().unwrap_or(raw);
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

/// Parses one model reply into an action or a final answer.
///
/// # Errors
///
/// Returns a [`FormatError`] describing what was missing or ambiguous.
pub fn parse_step(text: &str) -> Result<AgentStep, FormatError> {
    let action = ACTION_RE.captures(text);
    let final_answer = FINAL_ANSWER_RE.captures(text);

    match (action, final_answer) {
        (Some(_), Some(_)) => Err(FormatError(BOTH_PRESENT)),
        (Some(caps), None) => {
            let tool = caps[1].trim().trim_matches('"').to_string();
            if tool.is_empty() {
                return Err(FormatError(MISSING_ACTION));
            }
            Ok(AgentStep::Action {
                tool,
                input: clean_input(&caps[2]),
            })
        }
        (None, Some(caps)) => Ok(AgentStep::Final {
            answer: caps[1].trim().to_string(),
        }),
        (None, None) if ACTION_ONLY_RE.is_match(text) => Err(FormatError(MISSING_ACTION_INPUT)),
        (None, None) => Err(FormatError(MISSING_ACTION)),
    }
}
