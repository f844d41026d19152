use lazy_static::lazy_static;
use regex::Regex;

use super::prompt::CHAT_MARKER;
use crate::error::{VoxError, VoxResult};
use crate::registry::{CommandRegistry, Invocation};

lazy_static! {
    static ref CODE_BLOCK_RE: Regex = Regex::new(r"^```[A-Za-z]*\s*([^`]*?)\s*```$").unwrap();
}

/// What the model said, classified by the chat marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelResponse {
    Chat(String),
    CommandSuggestion { line: String, invocation: Invocation },
}

/// Classify raw model text. Anything that is neither a chat answer nor a
/// single parseable registry command is `Malformed` and never executed.
pub fn classify(raw: &str, registry: &CommandRegistry) -> VoxResult<ModelResponse> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(VoxError::malformed("the model returned an empty response"));
    }

    if let Some(answer) = text.strip_prefix(CHAT_MARKER) {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(VoxError::malformed("chat response has no content"));
        }
        return Ok(ModelResponse::Chat(answer.to_string()));
    }

    let line = clean_command_output(text);
    let mut lines = line.lines().map(str::trim).filter(|l| !l.is_empty());
    let line = match (lines.next(), lines.next()) {
        (Some(line), None) => line.to_string(),
        (None, _) => return Err(VoxError::malformed("the model returned an empty command")),
        (Some(_), Some(_)) => {
            return Err(VoxError::malformed(format!(
                "expected a single command line, got:\n{}",
                text
            )))
        }
    };

    let invocation = registry
        .parse_line(&line)
        .map_err(|e| VoxError::malformed(format!("'{}' is not a valid command: {}", line, e)))?;
    Ok(ModelResponse::CommandSuggestion { line, invocation })
}

fn clean_command_output(output: &str) -> &str {
    if let Some(command) = CODE_BLOCK_RE.captures(output).and_then(|c| c.get(1)) {
        return command.as_str();
    }
    match output.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        Some(inner) if !inner.contains('`') => inner.trim(),
        _ => output,
    }
}
