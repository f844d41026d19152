//! Natural-language requests in, chat answers or confirmed commands out.
//!
//! The model's reply is classified into a chat answer (rendered, nothing
//! executed) or a command suggestion. Suggestions are parsed by the same
//! registry the command line uses, shown to the user, and only run after an
//! explicit "yes". Execution is in-process through the shared [`Executor`],
//! so a suggested command behaves exactly like a typed one.

mod prompt;
mod response;

use colored::*;
use log::{debug, info};

use crate::commands::Executor;
use crate::error::{VoxError, VoxResult};
use crate::llm::LLMClient;
use crate::registry::{CommandRegistry, BIN_NAME};
use crate::terminal::Console;

pub use prompt::{build_prompt, CHAT_MARKER};
pub use response::{classify, ModelResponse};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AskOutcome {
    /// A conversational answer was rendered.
    Answered,
    /// The user turned the suggested command down.
    Declined { command: String },
    /// The suggested command ran to completion.
    Executed { command: String },
}

pub struct Assistant<'a> {
    llm: &'a dyn LLMClient,
    registry: CommandRegistry,
    executor: &'a Executor,
}

impl<'a> Assistant<'a> {
    pub fn new(llm: &'a dyn LLMClient, registry: CommandRegistry, executor: &'a Executor) -> Self {
        Assistant {
            llm,
            registry,
            executor,
        }
    }

    pub async fn ask(&self, query: &str, console: &mut Console) -> VoxResult<AskOutcome> {
        let prompt = build_prompt(&self.registry, query);
        debug!("Prompt:\n{}", prompt);

        console.line(format!("Thinking with {}...", self.llm.model_name()).bright_blue())?;
        let raw = self.llm.complete(&prompt).await?;
        debug!("Raw model response: {:?}", raw);

        match classify(&raw, &self.registry)? {
            ModelResponse::Chat(answer) => {
                console.markdown(&answer)?;
                Ok(AskOutcome::Answered)
            }
            ModelResponse::CommandSuggestion { line, invocation } => {
                console.line("AI suggests this command:")?;
                console.line(format!("    {} {}", BIN_NAME, line).bright_green())?;

                if !console.confirm("Do you want to execute this command?")? {
                    console.line("Execution cancelled.")?;
                    return Ok(AskOutcome::Declined { command: line });
                }

                info!("Executing suggested command: {}", line);
                self.executor
                    .execute(&invocation, console)
                    .map_err(|e| match e {
                        VoxError::Cancelled => VoxError::Cancelled,
                        other => VoxError::ExecutionFailed {
                            command: line.clone(),
                            source: Box::new(other),
                        },
                    })?;
                Ok(AskOutcome::Executed { command: line })
            }
        }
    }
}
