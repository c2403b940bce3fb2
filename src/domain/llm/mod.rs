//! Completion domain - messages, prompts and the client contract

mod explanation;
mod message;
mod prompt;
mod provider;

pub use explanation::ExplanationResult;
pub use message::{Message, MessageRole};
pub use prompt::explanation_messages;
pub use provider::CompletionClient;

#[cfg(test)]
pub use provider::mock::MockCompletionClient;
