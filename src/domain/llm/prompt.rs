//! Fixed prompts for the term explanation exchange

use super::Message;

const SYSTEM_INSTRUCTION: &str = "You are an expert explainer of AI terminology. \
Explain AI terms in plain, accessible language and use vivid analogies. \
Keep the explanation concise so that a non-specialist can follow it.";

/// Build the two-message exchange for a term
pub fn explanation_messages(term: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_INSTRUCTION),
        Message::user(format!("Explain this AI term in plain language: {}", term)),
    ]
}
