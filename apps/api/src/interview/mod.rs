// Interview sessions: question generation and the upload / answer / next-question flow.
// All completion calls go through llm_client; nothing here talks to the API directly.

pub mod handlers;
pub mod prompts;
pub mod question_generator;
pub mod session;
