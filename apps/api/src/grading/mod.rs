// Assignment grading: prompt building, the completion call, and parsing the
// model's reply into per-criterion scores plus feedback.
// All completion calls go through llm_client::CompletionProvider.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod service;
