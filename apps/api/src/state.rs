use std::sync::Arc;

use crate::documents::TextExtractor;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `GroqClient`.
    pub completions: Arc<dyn CompletionProvider>,
    /// Rubric text extraction. Default: `DocumentExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}
