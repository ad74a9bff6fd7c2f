//! Error types for the market brief orchestrator

use thiserror::Error;

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;

#[derive(Error, Debug)]
pub enum OrchestrationError {

    // =============================
    // Collaborator Errors
    // =============================

    #[error("Market data agent error: {0}")]
    MarketDataError(String),

    #[error("Scraping agent error: {0}")]
    ScrapingError(String),

    #[error("Retriever agent error: {0}")]
    RetrieverError(String),

    #[error("Language agent error: {0}")]
    LanguageError(String),

    #[error("Voice agent error: {0}")]
    VoiceError(String),

    #[error("Analysis agent error: {0}")]
    AnalysisError(String),

    // =============================
    // Pipeline Errors
    // =============================

    #[error("Unknown error: {0}")]
    Unknown(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
