//! Collaborator agent interfaces
//!
//! Each external agent the orchestrator talks to is modeled as a trait so
//! the pipeline can be wired with HTTP-backed clients in production and
//! hand-rolled mocks in tests. Trait methods are fallible; mapping a failure
//! to its documented degrade value is the caller's job, not the client's.

pub mod http;

use crate::models::{
    AnalysisReport, ContextChunk, EarningsRecord, MarketRecord, NewsItem, RetrievalHit,
    SynthesisResult, TranscriptionResult,
};
use crate::Result;

/// Price/volume/fundamentals for the tracked symbol universe.
#[async_trait::async_trait]
pub trait MarketDataAgent: Send + Sync {
    async fn fetch_tracked_stocks(&self) -> Result<Vec<MarketRecord>>;
}

/// Best-effort news and earnings scraping.
#[async_trait::async_trait]
pub trait ScrapingAgent: Send + Sync {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>>;
    async fn fetch_earnings(&self) -> Result<Vec<EarningsRecord>>;
}

/// Vector-similarity search over the indexed document store.
#[async_trait::async_trait]
pub trait RetrieverAgent: Send + Sync {
    async fn search(&self, query: &str, top_k: usize) -> Result<RetrievalHit>;
}

/// Narrative synthesis over query + context + market data.
#[async_trait::async_trait]
pub trait LanguageAgent: Send + Sync {
    async fn synthesize(
        &self,
        query: &str,
        context_chunks: &[ContextChunk],
        market_data: &[MarketRecord],
    ) -> Result<SynthesisResult>;
}

/// Speech-to-text and text-to-speech conversion.
#[async_trait::async_trait]
pub trait VoiceAgent: Send + Sync {
    /// Transcribe the audio referenced by an opaque handle (a server-side
    /// file path).
    async fn speech_to_text(&self, audio_file: &str) -> Result<TranscriptionResult>;

    /// Synthesize speech, returning a handle to the generated audio.
    async fn text_to_speech(&self, text: &str, lang: &str) -> Result<String>;
}

/// Derived statistics and insights over raw market records. Peer capability:
/// exposed on the API surface, not part of the request pipeline.
#[async_trait::async_trait]
pub trait AnalysisAgent: Send + Sync {
    async fn comprehensive_analysis(
        &self,
        market_data: &[MarketRecord],
    ) -> Result<AnalysisReport>;
}
