//! Main orchestrator - implements the request pipeline
//!
//! VOICE IN? → MARKET → CLASSIFY/SCRAPE → RETRIEVE → FUSE → SYNTHESIZE →
//! BOOST → VOICE OUT? → CLARIFY? → RESPOND
//!
//! Steps run strictly in sequence; each outbound call is a suspend point and
//! independent requests multiplex on the runtime. Every collaborator failure
//! degrades to a documented default so the pipeline always produces a
//! response, and anything that still escapes is converted into a
//! status=error response at the top level.

use crate::agents::{LanguageAgent, MarketDataAgent, RetrieverAgent, ScrapingAgent, VoiceAgent};
use crate::classifier;
use crate::confidence::{self, CLARIFICATION_MESSAGE};
use crate::config::OrchestratorConfig;
use crate::fusion::fuse_context;
use crate::models::{
    OrchestratorRequest, OrchestratorResponse, QueryMode, RetrievalHit, SynthesisResult,
};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Substituted as the query text when speech-to-text fails. Note this literal
/// then feeds keyword classification and retrieval search like any other
/// query text.
pub const VOICE_INPUT_ERROR_TEXT: &str = "Error processing voice input";

/// Degrade response when the language agent is unreachable.
pub const SYNTHESIS_ERROR_TEXT: &str = "Error connecting to language agent";

/// Coordinates the collaborator agents for one request at a time.
pub struct Orchestrator {
    market: Arc<dyn MarketDataAgent>,
    scraping: Arc<dyn ScrapingAgent>,
    retriever: Arc<dyn RetrieverAgent>,
    language: Arc<dyn LanguageAgent>,
    voice: Arc<dyn VoiceAgent>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        market: Arc<dyn MarketDataAgent>,
        scraping: Arc<dyn ScrapingAgent>,
        retriever: Arc<dyn RetrieverAgent>,
        language: Arc<dyn LanguageAgent>,
        voice: Arc<dyn VoiceAgent>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            market,
            scraping,
            retriever,
            language,
            voice,
            config,
        }
    }

    /// Process one request end to end. Never fails: pipeline errors are
    /// converted into a status=error response with confidence 0.0.
    pub async fn process_request(&self, request: OrchestratorRequest) -> OrchestratorResponse {
        let request_id = Uuid::new_v4();
        info!(
            request_id = %request_id,
            mode = %request.mode,
            "Orchestrator: processing request"
        );

        match self.run_pipeline(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Pipeline failed");
                OrchestratorResponse::error(e)
            }
        }
    }

    async fn run_pipeline(&self, request: &OrchestratorRequest) -> Result<OrchestratorResponse> {
        // === Step 1: voice input ===
        let query_text = self.resolve_query_text(request).await;

        // === Step 2: market data (unconditional) ===
        let market_data = match self.market.fetch_tracked_stocks().await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Market data fetch failed, continuing without it");
                Vec::new()
            }
        };
        debug!(records = market_data.len(), "Market data fetched");

        // === Step 3: keyword-gated scraping ===
        let intent = classifier::classify(&query_text);
        debug!(is_news = intent.is_news, is_earnings = intent.is_earnings, "Query classified");

        let news_data = if intent.is_news {
            match self.scraping.fetch_news().await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "News fetch failed, continuing without it");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let earnings_data = if intent.is_earnings {
            match self.scraping.fetch_earnings().await {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, "Earnings fetch failed, continuing without it");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        // === Step 4: retrieval ===
        let retrieval = match self
            .retriever
            .search(&query_text, self.config.retrieval_top_k)
            .await
        {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, "Context retrieval failed, continuing without it");
                RetrievalHit::default()
            }
        };
        debug!(chunks = retrieval.chunks.len(), "Context retrieved");

        // === Step 5: fusion ===
        let has_scraped_data = !news_data.is_empty() || !earnings_data.is_empty();
        let fused_context = fuse_context(retrieval.chunks, &news_data, &earnings_data);

        // === Step 6: synthesis ===
        let synthesis = match self
            .language
            .synthesize(&query_text, &fused_context, &market_data)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Synthesis failed, using degrade response");
                SynthesisResult {
                    response: SYNTHESIS_ERROR_TEXT.to_string(),
                    confidence: 0.0,
                }
            }
        };

        // === Step 7: confidence boost ===
        let final_confidence = confidence::boost(synthesis.confidence, has_scraped_data);
        let mut response_text = synthesis.response;

        // === Step 8: voice output ===
        let mut audio_file = if request.mode == QueryMode::Voice {
            self.try_text_to_speech(&response_text).await
        } else {
            None
        };

        // === Step 9: clarification floor ===
        // Swaps the displayed text only; the confidence value stays as
        // computed in step 7.
        if confidence::needs_clarification(final_confidence, self.config.confidence_threshold) {
            info!(
                confidence = final_confidence,
                threshold = self.config.confidence_threshold,
                "Confidence below threshold, substituting clarification prompt"
            );
            response_text = CLARIFICATION_MESSAGE.to_string();
            if request.mode == QueryMode::Voice {
                audio_file = self.try_text_to_speech(&response_text).await;
            }
        }

        // === Step 10: respond ===
        Ok(OrchestratorResponse::success(
            response_text,
            final_confidence,
            audio_file,
        ))
    }

    /// Resolve the effective query text. Voice mode takes it from speech
    /// transcription only; a missing audio handle yields an empty query.
    async fn resolve_query_text(&self, request: &OrchestratorRequest) -> String {
        match (request.mode, request.audio_file.as_deref()) {
            (QueryMode::Text, _) => request.query.clone(),
            (QueryMode::Voice, Some(handle)) => {
                match self.voice.speech_to_text(handle).await {
                    Ok(transcription) => {
                        debug!(
                            stt_confidence = transcription.confidence,
                            "Voice input transcribed"
                        );
                        transcription.text
                    }
                    Err(e) => {
                        warn!(error = %e, "Speech-to-text failed, substituting error text");
                        VOICE_INPUT_ERROR_TEXT.to_string()
                    }
                }
            }
            (QueryMode::Voice, None) => {
                warn!("Voice mode without audio handle, proceeding with empty query");
                String::new()
            }
        }
    }

    async fn try_text_to_speech(&self, text: &str) -> Option<String> {
        match self
            .voice
            .text_to_speech(text, &self.config.voice_language)
            .await
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Text-to-speech failed, continuing without audio");
                None
            }
        }
    }
}
