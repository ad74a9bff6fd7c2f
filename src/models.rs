//! Core data models for the market brief orchestrator
//!
//! Collaborator payloads are loosely typed upstream; every field that may be
//! absent on the wire is an explicit `Option` with a documented default, so a
//! missing field never crashes a downstream consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Text,
    Voice,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

//
// ================= Request / Response =================
//

/// Incoming user request. Immutable once created, discarded after the
/// response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub mode: QueryMode,
    /// Opaque audio reference (server-side file path) for voice mode.
    #[serde(default)]
    pub audio_file: Option<String>,
}

/// Final pipeline output for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrchestratorResponse {
    pub response: String,
    pub confidence: f64,
    pub audio_file: Option<String>,
    pub status: ResponseStatus,
}

impl OrchestratorResponse {
    pub fn success(response: String, confidence: f64, audio_file: Option<String>) -> Self {
        Self {
            response,
            confidence,
            audio_file,
            status: ResponseStatus::Success,
        }
    }

    /// Top-level failure conversion: confidence pinned to 0.0 and the error
    /// message embedded in the response text.
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            response: format!("Error processing request: {}", message),
            confidence: 0.0,
            audio_file: None,
            status: ResponseStatus::Error,
        }
    }
}

//
// ================= Context =================
//

/// A grounding snippet with a source tag. Duplicates are permitted and never
/// deduplicated; list order is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextChunk {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: String,
}

impl ContextChunk {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Retrieval output: ranked chunks plus their similarity scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalHit {
    #[serde(default)]
    pub chunks: Vec<ContextChunk>,
    #[serde(default)]
    pub scores: Vec<f64>,
}

//
// ================= Market Data =================
//

/// One tracked stock. Upstream emits a loose mapping; unknown fields are
/// preserved in `extra` and missing fields read as zero/empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

//
// ================= Scraped Data =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsRecord {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub actual: Option<f64>,
}

//
// ================= Synthesis =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub confidence: f64,
}

//
// ================= Voice =================
//

/// Speech-to-text output. The pipeline consumes only the text; the STT
/// confidence is logged for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
}

//
// ================= Analysis =================
//

/// Peer-capability analysis report, passed through the API untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub analysis: serde_json::Value,
    #[serde(default)]
    pub metrics: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryMode::Text => "text",
            QueryMode::Voice => "voice",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_record_tolerates_missing_fields() {
        let record: MarketRecord = serde_json::from_str(r#"{"symbol": "TSM"}"#).unwrap();
        assert_eq!(record.symbol.as_deref(), Some("TSM"));
        assert_eq!(record.current_price, None);
        assert_eq!(record.volume, None);
    }

    #[test]
    fn test_market_record_preserves_unknown_fields() {
        let record: MarketRecord =
            serde_json::from_str(r#"{"symbol": "TSM", "pe_ratio": 24.5}"#).unwrap();
        assert_eq!(record.extra.get("pe_ratio").and_then(|v| v.as_f64()), Some(24.5));
    }

    #[test]
    fn test_request_defaults() {
        let request: OrchestratorRequest =
            serde_json::from_str(r#"{"query": "market brief"}"#).unwrap();
        assert_eq!(request.mode, QueryMode::Text);
        assert!(request.audio_file.is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let response = OrchestratorResponse::error("connection refused");
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.confidence, 0.0);
        assert!(response.response.contains("connection refused"));
        assert!(response.audio_file.is_none());
    }
}
