//! Orchestrator configuration
//!
//! Collaborator addresses, per-call timeouts, and pipeline thresholds are
//! injected into the orchestrator at construction time rather than read from
//! globals. `from_env` provides the conventional deployment path; tests build
//! the struct directly.

use std::env;
use std::time::Duration;

/// Base URL per collaborator agent. Defaults match the local multi-service
/// layout (one agent per port, 8001-8006).
#[derive(Debug, Clone)]
pub struct AgentEndpoints {
    pub market: String,
    pub scraping: String,
    pub retriever: String,
    pub analysis: String,
    pub language: String,
    pub voice: String,
}

impl Default for AgentEndpoints {
    fn default() -> Self {
        Self {
            market: "http://localhost:8001".to_string(),
            scraping: "http://localhost:8002".to_string(),
            retriever: "http://localhost:8003".to_string(),
            analysis: "http://localhost:8004".to_string(),
            language: "http://localhost:8005".to_string(),
            voice: "http://localhost:8006".to_string(),
        }
    }
}

/// Per-call timeouts. There is deliberately no end-to-end budget: each
/// outbound call is bounded individually and a slow-but-responding
/// collaborator lengthens the whole request.
#[derive(Debug, Clone)]
pub struct AgentTimeouts {
    /// Market data and analysis calls.
    pub default: Duration,
    /// News and earnings scraping calls.
    pub scraping: Duration,
    /// Retrieval, synthesis and voice (STT/TTS) calls, the slow paths.
    pub long: Duration,
}

impl Default for AgentTimeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(5),
            scraping: Duration::from_secs(10),
            long: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub endpoints: AgentEndpoints,
    pub timeouts: AgentTimeouts,
    /// Below this the displayed text is swapped for a clarification prompt
    /// (strict less-than; the numeric confidence is reported unchanged).
    pub confidence_threshold: f64,
    /// Chunk count requested from the retriever.
    pub retrieval_top_k: usize,
    /// Language code for text-to-speech.
    pub voice_language: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            endpoints: AgentEndpoints::default(),
            timeouts: AgentTimeouts::default(),
            confidence_threshold: 0.7,
            retrieval_top_k: 5,
            voice_language: "en".to_string(),
        }
    }
}

fn env_url(key: &str, default: &str) -> String {
    env::var(key)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| default.to_string())
}

impl OrchestratorConfig {
    /// Load from environment variables, falling back to the local defaults.
    pub fn from_env() -> Self {
        let defaults = AgentEndpoints::default();
        let endpoints = AgentEndpoints {
            market: env_url("MARKET_AGENT_URL", &defaults.market),
            scraping: env_url("SCRAPING_AGENT_URL", &defaults.scraping),
            retriever: env_url("RETRIEVER_AGENT_URL", &defaults.retriever),
            analysis: env_url("ANALYSIS_AGENT_URL", &defaults.analysis),
            language: env_url("LANGUAGE_AGENT_URL", &defaults.language),
            voice: env_url("VOICE_AGENT_URL", &defaults.voice),
        };

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.7);

        let retrieval_top_k = env::var("RETRIEVAL_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let voice_language = env::var("VOICE_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        Self {
            endpoints,
            timeouts: AgentTimeouts::default(),
            confidence_threshold,
            retrieval_top_k,
            voice_language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.endpoints.market, "http://localhost:8001");
        assert_eq!(config.endpoints.voice, "http://localhost:8006");
        assert_eq!(config.confidence_threshold, 0.7);
        assert_eq!(config.retrieval_top_k, 5);
    }

    #[test]
    fn test_timeout_ordering() {
        let timeouts = AgentTimeouts::default();
        assert!(timeouts.default < timeouts.scraping);
        assert!(timeouts.scraping < timeouts.long);
    }
}
