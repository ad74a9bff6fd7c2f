//! HTTP-backed collaborator clients
//!
//! All clients share one long-lived, connection-pooled `reqwest::Client`;
//! timeouts are applied per request since the collaborators have different
//! latency profiles (scraping and audio work are the slow paths).

use crate::agents::{
    AnalysisAgent, LanguageAgent, MarketDataAgent, RetrieverAgent, ScrapingAgent, VoiceAgent,
};
use crate::error::OrchestrationError;
use crate::models::{
    AnalysisReport, ContextChunk, EarningsRecord, MarketRecord, NewsItem, RetrievalHit,
    SynthesisResult, TranscriptionResult,
};
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Build the shared pooled HTTP client.
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .build()?;
    Ok(client)
}

/// `{data: [...], status: "..."}` envelope used by the market data and
/// scraping agents. The status field is informational and ignored.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("{}: {}", status, body)
}

//
// ================= Market Data =================
//

pub struct MarketDataClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl MarketDataClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl MarketDataAgent for MarketDataClient {
    async fn fetch_tracked_stocks(&self) -> Result<Vec<MarketRecord>> {
        let url = format!("{}/asia_tech_stocks", self.base_url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::MarketDataError(
                read_error_body(response).await,
            ));
        }

        let envelope: DataEnvelope<MarketRecord> = response.json().await?;
        Ok(envelope.data)
    }
}

//
// ================= Scraping =================
//

pub struct ScrapingClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ScrapingClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::ScrapingError(
                read_error_body(response).await,
            ));
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl ScrapingAgent for ScrapingClient {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>> {
        self.fetch("/scrape_news").await
    }

    async fn fetch_earnings(&self) -> Result<Vec<EarningsRecord>> {
        self.fetch("/scrape_earnings").await
    }
}

//
// ================= Retriever =================
//

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

pub struct RetrieverClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RetrieverClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl RetrieverAgent for RetrieverClient {
    async fn search(&self, query: &str, top_k: usize) -> Result<RetrievalHit> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&SearchRequest { query, top_k })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::RetrieverError(
                read_error_body(response).await,
            ));
        }

        let hit: RetrievalHit = response.json().await?;
        Ok(hit)
    }
}

//
// ================= Language =================
//

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    query: &'a str,
    context_chunks: &'a [ContextChunk],
    market_data: &'a [MarketRecord],
}

pub struct LanguageClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl LanguageClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl LanguageAgent for LanguageClient {
    async fn synthesize(
        &self,
        query: &str,
        context_chunks: &[ContextChunk],
        market_data: &[MarketRecord],
    ) -> Result<SynthesisResult> {
        let url = format!("{}/synthesize", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&SynthesisRequest {
                query,
                context_chunks,
                market_data,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::LanguageError(
                read_error_body(response).await,
            ));
        }

        let result: SynthesisResult = response.json().await?;
        Ok(result)
    }
}

//
// ================= Voice =================
//

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    #[serde(default)]
    audio_file: Option<String>,
}

pub struct VoiceClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl VoiceClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl VoiceAgent for VoiceClient {
    async fn speech_to_text(&self, audio_file: &str) -> Result<TranscriptionResult> {
        let url = format!("{}/speech_to_text", self.base_url);

        let audio_bytes = tokio::fs::read(audio_file).await?;
        let part = reqwest::multipart::Part::bytes(audio_bytes)
            .file_name(audio_file.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::VoiceError(
                read_error_body(response).await,
            ));
        }

        let result: TranscriptionResult = response.json().await?;
        Ok(result)
    }

    async fn text_to_speech(&self, text: &str, lang: &str) -> Result<String> {
        let url = format!("{}/text_to_speech", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&TtsRequest { text, lang })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::VoiceError(
                read_error_body(response).await,
            ));
        }

        let result: TtsResponse = response.json().await?;
        result.audio_file.ok_or_else(|| {
            OrchestrationError::VoiceError("TTS response missing audio_file".to_string())
        })
    }
}

//
// ================= Analysis =================
//

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    market_data: &'a [MarketRecord],
    analysis_type: &'a str,
}

pub struct AnalysisClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(client: Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl AnalysisAgent for AnalysisClient {
    async fn comprehensive_analysis(
        &self,
        market_data: &[MarketRecord],
    ) -> Result<AnalysisReport> {
        let url = format!("{}/comprehensive_analysis", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&AnalysisRequest {
                market_data,
                analysis_type: "comprehensive",
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OrchestrationError::AnalysisError(
                read_error_body(response).await,
            ));
        }

        let report: AnalysisReport = response.json().await?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_serialization() {
        let request = SearchRequest {
            query: "Asia tech exposure",
            top_k: 5,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "Asia tech exposure");
        assert_eq!(json["top_k"], 5);
    }

    #[test]
    fn test_synthesis_request_serialization() {
        let chunks = vec![ContextChunk::new("TSMC beat estimates", "earnings_report")];
        let market = vec![MarketRecord {
            symbol: Some("TSM".to_string()),
            current_price: Some(98.2),
            ..Default::default()
        }];

        let request = SynthesisRequest {
            query: "morning brief",
            context_chunks: &chunks,
            market_data: &market,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["context_chunks"][0]["source"], "earnings_report");
        assert_eq!(json["market_data"][0]["symbol"], "TSM");
    }

    #[test]
    fn test_data_envelope_ignores_status() {
        let envelope: DataEnvelope<NewsItem> = serde_json::from_str(
            r#"{"data": [{"title": "Chip rally"}], "status": "success"}"#,
        )
        .unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].title.as_deref(), Some("Chip rally"));
    }

    #[test]
    fn test_tts_response_missing_handle() {
        let response: TtsResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(response.audio_file.is_none());
    }
}
