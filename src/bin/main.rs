use market_brief_orchestrator::{
    agents::http::{
        build_http_client, AnalysisClient, LanguageClient, MarketDataClient, RetrieverClient,
        ScrapingClient, VoiceClient,
    },
    api::start_server,
    config::OrchestratorConfig,
    orchestrator::Orchestrator,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = OrchestratorConfig::from_env();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8000".to_string())
        .parse()?;

    info!("Market Brief Orchestrator - API Server");
    info!("Port: {}", api_port);
    info!("Collaborators: {:?}", config.endpoints);

    // One pooled HTTP client shared by every collaborator
    let client = build_http_client()?;

    let market = Arc::new(MarketDataClient::new(
        client.clone(),
        config.endpoints.market.clone(),
        config.timeouts.default,
    ));
    let scraping = Arc::new(ScrapingClient::new(
        client.clone(),
        config.endpoints.scraping.clone(),
        config.timeouts.scraping,
    ));
    let retriever = Arc::new(RetrieverClient::new(
        client.clone(),
        config.endpoints.retriever.clone(),
        config.timeouts.long,
    ));
    let language = Arc::new(LanguageClient::new(
        client.clone(),
        config.endpoints.language.clone(),
        config.timeouts.long,
    ));
    let voice = Arc::new(VoiceClient::new(
        client.clone(),
        config.endpoints.voice.clone(),
        config.timeouts.long,
    ));
    let analysis = Arc::new(AnalysisClient::new(
        client,
        config.endpoints.analysis.clone(),
        config.timeouts.default,
    ));

    let orchestrator = Arc::new(Orchestrator::new(
        market,
        scraping,
        retriever,
        language,
        voice,
        config,
    ));

    info!("Orchestrator initialized");
    info!("Starting API server...");

    start_server(orchestrator, analysis, api_port).await?;

    Ok(())
}
