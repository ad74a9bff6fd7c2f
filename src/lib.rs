//! Market Brief Orchestrator
//!
//! Coordinating service for a multi-agent financial assistant:
//! - Sequences calls to the market data, scraping, retriever, language and
//!   voice agents into one fixed pipeline per request
//! - Fuses retrieval-ranked context with scraped news/earnings data
//! - Applies a confidence boost for scraped data and a clarification floor
//! - Degrades every collaborator failure to a documented default so a
//!   response is always produced
//!
//! PIPELINE:
//! VOICE IN? → MARKET → CLASSIFY/SCRAPE → RETRIEVE → FUSE → SYNTHESIZE →
//! BOOST → VOICE OUT? → CLARIFY? → RESPOND

pub mod agents;
pub mod api;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod error;
pub mod fusion;
pub mod models;
pub mod orchestrator;

pub use error::Result;

// Re-export common types
pub use config::OrchestratorConfig;
pub use models::*;
pub use orchestrator::Orchestrator;
