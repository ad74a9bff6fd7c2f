//! Context fusion
//!
//! Combines retrieval-ranked chunks with chunks derived locally from scraped
//! news and earnings data into the single ordered list handed to the language
//! agent. Ordering is deterministic: retrieved chunks first (rank order
//! preserved), then news, then earnings. Duplicates are left alone and there
//! is no cap on the combined length.

use crate::models::{ContextChunk, EarningsRecord, NewsItem};

/// At most this many scraped items of each kind are folded into the context.
const MAX_SCRAPED_ITEMS: usize = 3;

pub const NEWS_SOURCE_TAG: &str = "scraped_news";
pub const EARNINGS_SOURCE_TAG: &str = "scraped_earnings";

/// Fuse retrieved chunks with scraped news/earnings into one ordered list.
pub fn fuse_context(
    retrieved: Vec<ContextChunk>,
    news: &[NewsItem],
    earnings: &[EarningsRecord],
) -> Vec<ContextChunk> {
    let mut fused = retrieved;

    for item in news.iter().take(MAX_SCRAPED_ITEMS) {
        fused.push(ContextChunk::new(format_news(item), NEWS_SOURCE_TAG));
    }

    for record in earnings.iter().take(MAX_SCRAPED_ITEMS) {
        fused.push(ContextChunk::new(format_earnings(record), EARNINGS_SOURCE_TAG));
    }

    fused
}

fn format_news(item: &NewsItem) -> String {
    format!(
        "Latest News - {}: {}",
        item.title.as_deref().unwrap_or(""),
        item.source.as_deref().unwrap_or(""),
    )
}

fn format_earnings(record: &EarningsRecord) -> String {
    format!(
        "Earnings Update - {}: Expected {}, Actual {}",
        record.company.as_deref().unwrap_or(""),
        record.estimate.unwrap_or(0.0),
        record.actual.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> ContextChunk {
        ContextChunk::new(text, "retrieved")
    }

    fn news(title: &str, source: &str) -> NewsItem {
        NewsItem {
            title: Some(title.to_string()),
            source: Some(source.to_string()),
            link: None,
        }
    }

    fn earnings(company: &str, estimate: f64, actual: f64) -> EarningsRecord {
        EarningsRecord {
            company: Some(company.to_string()),
            symbol: None,
            date: None,
            estimate: Some(estimate),
            actual: Some(actual),
        }
    }

    #[test]
    fn test_length_law() {
        let retrieved = vec![chunk("a"), chunk("b")];
        let news_items = vec![news("n1", "s1"), news("n2", "s2"), news("n3", "s3"), news("n4", "s4")];
        let earnings_records = vec![earnings("c1", 1.0, 1.1)];

        let fused = fuse_context(retrieved, &news_items, &earnings_records);
        // len(retrieved) + min(3, len(news)) + min(3, len(earnings))
        assert_eq!(fused.len(), 2 + 3 + 1);
    }

    #[test]
    fn test_ordering_retrieved_then_news_then_earnings() {
        let fused = fuse_context(
            vec![chunk("first"), chunk("second")],
            &[news("headline", "reuters")],
            &[earnings("TSMC", 1.5, 1.6)],
        );

        assert_eq!(fused[0].text, "first");
        assert_eq!(fused[1].text, "second");
        assert_eq!(fused[2].source, NEWS_SOURCE_TAG);
        assert_eq!(fused[3].source, EARNINGS_SOURCE_TAG);
    }

    #[test]
    fn test_news_format() {
        let fused = fuse_context(vec![], &[news("Chip demand rebounds", "Nikkei")], &[]);
        assert_eq!(fused[0].text, "Latest News - Chip demand rebounds: Nikkei");
    }

    #[test]
    fn test_earnings_format_with_defaults() {
        let record = EarningsRecord {
            company: Some("Samsung".to_string()),
            ..Default::default()
        };
        let fused = fuse_context(vec![], &[], &[record]);
        assert_eq!(fused[0].text, "Earnings Update - Samsung: Expected 0, Actual 0");
    }

    #[test]
    fn test_empty_inputs() {
        let fused = fuse_context(vec![], &[], &[]);
        assert!(fused.is_empty());
    }

    #[test]
    fn test_duplicates_preserved() {
        let fused = fuse_context(vec![chunk("same"), chunk("same")], &[], &[]);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0], fused[1]);
    }
}
