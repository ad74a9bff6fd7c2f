//! Query Intent Classifier
//!
//! Classifies a user query by keyword match to decide which scraped data
//! sources the pipeline should pull:
//! - News intent: fetch the latest headlines (e.g., "any breaking news on TSMC?")
//! - Earnings intent: fetch the earnings calendar (e.g., "how were quarterly results?")
//!
//! Both intents can fire for the same query; neither gates the rest of the
//! pipeline.

/// Static keyword lists — zero allocation
const NEWS_KEYWORDS: &[&str] = &[
    "news",
    "headlines",
    "latest",
    "breaking",
    "announcements",
    "reports",
];

const EARNINGS_KEYWORDS: &[&str] = &[
    "earnings",
    "quarterly",
    "results",
    "profit",
    "revenue",
    "eps",
];

/// Which scraped sources a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryIntent {
    pub is_news: bool,
    pub is_earnings: bool,
}

/// Classify a query by case-insensitive substring match against the fixed
/// keyword sets. Pure and stateless; empty text matches nothing.
pub fn classify(query: &str) -> QueryIntent {
    let lowered = query.to_lowercase();

    QueryIntent {
        is_news: NEWS_KEYWORDS.iter().any(|kw| lowered.contains(kw)),
        is_earnings: EARNINGS_KEYWORDS.iter().any(|kw| lowered.contains(kw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_queries() {
        let cases = vec![
            "What's the latest news on Asia tech?",
            "any BREAKING developments today?",
            "show me the headlines",
            "new announcements from Samsung",
        ];

        for c in cases {
            assert!(classify(c).is_news, "expected news intent for: {}", c);
        }
    }

    #[test]
    fn test_earnings_queries() {
        let cases = vec![
            "How did TSMC's earnings look?",
            "quarterly results for Samsung",
            "what is the expected EPS?",
            "revenue growth this quarter",
        ];

        for c in cases {
            assert!(classify(c).is_earnings, "expected earnings intent for: {}", c);
        }
    }

    #[test]
    fn test_both_intents_can_fire() {
        let intent = classify("latest news on quarterly earnings");
        assert!(intent.is_news);
        assert!(intent.is_earnings);
    }

    #[test]
    fn test_no_intent() {
        let cases = vec!["how is my portfolio doing?", "what is RSI?", "   ", ""];

        for c in cases {
            let intent = classify(c);
            assert!(!intent.is_news, "unexpected news intent for: {:?}", c);
            assert!(!intent.is_earnings, "unexpected earnings intent for: {:?}", c);
        }
    }

    #[test]
    fn test_substring_match() {
        // Keywords match anywhere in the string, including inside words.
        assert!(classify("renewscast").is_news);
        assert!(classify("nonprofit sector").is_earnings);
    }
}
