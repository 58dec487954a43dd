// src/connectors/traits.rs
use crate::types::{Candle, SentimentReading, Timeframe};
use anyhow::Result;
use async_trait::async_trait;

/// Supplies OHLC history for one instrument. Bars must come back ascending by
/// timestamp with no duplicates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn price_series(
        &self,
        coin: &str,
        timeframe: Timeframe,
        bars: usize,
    ) -> Result<Vec<Candle>>;
}

/// Supplies the latest article text for one instrument. May return empty or
/// non-English text; language handling is this collaborator's problem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn latest_article(&self, coin: &str) -> Result<String>;
}

/// Maps article text to a sentiment label plus the maximum class probability
/// of a 3-way softmax. Must be deterministic for the same text and model
/// version.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentReading>;
}
