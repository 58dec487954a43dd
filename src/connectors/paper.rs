// src/connectors/paper.rs
//
// Paper-mode collaborators: deterministic, in-process stand-ins for the
// external market-data, news and inference services. They let the binary and
// the integration tests exercise the full pipeline without any network or
// model runtime.

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use tracing::debug;

use crate::connectors::traits::{MarketDataSource, NewsSource, SentimentClassifier};
use crate::types::{Candle, SentimentLabel, SentimentReading, Timeframe};
use crate::utils::symbols::canonical_coin;

/// Synthetic OHLC history. The walk is seeded from the symbol bytes, so each
/// coin gets its own price level and drift and repeated calls are identical.
pub struct PaperMarketData;

#[async_trait]
impl MarketDataSource for PaperMarketData {
    async fn price_series(
        &self,
        coin: &str,
        timeframe: Timeframe,
        bars: usize,
    ) -> Result<Vec<Candle>> {
        Ok(synthetic_series(coin, timeframe, bars))
    }
}

fn symbol_seed(coin: &str) -> u64 {
    coin.bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
}

pub(crate) fn synthetic_series(coin: &str, timeframe: Timeframe, bars: usize) -> Vec<Candle> {
    let seed = symbol_seed(&canonical_coin(coin));
    let base = 50.0 + (seed % 40_000) as f64;
    // Some symbols trend up, some down, some drift sideways.
    let drift = ((seed % 7) as f64 - 3.0) * 0.002;
    let step = timeframe.duration_secs() as i64;

    let mut close = base;
    let mut series = Vec::with_capacity(bars);
    for i in 0..bars {
        let open = close;
        let wave = (i as f64 * 0.8).sin() * base * 0.01;
        close = (close + base * drift + wave).max(1.0);
        series.push(Candle {
            timestamp: DateTime::from_timestamp(i as i64 * step, 0).unwrap_or_default(),
            open,
            high: open.max(close) * 1.002,
            low: open.min(close) * 0.998,
            close,
        });
    }
    debug!(%coin, bars = series.len(), base, drift, "generated paper series");
    series
}

/// Canned per-coin coverage. Every article is long enough to pass the
/// sentiment length gate.
pub struct PaperNewsDesk;

#[async_trait]
impl NewsSource for PaperNewsDesk {
    async fn latest_article(&self, coin: &str) -> Result<String> {
        let text = match canonical_coin(coin).as_str() {
            "BTC" => {
                "Bitcoin extends its rally as spot ETF inflows hit a weekly \
                 record and long-dormant wallets signal accumulation."
            }
            "ETH" => {
                "Ethereum upgrade ships on schedule; staking participation \
                 climbs to a record while network fees stay subdued."
            }
            "BNB" => {
                "Exchange token slides after regulators open a fresh lawsuit \
                 into the platform's listing practices."
            }
            "SOL" => {
                "Network suffers a brief outage overnight; validators restart \
                 the chain while core developers downplay the impact."
            }
            "ADA" => {
                "Cardano ecosystem reports steady growth in new partnership \
                 deals and on-chain activity over the quarter."
            }
            _ => {
                "No coin-specific coverage found today; the broader crypto \
                 market trades sideways on thin volume."
            }
        };
        Ok(text.to_string())
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "rally",
    "record",
    "surge",
    "upgrade",
    "partnership",
    "growth",
    "adoption",
    "accumulation",
    "climbs",
];

const NEGATIVE_WORDS: &[&str] = &[
    "lawsuit", "outage", "hack", "ban", "selloff", "slides", "crash", "suffers",
];

/// Keyword-polarity classifier standing in for the external inference
/// service. Confidence mimics a 3-way softmax maximum: 0.5 for a mixed read,
/// approaching 0.99 as the polarity becomes one-sided.
pub struct LexiconClassifier;

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentReading> {
        let lower = text.to_lowercase();
        let pos = POSITIVE_WORDS.iter().filter(|&&w| lower.contains(w)).count() as f64;
        let neg = NEGATIVE_WORDS.iter().filter(|&&w| lower.contains(w)).count() as f64;
        let total = pos + neg;

        let reading = if total == 0.0 {
            SentimentReading {
                label: SentimentLabel::Neutral,
                confidence: 0.72,
                skipped: false,
            }
        } else {
            let balance = (pos - neg) / total;
            let label = if balance > 0.0 {
                SentimentLabel::Positive
            } else if balance < 0.0 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            SentimentReading {
                label,
                confidence: (0.5 + 0.49 * balance.abs()).min(0.99),
                skipped: false,
            }
        };
        debug!(pos, neg, label = %reading.label, confidence = reading.confidence, "lexicon classification");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_series_is_deterministic_per_symbol() {
        let source = PaperMarketData;
        let a = source.price_series("BTC", Timeframe::H4, 80).await.unwrap();
        let b = source.price_series("BTC", Timeframe::H4, 80).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 80);

        let eth = source.price_series("ETH", Timeframe::H4, 80).await.unwrap();
        assert_ne!(a, eth);
    }

    #[test]
    fn test_series_is_ascending_without_duplicates() {
        let series = synthetic_series("SOL", Timeframe::H1, 60);
        for pair in series.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for bar in &series {
            assert!(bar.high >= bar.low);
            assert!(bar.close > 0.0);
        }
    }

    #[tokio::test]
    async fn test_articles_pass_length_gate() {
        let desk = PaperNewsDesk;
        for coin in ["BTC", "ETH", "BNB", "SOL", "ADA", "XRP"] {
            let text = desk.latest_article(coin).await.unwrap();
            assert!(text.trim().chars().count() >= 30, "{coin} article too short");
        }
    }

    #[tokio::test]
    async fn test_lexicon_polarity() {
        let classifier = LexiconClassifier;
        let bullish = classifier
            .classify("A record rally and fresh adoption lift the market")
            .await
            .unwrap();
        assert_eq!(bullish.label, SentimentLabel::Positive);
        assert!(bullish.confidence > 0.5);

        let bearish = classifier
            .classify("A lawsuit and an exchange hack trigger a selloff")
            .await
            .unwrap();
        assert_eq!(bearish.label, SentimentLabel::Negative);

        let neutral = classifier
            .classify("Markets closed unchanged in quiet trading")
            .await
            .unwrap();
        assert_eq!(neutral.label, SentimentLabel::Neutral);
        assert!(!neutral.skipped);
    }
}
