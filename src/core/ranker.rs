// src/core/ranker.rs
use std::cmp::Ordering;

use tracing::debug;

use crate::analysis::technical;
use crate::config::AppConfig;
use crate::signal::{combiner, sizer};
use crate::types::{Bias, CoinInput, RankedResult};

/// Runs the full per-coin pipeline (technical read, combination, sizing) over
/// already-fetched inputs and ranks the outcomes. Pure: no I/O, no shared
/// state, deterministic for identical inputs.
///
/// Sorted by score descending; ties break on coin symbol ascending so the
/// ordering is stable across runs.
pub fn rank_coins(inputs: &[CoinInput], cfg: &AppConfig) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = inputs
        .iter()
        .map(|input| analyze_coin(input, cfg))
        .collect();
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.coin.cmp(&b.coin))
    });
    results
}

fn analyze_coin(input: &CoinInput, cfg: &AppConfig) -> RankedResult {
    let reading = technical::analyze(&input.series, input.timeframe, &cfg.indicators);
    let decision = combiner::combine(&reading, &input.sentiment, &cfg.combiner);

    let current_price = input.series.last().map(|bar| bar.close).unwrap_or(0.0);
    let atr = technical::average_true_range(&input.series, cfg.indicators.atr_period);
    let plan = sizer::size(
        &decision,
        current_price,
        cfg.portfolio_value,
        atr,
        &input.coin,
        &cfg.sizing,
    );

    let boost = if reading.bias == Bias::Bullish {
        cfg.ranker.bullish_boost
    } else {
        cfg.ranker.default_damp
    };
    let score = decision.confidence * boost;

    debug!(
        coin = %input.coin,
        bias = %reading.bias,
        action = %plan.action,
        confidence = decision.confidence,
        score,
        "coin analyzed"
    );

    RankedResult {
        coin: input.coin.clone(),
        plan,
        score,
    }
}

/// The leading slice of an already-ranked result list.
pub fn top(results: &[RankedResult], k: usize) -> &[RankedResult] {
    &results[..k.min(results.len())]
}

/// The single best opportunity, if any coin was rankable.
pub fn best(results: &[RankedResult]) -> Option<&RankedResult> {
    results.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Candle, SentimentLabel, SentimentReading, Timeframe};
    use chrono::DateTime;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: DateTime::from_timestamp(i as i64 * 14_400, 0).unwrap(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
            })
            .collect()
    }

    /// +3/-2 alternation around an uptrend: BULLISH without tripping the
    /// overbought override (RSI settles at 60).
    fn bullish_series() -> Vec<Candle> {
        let mut closes = vec![100.0];
        for i in 1..60 {
            let prev = *closes.last().unwrap();
            closes.push(prev + if i % 2 == 1 { 3.0 } else { -2.0 });
        }
        candles(&closes)
    }

    /// Mirror image: -3/+2 alternation, RSI settles at 40, BEARISH.
    fn bearish_series() -> Vec<Candle> {
        let mut closes = vec![300.0];
        for i in 1..60 {
            let prev = *closes.last().unwrap();
            closes.push(prev + if i % 2 == 1 { -3.0 } else { 2.0 });
        }
        candles(&closes)
    }

    fn sentiment(label: SentimentLabel, confidence: f64) -> SentimentReading {
        SentimentReading {
            label,
            confidence,
            skipped: false,
        }
    }

    fn input(coin: &str, series: Vec<Candle>, reading: SentimentReading) -> CoinInput {
        CoinInput {
            coin: coin.to_string(),
            timeframe: Timeframe::H4,
            series,
            sentiment: reading,
        }
    }

    #[test]
    fn test_bullish_coin_outranks_bearish() {
        let cfg = AppConfig::default();
        let inputs = vec![
            input("ZEC", bearish_series(), sentiment(SentimentLabel::Negative, 0.9)),
            input("BTC", bullish_series(), sentiment(SentimentLabel::Positive, 0.9)),
        ];
        let results = rank_coins(&inputs, &cfg);

        assert_eq!(results[0].coin, "BTC");
        assert_eq!(results[0].plan.action, Action::Long);
        // Both decisions saturate at confidence 1.0; the boost decides.
        assert!((results[0].score - 1.2).abs() < 1e-9);
        assert_eq!(results[1].coin, "ZEC");
        assert_eq!(results[1].plan.action, Action::Short);
        assert!((results[1].score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_ties_break_on_symbol() {
        let cfg = AppConfig::default();
        let reading = sentiment(SentimentLabel::Positive, 0.9);
        let inputs = vec![
            input("ETH", bullish_series(), reading),
            input("ADA", bullish_series(), reading),
            input("BNB", bullish_series(), reading),
        ];
        let results = rank_coins(&inputs, &cfg);
        let coins: Vec<&str> = results.iter().map(|r| r.coin.as_str()).collect();
        assert_eq!(coins, ["ADA", "BNB", "ETH"]);
    }

    #[test]
    fn test_short_series_still_ranks_as_unknown() {
        // A present-but-short series is a data sentinel, not an exclusion;
        // exclusion is the scanner's job for fetch failures.
        let cfg = AppConfig::default();
        let inputs = vec![input(
            "DOT",
            candles(&vec![50.0; 10]),
            sentiment(SentimentLabel::Positive, 0.5),
        )];
        let results = rank_coins(&inputs, &cfg);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plan.action, Action::Long);
        // Undirected base: 0.5 * 0.4 + 0.3 = 0.5, damped by 0.8.
        assert!((results[0].score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_degrades_plan() {
        let cfg = AppConfig::default();
        let inputs = vec![input(
            "DOT",
            Vec::new(),
            sentiment(SentimentLabel::Positive, 0.5),
        )];
        let results = rank_coins(&inputs, &cfg);
        assert_eq!(results[0].plan.action, Action::Hold);
        assert!(results[0].plan.note.is_some());
    }

    #[test]
    fn test_top_and_best() {
        let cfg = AppConfig::default();
        let inputs = vec![
            input("BTC", bullish_series(), sentiment(SentimentLabel::Positive, 0.9)),
            input("ZEC", bearish_series(), sentiment(SentimentLabel::Negative, 0.9)),
        ];
        let results = rank_coins(&inputs, &cfg);
        assert_eq!(top(&results, 1).len(), 1);
        assert_eq!(top(&results, 10).len(), 2);
        assert_eq!(best(&results).unwrap().coin, "BTC");
        assert!(best(&[]).is_none());
    }
}
