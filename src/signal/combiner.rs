// src/signal/combiner.rs
use crate::config::CombinerConfig;
use crate::types::{Action, Bias, SentimentLabel, SentimentReading, TechnicalReading, TradeDecision};

/// Merges one technical and one sentiment reading into a trading action.
/// Decision table, first matching row wins:
///
/// | technical bias     | sentiment | action          |
/// |--------------------|-----------|-----------------|
/// | BULLISH            | POSITIVE  | LONG            |
/// | BEARISH            | NEGATIVE  | SHORT           |
/// | BULLISH            | NEGATIVE  | HOLD (conflict) |
/// | BEARISH            | POSITIVE  | HOLD (conflict) |
/// | NEUTRAL or UNKNOWN | POSITIVE  | LONG            |
/// | NEUTRAL or UNKNOWN | NEGATIVE  | SHORT           |
/// | any                | NEUTRAL   | HOLD            |
pub fn combine(
    technical: &TechnicalReading,
    sentiment: &SentimentReading,
    cfg: &CombinerConfig,
) -> TradeDecision {
    let (action, aligned) = match (technical.bias, sentiment.label) {
        (Bias::Bullish, SentimentLabel::Positive) => (Action::Long, true),
        (Bias::Bearish, SentimentLabel::Negative) => (Action::Short, true),
        (Bias::Bullish, SentimentLabel::Negative)
        | (Bias::Bearish, SentimentLabel::Positive) => (Action::Hold, false),
        (_, SentimentLabel::Positive) => (Action::Long, false),
        (_, SentimentLabel::Negative) => (Action::Short, false),
        (_, SentimentLabel::Neutral) => (Action::Hold, false),
    };

    let base = match technical.bias {
        Bias::Bullish | Bias::Bearish => cfg.directional_base,
        Bias::Neutral | Bias::Unknown => cfg.undirected_base,
    };
    let mut confidence = sentiment.confidence * cfg.sentiment_weight + base;
    if aligned {
        confidence *= cfg.agreement_bonus;
    }

    TradeDecision {
        action,
        confidence: confidence.clamp(0.0, 1.0),
    }
}
