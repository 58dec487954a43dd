// src/types.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional lean inferred from price indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
    /// Sentinel for series we could not analyze at all (too short / empty).
    Unknown,
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Long,
    Short,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// Candle timeframes the analysis runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    H1,
    #[default]
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1wk")]
    W1,
}

impl Timeframe {
    pub fn as_interval(&self) -> &'static str {
        match self {
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::W1 => "1wk",
        }
    }

    pub fn from_interval(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(Self::H1),
            "4h" => Some(Self::H4),
            "1d" => Some(Self::D1),
            "1wk" => Some(Self::W1),
            _ => None,
        }
    }

    pub const fn duration_secs(&self) -> u64 {
        match self {
            Self::H1 => 3_600,
            Self::H4 => 14_400,
            Self::D1 => 86_400,
            Self::W1 => 604_800,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_interval())
    }
}

/// A single OHLC bar. Series are ascending by timestamp with no duplicates
/// (contract of the market-data source).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Outcome of one technical-analysis pass over a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReading {
    pub bias: Bias,
    /// Signal strength in [0, 1].
    pub strength: f64,
    pub timeframe: Timeframe,
    /// The conditions that fired, in firing order, "; "-joined.
    pub explanation: String,
}

impl TechnicalReading {
    /// Sentinel for series too short to analyze. Distinguishable from a
    /// genuine NEUTRAL read by bias and explanation.
    pub fn insufficient(timeframe: Timeframe) -> Self {
        Self {
            bias: Bias::Unknown,
            strength: 0.0,
            timeframe,
            explanation: "insufficient data".to_string(),
        }
    }
}

/// Classifier verdict over one article text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub label: SentimentLabel,
    /// Maximum class probability of the 3-way softmax, clamped to [0, 1].
    pub confidence: f64,
    /// True when the text was too short and the classifier was never
    /// consulted.
    pub skipped: bool,
}

impl SentimentReading {
    pub fn skipped() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 1.0,
            skipped: true,
        }
    }
}

/// Action plus confidence, derived purely from one technical and one
/// sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    pub action: Action,
    pub confidence: f64,
}

/// Priced execution parameters for a decision. All monetary fields are
/// rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub coin: String,
    pub action: Action,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub stop_loss: Decimal,
    pub amount: Decimal,
    pub current_price: Decimal,
    /// Set when the plan is a degraded sentinel (e.g. invalid current price)
    /// rather than a genuine HOLD.
    pub note: Option<String>,
}

/// One coin's plan plus its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub coin: String,
    pub plan: TradePlan,
    pub score: f64,
}

/// Already-fetched inputs for one coin, consumed by the pure ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinInput {
    pub coin: String,
    pub timeframe: Timeframe,
    pub series: Vec<Candle>,
    pub sentiment: SentimentReading,
}
