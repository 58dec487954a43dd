//! coin_scout: technical + news-sentiment trading signals for crypto
//! instruments.
//!
//! The core is a set of pure functions over already-fetched inputs: an
//! indicator engine over OHLC candles, a decision table combining technical
//! bias with classifier sentiment, a volatility-aware trade sizer, and a
//! deterministic ranker across coins. Market data, article text and model
//! inference are collaborator traits ([`connectors::traits`]); paper-mode
//! implementations ship for tests and offline runs.

pub mod analysis;
pub mod config;
pub mod connectors;
pub mod core;
pub mod error;
pub mod signal;
pub mod types;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::core::ranker::{best, rank_coins, top};
pub use crate::core::scanner::Scanner;
pub use crate::error::ScoutError;
pub use crate::signal::combiner::combine;
pub use crate::signal::sizer::{outlook, size};
pub use crate::types::{
    Action, Bias, Candle, CoinInput, RankedResult, SentimentLabel, SentimentReading,
    TechnicalReading, Timeframe, TradeDecision, TradePlan,
};
