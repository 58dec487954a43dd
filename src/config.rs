// src/config.rs

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::ScoutError;
use crate::types::Timeframe;

/// Indicator windows and thresholds for the technical engine.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IndicatorConfig {
    pub fast_ma: usize,
    pub slow_ma: usize,
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub atr_period: usize,
    /// Strength contribution when the MA trend agrees with the final bias.
    pub ma_weight: f64,
    /// Strength contribution when RSI does not contradict the final bias.
    pub rsi_weight: f64,
    /// Strength contribution of the MACD/signal relation (added or subtracted).
    pub macd_weight: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fast_ma: 20,
            slow_ma: 50,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            atr_period: 14,
            ma_weight: 0.4,
            rsi_weight: 0.3,
            macd_weight: 0.3,
        }
    }
}

/// Heuristic weights of the signal combiner. Carried over from the most
/// complete prototype as observed behavior; tune here, not in code.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CombinerConfig {
    pub sentiment_weight: f64,
    /// Base confidence when the technical bias is directional.
    pub directional_base: f64,
    /// Base confidence when the technical bias is NEUTRAL or UNKNOWN.
    pub undirected_base: f64,
    /// Multiplier applied when technicals and sentiment fully agree.
    pub agreement_bonus: f64,
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            sentiment_weight: 0.4,
            directional_base: 0.6,
            undirected_base: 0.3,
            agreement_bonus: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SizingConfig {
    pub risk_pct: f64,
    pub reward_pct: f64,
    /// Hard cap on a single trade as a fraction of the portfolio.
    pub max_allocation: f64,
    /// Scale applied to ATR/price before clamping into the vol factor.
    pub vol_scale: f64,
    pub vol_factor_min: f64,
    pub vol_factor_max: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            risk_pct: 0.03,
            reward_pct: 0.05,
            max_allocation: 0.2,
            vol_scale: 50.0,
            vol_factor_min: 0.5,
            vol_factor_max: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RankerConfig {
    /// Score multiplier for coins whose technicals read BULLISH.
    pub bullish_boost: f64,
    /// Score multiplier for everything else.
    pub default_damp: f64,
    pub top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            bullish_boost: 1.2,
            default_damp: 0.8,
            top_k: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SentimentConfig {
    /// Trimmed texts shorter than this never reach the classifier; short
    /// snippets historically produced meaningless high-confidence labels.
    pub min_article_chars: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            min_article_chars: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub coins: Vec<String>,
    pub timeframe: Timeframe,
    pub portfolio_value: f64,
    /// How many candles to request from the market-data source per coin.
    pub history_bars: usize,
    pub indicators: IndicatorConfig,
    pub combiner: CombinerConfig,
    pub sizing: SizingConfig,
    pub ranker: RankerConfig,
    pub sentiment: SentimentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coins: ["BTC", "ETH", "BNB", "SOL", "ADA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeframe: Timeframe::H4,
            portfolio_value: 1000.0,
            history_bars: 120,
            indicators: IndicatorConfig::default(),
            combiner: CombinerConfig::default(),
            sizing: SizingConfig::default(),
            ranker: RankerConfig::default(),
            sentiment: SentimentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("Settings").required(false))
            .add_source(Environment::with_prefix("APP"));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Rejects configurations the core must not run with. Bad config is an
    /// error, never a market sentinel.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if !self.portfolio_value.is_finite() || self.portfolio_value <= 0.0 {
            return Err(ScoutError::InvalidConfig(
                "portfolio_value must be positive".to_string(),
            ));
        }
        if self.coins.is_empty() {
            return Err(ScoutError::InvalidConfig(
                "coins must not be empty".to_string(),
            ));
        }
        let ind = &self.indicators;
        if ind.fast_ma == 0
            || ind.slow_ma == 0
            || ind.rsi_period == 0
            || ind.macd_fast == 0
            || ind.macd_slow == 0
            || ind.macd_signal == 0
            || ind.atr_period == 0
        {
            return Err(ScoutError::InvalidConfig(
                "indicator windows must be non-zero".to_string(),
            ));
        }
        if ind.fast_ma >= ind.slow_ma {
            return Err(ScoutError::InvalidConfig(
                "fast_ma must be smaller than slow_ma".to_string(),
            ));
        }
        let sizing = &self.sizing;
        if sizing.risk_pct <= 0.0 || sizing.reward_pct <= 0.0 {
            return Err(ScoutError::InvalidConfig(
                "risk_pct and reward_pct must be positive".to_string(),
            ));
        }
        if sizing.max_allocation <= 0.0 || sizing.max_allocation > 1.0 {
            return Err(ScoutError::InvalidConfig(
                "max_allocation must be in (0, 1]".to_string(),
            ));
        }
        if sizing.vol_factor_min > sizing.vol_factor_max {
            return Err(ScoutError::InvalidConfig(
                "vol_factor_min must not exceed vol_factor_max".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.timeframe, Timeframe::H4);
        assert_eq!(config.portfolio_value, 1000.0);
        assert_eq!(config.indicators.fast_ma, 20);
        assert_eq!(config.indicators.slow_ma, 50);
        assert_eq!(config.combiner.sentiment_weight, 0.4);
        assert_eq!(config.sizing.risk_pct, 0.03);
        assert_eq!(config.sentiment.min_article_chars, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_portfolio() {
        let mut config = AppConfig::default();
        config.portfolio_value = 0.0;
        assert!(config.validate().is_err());
        config.portfolio_value = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_ma_windows() {
        let mut config = AppConfig::default();
        config.indicators.fast_ma = 50;
        config.indicators.slow_ma = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_coin_list() {
        let mut config = AppConfig::default();
        config.coins.clear();
        assert!(config.validate().is_err());
    }
}
