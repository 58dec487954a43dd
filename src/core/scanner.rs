// src/core/scanner.rs
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::analysis::sentiment::SentimentAnalyzer;
use crate::config::AppConfig;
use crate::connectors::traits::{MarketDataSource, NewsSource};
use crate::core::ranker;
use crate::error::ScoutError;
use crate::types::{CoinInput, RankedResult};
use crate::utils::symbols::canonical_coin;

/// Drives the collaborators to assemble per-coin inputs and hands them to the
/// pure ranker. Each coin's fetches run independently; results only meet at
/// the final sort.
pub struct Scanner {
    config: AppConfig,
    market_data: Arc<dyn MarketDataSource>,
    news: Arc<dyn NewsSource>,
    sentiment: SentimentAnalyzer,
}

impl Scanner {
    /// Rejects invalid configuration up front; a bad portfolio value must not
    /// masquerade as a missing market signal.
    pub fn new(
        config: AppConfig,
        market_data: Arc<dyn MarketDataSource>,
        news: Arc<dyn NewsSource>,
        sentiment: SentimentAnalyzer,
    ) -> Result<Self, ScoutError> {
        config.validate()?;
        Ok(Self {
            config,
            market_data,
            news,
            sentiment,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scans the given coins and returns them ranked best-first. A coin whose
    /// series or article could not be obtained is excluded from the ranking,
    /// not scored as zero.
    pub async fn scan(&self, coins: &[String]) -> Vec<RankedResult> {
        info!(
            coins = coins.len(),
            timeframe = %self.config.timeframe,
            "scanning coins"
        );

        let fetches = coins.iter().map(|coin| self.collect_inputs(coin));
        let inputs: Vec<CoinInput> = join_all(fetches).await.into_iter().flatten().collect();

        if inputs.len() < coins.len() {
            warn!(
                skipped = coins.len() - inputs.len(),
                "coins excluded from ranking: inputs unavailable"
            );
        }

        ranker::rank_coins(&inputs, &self.config)
    }

    async fn collect_inputs(&self, coin: &str) -> Option<CoinInput> {
        let coin = canonical_coin(coin);

        let series = match self
            .market_data
            .price_series(&coin, self.config.timeframe, self.config.history_bars)
            .await
        {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => {
                warn!(%coin, "no market data returned, coin skipped");
                return None;
            }
            Err(error) => {
                warn!(%coin, %error, "failed to fetch price series, coin skipped");
                return None;
            }
        };

        let article = match self.news.latest_article(&coin).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%coin, %error, "failed to fetch article, coin skipped");
                return None;
            }
        };

        let sentiment = match self.sentiment.analyze(&article).await {
            Ok(reading) => reading,
            Err(error) => {
                warn!(%coin, %error, "sentiment classification failed, coin skipped");
                return None;
            }
        };

        Some(CoinInput {
            coin,
            timeframe: self.config.timeframe,
            series,
            sentiment,
        })
    }
}
