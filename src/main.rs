// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use coin_scout::analysis::sentiment::SentimentAnalyzer;
use coin_scout::connectors::paper::{LexiconClassifier, PaperMarketData, PaperNewsDesk};
use coin_scout::core::ranker;
use coin_scout::signal::sizer;
use coin_scout::utils::symbols::to_pair;
use coin_scout::{AppConfig, RankedResult, Scanner};

#[derive(Serialize)]
struct ScanReport<'a> {
    scan_id: Uuid,
    generated_at: DateTime<Utc>,
    timeframe: String,
    portfolio_value: f64,
    results: &'a [RankedResult],
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let file_appender = tracing_appender::rolling::daily("logs", "coin_scout.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coin_scout=info".into()),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = AppConfig::new().context("failed to load configuration")?;
    config.validate()?;

    println!("========================================");
    println!("        COIN SCOUT - v0.1.1");
    println!("========================================");
    println!("Coins:     {}", config.coins.join(", "));
    println!("Timeframe: {}", config.timeframe);
    println!("Portfolio: ${:.2}", config.portfolio_value);
    println!("Mode:      📝 PAPER DATA");
    println!("========================================");

    let sentiment = SentimentAnalyzer::new(Box::new(LexiconClassifier), &config.sentiment);
    let scanner = Scanner::new(
        config.clone(),
        Arc::new(PaperMarketData),
        Arc::new(PaperNewsDesk),
        sentiment,
    )?;

    let results = scanner.scan(&config.coins).await;
    if results.is_empty() {
        println!("⚠️ No coins could be ranked.");
        return Ok(());
    }

    println!("\n🏆 Best opportunities:");
    for result in ranker::top(&results, config.ranker.top_k) {
        let outlook = sizer::outlook(&result.plan)
            .map(|o| format!(" | R/R {:.2}", o.reward_risk))
            .unwrap_or_default();
        println!(
            " - {}: {} score={:.3} entry={} exit={} stop={} amount=${}{}",
            to_pair(&result.coin),
            result.plan.action,
            result.score,
            result.plan.entry_price,
            result.plan.exit_price,
            result.plan.stop_loss,
            result.plan.amount,
            outlook,
        );
    }

    if let Some(best) = ranker::best(&results) {
        println!(
            "\n✅ Recommended: {} → {} (score={:.3})",
            best.coin, best.plan.action, best.score
        );
    }

    write_report(&config, &results).await?;
    Ok(())
}

/// Persists the ranked results as a JSON report; report files are plumbing
/// around the core, not part of it.
async fn write_report(config: &AppConfig, results: &[RankedResult]) -> Result<()> {
    let report = ScanReport {
        scan_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        timeframe: config.timeframe.to_string(),
        portfolio_value: config.portfolio_value,
        results,
    };

    tokio::fs::create_dir_all("reports").await?;
    let path = format!("reports/scan-{}.json", report.scan_id);
    let data = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("failed to write {path}"))?;

    info!(%path, results = results.len(), "scan report written");
    println!("📄 Report saved to {path}");
    Ok(())
}
