// src/analysis/technical.rs
//
// Technical indicator engine: fast/slow simple MAs, a rolling-mean RSI, and
// MACD(12, 26, 9), all read from the most recent bar only.

use ta::indicators::{MovingAverageConvergenceDivergence, SimpleMovingAverage};
use ta::Next;
use tracing::debug;

use crate::config::IndicatorConfig;
use crate::types::{Bias, Candle, TechnicalReading, Timeframe};

/// Latest indicator values computed from a full series pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub fast_ma: f64,
    pub slow_ma: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
}

struct IndicatorStack {
    fast_ma: SimpleMovingAverage,
    slow_ma: SimpleMovingAverage,
    avg_gain: SimpleMovingAverage,
    avg_loss: SimpleMovingAverage,
    macd: MovingAverageConvergenceDivergence,
}

impl IndicatorStack {
    fn build(cfg: &IndicatorConfig) -> Option<Self> {
        Some(Self {
            fast_ma: SimpleMovingAverage::new(cfg.fast_ma).ok()?,
            slow_ma: SimpleMovingAverage::new(cfg.slow_ma).ok()?,
            avg_gain: SimpleMovingAverage::new(cfg.rsi_period).ok()?,
            avg_loss: SimpleMovingAverage::new(cfg.rsi_period).ok()?,
            macd: MovingAverageConvergenceDivergence::new(
                cfg.macd_fast,
                cfg.macd_slow,
                cfg.macd_signal,
            )
            .ok()?,
        })
    }
}

/// Runs every indicator over the series and returns the values at the most
/// recent bar. None when the series is shorter than the slow MA window.
pub fn snapshot(series: &[Candle], cfg: &IndicatorConfig) -> Option<IndicatorSnapshot> {
    if series.len() < cfg.slow_ma {
        return None;
    }
    let mut stack = IndicatorStack::build(cfg)?;

    let mut fast_ma = 0.0;
    let mut slow_ma = 0.0;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    let mut macd = 0.0;
    let mut macd_signal = 0.0;
    let mut prev_close = series[0].close;

    for (i, bar) in series.iter().enumerate() {
        fast_ma = stack.fast_ma.next(bar.close);
        slow_ma = stack.slow_ma.next(bar.close);
        let out = stack.macd.next(bar.close);
        macd = out.macd;
        macd_signal = out.signal;
        if i > 0 {
            let delta = bar.close - prev_close;
            avg_gain = stack.avg_gain.next(delta.max(0.0));
            avg_loss = stack.avg_loss.next((-delta).max(0.0));
        }
        prev_close = bar.close;
    }

    // Rolling-mean RSI; a lossless stretch pins it at 100.
    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    Some(IndicatorSnapshot {
        close: prev_close,
        fast_ma,
        slow_ma,
        rsi,
        macd,
        macd_signal,
    })
}

/// Turns raw indicator values into a bias, a bounded strength score, and the
/// list of conditions that fired.
pub fn interpret(
    snap: &IndicatorSnapshot,
    timeframe: Timeframe,
    cfg: &IndicatorConfig,
) -> TechnicalReading {
    let mut reasons: Vec<String> = Vec::new();
    let mut bias = Bias::Neutral;

    if snap.fast_ma > snap.slow_ma {
        bias = Bias::Bullish;
        reasons.push(format!("MA{} > MA{} (uptrend)", cfg.fast_ma, cfg.slow_ma));
    } else if snap.fast_ma < snap.slow_ma {
        bias = Bias::Bearish;
        reasons.push(format!("MA{} < MA{} (downtrend)", cfg.fast_ma, cfg.slow_ma));
    }

    // Overbought/oversold overrides the trend read; kept from the original
    // rule ordering rather than blended as a vote.
    if snap.rsi > cfg.rsi_overbought {
        bias = Bias::Bearish;
        reasons.push(format!("RSI > {:.0} (overbought)", cfg.rsi_overbought));
    } else if snap.rsi < cfg.rsi_oversold {
        bias = Bias::Bullish;
        reasons.push(format!("RSI < {:.0} (oversold)", cfg.rsi_oversold));
    }

    if snap.macd > snap.macd_signal {
        reasons.push("MACD > Signal (momentum rising)".to_string());
    } else if snap.macd < snap.macd_signal {
        reasons.push("MACD < Signal (momentum falling)".to_string());
    }

    let ma_agrees = match bias {
        Bias::Bullish => snap.fast_ma > snap.slow_ma,
        Bias::Bearish => snap.fast_ma < snap.slow_ma,
        _ => false,
    };
    // RSI confirms when it does not sit in the extreme contradicting the bias.
    let rsi_confirms = match bias {
        Bias::Bullish => snap.rsi < cfg.rsi_overbought,
        Bias::Bearish => snap.rsi > cfg.rsi_oversold,
        _ => false,
    };

    let mut strength = 0.0;
    if ma_agrees {
        strength += cfg.ma_weight;
    }
    if rsi_confirms {
        strength += cfg.rsi_weight;
    }
    strength += if snap.macd > snap.macd_signal {
        cfg.macd_weight
    } else {
        -cfg.macd_weight
    };
    let strength = strength.abs().clamp(0.0, 1.0);

    debug!(
        close = snap.close,
        fast_ma = snap.fast_ma,
        slow_ma = snap.slow_ma,
        rsi = snap.rsi,
        macd = snap.macd,
        signal = snap.macd_signal,
        %bias,
        strength,
        "technical read"
    );

    TechnicalReading {
        bias,
        strength,
        timeframe,
        explanation: reasons.join("; "),
    }
}

/// Full technical pass. Series shorter than the slow MA window (or empty)
/// degrade to the UNKNOWN sentinel instead of erroring.
pub fn analyze(series: &[Candle], timeframe: Timeframe, cfg: &IndicatorConfig) -> TechnicalReading {
    match snapshot(series, cfg) {
        Some(snap) => interpret(&snap, timeframe, cfg),
        None => TechnicalReading::insufficient(timeframe),
    }
}

/// Simplified Average True Range: rolling mean of the high-low span over the
/// last `period` bars. None when there are not enough bars or the range
/// collapses to zero.
pub fn average_true_range(series: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let mut sma = SimpleMovingAverage::new(period).ok()?;
    let mut atr = 0.0;
    for bar in series {
        atr = sma.next(bar.high - bar.low);
    }
    (atr > 0.0).then_some(atr)
}
