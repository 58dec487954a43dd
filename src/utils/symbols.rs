// src/utils/symbols.rs

/// Normalizes the ticker spellings seen across data providers to a bare coin
/// symbol: "BTC-USD", "btcusdt" and "BTC" all map to "BTC".
pub fn canonical_coin(symbol: &str) -> String {
    let mut coin = symbol.trim().to_uppercase();
    if let Some((base, _)) = coin.split_once('-') {
        coin = base.to_string();
    }
    for quote in ["USDT", "USD"] {
        if let Some(stripped) = coin.strip_suffix(quote) {
            if !stripped.is_empty() {
                coin = stripped.to_string();
                break;
            }
        }
    }
    coin
}

/// Quote-pair spelling used for display and report output.
pub fn to_pair(symbol: &str) -> String {
    format!("{}-USD", canonical_coin(symbol))
}
