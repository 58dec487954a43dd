// src/error.rs
use thiserror::Error;

/// Errors the core itself raises. Bad configuration is rejected loudly and is
/// deliberately distinct from the data sentinels (UNKNOWN readings, degraded
/// HOLD plans), which are values, not errors.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
