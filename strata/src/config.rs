//! Tunables for the seasonal simulator, given from environment variables and
//! lazily initialized when needed.
//!
//! The catch-up constants have no physical derivation, they only trade surface
//! freshness against tick cost, so they are exposed as knobs rather than baked in.

use once_cell::sync::Lazy;
use std::env;


fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Catch-up budget of the seasonal simulator: per-column mutation density is
/// `budget / elapsed_ticks`, clamped to full density.
///
/// Override with `STRATA_SEASON_BUDGET`.
pub fn season_budget() -> u64 {
    static ENV: Lazy<u64> = Lazy::new(|| env_u64("STRATA_SEASON_BUDGET", 10240));
    *ENV
}

/// Minimum simulated ticks between two executed seasonal passes on one chunk;
/// each call widens it by a random 0..40 to spread chunk updates apart.
///
/// Override with `STRATA_SEASON_DELTA_MIN`.
pub fn season_delta_min() -> u64 {
    static ENV: Lazy<u64> = Lazy::new(|| env_u64("STRATA_SEASON_DELTA_MIN", 180));
    *ENV
}
