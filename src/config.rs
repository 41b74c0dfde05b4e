use std::env;

use anyhow::Result;

/// Default timeout for the origin reachability probe, in milliseconds.
/// A response slower than this is treated as evidence of interference.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Origin URL probed by the censorship heuristic (BRASA_ORIGIN_URL).
    /// Empty means the probe command is unavailable.
    pub origin_url: String,
    /// Probe abort interval in milliseconds (BRASA_PROBE_TIMEOUT_MS).
    pub probe_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only db_path has a default — the origin URL is required only for
    /// the `probe` command.
    pub fn load() -> Result<Self> {
        let probe_timeout_ms = env::var("BRASA_PROBE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_MS);

        Ok(Self {
            db_path: env::var("BRASA_DB_PATH").unwrap_or_else(|_| "./brasa.db".to_string()),
            origin_url: env::var("BRASA_ORIGIN_URL").unwrap_or_default(),
            probe_timeout_ms,
        })
    }

    /// Check that the origin URL is configured.
    /// Call this before running the reachability probe.
    pub fn require_origin(&self) -> Result<()> {
        if self.origin_url.is_empty() {
            anyhow::bail!(
                "BRASA_ORIGIN_URL not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
