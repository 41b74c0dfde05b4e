// Mirror-domain / censorship heuristic.
//
// Best-effort UX nudge, not a detection system: one timed request to the
// configured origin plus a hostname pattern check, each contributing
// free-text evidence strings. `is_blocked` means only "evidence list
// non-empty" — no accuracy claim is made, and network failure is itself
// evidence rather than an error.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::config::Config;

/// Hostname substrings that indicate the user already landed on a
/// fallback mirror.
const MIRROR_PATTERNS: &[&str] = &["mirror", "espelho", "backup", "alt"];

/// Alternate domains offered when blocking is suspected.
const ALTERNATE_DOMAINS: &[&str] = &[
    "marchabrasil.net",
    "marchabrasil.org",
    "espelho.marchabrasil.com",
];

/// Outcome of the censorship heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensorshipReport {
    /// True exactly when the evidence list is non-empty
    pub is_blocked: bool,
    pub evidence: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CensorshipReport {
    fn from_evidence(evidence: Vec<String>) -> Self {
        let recommendations = if evidence.is_empty() {
            Vec::new()
        } else {
            ALTERNATE_DOMAINS
                .iter()
                .map(|d| format!("Tente o domínio alternativo: {}", d))
                .collect()
        };
        Self {
            is_blocked: !evidence.is_empty(),
            evidence,
            recommendations,
        }
    }
}

/// Evidence from the hostname alone: does it look like a mirror?
pub fn hostname_evidence(hostname: &str) -> Option<String> {
    let lower = hostname.to_lowercase();
    MIRROR_PATTERNS
        .iter()
        .find(|pattern| lower.contains(*pattern))
        .map(|pattern| {
            format!(
                "Hostname '{}' matches mirror pattern '{}' — already on a fallback domain",
                hostname, pattern
            )
        })
}

/// Evidence from the probe latency: above the threshold suggests
/// interference (or just a slow link — hence "possible").
pub fn latency_evidence(elapsed_ms: u64, threshold_ms: u64) -> Option<String> {
    if elapsed_ms > threshold_ms {
        Some(format!(
            "Origin responded in {}ms (threshold {}ms) — possible interference",
            elapsed_ms, threshold_ms
        ))
    } else {
        None
    }
}

/// Run the heuristic: one timed GET to the configured origin plus the
/// hostname check. Never errors — timeout and request failure both
/// resolve to evidence.
pub async fn detect_censorship(client: &Client, config: &Config) -> CensorshipReport {
    let mut evidence = Vec::new();

    if let Some(hostname) = hostname_of(&config.origin_url) {
        if let Some(e) = hostname_evidence(&hostname) {
            evidence.push(e);
        }
    }

    // Abort at twice the latency threshold so a slow-but-successful
    // response can still be observed and flagged.
    let budget = Duration::from_millis(config.probe_timeout_ms * 2);
    let started = Instant::now();
    match timeout(budget, client.get(config.origin_url.as_str()).send()).await {
        Ok(Ok(response)) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            debug!(
                status = %response.status(),
                elapsed_ms,
                "Origin probe completed"
            );
            if let Some(e) = latency_evidence(elapsed_ms, config.probe_timeout_ms) {
                evidence.push(e);
            }
        }
        Ok(Err(e)) => {
            evidence.push(format!("Origin request failed: {} — possible blocking", e));
        }
        Err(_) => {
            evidence.push(format!(
                "Origin probe timed out after {}ms — possible blocking",
                config.probe_timeout_ms * 2
            ));
        }
    }

    CensorshipReport::from_evidence(evidence)
}

/// Extract the hostname from a URL, without pulling in a URL parser for
/// one field.
fn hostname_of(url: &str) -> Option<String> {
    let rest = url.split("://").nth(1).unwrap_or(url);
    let host = rest.split(['/', ':', '?']).next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
