// RSVP deduplication via client fingerprinting.
//
// The fingerprint is a low-assurance pseudo-identifier derived from client
// environment properties and a 32-bit FNV-1a hash. It is an anti-duplicate
// nudge, nothing more: anyone can bypass it by clearing local storage or
// switching browsers. It MUST NOT back a security or billing decision —
// collision resistance is explicitly not a goal.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{read_json, write_json, Store};

/// The fixed set of client environment properties the fingerprint is
/// derived from. Injected by the caller rather than read from a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    pub user_agent: String,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub timezone_offset_min: i32,
    /// Digest of a canvas rendering pass, opaque here
    pub canvas_digest: String,
}

/// One recorded RSVP submission, write-once per (device, event) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub protest_id: String,
    pub participant_type: String,
    /// RFC 3339 submission timestamp
    pub timestamp: String,
    pub fingerprint: String,
}

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

fn fnv1a_32(input: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Derive the fingerprint string (8 hex chars) from a client profile.
pub fn compute_fingerprint(profile: &ClientProfile) -> String {
    let material = format!(
        "{}|{}|{}x{}|{}|{}",
        profile.user_agent,
        profile.language,
        profile.screen_width,
        profile.screen_height,
        profile.timezone_offset_min,
        profile.canvas_digest,
    );
    format!("{:08x}", fnv1a_32(&material))
}

fn storage_key(event_id: &str, fingerprint: &str) -> String {
    format!("rsvp:{}:{}", event_id, fingerprint)
}

/// Whether this device already submitted an RSVP for the event.
///
/// Membership test only — the stored record's contents are not inspected.
pub async fn has_submitted(store: &dyn Store, event_id: &str, fingerprint: &str) -> Result<bool> {
    let record: Option<FingerprintRecord> =
        read_json(store, &storage_key(event_id, fingerprint)).await?;
    Ok(record.is_some())
}

/// Record an RSVP submission for this (device, event) pair.
pub async fn mark_submitted(
    store: &dyn Store,
    event_id: &str,
    participant_type: &str,
    fingerprint: &str,
) -> Result<()> {
    let record = FingerprintRecord {
        protest_id: event_id.to_string(),
        participant_type: participant_type.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        fingerprint: fingerprint.to_string(),
    };
    write_json(store, &storage_key(event_id, fingerprint), &record).await?;
    debug!(
        event_id = event_id,
        participant_type = participant_type,
        "Marked RSVP submitted"
    );
    Ok(())
}
