// Badge/milestone evaluator.
//
// A fixed catalog of four achievement badges, each gated by one threshold
// predicate over a user's cumulative participation. Badges are derived
// state: `evaluate_badges` recomputes the earned set fresh on every call,
// so a downward data correction can un-earn a badge. The previously-earned
// set kept by the CLI is only a diff baseline for notifications.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::{read_json, write_json, Store};

/// Cumulative participation counters for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserParticipation {
    pub user_id: String,
    pub events_attended: u32,
    pub shares_count: u32,
    /// State codes of attended events (deduplicated)
    pub states_visited: BTreeSet<String>,
}

/// One entry in the static badge catalog.
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub predicate: fn(&UserParticipation) -> bool,
}

/// The fixed catalog. Never mutated at runtime.
pub const CATALOG: [Badge; 4] = [
    Badge {
        id: "primeira-marcha",
        name: "Primeira Marcha",
        description: "Participou da sua primeira manifestação",
        icon: "🚩",
        color: "green",
        predicate: |p| p.events_attended >= 1,
    },
    Badge {
        id: "veterano",
        name: "Veterano",
        description: "Participou de 5 ou mais manifestações",
        icon: "🎖️",
        color: "blue",
        predicate: |p| p.events_attended >= 5,
    },
    Badge {
        id: "mobilizador",
        name: "Mobilizador",
        description: "Compartilhou 10 ou mais eventos",
        icon: "📣",
        color: "yellow",
        predicate: |p| p.shares_count >= 10,
    },
    Badge {
        id: "presenca-nacional",
        name: "Presença Nacional",
        description: "Participou de eventos em 3 ou mais estados",
        icon: "🇧🇷",
        color: "magenta",
        predicate: |p| p.states_visited.len() >= 3,
    },
];

/// Look up a catalog entry by id.
pub fn badge_by_id(id: &str) -> Option<&'static Badge> {
    CATALOG.iter().find(|b| b.id == id)
}

/// Return the subset of badge ids whose predicate currently holds.
///
/// Pure function of the participation record.
pub fn evaluate_badges(participation: &UserParticipation) -> BTreeSet<String> {
    CATALOG
        .iter()
        .filter(|badge| (badge.predicate)(participation))
        .map(|badge| badge.id.to_string())
        .collect()
}

/// Badges present in `after` but not `before` — drives the milestone
/// notification.
pub fn newly_earned(before: &BTreeSet<String>, after: &BTreeSet<String>) -> BTreeSet<String> {
    after.difference(before).cloned().collect()
}

fn participation_key(user_id: &str) -> String {
    format!("participation:{}", user_id)
}

fn earned_key(user_id: &str) -> String {
    format!("badges:{}", user_id)
}

/// Load a user's participation record (zeroed when absent or malformed).
pub async fn load_participation(store: &dyn Store, user_id: &str) -> Result<UserParticipation> {
    let record: Option<UserParticipation> = read_json(store, &participation_key(user_id)).await?;
    Ok(record.unwrap_or_else(|| UserParticipation {
        user_id: user_id.to_string(),
        ..Default::default()
    }))
}

/// Persist a user's participation record.
pub async fn save_participation(store: &dyn Store, participation: &UserParticipation) -> Result<()> {
    write_json(store, &participation_key(&participation.user_id), participation).await
}

/// Load the previously-earned badge set (empty when absent or malformed).
pub async fn load_earned(store: &dyn Store, user_id: &str) -> Result<BTreeSet<String>> {
    let set: Option<BTreeSet<String>> = read_json(store, &earned_key(user_id)).await?;
    Ok(set.unwrap_or_default())
}

/// Persist the earned badge set used as the notification diff baseline.
pub async fn save_earned(store: &dyn Store, user_id: &str, earned: &BTreeSet<String>) -> Result<()> {
    write_json(store, &earned_key(user_id), earned).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participation(attended: u32, shares: u32, states: &[&str]) -> UserParticipation {
        UserParticipation {
            user_id: "u1".to_string(),
            events_attended: attended,
            shares_count: shares,
            states_visited: states.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_participation_earns_nothing() {
        let earned = evaluate_badges(&participation(0, 0, &[]));
        assert!(earned.is_empty());
    }

    #[test]
    fn test_first_event_earns_primeira_marcha() {
        let earned = evaluate_badges(&participation(1, 0, &["SP"]));
        assert!(earned.contains("primeira-marcha"));
        assert!(!earned.contains("veterano"));
    }

    #[test]
    fn test_all_four_badges() {
        let earned = evaluate_badges(&participation(6, 12, &["SP", "RJ", "MG"]));
        assert_eq!(earned.len(), 4);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let p = participation(3, 10, &["SP", "RJ"]);
        assert_eq!(evaluate_badges(&p), evaluate_badges(&p));
    }

    #[test]
    fn test_newly_earned_is_set_difference() {
        let before = evaluate_badges(&participation(4, 9, &["SP", "RJ"]));
        let after = evaluate_badges(&participation(5, 10, &["SP", "RJ"]));
        let new = newly_earned(&before, &after);
        assert!(new.contains("veterano"));
        assert!(new.contains("mobilizador"));
        assert!(!new.contains("primeira-marcha"));
    }

    #[test]
    fn test_catalog_ids_are_distinct() {
        let ids: BTreeSet<&str> = CATALOG.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }
}
