// Unit tests for the badge evaluator.
//
// Badges are derived state: the earned set is recomputed fresh from the
// participation record on every call, and a downward correction can
// un-earn a badge.

use std::collections::BTreeSet;

use brasa::badges::{
    badge_by_id, evaluate_badges, newly_earned, UserParticipation, CATALOG,
};

fn participation(attended: u32, shares: u32, states: &[&str]) -> UserParticipation {
    UserParticipation {
        user_id: "tester".to_string(),
        events_attended: attended,
        shares_count: shares,
        states_visited: states.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn catalog_has_exactly_four_badges() {
    assert_eq!(CATALOG.len(), 4);
}

#[test]
fn badge_by_id_finds_catalog_entries() {
    for badge in &CATALOG {
        assert!(badge_by_id(badge.id).is_some());
    }
    assert!(badge_by_id("nonexistent").is_none());
}

#[test]
fn zero_participation_earns_nothing() {
    assert!(evaluate_badges(&participation(0, 0, &[])).is_empty());
}

#[test]
fn one_event_earns_primeira_marcha_only() {
    let earned = evaluate_badges(&participation(1, 0, &["SP"]));
    assert_eq!(earned, BTreeSet::from(["primeira-marcha".to_string()]));
}

#[test]
fn five_events_earn_veterano() {
    let earned = evaluate_badges(&participation(5, 0, &["SP"]));
    assert!(earned.contains("veterano"));
}

#[test]
fn four_events_do_not_earn_veterano() {
    let earned = evaluate_badges(&participation(4, 0, &["SP"]));
    assert!(!earned.contains("veterano"));
}

#[test]
fn ten_shares_earn_mobilizador() {
    let earned = evaluate_badges(&participation(0, 10, &[]));
    assert!(earned.contains("mobilizador"));
}

#[test]
fn three_states_earn_presenca_nacional() {
    let earned = evaluate_badges(&participation(3, 0, &["SP", "RJ", "MG"]));
    assert!(earned.contains("presenca-nacional"));
}

#[test]
fn two_states_do_not_earn_presenca_nacional() {
    let earned = evaluate_badges(&participation(2, 0, &["SP", "RJ"]));
    assert!(!earned.contains("presenca-nacional"));
}

#[test]
fn evaluation_is_pure() {
    let p = participation(7, 15, &["SP", "RJ", "MG", "BA"]);
    assert_eq!(evaluate_badges(&p), evaluate_badges(&p));
}

#[test]
fn downward_correction_unearns_a_badge() {
    // Derived, not event-sourced: correcting the counters down removes
    // the badge from the evaluated set.
    let before = evaluate_badges(&participation(5, 0, &["SP"]));
    assert!(before.contains("veterano"));
    let after = evaluate_badges(&participation(4, 0, &["SP"]));
    assert!(!after.contains("veterano"));
}

#[test]
fn newly_earned_is_after_minus_before() {
    let before = BTreeSet::from(["primeira-marcha".to_string()]);
    let after = BTreeSet::from([
        "primeira-marcha".to_string(),
        "mobilizador".to_string(),
    ]);
    let new = newly_earned(&before, &after);
    assert_eq!(new, BTreeSet::from(["mobilizador".to_string()]));
}

#[test]
fn newly_earned_with_no_change_is_empty() {
    let set = BTreeSet::from(["veterano".to_string()]);
    assert!(newly_earned(&set, &set).is_empty());
}
