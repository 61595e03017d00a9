//! Unit tests for wall analytics.
//!
//! Run with: cargo test --test analytics_unit_test

use reformer_db::board::analytics::{Severity, StateCounts, WallAnalytics};
use reformer_db::board::{BurnerState, Wall};

#[test]
fn severity_thresholds() {
    assert_eq!(Severity::classify(0), Severity::Normal);
    assert_eq!(Severity::classify(5), Severity::Normal);
    assert_eq!(Severity::classify(6), Severity::Warning);
    assert_eq!(Severity::classify(10), Severity::Warning);
    assert_eq!(Severity::classify(11), Severity::Major);
    assert_eq!(Severity::classify(20), Severity::Major);
    assert_eq!(Severity::classify(21), Severity::Critical);
    assert_eq!(Severity::classify(90), Severity::Critical);
}

#[test]
fn only_normal_is_normal() {
    assert!(Severity::Normal.is_normal());
    assert!(!Severity::Warning.is_normal());
    assert!(!Severity::Major.is_normal());
    assert!(!Severity::Critical.is_normal());
}

#[test]
fn imbalance_ignores_both_and_capped() {
    let mut counts = StateCounts::default();
    for _ in 0..12 {
        counts.record(BurnerState::NgOnly);
    }
    for _ in 0..4 {
        counts.record(BurnerState::OffGas);
    }
    for _ in 0..50 {
        counts.record(BurnerState::Both);
    }
    for _ in 0..24 {
        counts.record(BurnerState::Capped);
    }

    assert_eq!(counts.ng_only, 12);
    assert_eq!(counts.off_gas, 4);
    assert_eq!(counts.imbalance(), 8);
}

#[test]
fn imbalance_is_symmetric() {
    let mut more_ng = StateCounts::default();
    let mut more_og = StateCounts::default();
    for _ in 0..7 {
        more_ng.record(BurnerState::NgOnly);
        more_og.record(BurnerState::OffGas);
    }
    more_ng.record(BurnerState::OffGas);
    more_og.record(BurnerState::NgOnly);

    assert_eq!(more_ng.imbalance(), more_og.imbalance());
    assert_eq!(more_ng.imbalance(), 6);
}

#[test]
fn wall_analytics_classifies_from_counts() {
    let mut counts = StateCounts::default();
    for _ in 0..25 {
        counts.record(BurnerState::NgOnly);
    }
    let analytics = WallAnalytics::from_counts(Wall::A, counts);

    assert_eq!(analytics.wall, Wall::A);
    assert_eq!(analytics.imbalance, 25);
    assert_eq!(analytics.severity, Severity::Critical);
}

#[test]
fn severity_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Severity::Critical).unwrap(),
        "\"critical\""
    );
    assert_eq!(
        serde_json::to_string(&Severity::Normal).unwrap(),
        "\"normal\""
    );
}
