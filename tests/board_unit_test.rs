//! Unit tests for the in-memory burner board.
//!
//! Run with: cargo test --test board_unit_test

use chrono::{DateTime, Duration, Utc};
use reformer_db::board::{BurnerBoard, BurnerKey, BurnerState, MergeOutcome, Wall};
use reformer_db::entity::burners;

fn row(wall: &str, row: i16, num: i16, state: &str, stamp: DateTime<Utc>) -> burners::Model {
    burners::Model {
        wall: wall.to_string(),
        row,
        burner_num: num,
        state: state.to_string(),
        updated_at: stamp.into(),
    }
}

fn key(wall: Wall, r: i16, num: i16) -> BurnerKey {
    BurnerKey::new(wall, r, num).unwrap()
}

fn small_board(stamp: DateTime<Utc>) -> BurnerBoard {
    let board = BurnerBoard::new();
    board.replace_all(vec![
        row("B", 2, 3, "C", stamp),
        row("A", 1, 1, "B", stamp),
        row("A", 1, 2, "N", stamp),
        row("D", 6, 15, "O", stamp),
    ]);
    board
}

#[test]
fn snapshot_is_in_canonical_order() {
    let board = small_board(Utc::now());

    let positions: Vec<(String, i16, i16)> = board
        .snapshot()
        .into_iter()
        .map(|b| (b.wall, b.row, b.burner_num))
        .collect();

    assert_eq!(
        positions,
        vec![
            ("A".to_string(), 1, 1),
            ("A".to_string(), 1, 2),
            ("B".to_string(), 2, 3),
            ("D".to_string(), 6, 15),
        ]
    );
}

#[test]
fn replace_all_drops_malformed_rows() {
    let stamp = Utc::now();
    let board = BurnerBoard::new();
    board.replace_all(vec![
        row("A", 1, 1, "B", stamp),
        row("Z", 1, 1, "B", stamp),
        row("A", 7, 1, "B", stamp),
        row("A", 1, 16, "B", stamp),
    ]);

    assert_eq!(board.len(), 1);
}

#[test]
fn apply_local_returns_prior_and_mutates() {
    let stamp = Utc::now();
    let board = small_board(stamp);
    let k = key(Wall::A, 1, 1);

    let prior = board
        .apply_local(&k, BurnerState::Capped, stamp + Duration::seconds(5))
        .unwrap();
    assert_eq!(prior.state, "B");

    let held = board.get(&k).unwrap();
    assert_eq!(held.state, "C");
    assert!(held.updated_at > prior.updated_at);
}

#[test]
fn apply_local_off_board_is_a_noop() {
    let board = small_board(Utc::now());
    let k = key(Wall::C, 4, 4);

    assert!(board.apply_local(&k, BurnerState::Both, Utc::now()).is_none());
    assert!(board.get(&k).is_none());
}

#[test]
fn restore_reinstates_the_prior_row() {
    let stamp = Utc::now();
    let board = small_board(stamp);
    let k = key(Wall::A, 1, 2);

    let prior = board
        .apply_local(&k, BurnerState::Both, stamp + Duration::seconds(1))
        .unwrap();
    board.restore(&k, prior.clone());

    let held = board.get(&k).unwrap();
    assert_eq!(held.state, prior.state);
    assert_eq!(held.updated_at, prior.updated_at);
}

#[test]
fn newer_change_is_applied() {
    let stamp = Utc::now();
    let board = small_board(stamp);

    let incoming = row("A", 1, 1, "O", stamp + Duration::seconds(10));
    assert_eq!(board.apply_remote(&incoming), MergeOutcome::Applied);
    assert_eq!(board.get(&key(Wall::A, 1, 1)).unwrap().state, "O");
}

#[test]
fn stale_change_is_discarded() {
    let stamp = Utc::now();
    let board = small_board(stamp);

    // Equal timestamp counts as stale; only strictly newer wins
    let same = row("A", 1, 1, "O", stamp);
    assert_eq!(board.apply_remote(&same), MergeOutcome::Stale);

    let older = row("A", 1, 1, "O", stamp - Duration::seconds(10));
    assert_eq!(board.apply_remote(&older), MergeOutcome::Stale);

    assert_eq!(board.get(&key(Wall::A, 1, 1)).unwrap().state, "B");
}

#[test]
fn unknown_key_change_is_ignored_not_inserted() {
    let stamp = Utc::now();
    let board = small_board(stamp);
    let before = board.len();

    let foreign = row("C", 3, 9, "B", stamp + Duration::seconds(1));
    assert_eq!(board.apply_remote(&foreign), MergeOutcome::UnknownKey);
    assert_eq!(board.len(), before);
}

#[test]
fn malformed_change_is_rejected() {
    let board = small_board(Utc::now());

    let bad_wall = row("X", 1, 1, "B", Utc::now());
    assert_eq!(board.apply_remote(&bad_wall), MergeOutcome::Malformed);

    let bad_row = row("A", 0, 1, "B", Utc::now());
    assert_eq!(board.apply_remote(&bad_row), MergeOutcome::Malformed);
}

#[test]
fn analytics_reports_all_walls() {
    let board = small_board(Utc::now());
    let analytics = board.analytics();

    let walls: Vec<Wall> = analytics.iter().map(|a| a.wall).collect();
    assert_eq!(walls, vec![Wall::A, Wall::B, Wall::C, Wall::D]);

    // Wall C holds no rows yet but still reports zeroed counts
    let c = &analytics[2];
    assert_eq!(c.counts.both + c.counts.ng_only + c.counts.off_gas + c.counts.capped, 0);
    assert_eq!(c.imbalance, 0);
}

#[test]
fn analytics_counts_by_wall() {
    let stamp = Utc::now();
    let board = BurnerBoard::new();
    let mut rows = Vec::new();
    for num in 1..=12 {
        rows.push(row("A", 1, num, "N", stamp));
    }
    rows.push(row("A", 2, 1, "O", stamp));
    rows.push(row("B", 1, 1, "N", stamp));
    board.replace_all(rows);

    let analytics = board.analytics();
    assert_eq!(analytics[0].counts.ng_only, 12);
    assert_eq!(analytics[0].counts.off_gas, 1);
    assert_eq!(analytics[0].imbalance, 11);
    assert_eq!(analytics[1].imbalance, 1);
}
