//! Unit tests for the store's pure pieces and the grid key types.
//!
//! Run with: cargo test --test store_unit_test

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Utc;
use reformer_db::board::{
    BurnerKey, BurnerState, Wall, BURNERS_PER_ROW, GRID_ROWS, TOTAL_BURNERS,
};
use reformer_db::store;

#[test]
fn seed_plan_covers_the_full_grid() {
    let plan = store::seed_plan(Utc::now());
    assert_eq!(plan.len(), TOTAL_BURNERS);
    assert_eq!(plan.len(), 360);

    let mut per_wall: BTreeMap<String, usize> = BTreeMap::new();
    for burner in &plan {
        let wall = burner.wall.clone().unwrap();
        *per_wall.entry(wall).or_default() += 1;
    }

    assert_eq!(per_wall.len(), 4);
    for (_, count) in per_wall {
        assert_eq!(count, (GRID_ROWS * BURNERS_PER_ROW) as usize);
    }
}

#[test]
fn seed_plan_starts_every_burner_capped() {
    let now = Utc::now();
    let plan = store::seed_plan(now);

    for burner in plan {
        assert_eq!(burner.state.unwrap(), "C");
        assert_eq!(
            burner.updated_at.unwrap(),
            chrono::DateTime::<chrono::FixedOffset>::from(now)
        );
    }
}

#[test]
fn seed_plan_positions_are_unique_and_in_range() {
    let plan = store::seed_plan(Utc::now());

    let mut seen = std::collections::BTreeSet::new();
    for burner in plan {
        let wall = burner.wall.clone().unwrap();
        let row = burner.row.clone().unwrap();
        let num = burner.burner_num.clone().unwrap();

        assert!((1..=GRID_ROWS).contains(&row));
        assert!((1..=BURNERS_PER_ROW).contains(&num));
        assert!(seen.insert((wall, row, num)), "duplicate position");
    }
}

#[test]
fn burner_key_rejects_out_of_range_positions() {
    assert!(BurnerKey::new(Wall::A, 1, 1).is_ok());
    assert!(BurnerKey::new(Wall::D, 6, 15).is_ok());

    assert!(BurnerKey::new(Wall::A, 0, 1).is_err());
    assert!(BurnerKey::new(Wall::A, 7, 1).is_err());
    assert!(BurnerKey::new(Wall::A, 1, 0).is_err());
    assert!(BurnerKey::new(Wall::A, 1, 16).is_err());
}

#[test]
fn burner_key_ordering_matches_listing_order() {
    let a = BurnerKey::new(Wall::A, 6, 15).unwrap();
    let b = BurnerKey::new(Wall::B, 1, 1).unwrap();
    let b2 = BurnerKey::new(Wall::B, 1, 2).unwrap();
    let b_next_row = BurnerKey::new(Wall::B, 2, 1).unwrap();

    assert!(a < b);
    assert!(b < b2);
    assert!(b2 < b_next_row);
}

#[test]
fn burner_key_display() {
    let key = BurnerKey::new(Wall::C, 3, 9).unwrap();
    assert_eq!(key.to_string(), "C/R3/B9");
}

#[test]
fn wall_parses_case_insensitively() {
    assert_eq!(Wall::from_str("A").unwrap(), Wall::A);
    assert_eq!(Wall::from_str("d").unwrap(), Wall::D);
    assert!(Wall::from_str("E").is_err());
    assert!(Wall::from_str("").is_err());
}

#[test]
fn burner_state_round_trips_through_its_letter() {
    for state in [
        BurnerState::Both,
        BurnerState::NgOnly,
        BurnerState::OffGas,
        BurnerState::Capped,
    ] {
        assert_eq!(BurnerState::from_str(state.letter()).unwrap(), state);
    }
    assert!(BurnerState::from_str("X").is_err());
    assert!(BurnerState::from_str("BN").is_err());
}
