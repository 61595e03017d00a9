//! Unit tests for shared route helpers and response mapping.
//!
//! Run with: cargo test --test routes_unit_test

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Utc;
use reformer_db::entity::tip_damage;
use reformer_db::routes::determine_format;
use reformer_db::routes::tip_damage::TipDamageResponse;
use uuid::Uuid;

#[test]
fn query_format_wins_over_accept() {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    assert_eq!(determine_format("csv", &headers), "csv");
    assert_eq!(determine_format("CSV", &headers), "csv");
}

#[test]
fn accept_header_selects_csv_when_query_is_default() {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("text/csv"));
    assert_eq!(determine_format("json", &headers), "csv");

    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/csv;q=0.5"),
    );
    assert_eq!(determine_format("json", &headers), "csv");
}

#[test]
fn default_format_is_json() {
    assert_eq!(determine_format("json", &HeaderMap::new()), "json");
}

#[test]
fn tip_damage_response_reports_the_stored_id() {
    // The upsert returns the row as the database kept it; a conflicting
    // write keeps the first id, and the response must carry that one.
    let stored = Uuid::new_v4();
    let model = tip_damage::Model {
        id: stored,
        wall: "A".to_string(),
        row: 2,
        burner_num: 5,
        damaged: "Yes".to_string(),
        damage_date: Some(Utc::now().into()),
        replaced: "No".to_string(),
        replace_date: None,
        remarks: Some("tip eroded".to_string()),
        updated_at: Utc::now().into(),
    };

    let response = TipDamageResponse::from(model);
    assert_eq!(response.id, stored);
    assert_eq!(response.damaged, "Yes");
    assert!(response.replace_date.is_none());
}
