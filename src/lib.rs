//! Reformer DB - burner wall monitoring API for reformer SCADA dashboards
//!
//! This library exposes the core modules for testing and reuse.

pub mod board;
pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod session;
pub mod store;
