//! Test fixtures for crawl-planner.
//!
//! Provides realistic test data including:
//! - Real Soho / Covent Garden venues (from OpenStreetMap)
//! - Builders that turn them into catalog venues with opening hours

pub mod soho_venues;

pub use soho_venues::*;
