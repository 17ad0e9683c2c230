//! crawl-planner core
//!
//! Plans multi-stop walking routes through venues under opening-hours,
//! time-budget, required-venue and selection-criteria constraints.

pub mod assembly;
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod error;
pub mod haversine;
pub mod hours;
pub mod matrix;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod search;
pub mod traits;
pub mod venue;
