//! Planner configuration.

use crate::search::SearchMode;

/// Default minutes spent at each venue.
pub const DEFAULT_DWELL_MINUTES: u32 = 20;

/// Tunables that are not part of an individual request.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub search_mode: SearchMode,

    /// Spacing of the instants used to ask the catalog for venues open
    /// during the tour window (minutes).
    pub tour_sample_minutes: u32,
}

impl PlannerConfig {
    pub fn new(search_mode: SearchMode, tour_sample_minutes: u32) -> Self {
        Self {
            search_mode,
            tour_sample_minutes,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::Sequential,
            tour_sample_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.search_mode, SearchMode::Sequential);
        assert_eq!(config.tour_sample_minutes, 30);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(SearchMode::Parallel, 15);

        assert_eq!(config.search_mode, SearchMode::Parallel);
        assert_eq!(config.tour_sample_minutes, 15);
    }
}
