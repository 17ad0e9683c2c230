//! Route planning entry point.
//!
//! Validates a request, gathers candidate venues from the catalog, fetches
//! travel times, runs the constrained search and assembles the result.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assembly::{AssemblyError, Route, assemble_route};
use crate::config::{DEFAULT_DWELL_MINUTES, PlannerConfig};
use crate::criteria::{Criterion, satisfaction_sets};
use crate::error::PlanError;
use crate::hours::WeeklyHours;
use crate::matrix::{DurationMatrix, build_neighbor_lists};
use crate::search::{SearchInput, SearchParams, find_route};
use crate::traits::{TravelTimeProvider, VenueCatalog, VenueQuery};
use crate::venue::{GeoPoint, Venue, VenueId};

fn default_dwell_minutes() -> u32 {
    DEFAULT_DWELL_MINUTES
}

/// A route-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Venues that must appear on the route.
    #[serde(default)]
    pub required_venues: Vec<VenueId>,
    /// Arrival time at the first venue.
    pub start_time: NaiveDateTime,
    pub max_tour_hours: f64,
    /// Centre of the candidate search area.
    #[serde(default)]
    pub center: Option<GeoPoint>,
    #[serde(default)]
    pub radius_meters: Option<f64>,
    pub min_venues: usize,
    pub max_venues: usize,
    #[serde(default = "default_dwell_minutes")]
    pub dwell_minutes: u32,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    /// Tags every searched candidate must carry. Required venues are exempt.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RouteRequest {
    pub fn new(start_time: NaiveDateTime, max_tour_hours: f64, min_venues: usize, max_venues: usize) -> Self {
        Self {
            required_venues: Vec::new(),
            start_time,
            max_tour_hours,
            center: None,
            radius_meters: None,
            min_venues,
            max_venues,
            dwell_minutes: DEFAULT_DWELL_MINUTES,
            criteria: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn around(mut self, center: GeoPoint, radius_meters: f64) -> Self {
        self.center = Some(center);
        self.radius_meters = Some(radius_meters);
        self
    }

    pub fn require(mut self, id: impl Into<String>) -> Self {
        self.required_venues.push(VenueId::new(id));
        self
    }

    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn dwell(mut self, minutes: u32) -> Self {
        self.dwell_minutes = minutes;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// The tour length in whole minutes.
    pub fn time_budget_minutes(&self) -> u32 {
        (self.max_tour_hours * 60.0).round().clamp(0.0, f64::from(u32::MAX)) as u32
    }

    fn unique_required(&self) -> Vec<&VenueId> {
        let mut seen = HashSet::new();
        self.required_venues
            .iter()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Check the request, reporting every problem at once.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut problems = Vec::new();
        let required = self.unique_required().len();

        if !(self.max_tour_hours.is_finite() && self.max_tour_hours > 0.0) {
            problems.push("max_tour_hours must be positive".to_string());
        }
        if self.min_venues == 0 {
            problems.push("min_venues must be at least 1".to_string());
        }
        if self.min_venues > self.max_venues {
            problems.push("min_venues must not exceed max_venues".to_string());
        }
        if required > self.max_venues {
            problems.push(format!(
                "{required} required venues do not fit in max_venues {}",
                self.max_venues
            ));
        }

        match (self.center, self.radius_meters) {
            (Some(_), Some(radius)) if !(radius.is_finite() && radius > 0.0) => {
                problems.push("radius_meters must be positive".to_string());
            }
            (Some(_), None) => problems.push("a search center needs radius_meters".to_string()),
            (None, Some(_)) => problems.push("radius_meters needs a search center".to_string()),
            (None, None) if required == 0 => {
                problems.push("either a search center or required venues must be given".to_string());
            }
            (None, None) if self.min_venues > required => {
                problems.push(format!(
                    "min_venues {} exceeds the {required} required venues and no search area was given",
                    self.min_venues
                ));
            }
            _ => {}
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PlanError::InvalidRequest(problems))
        }
    }
}

/// Result of a plan that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Found(Route),
    /// Every start was tried and none produced a feasible path.
    NoRouteFound,
}

impl PlanOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PlanOutcome::Found(route) => Some(route),
            PlanOutcome::NoRouteFound => None,
        }
    }
}

impl From<AssemblyError> for PlanError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Routing(err) => PlanError::Routing(err),
            other => PlanError::Internal(other.to_string()),
        }
    }
}

/// Plans routes against a venue catalog and a travel-time provider.
pub struct RoutePlanner<C, T> {
    catalog: C,
    provider: T,
    config: PlannerConfig,
}

impl<C: VenueCatalog, T: TravelTimeProvider> RoutePlanner<C, T> {
    pub fn new(catalog: C, provider: T, config: PlannerConfig) -> Self {
        Self {
            catalog,
            provider,
            config,
        }
    }

    pub fn plan(&self, request: &RouteRequest) -> Result<PlanOutcome, PlanError> {
        request.validate()?;

        let (candidates, required) = self.collect_candidates(request)?;
        if candidates.is_empty() {
            info!("no candidate venues for request");
            return Err(PlanError::NoCandidates);
        }
        info!(candidates = candidates.len(), required = required.len(), "collected route candidates");

        let criteria = satisfaction_sets(&candidates, &request.criteria);
        if let Some(position) = criteria.iter().position(|set| set.is_empty()) {
            info!(criterion = position, "no candidate satisfies a criterion");
            return Ok(PlanOutcome::NoRouteFound);
        }

        let matrix = self.duration_matrix(&candidates)?;
        let neighbors = if candidates.len() == 1 {
            vec![Vec::new()]
        } else {
            build_neighbor_lists(&matrix)
        };
        let hours = candidates
            .iter()
            .map(|venue| WeeklyHours::new(&venue.hours))
            .collect();

        let params = SearchParams {
            time_budget_minutes: request.time_budget_minutes(),
            dwell_minutes: request.dwell_minutes,
            start_time: request.start_time,
            min_venues: request.min_venues,
            max_venues: request.max_venues,
            required,
        };
        let input = SearchInput::new(neighbors, hours, criteria, params);

        match find_route(&input, self.config.search_mode) {
            Some(outcome) => {
                let route = assemble_route(&outcome, &candidates, request.start_time, &self.provider)?;
                info!(venues = route.stops.len(), elapsed_minutes = route.elapsed_minutes, "route found");
                Ok(PlanOutcome::Found(route))
            }
            None => {
                info!("no route found for these criteria");
                Ok(PlanOutcome::NoRouteFound)
            }
        }
    }

    /// Required venues first, then area matches not already included.
    /// Also returns the candidate indices of the required venues.
    fn collect_candidates(&self, request: &RouteRequest) -> Result<(Vec<Venue>, Vec<usize>), PlanError> {
        let mut candidates = Vec::new();
        let mut missing = Vec::new();
        for id in request.unique_required() {
            match self.catalog.venue_by_id(id)? {
                Some(venue) => candidates.push(venue),
                None => missing.push(format!("required venue {id} not found")),
            }
        }
        if !missing.is_empty() {
            return Err(PlanError::InvalidRequest(missing));
        }
        let required: Vec<usize> = (0..candidates.len()).collect();

        if let (Some(center), Some(radius_meters)) = (request.center, request.radius_meters) {
            let query = VenueQuery {
                center,
                radius_meters,
                open_at: self.tour_samples(request),
                tags: request.tags.clone(),
            };
            let found = self.catalog.venues_matching(&query)?;
            debug!(matched = found.len(), "catalog area query");

            let mut seen: HashSet<VenueId> = candidates.iter().map(|venue| venue.id.clone()).collect();
            candidates.extend(found.into_iter().filter(|venue| seen.insert(venue.id.clone())));
        }

        Ok((candidates, required))
    }

    /// Instants across the tour window, both ends included.
    fn tour_samples(&self, request: &RouteRequest) -> Vec<NaiveDateTime> {
        let budget = request.time_budget_minutes();
        let step = self.config.tour_sample_minutes.max(1);
        let mut samples: Vec<NaiveDateTime> = (0..=budget)
            .step_by(step as usize)
            .map(|minutes| request.start_time + Duration::minutes(i64::from(minutes)))
            .collect();
        if budget % step != 0 {
            samples.push(request.start_time + Duration::minutes(i64::from(budget)));
        }
        samples
    }

    fn duration_matrix(&self, candidates: &[Venue]) -> Result<DurationMatrix, PlanError> {
        if candidates.len() == 1 {
            return Ok(DurationMatrix::single());
        }

        let points: Vec<GeoPoint> = candidates.iter().map(|venue| venue.location).collect();
        let matrix = self.provider.durations(&points).inspect_err(|err| {
            warn!(error = %err, points = points.len(), "duration matrix request failed");
        })?;
        matrix
            .expect_size(points.len())
            .map_err(|err| PlanError::Routing(err.into()))?;
        Ok(matrix)
    }
}
