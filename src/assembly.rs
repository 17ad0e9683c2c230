//! Turn a search result into a route with venue records and geometry.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::RoutingError;
use crate::search::SearchOutcome;
use crate::traits::TravelTimeProvider;
use crate::venue::{GeoPoint, Venue};

/// One visit on a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub venue: Venue,
    pub arrival: NaiveDateTime,
}

/// A materialised route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub stops: Vec<RouteStop>,
    /// Encoded polyline. Empty for a single-stop route.
    pub geometry: String,
    /// Minutes from the first arrival to the last.
    pub elapsed_minutes: u32,
}

impl Route {
    pub fn venue_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.venue.id.as_str()).collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// The routing service could not draw the route.
    #[error("routing provider failed: {0}")]
    Routing(#[from] RoutingError),

    /// The path references a venue outside the candidate pool.
    #[error("path index {index} is outside the {candidates} candidates")]
    InvalidIndex { index: usize, candidates: usize },

    #[error("path and arrival times differ in length ({path} vs {arrivals})")]
    ArrivalMismatch { path: usize, arrivals: usize },
}

/// Resolve `outcome` against `candidates` and fetch its geometry.
///
/// The provider is only consulted when the route has more than one stop.
pub fn assemble_route<T: TravelTimeProvider>(
    outcome: &SearchOutcome,
    candidates: &[Venue],
    start_time: NaiveDateTime,
    provider: &T,
) -> Result<Route, AssemblyError> {
    if outcome.path.len() != outcome.arrivals.len() {
        error!(
            path = outcome.path.len(),
            arrivals = outcome.arrivals.len(),
            "search outcome is inconsistent"
        );
        return Err(AssemblyError::ArrivalMismatch {
            path: outcome.path.len(),
            arrivals: outcome.arrivals.len(),
        });
    }

    let mut stops = Vec::with_capacity(outcome.path.len());
    for (index, elapsed) in outcome.path.iter().zip(&outcome.arrivals) {
        let venue = candidates.get(*index).ok_or_else(|| {
            error!(index, candidates = candidates.len(), "path index out of range");
            AssemblyError::InvalidIndex {
                index: *index,
                candidates: candidates.len(),
            }
        })?;
        stops.push(RouteStop {
            venue: venue.clone(),
            arrival: start_time + Duration::minutes(i64::from(*elapsed)),
        });
    }

    let geometry = if stops.len() > 1 {
        let points: Vec<GeoPoint> = stops.iter().map(|stop| stop.venue.location).collect();
        provider.route_polyline(&points).map_err(|err| {
            warn!(error = %err, stops = points.len(), "route geometry request failed");
            AssemblyError::Routing(err)
        })?
    } else {
        String::new()
    };

    Ok(Route {
        stops,
        geometry,
        elapsed_minutes: outcome.elapsed_minutes(),
    })
}
