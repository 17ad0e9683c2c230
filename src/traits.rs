//! Interfaces to the planner's external collaborators.
//!
//! These are intentionally narrow. The planner only needs to look venues up
//! and to ask some routing service for travel times and route geometry.

use chrono::NaiveDateTime;

use crate::error::{CatalogError, RoutingError};
use crate::matrix::DurationMatrix;
use crate::venue::{GeoPoint, Venue, VenueId};

/// Candidate query against the venue catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueQuery {
    pub center: GeoPoint,
    pub radius_meters: f64,
    /// Keep venues open at any of these instants. Empty means no time filter.
    pub open_at: Vec<NaiveDateTime>,
    /// Keep venues carrying every one of these tags.
    pub tags: Vec<String>,
}

/// Read access to venue records.
pub trait VenueCatalog {
    fn venue_by_id(&self, id: &VenueId) -> Result<Option<Venue>, CatalogError>;

    /// Venues matching `query`, in a stable order.
    fn venues_matching(&self, query: &VenueQuery) -> Result<Vec<Venue>, CatalogError>;
}

/// Provides travel durations and route geometry between coordinates.
///
/// The matrix is indexed by the provided coordinate order. Callers handle a
/// single coordinate themselves and never pass one here.
pub trait TravelTimeProvider {
    /// Pairwise durations in whole minutes.
    fn durations(&self, points: &[GeoPoint]) -> Result<DurationMatrix, RoutingError>;

    /// Encoded polyline visiting `points` in order.
    fn route_polyline(&self, points: &[GeoPoint]) -> Result<String, RoutingError>;
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for &T {
    fn durations(&self, points: &[GeoPoint]) -> Result<DurationMatrix, RoutingError> {
        (**self).durations(points)
    }

    fn route_polyline(&self, points: &[GeoPoint]) -> Result<String, RoutingError> {
        (**self).route_polyline(points)
    }
}

impl<C: VenueCatalog + ?Sized> VenueCatalog for &C {
    fn venue_by_id(&self, id: &VenueId) -> Result<Option<Venue>, CatalogError> {
        (**self).venue_by_id(id)
    }

    fn venues_matching(&self, query: &VenueQuery) -> Result<Vec<Venue>, CatalogError> {
        (**self).venues_matching(query)
    }
}
