//! In-memory venue catalog, loadable from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::CatalogError;
use crate::haversine::distance_meters;
use crate::hours::is_open_at;
use crate::traits::{VenueCatalog, VenueQuery};
use crate::venue::{Venue, VenueId};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    venues: Vec<Venue>,
}

impl InMemoryCatalog {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// Load a JSON array of venues.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let venues: Vec<Venue> = serde_json::from_reader(reader)?;
        debug!(path = %path.as_ref().display(), venues = venues.len(), "loaded venue catalog");
        Ok(Self::new(venues))
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    fn matches(venue: &Venue, query: &VenueQuery) -> bool {
        if distance_meters(query.center, venue.location) > query.radius_meters {
            return false;
        }
        if !query.open_at.is_empty() && !query.open_at.iter().any(|at| is_open_at(&venue.hours, *at)) {
            return false;
        }
        query.tags.iter().all(|tag| venue.has_tag(tag))
    }
}

impl VenueCatalog for InMemoryCatalog {
    fn venue_by_id(&self, id: &VenueId) -> Result<Option<Venue>, CatalogError> {
        Ok(self.venues.iter().find(|venue| &venue.id == id).cloned())
    }

    fn venues_matching(&self, query: &VenueQuery) -> Result<Vec<Venue>, CatalogError> {
        Ok(self
            .venues
            .iter()
            .filter(|venue| Self::matches(venue, query))
            .cloned()
            .collect())
    }
}
