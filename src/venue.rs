//! Venue records as served by the catalog.
//!
//! These are read-only to the planner: the search only consults locations,
//! opening hours, tags, ratings and menu items.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Catalog identifier for a venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Wall-clock time of day at minute granularity.
///
/// Field order matters: the derived ordering compares the hour first and the
/// minute only as a tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// Returns `None` for hours past 23 or minutes past 59.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };
    pub const LAST_MINUTE: ClockTime = ClockTime { hour: 23, minute: 59 };
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One row of a venue's weekly opening-hours table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub day: Weekday,
    pub open: ClockTime,
    pub close: ClockTime,
}

impl HoursEntry {
    pub fn new(day: Weekday, open: ClockTime, close: ClockTime) -> Self {
        Self { day, open, close }
    }

    /// Open from 00:00 through 23:59 on `day`.
    pub fn open_all_day(day: Weekday) -> Self {
        Self::new(day, ClockTime::MIDNIGHT, ClockTime::LAST_MINUTE)
    }

    /// A table open all day on every day of the week.
    pub fn always_open() -> Vec<Self> {
        ALL_WEEKDAYS.iter().map(|day| Self::open_all_day(*day)).collect()
    }
}

pub(crate) const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A menu item, consulted only when evaluating selection criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            flags: Vec::new(),
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    #[serde(default)]
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub hours: Vec<HoursEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl Venue {
    /// A venue with no hours, tags, rating or menu.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: VenueId::new(id),
            name: String::new(),
            location,
            hours: Vec::new(),
            tags: Vec::new(),
            rating: None,
            menu: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
