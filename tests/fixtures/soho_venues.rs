//! Real Soho / Covent Garden venues for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. These are real, walkable
//! locations that route with the OSRM Greater London extract.

use chrono::Weekday;

use crawl_planner::venue::{ClockTime, GeoPoint, HoursEntry, MenuItem, Venue};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lng, self.lat)
    }
}

/// Soho Square, a convenient search center.
pub const SOHO_SQUARE: Location = Location::new("soho-square", "Soho Square", 51.5154, -0.1320);

// ============================================================================
// Soho Pubs
// ============================================================================

pub const FRENCH_HOUSE: Location = Location::new("french-house", "The French House", 51.5133, -0.1318);
pub const COACH_AND_HORSES: Location =
    Location::new("coach-and-horses", "Coach and Horses", 51.5128, -0.1311);
pub const DOG_AND_DUCK: Location = Location::new("dog-and-duck", "The Dog and Duck", 51.5144, -0.1324);
pub const TOUCAN: Location = Location::new("toucan", "The Toucan", 51.5151, -0.1330);
pub const BLUE_POSTS: Location = Location::new("blue-posts", "The Blue Posts", 51.5135, -0.1350);
pub const CROWN_AND_TWO_CHAIRMEN: Location =
    Location::new("crown-two-chairmen", "The Crown & Two Chairmen", 51.5145, -0.1325);

// ============================================================================
// Covent Garden
// ============================================================================

pub const LAMB_AND_FLAG: Location = Location::new("lamb-and-flag", "The Lamb and Flag", 51.5115, -0.1260);
pub const HARP: Location = Location::new("harp", "The Harp", 51.5096, -0.1254);
pub const SALISBURY: Location = Location::new("salisbury", "The Salisbury", 51.5107, -0.1275);

// ============================================================================
// Wine Bars, Cafes and Music
// ============================================================================

pub const CORK_AND_BOTTLE: Location = Location::new("cork-and-bottle", "Cork & Bottle", 51.5111, -0.1294);
pub const GORDONS: Location = Location::new("gordons", "Gordon's Wine Bar", 51.5078, -0.1228);
pub const BAR_ITALIA: Location = Location::new("bar-italia", "Bar Italia", 51.5136, -0.1317);
pub const RONNIE_SCOTTS: Location = Location::new("ronnie-scotts", "Ronnie Scott's", 51.5134, -0.1316);

// ============================================================================
// Outside the West End
// ============================================================================

pub const MAYFLOWER: Location = Location::new("mayflower", "The Mayflower", 51.5020, -0.0540);

// ============================================================================
// Builders
// ============================================================================

fn clock(hour: u8, minute: u8) -> ClockTime {
    ClockTime::new(hour, minute).expect("valid clock time")
}

/// The same window every day of the week.
pub fn daily(open: (u8, u8), close: (u8, u8)) -> Vec<HoursEntry> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .map(|day| HoursEntry::new(day, clock(open.0, open.1), clock(close.0, close.1)))
    .collect()
}

pub fn venue(location: &Location, tags: &[&str], hours: Vec<HoursEntry>) -> Venue {
    let mut venue = Venue::new(location.id, location.point());
    venue.name = location.name.to_string();
    venue.tags = tags.iter().map(|tag| tag.to_string()).collect();
    venue.hours = hours;
    venue
}

/// The whole catalog, in a fixed order.
pub fn soho_catalog() -> Vec<Venue> {
    let pub_hours = || daily((11, 0), (23, 0));

    let mut french_house = venue(&FRENCH_HOUSE, &["pub"], daily((12, 0), (23, 0)));
    french_house.rating = Some(4.6);
    french_house.menu.push(MenuItem::new("Half of Guinness", 3.9));

    let mut cork_and_bottle = venue(&CORK_AND_BOTTLE, &["wine"], daily((11, 0), (23, 0)));
    cork_and_bottle.rating = Some(4.5);
    cork_and_bottle.menu.push(MenuItem::new("Ham and Cheese Pie", 12.5));

    let mut gordons = venue(&GORDONS, &["wine"], daily((11, 0), (23, 0)));
    gordons.rating = Some(4.3);
    gordons.menu.push(MenuItem::new("Cheese Platter", 14.0).with_flag("vegetarian"));

    let mut ronnie_scotts = venue(&RONNIE_SCOTTS, &["jazz", "live-music"], daily((18, 0), (23, 59)));
    ronnie_scotts.rating = Some(4.7);

    let mut bar_italia = venue(&BAR_ITALIA, &["cafe"], HoursEntry::always_open());
    bar_italia.menu.push(MenuItem::new("Espresso", 2.8));

    vec![
        french_house,
        venue(&COACH_AND_HORSES, &["pub"], pub_hours()),
        venue(&DOG_AND_DUCK, &["pub"], daily((12, 0), (23, 0))),
        venue(&TOUCAN, &["pub"], pub_hours()),
        venue(&BLUE_POSTS, &["pub"], pub_hours()),
        venue(&CROWN_AND_TWO_CHAIRMEN, &["pub"], pub_hours()),
        venue(&LAMB_AND_FLAG, &["pub"], pub_hours()),
        venue(&HARP, &["pub"], pub_hours()),
        venue(&SALISBURY, &["pub"], pub_hours()),
        cork_and_bottle,
        gordons,
        bar_italia,
        ronnie_scotts,
        venue(&MAYFLOWER, &["pub"], daily((12, 0), (23, 0))),
    ]
}
