use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::Parser;
use serde_json::json;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crawl_planner::catalog::InMemoryCatalog;
use crawl_planner::config::{DEFAULT_DWELL_MINUTES, PlannerConfig};
use crawl_planner::criteria::Criterion;
use crawl_planner::haversine::HaversineMatrix;
use crawl_planner::osrm::{OsrmClient, OsrmConfig};
use crawl_planner::planner::{PlanOutcome, RoutePlanner, RouteRequest};
use crawl_planner::search::SearchMode;
use crawl_planner::traits::TravelTimeProvider;
use crawl_planner::venue::{GeoPoint, VenueId};

/// Plan a walking route through venues.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file holding an array of venues.
    #[arg(long, env = "CRAWL_CATALOG")]
    catalog: PathBuf,

    /// Arrival at the first venue, e.g. 2024-03-15T18:00:00.
    #[arg(long)]
    start: NaiveDateTime,

    /// Maximum tour length in hours.
    #[arg(long)]
    hours: f64,

    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Search radius around --lon/--lat in meters.
    #[arg(long)]
    radius: Option<f64>,

    #[arg(long, default_value_t = 1)]
    min_venues: usize,

    #[arg(long, default_value_t = 5)]
    max_venues: usize,

    /// Minutes spent at each venue.
    #[arg(long, default_value_t = DEFAULT_DWELL_MINUTES)]
    dwell: u32,

    /// Venue id that must be on the route (repeatable).
    #[arg(long = "require")]
    required: Vec<String>,

    /// Tag every searched venue must carry (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Some venue on the route must carry this tag (repeatable).
    #[arg(long = "with-tag")]
    with_tags: Vec<String>,

    /// Some venue on the route must be rated at least this.
    #[arg(long)]
    min_rating: Option<f32>,

    /// Some venue on the route must serve an item whose name contains this.
    #[arg(long)]
    menu_item: Option<String>,

    /// Price ceiling for the menu-item match.
    #[arg(long)]
    menu_max_price: Option<f64>,

    /// OSRM base URL. Straight-line walking times are used when unset.
    #[arg(long, env = "CRAWL_OSRM_URL")]
    osrm_url: Option<String>,

    #[arg(long, env = "CRAWL_OSRM_PROFILE", default_value = "foot")]
    osrm_profile: String,

    #[arg(long, env = "CRAWL_OSRM_TIMEOUT_SECS", default_value_t = 10)]
    osrm_timeout_secs: u64,

    /// Search start venues on all cores.
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(self.start, self.hours, self.min_venues, self.max_venues)
            .dwell(self.dwell);
        request.required_venues = self.required.iter().map(VenueId::new).collect();
        request.tags = self.categories.clone();
        request.center = self.lon.zip(self.lat).map(|(lon, lat)| GeoPoint::new(lon, lat));
        request.radius_meters = self.radius;

        for tag in &self.with_tags {
            request = request.criterion(Criterion::tag(tag.clone()));
        }
        if let Some(rating) = self.min_rating {
            request = request.criterion(Criterion::min_rating(rating));
        }
        if self.menu_item.is_some() || self.menu_max_price.is_some() {
            request = request.criterion(Criterion::menu_item(
                self.menu_item.as_deref(),
                self.menu_max_price,
            ));
        }
        request
    }
}

fn print_errors(messages: Vec<String>) {
    println!("{}", json!({ "errors": messages }));
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match InMemoryCatalog::from_json_file(&args.catalog) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, "failed to load catalog");
            print_errors(vec![err.to_string()]);
            return ExitCode::FAILURE;
        }
    };

    let haversine = HaversineMatrix::default();
    let osrm = match &args.osrm_url {
        Some(base_url) => match OsrmClient::new(OsrmConfig {
            base_url: base_url.clone(),
            profile: args.osrm_profile.clone(),
            timeout_secs: args.osrm_timeout_secs,
        }) {
            Ok(client) => Some(client),
            Err(err) => {
                error!(error = %err, "failed to build OSRM client");
                print_errors(vec![err.to_string()]);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };
    let provider: &dyn TravelTimeProvider = match &osrm {
        Some(client) => client,
        None => &haversine,
    };

    let mode = if args.parallel {
        SearchMode::Parallel
    } else {
        SearchMode::Sequential
    };
    let planner = RoutePlanner::new(catalog, provider, PlannerConfig { search_mode: mode, ..PlannerConfig::default() });

    match planner.plan(&args.request()) {
        Ok(PlanOutcome::Found(route)) => {
            println!("{}", json!({ "route": route }));
            ExitCode::SUCCESS
        }
        Ok(PlanOutcome::NoRouteFound) => {
            print_errors(vec!["no route found for these criteria".to_string()]);
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "route planning failed");
            print_errors(err.messages());
            ExitCode::FAILURE
        }
    }
}
