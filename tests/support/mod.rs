//! Shared OSRM container setup for the Docker-backed tests.

pub mod osrm_dataset;

use std::env;
use std::time::{Duration, Instant, UNIX_EPOCH};

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use crawl_planner::osrm::{OsrmClient, OsrmConfig};
use crawl_planner::traits::TravelTimeProvider;
use crawl_planner::venue::GeoPoint;

use osrm_dataset::{GeofabrikRegion, OSRM_IMAGE, OsrmDataset, OsrmDatasetConfig};

pub const LONDON_REGION: &str = "europe/united-kingdom/england/greater-london";

/// Start (or reuse) an OSRM server for `region` with the foot profile.
/// Returns the container and the server's base URL.
pub fn osrm_container(region: &str) -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let data_root = env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".to_string());
    let region = GeofabrikRegion::new(region);
    let config = OsrmDatasetConfig::walking(region.clone(), data_root);
    let dataset = OsrmDataset::ensure(&config)
        .map_err(|err| TestcontainersError::other(format!("OSRM prep failed: {err}")))?;

    let mtime = std::fs::metadata(dataset.osrm_base.with_extension("osrm.partition"))
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or(0);
    let container_name = format!("osrm-{}-foot-{mtime}", region.name());

    let image = GenericImage::new(OSRM_IMAGE, "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(
            dataset.data_dir.to_string_lossy().to_string(),
            "/data",
        ))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            dataset.container_graph(),
        ])
        .with_container_name(container_name)
        .with_startup_timeout(Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;

    Ok((container, format!("http://127.0.0.1:{port}")))
}

pub fn walking_client(base_url: &str) -> OsrmClient {
    OsrmClient::new(OsrmConfig {
        base_url: base_url.to_string(),
        profile: "foot".to_string(),
        timeout_secs: 30,
    })
    .expect("build OSRM client")
}

/// Poll the table service until it answers, since the server may still be
/// loading the graph right after the container starts.
pub fn wait_until_ready(client: &OsrmClient, points: &[GeoPoint]) {
    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(15) {
        if client.durations(points).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(500));
    }
    panic!("OSRM did not become ready at {}", client.config().base_url);
}

