//! Listing and mutating stations from the command line.

use chrono::Local;
use fp_app::session::random_station;
use fp_core::{Station, StationPatch, StationStatus};
use fp_store::{ListQuery, StationStore};
use fp_utils::dates::format_clock;
use fp_utils::geo::LatLon;
use log::info;
use rand::Rng;

/// One line per station: id, status, title and coordinates.
pub fn format_station(station: &Station) -> String {
    format!(
        "{}  {:<17}  {}  ({})",
        station.id,
        station.status.as_str(),
        station.title,
        station.coordinates_label()
    )
}

pub async fn list<S: StationStore>(
    store: &S,
    status: Option<StationStatus>,
) -> anyhow::Result<Vec<String>> {
    let mut query = ListQuery::default();
    if let Some(status) = status {
        query = query.with_status(status);
    }
    let stations = store.list(&query).await?;
    info!("{} feeding points", stations.len());
    Ok(stations.iter().map(format_station).collect())
}

/// Stations ordered by distance from `origin`, nearest first.
///
/// Stations with unusable coordinates are left out.
pub fn nearest(stations: Vec<Station>, origin: LatLon, limit: usize) -> Vec<(Station, f64)> {
    let mut ranked: Vec<(Station, f64)> = stations
        .into_iter()
        .filter_map(|station| {
            let distance = station.position()?.distance_km(&origin);
            Some((station, distance))
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(limit);
    ranked
}

pub async fn nearby<S: StationStore>(
    store: &S,
    lat: f64,
    lon: f64,
    limit: usize,
) -> anyhow::Result<Vec<String>> {
    let origin = LatLon::new(lat, lon)?;
    let stations = store.list(&ListQuery::default()).await?;
    Ok(nearest(stations, origin, limit)
        .iter()
        .map(|(station, km)| format!("{:>8.2} km  {}", km, format_station(station)))
        .collect())
}

pub async fn add_random<S: StationStore, R: Rng>(store: &S, rng: &mut R) -> anyhow::Result<Station> {
    let station = random_station(rng, &format_clock(&Local::now().time()));
    let created = store.insert(&station).await?;
    info!("created feeding point {}", created.id);
    Ok(created)
}

pub async fn refill<S: StationStore>(store: &S, id: &str) -> anyhow::Result<()> {
    store.update(id, &StationPatch::refilled()).await?;
    info!("feeding point {} refilled", id);
    Ok(())
}
