//! Screen state for the map host.
//!
//! `MapModel` holds everything the map screen shows and exposes one method per
//! state transition. The detail view model is never stored: [`MapModel::details`]
//! derives it from the selected station on every call.

use chrono::{DateTime, Utc};
use fp_core::{Comment, DetailExtras, PointDetailsData, Station, StationStatus};
use fp_store::StoreError;
use fp_utils::geo::LatLon;
use serde::Serialize;
use std::collections::HashMap;

/// Map centre used before any station is loaded (São Paulo).
pub const DEFAULT_CENTER: LatLon = LatLon {
    latitude: -23.55052,
    longitude: -46.633308,
};

/// Author shown on comments written on this device.
pub const DEFAULT_AUTHOR: &str = "voce";

/// Gallery shown in the sheet until the backend stores media per station.
pub const PLACEHOLDER_IMAGES: [&str; 3] = [
    "https://picsum.photos/seed/comedouro-1/800/480",
    "https://picsum.photos/seed/comedouro-2/800/480",
    "https://picsum.photos/seed/comedouro-3/800/480",
];

/// Social data shown for every station while the backend has none.
pub fn placeholder_extras() -> DetailExtras {
    DetailExtras {
        rating: 4.6,
        ratings_count: 38,
        likes_count: 128,
        images: PLACEHOLDER_IMAGES.iter().map(|url| url.to_string()).collect(),
    }
}

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavTab {
    #[default]
    Home,
    Search,
    Favorites,
    Profile,
}

impl NavTab {
    pub const ALL: [NavTab; 4] = [NavTab::Home, NavTab::Search, NavTab::Favorites, NavTab::Profile];

    /// Icon name for the (inactive, active) states.
    pub fn icons(&self) -> (&'static str, &'static str) {
        match self {
            NavTab::Home => ("home-outline", "home"),
            NavTab::Search => ("search-outline", "search"),
            NavTab::Favorites => ("heart-outline", "heart"),
            NavTab::Profile => ("person-outline", "person"),
        }
    }
}

/// A blocking message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapModel {
    stations: Vec<Station>,
    loading: bool,
    adding: bool,
    error: Option<String>,
    selected: Option<String>,
    location: Option<LatLon>,
    comments: HashMap<String, Vec<Comment>>,
    extras: DetailExtras,
    alert: Option<Alert>,
    active_tab: NavTab,
}

impl Default for MapModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MapModel {
    /// Initial state: loading, nothing selected, location unknown.
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            loading: true,
            adding: false,
            error: None,
            selected: None,
            location: None,
            comments: HashMap::new(),
            extras: DetailExtras::default(),
            alert: None,
            active_tab: NavTab::Home,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn raise_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn active_tab(&self) -> NavTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: NavTab) {
        self.active_tab = tab;
    }

    pub fn location(&self) -> Option<LatLon> {
        self.location
    }

    pub fn set_location(&mut self, location: Option<LatLon>) {
        self.location = location;
    }

    /// Social/media data used for every station's detail sheet.
    pub fn set_detail_extras(&mut self, extras: DetailExtras) {
        self.extras = extras;
    }

    // ───────────────────── Station list ─────────────────────

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch result. The latest completed fetch wins.
    pub fn finish_refresh(&mut self, result: Result<Vec<Station>, StoreError>) {
        match result {
            Ok(stations) => self.stations = stations,
            Err(e) => {
                self.error = Some(e.to_string());
                self.stations.clear();
            }
        }
        self.loading = false;
    }

    pub fn begin_insert(&mut self) {
        self.adding = true;
        self.error = None;
    }

    /// Apply an insert result. Returns true on success.
    pub fn finish_insert(&mut self, result: Result<Station, StoreError>) -> bool {
        self.adding = false;
        match result {
            Ok(_) => true,
            Err(e) => {
                self.alert = Some(Alert::new("Erro ao adicionar comedouro", e.to_string()));
                false
            }
        }
    }

    /// Apply a refill result for `id`. On success only the status changes locally.
    pub fn finish_refill(&mut self, id: &str, result: Result<(), StoreError>) -> bool {
        match result {
            Ok(()) => {
                if let Some(station) = self.stations.iter_mut().find(|s| s.id == id) {
                    station.status = StationStatus::Ok;
                }
                true
            }
            Err(e) => {
                self.alert = Some(Alert::new("Erro ao reabastecer", e.to_string()));
                false
            }
        }
    }

    // ───────────────────── Selection ─────────────────────

    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Detail view model for the selection, if the selected station is loaded.
    pub fn details(&self) -> Option<PointDetailsData> {
        let station = self.station(self.selected.as_deref()?)?;
        Some(PointDetailsData::derive(
            station,
            self.location,
            &self.extras,
            self.comments_for(&station.id).len(),
        ))
    }

    // ───────────────────── Comments ─────────────────────

    /// Comments for a station, newest first.
    pub fn comments_for(&self, station_id: &str) -> &[Comment] {
        self.comments
            .get(station_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Prepend a comment. Blank text is ignored; returns whether one was added.
    pub fn add_comment(
        &mut self,
        station_id: &str,
        text: &str,
        author: &str,
        at: &DateTime<Utc>,
    ) -> bool {
        match Comment::compose(author, text, at) {
            Some(comment) => {
                self.comments
                    .entry(station_id.to_string())
                    .or_default()
                    .insert(0, comment);
                true
            }
            None => false,
        }
    }

    /// Region to show: the default centre, or the most recent station.
    pub fn map_region(&self) -> MapRegion {
        match self.stations.first() {
            Some(station) => MapRegion {
                latitude: station.latitude,
                longitude: station.longitude,
                latitude_delta: 0.04,
                longitude_delta: 0.04,
            },
            None => MapRegion {
                latitude: DEFAULT_CENTER.latitude,
                longitude: DEFAULT_CENTER.longitude,
                latitude_delta: 0.08,
                longitude_delta: 0.08,
            },
        }
    }
}
