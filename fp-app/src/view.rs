//! Render descriptions derived from the model.
//!
//! Everything here is a pure function of its inputs; the UI layer turns these
//! structs into markup without computing anything itself.

use crate::model::{MapModel, MapRegion};
use fp_core::{Comment, PointDetailsData, Station, StationStatus};
use fp_sheet::DetailSheet;
use serde::Serialize;

pub const LOADING_LABEL: &str = "Carregando comedouros...";
pub const EMPTY_LIST_LABEL: &str = "Nenhum ponto cadastrado ainda.";
pub const DISTANCE_UNAVAILABLE: &str = "indisponivel";

/// Number of stars in a rating row.
pub const STAR_COUNT: usize = 5;

/// One pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
}

impl MarkerView {
    fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            title: station.title.clone(),
            description: format!("status: {}", station.status.as_str()),
            latitude: station.latitude,
            longitude: station.longitude,
            color: station.status.color(),
        }
    }
}

/// What the map surface shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub region: MapRegion,
    pub markers: Vec<MarkerView>,
    pub loading: bool,
    pub adding: bool,
    pub error: Option<String>,
}

pub fn map_view(model: &MapModel) -> MapView {
    MapView {
        region: model.map_region(),
        markers: model.stations().iter().map(MarkerView::from_station).collect(),
        loading: model.is_loading(),
        adding: model.is_adding(),
        error: model.error().map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationCardView {
    pub id: String,
    pub title: String,
    pub coordinates: String,
    pub notes: Option<String>,
    pub status: StationStatus,
}

impl From<&Station> for StationCardView {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            title: station.title.clone(),
            coordinates: station.coordinates_label(),
            notes: station.notes.clone().filter(|n| !n.is_empty()),
            status: station.status,
        }
    }
}

/// The station list screen: a spinner, an error, an empty message or cards.
#[derive(Debug, Clone, PartialEq)]
pub enum StationListView {
    Loading,
    Error(String),
    Empty,
    Cards(Vec<StationCardView>),
}

pub fn station_list_view(model: &MapModel) -> StationListView {
    if model.is_loading() {
        return StationListView::Loading;
    }
    if let Some(error) = model.error() {
        return StationListView::Error(error.to_string());
    }
    match model.stations() {
        [] => StationListView::Empty,
        stations => StationListView::Cards(stations.iter().map(StationCardView::from).collect()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    pub fn icon(&self) -> &'static str {
        match self {
            Star::Full => "star",
            Star::Half => "star-half",
            Star::Empty => "star-outline",
        }
    }
}

/// Five stars: `floor(rating)` full, then a half star if the remainder is at least 0.5.
pub fn rating_stars(rating: f64) -> [Star; STAR_COUNT] {
    let rating = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
    let full = rating.floor();
    let has_half = rating - full >= 0.5;
    let full = full as usize;
    let mut stars = [Star::Empty; STAR_COUNT];
    for (index, star) in stars.iter_mut().enumerate() {
        if index < full {
            *star = Star::Full;
        } else if index == full && has_half {
            *star = Star::Half;
        }
    }
    stars
}

pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{:.2} km", km),
        None => DISTANCE_UNAVAILABLE.to_string(),
    }
}

pub fn likes_label(count: u32) -> String {
    format!("{} curtidas", count)
}

pub fn comments_label(count: u32) -> String {
    format!("{} comentarios", count)
}

pub fn ratings_label(count: u32) -> String {
    format!("{} avaliacoes", count)
}

/// Page shown by a horizontally paged carousel scrolled to `offset_x`.
pub fn carousel_index(offset_x: f64, item_width: f64, len: usize) -> usize {
    if len == 0 || !(item_width > 0.0) {
        return 0;
    }
    let page = (offset_x / item_width).round();
    if page.is_nan() || page < 0.0 {
        0
    } else {
        (page as usize).min(len - 1)
    }
}

pub fn carousel_label(index: usize, len: usize) -> String {
    format!("{}/{}", index + 1, len)
}

/// Everything the detail sheet body renders for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetView {
    pub title: String,
    pub point_type: &'static str,
    pub status: &'static str,
    pub status_color: &'static str,
    pub distance: String,
    pub stars: [Star; STAR_COUNT],
    pub rating: String,
    pub ratings: String,
    pub liked: bool,
    pub favorited: bool,
    pub likes: String,
    pub comments: String,
    pub images: Vec<String>,
    pub comment_list: Vec<Comment>,
}

pub fn sheet_view(details: &PointDetailsData, sheet: &DetailSheet, comments: &[Comment]) -> SheetView {
    SheetView {
        title: details.title.clone(),
        point_type: details.point_type.as_str(),
        status: details.status.as_str(),
        status_color: details.status.color(),
        distance: format_distance(details.distance_km),
        stars: rating_stars(details.rating),
        rating: format!("{:.1}", details.rating),
        ratings: ratings_label(details.ratings_count),
        liked: sheet.liked(),
        favorited: sheet.favorited(),
        likes: likes_label(sheet.like_count(details.likes_count)),
        comments: comments_label(details.comments_count),
        images: details.images.clone(),
        comment_list: comments.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fp_core::DetailExtras;
    use fp_sheet::SnapPoints;
    use fp_store::StoreError;
    use fp_utils::geo::LatLon;

    fn station(id: &str, status: StationStatus) -> Station {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        Station {
            id: id.to_string(),
            title: format!("Comedouro {}", id),
            status,
            latitude: -23.5,
            longitude: -46.6,
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn loaded(stations: Vec<Station>) -> MapModel {
        let mut model = MapModel::new();
        model.finish_refresh(Ok(stations));
        model
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(Some(1.0)), "1.00 km");
        assert_eq!(format_distance(Some(0.456)), "0.46 km");
        assert_eq!(format_distance(None), "indisponivel");
    }

    #[test]
    fn stars_follow_floor_and_half() {
        use Star::*;
        assert_eq!(rating_stars(4.6), [Full, Full, Full, Full, Half]);
        assert_eq!(rating_stars(4.4), [Full, Full, Full, Full, Empty]);
        assert_eq!(rating_stars(3.0), [Full, Full, Full, Empty, Empty]);
        assert_eq!(rating_stars(0.5), [Half, Empty, Empty, Empty, Empty]);
        assert_eq!(rating_stars(5.0), [Full; 5]);
        assert_eq!(rating_stars(-1.0), [Empty; 5]);
    }

    #[test]
    fn carousel_index_rounds_and_clamps() {
        assert_eq!(carousel_index(0.0, 390.0, 3), 0);
        assert_eq!(carousel_index(200.0, 390.0, 3), 1);
        assert_eq!(carousel_index(780.0, 390.0, 3), 2);
        assert_eq!(carousel_index(5000.0, 390.0, 3), 2);
        assert_eq!(carousel_index(-50.0, 390.0, 3), 0);
        assert_eq!(carousel_index(100.0, 390.0, 0), 0);
        assert_eq!(carousel_label(1, 3), "2/3");
    }

    #[test]
    fn list_view_states() {
        assert_eq!(station_list_view(&MapModel::new()), StationListView::Loading);
        assert_eq!(station_list_view(&loaded(vec![])), StationListView::Empty);

        let mut failed = MapModel::new();
        failed.finish_refresh(Err(StoreError::Decode("bad row".to_string())));
        assert_eq!(
            station_list_view(&failed),
            StationListView::Error("could not decode rows: bad row".to_string())
        );

        let StationListView::Cards(cards) = station_list_view(&loaded(vec![station("a", StationStatus::NeedsMaintenance)])) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].coordinates, "-23.50000, -46.60000");
        assert_eq!(cards[0].status.label(), "Manutenção");
        assert_eq!(cards[0].notes, None);
    }

    #[test]
    fn markers_use_status_colors() {
        let model = loaded(vec![station("a", StationStatus::Ok), station("b", StationStatus::NeedsFood)]);
        let view = map_view(&model);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].color, StationStatus::Ok.color());
        assert_eq!(view.markers[1].description, "status: needs_food");
        assert_eq!(view.region.latitude, -23.5);
        assert!(!view.loading);
    }

    #[test]
    fn sheet_view_reflects_toggles_and_counts() {
        let s = station("a", StationStatus::NeedsFood);
        let extras = DetailExtras {
            rating: 4.6,
            ratings_count: 38,
            likes_count: 128,
            images: vec!["https://img/1.jpg".to_string()],
        };
        let here = LatLon::new(-23.5, -46.6).unwrap();
        let details = PointDetailsData::derive(&s, Some(here), &extras, 2);
        let mut sheet = DetailSheet::new(SnapPoints::for_viewport(800.0, 0.0));
        sheet.show(Some("a"));
        sheet.toggle_like();

        let at = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        let comments: Vec<Comment> = ["um", "dois"]
            .iter()
            .filter_map(|t| Comment::compose("voce", t, &at))
            .collect();
        let view = sheet_view(&details, &sheet, &comments);

        assert_eq!(view.point_type, "food");
        assert_eq!(view.status, "empty");
        assert_eq!(view.distance, "0.00 km");
        assert_eq!(view.rating, "4.6");
        assert_eq!(view.ratings, "38 avaliacoes");
        assert_eq!(view.likes, "129 curtidas");
        assert_eq!(view.comments, "2 comentarios");
        assert!(view.liked);
        assert!(!view.favorited);
        assert_eq!(view.comment_list.len(), 2);
    }
}
