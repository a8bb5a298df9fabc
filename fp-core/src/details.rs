//! Derived detail view model for the selected feeding point.
//!
//! `PointDetailsData` is a read-only projection of a [`Station`] shaped for the
//! detail sheet. Category and display status are a pure function of the
//! station status; there is no other way to set them.

use crate::station::{Station, StationStatus};
use fp_utils::geo::LatLon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a feeding point is short of (or serves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointType {
    Food,
    Water,
    Both,
}

/// Display status of a feeding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Full,
    Empty,
    Maintenance,
}

impl PointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Food => "food",
            PointType::Water => "water",
            PointType::Both => "both",
        }
    }
}

impl PointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointStatus::Full => "full",
            PointStatus::Empty => "empty",
            PointStatus::Maintenance => "maintenance",
        }
    }

    /// Text color of the status chip.
    pub fn color(&self) -> &'static str {
        match self {
            PointStatus::Full => "#166534",
            PointStatus::Maintenance => "#92400e",
            PointStatus::Empty => "#b91c1c",
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a backend status to its (category, display status) pair.
pub fn classify(status: StationStatus) -> (PointType, PointStatus) {
    match status {
        StationStatus::Ok => (PointType::Both, PointStatus::Full),
        StationStatus::NeedsFood => (PointType::Food, PointStatus::Empty),
        StationStatus::NeedsWater => (PointType::Water, PointStatus::Empty),
        StationStatus::NeedsMaintenance => (PointType::Both, PointStatus::Maintenance),
    }
}

/// Social and media data shown in the sheet that the station table does not carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailExtras {
    pub rating: f64,
    pub ratings_count: u32,
    pub likes_count: u32,
    pub images: Vec<String>,
}

/// View model consumed by the detail sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetailsData {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub status: PointStatus,
    /// Kilometers to the device, `None` when the location is unavailable.
    pub distance_km: Option<f64>,
    pub rating: f64,
    pub ratings_count: u32,
    pub likes_count: u32,
    pub comments_count: u32,
    pub images: Vec<String>,
}

impl PointDetailsData {
    /// Derive the view model for `station`.
    ///
    /// Distance is only computed when both the device location and the station
    /// coordinates are valid; otherwise it is `None`. This never fails.
    pub fn derive(
        station: &Station,
        user_location: Option<LatLon>,
        extras: &DetailExtras,
        comments_count: usize,
    ) -> Self {
        let (point_type, status) = classify(station.status);
        let distance_km = match (user_location, station.position()) {
            (Some(user), Some(point)) => Some(user.distance_km(&point)),
            _ => None,
        };

        Self {
            id: station.id.clone(),
            title: station.title.clone(),
            point_type,
            status,
            distance_km,
            rating: extras.rating,
            ratings_count: extras.ratings_count,
            likes_count: extras.likes_count,
            comments_count: u32::try_from(comments_count).unwrap_or(u32::MAX),
            images: extras.images.clone(),
        }
    }
}
