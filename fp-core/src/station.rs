use chrono::{DateTime, Utc};
use fp_utils::geo::LatLon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the remote table holding feeding point rows.
pub const STATIONS_TABLE: &str = "feeding_points";

/// Maintenance status reported for a feeding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    Ok,
    NeedsWater,
    NeedsFood,
    NeedsMaintenance,
}

impl StationStatus {
    pub const ALL: [StationStatus; 4] = [
        StationStatus::Ok,
        StationStatus::NeedsWater,
        StationStatus::NeedsFood,
        StationStatus::NeedsMaintenance,
    ];

    /// Column value as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Ok => "ok",
            StationStatus::NeedsWater => "needs_water",
            StationStatus::NeedsFood => "needs_food",
            StationStatus::NeedsMaintenance => "needs_maintenance",
        }
    }

    /// Label shown on status badges.
    pub fn label(&self) -> &'static str {
        match self {
            StationStatus::Ok => "OK",
            StationStatus::NeedsWater => "Precisa água",
            StationStatus::NeedsFood => "Precisa comida",
            StationStatus::NeedsMaintenance => "Manutenção",
        }
    }

    /// Marker and badge color.
    pub fn color(&self) -> &'static str {
        match self {
            StationStatus::Ok => "#2E7D32",
            StationStatus::NeedsWater => "#1565C0",
            StationStatus::NeedsFood => "#EF6C00",
            StationStatus::NeedsMaintenance => "#6A1B9A",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown station status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for StationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A feeding point row as stored in the `feeding_points` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub title: String,
    pub status: StationStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Station {
    /// Station coordinates, if they form a valid position.
    pub fn position(&self) -> Option<LatLon> {
        LatLon::new(self.latitude, self.longitude).ok()
    }

    /// "lat, lon" with five decimals, as shown on station cards.
    pub fn coordinates_label(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }

    /// Apply a partial update in place. Fields absent from the patch are untouched.
    pub fn apply(&mut self, patch: &StationPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
    }
}

/// Row shape for inserts; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStation {
    pub title: String,
    pub status: StationStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial row for updates. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StationPatch {
    /// The patch sent by the refill action.
    pub fn refilled() -> Self {
        Self {
            status: Some(StationStatus::Ok),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Station {
        Station {
            id: "st-1".to_string(),
            title: "Praça da Sé".to_string(),
            status: StationStatus::NeedsWater,
            latitude: -23.55052,
            longitude: -46.633308,
            notes: Some("perto do banco".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn status_parses_backend_values() {
        for status in StationStatus::ALL {
            assert_eq!(status.as_str().parse::<StationStatus>(), Ok(status));
        }
        assert!("broken".parse::<StationStatus>().is_err());
    }

    #[test]
    fn station_deserializes_backend_row() {
        let row = r#"{
            "id": "a1",
            "title": "Comedouro 1",
            "status": "needs_food",
            "latitude": -23.5,
            "longitude": -46.6,
            "notes": null,
            "created_at": "2024-05-01T12:00:00.123456+00:00",
            "updated_at": "2024-05-02T08:30:00+00:00"
        }"#;
        let station: Station = serde_json::from_str(row).unwrap();
        assert_eq!(station.status, StationStatus::NeedsFood);
        assert_eq!(station.notes, None);
        assert_eq!(station.coordinates_label(), "-23.50000, -46.60000");
    }

    #[test]
    fn refill_patch_changes_only_status() {
        let mut station = sample();
        let before = station.clone();
        station.apply(&StationPatch::refilled());
        assert_eq!(station.status, StationStatus::Ok);
        assert_eq!(station.title, before.title);
        assert_eq!(station.notes, before.notes);
        assert_eq!(station.updated_at, before.updated_at);
    }

    #[test]
    fn patch_serializes_present_fields_only() {
        let json = serde_json::to_string(&StationPatch::refilled()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
        assert!(StationPatch::default().is_empty());
    }
}
