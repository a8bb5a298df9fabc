//! Device location boundary.
//!
//! Location is best effort: a denied permission, a missing fix or a platform
//! without a provider all come back as `None`, and callers render distance as
//! unavailable. Nothing here is an error.

use fp_utils::geo::LatLon;
use std::time::Duration;

/// Options passed to the platform provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub enable_high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// Accept a cached fix this old.
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(12),
            maximum_age: Duration::from_secs(30),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Geolocation {
    async fn current_position(&self, options: &LocationOptions) -> Option<LatLon>;
}

/// A platform without a location provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl Geolocation for NoLocation {
    async fn current_position(&self, _options: &LocationOptions) -> Option<LatLon> {
        None
    }
}

/// A known position, e.g. coordinates given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub LatLon);

impl Geolocation for FixedLocation {
    async fn current_position(&self, _options: &LocationOptions) -> Option<LatLon> {
        Some(self.0)
    }
}
