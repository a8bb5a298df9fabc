//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The screen model itself lives in the app's session; `model` is the latest
//! snapshot of it, republished after every session operation.

use fp_app::MapModel;
use fp_sheet::SnapPoints;
use dioxus::prelude::*;

/// Height used until the window reports its own.
const FALLBACK_VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Snapshot of the screen model
    pub model: Signal<MapModel>,
    /// Window inner height in CSS pixels
    pub viewport_height: Signal<f64>,
    /// Space reserved above the sheet when fully open
    pub top_inset: Signal<f64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            model: Signal::new(MapModel::new()),
            viewport_height: Signal::new(FALLBACK_VIEWPORT_HEIGHT),
            top_inset: Signal::new(0.0),
        }
    }

    /// Snap points for the current viewport.
    pub fn snap_points(&self) -> SnapPoints {
        SnapPoints::for_viewport((self.viewport_height)(), (self.top_inset)())
    }
}
