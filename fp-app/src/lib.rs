//! Host side of the feeding point map.
//!
//! This crate provides:
//! - `model`: `MapModel`, the screen state and its transitions
//! - `session`: `Session`, which runs store operations against the model
//! - `location` / `share`: boundaries to device services
//! - `view`: pure projections from state to render descriptions

pub mod location;
pub mod model;
pub mod session;
pub mod share;
pub mod view;

pub use model::{placeholder_extras, Alert, MapModel, MapRegion, NavTab};
pub use session::Session;
