//! Shared Dioxus components and Leaflet bridge for the feeding point map.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map and browser services via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (detail sheet, cards, navbar, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
