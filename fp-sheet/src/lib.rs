//! Draggable detail sheet core, independent of any UI toolkit.
//!
//! This crate provides:
//! - `gesture`: drag tracking with a claim threshold and a pointer velocity estimator
//! - `snap`: snap point layout and the nearest-snap resolver
//! - `spring`: damped spring animation driven by an external clock
//! - `sheet`: the `DetailSheet` state machine tying the three together
//!
//! Positions are vertical offsets in logical pixels, 0 being fully open.

pub mod gesture;
pub mod sheet;
pub mod snap;
pub mod spring;

pub use sheet::{DetailSheet, SheetEvent, SheetPhase};
pub use snap::{SnapPoint, SnapPoints};
