//! Colored pill with a station's status label.

use dioxus::prelude::*;
use fp_core::StationStatus;

#[component]
pub fn StatusBadge(status: StationStatus) -> Element {
    let color = status.color();
    let label = status.label();

    rsx! {
        span {
            style: "align-self: flex-start; padding: 4px 10px; border-radius: 999px; background: {color}; color: #fff; font-weight: 600; font-size: 12px;",
            "{label}"
        }
    }
}
