//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Displays a fetch error in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 10px 14px; margin: 8px 12px; background: #FEF2F2; color: #B91C1C; border-radius: 10px; border: 1px solid #FECACA; text-align: center;",
            "{props.message}"
        }
    }
}
