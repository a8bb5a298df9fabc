//! Loading indicator component.

use dioxus::prelude::*;
use fp_app::view::LOADING_LABEL;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = LOADING_LABEL.to_string())]
    pub label: String,
    /// Float over the map instead of taking up layout space
    #[props(default = false)]
    pub overlay: bool,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    let position = if props.overlay {
        "position: absolute; top: 16px; left: 50%; transform: translateX(-50%); z-index: 500; background: rgba(255,255,255,0.92); border-radius: 999px; box-shadow: 0 2px 8px rgba(0,0,0,0.12);"
    } else {
        ""
    };

    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; gap: 8px; padding: 10px 16px; color: #4b5563; {position}",
            span { class: "fp-spinner" }
            "{props.label}"
        }
    }
}
