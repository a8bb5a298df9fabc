//! Card for one station in the list screen.

use crate::components::StatusBadge;
use dioxus::prelude::*;
use fp_app::view::StationCardView;

#[derive(Props, Clone, PartialEq)]
pub struct StationCardProps {
    pub card: StationCardView,
    #[props(default)]
    pub on_select: EventHandler<String>,
}

#[component]
pub fn StationCard(props: StationCardProps) -> Element {
    let card = props.card.clone();
    let id = card.id.clone();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px; background: #fff; border: 1px solid #E5E7EB; border-radius: 12px; padding: 14px; cursor: pointer;",
            onclick: move |_| props.on_select.call(id.clone()),
            div {
                style: "display: flex; flex-direction: column; gap: 4px;",
                span { style: "font-weight: 700; color: #111827; font-size: 16px;", "{card.title}" }
                span { style: "color: #6B7280; font-size: 12px;", "{card.coordinates}" }
            }
            if let Some(notes) = card.notes.clone() {
                span { style: "color: #111827; font-size: 14px;", "{notes}" }
            }
            StatusBadge { status: card.status }
        }
    }
}
