//! Star rating row.

use dioxus::prelude::*;
use fp_app::view::{Star, STAR_COUNT};

const STAR_COLOR: &str = "#d97706";

#[derive(Props, Clone, PartialEq)]
pub struct RatingProps {
    pub stars: [Star; STAR_COUNT],
    /// Average with one decimal, e.g. "4.6"
    pub rating: String,
    /// e.g. "38 avaliacoes"
    pub ratings: String,
}

#[component]
pub fn Rating(props: RatingProps) -> Element {
    rsx! {
        div {
            style: "margin-top: 10px; display: flex; justify-content: space-between; align-items: center;",
            div {
                style: "display: flex; align-items: center; gap: 6px;",
                div {
                    style: "display: flex; gap: 2px; color: {STAR_COLOR};",
                    for (index, star) in props.stars.iter().enumerate() {
                        span {
                            key: "{index}",
                            title: "{star.icon()}",
                            {glyph(*star)}
                        }
                    }
                }
                span { style: "font-weight: 700; color: #111827;", "{props.rating}" }
            }
            span { style: "color: #6b7280; font-size: 12px;", "{props.ratings}" }
        }
    }
}

fn glyph(star: Star) -> &'static str {
    match star {
        Star::Full => "★",
        Star::Half => "⯪",
        Star::Empty => "☆",
    }
}
