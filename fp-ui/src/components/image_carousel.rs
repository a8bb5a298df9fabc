//! Horizontally paged image strip with a position overlay and dots.

use dioxus::prelude::*;
use fp_app::view::{carousel_index, carousel_label};

#[component]
pub fn ImageCarousel(images: Vec<String>) -> Element {
    let mut index = use_signal(|| 0usize);
    let len = images.len();
    let current = index().min(len.saturating_sub(1));
    let label = carousel_label(current, len);

    // Paging uses CSS scroll snap; the index follows the scroll position.
    let on_scroll = move |evt: Event<ScrollData>| {
        let offset = evt.scroll_left() as f64;
        let width = evt.client_width() as f64;
        index.set(carousel_index(offset, width, len));
    };

    rsx! {
        div {
            style: "position: relative; width: 100%; height: 236px; background: #ddd6c4;",
            div {
                style: "display: flex; width: 100%; height: 100%; overflow-x: auto; scroll-snap-type: x mandatory; scrollbar-width: none;",
                onscroll: on_scroll,
                for uri in images.iter() {
                    img {
                        key: "{uri}",
                        src: "{uri}",
                        style: "flex: 0 0 100%; width: 100%; height: 100%; object-fit: cover; scroll-snap-align: start;",
                    }
                }
            }
            if len > 0 {
                div {
                    style: "position: absolute; top: 12px; right: 12px; padding: 4px 10px; border-radius: 999px; background: rgba(17,24,39,0.65); color: #fff; font-size: 12px; font-weight: 600;",
                    "{label}"
                }
                div {
                    style: "position: absolute; bottom: 12px; width: 100%; display: flex; justify-content: center; gap: 6px;",
                    for dot in 0..len {
                        span {
                            key: "{dot}",
                            style: if dot == current {
                                "width: 18px; height: 7px; border-radius: 999px; background: #fff;"
                            } else {
                                "width: 7px; height: 7px; border-radius: 999px; background: rgba(255,255,255,0.55);"
                            },
                        }
                    }
                }
            }
        }
    }
}
