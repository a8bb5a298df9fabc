//! Draggable detail sheet for the selected station.
//!
//! All sheet behavior lives in [`DetailSheet`]; this component feeds it pointer
//! input and a ~16 ms animation clock, renders its offset, and forwards the
//! events it produces to the host.

use crate::components::{CommentsList, ImageCarousel, Rating, SocialActions};
use crate::js_bridge;
use crate::state::AppState;
use dioxus::html::point_interaction::InteractionLocation;
use dioxus::prelude::*;
use fp_app::view::sheet_view;
use fp_core::{Comment, PointDetailsData};
use fp_sheet::gesture::VelocityTracker;
use fp_sheet::{DetailSheet, SheetEvent};
use std::time::Duration;

const FRAME_MS: u32 = 16;

#[derive(Props, Clone, PartialEq)]
pub struct BottomSheetProps {
    /// Station to show; `None` closes the sheet
    pub details: Option<PointDetailsData>,
    #[props(default)]
    pub comments: Vec<Comment>,
    /// The sheet came to rest closed while showing a station
    pub on_close: EventHandler<()>,
    pub on_refill: EventHandler<String>,
    /// (station id, text)
    pub on_add_comment: EventHandler<(String, String)>,
    #[props(default)]
    pub on_share: EventHandler<()>,
    #[props(default)]
    pub on_report: EventHandler<()>,
}

#[component]
pub fn BottomSheet(props: BottomSheetProps) -> Element {
    let state = use_context::<AppState>();
    let mut sheet = use_signal(|| DetailSheet::new(state.snap_points()));
    let mut animating = use_signal(|| false);
    let mut drag = use_signal(|| None::<VelocityTracker>);
    // Content stays rendered while the sheet animates away.
    let mut shown = use_signal(|| None::<PointDetailsData>);

    let on_close = props.on_close;
    let on_refill = props.on_refill;
    let on_add_comment = props.on_add_comment;
    let on_share = props.on_share;
    let on_report = props.on_report;

    let dispatch = move |event: SheetEvent| match event {
        SheetEvent::Closed => on_close.call(()),
        SheetEvent::Refill(id) => on_refill.call(id),
        SheetEvent::AddComment { station_id, text } => on_add_comment.call((station_id, text)),
    };

    // One animation loop at a time; it exits once the spring rests.
    let mut kick = move || {
        if *animating.peek() || !sheet.peek().is_animating() {
            return;
        }
        animating.set(true);
        spawn(async move {
            while sheet.peek().is_animating() {
                js_bridge::sleep(FRAME_MS).await;
                let event = sheet.write().tick(Duration::from_millis(u64::from(FRAME_MS)));
                if let Some(event) = event {
                    dispatch(event);
                }
            }
            animating.set(false);
        });
    };

    use_effect(use_reactive((&props.details,), move |(details,)| {
        sheet.write().show(details.as_ref().map(|d| d.id.as_str()));
        if details.is_some() {
            shown.set(details);
        }
        kick();
    }));

    use_effect(move || {
        let points = state.snap_points();
        sheet.write().resize(points);
        kick();
    });

    let on_pointer_down = move |evt: PointerEvent| {
        let y = evt.client_coordinates().y;
        drag.set(Some(VelocityTracker::start(y, js_bridge::now_ms())));
        sheet.write().drag_start();
    };

    let on_pointer_move = move |evt: PointerEvent| {
        let y = evt.client_coordinates().y;
        let sample = match drag.write().as_mut() {
            Some(tracker) => tracker.sample(y, js_bridge::now_ms()),
            None => return,
        };
        sheet.write().drag_move(sample.dy);
    };

    let mut on_pointer_up = move |evt: PointerEvent| {
        let Some(mut tracker) = drag.take() else {
            return;
        };
        let sample = tracker.sample(evt.client_coordinates().y, js_bridge::now_ms());
        sheet.write().drag_end(sample.dy, sample.vy);
        kick();
    };

    let top = (state.top_inset)();
    let sheet_height = ((state.viewport_height)() - top).max(0.0);
    let offset = sheet.read().offset();
    let draft = sheet.read().draft().to_string();

    let view = shown
        .read()
        .as_ref()
        .map(|details| sheet_view(details, &sheet.read(), &props.comments));

    rsx! {
        div {
            style: "position: fixed; left: 0; right: 0; top: {top}px; height: {sheet_height}px; transform: translateY({offset}px); z-index: 1000; background: #fffdf8; border-top-left-radius: 24px; border-top-right-radius: 24px; box-shadow: 0 -6px 24px rgba(0,0,0,0.18); display: flex; flex-direction: column; overflow: hidden;",
            onpointermove: on_pointer_move,
            onpointerup: move |evt| on_pointer_up(evt),
            onpointercancel: move |evt| on_pointer_up(evt),
            onpointerleave: move |evt| on_pointer_up(evt),

            div {
                style: "height: 28px; flex: 0 0 28px; display: flex; align-items: center; justify-content: center; cursor: grab; touch-action: none;",
                onpointerdown: on_pointer_down,
                div { style: "width: 44px; height: 5px; border-radius: 999px; background: #d6d3c9;" }
            }

            if let Some(view) = view {
                div {
                    style: "flex: 1; overflow-y: auto; padding-bottom: 24px;",
                    ImageCarousel { images: view.images.clone() }

                    div {
                        style: "margin: 12px 16px 0; padding: 16px; border-radius: 16px; background: #fff; border: 1px solid #efe9dc;",
                        span { style: "font-size: 11px; letter-spacing: 1px; text-transform: uppercase; color: #6b7280;", "Feeding Point" }
                        h2 { style: "margin: 4px 0 12px; font-size: 22px; color: #111827;", "{view.title}" }
                        div {
                            style: "display: flex; gap: 8px; flex-wrap: wrap;",
                            Chip { label: "tipo", value: view.point_type.to_string() }
                            Chip { label: "status", value: view.status.to_string(), color: view.status_color }
                            Chip { label: "distancia", value: view.distance.clone() }
                        }
                        Rating {
                            stars: view.stars,
                            rating: view.rating.clone(),
                            ratings: view.ratings.clone(),
                        }
                    }

                    SocialActions {
                        liked: view.liked,
                        favorited: view.favorited,
                        likes: view.likes.clone(),
                        comments: view.comments.clone(),
                        on_toggle_like: move |_| sheet.write().toggle_like(),
                        on_toggle_favorite: move |_| sheet.write().toggle_favorite(),
                        on_share: move |_| on_share.call(()),
                        on_report: move |_| on_report.call(()),
                    }

                    CommentsList {
                        comments: view.comment_list.clone(),
                        draft,
                        on_draft: move |text: String| sheet.write().set_draft(text),
                        on_submit: move |_| {
                            let event = sheet.write().submit_comment();
                            if let Some(event) = event {
                                dispatch(event);
                            }
                        },
                    }
                }

                div {
                    style: "flex: 0 0 auto; padding: 12px 16px 16px; border-top: 1px solid #efe9dc; background: #fffdf8;",
                    button {
                        style: "width: 100%; padding: 14px; border-radius: 14px; border: none; background: #166534; color: #fff; font-size: 16px; font-weight: 700; cursor: pointer;",
                        onclick: move |_| {
                            let event = sheet.peek().refill();
                            if let Some(event) = event {
                                dispatch(event);
                            }
                        },
                        "Refill"
                    }
                }
            }
        }
    }
}

#[component]
fn Chip(label: &'static str, value: String, #[props(default = "#111827")] color: &'static str) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; padding: 8px 12px; border-radius: 12px; background: #f6f3ea;",
            span { style: "font-size: 11px; color: #6b7280;", "{label}" }
            span { style: "font-size: 14px; font-weight: 700; color: {color};", "{value}" }
        }
    }
}
