//! Like, favorite, share and report buttons with the engagement counts.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SocialActionsProps {
    pub liked: bool,
    pub favorited: bool,
    /// e.g. "129 curtidas"
    pub likes: String,
    /// e.g. "3 comentarios"
    pub comments: String,
    pub on_toggle_like: EventHandler<()>,
    pub on_toggle_favorite: EventHandler<()>,
    pub on_share: EventHandler<()>,
    pub on_report: EventHandler<()>,
}

const BUTTON: &str = "width: 40px; height: 40px; border-radius: 999px; border: 1px solid #e5e7eb; background: #fff; display: flex; align-items: center; justify-content: center; cursor: pointer; font-size: 18px;";
const BUTTON_ACTIVE: &str = "width: 40px; height: 40px; border-radius: 999px; border: 1px solid #e5e7eb; background: #f3f4f6; display: flex; align-items: center; justify-content: center; cursor: pointer; font-size: 18px;";

#[component]
pub fn SocialActions(props: SocialActionsProps) -> Element {
    let (like_icon, like_style) = if props.liked {
        ("heart", format!("{BUTTON_ACTIVE} color: #b91c1c;"))
    } else {
        ("heart-outline", format!("{BUTTON} color: #111827;"))
    };
    let (favorite_icon, favorite_style) = if props.favorited {
        ("bookmark", format!("{BUTTON_ACTIVE} color: #1d4ed8;"))
    } else {
        ("bookmark-outline", format!("{BUTTON} color: #111827;"))
    };

    rsx! {
        div {
            style: "margin-top: 12px; padding: 12px 16px; display: flex; flex-direction: column; gap: 10px;",
            div {
                style: "display: flex; gap: 10px;",
                button {
                    style: "{like_style}",
                    title: "{like_icon}",
                    onclick: move |_| props.on_toggle_like.call(()),
                    if props.liked { "♥" } else { "♡" }
                }
                button {
                    style: "{favorite_style}",
                    title: "{favorite_icon}",
                    onclick: move |_| props.on_toggle_favorite.call(()),
                    if props.favorited { "▰" } else { "▱" }
                }
                button {
                    style: BUTTON,
                    title: "paper-plane-outline",
                    onclick: move |_| props.on_share.call(()),
                    "➤"
                }
                button {
                    style: BUTTON,
                    title: "alert-circle-outline",
                    onclick: move |_| props.on_report.call(()),
                    "!"
                }
            }
            div {
                style: "display: flex; gap: 16px; color: #374151; font-size: 13px; font-weight: 600;",
                span { "{props.likes}" }
                span { "{props.comments}" }
            }
        }
    }
}
