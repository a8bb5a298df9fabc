//! Bottom navigation bar.

use dioxus::prelude::*;
use fp_app::NavTab;

#[component]
pub fn Navbar(active: NavTab, on_select: EventHandler<NavTab>) -> Element {
    rsx! {
        nav {
            style: "position: fixed; left: 16px; right: 16px; bottom: 16px; z-index: 900; height: 58px; border-radius: 999px; background: #166534; display: flex; justify-content: space-around; align-items: center; box-shadow: 0 6px 16px rgba(0,0,0,0.2);",
            for tab in NavTab::ALL {
                NavItem {
                    key: "{tab:?}",
                    tab,
                    active: tab == active,
                    on_select,
                }
            }
        }
    }
}

#[component]
fn NavItem(tab: NavTab, active: bool, on_select: EventHandler<NavTab>) -> Element {
    let (icon, icon_active) = tab.icons();
    let icon = if active { icon_active } else { icon };
    let color = if active { "#ffffff" } else { "#d7e1d9" };

    rsx! {
        button {
            style: "background: none; border: none; color: {color}; display: flex; flex-direction: column; align-items: center; gap: 4px; cursor: pointer;",
            title: "{icon}",
            onclick: move |_| on_select.call(tab),
            span { class: "icon {icon}", "{glyph(tab)}" }
            if active {
                span { style: "width: 5px; height: 5px; border-radius: 999px; background: #fff;" }
            }
        }
    }
}

fn glyph(tab: NavTab) -> &'static str {
    match tab {
        NavTab::Home => "⌂",
        NavTab::Search => "⌕",
        NavTab::Favorites => "♡",
        NavTab::Profile => "☺",
    }
}
