//! Feeding Point Map
//!
//! Shows community pet feeding points on a map. Tapping a marker opens a
//! draggable detail sheet with the point's status, distance, engagement and
//! comments; "Refill" marks the point as stocked.
//!
//! Data flow:
//! 1. `SUPABASE_URL` / `SUPABASE_ANON_KEY` are baked in at build time. Without
//!    them the app shows a configuration error and nothing else.
//! 2. A `Session` over the hosted `RemoteStore` loads all stations on mount and
//!    refetches whenever a change notification arrives.
//! 3. After every session operation the model snapshot is republished into
//!    `AppState`, which the components render from.

use dioxus::prelude::*;
use fp_app::share::{report_sent, share_point};
use fp_app::view::{map_view, station_list_view, StationListView, EMPTY_LIST_LABEL};
use fp_app::{placeholder_extras, NavTab, Session};
use fp_store::{BackendConfig, ConfigError, RemoteStore};
use fp_ui::components::{
    BottomSheet, ErrorDisplay, LoadingSpinner, MapSurface, Navbar, StationCard,
};
use fp_ui::js_bridge::{self, BrowserLocation, BrowserShare};
use fp_ui::state::AppState;
use futures::StreamExt;
use std::rc::Rc;

type MapSession = Rc<Session<RemoteStore>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("main"))
        .launch(App);
}

fn backend_config() -> Result<BackendConfig, ConfigError> {
    BackendConfig::new(
        option_env!("SUPABASE_URL").map(String::from),
        option_env!("SUPABASE_ANON_KEY").map(String::from),
    )
}

#[component]
fn App() -> Element {
    let config = use_hook(backend_config);

    match config {
        Ok(config) => rsx! { MapScreen { config } },
        Err(e) => {
            log::error!("{}", e);
            rsx! {
                div {
                    style: "padding: 24px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
                    ErrorDisplay { message: e.to_string() }
                }
            }
        }
    }
}

/// Copy the session's model into the reactive state.
fn publish(mut state: AppState, session: &Session<RemoteStore>) {
    state.model.set(session.model().clone());
}

#[component]
fn MapScreen(config: BackendConfig) -> Element {
    let state = use_context_provider(AppState::new);
    let session: MapSession = use_context_provider(move || {
        Rc::new(Session::new(Rc::new(RemoteStore::new(config))))
    });

    // Mount: size the sheet, load stations, follow changes, locate once.
    use_hook({
        let session = session.clone();
        move || {
            session.update(|model| model.set_detail_extras(placeholder_extras()));
            publish(state, &session);

            let mut viewport = state.viewport_height;
            if let Some(height) = js_bridge::viewport_height() {
                viewport.set(height);
            }
            let mut resizes = js_bridge::resizes();
            spawn(async move {
                while let Some(height) = resizes.next().await {
                    viewport.set(height);
                }
            });

            let loader = session.clone();
            spawn(async move {
                loader.refresh().await;
                publish(state, &loader);

                let Some(mut feed) = loader.take_change_feed() else {
                    return;
                };
                while let Some(change) = feed.next().await {
                    log::debug!("{:?} on {}, refetching", change.kind, change.table);
                    // a burst of changes needs only one refetch
                    while let Ok(Some(_)) = feed.try_next() {}
                    loader.refresh().await;
                    publish(state, &loader);
                }
            });

            let locator = session.clone();
            spawn(async move {
                locator.locate(&BrowserLocation).await;
                publish(state, &locator);
            });
        }
    });

    // Alerts block until dismissed.
    use_effect({
        let session = session.clone();
        move || {
            let Some(alert) = state.model.read().alert().cloned() else {
                return;
            };
            js_bridge::alert(&alert.title, &alert.message);
            session.update(|model| model.dismiss_alert());
            publish(state, &session);
        }
    });

    let model = state.model.read();
    let active = model.active_tab();

    let content = match active {
        NavTab::Search => rsx! {
            StationList {}
        },
        _ => {
            let view = map_view(&model);
            let details = model.details();
            let comments = model
                .selected_id()
                .map(|id| model.comments_for(id).to_vec())
                .unwrap_or_default();
            let error = view.error.clone();
            let loading = view.loading;
            let adding = view.adding;

            let select = session.clone();
            let close = session.clone();
            let refill = session.clone();
            let comment = session.clone();
            let report = session.clone();
            let add = session.clone();

            rsx! {
                MapSurface {
                    view,
                    on_select: move |id: String| {
                        select.select(&id);
                        publish(state, &select);
                    },
                }
                if let Some(error) = error {
                    div {
                        style: "position: absolute; top: 12px; left: 0; right: 0; z-index: 600;",
                        ErrorDisplay { message: error }
                    }
                }
                if loading {
                    LoadingSpinner { overlay: true }
                }
                button {
                    style: "position: absolute; right: 16px; bottom: 92px; z-index: 800; padding: 12px 16px; border-radius: 999px; border: none; background: #166534; color: #fff; font-weight: 700; box-shadow: 0 4px 12px rgba(0,0,0,0.2); cursor: pointer;",
                    disabled: adding,
                    onclick: move |_| {
                        let add = add.clone();
                        spawn(async move {
                            let mut rng = rand::thread_rng();
                            add.add_random_station(&mut rng).await;
                            publish(state, &add);
                        });
                    },
                    if adding { "Adicionando..." } else { "+ Comedouro" }
                }
                BottomSheet {
                    details,
                    comments,
                    on_close: move |_| {
                        close.close_sheet();
                        publish(state, &close);
                    },
                    on_refill: move |id: String| {
                        let refill = refill.clone();
                        spawn(async move {
                            refill.refill(&id).await;
                            publish(state, &refill);
                        });
                    },
                    on_add_comment: move |(id, text): (String, String)| {
                        comment.add_comment(&id, &text);
                        publish(state, &comment);
                    },
                    on_share: move |_| share_point(&BrowserShare),
                    on_report: move |_| {
                        report.update(|model| model.raise_alert(report_sent()));
                        publish(state, &report);
                    },
                }
            }
        }
    };

    let nav = session.clone();

    rsx! {
        div {
            style: "position: fixed; inset: 0; overflow: hidden; background: #f6f8fc; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            {content}
            Navbar {
                active,
                on_select: move |tab: NavTab| {
                    nav.update(|model| model.set_active_tab(tab));
                    publish(state, &nav);
                },
            }
        }
    }
}

/// Station list tab.
#[component]
fn StationList() -> Element {
    let state = use_context::<AppState>();
    let session = use_context::<MapSession>();
    let list = station_list_view(&state.model.read());

    let body = match list {
        StationListView::Loading => rsx! { LoadingSpinner {} },
        StationListView::Error(message) => rsx! { ErrorDisplay { message } },
        StationListView::Empty => rsx! {
            span { style: "color: #6B7280; text-align: center; margin-top: 24px;", "{EMPTY_LIST_LABEL}" }
        },
        StationListView::Cards(cards) => rsx! {
            for card in cards {
                StationCard {
                    key: "{card.id}",
                    card: card.clone(),
                    on_select: {
                        let session = session.clone();
                        move |id: String| {
                            session.update(|model| {
                                model.select(&id);
                                model.set_active_tab(NavTab::Home);
                            });
                            publish(state, &session);
                        }
                    },
                }
            }
        },
    };

    rsx! {
        div {
            style: "position: absolute; inset: 0; overflow-y: auto; padding: 16px 16px 96px; display: flex; flex-direction: column; gap: 12px;",
            h2 { style: "margin: 0 0 4px; color: #111827;", "Pontos" }
            {body}
        }
    }
}
