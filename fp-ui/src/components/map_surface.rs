//! Leaflet map with one marker per station.

use crate::js_bridge;
use dioxus::prelude::*;
use fp_app::view::MapView;
use futures::StreamExt;

/// DOM id Leaflet renders into.
const MAP_CONTAINER_ID: &str = "feeding-map";

#[derive(Props, Clone, PartialEq)]
pub struct MapSurfaceProps {
    pub view: MapView,
    /// Called with the station id of a tapped marker
    pub on_select: EventHandler<String>,
}

#[component]
pub fn MapSurface(props: MapSurfaceProps) -> Element {
    let on_select = props.on_select;

    // Marker clicks arrive from JS outside the Dioxus runtime.
    use_hook(move || {
        js_bridge::init_map();
        let mut clicks = js_bridge::marker_clicks();
        spawn(async move {
            while let Some(id) = clicks.next().await {
                log::debug!("marker {} selected", id);
                on_select.call(id);
            }
        });
    });

    use_drop(|| js_bridge::destroy_map(MAP_CONTAINER_ID));

    use_effect(use_reactive((&props.view,), |(view,)| {
        match serde_json::to_string(&view) {
            Ok(json) => js_bridge::render_map(MAP_CONTAINER_ID, &json),
            Err(e) => log::error!("failed to serialize map view: {}", e),
        }
    }));

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            style: "position: absolute; inset: 0; z-index: 0;",
        }
    }
}
