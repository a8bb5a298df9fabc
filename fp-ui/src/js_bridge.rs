//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet map lives in `assets/js/feeding-map.js`, embedded at compile time
//! and evaluated as a global (no ES modules) once Leaflet itself has loaded.
//! Browser services the app needs (geolocation, share sheet, alerts, timers)
//! are wrapped here as well so components never touch JS directly.

use fp_app::location::{Geolocation, LocationOptions};
use fp_app::share::ShareSurface;
use fp_utils::geo::LatLon;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

static FEEDING_MAP_JS: &str = include_str!("../assets/js/feeding-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Feeding map JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

/// Evaluate the map script with a wait-for-Leaflet polling loop. Call once at startup.
///
/// The script is stashed on `window` and evaluated at global scope through an
/// indirect eval so `fpMap` becomes a global rather than a local of the callback.
pub fn init_map() {
    let _ = js_sys::eval(&format!(
        "window.__fpMapScript = {};",
        js_string(FEEDING_MAP_JS)
    ));

    let init_js = r#"
        (function() {
            var waitForLeaflet = setInterval(function() {
                if (typeof L !== 'undefined') {
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__fpMapScript);
                    delete window.__fpMapScript;
                    if (typeof fpMap !== 'undefined') window.fpMap = fpMap;
                    window.__fpMapReady = true;
                    console.log('Feeding map initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render (or re-render) the map into `container_id` from a serialized `MapView`.
///
/// Polls until the script is initialized and the container exists.
pub fn render_map(container_id: &str, view_json: &str) {
    let id = js_string(container_id);
    let view = js_string(view_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__fpMapReady && document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.fpMap.render({id}, {view});
                    }} catch(e) {{ console.error('[fp] render map error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

pub fn destroy_map(container_id: &str) {
    call_js(&format!(
        "if (window.fpMap) window.fpMap.destroy({});",
        js_string(container_id)
    ));
}

/// Station ids of tapped markers.
///
/// Replaces any previous subscriber. The JS callback lives for the rest of the page.
pub fn marker_clicks() -> UnboundedReceiver<String> {
    let (sender, receiver) = unbounded();
    let closure = Closure::wrap(Box::new(move |id: String| {
        let _ = sender.unbounded_send(id);
    }) as Box<dyn FnMut(String)>);
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &JsValue::from_str("__fpMarkerClick"),
            closure.as_ref().unchecked_ref(),
        );
    }
    closure.forget();
    receiver
}

/// Window inner height after each resize.
pub fn resizes() -> UnboundedReceiver<f64> {
    let (sender, receiver) = unbounded();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(height) = viewport_height() {
            let _ = sender.unbounded_send(height);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web_sys::window() {
        window.set_onresize(Some(closure.as_ref().unchecked_ref()));
    }
    closure.forget();
    receiver
}

/// Blocking browser alert.
pub fn alert(title: &str, message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("{}\n\n{}", title, message));
    }
}

/// Current time in milliseconds, for pointer velocity.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn viewport_height() -> Option<f64> {
    web_sys::window()?.inner_height().ok()?.as_f64()
}

/// Resolve after `ms` milliseconds.
pub async fn sleep(ms: u32) {
    let promise = js_sys::eval(&format!(
        "new Promise(function(resolve) {{ setTimeout(resolve, {}); }})",
        ms
    ));
    if let Ok(promise) = promise.and_then(|p| p.dyn_into::<js_sys::Promise>()) {
        let _ = JsFuture::from(promise).await;
    }
}

#[derive(Deserialize)]
struct Coords {
    latitude: f64,
    longitude: f64,
}

/// `navigator.geolocation`, resolved to `None` on denial, timeout or absence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl Geolocation for BrowserLocation {
    async fn current_position(&self, options: &LocationOptions) -> Option<LatLon> {
        let js = format!(
            r#"
            new Promise(function(resolve) {{
                if (!navigator.geolocation) {{ resolve(null); return; }}
                navigator.geolocation.getCurrentPosition(
                    function(p) {{
                        resolve(JSON.stringify({{ latitude: p.coords.latitude, longitude: p.coords.longitude }}));
                    }},
                    function() {{ resolve(null); }},
                    {{ enableHighAccuracy: {}, timeout: {}, maximumAge: {} }}
                );
            }})
            "#,
            options.enable_high_accuracy,
            options.timeout.as_millis(),
            options.maximum_age.as_millis(),
        );
        let promise = js_sys::eval(&js).ok()?.dyn_into::<js_sys::Promise>().ok()?;
        let value = JsFuture::from(promise).await.ok()?.as_string()?;
        let coords: Coords = serde_json::from_str(&value).ok()?;
        LatLon::new(coords.latitude, coords.longitude).ok()
    }
}

/// `navigator.share`, falling back to the clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserShare;

impl ShareSurface for BrowserShare {
    fn share(&self, message: &str) {
        let text = js_string(message);
        call_js(&format!(
            r#"
            if (navigator.share) {{
                navigator.share({{ text: {text} }}).catch(function() {{}});
            }} else if (navigator.clipboard) {{
                navigator.clipboard.writeText({text}).catch(function() {{}});
            }}
            "#,
        ));
    }
}
