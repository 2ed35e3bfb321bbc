use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

/// Page-injected session configuration. The host page sets a
/// `__ROKKAKU_BOOT` object on `window`; query parameters are the fallback
/// for bare deployments.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageConfig {
    pub(crate) room_id: String,
    pub(crate) username: String,
    pub(crate) ws_base: Option<String>,
}

const BOOT_OBJECT_KEY: &str = "__ROKKAKU_BOOT";

pub(crate) fn load_page_config() -> Option<PageConfig> {
    from_boot_object().or_else(from_query_string)
}

fn from_boot_object() -> Option<PageConfig> {
    let window = web_sys::window()?;
    let boot = Reflect::get(&window, &JsValue::from_str(BOOT_OBJECT_KEY)).ok()?;
    if boot.is_null() || boot.is_undefined() {
        return None;
    }
    let room_id = string_field(&boot, "roomId")?;
    let username = string_field(&boot, "username")?;
    let ws_base = string_field(&boot, "wsBase");
    sanitize_config(&room_id, &username, ws_base.as_deref())
}

fn string_field(target: &JsValue, key: &str) -> Option<String> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    value.as_string()
}

fn from_query_string() -> Option<PageConfig> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    let room_id = params.get("room")?;
    let username = params.get("user")?;
    sanitize_config(&room_id, &username, params.get("ws").as_deref())
}

/// Trims and validates the raw values; empty room or username means the
/// page is not set up for a session.
pub(crate) fn sanitize_config(
    room_id: &str,
    username: &str,
    ws_base: Option<&str>,
) -> Option<PageConfig> {
    let room_id = room_id.trim();
    let username = username.trim();
    if room_id.is_empty() || username.is_empty() {
        return None;
    }
    let ws_base = ws_base
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .map(normalize_ws_base);
    Some(PageConfig {
        room_id: room_id.to_string(),
        username: username.to_string(),
        ws_base,
    })
}

/// WebSocket base derived from the page location when the boot config does
/// not pin one.
pub(crate) fn default_ws_base() -> Option<String> {
    let window = web_sys::window()?;
    let location = window.location();
    let host = location.host().ok()?;
    if host.trim().is_empty() {
        return None;
    }
    let protocol = location.protocol().ok()?.to_ascii_lowercase();
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    Some(format!("{scheme}://{host}/ws"))
}

pub(crate) fn build_room_ws_url(ws_base: &str, room_id: &str, username: &str) -> String {
    let base = ws_base.trim_end_matches('/');
    format!("{base}/{room_id}?user={}", encode_component(username))
}

/// URI-component encoding for the username: the browser's own
/// `encodeURIComponent` on wasm, a byte-level equivalent off wasm so the URL
/// assembly stays natively testable.
#[cfg(target_arch = "wasm32")]
fn encode_component(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_component(value: &str) -> String {
    value
        .bytes()
        .flat_map(|byte| match byte {
            // The unreserved set of encodeURIComponent.
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'!'
            | b'*' | b'\'' | b'(' | b')' => vec![byte as char],
            _ => format!("%{byte:02X}").chars().collect(),
        })
        .collect()
}

fn normalize_ws_base(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if trimmed.starts_with("ws://") || trimmed.starts_with("wss://") {
        trimmed.to_string()
    } else {
        format!("ws://{trimmed}")
    }
}
