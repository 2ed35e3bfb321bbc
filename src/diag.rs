//! Console diagnostics, no-ops off wasm so native tests never touch the
//! browser externs.

#[cfg(target_arch = "wasm32")]
pub(crate) fn log(message: &str) {
    gloo::console::log!(message);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log(message: &str) {
    let _ = message;
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(message: &str) {
    gloo::console::warn!(message);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(message: &str) {
    let _ = message;
}
