//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Storage (LocalStorage on web, JSON files natively)
//! - JS bindings (wasm only)

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
