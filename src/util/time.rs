//! Monotonic clock for status-label deadlines.
//!
//! Wall time can jump backwards, which would keep a flashed message up
//! forever, so both targets count from a fixed origin instead.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Seconds since the first call in this process
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Seconds since page load
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}
