//! Process-wide readiness of the embed API.
//!
//! The iframe API announces itself once per page. Every TV mount calls
//! [`init_api`]; only the first call does anything.

use parking_lot::Mutex;
use web_time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct ApiInfo {
    pub ready_at: Instant,
    /// How many times initialization was requested, including the first.
    pub requests: u64,
}

static API: Mutex<Option<ApiInfo>> = parking_lot::const_mutex(None);

/// Marks the embed API as initialized. Returns `true` only for the call that
/// actually performed initialization.
pub fn init_api() -> bool {
    let mut api = API.lock();
    match api.as_mut() {
        Some(info) => {
            info.requests += 1;
            false
        }
        None => {
            *api = Some(ApiInfo {
                ready_at: Instant::now(),
                requests: 1,
            });
            log::info!("[TV] video embed API is ready");
            true
        }
    }
}

pub fn api_info() -> Option<ApiInfo> {
    *API.lock()
}

pub fn is_api_ready() -> bool {
    API.lock().is_some()
}
