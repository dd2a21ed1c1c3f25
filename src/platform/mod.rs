//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (js Date vs SystemTime)
//! - Key-value storage (LocalStorage on web, none on native)

/// Current wall-clock time in unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Read a value from LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    storage.get_item(key).ok().flatten()
}

/// Write a value to LocalStorage. Quota or availability failures are
/// logged, not propagated; persistence here is best-effort.
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();
    match storage {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("LocalStorage write failed for {key}");
            }
        }
        None => log::warn!("LocalStorage unavailable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_sane() {
        // 2020-01-01 in unix ms; catches a broken clock conversion
        assert!(now_ms() > 1_577_836_800_000.0);
    }
}
