//! WASM bindings for the hospitality request form
//!
//! Every behaviour lives in `hospitality-form-core`; this crate adapts it to
//! the browser:
//! - `DomForm` reads and writes the real form
//! - `DomToastRenderer` draws the banners
//! - `LocalStorageStore` keeps the autosave snapshot
//! - `BrowserScheduler` maps timers onto `setTimeout`
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { HospitalityForm, normalizePhone } from './pkg/hospitality_wasm.js';
//!
//! await init();
//!
//! const page = new HospitalityForm("hospitalityForm", JSON.stringify({
//!     autosave: { enabled: true },
//! }));
//! page.notify("مرحبا", "info");
//!
//! // on navigation away
//! page.dispose();
//! ```

pub mod app;
pub mod dispatch;
pub mod dom;
pub mod events;
pub mod logging;
pub mod scheduler;
pub mod storage;
pub mod toast;

use hospitality_form_core::{check_date_range, FormConfig, FormError};
use wasm_bindgen::prelude::*;

pub use app::HospitalityForm;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    logging::init(level);
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Digits only, `01` prefix, at most 11 digits
#[wasm_bindgen(js_name = normalizePhone)]
pub fn normalize_phone(raw: &str) -> String {
    hospitality_form_core::normalize_phone(raw)
}

#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone(value: &str) -> bool {
    hospitality_form_core::is_valid_phone(value)
}

/// Check a stay; returns `{ status, nights? }`
///
/// `max_nights` defaults to the configured 30.
#[wasm_bindgen(js_name = checkDateRange)]
pub fn check_date_range_js(
    arrival: &str,
    departure: &str,
    max_nights: Option<u32>,
) -> Result<JsValue, JsValue> {
    let max = max_nights
        .map(i64::from)
        .unwrap_or_else(|| FormConfig::default().max_stay_nights);
    let check = check_date_range(arrival, departure, max);
    serde_wasm_bindgen::to_value(&check)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn to_js(e: FormError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

pub(crate) fn dom_err(e: JsValue) -> FormError {
    FormError::Dom(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_package() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_phone_helpers() {
        assert_eq!(normalize_phone("10 1234 5678"), "01012345678");
        assert!(is_valid_phone("01012345678"));
        assert!(!is_valid_phone("0201234567"));
    }
}
