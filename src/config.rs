use crate::diagnostics::log_warning;
use js_sys::{Reflect, JSON};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "pixelConfig";

/// Page-provided pixel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelConfig {
    #[serde(default)]
    pub pixel_id: Option<String>,
    #[serde(default = "default_log_events")]
    pub log_events: bool,
}

fn default_log_events() -> bool {
    true
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            pixel_id: None,
            log_events: true,
        }
    }
}

impl PixelConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The pixel id to initialise with, if one is set and not blank
    pub fn pixel_id(&self) -> Option<&str> {
        self.pixel_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Load the config from the `pixelConfig` global.
///
/// A missing global is normal (defaults, no warning). A global that does not
/// parse falls back to defaults with a console warning.
pub fn load_config() -> PixelConfig {
    let value = match Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return PixelConfig::default(),
    };

    // stringify yields `undefined` for functions and symbols
    let json = match JSON::stringify(&value).ok().and_then(|s| s.as_string()) {
        Some(s) => s,
        None => {
            log_warning("Pixel: Could not read pixelConfig (using defaults)");
            return PixelConfig::default();
        }
    };

    PixelConfig::from_json(&json).unwrap_or_else(|e| {
        log_warning(&format!(
            "Pixel: Failed to parse pixelConfig (using defaults): {}",
            e
        ));
        PixelConfig::default()
    })
}
