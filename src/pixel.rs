use crate::backend::TrackingBackend;
use crate::diagnostics::log_warning;
use crate::error::TrackError;
use crate::events::INIT;
use crate::EventParams;
use js_sys::{Function, Object, Reflect, JSON};
use serde_json::{Number, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const FBQ_GLOBAL: &str = "fbq";

/// Handle to the Meta Pixel's global `fbq` function
#[derive(Debug, Clone)]
pub struct FbqPixel {
    fbq: Function,
}

impl FbqPixel {
    /// Look up `fbq` on the global object.
    ///
    /// Returns `None` if the pixel script was never injected, was blocked by
    /// an adblocker, or something other than a function sits under that name.
    pub fn locate() -> Option<Self> {
        let value = Reflect::get(&js_sys::global(), &JsValue::from_str(FBQ_GLOBAL)).ok()?;
        value.dyn_into::<Function>().ok().map(|fbq| Self { fbq })
    }

    /// Bind the pixel to an id: `fbq('init', pixel_id)`
    pub fn init(&self, pixel_id: &str) -> Result<(), TrackError> {
        self.fbq
            .call2(&JsValue::NULL, &INIT.into(), &pixel_id.into())
            .map(|_| ())
            .map_err(rejected)
    }
}

impl TrackingBackend for FbqPixel {
    fn call(
        &self,
        action: &str,
        event_name: &str,
        parameters: &EventParams,
    ) -> Result<(), TrackError> {
        let params = params_to_js(parameters).unwrap_or_else(|| Object::new().into());
        self.fbq
            .call3(&JsValue::NULL, &action.into(), &event_name.into(), &params)
            .map(|_| ())
            .map_err(rejected)
    }
}

fn rejected(err: JsValue) -> TrackError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    };
    TrackError::Rejected(message)
}

/// Convert parameters into a plain JS object
pub(crate) fn params_to_js(parameters: &EventParams) -> Option<JsValue> {
    let json = serde_json::to_string(parameters).ok()?;
    JSON::parse(&json).ok()
}

/// Read a parameters argument passed in from page code.
///
/// `undefined` and `null` mean "no parameters". The object is copied through
/// `JSON.stringify`, so members take their JSON form: a `Date` arrives as its
/// ISO string, `NaN` and `Infinity` as `null`, functions and `undefined`
/// members are dropped. Anything that does not serialise to a JSON object
/// (a `BigInt` member, a cycle, a bare string) is replaced by `{}` with a
/// console warning.
pub(crate) fn params_from_js(value: &JsValue) -> EventParams {
    if value.is_undefined() || value.is_null() {
        return EventParams::new();
    }

    // stringify yields `undefined` for functions and symbols
    let json = match JSON::stringify(value).ok().and_then(|s| s.as_string()) {
        Some(s) => s,
        None => {
            log_warning("Pixel: event parameters could not be serialized (sending none)");
            return EventParams::new();
        }
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        log_warning(&format!(
            "Pixel: event parameters must be an object (sending none): {}",
            e
        ));
        EventParams::new()
    })
}

/// Read a single helper argument (platform, plan, ...) passed in from page code.
///
/// `undefined` yields `None` so the key is left out. Strings, numbers, booleans
/// and `null` keep their type; other values go through `JSON.stringify`.
pub(crate) fn field_from_js(value: &JsValue) -> Option<Value> {
    if value.is_undefined() {
        return None;
    }
    if value.is_null() {
        return Some(Value::Null);
    }
    if let Some(s) = value.as_string() {
        return Some(Value::String(s));
    }
    if let Some(b) = value.as_bool() {
        return Some(Value::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        return Some(Number::from_f64(n).map_or(Value::Null, Value::Number));
    }

    let json = JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

/// Read the event name passed in from page code, tolerating numbers
pub(crate) fn string_from_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .unwrap_or_default()
}
