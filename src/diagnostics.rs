use crate::EventParams;
use wasm_bindgen::JsValue;

const TRACKED_PREFIX: &str = "Facebook Pixel event tracked:";

/// Receives one record per event that reached the pixel
pub trait DiagnosticSink {
    fn event_tracked(&self, event_name: &str, parameters: &EventParams);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn event_tracked(&self, event_name: &str, parameters: &EventParams) {
        (**self).event_tracked(event_name, parameters)
    }
}

/// Writes tracked events to the browser console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn event_tracked(&self, event_name: &str, parameters: &EventParams) {
        let params = crate::pixel::params_to_js(parameters).unwrap_or(JsValue::UNDEFINED);
        web_sys::console::log_3(
            &TRACKED_PREFIX.into(),
            &event_name.into(),
            &params,
        );
    }
}

/// Discards every record; used when event logging is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn event_tracked(&self, _event_name: &str, _parameters: &EventParams) {}
}

/// Log a warning message to the browser console.
pub(crate) fn log_warning(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}
