pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod forwarder;
pub mod globals;
pub mod pixel;

use wasm_bindgen::prelude::*;

pub use backend::TrackingBackend;
pub use config::{load_config, PixelConfig};
pub use diagnostics::{ConsoleSink, DiagnosticSink, SilentSink};
pub use error::TrackError;
pub use events::{Plan, Platform};
pub use forwarder::{EventField, EventForwarder};
pub use pixel::FbqPixel;

/// Event parameters, forwarded to the pixel as a plain object
pub type EventParams = serde_json::Map<String, serde_json::Value>;

/// Wire up the pixel helpers when the module loads
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    globals::apply_config(&load_config());
    globals::install_globals();
}
