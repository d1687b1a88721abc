use crate::config::PixelConfig;
use crate::diagnostics::{log_warning, ConsoleSink, DiagnosticSink, SilentSink};
use crate::forwarder::EventForwarder;
use crate::pixel::{field_from_js, params_from_js, string_from_js, FbqPixel};
use js_sys::Reflect;
use std::cell::Cell;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::*;

thread_local! {
    static LOG_EVENTS: Cell<bool> = const { Cell::new(true) };
}

type BrowserForwarder = EventForwarder<FbqPixel, &'static dyn DiagnosticSink>;

/// Apply the page config: event logging switch and one-time pixel init.
pub fn apply_config(config: &PixelConfig) {
    LOG_EVENTS.with(|log| log.set(config.log_events));

    let Some(pixel_id) = config.pixel_id() else {
        return;
    };
    // Pixel blocked or not loaded yet: nothing to bind
    let Some(pixel) = FbqPixel::locate() else {
        return;
    };
    if let Err(e) = pixel.init(pixel_id) {
        log_warning(&format!("Pixel: init failed: {}", e));
    }
}

/// Build a forwarder against whatever `fbq` is on the page right now.
///
/// Re-resolved on every call so a pixel script loaded after the wasm module
/// is still picked up.
fn with_forwarder(f: impl FnOnce(&BrowserForwarder)) {
    let sink: &'static dyn DiagnosticSink = if LOG_EVENTS.with(Cell::get) {
        &ConsoleSink
    } else {
        &SilentSink
    };
    f(&EventForwarder::new(FbqPixel::locate(), sink));
}

fn set_global<T: ?Sized + WasmClosure>(name: &str, closure: Closure<T>) {
    let _ = Reflect::set(&js_sys::global(), &JsValue::from_str(name), closure.as_ref());
    closure.forget(); // Page code may call these at any time
}

/// Attach the tracking helpers to the global object
pub fn install_globals() {
    set_global(
        "trackEvent",
        Closure::wrap(Box::new(|event_name: JsValue, parameters: JsValue| {
            let event_name = string_from_js(&event_name);
            let parameters = params_from_js(&parameters);
            with_forwarder(|f| f.track(&event_name, parameters));
        }) as Box<dyn Fn(JsValue, JsValue)>),
    );

    set_global(
        "trackContentGeneration",
        Closure::wrap(Box::new(|platform: JsValue, content_type: JsValue| {
            with_forwarder(|f| {
                f.track_content_generation(field_from_js(&platform), field_from_js(&content_type))
            });
        }) as Box<dyn Fn(JsValue, JsValue)>),
    );

    set_global(
        "trackContentPublish",
        Closure::wrap(Box::new(|platform: JsValue| {
            with_forwarder(|f| f.track_content_publish(field_from_js(&platform)));
        }) as Box<dyn Fn(JsValue)>),
    );

    set_global(
        "trackSubscription",
        Closure::wrap(Box::new(|plan: JsValue| {
            with_forwarder(|f| f.track_subscription(field_from_js(&plan)));
        }) as Box<dyn Fn(JsValue)>),
    );

    set_global(
        "trackLead",
        Closure::wrap(Box::new(|| {
            with_forwarder(|f| f.track_lead());
        }) as Box<dyn Fn()>),
    );
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::{Array, Function, JSON};
    use wasm_bindgen_test::*;

    const HELPERS: [&str; 5] = [
        "trackEvent",
        "trackContentGeneration",
        "trackContentPublish",
        "trackSubscription",
        "trackLead",
    ];

    fn global(name: &str) -> JsValue {
        Reflect::get(&js_sys::global(), &JsValue::from_str(name)).unwrap()
    }

    fn helper(name: &str) -> Function {
        global(name).dyn_into::<Function>().unwrap()
    }

    fn remove_fbq() {
        Reflect::delete_property(&js_sys::global(), &JsValue::from_str("fbq")).unwrap();
    }

    /// Install an `fbq` that records each call as `[action, name, JSON of params]`
    fn recording_fbq() -> Array {
        let calls = Array::new();
        let fbq = Function::new_with_args("a, b, c", "this.push([a, b, JSON.stringify(c)]);");
        Reflect::set(&js_sys::global(), &JsValue::from_str("fbq"), &fbq.bind(&calls)).unwrap();
        calls
    }

    fn recorded(calls: &Array) -> Vec<(String, String, String)> {
        calls
            .iter()
            .map(|call| {
                let call = Array::from(&call);
                (
                    call.get(0).as_string().unwrap(),
                    call.get(1).as_string().unwrap(),
                    call.get(2).as_string().unwrap(),
                )
            })
            .collect()
    }

    fn call(name: &str, expected: (&str, &str, &str), f: impl FnOnce(&Function)) {
        let calls = recording_fbq();
        f(&helper(name));
        assert_eq!(
            recorded(&calls),
            vec![(expected.0.to_string(), expected.1.to_string(), expected.2.to_string())]
        );
    }

    #[wasm_bindgen_test]
    fn helpers_are_installed_under_their_names() {
        install_globals();
        for name in HELPERS {
            assert!(global(name).is_function(), "{} is not a function", name);
        }
    }

    #[wasm_bindgen_test]
    fn track_event_defaults_to_empty_object() {
        install_globals();
        let expected = ("track", "Lead", "{}");
        call("trackEvent", expected, |f| {
            f.call1(&JsValue::NULL, &"Lead".into()).unwrap();
        });
        call("trackEvent", expected, |f| {
            f.call2(&JsValue::NULL, &"Lead".into(), &JsValue::UNDEFINED).unwrap();
        });
        call("trackEvent", expected, |f| {
            f.call2(&JsValue::NULL, &"Lead".into(), &JsValue::NULL).unwrap();
        });
    }

    #[wasm_bindgen_test]
    fn track_event_forwards_params() {
        install_globals();
        let params = JSON::parse(r#"{"value": 9.5, "currency": "EUR"}"#).unwrap();
        call("trackEvent", ("track", "Purchase", r#"{"currency":"EUR","value":9.5}"#), |f| {
            f.call2(&JsValue::NULL, &"Purchase".into(), &params).unwrap();
        });
    }

    #[wasm_bindgen_test]
    fn named_helpers_forward_their_events() {
        install_globals();
        call(
            "trackContentGeneration",
            ("track", "GenerateContent", r#"{"content_type":"post","platform":"twitter"}"#),
            |f| {
                f.call2(&JsValue::NULL, &"twitter".into(), &"post".into()).unwrap();
            },
        );
        call("trackContentPublish", ("track", "Publish", r#"{"platform":"linkedin"}"#), |f| {
            f.call1(&JsValue::NULL, &"linkedin".into()).unwrap();
        });
        call("trackSubscription", ("track", "Subscribe", r#"{"plan":"pro"}"#), |f| {
            f.call1(&JsValue::NULL, &"pro".into()).unwrap();
        });
        call("trackLead", ("track", "Lead", "{}"), |f| {
            f.call0(&JsValue::NULL).unwrap();
        });
    }

    #[wasm_bindgen_test]
    fn missing_argument_is_left_out() {
        install_globals();
        call(
            "trackContentGeneration",
            ("track", "GenerateContent", r#"{"platform":"telegram"}"#),
            |f| {
                f.call1(&JsValue::NULL, &"telegram".into()).unwrap();
            },
        );
    }

    #[wasm_bindgen_test]
    fn missing_fbq_is_silent() {
        install_globals();
        remove_fbq();
        for name in HELPERS {
            assert!(helper(name).call1(&JsValue::NULL, &"Lead".into()).is_ok());
        }
    }

    #[wasm_bindgen_test]
    fn fbq_loaded_after_install_is_picked_up() {
        remove_fbq();
        install_globals();
        helper("trackLead").call0(&JsValue::NULL).unwrap();

        let calls = recording_fbq();
        helper("trackLead").call0(&JsValue::NULL).unwrap();

        assert_eq!(recorded(&calls).len(), 1);
    }

    #[wasm_bindgen_test]
    fn throwing_fbq_does_not_reach_the_page() {
        install_globals();
        let fbq = Function::new_with_args("a, b, c", "throw new Error('pixel exploded');");
        Reflect::set(&js_sys::global(), &JsValue::from_str("fbq"), &fbq).unwrap();

        assert!(helper("trackLead").call0(&JsValue::NULL).is_ok());
        assert!(helper("trackSubscription").call1(&JsValue::NULL, &"pro".into()).is_ok());
    }
}
