use crate::backend::TrackingBackend;
use crate::diagnostics::DiagnosticSink;
use crate::error::TrackError;
use crate::events::{Plan, Platform, GENERATE_CONTENT, LEAD, PUBLISH, SUBSCRIBE, TRACK};
use crate::EventParams;
use serde_json::Value;

/// Translates domain actions into pixel events.
///
/// The backend is optional: with `None` every call is a silent no-op. None of
/// the public methods can fail or panic.
pub struct EventForwarder<B, D> {
    backend: Option<B>,
    diagnostics: D,
}

impl<B: TrackingBackend, D: DiagnosticSink> EventForwarder<B, D> {
    pub fn new(backend: Option<B>, diagnostics: D) -> Self {
        Self {
            backend,
            diagnostics,
        }
    }

    /// Forward `event_name` with `parameters` as a `track` call
    pub fn track(&self, event_name: &str, parameters: EventParams) {
        let _ = self.try_track(event_name, parameters);
    }

    /// Same as [`track`](Self::track) with an empty parameter map
    pub fn track_without_params(&self, event_name: &str) {
        self.track(event_name, EventParams::new());
    }

    /// Forward an event and report why it did not go out.
    ///
    /// The diagnostic record is only written once the backend accepted the call.
    pub fn try_track(&self, event_name: &str, parameters: EventParams) -> Result<(), TrackError> {
        let backend = self.backend.as_ref().ok_or(TrackError::Unavailable)?;
        backend.call(TRACK, event_name, &parameters)?;
        self.diagnostics.event_tracked(event_name, &parameters);
        Ok(())
    }

    pub fn track_content_generation(
        &self,
        platform: impl EventField,
        content_type: impl EventField,
    ) {
        let mut params = EventParams::new();
        insert_field(&mut params, "platform", platform);
        insert_field(&mut params, "content_type", content_type);
        self.track(GENERATE_CONTENT, params);
    }

    pub fn track_content_publish(&self, platform: impl EventField) {
        let mut params = EventParams::new();
        insert_field(&mut params, "platform", platform);
        self.track(PUBLISH, params);
    }

    pub fn track_subscription(&self, plan: impl EventField) {
        let mut params = EventParams::new();
        insert_field(&mut params, "plan", plan);
        self.track(SUBSCRIBE, params);
    }

    pub fn track_lead(&self) {
        self.track_without_params(LEAD);
    }
}

/// A value the named helpers can place under a parameter key.
///
/// `None` leaves the key out, the way the pixel drops `undefined` members.
pub trait EventField {
    fn into_field(self) -> Option<Value>;
}

impl EventField for &str {
    fn into_field(self) -> Option<Value> {
        Some(Value::String(self.to_string()))
    }
}

impl EventField for String {
    fn into_field(self) -> Option<Value> {
        Some(Value::String(self))
    }
}

impl EventField for Platform {
    fn into_field(self) -> Option<Value> {
        self.as_str().into_field()
    }
}

impl EventField for Plan {
    fn into_field(self) -> Option<Value> {
        self.as_str().into_field()
    }
}

impl EventField for Value {
    fn into_field(self) -> Option<Value> {
        Some(self)
    }
}

impl<T: EventField> EventField for Option<T> {
    fn into_field(self) -> Option<Value> {
        self.and_then(EventField::into_field)
    }
}

fn insert_field(params: &mut EventParams, key: &str, field: impl EventField) {
    if let Some(value) = field.into_field() {
        params.insert(key.to_string(), value);
    }
}
