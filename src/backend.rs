use crate::error::TrackError;
use crate::EventParams;

/// The tracking entry point events are forwarded to.
///
/// Implemented by [`crate::pixel::FbqPixel`] in the browser and by recording
/// doubles in tests.
pub trait TrackingBackend {
    /// Invoke the entry point as `(action, event_name, parameters)`
    fn call(&self, action: &str, event_name: &str, parameters: &EventParams)
        -> Result<(), TrackError>;
}

impl<T: TrackingBackend + ?Sized> TrackingBackend for &T {
    fn call(
        &self,
        action: &str,
        event_name: &str,
        parameters: &EventParams,
    ) -> Result<(), TrackError> {
        (**self).call(action, event_name, parameters)
    }
}
