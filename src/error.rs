use thiserror::Error;

/// Why an event did not reach the pixel.
///
/// Never surfaced to page code: the public tracking calls swallow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// `fbq` is not loaded (blocked by an adblocker, not yet injected, etc.)
    #[error("tracking backend unavailable")]
    Unavailable,
    /// `fbq` was present but threw
    #[error("tracking backend rejected the call: {0}")]
    Rejected(String),
}
