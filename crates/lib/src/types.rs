use serde_json::{Map, Value};
use std::fmt;

/// Sleeve attributes decoded from a model reply.
///
/// Recognized keys are `interpret`, `album_title`, `release_year`,
/// `country_printed` and `catalog_number`, but nothing is enforced: whatever
/// object the model returned is kept as-is.
pub type Metadata = Map<String, Value>;

/// The metadata key under which a looked-up marketplace price is stored.
pub const PRICE_FIELD: &str = "discogs_price_eur";

/// The result of a step that may soft-fail.
///
/// Every variant other than `Found` means "unavailable": the pipeline logs it
/// and carries on without the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The step produced a value.
    Found(T),
    /// Nothing to return, and nothing went wrong (no JSON span, no search hits,
    /// no token configured).
    NotFound,
    /// Data was present but could not be decoded.
    DecodeError(String),
    /// The remote call failed at the transport or HTTP status level.
    TransportError(String),
}

impl<T> Outcome<T> {
    /// Converts into an `Option`, discarding the failure detail.
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::DecodeError(detail) => Outcome::DecodeError(detail),
            Outcome::TransportError(detail) => Outcome::TransportError(detail),
        }
    }

    /// Splits a found value from a short-circuiting failure.
    ///
    /// The `Err` side is re-typed so a multi-step lookup can return it
    /// directly from a later step.
    pub fn into_step<U>(self) -> Result<T, Outcome<U>> {
        match self {
            Outcome::Found(value) => Ok(value),
            Outcome::NotFound => Err(Outcome::NotFound),
            Outcome::DecodeError(detail) => Err(Outcome::DecodeError(detail)),
            Outcome::TransportError(detail) => Err(Outcome::TransportError(detail)),
        }
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(_) => write!(f, "found"),
            Outcome::NotFound => write!(f, "not found"),
            Outcome::DecodeError(detail) => write!(f, "decode error: {detail}"),
            Outcome::TransportError(detail) => write!(f, "transport error: {detail}"),
        }
    }
}

/// Switches for the optional stages of `SleeveScanner::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Attach the encoded sleeve photo to the vision request.
    pub send_image: bool,
    /// Look up a marketplace price for the extracted release.
    pub lookup_price: bool,
}
