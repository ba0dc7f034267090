pub mod discogs;

use crate::types::{Metadata, Outcome};
use async_trait::async_trait;
use std::fmt::Debug;

/// A trait for marketplace services that can price a release.
#[async_trait]
pub trait PriceSource: Send + Sync + Debug {
    /// Returns the lowest suggested price for the release described by `metadata`.
    ///
    /// Without a token nothing is looked up and the result is `NotFound`.
    async fn lookup_price(&self, metadata: &Metadata, token: Option<&str>) -> Outcome<f64>;
}
