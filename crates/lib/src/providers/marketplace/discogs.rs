//! # Discogs Price Lookup
//!
//! A two-step lookup: search the database for the release, then ask the
//! marketplace for price suggestions on the first hit. Each call is attempted
//! once; any failure ends the lookup with a non-`Found` outcome.

use crate::{
    constants::{REQUEST_TIMEOUT_SECS, USER_AGENT},
    errors::ScanError,
    providers::marketplace::PriceSource,
    types::{Metadata, Outcome},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Metadata fields forwarded to the search endpoint, with their query names.
const SEARCH_FIELDS: [(&str, &str); 3] = [
    ("album_title", "release_title"),
    ("catalog_number", "catno"),
    ("release_year", "year"),
];

/// A client for the Discogs database and marketplace APIs.
#[derive(Clone, Debug)]
pub struct DiscogsClient {
    client: ReqwestClient,
    base_url: String,
}

impl DiscogsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ScanError> {
        let client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ScanError::HttpClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Step one: finds the identifier of the first release matching `metadata`.
    pub async fn search_release(&self, metadata: &Metadata, token: &str) -> Outcome<String> {
        let mut params = search_params(metadata);
        params.push(("type", "release".to_string()));

        let url = format!("{}/database/search", self.base_url);
        let body = match self.get_json(&url, &params, token).await.into_step() {
            Ok(body) => body,
            Err(failure) => {
                warn!("Discogs search failed: {failure}");
                return failure;
            }
        };

        let Some(first) = body
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
        else {
            info!("Discogs search returned no results.");
            return Outcome::NotFound;
        };

        match first.get("id").and_then(id_to_string) {
            Some(id) => {
                debug!(release_id = %id, "Discogs search matched a release");
                Outcome::Found(id)
            }
            None => {
                info!("First Discogs result has no identifier.");
                Outcome::NotFound
            }
        }
    }

    /// Step two: the lowest suggested price across all conditions for a release.
    pub async fn price_suggestion(&self, release_id: &str, token: &str) -> Outcome<f64> {
        let url = format!(
            "{}/marketplace/price_suggestions/{release_id}",
            self.base_url
        );
        let body = match self.get_json(&url, &[], token).await.into_step() {
            Ok(body) => body,
            Err(failure) => {
                warn!("Discogs price suggestion failed: {failure}");
                return failure;
            }
        };

        match min_suggested_price(&body) {
            Some(price) => Outcome::Found(price),
            None => {
                info!(release_id, "No numeric price suggestions for release.");
                Outcome::NotFound
            }
        }
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)], token: &str) -> Outcome<Value> {
        let response = match self
            .client
            .get(url)
            .header("Authorization", format!("Discogs token={token}"))
            .query(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::TransportError(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Outcome::TransportError(format!("status {}: {error_text}", status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(body) => Outcome::Found(body),
            Err(e) => Outcome::DecodeError(e.to_string()),
        }
    }
}

#[async_trait]
impl PriceSource for DiscogsClient {
    async fn lookup_price(&self, metadata: &Metadata, token: Option<&str>) -> Outcome<f64> {
        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            info!("No Discogs token configured; skipping price lookup.");
            return Outcome::NotFound;
        };

        let release_id = match self.search_release(metadata, token).await.into_step() {
            Ok(id) => id,
            Err(unavailable) => return unavailable,
        };

        self.price_suggestion(&release_id, token).await
    }
}

/// Builds search query pairs from whichever fields are present.
///
/// Absent, null and empty fields are left out.
pub fn search_params(metadata: &Metadata) -> Vec<(&'static str, String)> {
    SEARCH_FIELDS
        .iter()
        .filter_map(|(field, param)| {
            let value = match metadata.get(*field)? {
                Value::String(s) if !s.trim().is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((*param, value))
        })
        .collect()
}

/// The minimum numeric `value` among condition entries, if there is one.
pub fn min_suggested_price(suggestions: &Value) -> Option<f64> {
    suggestions
        .as_object()?
        .values()
        .filter_map(|entry| entry.get("value").and_then(Value::as_f64))
        .reduce(f64::min)
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
