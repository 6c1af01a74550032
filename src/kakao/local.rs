use serde::Deserialize;
use tracing::{info, warn};

use super::KakaoClient;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct KeywordSearch {
    #[serde(default)]
    documents: Vec<PlaceDocument>,
}

#[derive(Debug, Deserialize)]
struct PlaceDocument {
    #[serde(default)]
    road_address_name: Option<String>,
    #[serde(default)]
    address_name: Option<String>,
}

impl PlaceDocument {
    fn best_address(self) -> Option<String> {
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        non_empty(self.road_address_name).or_else(|| non_empty(self.address_name))
    }
}

impl KakaoClient {
    /// Road address of the first keyword-search hit, falling back to its
    /// lot address.
    pub async fn lookup_address(&self, place: &str) -> Result<String> {
        let response = self
            .http
            .get(self.local_url("/v2/local/search/keyword.json"))
            .header("Authorization", format!("KakaoAK {}", self.config.client_id))
            .query(&[("query", place)])
            .send()
            .await
            .map_err(|e| AppError::LookupError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::LookupError(format!("HTTP {}", status)));
        }

        let search: KeywordSearch = response
            .json()
            .await
            .map_err(|e| AppError::LookupError(e.to_string()))?;

        search
            .documents
            .into_iter()
            .next()
            .and_then(PlaceDocument::best_address)
            .ok_or_else(|| AppError::LookupError(format!("no result for '{}'", place)))
    }

    /// Best-effort variant of [`lookup_address`](Self::lookup_address).
    pub async fn resolve_address(&self, place: &str) -> Option<String> {
        match self.lookup_address(place).await {
            Ok(address) => {
                info!(place, address = %address, "address resolved");
                Some(address)
            }
            Err(e) => {
                warn!(place, error = %e, "address lookup failed");
                None
            }
        }
    }
}
