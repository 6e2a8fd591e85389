//! PokeAPI catalog client.
//!
//! One list request names the first `count` entries; every entry is then
//! resolved through its own detail request. Detail requests run concurrently
//! and the batch fails as a whole on the first error.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use pokedex_domain::{RawRecord, RecordId, StatEntry};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::infrastructure::ports::{CatalogPort, FetchError};

/// Default PokeAPI base URL.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default per-request timeout in seconds.
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;

/// Client for the PokeAPI REST catalog
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_CATALOG_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn list_url(&self, count: usize) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join("pokemon")
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("limit", &count.to_string())
            .append_pair("offset", "0");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(FetchError::invalid_response)
    }

    async fn fetch_detail(&self, url: &str) -> Result<RawRecord, FetchError> {
        let detail: PokemonDetail = self.get_json(url).await?;
        Ok(detail.into())
    }
}

#[async_trait]
impl CatalogPort for PokeApiClient {
    async fn fetch_records(&self, count: usize) -> Result<Vec<RawRecord>, FetchError> {
        let list_url = self.list_url(count)?;
        tracing::debug!(url = %list_url, count, "Fetching catalog list");

        let list: PokemonListResponse = self.get_json(list_url.as_str()).await?;

        let records =
            try_join_all(list.results.iter().map(|entry| self.fetch_detail(&entry.url))).await?;

        tracing::debug!(fetched = records.len(), "Catalog details resolved");
        Ok(records)
    }
}

/// Parses and normalizes the base URL so that relative joins append to it.
fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let with_slash = format!("{}/", raw.trim().trim_end_matches('/'));
    let url = Url::parse(&with_slash).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "{raw}: unsupported scheme {other}"
        ))),
    }
}

// =============================================================================
// PokeAPI wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PokemonListResponse {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    url: String,
}

#[derive(Debug, Deserialize)]
struct NameRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PokemonDetail {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NameRef,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NameRef,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    stat: NameRef,
    base_stat: u32,
}

impl From<PokemonDetail> for RawRecord {
    fn from(detail: PokemonDetail) -> Self {
        Self {
            id: RecordId::new(detail.id),
            name: detail.name,
            height: detail.height,
            weight: detail.weight,
            types: detail.types.into_iter().map(|slot| slot.kind.name).collect(),
            abilities: detail
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            sprite_url: detail.sprites.front_default,
            stats: detail
                .stats
                .into_iter()
                .map(|slot| StatEntry::new(slot.stat.name, slot.base_stat))
                .collect(),
        }
    }
}
