use async_trait::async_trait;
use pokedex_core::pokemon::{
    detail_url, list_url, map_to_domain, Pokemon, PokemonDetailResponse, PokemonListItem,
    PokemonListResponse,
};
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Source of pokemon pages and details
///
/// Implementations never panic on remote failures; everything comes back as a
/// `FetchError`.
#[async_trait]
pub trait PokemonApi: Send + Sync {
    /// Base URL used to build entry links
    fn base_url(&self) -> &str;

    /// Fetch one page of the list endpoint
    async fn fetch_list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PokemonListItem>, FetchError>;

    /// Fetch a single pokemon by name or numeric id
    async fn fetch_detail(&self, name_or_id: &str) -> Result<Pokemon, FetchError>;
}

/// PokeAPI client over HTTP
#[derive(Debug, Clone)]
pub struct HttpPokemonApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPokemonApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            log::debug!("GET {url} returned {}", response.status());
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PokemonApi for HttpPokemonApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PokemonListItem>, FetchError> {
        let url = list_url(&self.base_url, limit, offset);
        let response: PokemonListResponse = self.get_json(&url).await?;
        Ok(response.results)
    }

    async fn fetch_detail(&self, name_or_id: &str) -> Result<Pokemon, FetchError> {
        let url = detail_url(&self.base_url, &urlencoding::encode(name_or_id));
        let response: PokemonDetailResponse = self.get_json(&url).await?;
        Ok(map_to_domain(response))
    }
}
