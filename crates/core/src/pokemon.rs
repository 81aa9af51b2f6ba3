use serde::{Deserialize, Serialize};

/// Base URL of the PokeAPI pokemon resource
pub const BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Number of entries requested per page
pub const DEFAULT_LIMIT: usize = 20;

/// Offset of the first page
pub const DEFAULT_OFFSET: usize = 0;

/// Entry of the paged pokemon list
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PokemonListItem {
    pub name: String,
    pub url: String,
}

/// Paged list response from the API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PokemonListResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<PokemonListItem>,
}

/// Type slot of a pokemon detail
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PokemonSprites {
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: OfficialArtwork,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

/// Detail response for a single pokemon
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PokemonDetailResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub sprites: PokemonSprites,
}

/// Pokemon as shown to the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
}

/// Build the list endpoint URL for a page
pub fn list_url(base: &str, limit: usize, offset: usize) -> String {
    format!("{}?limit={limit}&offset={offset}", base.trim_end_matches('/'))
}

/// Build the detail endpoint URL for a name or numeric id
///
/// The identifier is expected to be URL-safe already; the shell encodes user
/// input before calling this.
pub fn detail_url(base: &str, name_or_id: &str) -> String {
    format!("{}/{name_or_id}", base.trim_end_matches('/'))
}

/// Transform a detail response into the domain shape
///
/// Flattens `types[].type.name` and lifts the official artwork URL.
pub fn map_to_domain(response: PokemonDetailResponse) -> Pokemon {
    Pokemon {
        id: response.id,
        name: response.name,
        image_url: response.sprites.other.official_artwork.front_default,
        types: response
            .types
            .into_iter()
            .map(|t| t.type_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
    }
}

/// List entry pointing at a fetched pokemon by id
pub fn list_item_from_detail(base: &str, pokemon: &Pokemon) -> PokemonListItem {
    PokemonListItem {
        name: pokemon.name.clone(),
        url: detail_url(base, &pokemon.id.to_string()),
    }
}

/// Height in metres (the API reports decimetres)
pub fn height_in_meters(height: u32) -> f64 {
    f64::from(height) / 10.0
}

/// Weight in kilograms (the API reports hectograms)
pub fn weight_in_kilograms(weight: u32) -> f64 {
    f64::from(weight) / 10.0
}
