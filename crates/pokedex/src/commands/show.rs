use futures::future::join_all;
use pokedex_core::pokemon::Pokemon;

use crate::api::PokemonApi;
use crate::error::FetchError;
use crate::loader::LoadingIndicator;
use crate::prelude::{eprintln, println, *};
use crate::render::{
    finish_spinner, format_json, format_pokemon_table, spawn_spinner, PokemonOutput,
};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Pokémon names or numeric ids (e.g., "pikachu" or "25")
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let store = global.favorites_store()?;
    let api = global.api();

    let loader = LoadingIndicator::default();
    let spinner = spawn_spinner(loader.subscribe());
    loader.start();
    let results = fetch_all(&api, &options.names).await;
    loader.stop();
    drop(loader);
    finish_spinner(spinner).await;

    let mut found = Vec::new();
    for (name, result) in options.names.iter().zip(results) {
        match result {
            Ok(pokemon) => found.push(PokemonOutput {
                favorite: store.is_favorite(&pokemon.name),
                pokemon,
            }),
            Err(FetchError::Status(404)) => eprintln!("No Pokémon named \"{}\"", name),
            Err(e) => eprintln!("Failed to fetch \"{}\": {}", name, e),
        }
    }

    if found.is_empty() {
        return Err(eyre!("No Pokémon found"));
    }

    if options.json {
        println!("{}", format_json(&found)?);
    } else {
        for output in &found {
            println!();
            format_pokemon_table(&output.pokemon, output.favorite).printstd();
        }
    }

    Ok(())
}

/// Fetch every name concurrently, keeping input order
pub async fn fetch_all<A: PokemonApi>(
    api: &A,
    names: &[String],
) -> Vec<Result<Pokemon, FetchError>> {
    let normalized: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
    join_all(normalized.iter().map(|name| api.fetch_detail(name))).await
}
