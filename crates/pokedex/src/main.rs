#![allow(unused)]

use std::path::PathBuf;

use crate::prelude::{eprintln, *};
use clap::Parser;
use pokedex_core::pokemon::BASE_URL;

mod api;
mod commands;
mod controller;
mod copy;
mod debounce;
mod error;
mod favorites;
mod loader;
mod prelude;
mod render;

use api::HttpPokemonApi;
use favorites::{FavoritesStore, JsonFileStorage};

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, search and bookmark Pokémon from the PokeAPI"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// PokeAPI pokemon endpoint
    #[clap(long, env = "POKEDEX_API_URL", global = true, default_value = BASE_URL)]
    api_url: String,

    /// Favorites file (defaults to <data dir>/pokedex/favorites.json)
    #[clap(long, env = "POKEDEX_FAVORITES", global = true)]
    favorites_file: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "POKEDEX_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn api(&self) -> HttpPokemonApi {
        HttpPokemonApi::new(&self.api_url)
    }

    pub fn favorites_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.favorites_file {
            return Ok(path.clone());
        }

        let data_dir = dirs_next::data_dir()
            .ok_or_else(|| eyre!("Unable to determine data directory"))?
            .join("pokedex");

        Ok(data_dir.join("favorites.json"))
    }

    /// Open the favorites store, rehydrating from disk
    pub fn favorites_store(&self) -> Result<FavoritesStore> {
        let path = self.favorites_path()?;

        if self.verbose {
            eprintln!("Favorites file: {}", path.display());
        }

        Ok(FavoritesStore::open(JsonFileStorage::new(path)))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List Pokémon page by page
    List(crate::commands::list::ListOptions),

    /// Search loaded Pokémon, falling back to a lookup by name
    Search(crate::commands::search::SearchOptions),

    /// Show details for one or more Pokémon
    Show(crate::commands::show::ShowOptions),

    /// Manage favorite Pokémon
    Favorites(crate::commands::favorites::App),

    /// Interactive session with debounced search
    Browse(crate::commands::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    if app.global.verbose {
        eprintln!("PokeAPI Base: {}", app.global.api_url);
    }

    match app.command {
        SubCommands::List(options) => crate::commands::list::run(options, app.global).await,
        SubCommands::Search(options) => crate::commands::search::run(options, app.global).await,
        SubCommands::Show(options) => crate::commands::show::run(options, app.global).await,
        SubCommands::Favorites(sub_app) => crate::commands::favorites::run(sub_app, app.global),
        SubCommands::Browse(options) => crate::commands::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
