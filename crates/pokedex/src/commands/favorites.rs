use colored::Colorize;

use crate::favorites::{FavoritesStorage, FavoritesStore};
use crate::prelude::{println, *};
use crate::render::format_json;

#[derive(Debug, clap::Parser)]
#[command(name = "favorites")]
#[command(about = "Manage favorite Pokémon")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List favorites in the order they were added
    #[clap(name = "list")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a Pokémon as favorite
    #[clap(name = "add")]
    Add { name: String },

    /// Remove a Pokémon from favorites
    #[clap(name = "remove")]
    Remove { name: String },

    /// Add the Pokémon if missing, remove it otherwise
    #[clap(name = "toggle")]
    Toggle { name: String },
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let mut store = global.favorites_store()?;

    match app.command {
        Commands::List { json } => {
            if json {
                println!("{}", format_json(&store.favorites())?);
            } else {
                print!("{}", format_favorites_text(&store));
            }
        }
        Commands::Add { name } => {
            let name = normalize(&name);
            store.add_favorite(&name);
            println!("{} {}", "★".bright_yellow(), name);
        }
        Commands::Remove { name } => {
            let name = normalize(&name);
            store.remove_favorite(&name);
            println!("Removed {}", name);
        }
        Commands::Toggle { name } => {
            let name = normalize(&name);
            if store.toggle_favorite(&name) {
                println!("{} {}", "★".bright_yellow(), name);
            } else {
                println!("Removed {}", name);
            }
        }
    }

    Ok(())
}

/// Favorites are keyed by the API's lowercase names
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn format_favorites_text<S: FavoritesStorage>(store: &FavoritesStore<S>) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{}\n",
        crate::copy::HEADING_FAVORITES
            .to_uppercase()
            .bright_cyan()
            .bold()
    ));

    if store.is_empty() {
        result.push_str(&format!("{}\n", "No favorites yet.".yellow()));
        return result;
    }

    for name in store.favorites() {
        result.push_str(&format!("{} {}\n", "★".bright_yellow(), name));
    }

    result
}
