use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pokedex_core::pokemon::{height_in_meters, weight_in_kilograms, Pokemon, PokemonListItem};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::copy;
use crate::prelude::*;

/// List entry as emitted by `--json`
#[derive(Debug, Serialize, Clone)]
pub struct ListEntryOutput {
    pub name: String,
    pub url: String,
    pub favorite: bool,
}

/// Controller snapshot as emitted by `--json`
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub query: String,
    pub items: Vec<ListEntryOutput>,
    pub empty: bool,
    pub offset: usize,
    pub has_more: bool,
    pub error: Option<String>,
}

/// Detail as emitted by `--json`
#[derive(Debug, Serialize, Clone)]
pub struct PokemonOutput {
    #[serde(flatten)]
    pub pokemon: Pokemon,
    pub favorite: bool,
}

pub fn list_entries(
    items: &[PokemonListItem],
    is_favorite: impl Fn(&str) -> bool,
) -> Vec<ListEntryOutput> {
    items
        .iter()
        .map(|item| ListEntryOutput {
            name: item.name.clone(),
            url: item.url.clone(),
            favorite: is_favorite(&item.name),
        })
        .collect()
}

pub fn format_json<T: Serialize>(output: &T) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn favorite_marker(favorite: bool) -> String {
    if favorite {
        "★".bright_yellow().to_string()
    } else {
        " ".to_string()
    }
}

/// Numbered list with favorite markers, or the empty state
pub fn format_list_text(heading: &str, output: &ListOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(60).bright_cyan()));
    if output.query.is_empty() {
        result.push_str(&format!("{}\n", heading.to_uppercase().bright_cyan().bold()));
    } else {
        result.push_str(&format!(
            "{}\n",
            format!("{} · {} \"{}\"", heading.to_uppercase(), copy::SEARCH_PROMPT, output.query)
                .bright_cyan()
                .bold()
        ));
    }
    result.push_str(&format!("{}\n", "=".repeat(60).bright_cyan()));

    if output.empty {
        result.push_str(&format!("\n{}\n", copy::EMPTY_TITLE.yellow().bold()));
        result.push_str(&format!("{}\n", copy::EMPTY_CAPTION.yellow()));
    } else {
        for (idx, entry) in output.items.iter().enumerate() {
            result.push_str(&format!(
                "{} {:>4} {}\n",
                favorite_marker(entry.favorite),
                format!("{}.", idx + 1).bright_black(),
                entry.name.white().bold()
            ));
        }
    }

    if let Some(error) = &output.error {
        result.push_str(&format!("\n{}: {}\n", "Error".red().bold(), error.red()));
    }

    result.push_str(&format!(
        "\n{} {}{}\n",
        output.items.len().to_string().bright_cyan().bold(),
        "shown".bright_white(),
        if output.has_more {
            format!(" ({} {})", "more available from offset", output.offset)
        } else {
            String::new()
        }
    ));

    result
}

/// Detail table for a single pokemon
pub fn format_pokemon_table(pokemon: &Pokemon, favorite: bool) -> prettytable::Table {
    let mut table = new_table();

    table.add_row(prettytable::row![
        copy::LABEL_NAME,
        format!("{} {}", pokemon.name, favorite_marker(favorite))
    ]);
    table.add_row(prettytable::row!["#", pokemon.id]);
    table.add_row(prettytable::row![
        copy::LABEL_HEIGHT,
        format!("{:.1} m", height_in_meters(pokemon.height))
    ]);
    table.add_row(prettytable::row![
        copy::LABEL_WEIGHT,
        format!("{:.1} kg", weight_in_kilograms(pokemon.weight))
    ]);
    table.add_row(prettytable::row![copy::LABEL_TYPES, pokemon.types.join(", ")]);

    if let Some(url) = &pokemon.image_url {
        table.add_row(prettytable::row![copy::LABEL_ARTWORK, url]);
    }

    table
}

/// Show a spinner whenever the loading signal is raised
///
/// The task exits once the signal's sender is gone.
pub fn spawn_spinner(mut signal: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;

        loop {
            let loading = *signal.borrow_and_update();
            match (loading, spinner.is_some()) {
                (true, false) => {
                    let bar = ProgressBar::new_spinner();
                    if let Ok(style) =
                        ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
                    {
                        bar.set_style(style);
                    }
                    bar.set_message(copy::LOADING);
                    bar.enable_steady_tick(Duration::from_millis(100));
                    spinner = Some(bar);
                }
                (false, true) => {
                    if let Some(bar) = spinner.take() {
                        bar.finish_and_clear();
                    }
                }
                _ => {}
            }

            if signal.changed().await.is_err() {
                break;
            }
        }

        if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    })
}

/// Wait for the spinner task to clear its bar
pub async fn finish_spinner(spinner: JoinHandle<()>) {
    if let Err(e) = spinner.await {
        log::debug!("Spinner task did not finish cleanly: {}", e);
    }
}
