use std::time::Duration;

use colored::Colorize;
use pokedex_core::pokemon::DEFAULT_LIMIT;
use pokedex_core::search::MatchMode;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::{ControllerConfig, SearchController};
use crate::copy;
use crate::debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
use crate::prelude::{println, *};
use crate::render::{finish_spinner, spawn_spinner};

use super::favorites::{format_favorites_text, normalize};
use super::{list_output, print_list};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BrowseOptions {
    /// Number of entries per page
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_LIMIT)]
    pub page_size: usize,

    /// Milliseconds of input inactivity before a search runs
    #[arg(long, default_value_t = DEFAULT_QUIET_PERIOD.as_millis() as u64)]
    pub quiet_ms: u64,

    /// Skip the remote lookup when any loaded name contains the query
    #[arg(long)]
    pub substring: bool,
}

/// A line typed during a browse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    More,
    Help,
    Favorites,
    ToggleFavorite(String),
    Query(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();

    match line.split_once(char::is_whitespace) {
        Some((":fav", name)) if !name.trim().is_empty() => {
            Input::ToggleFavorite(normalize(name))
        }
        _ => match line {
            ":q" | ":quit" => Input::Quit,
            ":m" | ":more" => Input::More,
            ":h" | ":help" => Input::Help,
            ":favs" | ":favorites" => Input::Favorites,
            ":clear" => Input::Query(String::new()),
            query => Input::Query(query.to_string()),
        },
    }
}

fn print_help() {
    println!(
        "\n{}\n  {}  type a name to search (runs after you stop typing)\n  {}  load the next page\n  {}  toggle a favorite\n  {}  list favorites\n  {}  clear the search\n  {}  exit\n",
        "Commands".bright_white().bold(),
        "<text>      ".cyan(),
        ":more       ".cyan(),
        ":fav <name> ".cyan(),
        ":favs       ".cyan(),
        ":clear      ".cyan(),
        ":quit       ".cyan(),
    );
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    if options.page_size == 0 {
        return Err(eyre!("--page-size must be greater than zero"));
    }

    let mut store = global.favorites_store()?;
    let config = ControllerConfig {
        page_size: options.page_size,
        match_mode: if options.substring {
            MatchMode::Substring
        } else {
            MatchMode::Exact
        },
        ..Default::default()
    };
    let controller = SearchController::with_config(global.api(), config);
    let spinner = spawn_spinner(controller.loading_signal());
    let (debouncer, mut settled) = Debouncer::new(Duration::from_millis(options.quiet_ms));

    println!("\n{}", copy::WELCOME_TITLE.bright_cyan().bold());
    println!("{}", copy::WELCOME_CAPTION.bright_black());
    print_help();

    controller.load_next_page().await;
    print_list(copy::HEADING_ALL, &list_output(&controller, &store), false)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut end_of_input = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    end_of_input = true;
                    break;
                };

                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Help => print_help(),
                    Input::More => {
                        if !controller.has_more() {
                            println!("{}", "Every Pokémon is already loaded.".yellow());
                            continue;
                        }
                        controller.load_next_page().await;
                        print_list(copy::HEADING_ALL, &list_output(&controller, &store), false)?;
                    }
                    Input::Favorites => print!("{}", format_favorites_text(&store)),
                    Input::ToggleFavorite(name) => {
                        if store.toggle_favorite(&name) {
                            println!("{} {}", "★".bright_yellow(), name);
                        } else {
                            println!("Removed {}", name);
                        }
                    }
                    Input::Query(query) => {
                        debouncer.push(query);
                    }
                }
            }
            Some(query) = settled.recv() => {
                controller.set_query(&query).await;
                print_list(copy::HEADING_ALL, &list_output(&controller, &store), false)?;
            }
        }
    }

    // Piped input ends before the last query settles; run it anyway.
    drop(debouncer);
    if end_of_input {
        while let Some(query) = settled.recv().await {
            controller.set_query(&query).await;
            print_list(copy::HEADING_ALL, &list_output(&controller, &store), false)?;
        }
    }

    drop(controller);
    finish_spinner(spinner).await;

    Ok(())
}
