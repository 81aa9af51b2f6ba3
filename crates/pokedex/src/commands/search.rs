use pokedex_core::pokemon::DEFAULT_LIMIT;
use pokedex_core::search::MatchMode;

use crate::controller::{ControllerConfig, SearchController};
use crate::prelude::*;
use crate::render::{finish_spinner, spawn_spinner};

use super::{list_output, load_pages, print_list};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Name (or part of a name) to search for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Skip the remote lookup when any loaded name contains the query
    #[arg(long)]
    pub substring: bool,

    /// Number of pages to load before searching
    #[arg(short, long, default_value = "1")]
    pub pages: usize,

    /// Number of entries per page
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_LIMIT)]
    pub page_size: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if options.page_size == 0 {
        return Err(eyre!("--page-size must be greater than zero"));
    }

    let store = global.favorites_store()?;
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

    load_pages(&controller, options.pages, &global).await;
    controller.set_query(&options.query).await;

    let output = list_output(&controller, &store);
    drop(controller);
    finish_spinner(spinner).await;

    print_list(crate::copy::HEADING_ALL, &output, options.json)
}
