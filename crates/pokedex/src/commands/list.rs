use pokedex_core::pokemon::DEFAULT_LIMIT;

use crate::controller::{ControllerConfig, SearchController};
use crate::prelude::*;
use crate::render::{finish_spinner, spawn_spinner};

use super::{list_output, load_pages, print_list};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of pages to load
    #[arg(short, long, default_value = "1")]
    pub pages: usize,

    /// Only show entries whose name contains this text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of entries per page
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_LIMIT)]
    pub page_size: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if options.page_size == 0 {
        return Err(eyre!("--page-size must be greater than zero"));
    }

    let store = global.favorites_store()?;
    let config = ControllerConfig {
        page_size: options.page_size,
        ..Default::default()
    };
    let controller = SearchController::with_config(global.api(), config);
    let spinner = spawn_spinner(controller.loading_signal());

    load_pages(&controller, options.pages, &global).await;

    if let Some(query) = &options.query {
        controller.set_query(query).await;
    }

    let output = list_output(&controller, &store);
    drop(controller);
    finish_spinner(spinner).await;

    if output.items.is_empty() {
        if let Some(error) = &output.error {
            return Err(eyre!("Failed to load Pokémon: {}", error));
        }
    }

    print_list(crate::copy::HEADING_ALL, &output, options.json)
}
