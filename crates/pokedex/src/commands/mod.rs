use crate::api::PokemonApi;
use crate::controller::SearchController;
use crate::favorites::{FavoritesStorage, FavoritesStore};
use crate::prelude::{eprintln, println, *};
use crate::render::{format_json, format_list_text, list_entries, ListOutput};

pub mod browse;
pub mod favorites;
pub mod list;
pub mod search;
pub mod show;

/// Snapshot of the controller's filtered view with favorite markers
pub fn list_output<A: PokemonApi, S: FavoritesStorage>(
    controller: &SearchController<A>,
    store: &FavoritesStore<S>,
) -> ListOutput {
    ListOutput {
        query: controller.query(),
        items: list_entries(&controller.filtered_view(), |name| store.is_favorite(name)),
        empty: controller.is_empty(),
        offset: controller.offset(),
        has_more: controller.has_more(),
        error: controller.error(),
    }
}

pub fn print_list(heading: &str, output: &ListOutput, json: bool) -> Result<()> {
    if json {
        println!("{}", format_json(output)?);
    } else {
        print!("{}", format_list_text(heading, output));
    }
    Ok(())
}

/// Load up to `pages` pages, stopping early on error or exhaustion
pub async fn load_pages<A: PokemonApi>(
    controller: &SearchController<A>,
    pages: usize,
    global: &crate::Global,
) {
    for page in 0..pages {
        if !controller.has_more() {
            break;
        }

        if global.verbose {
            eprintln!(
                "Loading page {} (offset {})...",
                page + 1,
                controller.offset()
            );
        }

        controller.load_next_page().await;

        if controller.error().is_some() {
            break;
        }
    }
}
