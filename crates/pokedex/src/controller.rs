//! Incremental list loading with local filtering and a remote fallback
//!
//! [`SearchController`] owns the accumulated list, the current query and the
//! pagination cursor. Operations take `&self` so a page load and a search can
//! be in flight together on one task; state is only touched between awaits.
//!
//! ```text
//! load_next_page:  Idle ──► Loading ──► Idle      (re-entrant calls dropped)
//! set_query:       Idle ──► Searching ──► Idle    (stale lookups discarded)
//! ```
//!
//! Both paths share the error slot and the delayed loading indicator.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pokedex_core::pagination::PaginationCursor;
use pokedex_core::pokemon::{list_item_from_detail, PokemonListItem, DEFAULT_LIMIT};
use pokedex_core::search::{
    append_unique, filter_items, has_local_match, is_empty_result, MatchMode,
};
use tokio::sync::watch;

use crate::api::PokemonApi;
use crate::error::FetchError;
use crate::loader::{LoadingIndicator, DEFAULT_DELAY};

/// Message recorded when a fallback lookup fails for reasons other than "not found"
pub const SEARCH_ERROR: &str = "Error searching pokemon";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub page_size: usize,
    pub match_mode: MatchMode,
    pub loader_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_LIMIT,
            match_mode: MatchMode::default(),
            loader_delay: DEFAULT_DELAY,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    items: Vec<PokemonListItem>,
    query: String,
    cursor: PaginationCursor,
    error: Option<String>,
    page_loading: bool,
    // Bumped on every set_query; identifies the lookup allowed to apply its result.
    generation: u64,
    pending_lookup: Option<u64>,
}

impl State {
    // The shared indicator runs while either kind of request is in flight.
    fn is_busy(&self) -> bool {
        self.page_loading || self.pending_lookup.is_some()
    }
}

pub struct SearchController<A> {
    api: A,
    config: ControllerConfig,
    state: Mutex<State>,
    loader: LoadingIndicator,
}

impl<A: PokemonApi> SearchController<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, ControllerConfig::default())
    }

    /// A zero page size is raised to one so the cursor can still advance.
    pub fn with_config(api: A, mut config: ControllerConfig) -> Self {
        if config.page_size == 0 {
            log::warn!("Page size of 0 is not allowed, using 1");
            config.page_size = 1;
        }
        let loader = LoadingIndicator::new(config.loader_delay);
        Self {
            api,
            config,
            state: Mutex::new(State::default()),
            loader,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start or stop the indicator on idle/busy transitions
    ///
    /// Called with the state lock held so transitions apply in order.
    fn sync_loader(&self, was_busy: bool, state: &State) {
        match (was_busy, state.is_busy()) {
            (false, true) => self.loader.start(),
            (true, false) => self.loader.stop(),
            _ => {}
        }
    }

    /// Load the page at the current offset and append it
    ///
    /// Does nothing while another page is loading or once the list is
    /// exhausted. Failures land in the error slot and leave the cursor alone.
    pub async fn load_next_page(&self) {
        let offset = {
            let mut state = self.state();
            if state.page_loading {
                log::debug!("Page load already in flight, skipping");
                return;
            }
            if !state.cursor.has_more() {
                log::debug!("No more pages to load");
                return;
            }
            let was_busy = state.is_busy();
            state.page_loading = true;
            state.error = None;
            self.sync_loader(was_busy, &state);
            state.cursor.offset()
        };

        let result = self.api.fetch_list(self.config.page_size, offset).await;

        {
            let mut state = self.state();
            match result {
                Ok(page) => {
                    let received = page.len();
                    state.cursor.advance(received, self.config.page_size);
                    let appended = append_unique(&mut state.items, page);
                    log::debug!(
                        "Loaded {} entries at offset {} ({} new)",
                        received,
                        offset,
                        appended
                    );
                }
                Err(e) => {
                    log::warn!("Failed to load page at offset {}: {}", offset, e);
                    state.error = Some(e.to_string());
                }
            }
            state.page_loading = false;
            self.sync_loader(true, &state);
        }
    }

    /// Set the search query, looking the name up remotely if nothing local matches
    pub async fn set_query(&self, query: &str) {
        let generation = {
            let mut state = self.state();
            let was_busy = state.is_busy();
            state.query = query.to_string();
            state.error = None;
            state.generation += 1;
            state.pending_lookup = None;

            let local = has_local_match(&state.items, query, self.config.match_mode);
            if !query.is_empty() && !local {
                state.pending_lookup = Some(state.generation);
            }
            self.sync_loader(was_busy, &state);

            match state.pending_lookup {
                Some(generation) => generation,
                None => return,
            }
        };

        let name = query.to_lowercase();
        let result = self.api.fetch_detail(&name).await;

        {
            let mut state = self.state();
            if state.pending_lookup != Some(generation) {
                log::debug!("Discarding stale lookup for {}", name);
                return;
            }
            state.pending_lookup = None;

            match result {
                Ok(pokemon) => {
                    let entry = list_item_from_detail(self.api.base_url(), &pokemon);
                    append_unique(&mut state.items, vec![entry]);
                }
                Err(FetchError::Status(status)) => {
                    log::debug!("No pokemon named {} (HTTP {})", name, status);
                }
                Err(e) => {
                    log::warn!("Lookup for {} failed: {}", name, e);
                    state.error = Some(SEARCH_ERROR.to_string());
                }
            }
            self.sync_loader(true, &state);
        }
    }

    /// Accumulated entries matching the current query
    pub fn filtered_view(&self) -> Vec<PokemonListItem> {
        let state = self.state();
        filter_items(&state.items, &state.query)
    }

    /// True when a query is set and nothing matches it
    pub fn is_empty(&self) -> bool {
        let state = self.state();
        is_empty_result(&state.query, &filter_items(&state.items, &state.query))
    }

    pub fn items(&self) -> Vec<PokemonListItem> {
        self.state().items.clone()
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    pub fn offset(&self) -> usize {
        self.state().cursor.offset()
    }

    pub fn has_more(&self) -> bool {
        self.state().cursor.has_more()
    }

    pub fn is_page_loading(&self) -> bool {
        self.state().page_loading
    }

    /// Delayed loading flag, suitable for driving a spinner
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn loading_signal(&self) -> watch::Receiver<bool> {
        self.loader.subscribe()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pokedex_core::pokemon::{Pokemon, BASE_URL};
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    #[derive(Default)]
    struct FakeApi {
        pages: Mutex<VecDeque<Result<Vec<PokemonListItem>, FetchError>>>,
        details: HashMap<String, (Duration, Result<Pokemon, FetchError>)>,
        page_delay: Duration,
        list_calls: AtomicUsize,
        offsets: Mutex<Vec<usize>>,
        lookups: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_pages(pages: Vec<Result<Vec<PokemonListItem>, FetchError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                ..Default::default()
            }
        }

        fn page_delay(mut self, delay: Duration) -> Self {
            self.page_delay = delay;
            self
        }

        fn detail(mut self, name: &str, result: Result<Pokemon, FetchError>) -> Self {
            self.details.insert(name.to_string(), (Duration::ZERO, result));
            self
        }

        fn slow_detail(
            mut self,
            name: &str,
            delay: Duration,
            result: Result<Pokemon, FetchError>,
        ) -> Self {
            self.details.insert(name.to_string(), (delay, result));
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PokemonApi for FakeApi {
        fn base_url(&self) -> &str {
            BASE_URL
        }

        async fn fetch_list(
            &self,
            _limit: usize,
            offset: usize,
        ) -> Result<Vec<PokemonListItem>, FetchError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.offsets.lock().unwrap().push(offset);
            tokio::task::yield_now().await;
            sleep(self.page_delay).await;
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch_detail(&self, name_or_id: &str) -> Result<Pokemon, FetchError> {
            self.lookups.lock().unwrap().push(name_or_id.to_string());
            match self.details.get(name_or_id) {
                Some((delay, result)) => {
                    sleep(*delay).await;
                    result.clone()
                }
                None => Err(FetchError::Status(404)),
            }
        }
    }

    fn item(name: &str) -> PokemonListItem {
        PokemonListItem {
            name: name.to_string(),
            url: format!("{BASE_URL}/{name}"),
        }
    }

    fn batch(start: usize, len: usize) -> Vec<PokemonListItem> {
        (start..start + len)
            .map(|i| item(&format!("pokemon-{i}")))
            .collect()
    }

    fn pokemon(id: u32, name: &str) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            image_url: None,
            types: vec![],
            height: 0,
            weight: 0,
        }
    }

    async fn loaded(api: FakeApi) -> SearchController<FakeApi> {
        let controller = SearchController::new(api);
        controller.load_next_page().await;
        controller
    }

    // ============================================================================
    // load_next_page tests
    // ============================================================================

    #[tokio::test]
    async fn test_load_next_page_appends_items() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur"), item("ivysaur")])]);
        let controller = loaded(api).await;

        let items = controller.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "bulbasaur");
        assert!(!controller.is_page_loading());
    }

    #[tokio::test]
    async fn test_pages_accumulate_and_cursor_advances() {
        let api = FakeApi::with_pages(vec![
            Ok(batch(0, 20)),
            Ok(batch(20, 20)),
            Ok(batch(40, 5)),
        ]);
        let controller = SearchController::new(api);

        controller.load_next_page().await;
        assert_eq!(controller.items().len(), 20);

        controller.load_next_page().await;
        assert_eq!(controller.items().len(), 40);
        assert_eq!(controller.offset(), 40);
        assert!(controller.has_more());

        controller.load_next_page().await;
        assert_eq!(controller.items().len(), 45);
        assert_eq!(controller.offset(), 60);
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_requests_use_current_offset() {
        let api = FakeApi::with_pages(vec![Ok(batch(0, 20)), Ok(batch(20, 20))]);
        let controller = SearchController::new(api);

        controller.load_next_page().await;
        controller.load_next_page().await;

        assert_eq!(*controller.api.offsets.lock().unwrap(), vec![0, 20]);
    }

    #[tokio::test]
    async fn test_short_page_sets_has_more_false() {
        let controller = loaded(FakeApi::with_pages(vec![Ok(vec![item("test")])])).await;
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_exhausted_list_does_not_fetch_again() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("test")]), Ok(batch(0, 20))]);
        let controller = loaded(api).await;

        controller.load_next_page().await;

        assert_eq!(controller.api.list_calls.load(Ordering::SeqCst), 1);
        assert!(!controller.has_more());
        assert_eq!(controller.items().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_fetch_once() {
        let api = FakeApi::with_pages(vec![Ok(batch(0, 20)), Ok(batch(20, 20))]);
        let controller = SearchController::new(api);

        tokio::join!(controller.load_next_page(), controller.load_next_page());

        assert_eq!(controller.api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.items().len(), 20);
        assert_eq!(controller.offset(), 20);
    }

    #[tokio::test]
    async fn test_load_failure_records_error_and_keeps_cursor() {
        let api = FakeApi::with_pages(vec![Err(FetchError::Status(500))]);
        let controller = loaded(api).await;

        assert_eq!(controller.error().as_deref(), Some("HTTP error! status: 500"));
        assert_eq!(controller.offset(), 0);
        assert!(controller.has_more());
        assert!(controller.items().is_empty());
        assert!(!controller.is_page_loading());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_transport_message() {
        let api = FakeApi::with_pages(vec![Err(FetchError::Network(
            "Network error".to_string(),
        ))]);
        let controller = loaded(api).await;

        assert_eq!(controller.error().as_deref(), Some("Network error"));
    }

    #[tokio::test]
    async fn test_successful_retry_clears_error() {
        let api = FakeApi::with_pages(vec![Err(FetchError::Status(503)), Ok(batch(0, 20))]);
        let controller = loaded(api).await;
        assert!(controller.error().is_some());

        controller.load_next_page().await;

        assert!(controller.error().is_none());
        assert_eq!(controller.items().len(), 20);
        assert_eq!(controller.offset(), 20);
    }

    // ============================================================================
    // filtered_view / is_empty tests
    // ============================================================================

    #[tokio::test]
    async fn test_filtered_view_without_query_is_everything() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur"), item("charmander")])]);
        let controller = loaded(api).await;

        assert_eq!(controller.filtered_view(), controller.items());
    }

    #[tokio::test]
    async fn test_filtered_view_by_name() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur"), item("charmander")])]);
        let controller = loaded(api).await;

        controller.set_query("char").await;

        let filtered = controller.filtered_view();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "charmander");
    }

    #[tokio::test]
    async fn test_filtered_view_case_insensitive() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("Pikachu")])]);
        let controller = loaded(api).await;

        controller.set_query("PIKA").await;

        assert_eq!(controller.filtered_view().len(), 1);
    }

    #[tokio::test]
    async fn test_is_empty_for_unmatched_query() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur")])]);
        let controller = loaded(api).await;

        controller.set_query("fakemon").await;

        assert!(controller.is_empty());
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_is_not_empty_with_results() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("pikachu")])]);
        let controller = loaded(api).await;

        controller.set_query("pika").await;

        assert!(!controller.is_empty());
    }

    #[tokio::test]
    async fn test_is_not_empty_without_query() {
        let controller = SearchController::new(FakeApi::default());
        assert!(!controller.is_empty());
    }

    // ============================================================================
    // set_query tests
    // ============================================================================

    #[tokio::test]
    async fn test_set_query_updates_query() {
        let controller = SearchController::new(FakeApi::default());
        controller.set_query("pikachu").await;

        assert_eq!(controller.query(), "pikachu");
    }

    #[tokio::test]
    async fn test_empty_query_skips_lookup() {
        let controller = SearchController::new(FakeApi::default());
        controller.set_query("").await;

        assert!(controller.api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_local_match_skips_lookup() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("pikachu")])])
            .detail("pikachu", Ok(pokemon(25, "pikachu")));
        let controller = loaded(api).await;

        controller.set_query("pikachu").await;

        assert!(controller.api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_partial_match_still_looks_up() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("mewtwo")])])
            .detail("mew", Ok(pokemon(151, "mew")));
        let controller = loaded(api).await;

        controller.set_query("mew").await;

        assert_eq!(controller.api.lookups(), vec!["mew"]);
        assert_eq!(controller.items().len(), 2);
    }

    #[tokio::test]
    async fn test_substring_mode_accepts_partial_match() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("mewtwo")])]);
        let config = ControllerConfig {
            match_mode: MatchMode::Substring,
            ..Default::default()
        };
        let controller = SearchController::with_config(api, config);
        controller.load_next_page().await;

        controller.set_query("mew").await;

        assert!(controller.api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_appends_found_pokemon() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur")])])
            .detail("pikachu", Ok(pokemon(25, "pikachu")));
        let controller = loaded(api).await;

        controller.set_query("Pikachu").await;

        assert_eq!(controller.api.lookups(), vec!["pikachu"]);
        let items = controller.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "pikachu");
        assert_eq!(items[1].url, "https://pokeapi.co/api/v2/pokemon/25");
        assert_eq!(controller.filtered_view().len(), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_not_found_is_not_an_error() {
        let controller = SearchController::new(FakeApi::default());
        controller.set_query("fakemon").await;

        assert!(controller.error().is_none());
        assert!(controller.items().is_empty());
        assert!(controller.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_treated_as_miss() {
        let api = FakeApi::default().detail("pikachu", Err(FetchError::Status(500)));
        let controller = SearchController::new(api);

        controller.set_query("pikachu").await;

        assert!(controller.error().is_none());
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_sets_search_error() {
        let api = FakeApi::default()
            .detail("pikachu", Err(FetchError::Network("Network error".to_string())));
        let controller = SearchController::new(api);

        controller.set_query("pikachu").await;

        assert_eq!(controller.error().as_deref(), Some(SEARCH_ERROR));
        assert!(controller.items().is_empty());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_new_query_clears_previous_error() {
        let api = FakeApi::default()
            .detail("pikachu", Err(FetchError::Decode("bad body".to_string())));
        let controller = SearchController::new(api);

        controller.set_query("pikachu").await;
        assert!(controller.error().is_some());

        controller.set_query("").await;
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_clear_error() {
        let api = FakeApi::with_pages(vec![Err(FetchError::Status(404))]);
        let controller = loaded(api).await;

        controller.clear_error();
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_lookup_result_later_loaded_is_not_duplicated() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur"), item("pikachu")])])
            .detail("pikachu", Ok(pokemon(25, "pikachu")));
        let controller = SearchController::new(api);

        controller.set_query("pikachu").await;
        controller.load_next_page().await;

        let names: Vec<_> = controller.items().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["pikachu", "bulbasaur"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_lookup_is_discarded() {
        let api = FakeApi::default()
            .slow_detail("pikachu", Duration::from_millis(200), Ok(pokemon(25, "pikachu")))
            .slow_detail("charmander", Duration::from_millis(10), Ok(pokemon(4, "charmander")));
        let controller = SearchController::new(api);

        tokio::join!(controller.set_query("pikachu"), async {
            sleep(Duration::from_millis(50)).await;
            controller.set_query("charmander").await;
        });

        let names: Vec<_> = controller.items().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["charmander"]);
        assert_eq!(controller.query(), "charmander");
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_raises_loading_flag() {
        let api = FakeApi::default().slow_detail(
            "pikachu",
            Duration::from_millis(500),
            Ok(pokemon(25, "pikachu")),
        );
        let controller = SearchController::new(api);

        tokio::join!(controller.set_query("pikachu"), async {
            sleep(Duration::from_millis(350)).await;
            assert!(controller.is_loading());
        });

        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_lookup_never_raises_loading_flag() {
        let api = FakeApi::default().slow_detail(
            "pikachu",
            Duration::from_millis(100),
            Ok(pokemon(25, "pikachu")),
        );
        let controller = SearchController::new(api);
        let mut signal = controller.loading_signal();

        controller.set_query("pikachu").await;
        sleep(Duration::from_secs(1)).await;

        // Only the stop transition (false) may have been published.
        assert!(!*signal.borrow_and_update());
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_load_during_lookup_keeps_loading_flag() {
        let api = FakeApi::with_pages(vec![Ok(batch(0, 20))])
            .page_delay(Duration::from_millis(50))
            .slow_detail("pikachu", Duration::from_secs(2), Ok(pokemon(25, "pikachu")));
        let controller = SearchController::new(api);

        tokio::join!(controller.set_query("pikachu"), async {
            sleep(Duration::from_millis(100)).await;
            controller.load_next_page().await;
            assert!(!controller.is_page_loading());

            // The page load neither cleared nor re-armed the lookup's timer.
            sleep(Duration::from_millis(200)).await;
            assert!(controller.is_loading());

            sleep(Duration::from_millis(660)).await;
            assert!(controller.is_loading());
        });

        assert!(!controller.is_loading());
        assert_eq!(controller.items().len(), 21);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_during_page_load_keeps_loading_flag() {
        let api = FakeApi::with_pages(vec![Ok(batch(0, 20))])
            .page_delay(Duration::from_secs(1))
            .slow_detail("pikachu", Duration::from_millis(50), Ok(pokemon(25, "pikachu")));
        let controller = SearchController::new(api);

        tokio::join!(controller.load_next_page(), async {
            sleep(Duration::from_millis(100)).await;
            controller.set_query("pikachu").await;

            sleep(Duration::from_millis(300)).await;
            assert!(controller.is_loading());
        });

        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_zero_page_size_is_raised_to_one() {
        let api = FakeApi::with_pages(vec![Ok(vec![item("bulbasaur")]), Ok(vec![])]);
        let config = ControllerConfig {
            page_size: 0,
            ..Default::default()
        };
        let controller = SearchController::with_config(api, config);
        assert_eq!(controller.config().page_size, 1);

        controller.load_next_page().await;
        assert_eq!(controller.offset(), 1);
        assert!(controller.has_more());

        controller.load_next_page().await;
        assert_eq!(controller.offset(), 2);
        assert!(!controller.has_more());
    }
}
