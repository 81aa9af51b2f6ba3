//! User-facing text

pub const WELCOME_TITLE: &str = "Welcome to Pokédex";
pub const WELCOME_CAPTION: &str = "The digital encyclopedia created by Professor Oak is an invaluable tool to Trainers in the Pokémon world.";

pub const EMPTY_TITLE: &str = "Uh-oh!";
pub const EMPTY_CAPTION: &str = "You look lost on your journey!";

pub const LABEL_NAME: &str = "Name";
pub const LABEL_WEIGHT: &str = "Weight";
pub const LABEL_HEIGHT: &str = "Height";
pub const LABEL_TYPES: &str = "Types";
pub const LABEL_ARTWORK: &str = "Artwork";

pub const HEADING_ALL: &str = "All";
pub const HEADING_FAVORITES: &str = "Favorites";

pub const SEARCH_PROMPT: &str = "Search";
pub const LOADING: &str = "Loading...";
