//! Core library for pokedex
//!
//! This crate implements the **Functional Core** of the pokedex application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`pokedex_core`** (this crate): wire types, domain types and pure transformations
//! - **`pokedex`**: HTTP, timers, persistence and the terminal front-end (the Imperative Shell)
//!
//! Nothing in here performs I/O. Every function can be tested with fixture
//! data and no mocking.
//!
//! # Module Organization
//!
//! - [`pokemon`]: PokeAPI wire types, the domain `Pokemon`, URL building and mapping
//! - [`search`]: query matching, filtering and the local-match check
//! - [`pagination`]: the offset/limit cursor with its one-way `has_more` flag
//! - [`favorites`]: the insertion-ordered favorite set and its stored document
//!
//! # Example Usage
//!
//! ```rust
//! use pokedex_core::pokemon::PokemonListItem;
//! use pokedex_core::search::filter_items;
//!
//! let items = vec![PokemonListItem {
//!     name: "Pikachu".to_string(),
//!     url: "https://pokeapi.co/api/v2/pokemon/25".to_string(),
//! }];
//!
//! let filtered = filter_items(&items, "PIKA");
//! assert_eq!(filtered.len(), 1);
//! ```

pub mod favorites;
pub mod pagination;
pub mod pokemon;
pub mod search;
