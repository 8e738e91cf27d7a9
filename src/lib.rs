//! StreamVault - streaming catalogue browser for the terminal
//!
//! A hero carousel over the featured titles and horizontally scrolling
//! content rows, fed by TMDB and a local SQLite film catalogue.
//!
//! # Modules
//!
//! - `carousel` - Hero slide state machine (auto-advance, pause, mute)
//! - `gesture` - Drag-scroll rows with drag-vs-click disambiguation
//! - `input` / `visibility` - Keyboard, swipe and on-screen pause sources
//! - `api` - TMDB client and the cached hero feed
//! - `db` - Film catalogue
//! - `ui` - TUI components
//! - `app` - Application state and navigation

pub mod api;
pub mod app;
pub mod carousel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod format;
pub mod genres;
pub mod gesture;
pub mod input;
pub mod logging;
pub mod mock;
pub mod models;
pub mod timer;
pub mod ui;
pub mod visibility;

// Re-export commonly used types
pub use models::{
    CatalogStats, ContentCardItem, ContentRef, ContentRow, ContentType, Film, HeroItem,
    MediaType, NewFilm, RowItems, RowVariant,
};

pub use api::{DiscoverKind, HeroFeed, TmdbClient, TmdbError};
pub use app::{App, AppState};
pub use carousel::{Carousel, CarouselOptions, PauseReason};
pub use config::{Config, HeroSource, Settings};
pub use db::{Catalog, FilmFilter};
pub use gesture::{ClickSuppressor, RowScroll};
