//! API clients for external services
//!
//! - TMDB: movie/TV metadata, discover lists and the hero feed

pub mod tmdb;

pub use tmdb::{DiscoverKind, HeroFeed, TmdbClient, TmdbError, TmdbTitle};
