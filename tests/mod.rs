//! Integration tests for StreamVault
//!
//! Tests are organized by component:
//! - carousel_test: hero carousel timing, keyboard, swipe and visibility
//! - row_scroll_test: content row drag-scroll and click suppression
//! - tmdb_test: TMDB client and hero feed cache (mock HTTP server)
//! - catalog_test: SQLite catalogue
//! - cli_test: argument parsing, field editing, JSON output
//! - ui_test: full-screen rendering on a test backend

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
