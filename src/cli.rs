//! CLI - Command Line Interface for StreamVault
//!
//! Running without a subcommand launches the TUI. Subcommands expose the
//! metadata feed and the catalogue admin for scripting; every command can
//! answer with a JSON envelope.
//!
//! # Examples
//!
//! ```bash
//! # Hero slides from TMDB or the catalogue
//! streamvault hero --source catalog --json
//!
//! # Discover lists and explicit titles
//! streamvault discover documentary
//! streamvault items movie:603 tv:1399
//!
//! # Catalogue admin
//! streamvault admin list --type tv --search crown
//! streamvault admin add --title "Ocean Beneath" --type movie --year 2024
//! streamvault admin import --kind trending --limit 10
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::DiscoverKind;
use crate::config::HeroSource;
use crate::models::{ContentRef, ContentType, MediaType, NewFilm};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Film or title not found
    NotFound = 4,
    /// Catalogue database unavailable
    DatabaseError = 5,
    /// No TMDB API key configured
    MissingApiKey = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// StreamVault - streaming catalogue browser for the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "streamvault",
    version,
    about = "Streaming catalogue browser for the terminal",
    long_about = "Browse a hero carousel and content rows fed by TMDB and a \
                  local film catalogue.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  streamvault                              Launch interactive TUI\n\
                  streamvault hero --json                  Print the hero feed\n\
                  streamvault items movie:603              Resolve explicit titles\n\
                  streamvault admin import --limit 5       Import trending titles"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the hero carousel feed
    Hero(HeroCmd),

    /// Print a curated discover list
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// Resolve explicit TMDB identifiers to display items
    #[command(visible_alias = "i")]
    Items(ItemsCmd),

    /// Manage the local film catalogue
    Admin(AdminCmd),
}

// =============================================================================
// Feed Commands
// =============================================================================

/// Hero slide source override
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// TMDB discover lists
    Tmdb,
    /// Featured catalogue films
    Catalog,
    /// Built-in sample slides
    Sample,
}

impl From<SourceArg> for HeroSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Tmdb => HeroSource::Tmdb,
            SourceArg::Catalog => HeroSource::Catalog,
            SourceArg::Sample => HeroSource::Sample,
        }
    }
}

/// Print the hero carousel feed
#[derive(Args, Debug)]
pub struct HeroCmd {
    /// Slide source (defaults to the configured one)
    #[arg(long, short = 's', value_enum)]
    pub source: Option<SourceArg>,
}

/// Curated discover list
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListArg {
    Movie,
    Tv,
    Kids,
    Documentary,
}

impl From<ListArg> for DiscoverKind {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Movie => DiscoverKind::Movie,
            ListArg::Tv => DiscoverKind::Tv,
            ListArg::Kids => DiscoverKind::Kids,
            ListArg::Documentary => DiscoverKind::Documentary,
        }
    }
}

/// Print the first titles of a discover list
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Which list to fetch
    #[arg(value_enum)]
    pub kind: ListArg,
}

/// Resolve titles by identifier
#[derive(Args, Debug)]
pub struct ItemsCmd {
    /// Identifiers written `movie:<id>` or `tv:<id>`
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<ContentRef>,
}

// =============================================================================
// Admin Commands
// =============================================================================

/// Catalogue administration
#[derive(Args, Debug)]
pub struct AdminCmd {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Movie and TV show counts
    Stats,

    /// List catalogue films
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Add a film
    Add(AddCmd),

    /// Update fields of a film
    Update(UpdateCmd),

    /// Remove a film
    #[command(visible_alias = "rm")]
    Remove(RemoveCmd),

    /// Import titles from TMDB into the catalogue
    Import(ImportCmd),
}

/// Media type filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
}

impl From<MediaTypeFilter> for MediaType {
    fn from(filter: MediaTypeFilter) -> Self {
        match filter {
            MediaTypeFilter::Movie => MediaType::Movie,
            MediaTypeFilter::Tv => MediaType::Tv,
        }
    }
}

/// Editorial content type
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypeArg {
    Movie,
    #[value(alias = "series")]
    Tv,
    Kids,
    Documentary,
    Special,
}

impl From<ContentTypeArg> for ContentType {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Movie => ContentType::Movie,
            ContentTypeArg::Tv => ContentType::Tv,
            ContentTypeArg::Kids => ContentType::Kids,
            ContentTypeArg::Documentary => ContentType::Documentary,
            ContentTypeArg::Special => ContentType::Special,
        }
    }
}

/// List catalogue films, newest first
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Filter by media type
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,

    /// Case-insensitive title search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

/// Optional film fields shared by `add` and `update`
#[derive(Args, Debug, Default, Clone)]
pub struct FilmFields {
    /// Editorial content type (defaults from the media type)
    #[arg(long, value_enum)]
    pub content_type: Option<ContentTypeArg>,

    /// Release year
    #[arg(long, short = 'y')]
    pub year: Option<i32>,

    #[arg(long)]
    pub synopsis: Option<String>,

    /// Comma-separated genre names
    #[arg(long, value_delimiter = ',')]
    pub genres: Option<Vec<String>>,

    /// Maturity rating, e.g. PG-13 or TV-MA
    #[arg(long)]
    pub rating: Option<String>,

    /// Match score percentage
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    pub match_score: Option<i32>,

    /// Runtime in minutes
    #[arg(long)]
    pub runtime: Option<i32>,

    #[arg(long)]
    pub seasons: Option<i32>,

    #[arg(long)]
    pub episodes: Option<i32>,

    #[arg(long)]
    pub backdrop_url: Option<String>,

    #[arg(long)]
    pub poster_url: Option<String>,

    #[arg(long)]
    pub logo_url: Option<String>,

    #[arg(long)]
    pub trailer_url: Option<String>,

    /// Mark as an original production
    #[arg(long)]
    pub original: Option<bool>,

    /// Mark as newly added
    #[arg(long)]
    pub new: Option<bool>,

    /// Top 10 rank; 0 removes the film from the Top 10
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=10))]
    pub top_ten: Option<i32>,
}

impl FilmFields {
    /// Write every provided field into `film`
    pub fn apply(&self, film: &mut NewFilm) {
        if let Some(content_type) = self.content_type {
            film.content_type = content_type.into();
        }
        if let Some(year) = self.year {
            film.release_year = year;
        }
        if let Some(ref synopsis) = self.synopsis {
            film.synopsis = synopsis.clone();
        }
        if let Some(ref genres) = self.genres {
            film.genres = genres
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect();
        }
        if let Some(ref rating) = self.rating {
            film.maturity_rating = Some(rating.clone()).filter(|r| !r.is_empty());
        }
        if self.match_score.is_some() {
            film.match_score = self.match_score;
        }
        if self.runtime.is_some() {
            film.runtime_minutes = self.runtime;
        }
        if self.seasons.is_some() {
            film.season_count = self.seasons;
        }
        if self.episodes.is_some() {
            film.episode_count = self.episodes;
        }
        if let Some(ref url) = self.backdrop_url {
            film.backdrop_url = url.clone();
        }
        if let Some(ref url) = self.poster_url {
            film.poster_url = url.clone();
        }
        if let Some(ref url) = self.logo_url {
            film.logo_url = Some(url.clone()).filter(|u| !u.is_empty());
        }
        if let Some(ref url) = self.trailer_url {
            film.trailer_url = Some(url.clone()).filter(|u| !u.is_empty());
        }
        if let Some(original) = self.original {
            film.is_original = original;
        }
        if let Some(new) = self.new {
            film.is_new = new;
        }
        match self.top_ten {
            Some(0) => {
                film.is_top_ten = false;
                film.top_ten_rank = None;
            }
            Some(rank) => {
                film.is_top_ten = true;
                film.top_ten_rank = Some(rank);
            }
            None => {}
        }
    }
}

/// Add a film to the catalogue
#[derive(Args, Debug)]
pub struct AddCmd {
    #[arg(long, required = true)]
    pub title: String,

    #[arg(long = "type", short = 't', value_enum, required = true)]
    pub media_type: MediaTypeFilter,

    #[command(flatten)]
    pub fields: FilmFields,
}

impl AddCmd {
    pub fn to_new_film(&self) -> NewFilm {
        let mut film = NewFilm::new(self.title.trim(), self.media_type.into());
        self.fields.apply(&mut film);
        film
    }
}

/// Update fields of an existing film
#[derive(Args, Debug)]
pub struct UpdateCmd {
    /// Catalogue id
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,

    #[command(flatten)]
    pub fields: FilmFields,
}

impl UpdateCmd {
    /// Apply the requested changes; links follow title and type changes.
    pub fn apply(&self, film: &mut NewFilm) {
        let mut relink = false;
        if let Some(ref title) = self.title {
            film.title = title.trim().to_string();
            relink = true;
        }
        if let Some(media_type) = self.media_type {
            film.media_type = media_type.into();
            relink = true;
        }
        self.fields.apply(film);
        if relink {
            film.relink();
        }
    }
}

/// Remove a film from the catalogue
#[derive(Args, Debug)]
pub struct RemoveCmd {
    /// Catalogue id
    pub id: i64,
}

/// Where imported titles come from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportKind {
    /// Trending this week
    #[default]
    Trending,
    Movie,
    Tv,
    Kids,
    Documentary,
}

impl ImportKind {
    /// Discover list behind this kind, if any
    pub fn discover_kind(&self) -> Option<DiscoverKind> {
        match self {
            ImportKind::Trending => None,
            ImportKind::Movie => Some(DiscoverKind::Movie),
            ImportKind::Tv => Some(DiscoverKind::Tv),
            ImportKind::Kids => Some(DiscoverKind::Kids),
            ImportKind::Documentary => Some(DiscoverKind::Documentary),
        }
    }
}

/// Import TMDB titles into the catalogue
#[derive(Args, Debug)]
pub struct ImportCmd {
    /// Source list (ignored when --query is given)
    #[arg(long, short = 'k', value_enum, default_value = "trending")]
    pub kind: ImportKind,

    /// Search TMDB by title instead of using a list
    #[arg(long)]
    pub query: Option<String>,

    /// Maximum number of titles to import
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Result of `admin remove`
#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedFilm {
    pub id: i64,
    pub removed: bool,
}

/// Result of `admin import`
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub films: Vec<crate::models::Film>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print the JSON envelope, or `human(&data)` on a terminal
    pub fn print_or<T: Serialize>(
        &self,
        data: T,
        human: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", human(&data));
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["streamvault", "hero", "--json", "-q", "-c", "/tmp/sv.toml"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sv.toml")));
    }

    #[test]
    fn test_items_parses_refs() {
        let cli = Cli::parse_from(["streamvault", "items", "movie:603", "tv:1399"]);
        if let Some(Command::Items(cmd)) = cli.command {
            assert_eq!(cmd.ids.len(), 2);
            assert_eq!(cmd.ids[0].media_type, MediaType::Movie);
            assert_eq!(cmd.ids[1].id, 1399);
        } else {
            panic!("Expected Items command");
        }
    }

    #[test]
    fn test_items_rejects_bad_ref() {
        assert!(Cli::try_parse_from(["streamvault", "items", "person:1"]).is_err());
        assert!(Cli::try_parse_from(["streamvault", "items"]).is_err());
    }

    #[test]
    fn test_update_relinks_on_rename() {
        let cli = Cli::parse_from([
            "streamvault",
            "admin",
            "update",
            "7",
            "--title",
            "Deep Blue",
            "--top-ten",
            "0",
        ]);
        let Some(Command::Admin(AdminCmd {
            command: AdminCommand::Update(cmd),
        })) = cli.command
        else {
            panic!("Expected admin update");
        };

        let mut film = NewFilm::new("Ocean Beneath", MediaType::Movie);
        film.is_top_ten = true;
        film.top_ten_rank = Some(3);
        cmd.apply(&mut film);

        assert_eq!(film.title, "Deep Blue");
        assert_eq!(film.slug, "deep-blue");
        assert_eq!(film.href, "/movie/deep-blue");
        assert!(!film.is_top_ten);
        assert_eq!(film.top_ten_rank, None);
    }

    #[test]
    fn test_top_ten_rank_is_bounded() {
        assert!(Cli::try_parse_from([
            "streamvault",
            "admin",
            "add",
            "--title",
            "X",
            "--type",
            "movie",
            "--top-ten",
            "11",
        ])
        .is_err());
    }

    #[test]
    fn test_import_defaults_to_trending() {
        let cli = Cli::parse_from(["streamvault", "admin", "import"]);
        let Some(Command::Admin(AdminCmd {
            command: AdminCommand::Import(cmd),
        })) = cli.command
        else {
            panic!("Expected admin import");
        };
        assert_eq!(cmd.kind, ImportKind::Trending);
        assert_eq!(cmd.kind.discover_kind(), None);
        assert_eq!(cmd.limit, 10);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
        assert_eq!(i32::from(ExitCode::DatabaseError), 5);
        assert_eq!(i32::from(ExitCode::MissingApiKey), 6);
    }
}
