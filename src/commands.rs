//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the backend services. Each handler
//! takes CLI args and Output, returns ExitCode. [`Services`] is shared with
//! the TUI loop, which hands it the [`Action`]s queued by the app.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

use crate::api::{HeroFeed, TmdbClient, TmdbError, TmdbTitle};
use crate::app::{Action, AppEvent};
use crate::cli::{
    AdminCommand, AddCmd, DiscoverCmd, ExitCode, HeroCmd, ImportCmd, ImportSummary, ItemsCmd,
    ListCmd, Output, RemoveCmd, RemovedFilm, UpdateCmd,
};
use crate::config::{HeroSource, Settings};
use crate::db::{Catalog, FilmFilter};
use crate::mock;
use crate::models::{CatalogStats, ContentRow, Film, HeroItem};

/// Slides taken from the catalogue when it feeds the hero
pub const FEATURED_LIMIT: u32 = 5;

// =============================================================================
// Services
// =============================================================================

/// Backends opened on first use
pub struct Services {
    settings: Settings,
    tmdb: Option<TmdbClient>,
    hero_feed: Option<Mutex<HeroFeed>>,
    catalog: OnceCell<Catalog>,
}

impl Services {
    pub fn new(settings: Settings) -> Self {
        let tmdb = settings.tmdb_api_key.clone().map(TmdbClient::new);
        Self::with_tmdb(settings, tmdb)
    }

    /// Use an explicit client (tests point it at a mock server)
    pub fn with_tmdb(settings: Settings, tmdb: Option<TmdbClient>) -> Self {
        let hero_feed = tmdb.clone().map(|client| Mutex::new(HeroFeed::new(client)));
        Self {
            settings,
            tmdb,
            hero_feed,
            catalog: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tmdb(&self) -> Result<&TmdbClient> {
        self.tmdb
            .as_ref()
            .ok_or_else(|| anyhow!("TMDB API key not configured (set TMDB_API_KEY)"))
    }

    pub async fn catalog(&self) -> Result<&Catalog> {
        self.catalog
            .get_or_try_init(|| Catalog::open(&self.settings.database_url))
            .await
    }

    /// Hero slides from `source`.
    ///
    /// TMDB failures surface as an empty list so the hero keeps its skeleton.
    pub async fn hero_items(&self, source: HeroSource) -> Result<Vec<HeroItem>> {
        match source {
            HeroSource::Tmdb => {
                let feed = self
                    .hero_feed
                    .as_ref()
                    .ok_or_else(|| anyhow!("TMDB API key not configured (set TMDB_API_KEY)"))?;
                Ok(feed.lock().await.hero_films().await)
            }
            HeroSource::Catalog => self.catalog().await?.featured(FEATURED_LIMIT).await,
            HeroSource::Sample => Ok(mock::sample_hero_items()),
        }
    }

    pub fn home_rows(&self) -> Vec<ContentRow> {
        mock::home_rows(Utc::now())
    }

    pub async fn admin_snapshot(&self) -> Result<(Vec<Film>, CatalogStats)> {
        let catalog = self.catalog().await?;
        let films = catalog.list(&FilmFilter::default()).await?;
        let stats = catalog.stats().await?;
        Ok((films, stats))
    }

    /// Run one queued UI action and report its outcome(s).
    pub async fn perform(&self, action: Action) -> Vec<AppEvent> {
        match action {
            Action::LoadHome => {
                let hero = match self.hero_items(self.settings.hero_source).await {
                    Ok(items) => AppEvent::HeroLoaded(items),
                    Err(e) => {
                        warn!(error = %e, "hero load failed");
                        AppEvent::Failed(format!("Hero unavailable: {}", e))
                    }
                };
                vec![hero, AppEvent::RowsLoaded(self.home_rows())]
            }
            Action::LoadAdmin => match self.admin_snapshot().await {
                Ok((films, stats)) => vec![AppEvent::AdminLoaded { films, stats }],
                Err(e) => vec![AppEvent::Failed(format!("Catalogue unavailable: {:#}", e))],
            },
            Action::DeleteFilm(id) => {
                let deleted = match self.catalog().await {
                    Ok(catalog) => catalog.delete(id).await,
                    Err(e) => Err(e),
                };
                match deleted {
                    Ok(true) => vec![AppEvent::FilmDeleted(id)],
                    Ok(false) => vec![AppEvent::Failed(format!("Film #{} not found", id))],
                    Err(e) => vec![AppEvent::Failed(format!("Delete failed: {:#}", e))],
                }
            }
        }
    }
}

/// Exit code for a failed TMDB call
fn tmdb_exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<TmdbError>() {
        Some(TmdbError::NotFound) => ExitCode::NotFound,
        Some(TmdbError::Unauthorized) => ExitCode::MissingApiKey,
        _ => ExitCode::NetworkError,
    }
}

fn print_or_fail<T: serde::Serialize>(
    output: &Output,
    data: T,
    human: impl FnOnce(&T) -> String,
) -> ExitCode {
    match output.print_or(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn hero_lines(items: &[HeroItem]) -> String {
    if items.is_empty() {
        return "No titles".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{:>2}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_lines(titles: &[TmdbTitle]) -> String {
    if titles.is_empty() {
        return "No titles".to_string();
    }
    titles
        .iter()
        .map(|t| format!("{:<12} {}", t.content.to_string(), t.item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn film_lines(films: &[Film]) -> String {
    if films.is_empty() {
        return "No films in the catalogue".to_string();
    }
    films
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Hero / Discover / Items
// =============================================================================

pub async fn hero_cmd(cmd: HeroCmd, services: &Services, output: &Output) -> ExitCode {
    let source = cmd
        .source
        .map(HeroSource::from)
        .unwrap_or(services.settings().hero_source);
    output.info(format!("Loading hero feed from {}...", source));

    match services.hero_items(source).await {
        Ok(items) => print_or_fail(output, items, |items| hero_lines(items)),
        Err(e) => {
            let code = if source == HeroSource::Tmdb {
                ExitCode::MissingApiKey
            } else {
                ExitCode::DatabaseError
            };
            output.error(format!("Hero feed failed: {:#}", e), code)
        }
    }
}

pub async fn discover_cmd(cmd: DiscoverCmd, services: &Services, output: &Output) -> ExitCode {
    let client = match services.tmdb() {
        Ok(client) => client,
        Err(e) => return output.error(e.to_string(), ExitCode::MissingApiKey),
    };
    let kind = cmd.kind.into();
    output.info(format!("Fetching {} list...", kind));

    match client.discover(kind).await {
        Ok(titles) => {
            let human = title_lines(&titles);
            print_or_fail(output, items_of(titles), |_| human)
        }
        Err(e) => {
            let code = tmdb_exit_code(&e);
            output.error(format!("Discover failed: {}", e), code)
        }
    }
}

pub async fn items_cmd(cmd: ItemsCmd, services: &Services, output: &Output) -> ExitCode {
    let client = match services.tmdb() {
        Ok(client) => client,
        Err(e) => return output.error(e.to_string(), ExitCode::MissingApiKey),
    };

    match client.items(&cmd.ids).await {
        Ok(titles) if titles.is_empty() => {
            output.error("None of the identifiers resolved", ExitCode::NotFound)
        }
        Ok(titles) => {
            let human = title_lines(&titles);
            print_or_fail(output, items_of(titles), |_| human)
        }
        Err(e) => {
            let code = tmdb_exit_code(&e);
            output.error(format!("Lookup failed: {}", e), code)
        }
    }
}

fn items_of(titles: Vec<TmdbTitle>) -> Vec<HeroItem> {
    titles.into_iter().map(|t| t.item).collect()
}

// =============================================================================
// Admin
// =============================================================================

pub async fn admin_cmd(cmd: AdminCommand, services: &Services, output: &Output) -> ExitCode {
    let catalog = match services.catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            return output.error(
                format!("Catalogue unavailable: {:#}", e),
                ExitCode::DatabaseError,
            )
        }
    };

    match cmd {
        AdminCommand::Stats => stats_cmd(catalog, output).await,
        AdminCommand::List(cmd) => list_cmd(cmd, catalog, output).await,
        AdminCommand::Add(cmd) => add_cmd(cmd, catalog, output).await,
        AdminCommand::Update(cmd) => update_cmd(cmd, catalog, output).await,
        AdminCommand::Remove(cmd) => remove_cmd(cmd, catalog, output).await,
        AdminCommand::Import(cmd) => import_cmd(cmd, services, catalog, output).await,
    }
}

async fn stats_cmd(catalog: &Catalog, output: &Output) -> ExitCode {
    match catalog.stats().await {
        Ok(stats) => print_or_fail(output, stats, |s| {
            format!("Movies:   {}\nTV Shows: {}", s.movies, s.tv_shows)
        }),
        Err(e) => output.error(format!("Stats failed: {:#}", e), ExitCode::DatabaseError),
    }
}

async fn list_cmd(cmd: ListCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    let filter = FilmFilter {
        media_type: cmd.media_type.map(Into::into),
        search: cmd.search,
        limit: cmd.limit,
    };
    match catalog.list(&filter).await {
        Ok(films) => print_or_fail(output, films, |films| film_lines(films)),
        Err(e) => output.error(format!("List failed: {:#}", e), ExitCode::DatabaseError),
    }
}

async fn add_cmd(cmd: AddCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    if cmd.title.trim().is_empty() {
        return output.error("Title must not be empty", ExitCode::InvalidArgs);
    }
    match catalog.insert(&cmd.to_new_film()).await {
        Ok(film) => {
            info!(id = film.id, title = %film.fields.title, "film added");
            print_or_fail(output, film, |f| format!("Added {}", f))
        }
        Err(e) => output.error(format!("Add failed: {:#}", e), ExitCode::DatabaseError),
    }
}

async fn update_cmd(cmd: UpdateCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    if cmd.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return output.error("Title must not be empty", ExitCode::InvalidArgs);
    }

    let result = async {
        let Some(existing) = catalog.get(cmd.id).await? else {
            return Ok(None);
        };
        let mut fields = existing.fields;
        cmd.apply(&mut fields);
        catalog.update(cmd.id, &fields).await
    }
    .await;

    match result {
        Ok(Some(film)) => {
            info!(id = film.id, "film updated");
            print_or_fail(output, film, |f| format!("Updated {}", f))
        }
        Ok(None) => output.error(format!("Film #{} not found", cmd.id), ExitCode::NotFound),
        Err(e) => output.error(format!("Update failed: {:#}", e), ExitCode::DatabaseError),
    }
}

async fn remove_cmd(cmd: RemoveCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    match catalog.delete(cmd.id).await {
        Ok(true) => {
            info!(id = cmd.id, "film removed");
            print_or_fail(
                output,
                RemovedFilm {
                    id: cmd.id,
                    removed: true,
                },
                |r| format!("Removed film #{}", r.id),
            )
        }
        Ok(false) => output.error(format!("Film #{} not found", cmd.id), ExitCode::NotFound),
        Err(e) => output.error(format!("Remove failed: {:#}", e), ExitCode::DatabaseError),
    }
}

async fn import_cmd(
    cmd: ImportCmd,
    services: &Services,
    catalog: &Catalog,
    output: &Output,
) -> ExitCode {
    let client = match services.tmdb() {
        Ok(client) => client,
        Err(e) => return output.error(e.to_string(), ExitCode::MissingApiKey),
    };

    let fetched = match (&cmd.query, cmd.kind.discover_kind()) {
        (Some(query), _) => {
            output.info(format!("Searching TMDB for: {}", query));
            client.search(query, cmd.limit).await
        }
        (None, Some(kind)) => {
            output.info(format!("Fetching {} list...", kind));
            client
                .discover(kind)
                .await
                .map(|titles| titles.into_iter().take(cmd.limit).collect())
        }
        (None, None) => {
            output.info("Fetching trending titles...");
            client.trending(cmd.limit).await
        }
    };
    let titles = match fetched {
        Ok(titles) => titles,
        Err(e) => {
            let code = tmdb_exit_code(&e);
            return output.error(format!("Import failed: {}", e), code);
        }
    };

    let mut films = Vec::with_capacity(titles.len());
    for title in &titles {
        let record = title.to_new_film();
        match catalog
            .upsert(&record)
            .await
            .with_context(|| format!("failed to store {}", record.title))
        {
            Ok(film) => films.push(film),
            Err(e) => return output.error(format!("{:#}", e), ExitCode::DatabaseError),
        }
    }
    info!(count = films.len(), "titles imported");

    let summary = ImportSummary {
        imported: films.len(),
        films,
    };
    print_or_fail(output, summary, |s| {
        format!("Imported {} title(s)\n{}", s.imported, film_lines(&s.films))
    })
}
