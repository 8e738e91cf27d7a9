//! SQLite film catalogue
//!
//! Read by the home screen when the hero source is the catalogue, written by
//! the admin shell.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

use crate::models::{CatalogStats, Film, HeroItem, MediaType, NewFilm};

const FILM_COLUMNS: &str = "id, title, logo_url, synopsis, backdrop_url, poster_url, trailer_url, \
     content_type, media_type, genres, release_year, maturity_rating, match_score, \
     runtime_minutes, season_count, episode_count, is_original, is_new, is_top_ten, \
     top_ten_rank, href, slug, created_at, updated_at";

/// Listing filter for the admin shell
#[derive(Debug, Clone, Default)]
pub struct FilmFilter {
    pub media_type: Option<MediaType>,
    /// Case-insensitive title substring
    pub search: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct Catalog {
    pool: Pool<Sqlite>,
}

impl Catalog {
    pub async fn open(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true);
        // Every connection to an in-memory database is a separate database
        let max_connections = if is_memory(database_url) { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open catalogue at '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run catalogue migrations")?;

        info!(database_url, "catalogue opened");
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list(&self, filter: &FilmFilter) -> Result<Vec<Film>> {
        // Title search runs here rather than in LIKE: SQLite's lower() and
        // LIKE only fold ASCII, and `%`/`_` in user input must stay literal.
        let needle = filter
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());
        let sql_limit = match (&needle, filter.limit) {
            (None, Some(limit)) => i64::from(limit),
            _ => -1,
        };

        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films
             WHERE (?1 IS NULL OR media_type = ?1)
             ORDER BY title COLLATE NOCASE
             LIMIT ?2"
        ))
        .bind(filter.media_type.map(|m| m.as_str()))
        .bind(sql_limit)
        .fetch_all(&self.pool)
        .await
        .context("failed to list films")?;

        let mut films = rows.iter().map(film_from_row).collect::<Result<Vec<_>>>()?;
        if let Some(needle) = needle {
            films.retain(|film| film.fields.title.to_lowercase().contains(&needle));
            if let Some(limit) = filter.limit {
                films.truncate(limit as usize);
            }
        }
        Ok(films)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Film>> {
        let row = sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load film {id}"))?;
        row.as_ref().map(film_from_row).transpose()
    }

    pub async fn insert(&self, film: &NewFilm) -> Result<Film> {
        let genres = serde_json::to_string(&film.genres)?;
        let row = sqlx::query(&format!(
            "INSERT INTO films (title, logo_url, synopsis, backdrop_url, poster_url, trailer_url,
                 content_type, media_type, genres, release_year, maturity_rating, match_score,
                 runtime_minutes, season_count, episode_count, is_original, is_new, is_top_ten,
                 top_ten_rank, href, slug, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {FILM_COLUMNS}"
        ))
        .bind(&film.title)
        .bind(film.logo_url.as_deref())
        .bind(&film.synopsis)
        .bind(&film.backdrop_url)
        .bind(&film.poster_url)
        .bind(film.trailer_url.as_deref())
        .bind(film.content_type.as_str())
        .bind(film.media_type.as_str())
        .bind(genres)
        .bind(film.release_year)
        .bind(film.maturity_rating.as_deref())
        .bind(film.match_score)
        .bind(film.runtime_minutes)
        .bind(film.season_count)
        .bind(film.episode_count)
        .bind(film.is_original)
        .bind(film.is_new)
        .bind(film.is_top_ten)
        .bind(film.top_ten_rank)
        .bind(&film.href)
        .bind(&film.slug)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to insert film '{}'", film.title))?;

        let stored = film_from_row(&row)?;
        debug!(id = stored.id, title = %film.title, "film inserted");
        Ok(stored)
    }

    /// Replace every writable field. Returns `None` when no such film exists.
    pub async fn update(&self, id: i64, film: &NewFilm) -> Result<Option<Film>> {
        let genres = serde_json::to_string(&film.genres)?;
        let row = sqlx::query(&format!(
            "UPDATE films SET title = ?, logo_url = ?, synopsis = ?, backdrop_url = ?,
                 poster_url = ?, trailer_url = ?, content_type = ?, media_type = ?, genres = ?,
                 release_year = ?, maturity_rating = ?, match_score = ?, runtime_minutes = ?,
                 season_count = ?, episode_count = ?, is_original = ?, is_new = ?,
                 is_top_ten = ?, top_ten_rank = ?, href = ?, slug = ?, updated_at = ?
             WHERE id = ?
             RETURNING {FILM_COLUMNS}"
        ))
        .bind(&film.title)
        .bind(film.logo_url.as_deref())
        .bind(&film.synopsis)
        .bind(&film.backdrop_url)
        .bind(&film.poster_url)
        .bind(film.trailer_url.as_deref())
        .bind(film.content_type.as_str())
        .bind(film.media_type.as_str())
        .bind(genres)
        .bind(film.release_year)
        .bind(film.maturity_rating.as_deref())
        .bind(film.match_score)
        .bind(film.runtime_minutes)
        .bind(film.season_count)
        .bind(film.episode_count)
        .bind(film.is_original)
        .bind(film.is_new)
        .bind(film.is_top_ten)
        .bind(film.top_ten_rank)
        .bind(&film.href)
        .bind(&film.slug)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to update film {id}"))?;

        row.as_ref().map(film_from_row).transpose()
    }

    /// Insert, or update the film with the same title.
    pub async fn upsert(&self, film: &NewFilm) -> Result<Film> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM films WHERE title = ?")
            .bind(&film.title)
            .fetch_optional(&self.pool)
            .await
            .context("failed to look up film by title")?;

        match existing {
            Some(id) => self
                .update(id, film)
                .await?
                .ok_or_else(|| anyhow!("film {id} vanished during upsert")),
            None => self.insert(film).await,
        }
    }

    /// Returns whether a film was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM films WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete film {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        let row = sqlx::query(
            "SELECT
                 COALESCE(SUM(CASE WHEN media_type = 'movie' THEN 1 ELSE 0 END), 0),
                 COALESCE(SUM(CASE WHEN media_type = 'tv' THEN 1 ELSE 0 END), 0)
             FROM films",
        )
        .fetch_one(&self.pool)
        .await
        .context("failed to count films")?;

        Ok(CatalogStats {
            movies: row.try_get(0)?,
            tv_shows: row.try_get(1)?,
        })
    }

    /// Hero slides: ranked top-ten titles first, then the newest additions.
    pub async fn featured(&self, limit: u32) -> Result<Vec<HeroItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films
             ORDER BY is_top_ten DESC, COALESCE(top_ten_rank, 99), created_at DESC, id DESC
             LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("failed to load featured films")?;

        rows.iter()
            .map(|row| film_from_row(row).map(|film| film.to_hero_item()))
            .collect()
    }
}

fn film_from_row(row: &SqliteRow) -> Result<Film> {
    let content_type: String = row.try_get("content_type")?;
    let media_type: String = row.try_get("media_type")?;
    let genres: String = row.try_get("genres")?;

    Ok(Film {
        id: row.try_get("id")?,
        fields: NewFilm {
            title: row.try_get("title")?,
            logo_url: row.try_get("logo_url")?,
            synopsis: row.try_get("synopsis")?,
            backdrop_url: row.try_get("backdrop_url")?,
            poster_url: row.try_get("poster_url")?,
            trailer_url: row.try_get("trailer_url")?,
            content_type: content_type.parse().map_err(|e: String| anyhow!(e))?,
            media_type: media_type.parse().map_err(|e: String| anyhow!(e))?,
            genres: serde_json::from_str(&genres)
                .with_context(|| format!("malformed genres column: {genres}"))?,
            release_year: row.try_get("release_year")?,
            maturity_rating: row.try_get("maturity_rating")?,
            match_score: row.try_get("match_score")?,
            runtime_minutes: row.try_get("runtime_minutes")?,
            season_count: row.try_get("season_count")?,
            episode_count: row.try_get("episode_count")?,
            is_original: row.try_get("is_original")?,
            is_new: row.try_get("is_new")?,
            is_top_ten: row.try_get("is_top_ten")?,
            top_ten_rank: row.try_get("top_ten_rank")?,
            href: row.try_get("href")?,
            slug: row.try_get("slug")?,
        },
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?,
    })
}

fn is_memory(database_url: &str) -> bool {
    database_url == "sqlite::memory:" || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}
