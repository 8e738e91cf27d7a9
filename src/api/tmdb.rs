//! TMDB (The Movie Database) API client
//!
//! Discover lists, per-title details and the memoised hero feed.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use futures::future::join_all;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::format::{convert_year, find_country_rating, normalize_rating};
use crate::genres::{self, genre_names};
use crate::models::{ContentRef, ContentType, HeroItem, MediaType, NewFilm};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Results kept from each discover list
pub const DISCOVER_LIMIT: usize = 5;

/// Lifetime of the memoised hero feed
pub const HERO_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Widest logo considered before falling back to any English logo
const MAX_LOGO_WIDTH: u32 = 1000;

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("Unauthorized (401): check the TMDB API key")]
    Unauthorized,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

// =============================================================================
// Image URLs
// =============================================================================

/// Portrait artwork, `w342`
pub fn poster_url(path: &str) -> String {
    format!("{}/w342{}", IMAGE_BASE_URL, path)
}

/// Portrait thumbnail, `w185`
pub fn small_poster_url(path: &str) -> String {
    format!("{}/w185{}", IMAGE_BASE_URL, path)
}

/// Landscape artwork, `w1280` unless a width is given
pub fn backdrop_url(path: &str, width: Option<&str>) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, width.unwrap_or("w1280"), path)
}

/// Title treatment, `w500`
pub fn logo_url(path: &str) -> String {
    format!("{}/w500{}", IMAGE_BASE_URL, path)
}

// =============================================================================
// Discover Lists
// =============================================================================

/// Curated discover lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoverKind {
    Movie,
    Tv,
    Kids,
    Documentary,
}

impl DiscoverKind {
    pub const ALL: [DiscoverKind; 4] = [
        DiscoverKind::Movie,
        DiscoverKind::Tv,
        DiscoverKind::Kids,
        DiscoverKind::Documentary,
    ];

    /// Endpoint family the list is served from
    pub fn media_type(&self) -> MediaType {
        match self {
            DiscoverKind::Tv => MediaType::Tv,
            _ => MediaType::Movie,
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            DiscoverKind::Movie => ContentType::Movie,
            DiscoverKind::Tv => ContentType::Tv,
            DiscoverKind::Kids => ContentType::Kids,
            DiscoverKind::Documentary => ContentType::Documentary,
        }
    }

    /// Discover endpoint with filters; release windows roll with `today`.
    pub fn endpoint(&self, today: NaiveDate) -> String {
        const COMMON: &str = "include_adult=false&include_video=false&language=en-US\
                              &sort_by=popularity.desc";
        const EXCLUDE_ANIMATION_NEWS_TALK: &str = "without_genres=16%2C10763%2C10767";

        match self {
            DiscoverKind::Movie => {
                let since = today.checked_sub_days(Days::new(365)).unwrap_or(today);
                format!(
                    "/discover/movie?{}&watch_region=US&vote_average.gte=6\
                     &with_origin_country=US&with_original_language=en\
                     &primary_release_date.gte={}&vote_count.gte=400&{}&page=1",
                    COMMON,
                    since.format("%Y-%m-%d"),
                    EXCLUDE_ANIMATION_NEWS_TALK
                )
            }
            DiscoverKind::Tv => {
                let since = today.checked_sub_days(Days::new(3 * 365)).unwrap_or(today);
                format!(
                    "/discover/tv?{}&watch_region=US&first_air_date.gte={}\
                     &with_original_language=en&vote_count.gte=400&{}&page=1",
                    COMMON,
                    since.format("%Y-%m-%d"),
                    EXCLUDE_ANIMATION_NEWS_TALK
                )
            }
            DiscoverKind::Kids => format!(
                "/discover/movie?{}&region=US&with_genres=16%2C10751\
                 &with_original_language=en\
                 &without_genres=10749%2C27%2C36%2C80%2C99%2C53%2C37&page=1",
                COMMON
            ),
            DiscoverKind::Documentary => format!(
                "/discover/movie?{}&with_genres={}&with_original_language=en\
                 &vote_count.gte=50&page=1",
                COMMON,
                genres::DOCUMENTARY
            ),
        }
    }
}

impl fmt::Display for DiscoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscoverKind::Movie => "movie",
            DiscoverKind::Tv => "tv",
            DiscoverKind::Kids => "kids",
            DiscoverKind::Documentary => "documentary",
        })
    }
}

impl FromStr for DiscoverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(DiscoverKind::Movie),
            "tv" | "series" => Ok(DiscoverKind::Tv),
            "kids" => Ok(DiscoverKind::Kids),
            "documentary" | "documentaries" => Ok(DiscoverKind::Documentary),
            other => Err(format!(
                "unknown list '{}', expected movie, tv, kids or documentary",
                other
            )),
        }
    }
}

// =============================================================================
// Display Items
// =============================================================================

/// Fields only the per-title detail call provides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraDetails {
    pub logo_url: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub season_count: Option<u32>,
    pub episode_count: Option<u32>,
    pub maturity_rating: String,
    pub trailer_url: Option<String>,
}

/// A title resolved from TMDB
#[derive(Debug, Clone, PartialEq)]
pub struct TmdbTitle {
    pub content: ContentRef,
    pub poster_url: Option<String>,
    pub item: HeroItem,
}

impl TmdbTitle {
    /// Catalogue record for the admin import
    pub fn to_new_film(&self) -> NewFilm {
        NewFilm::from_hero(
            &self.item,
            self.content.media_type,
            self.poster_url.clone().unwrap_or_default(),
        )
    }
}

// =============================================================================
// Client
// =============================================================================

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// v4 read tokens go in the Authorization header, v3 keys in the query.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.api_key.starts_with("eyJ") {
            request.bearer_auth(&self.api_key)
        } else {
            request.query(&[("api_key", self.api_key.as_str())])
        }
    }

    /// Make an authenticated GET request. Rate limiting is reported, not retried.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "tmdb request");
        let response = self
            .authorize(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(TmdbError::from)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(TmdbError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound.into()),
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized.into()),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(endpoint, "tmdb rate limited");
                Err(TmdbError::RateLimited.into())
            }
            status => Err(TmdbError::ServerError(status.as_u16()).into()),
        }
    }

    /// First few titles of a discover list, each enriched with its details.
    pub async fn discover(&self, kind: DiscoverKind) -> Result<Vec<TmdbTitle>> {
        let today = Utc::now().date_naive();
        let response: ListResponse = self.get(&kind.endpoint(today)).await?;

        let media_type = kind.media_type();
        let titles = response
            .results
            .into_iter()
            .take(DISCOVER_LIMIT)
            .map(|raw| raw.into_title(media_type, kind.content_type()))
            .collect();

        let titles = self.enrich_all(titles).await;
        info!(%kind, count = titles.len(), "discover list loaded");
        Ok(titles)
    }

    /// Trending movies and shows this week, enriched with details.
    pub async fn trending(&self, limit: usize) -> Result<Vec<TmdbTitle>> {
        let response: ListResponse = self.get("/trending/all/week").await?;
        let titles = response.into_mixed_titles(limit);
        Ok(self.enrich_all(titles).await)
    }

    /// Multi search by title; people are dropped.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<TmdbTitle>> {
        let endpoint = format!(
            "/search/multi?query={}&page=1",
            urlencoding::encode(query)
        );
        let response: ListResponse = self.get(&endpoint).await?;
        let titles = response.into_mixed_titles(limit);
        Ok(self.enrich_all(titles).await)
    }

    /// Resolve explicit identifiers. Unknown ids are skipped with a warning.
    pub async fn items(&self, ids: &[ContentRef]) -> Result<Vec<TmdbTitle>> {
        let lookups = ids.iter().map(|content| async move {
            let detail: DetailResponse = self.get(&detail_endpoint(content)).await?;
            Ok::<_, anyhow::Error>(detail.into_title(*content))
        });

        let mut titles = Vec::with_capacity(ids.len());
        for (content, result) in ids.iter().zip(join_all(lookups).await) {
            match result {
                Ok(title) => titles.push(title),
                Err(e) if is_not_found(&e) => warn!(%content, "title not found, skipping"),
                Err(e) => return Err(e),
            }
        }
        Ok(titles)
    }

    /// Runtime, counts, certification, logo and trailer of one title
    pub async fn extra_details(&self, content: ContentRef) -> Result<ExtraDetails> {
        let detail: DetailResponse = self.get(&detail_endpoint(&content)).await?;
        Ok(detail.extras(content.media_type))
    }

    /// Apply detail-call extras; a failed lookup keeps the list item as is.
    async fn enrich_all(&self, titles: Vec<TmdbTitle>) -> Vec<TmdbTitle> {
        let extras = join_all(titles.iter().map(|t| self.extra_details(t.content))).await;

        titles
            .into_iter()
            .zip(extras)
            .map(|(mut title, extra)| {
                match extra {
                    Ok(extra) => apply_extras(&mut title.item, extra),
                    Err(e) => warn!(content = %title.content, error = %e, "extra details unavailable"),
                }
                title
            })
            .collect()
    }
}

fn detail_endpoint(content: &ContentRef) -> String {
    format!(
        "/{}/{}?append_to_response=videos,images,content_ratings,release_dates",
        content.media_type.as_str(),
        content.id
    )
}

fn is_not_found(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<TmdbError>(), Some(TmdbError::NotFound))
}

fn apply_extras(item: &mut HeroItem, extra: ExtraDetails) {
    item.logo_url = extra.logo_url;
    item.runtime_minutes = extra.runtime_minutes;
    item.season_count = extra.season_count;
    item.episode_count = extra.episode_count;
    item.maturity_rating = extra.maturity_rating;
    item.trailer_url = extra.trailer_url;
}

// =============================================================================
// Hero Feed
// =============================================================================

/// Movies then shows for the hero carousel, memoised in a single entry.
pub struct HeroFeed {
    client: TmdbClient,
    ttl: Duration,
    cached: Option<(Instant, Vec<HeroItem>)>,
}

impl HeroFeed {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            ttl: HERO_CACHE_TTL,
            cached: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cached entry if still fresh at `now`
    pub fn cached_at(&self, now: Instant) -> Option<&[HeroItem]> {
        self.cached
            .as_ref()
            .filter(|(stored_at, _)| now.saturating_duration_since(*stored_at) < self.ttl)
            .map(|(_, items)| items.as_slice())
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub async fn hero_films(&mut self) -> Vec<HeroItem> {
        self.hero_films_at(Instant::now()).await
    }

    /// Upstream failures are logged and read as an empty list; a partial or
    /// empty result is not cached.
    pub async fn hero_films_at(&mut self, now: Instant) -> Vec<HeroItem> {
        if let Some(items) = self.cached_at(now) {
            debug!(count = items.len(), "hero feed served from cache");
            return items.to_vec();
        }

        let (movies, series) = tokio::join!(
            self.client.discover(DiscoverKind::Movie),
            self.client.discover(DiscoverKind::Tv)
        );

        let mut complete = true;
        let mut items = Vec::new();
        for (kind, result) in [(DiscoverKind::Movie, movies), (DiscoverKind::Tv, series)] {
            match result {
                Ok(titles) => items.extend(titles.into_iter().map(|t| t.item)),
                Err(e) => {
                    complete = false;
                    warn!(%kind, error = %e, "hero feed list failed");
                }
            }
        }

        if complete && !items.is_empty() {
            self.cached = Some((now, items.clone()));
        }
        items
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<ListItemRaw>,
}

impl ListResponse {
    /// Trending and multi-search mix media types; people are dropped
    fn into_mixed_titles(self, limit: usize) -> Vec<TmdbTitle> {
        self.results
            .into_iter()
            .filter_map(|raw| {
                let media_type = raw.media_type.as_deref()?.parse::<MediaType>().ok()?;
                let content_type = match media_type {
                    MediaType::Movie => ContentType::Movie,
                    MediaType::Tv => ContentType::Tv,
                };
                Some(raw.into_title(media_type, content_type))
            })
            .take(limit)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ListItemRaw {
    id: u64,
    // Only present on trending and multi search
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

impl ListItemRaw {
    fn into_title(self, media_type: MediaType, content_type: ContentType) -> TmdbTitle {
        let content = ContentRef {
            media_type,
            id: self.id,
        };
        let release_year = self
            .release_date
            .or(self.first_air_date)
            .map(|d| convert_year(&d))
            .unwrap_or(0);

        TmdbTitle {
            content,
            poster_url: self.poster_path.as_deref().map(poster_url),
            item: HeroItem {
                id: self.id.to_string(),
                title: self.title.or(self.name).unwrap_or_default(),
                logo_url: None,
                synopsis: self.overview.unwrap_or_default(),
                backdrop_url: self
                    .backdrop_path
                    .as_deref()
                    .map(|p| backdrop_url(p, None))
                    .unwrap_or_default(),
                trailer_url: None,
                content_type,
                genres: genre_names(&self.genre_ids),
                release_year,
                maturity_rating: String::new(),
                match_score: match_score(self.vote_average),
                runtime_minutes: None,
                season_count: None,
                episode_count: None,
                is_original: false,
                is_new: false,
                is_top_ten: false,
                top_ten_rank: None,
                href: format!("/{}/{}", media_type.as_str(), self.id),
            },
        }
    }
}

/// Vote average (0-10) as a percentage match
fn match_score(vote_average: Option<f32>) -> Option<u8> {
    vote_average
        .filter(|v| *v > 0.0)
        .map(|v| (v * 10.0).round().clamp(0.0, 100.0) as u8)
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    runtime: Option<u32>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    release_dates: Option<ReleaseDatesRaw>,
    content_ratings: Option<ContentRatingsRaw>,
    images: Option<ImagesRaw>,
    videos: Option<VideosRaw>,
}

impl DetailResponse {
    fn extras(&self, media_type: MediaType) -> ExtraDetails {
        let mut extra = ExtraDetails {
            logo_url: self.images.as_ref().and_then(|i| i.english_logo()).map(logo_url),
            trailer_url: self.videos.as_ref().and_then(|v| v.youtube_trailer()),
            ..ExtraDetails::default()
        };

        match media_type {
            MediaType::Movie => {
                extra.runtime_minutes = self.runtime.filter(|r| *r > 0);
                let certification = self
                    .release_dates
                    .as_ref()
                    .map(|r| r.certification())
                    .unwrap_or("");
                extra.maturity_rating = normalize_rating(certification);
            }
            MediaType::Tv => {
                extra.season_count = self.number_of_seasons;
                extra.episode_count = self.number_of_episodes;
                let ratings: Vec<(&str, &str)> = self
                    .content_ratings
                    .as_ref()
                    .map(|c| {
                        c.results
                            .iter()
                            .map(|r| (r.iso_3166_1.as_str(), r.rating.as_str()))
                            .collect()
                    })
                    .unwrap_or_default();
                extra.maturity_rating =
                    normalize_rating(find_country_rating(&ratings, &["US", "GB"]));
            }
        }

        extra
    }

    fn into_title(self, content: ContentRef) -> TmdbTitle {
        let extra = self.extras(content.media_type);
        let content_type = match content.media_type {
            MediaType::Movie => ContentType::Movie,
            MediaType::Tv => ContentType::Tv,
        };
        let genres: Vec<String> = self.genres.into_iter().map(|g| g.name).collect();

        let list_item = ListItemRaw {
            id: self.id,
            media_type: None,
            title: self.title,
            name: self.name,
            release_date: self.release_date,
            first_air_date: self.first_air_date,
            overview: self.overview,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            genre_ids: Vec::new(),
        };

        let mut title = list_item.into_title(content.media_type, content_type);
        title.item.genres = genres;
        apply_extras(&mut title.item, extra);
        title
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseDatesRaw {
    #[serde(default)]
    results: Vec<ReleaseCountryRaw>,
}

#[derive(Debug, Deserialize)]
struct ReleaseCountryRaw {
    iso_3166_1: String,
    #[serde(default)]
    release_dates: Vec<ReleaseDateRaw>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDateRaw {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    certification: String,
}

/// Theatrical release
const RELEASE_TYPE_THEATRICAL: u8 = 3;

impl ReleaseDatesRaw {
    /// US theatrical certification, then any US one, then any at all.
    fn certification(&self) -> &str {
        let us = self.results.iter().find(|r| r.iso_3166_1 == "US");
        let us_theatrical = us.and_then(|r| {
            r.release_dates
                .iter()
                .find(|d| d.kind == RELEASE_TYPE_THEATRICAL && !d.certification.is_empty())
        });
        let us_any = us.and_then(|r| r.release_dates.iter().find(|d| !d.certification.is_empty()));
        let anywhere = || {
            self.results
                .iter()
                .flat_map(|r| r.release_dates.iter())
                .find(|d| !d.certification.is_empty())
        };

        us_theatrical
            .or(us_any)
            .or_else(anywhere)
            .map(|d| d.certification.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct ContentRatingsRaw {
    #[serde(default)]
    results: Vec<ContentRatingRaw>,
}

#[derive(Debug, Deserialize)]
struct ContentRatingRaw {
    iso_3166_1: String,
    #[serde(default)]
    rating: String,
}

#[derive(Debug, Deserialize)]
struct ImagesRaw {
    #[serde(default)]
    logos: Vec<LogoRaw>,
}

#[derive(Debug, Deserialize)]
struct LogoRaw {
    file_path: String,
    iso_639_1: Option<String>,
    width: u32,
}

impl ImagesRaw {
    /// Narrowest English logo within the width cap, else the narrowest one.
    fn english_logo(&self) -> Option<&str> {
        let mut english: Vec<&LogoRaw> = self
            .logos
            .iter()
            .filter(|l| l.iso_639_1.as_deref() == Some("en"))
            .collect();
        english.sort_by_key(|l| l.width);

        english
            .iter()
            .copied()
            .find(|l| l.width <= MAX_LOGO_WIDTH)
            .or_else(|| english.first().copied())
            .map(|l| l.file_path.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct VideosRaw {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    site: String,
    #[serde(rename = "type")]
    kind: String,
}

impl VideosRaw {
    fn youtube_trailer(&self) -> Option<String> {
        let youtube = || self.results.iter().filter(|v| v.site == "YouTube");
        youtube()
            .find(|v| v.kind == "Trailer")
            .or_else(|| youtube().next())
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_urls() {
        assert_eq!(poster_url("/a.jpg"), "https://image.tmdb.org/t/p/w342/a.jpg");
        assert_eq!(small_poster_url("/a.jpg"), "https://image.tmdb.org/t/p/w185/a.jpg");
        assert_eq!(backdrop_url("/b.jpg", None), "https://image.tmdb.org/t/p/w1280/b.jpg");
        assert_eq!(
            backdrop_url("/b.jpg", Some("original")),
            "https://image.tmdb.org/t/p/original/b.jpg"
        );
        assert_eq!(logo_url("/l.png"), "https://image.tmdb.org/t/p/w500/l.png");
    }

    #[test]
    fn test_discover_kind_parse() {
        assert_eq!("movie".parse::<DiscoverKind>(), Ok(DiscoverKind::Movie));
        assert_eq!("series".parse::<DiscoverKind>(), Ok(DiscoverKind::Tv));
        assert_eq!("Documentary".parse::<DiscoverKind>(), Ok(DiscoverKind::Documentary));
        assert!("anime".parse::<DiscoverKind>().is_err());
    }

    #[test]
    fn test_discover_endpoints() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        let movie = DiscoverKind::Movie.endpoint(today);
        assert!(movie.starts_with("/discover/movie?"));
        assert!(movie.contains("primary_release_date.gte=2025-06-01"));

        let tv = DiscoverKind::Tv.endpoint(today);
        assert!(tv.starts_with("/discover/tv?"));
        assert!(tv.contains("first_air_date.gte=2023-06-02"));

        assert!(DiscoverKind::Kids.endpoint(today).contains("with_genres=16%2C10751"));
        assert!(DiscoverKind::Documentary.endpoint(today).contains("with_genres=99"));
        assert_eq!(DiscoverKind::Documentary.media_type(), MediaType::Movie);
    }

    #[test]
    fn test_certification_preference() {
        let raw: ReleaseDatesRaw = serde_json::from_str(
            r#"{"results": [
                {"iso_3166_1": "DE", "release_dates": [{"type": 3, "certification": "12"}]},
                {"iso_3166_1": "US", "release_dates": [
                    {"type": 1, "certification": "NR"},
                    {"type": 3, "certification": "PG-13"}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(raw.certification(), "PG-13");

        let raw: ReleaseDatesRaw = serde_json::from_str(
            r#"{"results": [
                {"iso_3166_1": "DE", "release_dates": [{"type": 3, "certification": "12"}]},
                {"iso_3166_1": "US", "release_dates": [{"type": 4, "certification": "R"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(raw.certification(), "R");

        let raw: ReleaseDatesRaw = serde_json::from_str(
            r#"{"results": [
                {"iso_3166_1": "US", "release_dates": [{"type": 3, "certification": ""}]},
                {"iso_3166_1": "DE", "release_dates": [{"type": 3, "certification": "12"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(raw.certification(), "12");
    }

    #[test]
    fn test_english_logo_selection() {
        let images: ImagesRaw = serde_json::from_str(
            r#"{"logos": [
                {"file_path": "/fr.png", "iso_639_1": "fr", "width": 300},
                {"file_path": "/wide.png", "iso_639_1": "en", "width": 2000},
                {"file_path": "/mid.png", "iso_639_1": "en", "width": 800},
                {"file_path": "/small.png", "iso_639_1": "en", "width": 400}
            ]}"#,
        )
        .unwrap();
        assert_eq!(images.english_logo(), Some("/small.png"));

        let images: ImagesRaw = serde_json::from_str(
            r#"{"logos": [{"file_path": "/huge.png", "iso_639_1": "en", "width": 3000}]}"#,
        )
        .unwrap();
        assert_eq!(images.english_logo(), Some("/huge.png"));

        let images: ImagesRaw = serde_json::from_str(
            r#"{"logos": [{"file_path": "/x.png", "iso_639_1": null, "width": 300}]}"#,
        )
        .unwrap();
        assert_eq!(images.english_logo(), None);
    }

    #[test]
    fn test_youtube_trailer() {
        let videos: VideosRaw = serde_json::from_str(
            r#"{"results": [
                {"key": "vim1", "site": "Vimeo", "type": "Trailer"},
                {"key": "tease", "site": "YouTube", "type": "Teaser"},
                {"key": "trail", "site": "YouTube", "type": "Trailer"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            videos.youtube_trailer().as_deref(),
            Some("https://www.youtube.com/watch?v=trail")
        );

        let videos: VideosRaw = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(videos.youtube_trailer(), None);
    }

    #[test]
    fn test_match_score() {
        assert_eq!(match_score(Some(7.84)), Some(78));
        assert_eq!(match_score(Some(0.0)), None);
        assert_eq!(match_score(None), None);
    }

    #[test]
    fn test_hero_feed_cache_expiry() {
        let mut feed = HeroFeed::new(TmdbClient::new("key"));
        let t0 = Instant::now();
        assert!(feed.cached_at(t0).is_none());

        feed.cached = Some((t0, Vec::new()));
        assert!(feed.cached_at(t0 + Duration::from_secs(299)).is_some());
        assert!(feed.cached_at(t0 + HERO_CACHE_TTL).is_none());

        feed.invalidate();
        assert!(feed.cached_at(t0).is_none());
    }
}
