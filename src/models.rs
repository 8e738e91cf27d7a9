//! Data structures and types for StreamVault
//!
//! Shared models used across the application, organized by domain:
//! - **Content**: content/media type discriminators and identifiers
//! - **Hero**: slides shown by the hero carousel
//! - **Rows**: cards shown in horizontally scrolling rows
//! - **Catalogue**: film records persisted by the admin shell

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Content Types
// =============================================================================

/// Editorial content type of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    #[serde(alias = "series")]
    Tv,
    Kids,
    Documentary,
    Special,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
            ContentType::Kids => "kids",
            ContentType::Documentary => "documentary",
            ContentType::Special => "special",
        }
    }

    /// Label shown next to the title in the hero
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Tv => "Series",
            ContentType::Documentary => "Documentary",
            ContentType::Special => "Special",
            ContentType::Movie | ContentType::Kids => "Film",
        }
    }

    /// Whether the title is episodic (rendered with a TV glyph)
    pub fn is_episodic(&self) -> bool {
        matches!(self, ContentType::Tv | ContentType::Documentary)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "tv" | "series" => Ok(ContentType::Tv),
            "kids" => Ok(ContentType::Kids),
            "documentary" => Ok(ContentType::Documentary),
            "special" => Ok(ContentType::Special),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

/// Media type as understood by the metadata provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

/// Identifier of a title at the metadata provider, written `movie:603`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub media_type: MediaType,
    pub id: u64,
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.media_type.as_str(), self.id)
    }
}

impl FromStr for ContentRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <movie|tv>:<id>, got {}", s))?;
        let media_type = kind.parse()?;
        let id = id
            .parse()
            .map_err(|_| format!("invalid numeric id: {}", id))?;
        Ok(ContentRef { media_type, id })
    }
}

// =============================================================================
// Hero Models
// =============================================================================

/// One slide of the hero carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroItem {
    pub id: String,
    pub title: String,
    /// Transparent title treatment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub synopsis: String,
    pub backdrop_url: String,
    /// Background trailer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    pub content_type: ContentType,
    pub genres: Vec<String>,
    /// 0 when unknown
    pub release_year: u16,
    #[serde(default)]
    pub maturity_rating: String,
    /// 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub is_original: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_top_ten: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_ten_rank: Option<u8>,
    /// Link to the detail page
    pub href: String,
}

impl fmt::Display for HeroItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.release_year > 0 {
            write!(f, "{} ({}) [{}]", self.title, self.release_year, self.content_type.label())
        } else {
            write!(f, "{} [{}]", self.title, self.content_type.label())
        }
    }
}

// =============================================================================
// Row Models
// =============================================================================

/// A card in a content row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCardItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content_type: ContentType,
    /// 2:3 portrait artwork
    pub poster_url: String,
    /// 16:9 landscape artwork
    pub backdrop_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_preview_url: Option<String>,
    pub genres: Vec<String>,
    pub release_year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub is_original: bool,
    #[serde(default)]
    pub is_new: bool,
    pub href: String,
}

/// A card with viewing progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingItem {
    #[serde(flatten)]
    pub card: ContentCardItem,
    /// 0-100
    pub progress_percent: u8,
    pub last_watched_at: DateTime<Utc>,
    /// e.g. "S2:E5 — The Reckoning"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_minutes: Option<u32>,
}

/// A ranked card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTenItem {
    #[serde(flatten)]
    pub card: ContentCardItem,
    /// 1-10
    pub rank: u8,
}

/// Card layout of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowVariant {
    /// Standard 2:3 cards
    Poster,
    /// 16:9 landscape cards
    Backdrop,
    /// Landscape + progress bar
    ContinueWatching,
    /// Big rank number + poster
    TopTen,
}

/// Items of a row; the variant follows from the item shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RowItems {
    Poster(Vec<ContentCardItem>),
    Backdrop(Vec<ContentCardItem>),
    ContinueWatching(Vec<ContinueWatchingItem>),
    TopTen(Vec<TopTenItem>),
}

impl RowItems {
    pub fn variant(&self) -> RowVariant {
        match self {
            RowItems::Poster(_) => RowVariant::Poster,
            RowItems::Backdrop(_) => RowVariant::Backdrop,
            RowItems::ContinueWatching(_) => RowVariant::ContinueWatching,
            RowItems::TopTen(_) => RowVariant::TopTen,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RowItems::Poster(items) | RowItems::Backdrop(items) => items.len(),
            RowItems::ContinueWatching(items) => items.len(),
            RowItems::TopTen(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Card at `index`, whatever the row shape
    pub fn card(&self, index: usize) -> Option<&ContentCardItem> {
        match self {
            RowItems::Poster(items) | RowItems::Backdrop(items) => items.get(index),
            RowItems::ContinueWatching(items) => items.get(index).map(|i| &i.card),
            RowItems::TopTen(items) => items.get(index).map(|i| &i.card),
        }
    }
}

/// A titled, horizontally scrolling row
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRow {
    pub title: String,
    pub subtitle: Option<String>,
    pub see_all_href: Option<String>,
    pub items: RowItems,
}

impl ContentRow {
    pub fn new(title: impl Into<String>, items: RowItems) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            see_all_href: None,
            items,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn see_all(mut self, href: impl Into<String>) -> Self {
        self.see_all_href = Some(href.into());
        self
    }

    pub fn variant(&self) -> RowVariant {
        self.items.variant()
    }
}

// =============================================================================
// Catalogue Models
// =============================================================================

/// A film record stored in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewFilm,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable fields of a film record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFilm {
    pub title: String,
    pub logo_url: Option<String>,
    pub synopsis: String,
    pub backdrop_url: String,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub content_type: ContentType,
    pub media_type: MediaType,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub maturity_rating: Option<String>,
    pub match_score: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub season_count: Option<i32>,
    pub episode_count: Option<i32>,
    pub is_original: bool,
    pub is_new: bool,
    pub is_top_ten: bool,
    pub top_ten_rank: Option<i32>,
    pub href: String,
    pub slug: String,
}

impl NewFilm {
    /// Minimal record; links are derived from the title.
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        let mut film = Self {
            title: title.into(),
            logo_url: None,
            synopsis: String::new(),
            backdrop_url: String::new(),
            poster_url: String::new(),
            trailer_url: None,
            content_type: match media_type {
                MediaType::Movie => ContentType::Movie,
                MediaType::Tv => ContentType::Tv,
            },
            media_type,
            genres: Vec::new(),
            release_year: 0,
            maturity_rating: None,
            match_score: None,
            runtime_minutes: None,
            season_count: None,
            episode_count: None,
            is_original: false,
            is_new: false,
            is_top_ten: false,
            top_ten_rank: None,
            href: String::new(),
            slug: String::new(),
        };
        film.relink();
        film
    }

    /// Recompute `slug` and `href` from the title and media type.
    pub fn relink(&mut self) {
        self.slug = crate::format::slugify(&self.title);
        self.href = format!("/{}/{}", self.media_type.as_str(), self.slug);
    }

    /// Record built from a metadata provider display item.
    pub fn from_hero(item: &HeroItem, media_type: MediaType, poster_url: String) -> Self {
        let mut film = NewFilm::new(item.title.clone(), media_type);
        film.logo_url = item.logo_url.clone();
        film.synopsis = item.synopsis.clone();
        film.backdrop_url = item.backdrop_url.clone();
        film.poster_url = poster_url;
        film.trailer_url = item.trailer_url.clone();
        film.content_type = item.content_type;
        film.genres = item.genres.clone();
        film.release_year = i32::from(item.release_year);
        film.maturity_rating = Some(item.maturity_rating.clone()).filter(|r| !r.is_empty());
        film.match_score = item.match_score.map(i32::from);
        film.runtime_minutes = item.runtime_minutes.and_then(|v| i32::try_from(v).ok());
        film.season_count = item.season_count.and_then(|v| i32::try_from(v).ok());
        film.episode_count = item.episode_count.and_then(|v| i32::try_from(v).ok());
        film.is_original = item.is_original;
        film.is_new = item.is_new;
        film.is_top_ten = item.is_top_ten;
        film.top_ten_rank = item.top_ten_rank.map(i32::from);
        film
    }
}

impl Film {
    /// Display item for the hero carousel
    pub fn to_hero_item(&self) -> HeroItem {
        let f = &self.fields;
        HeroItem {
            id: self.id.to_string(),
            title: f.title.clone(),
            logo_url: f.logo_url.clone(),
            synopsis: f.synopsis.clone(),
            backdrop_url: f.backdrop_url.clone(),
            trailer_url: f.trailer_url.clone(),
            content_type: f.content_type,
            genres: f.genres.clone(),
            release_year: u16::try_from(f.release_year).unwrap_or(0),
            maturity_rating: f.maturity_rating.clone().unwrap_or_default(),
            match_score: f.match_score.and_then(|v| u8::try_from(v).ok()),
            runtime_minutes: f.runtime_minutes.and_then(|v| u32::try_from(v).ok()),
            season_count: f.season_count.and_then(|v| u32::try_from(v).ok()),
            episode_count: f.episode_count.and_then(|v| u32::try_from(v).ok()),
            is_original: f.is_original,
            is_new: f.is_new,
            is_top_ten: f.is_top_ten,
            top_ten_rank: f.top_ten_rank.and_then(|v| u8::try_from(v).ok()),
            href: f.href.clone(),
        }
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}) [{}]",
            self.id, self.fields.title, self.fields.release_year, self.fields.media_type
        )
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub movies: i64,
    pub tv_shows: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parse() {
        assert_eq!("series".parse::<ContentType>(), Ok(ContentType::Tv));
        assert_eq!("Movie".parse::<ContentType>(), Ok(ContentType::Movie));
        assert!("anime".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_content_type_serde_alias() {
        let t: ContentType = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(t, ContentType::Tv);
        assert_eq!(serde_json::to_string(&ContentType::Tv).unwrap(), "\"tv\"");
    }

    #[test]
    fn test_content_type_label() {
        assert_eq!(ContentType::Tv.label(), "Series");
        assert_eq!(ContentType::Documentary.label(), "Documentary");
        assert_eq!(ContentType::Special.label(), "Special");
        assert_eq!(ContentType::Movie.label(), "Film");
        assert_eq!(ContentType::Kids.label(), "Film");
    }

    #[test]
    fn test_content_ref_parse() {
        let r: ContentRef = "movie:603".parse().unwrap();
        assert_eq!(r.media_type, MediaType::Movie);
        assert_eq!(r.id, 603);
        assert_eq!(r.to_string(), "movie:603");

        assert!("603".parse::<ContentRef>().is_err());
        assert!("book:1".parse::<ContentRef>().is_err());
        assert!("tv:abc".parse::<ContentRef>().is_err());
    }

    #[test]
    fn test_new_film_derives_links() {
        let film = NewFilm::new("The Last Frontier", MediaType::Movie);
        assert_eq!(film.slug, "the-last-frontier");
        assert_eq!(film.href, "/movie/the-last-frontier");
        assert_eq!(film.content_type, ContentType::Movie);
    }

    #[test]
    fn test_row_items_variant() {
        let row = ContentRow::new("Top 10", RowItems::TopTen(Vec::new()));
        assert_eq!(row.variant(), RowVariant::TopTen);
        assert!(row.items.is_empty());
        assert!(row.items.card(0).is_none());
    }

    #[test]
    fn test_hero_item_display() {
        let item = HeroItem {
            id: "1".into(),
            title: "Neon Ronin".into(),
            logo_url: None,
            synopsis: String::new(),
            backdrop_url: String::new(),
            trailer_url: None,
            content_type: ContentType::Movie,
            genres: vec![],
            release_year: 2025,
            maturity_rating: "R".into(),
            match_score: None,
            runtime_minutes: None,
            season_count: None,
            episode_count: None,
            is_original: false,
            is_new: false,
            is_top_ten: false,
            top_ten_rank: None,
            href: "/movie/neon-ronin".into(),
        };
        assert_eq!(item.to_string(), "Neon Ronin (2025) [Film]");
    }
}
