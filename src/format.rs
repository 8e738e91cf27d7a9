//! Display formatting helpers
//!
//! Runtime/year conversion, maturity-rating normalisation and the short meta
//! lines shown under hero titles and on cards.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ContentCardItem, ContentType, HeroItem};

/// `65` → `"1hr 5mins"`, `130` → `"2hrs 10mins"`, `45` → `"45 mins"`
pub fn convert_minutes(runtime_minutes: u32) -> String {
    let hours = runtime_minutes / 60;
    let minutes = runtime_minutes % 60;
    match hours {
        0 => format!("{} mins", minutes),
        1 => format!("{}hr {}mins", hours, minutes),
        _ => format!("{}hrs {}mins", hours, minutes),
    }
}

/// Year of a `YYYY-MM-DD` date, 0 when unparseable.
pub fn convert_year(date: &str) -> u16 {
    date.split('-')
        .next()
        .and_then(|year| year.trim().parse().ok())
        .unwrap_or(0)
}

/// Compact runtime used on cards and in the hero: `"2h 22m"` / `"48m"`
pub fn short_runtime(runtime_minutes: u32) -> String {
    let hours = runtime_minutes / 60;
    let minutes = runtime_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn season_text(season_count: u32, episode_count: Option<u32>) -> String {
    if season_count == 1 {
        format!("{} Episodes", episode_count.unwrap_or(0))
    } else {
        format!("{} Seasons", season_count)
    }
}

/// Meta line parts under the hero title: year, runtime or season count.
pub fn meta_items(item: &HeroItem) -> Vec<String> {
    let mut parts = Vec::new();

    if item.release_year > 0 {
        parts.push(item.release_year.to_string());
    }

    match item.content_type {
        ContentType::Movie => {
            if let Some(runtime) = item.runtime_minutes.filter(|m| *m > 0) {
                parts.push(short_runtime(runtime));
            }
        }
        ContentType::Tv => {
            if let Some(seasons) = item.season_count.filter(|s| *s > 0) {
                parts.push(season_text(seasons, item.episode_count));
            }
        }
        _ => {}
    }

    parts
}

/// Single meta text on a card; falls back to the release year.
pub fn card_meta(card: &ContentCardItem) -> String {
    match card.content_type {
        ContentType::Movie => {
            if let Some(runtime) = card.runtime_minutes.filter(|m| *m > 0) {
                return short_runtime(runtime);
            }
        }
        ContentType::Tv => {
            if let Some(seasons) = card.season_count.filter(|s| *s > 0) {
                return season_text(seasons, card.episode_count);
            }
        }
        _ => {}
    }
    card.release_year.to_string()
}

/// Canonical spelling of a certification (`PG13` → `PG-13`).
pub fn normalize_rating(rating: &str) -> String {
    if rating.is_empty() {
        return String::new();
    }

    rating
        .replacen('_', "-", 1)
        .replacen("PG13", "PG-13", 1)
        .replacen("TVMA", "TV-MA", 1)
        .replacen("TV14", "TV-14", 1)
        .replacen("TVPG", "TV-PG", 1)
        .replacen("TVG", "TV-G", 1)
        .trim()
        .to_string()
}

/// First non-empty rating for a preferred country, in preference order,
/// then the first non-empty rating of any country.
pub fn find_country_rating<'a>(
    results: &[(&'a str, &'a str)],
    preferred_countries: &[&str],
) -> &'a str {
    preferred_countries
        .iter()
        .find_map(|country| {
            results
                .iter()
                .find(|(c, rating)| c == country && !rating.is_empty())
                .map(|(_, rating)| *rating)
        })
        .or_else(|| {
            results
                .iter()
                .find(|(_, rating)| !rating.is_empty())
                .map(|(_, rating)| *rating)
        })
        .unwrap_or("")
}

fn non_alnum() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").ok()).as_ref()
}

/// URL slug: lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let dashed = match non_alnum() {
        Some(re) => re.replace_all(&lower, "-").into_owned(),
        None => lower.replace(' ', "-"),
    };
    dashed.trim_matches('-').to_string()
}

/// Truncate to `max` chars, appending an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let cut: String = s.chars().take(max - 3).collect();
    format!("{}...", cut.trim_end())
}
