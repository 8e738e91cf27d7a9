//! Built-in sample content
//!
//! Placeholder hero slides and home rows used when no catalogue or metadata
//! provider is configured. Everything here is deterministic.

use chrono::{DateTime, Utc};

use crate::models::{
    ContentCardItem, ContentRow, ContentType, ContinueWatchingItem, HeroItem, RowItems,
    TopTenItem,
};

/// `count` placeholder cards whose ids, slugs and links derive from `prefix`.
pub fn make_mock_cards(count: usize, prefix: &str) -> Vec<ContentCardItem> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            let episodic = i % 3 == 0;
            let kind = if episodic { "tv" } else { "movie" };
            ContentCardItem {
                id: format!("{}-{}", prefix, n),
                title: format!("{} Title {}", prefix, n),
                slug: format!("{}-title-{}", prefix, n),
                content_type: if episodic { ContentType::Tv } else { ContentType::Movie },
                poster_url: format!("/images/mock/poster-{}.jpg", (i % 10) + 1),
                backdrop_url: format!("/images/mock/backdrop-{}.jpg", (i % 10) + 1),
                logo_url: None,
                trailer_preview_url: None,
                genres: ["Action", "Drama", "Thriller"][..(i % 3) + 1]
                    .iter()
                    .map(|g| g.to_string())
                    .collect(),
                release_year: 2024 + (i % 2) as u16,
                maturity_rating: Some(if i % 2 == 0 { "PG-13" } else { "TV-MA" }.to_string()),
                match_score: Some(70 + ((i * 7) % 25) as u8),
                runtime_minutes: (!episodic).then(|| 90 + i as u32 * 5),
                season_count: episodic.then(|| 1 + (i % 4) as u32),
                episode_count: episodic.then(|| 8 + i as u32),
                is_original: i % 5 == 0,
                is_new: i % 4 == 0,
                href: format!("/{}/{}-title-{}", kind, prefix, n),
            }
        })
        .collect()
}

fn first_card(prefix: &str) -> ContentCardItem {
    make_mock_cards(1, prefix).remove(0)
}

fn continue_watching(now: DateTime<Utc>) -> Vec<ContinueWatchingItem> {
    let mut second = first_card("cw2");
    second.id = "cw-2".into();
    second.title = "Ocean Beneath".into();

    let mut third = first_card("cw3");
    third.id = "cw-3".into();
    third.title = "Neon Ronin".into();
    third.content_type = ContentType::Movie;

    vec![
        ContinueWatchingItem {
            card: first_card("cw"),
            progress_percent: 65,
            last_watched_at: now,
            episode_title: Some("S2:E5 — The Reckoning".into()),
            remaining_minutes: Some(22),
        },
        ContinueWatchingItem {
            card: second,
            progress_percent: 30,
            last_watched_at: now,
            episode_title: Some("S1:E3 — The Abyss".into()),
            remaining_minutes: Some(38),
        },
        ContinueWatchingItem {
            card: third,
            progress_percent: 72,
            last_watched_at: now,
            episode_title: None,
            remaining_minutes: Some(33),
        },
    ]
}

fn top_ten() -> Vec<TopTenItem> {
    (0..10u8)
        .map(|i| {
            let mut card = first_card(&format!("t10-{}", i));
            card.id = format!("top10-{}", i + 1);
            card.title = format!("Top Ten Title {}", i + 1);
            TopTenItem { card, rank: i + 1 }
        })
        .collect()
}

/// Rows of the home screen, top to bottom.
pub fn home_rows(now: DateTime<Utc>) -> Vec<ContentRow> {
    vec![
        ContentRow::new(
            "Continue Watching",
            RowItems::ContinueWatching(continue_watching(now)),
        ),
        ContentRow::new("Top Picks for You", RowItems::Poster(make_mock_cards(12, "picks")))
            .subtitle("Based on your viewing history"),
        ContentRow::new("Trending Now", RowItems::Backdrop(make_mock_cards(10, "trending")))
            .see_all("/browse/trending"),
        ContentRow::new("New Releases", RowItems::Poster(make_mock_cards(14, "new")))
            .see_all("/browse/new"),
        ContentRow::new("Top 10 Today", RowItems::TopTen(top_ten())),
        ContentRow::new("My List", RowItems::Poster(make_mock_cards(8, "mylist"))),
        ContentRow::new("Action & Adventure", RowItems::Poster(make_mock_cards(12, "action")))
            .see_all("/browse/action"),
        ContentRow::new("Sci-Fi & Fantasy", RowItems::Backdrop(make_mock_cards(10, "scifi")))
            .see_all("/browse/scifi"),
        ContentRow::new("Documentaries", RowItems::Poster(make_mock_cards(12, "docs")))
            .see_all("/browse/documentaries"),
    ]
}

/// Four hand-written hero slides.
pub fn sample_hero_items() -> Vec<HeroItem> {
    vec![
        HeroItem {
            id: "clx1a2b3c4d5".into(),
            title: "The Last Frontier".into(),
            logo_url: Some("/images/titles/the-last-frontier-logo.png".into()),
            synopsis: "In a world where humanity's last outpost teeters on the edge of \
                extinction, one reluctant hero must journey across a ravaged landscape to \
                ignite a beacon of hope before time runs out."
                .into(),
            backdrop_url: "/images/titles/the-last-frontier-backdrop.jpg".into(),
            trailer_url: Some("/videos/the-last-frontier-trailer.mp4".into()),
            content_type: ContentType::Movie,
            genres: vec!["Sci-Fi".into(), "Thriller".into(), "Adventure".into()],
            release_year: 2025,
            maturity_rating: "PG-13".into(),
            match_score: Some(97),
            runtime_minutes: Some(142),
            season_count: None,
            episode_count: None,
            is_original: true,
            is_new: true,
            is_top_ten: false,
            top_ten_rank: None,
            href: "/movie/the-last-frontier".into(),
        },
        HeroItem {
            id: "clx3i9j0k1l2".into(),
            title: "Ocean Beneath".into(),
            logo_url: None,
            synopsis: "Dive into the planet's last unexplored wilderness. From bioluminescent \
                abyss to coral kingdoms, witness nature's most extraordinary spectacle unfold \
                in breathtaking detail."
                .into(),
            backdrop_url: "/images/titles/ocean-beneath-backdrop.jpg".into(),
            trailer_url: None,
            content_type: ContentType::Documentary,
            genres: vec!["Documentary".into(), "Nature".into(), "Science".into()],
            release_year: 2025,
            maturity_rating: "PG".into(),
            match_score: Some(88),
            runtime_minutes: None,
            season_count: Some(1),
            episode_count: Some(8),
            is_original: false,
            is_new: true,
            is_top_ten: false,
            top_ten_rank: None,
            href: "/series/ocean-beneath".into(),
        },
        HeroItem {
            id: "clx4m3n4o5p6".into(),
            title: "Neon Ronin".into(),
            logo_url: None,
            synopsis: "In Neo-Tokyo 2087, a disgraced samurai turned cyber-mercenary takes on \
                one last job that could either clear her name or plunge the city into chaos."
                .into(),
            backdrop_url: "/images/titles/neon-ronin-backdrop.jpg".into(),
            trailer_url: Some("/videos/neon-ronin-trailer.mp4".into()),
            content_type: ContentType::Movie,
            genres: vec!["Action".into(), "Sci-Fi".into(), "Anime".into()],
            release_year: 2025,
            maturity_rating: "R".into(),
            match_score: Some(91),
            runtime_minutes: Some(118),
            season_count: None,
            episode_count: None,
            is_original: true,
            is_new: false,
            is_top_ten: true,
            top_ten_rank: Some(3),
            href: "/movie/neon-ronin".into(),
        },
        HeroItem {
            id: "clx5q7r8s9t0".into(),
            title: "The Weight of Silence".into(),
            logo_url: None,
            synopsis: "When a small-town teacher vanishes without a trace, the lives of five \
                strangers become entangled in a web of secrets that will change them forever."
                .into(),
            backdrop_url: "/images/titles/weight-of-silence-backdrop.jpg".into(),
            trailer_url: None,
            content_type: ContentType::Tv,
            genres: vec!["Drama".into(), "Thriller".into(), "Mystery".into()],
            release_year: 2024,
            maturity_rating: "TV-14".into(),
            match_score: Some(85),
            runtime_minutes: None,
            season_count: Some(3),
            episode_count: Some(24),
            is_original: false,
            is_new: false,
            is_top_ten: false,
            top_ten_rank: None,
            href: "/series/the-weight-of-silence".into(),
        },
    ]
}
