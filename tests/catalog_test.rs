//! Catalogue persistence tests
//!
//! Runs against a real SQLite file in a temp directory.

use streamvault::db::{Catalog, FilmFilter};
use streamvault::models::{CatalogStats, ContentType, MediaType, NewFilm};
use tempfile::TempDir;

async fn open() -> (Catalog, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("data/catalog.db").display());
    let catalog = Catalog::open(&url).await.unwrap();
    (catalog, dir)
}

fn film(title: &str, media_type: MediaType, year: i32) -> NewFilm {
    let mut film = NewFilm::new(title, media_type);
    film.synopsis = format!("{title} synopsis");
    film.backdrop_url = format!("https://img.example/{}.jpg", film.slug);
    film.poster_url = format!("https://img.example/{}-poster.jpg", film.slug);
    film.genres = vec!["Drama".into(), "Thriller".into()];
    film.release_year = year;
    film
}

#[tokio::test]
async fn test_open_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/catalog.db");
    let url = format!("sqlite://{}", path.display());

    let catalog = Catalog::open(&url).await.unwrap();
    catalog.health_check().await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());

    let id = {
        let catalog = Catalog::open(&url).await.unwrap();
        catalog
            .insert(&film("Glass Harbor", MediaType::Movie, 2023))
            .await
            .unwrap()
            .id
    };

    let catalog = Catalog::open(&url).await.unwrap();
    let loaded = catalog.get(id).await.unwrap().unwrap();
    assert_eq!(loaded.fields.title, "Glass Harbor");
    assert_eq!(loaded.fields.slug, "glass-harbor");
    assert_eq!(loaded.fields.href, "/movie/glass-harbor");
}

#[tokio::test]
async fn test_update_replaces_fields_and_stamps() {
    let (catalog, _dir) = open().await;
    let stored = catalog
        .insert(&film("Night Shift", MediaType::Tv, 2021))
        .await
        .unwrap();

    let mut changed = stored.fields.clone();
    changed.season_count = Some(3);
    changed.episode_count = Some(24);
    changed.maturity_rating = Some("TV-14".into());
    changed.content_type = ContentType::Kids;

    let updated = catalog.update(stored.id, &changed).await.unwrap().unwrap();
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.fields.season_count, Some(3));
    assert_eq!(updated.fields.content_type, ContentType::Kids);
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_update_missing_film_is_none() {
    let (catalog, _dir) = open().await;
    let result = catalog
        .update(999, &film("Nobody", MediaType::Movie, 2020))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_upsert_matches_on_title() {
    let (catalog, _dir) = open().await;

    let first = catalog
        .upsert(&film("Tidewater", MediaType::Movie, 2019))
        .await
        .unwrap();
    let mut newer = film("Tidewater", MediaType::Movie, 2019);
    newer.match_score = Some(91);
    let second = catalog.upsert(&newer).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.fields.match_score, Some(91));
    assert_eq!(catalog.list(&FilmFilter::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_filters_by_type_and_search() {
    let (catalog, _dir) = open().await;
    for (title, media_type) in [
        ("Orbit Station", MediaType::Tv),
        ("orbital Decay", MediaType::Movie),
        ("Deep Water", MediaType::Movie),
        ("Apex", MediaType::Movie),
    ] {
        catalog.insert(&film(title, media_type, 2022)).await.unwrap();
    }

    let all = catalog.list(&FilmFilter::default()).await.unwrap();
    let titles: Vec<_> = all.iter().map(|f| f.fields.title.as_str()).collect();
    // Case-insensitive title order
    assert_eq!(
        titles,
        vec!["Apex", "Deep Water", "Orbit Station", "orbital Decay"]
    );

    let movies = catalog
        .list(&FilmFilter {
            media_type: Some(MediaType::Movie),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(movies.len(), 3);

    let search = catalog
        .list(&FilmFilter {
            search: Some("ORBIT".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(search.len(), 2);

    let both = catalog
        .list(&FilmFilter {
            media_type: Some(MediaType::Tv),
            search: Some("orbit".into()),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].fields.title, "Orbit Station");

    let limited = catalog
        .list(&FilmFilter {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let (catalog, _dir) = open().await;
    for title in ["100% Wolf", "Snake_Eyes", "Snakes Eyes", "Plain Title"] {
        catalog
            .insert(&film(title, MediaType::Movie, 2020))
            .await
            .unwrap();
    }

    let search = |text: &str| FilmFilter {
        search: Some(text.into()),
        ..Default::default()
    };

    let percent = catalog.list(&search("%")).await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].fields.title, "100% Wolf");

    let underscore = catalog.list(&search("snake_")).await.unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].fields.title, "Snake_Eyes");

    let empty = catalog.list(&search("")).await.unwrap();
    assert_eq!(empty.len(), 4);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let (catalog, _dir) = open().await;
    for title in ["ÉLITE", "Élan Vital", "Amélie", "Elite Squad"] {
        catalog
            .insert(&film(title, MediaType::Tv, 2020))
            .await
            .unwrap();
    }

    let found = catalog
        .list(&FilmFilter {
            search: Some("élite".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let titles: Vec<_> = found.iter().map(|f| f.fields.title.as_str()).collect();
    assert_eq!(titles, vec!["ÉLITE"]);

    let limited = catalog
        .list(&FilmFilter {
            search: Some("É".into()),
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_stats_count_by_media_type() {
    let (catalog, _dir) = open().await;
    assert_eq!(catalog.stats().await.unwrap(), CatalogStats::default());

    catalog.insert(&film("A", MediaType::Movie, 2020)).await.unwrap();
    catalog.insert(&film("B", MediaType::Movie, 2020)).await.unwrap();
    let show = catalog.insert(&film("C", MediaType::Tv, 2020)).await.unwrap();

    assert_eq!(
        catalog.stats().await.unwrap(),
        CatalogStats {
            movies: 2,
            tv_shows: 1
        }
    );

    catalog.delete(show.id).await.unwrap();
    assert_eq!(catalog.stats().await.unwrap().tv_shows, 0);
}

#[tokio::test]
async fn test_featured_puts_ranked_titles_first() {
    let (catalog, _dir) = open().await;

    let mut second = film("Runner Up", MediaType::Movie, 2024);
    second.is_top_ten = true;
    second.top_ten_rank = Some(2);
    let mut first = film("Number One", MediaType::Tv, 2024);
    first.is_top_ten = true;
    first.top_ten_rank = Some(1);
    first.season_count = Some(2);

    catalog.insert(&film("Older", MediaType::Movie, 2010)).await.unwrap();
    catalog.insert(&second).await.unwrap();
    catalog.insert(&film("Newest", MediaType::Movie, 2025)).await.unwrap();
    catalog.insert(&first).await.unwrap();

    let featured = catalog.featured(3).await.unwrap();
    let titles: Vec<_> = featured.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Number One", "Runner Up", "Newest"]);

    let hero = &featured[0];
    assert_eq!(hero.top_ten_rank, Some(1));
    assert_eq!(hero.season_count, Some(2));
    assert_eq!(hero.href, "/tv/number-one");
    assert_eq!(hero.genres, vec!["Drama".to_string(), "Thriller".to_string()]);
}

#[test]
fn test_in_memory_catalog_from_sync_context() {
    tokio_test::block_on(async {
        let catalog = Catalog::open("sqlite::memory:").await.unwrap();
        let stored = catalog
            .insert(&film("Ephemeral", MediaType::Movie, 2024))
            .await
            .unwrap();
        assert!(catalog.delete(stored.id).await.unwrap());
        assert!(catalog.list(&FilmFilter::default()).await.unwrap().is_empty());
    });
}
