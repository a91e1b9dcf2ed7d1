//! Unit coverage for seeding and play counting.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use rusqlite::Connection;
use streamside_core::{CatalogStore, SqliteCatalogStore, VideoError, VideoType};
use tempfile::TempDir;

use crate::{
    CatalogSeed, CategorySeed, LoadSeedError, PersistCatalogError, RecordViewError, SeedReport,
    VideoSeed, load_catalog_seed, persist_catalog_to_sqlite, record_view, sample_catalog,
};

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn db(&self) -> Utf8PathBuf {
        self.root.join("nested/catalog.db")
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
    Workspace { _dir: dir, root }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn category(slug: &str) -> CategorySeed {
    CategorySeed {
        name: slug.to_uppercase(),
        slug: slug.to_owned(),
        description: String::new(),
        order: 0,
    }
}

fn video(slug: &str, categories: &[&str]) -> VideoSeed {
    VideoSeed {
        title: format!("Title {slug}"),
        slug: slug.to_owned(),
        description: String::new(),
        video_type: VideoType::Movie,
        thumbnail: String::new(),
        hero_image: String::new(),
        video_url: String::new(),
        trailer_url: String::new(),
        year: 2025,
        duration_minutes: 90,
        rating_percentage: 80,
        age_rating: streamside_core::AgeRating::Pg,
        director: String::new(),
        cast: String::new(),
        language: "English".to_owned(),
        tags: String::new(),
        is_featured: false,
        is_active: true,
        view_count: 0,
        category_slugs: categories.iter().map(|slug| (*slug).to_owned()).collect(),
    }
}

fn count(db: &Utf8PathBuf, table: &str) -> i64 {
    let connection = Connection::open(db.as_std_path()).expect("open database");
    connection
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}

#[rstest]
fn sample_catalog_is_well_formed() {
    let seed = sample_catalog().expect("bundled sample");
    assert_eq!(seed.categories.len(), 6);
    assert_eq!(seed.videos.len(), 10);
    assert!(seed.videos.iter().all(|entry| entry.validate().is_ok()));
    let featured: Vec<_> = seed
        .videos
        .iter()
        .filter(|entry| entry.is_featured)
        .map(|entry| entry.slug.as_str())
        .collect();
    assert_eq!(featured, ["ai-documentary-future"]);
}

#[rstest]
fn seeding_sample_twice_is_idempotent(workspace: Workspace, now: DateTime<Utc>) {
    let seed = sample_catalog().expect("bundled sample");
    let db = workspace.db();

    let first = persist_catalog_to_sqlite(&db, &seed, now).expect("first seed");
    assert_eq!(
        first,
        SeedReport {
            categories_created: 6,
            categories_existing: 0,
            videos_created: 10,
            videos_existing: 0,
        }
    );

    let second = persist_catalog_to_sqlite(&db, &seed, now).expect("second seed");
    assert_eq!(second.categories_existing, 6);
    assert_eq!(second.videos_existing, 10);
    assert_eq!(second.videos_created, 0);
    assert_eq!(count(&db, "videos"), 10);
    assert_eq!(count(&db, "video_categories"), 28);
}

#[rstest]
fn seeded_videos_keep_credits_and_banner(workspace: Workspace, now: DateTime<Utc>) {
    let seed = sample_catalog().expect("bundled sample");
    let db = workspace.db();
    persist_catalog_to_sqlite(&db, &seed, now).expect("seed");

    let store = SqliteCatalogStore::open(db.as_std_path()).expect("open store");
    let featured = store
        .active_videos()
        .expect("active videos")
        .into_iter()
        .find(|video| video.slug == "ai-documentary-future")
        .expect("featured title");
    assert_eq!(featured.director, "Sarah Chen");
    assert_eq!(featured.cast, "Dr. Andrew Ng, Fei-Fei Li, Yann LeCun");
    assert_eq!(featured.language, "English");
    assert_eq!(
        featured.hero_image,
        "https://picsum.photos/1920/1080?random=hero1"
    );
}

#[rstest]
fn unknown_category_slug_rolls_back(workspace: Workspace, now: DateTime<Utc>) {
    let seed = CatalogSeed {
        categories: vec![category("drama")],
        videos: vec![video("first", &["drama"]), video("second", &["comedy"])],
    };
    let db = workspace.db();
    let err = persist_catalog_to_sqlite(&db, &seed, now).expect_err("unknown slug");
    match err {
        PersistCatalogError::UnknownCategory { video, category } => {
            assert_eq!(video, "second");
            assert_eq!(category, "comedy");
        }
        other => panic!("unexpected error: {other}"),
    }
    let connection = Connection::open(db.as_std_path()).expect("open database");
    let tables: i64 = connection
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 0, "a failed seed should leave no tables behind");
}

#[rstest]
fn invalid_video_is_rejected(workspace: Workspace, now: DateTime<Utc>) {
    let mut broken = video("broken", &[]);
    broken.rating_percentage = 120;
    let seed = CatalogSeed {
        categories: Vec::new(),
        videos: vec![broken],
    };
    let err = persist_catalog_to_sqlite(&workspace.db(), &seed, now).expect_err("invalid video");
    assert!(matches!(
        err,
        PersistCatalogError::InvalidVideo {
            source: VideoError::RatingOutOfRange { rating: 120 },
            ..
        }
    ));
}

#[rstest]
fn blank_category_is_rejected(workspace: Workspace, now: DateTime<Utc>) {
    let mut blank = category("blank");
    blank.name = "  ".to_owned();
    let seed = CatalogSeed {
        categories: vec![blank],
        videos: Vec::new(),
    };
    let err = persist_catalog_to_sqlite(&workspace.db(), &seed, now).expect_err("blank name");
    assert!(matches!(err, PersistCatalogError::InvalidCategory { .. }));
}

#[rstest]
fn seeds_load_from_json_files(workspace: Workspace) {
    let path = workspace.root.join("seed.json");
    std::fs::write(
        path.as_std_path(),
        r#"{
            "categories": [{"name": "Drama", "slug": "drama"}],
            "videos": [{
                "title": "Night Shift",
                "slug": "night-shift",
                "video_type": "series",
                "year": 2024,
                "rating_percentage": 77,
                "age_rating": "PG-13",
                "category_slugs": ["drama"]
            }]
        }"#,
    )
    .expect("write seed");
    let seed = load_catalog_seed(&path).expect("load seed");
    let entry = seed.videos.first().expect("one video");
    assert_eq!(entry.video_type, VideoType::Series);
    assert_eq!(entry.age_rating, streamside_core::AgeRating::Pg13);
    assert!(entry.is_active);
    assert_eq!(entry.view_count, 0);
    assert_eq!(entry.language, "English");
    assert!(entry.director.is_empty());
    assert!(entry.hero_image.is_empty());
}

#[rstest]
fn missing_seed_file_reports_path(workspace: Workspace) {
    let path = workspace.root.join("absent.json");
    let err = load_catalog_seed(&path).expect_err("missing seed");
    assert!(matches!(err, LoadSeedError::Open { path: reported, .. } if reported == path));
}

#[rstest]
fn malformed_seed_file_is_a_parse_error(workspace: Workspace) {
    let path = workspace.root.join("broken.json");
    std::fs::write(path.as_std_path(), "{\"videos\": 3}").expect("write seed");
    let err = load_catalog_seed(&path).expect_err("malformed seed");
    assert!(matches!(err, LoadSeedError::Parse { .. }));
}

#[rstest]
fn record_view_increments_active_videos(workspace: Workspace, now: DateTime<Utc>) {
    let seed = CatalogSeed {
        categories: vec![category("drama")],
        videos: vec![video("first", &["drama"])],
    };
    let db = workspace.db();
    persist_catalog_to_sqlite(&db, &seed, now).expect("seed");
    assert_eq!(record_view(&db, 1).expect("first play"), 1);
    assert_eq!(record_view(&db, 1).expect("second play"), 2);
}

#[rstest]
fn record_view_rejects_unknown_and_inactive_videos(workspace: Workspace, now: DateTime<Utc>) {
    let mut hidden = video("hidden", &[]);
    hidden.is_active = false;
    let seed = CatalogSeed {
        categories: Vec::new(),
        videos: vec![hidden],
    };
    let db = workspace.db();
    persist_catalog_to_sqlite(&db, &seed, now).expect("seed");
    assert!(matches!(
        record_view(&db, 1),
        Err(RecordViewError::InactiveVideo { id: 1 })
    ));
    assert!(matches!(
        record_view(&db, 9),
        Err(RecordViewError::UnknownVideo { id: 9 })
    ));
}

#[rstest]
fn record_view_requires_an_existing_database(workspace: Workspace) {
    let db = workspace.db();
    assert!(matches!(
        record_view(&db, 1),
        Err(RecordViewError::MissingDatabase { .. })
    ));
}
