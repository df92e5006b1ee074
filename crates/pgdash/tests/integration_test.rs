//! Integration tests for pgdash.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::NamedTempFile;

use pgdash::enrich::{lookup_locality, DEFAULT_COORDINATES, GENERIC_TAG};
use pgdash::{
    Dashboard, DashboardConfig, DataSource, FilterOptions, ListingFilter, PgDashError, Result,
    SourceFetcher, Summary,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/pg_data.csv")
}

/// Serves fixed bytes and counts how often it was asked.
struct CountingFetcher {
    bytes: Vec<u8>,
    calls: Arc<AtomicUsize>,
}

impl SourceFetcher for CountingFetcher {
    fn fetch(&self, _source: &DataSource) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.clone())
    }
}

/// Always fails, like an unreachable spreadsheet.
struct FailingFetcher;

impl SourceFetcher for FailingFetcher {
    fn fetch(&self, source: &DataSource) -> Result<Vec<u8>> {
        Err(PgDashError::Http {
            url: source.key(),
            message: "connection refused".to_string(),
        })
    }
}

// =============================================================================
// Survey Fixture
// =============================================================================

#[test]
fn test_load_survey_fixture() {
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard
        .load(&DataSource::File(fixture()))
        .expect("Load failed");

    assert_eq!(loaded.source.row_count, 8);
    assert_eq!(loaded.source.format, "csv");
    assert_eq!(loaded.report.rows_read, 8);
    assert_eq!(loaded.report.rows_kept, 6);
    assert_eq!(loaded.table.len(), 6);

    let excluded: Vec<usize> = loaded
        .report
        .excluded
        .iter()
        .map(|r| r.source_row)
        .collect();
    assert_eq!(excluded, vec![3, 5]);
    assert_eq!(loaded.report.costs_defaulted, 1);
    assert_eq!(loaded.report.cost_ranges_averaged, 1);
    assert_eq!(loaded.report.ratings_defaulted, 2);
    assert_eq!(loaded.report.dropped_columns, vec!["Timestamp"]);

    assert_eq!(
        loaded.table.extra_columns,
        vec!["Food Quality", "Parking", "Room Space", "Electricity", "Contributor"]
    );
}

#[test]
fn test_fixture_range_scenario() {
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard.load(&DataSource::File(fixture())).unwrap();

    let sai = &loaded.table.listings[0];
    assert_eq!(sai.name.as_deref(), Some("Sai Residency"));
    assert_eq!(sai.cost, 6000.0);
    assert_eq!(sai.rating, 0.0);
    assert_eq!(sai.location, "Gachibowli");
    assert_eq!(sai.phone, "N/A");
    assert_eq!(
        sai.derived.coordinates,
        lookup_locality("Gachibowli").unwrap()
    );
    assert_eq!(sai.derived.value_score, 0.0);
    assert_eq!(
        sai.derived.tags.iter().collect::<Vec<_>>(),
        vec!["Good Food", "Clean", "No Parking"]
    );
}

#[test]
fn test_fixture_coercions() {
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard.load(&DataSource::File(fixture())).unwrap();
    let by_row = |row: usize| {
        loaded
            .table
            .iter()
            .find(|l| l.source_row == row)
            .expect("row kept")
    };

    assert_eq!(by_row(1).cost, 8500.0);
    assert_eq!(by_row(1).phone, "98480 12345");
    assert_eq!(by_row(2).cost, 14000.0);

    let kphb = by_row(4);
    assert_eq!(kphb.location, "Kphb Colony");
    assert_eq!(kphb.rating, 0.0);
    assert_eq!(kphb.gender, "Not Specified");
    assert_eq!(kphb.name, None);
    assert_eq!(kphb.derived.coordinates, lookup_locality("Kphb").unwrap());
    assert_eq!(
        kphb.derived.tags.iter().collect::<Vec<_>>(),
        vec![GENERIC_TAG]
    );

    let sunrise = by_row(7);
    assert_eq!(sunrise.location, "Unknown");
    assert_eq!(sunrise.derived.coordinates, DEFAULT_COORDINATES);
    assert_eq!(sunrise.derived.value_score, 1.5);

    assert_eq!(
        by_row(1).extra.get("Contributor").map(String::as_str),
        Some("u/coder_girl")
    );
}

#[test]
fn test_fixture_filtering_and_summary() {
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard.load(&DataSource::File(fixture())).unwrap();

    let options = FilterOptions::from_table(&loaded.table);
    assert_eq!(
        options.locations,
        vec![
            "Financial District",
            "Gachibowli",
            "Hitech City",
            "Kphb Colony",
            "Madhapur",
            "Unknown"
        ]
    );
    assert_eq!(options.genders, vec!["Female", "Male", "Not Specified"]);
    assert_eq!(options.cost_bounds, Some((6000.0, 14000.0)));

    let filter = ListingFilter::new()
        .with_genders(["Male"])
        .with_cost(Some(6000.0), Some(12000.0));
    let view = loaded.table.filter(&filter);
    let summary = Summary::from_view(&view);

    assert_eq!(summary.displayed, 3);
    assert_eq!(summary.total, 6);
    assert_eq!(
        summary.avg_cost_by_location.keys().collect::<Vec<_>>(),
        vec!["Financial District", "Gachibowli", "Unknown"]
    );

    let top = loaded.table.view().top_by_value(2);
    let names: Vec<_> = top.iter().map(|l| l.display_name()).collect();
    assert_eq!(names, vec!["Sri Balaji Womens Hostel", "Royal Stay"]);

    // The base table is untouched by filtering
    assert_eq!(loaded.table.len(), 6);
}

// =============================================================================
// Fatal Ingestion Failures
// =============================================================================

#[test]
fn test_missing_file_is_fatal() {
    let dashboard = Dashboard::new().unwrap();
    let result = dashboard.load(&DataSource::File(PathBuf::from("/nonexistent/pg_data.csv")));
    assert!(matches!(result, Err(PgDashError::Io { .. })));
}

#[test]
fn test_unreachable_source_is_fatal() {
    let dashboard = Dashboard::with_fetcher(DashboardConfig::default(), FailingFetcher).unwrap();
    let source = DataSource::parse("https://docs.google.com/spreadsheets/d/abc/edit").unwrap();
    assert!(matches!(
        dashboard.load(&source),
        Err(PgDashError::Http { .. })
    ));
}

#[test]
fn test_empty_file_is_fatal() {
    let file = create_test_file("");
    let dashboard = Dashboard::new().unwrap();
    let result = dashboard.load(&DataSource::File(file.path().to_path_buf()));
    assert!(matches!(result, Err(PgDashError::EmptyData(_))));
}

#[test]
fn test_header_only_file_is_fatal() {
    let file = create_test_file("💰 Monthly Cost (₹):,🌍 Location:\n");
    let dashboard = Dashboard::new().unwrap();
    let result = dashboard.load(&DataSource::File(file.path().to_path_buf()));
    assert!(matches!(result, Err(PgDashError::EmptyData(_))));
}

#[test]
fn test_all_rows_out_of_range_is_empty_but_valid() {
    let file = create_test_file("Cost,Location\n500,Ameerpet\n90000,Madhapur\n");
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard
        .load(&DataSource::File(file.path().to_path_buf()))
        .unwrap();

    assert!(loaded.table.is_empty());
    assert_eq!(loaded.report.excluded.len(), 2);
}

// =============================================================================
// Source Cache
// =============================================================================

#[test]
fn test_cache_reuses_fetched_bytes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = CountingFetcher {
        bytes: b"Cost,Location\n6000,Ameerpet\n".to_vec(),
        calls: Arc::clone(&calls),
    };
    let dashboard = Dashboard::with_fetcher(DashboardConfig::default(), fetcher).unwrap();
    let source = DataSource::parse("https://example.com/pg.csv").unwrap();

    let first = dashboard.load(&source).unwrap();
    let second = dashboard.load(&source).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.table.len(), second.table.len());
}

#[test]
fn test_zero_ttl_refetches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = CountingFetcher {
        bytes: b"Cost\n6000\n".to_vec(),
        calls: Arc::clone(&calls),
    };
    let config = DashboardConfig::default().with_cache_ttl(std::time::Duration::ZERO);
    let dashboard = Dashboard::with_fetcher(config, fetcher).unwrap();
    let source = DataSource::parse("https://example.com/pg.csv").unwrap();

    dashboard.load(&source).unwrap();
    dashboard.load(&source).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failed_fetch_is_not_cached() {
    let dashboard = Dashboard::with_fetcher(DashboardConfig::default(), FailingFetcher).unwrap();
    let source = DataSource::parse("https://example.com/pg.csv").unwrap();
    assert!(dashboard.load(&source).is_err());
    assert!(dashboard.load(&source).is_err());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_custom_cost_range_and_scale() {
    let file = create_test_file("Cost,Rating\n500,4\n6000,3\n");
    let config = DashboardConfig::default()
        .with_cost_range(100.0, 1000.0)
        .with_value_scale(1.0);
    let dashboard = Dashboard::with_config(config).unwrap();
    let loaded = dashboard
        .load(&DataSource::File(file.path().to_path_buf()))
        .unwrap();

    assert_eq!(loaded.table.len(), 1);
    let listing = &loaded.table.listings[0];
    assert_eq!(listing.cost, 500.0);
    assert_eq!(listing.derived.value_score, 16.0 / 500.0);
}

#[test]
fn test_tsv_source() {
    let file = create_test_file("Cost\tLocation\tOverall Rating:\n7000\tmadhapur\t4\n");
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard
        .load(&DataSource::File(file.path().to_path_buf()))
        .unwrap();

    assert_eq!(loaded.source.format, "tsv");
    assert_eq!(loaded.table.listings[0].location, "Madhapur");
    assert_eq!(loaded.table.listings[0].rating, 4.0);
}

#[test]
fn test_glued_currency_and_negative_comment() {
    let file = create_test_file("Cost,Comments\nRs8000,unclean rooms and unfriendly owner\nINR12000,\n");
    let dashboard = Dashboard::new().unwrap();
    let loaded = dashboard
        .load(&DataSource::File(file.path().to_path_buf()))
        .unwrap();

    assert_eq!(loaded.table.len(), 2);
    assert!(loaded.report.excluded.is_empty());

    let first = &loaded.table.listings[0];
    assert_eq!(first.cost, 8000.0);
    assert_eq!(
        first.derived.tags.iter().collect::<Vec<_>>(),
        vec!["Hygiene Issue", "Rude Staff"]
    );
    assert_eq!(loaded.table.listings[1].cost, 12000.0);
}
