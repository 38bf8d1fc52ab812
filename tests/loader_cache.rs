//! Integration tests for catalog loading, caching and export.

use kepler_architectures::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const RAW_CSV: &str = "\
KOI,KIC,Kepler ID,TTVPeriod,SNR,StatusFlag,ChiSqwTTV,Kepmag,NTTobs,Discovery Note
1.01,11446443,Kepler-1,2.47,40.0,PRR,1.2,11.3,140,
2.01,10666592,Kepler-2,2.20,900.0,PRR,,10.4,240,hot jupiter
5.01,8554498,,4.78,25.0,PPA,3.1,,80,
5.02,8554498,,7.05,8.0,PPA,0.7,,42,
";

fn write_file(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_filled_on_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("raw.csv");
    write_file(&path, RAW_CSV);

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.n_systems(), 3);

    let koi_2 = &catalog.candidates()[1];
    assert_eq!(koi_2.koi, "2.01");
    assert_eq!(koi_2.float("chisqwttv"), Some(0.0));
    assert_eq!(
        koi_2.field("discovery_note"),
        Some(&FieldValue::Text("hot jupiter".to_string()))
    );

    let koi_5 = &catalog.candidates()[2];
    assert_eq!(koi_5.float("kepmag"), Some(0.0));
    assert_eq!(
        koi_5.field("kepler_id"),
        Some(&FieldValue::Categorical(String::new()))
    );
}

#[test]
fn test_store_prefers_cache() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::new(tmp.path());
    write_file(&store.raw_dir().join("q1_q17_dr24.csv"), RAW_CSV);
    write_file(&store.raw_dir().join("q1_q16.csv"), "KOI,TTVPeriod,SNR,StatusFlag\n9.01,1,1,P\n");

    let (fresh, source) = store.load(None).unwrap();
    assert!(source.ends_with("q1_q17_dr24.csv"));
    assert_eq!(fresh.len(), 4);

    // A stale cache entry wins over the raw file.
    let cached = store.processed_dir().join("q1_q17_dr24.csv");
    assert!(cached.is_file());
    write_file(&cached, "KOI,TTVPeriod,SNR,StatusFlag\n3.01,1,1,P\n");

    let (from_cache, source) = store.load(None).unwrap();
    assert_eq!(source, cached);
    assert_eq!(from_cache.len(), 1);
    assert_eq!(from_cache.candidates()[0].koi, "3.01");
}

#[test]
fn test_store_explicit_path() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::new(tmp.path());
    let elsewhere = tmp.path().join("downloads").join("kepler.csv");
    write_file(&elsewhere, RAW_CSV);

    let (catalog, source) = store.load(Some(elsewhere.as_path())).unwrap();
    assert_eq!(source, elsewhere);
    assert_eq!(catalog.len(), 4);
    assert!(store.processed_dir().join("kepler.csv").is_file());
}

#[test]
fn test_invalid_designation_surfaces() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.csv");
    write_file(&path, "KOI,TTVPeriod,SNR,StatusFlag\nK00001.01,1,1,P\n");

    assert!(matches!(
        load_catalog(&path),
        Err(KeplerError::InvalidDesignation { row: 0, .. })
    ));
}

#[test]
fn test_missing_required_column_surfaces() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::new(tmp.path());
    write_file(&store.raw_dir().join("broken.csv"), "KOI,TTVPeriod,StatusFlag\n1.01,1,P\n");

    match store.load(None) {
        Err(KeplerError::MissingColumn(column)) => assert_eq!(column, "snr"),
        other => panic!("expected missing column, got {:?}", other),
    }
    assert!(!store.processed_dir().join("broken.csv").exists());
}

#[test]
fn test_export_classified() {
    let tmp = TempDir::new().unwrap();
    let raw = tmp.path().join("raw.csv");
    write_file(&raw, RAW_CSV);

    let catalog = load_catalog(&raw).unwrap();
    let classified = Pipeline::new()
        .observer(NoopObserver)
        .min_snr(12.0)
        .status_flag(StatusFlag::PeriodRelated)
        .run(&catalog)
        .unwrap();

    let out = tmp.path().join("out");
    export_classified(&classified, &out).unwrap();

    let singles = load_catalog(out.join("singles.csv")).unwrap();
    let multis = load_catalog(out.join("multis.csv")).unwrap();
    assert_eq!(singles.len(), 3);
    assert!(multis.is_empty());

    let text = std::fs::read_to_string(out.join("singles.csv")).unwrap();
    assert!(text.contains(",1,single"));
    assert!(text.contains(",2,demoted"));

    let summary: ClassificationSummary =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary, classified.summary());
    assert_eq!(summary.demoted, 1);
    assert_eq!(summary.status_flag, Some(StatusFlag::PeriodRelated));
}

#[test]
fn test_config_file_drives_pipeline() {
    let tmp = TempDir::new().unwrap();
    let raw = tmp.path().join("raw.csv");
    write_file(&raw, RAW_CSV);
    let config_path = tmp.path().join("config.yaml");
    write_file(
        &config_path,
        "data_processing:\n  pre_split_filtering: true\ndata_filtering:\n  min_snr: 12\n  min_ttvperiod: null\nplotting:\n  dpi: 300\n",
    );

    let config = PipelineConfig::from_path(&config_path).unwrap();
    assert_eq!(config.data_filtering.min_ttvperiod, Bound::Unbounded);
    assert!(config.data_processing.demote_multis_to_singles);

    let classified = process_catalog(&load_catalog(&raw).unwrap(), &config, None).unwrap();
    let koi_5 = classified.singles.filter(|c| c.system == SystemId(5));
    assert_eq!(koi_5.len(), 1);
    assert_eq!(koi_5.candidates()[0].position, Some(Position::Single));
    assert_eq!(koi_5.candidates()[0].multiplicity, Some(1));
}

#[test]
fn test_cache_hit_matches_cache_miss() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::new(tmp.path());
    write_file(
        &store.raw_dir().join("masses.csv"),
        "KOI,TTVPeriod,SNR,StatusFlag,Planet Mass,Transit Count\n\
         1.01,10.0,20.0,P,2.0,7\n\
         2.01,3.0,15.0,P,3.0,9\n",
    );

    let (fresh, _) = store.load(None).unwrap();
    let (cached, source) = store.load(None).unwrap();
    assert_eq!(source, store.processed_dir().join("masses.csv"));

    assert_eq!(fresh.candidates()[0].field("planet_mass"), Some(&FieldValue::Float(2.0)));
    assert_eq!(fresh.candidates()[0].field("transit_count"), Some(&FieldValue::Int(7)));
    assert_eq!(fresh, cached);
}
