//! Reading and writing catalogs on disk, with a processed-data cache.
//!
//! Layout under a project root:
//!
//! ```text
//!  <root>/data/raw/*.csv        catalog releases as downloaded
//!  <root>/data/processed/*.csv  normalized copies, same file names
//! ```

use super::candidate::{Candidate, FieldValue};
use super::catalog::Catalog;
use super::classified::ClassifiedCatalog;
use super::raw::RawTable;
use crate::error::{KeplerError, Result};
use crate::normalize::normalize_catalog;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a CSV file and normalize it.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let raw = RawTable::from_csv(path)?;
    normalize_catalog(&raw)
}

/// The lexically greatest `*.csv` file in `dir`.
///
/// Catalog releases carry their date in the file name, so this is the
/// most recent one.
pub fn latest_csv<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(KeplerError::NoCatalogFound(dir.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() && latest.as_ref().map_or(true, |l| path > *l) {
            latest = Some(path);
        }
    }

    latest.ok_or_else(|| KeplerError::NoCatalogFound(dir.to_path_buf()))
}

/// Write a catalog as CSV.
///
/// Columns: `koi, system, ttvperiod, snr, statusflag`, every payload column
/// in name order, then `multiplicity` and `position`. Missing values are
/// written as empty cells.
pub fn write_catalog_csv<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    let payload: BTreeSet<&str> = catalog
        .iter()
        .flat_map(|c| c.fields.keys().map(String::as_str))
        .collect();

    let mut header = vec!["koi", "system", "ttvperiod", "snr", "statusflag"];
    header.extend(payload.iter().copied());
    header.extend(["multiplicity", "position"]);
    writer.write_record(&header)?;

    for c in catalog {
        writer.write_record(csv_row(c, &payload))?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_row(c: &Candidate, payload: &BTreeSet<&str>) -> Vec<String> {
    let float = |v: f64| FieldValue::Float(v).to_string();

    let mut row = vec![
        c.koi.clone(),
        c.system.to_string(),
        float(c.ttvperiod),
        float(c.snr),
        c.statusflag.clone().unwrap_or_default(),
    ];
    row.extend(
        payload
            .iter()
            .map(|name| c.field(name).map(|v| v.to_string()).unwrap_or_default()),
    );
    row.push(c.multiplicity.map(|m| m.to_string()).unwrap_or_default());
    row.push(c.position.map(|p| p.to_string()).unwrap_or_default());
    row
}

/// Write `singles.csv`, `multis.csv` and `summary.json` into `dir`.
pub fn export_classified<P: AsRef<Path>>(classified: &ClassifiedCatalog, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    write_catalog_csv(&classified.singles, dir.join("singles.csv"))?;
    write_catalog_csv(&classified.multis, dir.join("multis.csv"))?;

    let file = File::create(dir.join("summary.json"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &classified.summary())?;
    writer.flush()?;

    log::info!("Exported classification to {:?}", dir);
    Ok(())
}

/// Catalog files under a project root, with normalized results cached.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    /// Create a store rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding raw catalog releases.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    /// Directory holding normalized copies.
    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    /// Load a catalog, preferring its cached normalized copy.
    ///
    /// With no `path` the latest raw release is used. A cache miss
    /// normalizes the raw file and writes the result to the cache. Returns
    /// the catalog and the path actually read.
    pub fn load(&self, path: Option<&Path>) -> Result<(Catalog, PathBuf)> {
        let source = match path {
            Some(p) => p.to_path_buf(),
            None => latest_csv(self.raw_dir())?,
        };
        let file_name = source
            .file_name()
            .ok_or_else(|| KeplerError::NoCatalogFound(source.clone()))?;
        let processed = self.processed_dir().join(file_name);

        if processed.is_file() {
            log::info!("Cached data found. Loading from {:?}", processed);
            let catalog = load_catalog(&processed)?;
            return Ok((catalog, processed));
        }

        log::info!("Loading data from {:?}", source);
        let catalog = load_catalog(&source)?;

        log::info!("Caching processed data to {:?}", processed);
        std::fs::create_dir_all(self.processed_dir())?;
        write_catalog_csv(&catalog, &processed)?;

        Ok((catalog, source))
    }
}
