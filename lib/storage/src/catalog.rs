// Catalog files inside the furniture database directory
use decoplan_core::{CatalogItem, Error, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "catalog.json";
pub const COMPRESSED_CATALOG_FILE: &str = "catalog.json.gz";

/// Locate the catalog file in a database directory.
///
/// The plain file wins when both are present.
pub fn catalog_path(db_path: &Path) -> Result<PathBuf> {
    if !db_path.is_dir() {
        return Err(Error::DatabaseNotFound(db_path.display().to_string()));
    }

    [CATALOG_FILE, COMPRESSED_CATALOG_FILE]
        .iter()
        .map(|name| db_path.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            Error::InvalidCatalog(format!(
                "no {} or {} in {}",
                CATALOG_FILE,
                COMPRESSED_CATALOG_FILE,
                db_path.display()
            ))
        })
}

/// Read and validate every item of the catalog in `db_path`
pub fn load_catalog(db_path: &Path) -> Result<Vec<CatalogItem>> {
    let path = catalog_path(db_path)?;

    let file = File::open(&path)?;
    let mut json_data = Vec::new();
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        GzDecoder::new(BufReader::new(file)).read_to_end(&mut json_data)?;
    } else {
        BufReader::new(file).read_to_end(&mut json_data)?;
    }

    let items: Vec<CatalogItem> = serde_json::from_slice(&json_data)
        .map_err(|e| Error::InvalidCatalog(format!("{}: {}", path.display(), e)))?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if item.id.trim().is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "item named {:?} has an empty id",
                item.name
            )));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(Error::InvalidCatalog(format!("duplicate item id {:?}", item.id)));
        }
    }

    Ok(items)
}

/// Write a catalog into `db_path`, creating the directory if needed
pub fn save_catalog(db_path: &Path, items: &[CatalogItem], compress: bool) -> Result<PathBuf> {
    fs::create_dir_all(db_path)?;
    let json_data = serde_json::to_vec_pretty(items)?;

    if compress {
        let path = db_path.join(COMPRESSED_CATALOG_FILE);
        let file = File::create(&path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(&json_data)?;
        encoder.finish()?.flush()?;
        Ok(path)
    } else {
        let path = db_path.join(CATALOG_FILE);
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(&json_data)?;
        writer.flush()?;
        Ok(path)
    }
}
