use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::models::Snapshot;

/// Where one day's artifacts live.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub products: PathBuf,
    pub prices: PathBuf,
    pub csv: PathBuf,
}

impl ArtifactPaths {
    pub fn for_date(dir: &Path, date: NaiveDate) -> Self {
        let day = date.format("%Y-%m-%d").to_string();
        Self {
            products: dir.join(format!("{day}__products.json")),
            prices: dir.join(format!("{day}__prices.json")),
            csv: dir.join(format!("{day}.csv")),
        }
    }
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

/// Pretty-printed, non-ASCII kept as is. Overwrites `path`.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), records = snapshot.results.len(), "saved snapshot");
    Ok(())
}

pub fn save_csv(csv: &str, path: &Path) -> Result<()> {
    fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "saved csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_stamped_names() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let paths = ArtifactPaths::for_date(Path::new("out"), date);

        assert_eq!(paths.products, Path::new("out/2025-03-07__products.json"));
        assert_eq!(paths.prices, Path::new("out/2025-03-07__prices.json"));
        assert_eq!(paths.csv, Path::new("out/2025-03-07.csv"));
    }

    #[test]
    fn ensure_dir_creates_parents_and_tolerates_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("data").join("set");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn snapshot_is_pretty_and_keeps_unicode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("s.json");
        let snapshot = Snapshot {
            results: vec![json!({"productId": 1, "name": "Ré-Évolution ★"})],
        };

        save_snapshot(&snapshot, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("Ré-Évolution ★"));
        assert!(text.starts_with("{\n  \"results\": [\n    {\n      \"productId\": 1,"));
        let back: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn snapshot_keeps_numbers_exactly_as_received() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("s.json");
        let body = r#"{"results":[{"productId":12345678901234567890123,"marketPrice":3.10}]}"#;
        let snapshot: Snapshot = serde_json::from_str(body).unwrap();

        save_snapshot(&snapshot, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"productId\": 12345678901234567890123,"));
        assert!(text.contains("\"marketPrice\": 3.10"));
    }
}
