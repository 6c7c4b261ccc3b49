//! Candle file loading for offline scoring.
//!
//! `.json` files hold an array of candle objects; `.csv` files need a header
//! row of either `o,h,l,c,v` or `open,high,low,close,volume`.

use anyhow::{bail, Context, Result};
use signalgate_core::domain::validate_window;
use signalgate_core::Candle;
use std::path::Path;

/// Load and validate a candle window, oldest first.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let candles = match ext.as_deref() {
        Some("json") => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        Some("csv") => read_csv(path)?,
        _ => bail!(
            "unsupported candle file {} (expected .json or .csv)",
            path.display()
        ),
    };

    validate_window(&candles).with_context(|| format!("invalid candles in {}", path.display()))?;
    log::debug!("loaded {} candles from {}", candles.len(), path.display());
    Ok(candles)
}

fn read_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    reader
        .deserialize::<Candle>()
        .enumerate()
        .map(|(row, record)| {
            record.with_context(|| format!("{}: bad row {}", path.display(), row + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_short_key_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "w.json",
            r#"[{"o":1.0,"h":1.2,"l":0.9,"c":1.1,"v":10},{"o":1.1,"h":1.3,"l":1.0,"c":1.2,"v":12}]"#,
        );
        let candles = load_candles(&path).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 1.2);
    }

    #[test]
    fn loads_csv_with_either_header() {
        let dir = tempfile::tempdir().unwrap();
        let short = write(&dir, "short.csv", "o,h,l,c,v\n1,1.2,0.9,1.1,10\n");
        let long = write(
            &dir,
            "long.csv",
            "open, high, low, close, volume\n1, 1.2, 0.9, 1.1, 10\n",
        );
        assert_eq!(load_candles(&short).unwrap(), load_candles(&long).unwrap());
    }

    #[test]
    fn rejects_invalid_windows() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write(&dir, "empty.json", "[]");
        assert!(load_candles(&empty).is_err());

        let inverted = write(&dir, "bad.csv", "o,h,l,c,v\n1,0.5,0.9,1.1,10\n");
        assert!(load_candles(&inverted).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "w.txt", "");
        assert!(load_candles(&path).is_err());
    }
}
