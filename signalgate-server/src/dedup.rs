//! Dedup gate: suppresses repeat notifications for the same decision key.
//!
//! State is a JSON file shaped `{"dedup": {"<key>": <unix seconds>}}`. The
//! whole check-and-set runs under one mutex, so two concurrent requests with
//! the same key cannot both pass.

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("failed to read dedup state {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt dedup state {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write dedup state {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DedupState {
    #[serde(default)]
    dedup: HashMap<String, i64>,
}

/// File-backed dedup store with a fixed suppression window.
#[derive(Debug)]
pub struct DedupGate {
    path: PathBuf,
    window_secs: i64,
    state: Mutex<DedupState>,
}

impl DedupGate {
    /// Open the store at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>, window_secs: u64) -> Result<Self, DedupError> {
        let path = path.into();
        let state = load_state(&path)?;
        log::debug!(
            "dedup state {} loaded ({} keys)",
            path.display(),
            state.dedup.len()
        );
        Ok(Self {
            path,
            window_secs: i64::try_from(window_secs).unwrap_or(i64::MAX),
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn window_secs(&self) -> i64 {
        self.window_secs
    }

    /// Number of keys currently remembered.
    pub fn len(&self) -> usize {
        self.state.lock().dedup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check-and-set against the wall clock.
    pub fn is_fresh(&self, key: &str) -> Result<bool, DedupError> {
        self.is_fresh_at(key, Utc::now().timestamp())
    }

    /// Returns `false` if `key` was recorded less than the window before `now`.
    /// Otherwise records `now` for `key`, drops expired keys and persists.
    ///
    /// The in-memory state only changes once the save succeeded; a failed
    /// save leaves the key unrecorded so a retry can pass.
    ///
    /// Blocks on file I/O; async callers should run it on the blocking pool.
    pub fn is_fresh_at(&self, key: &str, now: i64) -> Result<bool, DedupError> {
        let mut state = self.state.lock();

        if let Some(&last) = state.dedup.get(key) {
            if now.saturating_sub(last) < self.window_secs {
                return Ok(false);
            }
        }

        let window = self.window_secs;
        let mut next = DedupState {
            dedup: state
                .dedup
                .iter()
                .filter(|(_, &ts)| now.saturating_sub(ts) < window)
                .map(|(k, &ts)| (k.clone(), ts))
                .collect(),
        };
        next.dedup.insert(key.to_string(), now);

        save_state(&self.path, &next)?;
        *state = next;
        Ok(true)
    }
}

fn load_state(path: &Path) -> Result<DedupState, DedupError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(DedupState::default()),
        Err(source) => {
            return Err(DedupError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DedupState::default());
    }
    serde_json::from_slice(&bytes).map_err(|source| DedupError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write to a sibling temp file, then rename over the target.
fn save_state(path: &Path, state: &DedupState) -> Result<(), DedupError> {
    let write_err = |source| DedupError::Write {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_vec_pretty(state).map_err(|e| write_err(io::Error::other(e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(dir: &tempfile::TempDir, window: u64) -> DedupGate {
        DedupGate::open(dir.path().join("state.json"), window).unwrap()
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 900);
        assert!(g.is_empty());
        assert!(!g.path().exists());
    }

    #[test]
    fn repeat_within_window_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 900);
        assert!(g.is_fresh_at("ESIM:FIRST_MOVE:A:4:true", 1_000).unwrap());
        assert!(!g.is_fresh_at("ESIM:FIRST_MOVE:A:4:true", 1_899).unwrap());
        assert!(g.is_fresh_at("ESIM:FIRST_MOVE:A:4:true", 1_900).unwrap());
    }

    #[test]
    fn suppressed_call_does_not_extend_window() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 100);
        assert!(g.is_fresh_at("k", 0).unwrap());
        assert!(!g.is_fresh_at("k", 50).unwrap());
        assert!(g.is_fresh_at("k", 100).unwrap());
    }

    #[test]
    fn distinct_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 900);
        assert!(g.is_fresh_at("ESIM:FIRST_MOVE:A:4:true", 10).unwrap());
        assert!(g.is_fresh_at("ESIM:FIRST_MOVE:A:4:false", 10).unwrap());
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn expired_keys_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 60);
        assert!(g.is_fresh_at("old", 0).unwrap());
        assert!(g.is_fresh_at("new", 61).unwrap());
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let g = gate(&dir, 900);
            assert!(g.is_fresh_at("k", 500).unwrap());
        }
        let raw = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["dedup"]["k"], 500);

        let reopened = gate(&dir, 900);
        assert!(!reopened.is_fresh_at("k", 600).unwrap());
    }

    #[test]
    fn corrupt_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            DedupGate::open(&path, 900),
            Err(DedupError::Parse { .. })
        ));
    }

    #[test]
    fn state_without_dedup_table_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{}").unwrap();
        let g = DedupGate::open(&path, 900).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn failed_save_does_not_record_key() {
        let dir = tempfile::tempdir().unwrap();
        let g = gate(&dir, 900);
        assert!(g.is_fresh_at("kept", 100).unwrap());

        // a directory at the target path makes the rename fail
        std::fs::remove_file(g.path()).unwrap();
        std::fs::create_dir(g.path()).unwrap();
        assert!(matches!(
            g.is_fresh_at("ESIM:CONFIRM_LIGHT:A:4:true", 200),
            Err(DedupError::Write { .. })
        ));
        assert_eq!(g.len(), 1);

        std::fs::remove_dir(g.path()).unwrap();
        assert!(g.is_fresh_at("ESIM:CONFIRM_LIGHT:A:4:true", 201).unwrap());
        assert!(!g.is_fresh_at("kept", 202).unwrap());
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let g = DedupGate::open(&path, 900).unwrap();
        assert!(g.is_fresh_at("k", 1).unwrap());
        assert!(path.exists());
    }
}
