use super::types::ReplayDoc;
use crate::error::{ReplayError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A successfully decoded replay file.
#[derive(Debug, Clone)]
pub struct LoadedReplay {
    /// File name, used as the match identity in reports
    pub name: String,
    pub path: PathBuf,
    pub doc: ReplayDoc,
}

/// A replay file the batch loader had to leave out.
#[derive(Debug, Clone)]
pub struct SkippedReplay {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of loading a whole replay directory.
#[derive(Debug, Clone, Default)]
pub struct ReplayBatch {
    /// Loaded replays, in discovery order
    pub replays: Vec<LoadedReplay>,
    pub skipped: Vec<SkippedReplay>,
}

impl ReplayBatch {
    /// Number of files found, loaded or not.
    pub fn files_found(&self) -> usize {
        self.replays.len() + self.skipped.len()
    }
}

/// Load one replay JSON file.
pub fn load_replay_json<P: AsRef<Path>>(path: P) -> Result<ReplayDoc> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ReplayError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// List `*.json` files directly inside `dir`, sorted by path.
pub fn discover_replays<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ReplayError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| ReplayError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ReplayError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every replay in `dir`.
///
/// Files that cannot be read or decoded are logged and recorded in
/// [`ReplayBatch::skipped`]; only a missing or unreadable directory fails.
pub fn load_replay_dir<P: AsRef<Path>>(dir: P) -> Result<ReplayBatch> {
    let files = discover_replays(&dir)?;
    debug!("Found {} replay files in {}", files.len(), dir.as_ref().display());

    let mut batch = ReplayBatch::default();
    for path in files {
        match load_replay_json(&path) {
            Ok(doc) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                batch.replays.push(LoadedReplay { name, path, doc });
            }
            Err(err) if err.is_recoverable() => {
                warn!("Skipping replay: {}", err);
                batch.skipped.push(SkippedReplay { path, reason: err.to_string() });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::EventKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) {
        fs::write(dir.path().join(name), body).unwrap();
    }

    #[test]
    fn test_load_single_replay() {
        let temp_dir = TempDir::new().unwrap();
        write(
            &temp_dir,
            "m1.json",
            r#"{"duration": 300, "events": [{"type": "goal", "time": 10, "pids": [7]}]}"#,
        );

        let doc = load_replay_json(temp_dir.path().join("m1.json")).unwrap();
        assert_eq!(doc.duration, Some(300.0));
        assert_eq!(doc.events.len(), 1);
        assert_eq!(doc.events[0].kind, EventKind::Goal { team: 0 });
    }

    #[test]
    fn test_discover_only_json_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "b.json", "{}");
        write(&temp_dir, "a.json", "{}");
        write(&temp_dir, "notes.txt", "ignored");
        fs::create_dir(temp_dir.path().join("nested.json")).unwrap();

        let files = discover_replays(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "a_good.json", r#"{"events": [{"type": "respawn", "time": 1}]}"#);
        write(&temp_dir, "b_broken.json", r#"{"events": [ {"type": "#);
        write(&temp_dir, "c_good.json", r#"{"events": []}"#);

        let batch = load_replay_dir(temp_dir.path()).unwrap();
        assert_eq!(batch.files_found(), 3);
        assert_eq!(batch.replays.len(), 2);
        assert_eq!(batch.replays[0].name, "a_good.json");
        assert_eq!(batch.replays[1].name, "c_good.json");
        assert_eq!(batch.skipped.len(), 1);
        assert!(batch.skipped[0].path.ends_with("b_broken.json"));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_replay_dir(temp_dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ReplayError::MissingDirectory(_)));
    }
}
