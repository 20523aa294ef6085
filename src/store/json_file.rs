use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreError;

/// Create `path` (and its parent directory) holding `[]` if it does not exist.
pub fn ensure_array_file(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    if !path.exists() {
        std::fs::write(path, "[]").map_err(|e| io_error(path, e))?;
    }
    Ok(())
}

/// Read the whole file as a JSON array of raw values.
pub fn read_array(path: &Path) -> Result<Vec<Value>, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupted {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the file contents. Writes a sibling temp file then renames it over
/// `path`, so a reader sees either the old array or the new one.
pub fn write_array(path: &Path, items: &[Value]) -> Result<(), StoreError> {
    let encoded = serde_json::to_string_pretty(items).map_err(StoreError::Encode)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, encoded).map_err(|e| io_error(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_error(path, e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn temp_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn write_replaces_contents_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.json");
        ensure_array_file(&path).unwrap();

        write_array(&path, &[serde_json::json!({"a": 1})]).unwrap();

        assert_eq!(read_array(&path).unwrap(), vec![serde_json::json!({"a": 1})]);
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // a non-empty directory cannot be replaced by a file
        let path = dir.path().join("people.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = write_array(&path, &[]).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(temp_files(dir.path()).is_empty());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn non_array_contents_are_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(read_array(&path), Err(StoreError::Corrupted { .. })));
    }
}
