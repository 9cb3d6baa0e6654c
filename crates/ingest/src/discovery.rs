use crate::error::IngestError;
use std::path::{Path, PathBuf};

/// Lists the files in `directory` matching `pattern`, sorted by path.
///
/// Files whose name ends with one of `excluded_suffixes` are left out, as are
/// directories that happen to match. Unreadable entries are logged and skipped.
pub fn discover_files(
    directory: &Path,
    pattern: &str,
    excluded_suffixes: &[String],
) -> Result<Vec<PathBuf>, IngestError> {
    let full_pattern = directory.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = glob::glob(&full_pattern).map_err(|source| IngestError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "Skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(|path| !is_excluded(path, excluded_suffixes))
        .collect();
    files.sort();

    tracing::debug!(count = files.len(), pattern = %full_pattern, "Discovered files");
    Ok(files)
}

fn is_excluded(path: &Path, excluded_suffixes: &[String]) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    excluded_suffixes
        .iter()
        .any(|suffix| !suffix.is_empty() && name.ends_with(suffix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "amazon-order-id\n").unwrap();
    }

    #[test]
    fn matches_sorted_and_skips_excluded_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "orders_march.txt");
        touch(dir.path(), "orders_january.txt");
        touch(dir.path(), "requirements_file.txt");
        touch(dir.path(), "notes.csv");

        let files = discover_files(dir.path(), "*.txt", &["file.txt".to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["orders_january.txt", "orders_march.txt"]);
    }

    #[test]
    fn matching_directories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("archive.txt")).unwrap();
        touch(dir.path(), "a.txt");

        let files = discover_files(dir.path(), "*.txt", &[]).unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt")]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_files(dir.path(), "[", &[]).unwrap_err();
        assert!(matches!(err, IngestError::Pattern { .. }));
    }
}
