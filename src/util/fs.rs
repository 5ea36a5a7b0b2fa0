//! Filesystem utilities for recipe packaging steps.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Copy files under `src` whose path relative to `src` matches `pattern`
/// into `dst`, preserving the relative directory structure.
///
/// Patterns follow glob syntax and match the whole relative path, so
/// `*.h` matches headers at the top level while `**/*.h` matches headers
/// anywhere under `src`. Returns the number of files copied. A `src` that
/// does not exist copies nothing; packaging treats that as "no artifacts
/// of this kind", not an error.
pub fn copy_matching(src: &Path, pattern: &str, dst: &Path) -> Result<usize> {
    if !src.exists() {
        return Ok(0);
    }

    let pattern =
        Pattern::new(pattern).with_context(|| format!("invalid copy pattern `{}`", pattern))?;

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir entry outside of root");
        if !pattern.matches_path(rel) {
            continue;
        }

        let dst_path = dst.join(rel);
        if let Some(parent) = dst_path.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(entry.path(), &dst_path).with_context(|| {
            format!(
                "failed to copy {} to {}",
                entry.path().display(),
                dst_path.display()
            )
        })?;
        copied += 1;
    }

    Ok(copied)
}

/// List the file stems of regular files directly under each of the given
/// directories. Used to collect built library names from a package tree.
pub fn collect_file_stems(dirs: &[&Path]) -> Vec<String> {
    let mut stems = Vec::new();
    for dir in dirs {
        if !dir.exists() {
            continue;
        }
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    stems
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_matching_preserves_structure() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::create_dir_all(src.path().join("steam/lib")).unwrap();
        fs::write(src.path().join("steam_api.h"), "// header").unwrap();
        fs::write(src.path().join("steam/lib/inner.h"), "// header").unwrap();
        fs::write(src.path().join("notes.txt"), "text").unwrap();

        let copied = copy_matching(src.path(), "**/*.h", dst.path()).unwrap();
        assert_eq!(copied, 2);
        assert!(dst.path().join("steam_api.h").exists());
        assert!(dst.path().join("steam/lib/inner.h").exists());
        assert!(!dst.path().join("notes.txt").exists());
    }

    #[test]
    fn test_copy_matching_missing_src() {
        let dst = TempDir::new().unwrap();
        let copied = copy_matching(Path::new("/nonexistent/source"), "*.h", dst.path()).unwrap();
        assert_eq!(copied, 0);
    }

    #[test]
    fn test_collect_file_stems() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("libsteam_api.so"), "").unwrap();
        fs::write(dir.path().join("libsdkencryptedappticket.so"), "").unwrap();

        let stems = collect_file_stems(&[dir.path()]);
        assert!(stems.iter().any(|s| s.contains("steam_api")));
        assert!(stems.iter().any(|s| s.contains("sdkencryptedappticket")));
    }
}
