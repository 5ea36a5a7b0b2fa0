//! Release-archive fetching: download, digest verification, extraction.

use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

use crate::util::hash::sha256_bytes;

/// Download a gzipped tarball, verify its SHA-256, and extract it.
pub fn fetch_archive(
    url: &str,
    sha256: &str,
    strip_prefix: Option<&str>,
    dest: &Path,
) -> Result<()> {
    tracing::info!("Fetching archive from {}", url);

    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to download archive from {}", url))?;

    if !response.status().is_success() {
        bail!(
            "failed to download archive from {}: HTTP {}",
            url,
            response.status()
        );
    }

    let bytes = response
        .bytes()
        .context("failed to read archive response body")?;

    let actual = sha256_bytes(&bytes);
    if actual != sha256 {
        bail!(
            "archive hash mismatch for {}:\n  expected: {}\n  actual:   {}",
            url,
            sha256,
            actual
        );
    }
    tracing::debug!("Archive hash verified: {}", &actual[..16]);

    extract_archive(&bytes, dest, strip_prefix)
        .with_context(|| format!("failed to extract archive from {}", url))?;

    tracing::info!(
        "Extracted archive to {} (strip_prefix: {:?})",
        dest.display(),
        strip_prefix
    );

    Ok(())
}

/// Extract a gzipped tarball into `dest`.
///
/// If `strip_prefix` is given, that leading directory is removed from all
/// entry paths; upstream release tarballs conventionally wrap everything
/// in a `name-version/` root.
pub fn extract_archive(data: &[u8], dest: &Path, strip_prefix: Option<&str>) -> Result<()> {
    let decoder = GzDecoder::new(Cursor::new(data));
    let mut archive = Archive::new(decoder);

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination directory: {}", dest.display()))?;

    for entry in archive.entries().context("failed to read archive entries")? {
        let mut entry = entry.context("failed to read archive entry")?;
        let entry_path = entry.path().context("failed to get entry path")?;
        let entry_path_str = entry_path.to_string_lossy().replace('\\', "/");

        let output_path = match strip_prefix {
            Some(prefix) => {
                let prefix = prefix.trim_end_matches('/');
                if entry_path_str == prefix {
                    // The prefix directory itself.
                    continue;
                }
                let stripped = entry_path_str
                    .strip_prefix(&format!("{}/", prefix))
                    .unwrap_or(&entry_path_str);
                if stripped.is_empty() {
                    continue;
                }
                dest.join(stripped)
            }
            None => dest.join(entry_path.as_ref()),
        };

        // Reject entries that escape the destination. The output path is
        // checked before anything is created, so `..` components and
        // absolute entry names never touch the filesystem.
        let rel = output_path.strip_prefix(dest).unwrap_or(&output_path);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            bail!("archive entry escapes destination directory: {}", entry_path_str);
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        match entry.header().entry_type() {
            tar::EntryType::Directory => {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!("failed to create directory: {}", output_path.display())
                })?;
            }
            tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::Link => {
                entry.unpack(&output_path).with_context(|| {
                    format!("failed to extract file: {}", output_path.display())
                })?;
            }
            tar::EntryType::Symlink => {
                #[cfg(unix)]
                if let Ok(Some(target)) = entry.link_name() {
                    std::os::unix::fs::symlink(target.as_ref(), &output_path).with_context(
                        || format!("failed to create symlink: {}", output_path.display()),
                    )?;
                }
                #[cfg(windows)]
                tracing::debug!("Skipping symlink on Windows: {}", entry_path_str);
            }
            other => {
                tracing::debug!("Skipping unsupported entry type {:?}: {}", other, entry_path_str);
            }
        }
    }

    Ok(())
}
