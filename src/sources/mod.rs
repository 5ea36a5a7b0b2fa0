//! Source retrieval: where a recipe's upstream code comes from.
//!
//! A recipe pins each supported version to exactly one source: a release
//! archive (URL plus SHA-256) or a git repository at a fixed commit.
//! Fetching is a blocking, single-shot operation; failures abort the
//! build configuration.

pub mod archive;
pub mod git;

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::ConfigError;

/// Specification of a package version's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A release tarball, verified against a SHA-256 digest.
    Archive {
        url: String,
        sha256: String,
        /// Leading directory to strip during extraction, e.g.
        /// `fmt-12.0.0`.
        strip_prefix: Option<String>,
    },

    /// A git repository pinned to a commit.
    Git { url: String, commit: String },
}

impl SourceSpec {
    /// Archive source with a stripped root directory.
    pub fn archive(url: &str, sha256: &str, strip_prefix: &str) -> Self {
        SourceSpec::Archive {
            url: url.to_string(),
            sha256: sha256.to_string(),
            strip_prefix: Some(strip_prefix.to_string()),
        }
    }

    /// Git source pinned to a commit.
    pub fn git(url: &str, commit: &str) -> Self {
        SourceSpec::Git {
            url: url.to_string(),
            commit: commit.to_string(),
        }
    }

    /// Check the spec is well-formed: parseable URL, 64-hex digest or
    /// full-length commit hash. Recipe data is authored by hand, so this
    /// runs before any network traffic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SourceSpec::Archive { url, sha256, .. } => {
                url::Url::parse(url).map_err(|e| {
                    ConfigError::AuthoringMismatch(format!("invalid source URL `{}`: {}", url, e))
                })?;
                if sha256.len() != 64 || !sha256.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ConfigError::AuthoringMismatch(format!(
                        "source sha256 must be a 64-character hex string, got `{}`",
                        sha256
                    )));
                }
            }
            SourceSpec::Git { url, commit } => {
                url::Url::parse(url).map_err(|e| {
                    ConfigError::AuthoringMismatch(format!("invalid source URL `{}`: {}", url, e))
                })?;
                if commit.len() != 40 || !commit.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ConfigError::AuthoringMismatch(format!(
                        "source commit must be a 40-character hex string, got `{}`",
                        commit
                    )));
                }
            }
        }
        Ok(())
    }

    /// Fetch this source into `dest`.
    pub fn fetch(&self, dest: &Path) -> Result<()> {
        self.validate()
            .context("refusing to fetch a malformed source spec")?;
        match self {
            SourceSpec::Archive {
                url,
                sha256,
                strip_prefix,
            } => archive::fetch_archive(url, sha256, strip_prefix.as_deref(), dest),
            SourceSpec::Git { url, commit } => git::fetch_git(url, commit, dest),
        }
    }
}
