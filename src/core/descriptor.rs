//! Side-loaded dependency descriptors.
//!
//! A multi-library package (Boost) ships one descriptor file per supported
//! version, enumerating the optional sub-libraries that version provides.
//! The descriptor is loaded once at the start of a build invocation and
//! threaded through the recipe as an immutable value object; nothing here
//! caches across invocations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::util::ConfigError;

/// On-disk shape of a descriptor file: a fixed top-level key holding the
/// ordered sub-library list.
#[derive(Debug, Deserialize)]
struct DescriptorFile {
    libraries: Vec<String>,
}

/// Per-version list of sub-library names, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    version: String,
    libraries: Vec<String>,
}

impl DependencyDescriptor {
    /// Load the descriptor for `version` from `dir`.
    ///
    /// The expected filename is `<package>-<version>.toml`. A missing file
    /// is a fatal missing-resource error; a file with duplicate or zero
    /// entries is an authoring error.
    pub fn load(dir: &Path, package: &str, version: &str) -> Result<Self, ConfigError> {
        let path = dir.join(format!("{}-{}.toml", package, version));
        if !path.is_file() {
            return Err(ConfigError::MissingDescriptor { path });
        }

        let text = fs::read_to_string(&path).map_err(|e| ConfigError::MalformedDescriptor {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let file: DescriptorFile =
            toml::from_str(&text).map_err(|e| ConfigError::MalformedDescriptor {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Self::from_parts(version, file.libraries).map_err(|reason| {
            ConfigError::MalformedDescriptor {
                path,
                reason,
            }
        })
    }

    /// Build a descriptor from an in-memory list. Used by `load` and by
    /// tests that do not want to touch the filesystem.
    pub fn from_parts(
        version: impl Into<String>,
        libraries: Vec<String>,
    ) -> Result<Self, String> {
        if libraries.is_empty() {
            return Err("descriptor lists no libraries".to_string());
        }
        for (i, name) in libraries.iter().enumerate() {
            if name.is_empty() {
                return Err("descriptor contains an empty library name".to_string());
            }
            if libraries[..i].contains(name) {
                return Err(format!("descriptor lists `{}` more than once", name));
            }
        }
        Ok(DependencyDescriptor {
            version: version.into(),
            libraries,
        })
    }

    /// The package version this descriptor belongs to.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The sub-library names, in descriptor order.
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Check whether a sub-library exists in this version.
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.iter().any(|l| l == name)
    }

    /// Number of sub-libraries.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Check if the descriptor is empty (never true for a loaded one).
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Default location of the descriptor files shipped with this crate.
pub fn default_descriptor_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("descriptors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_descriptor(dir: &Path, version: &str, body: &str) {
        fs::write(dir.join(format!("boost-{}.toml", version)), body).unwrap();
    }

    #[test]
    fn test_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        write_descriptor(
            dir.path(),
            "1.89.0",
            "libraries = [\"atomic\", \"chrono\", \"json\", \"system\"]\n",
        );

        let desc = DependencyDescriptor::load(dir.path(), "boost", "1.89.0").unwrap();
        assert_eq!(desc.libraries(), ["atomic", "chrono", "json", "system"]);
        assert!(desc.contains("json"));
        assert!(!desc.contains("lockfree"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_descriptor(dir.path(), "1.89.0", "libraries = [\"json\", \"system\"]\n");

        let first = DependencyDescriptor::load(dir.path(), "boost", "1.89.0").unwrap();
        let second = DependencyDescriptor::load(dir.path(), "boost", "1.89.0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = DependencyDescriptor::load(dir.path(), "boost", "0.0.0").unwrap_err();
        assert!(matches!(err, ConfigError::MissingDescriptor { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        write_descriptor(dir.path(), "1.89.0", "not valid toml [");
        let err = DependencyDescriptor::load(dir.path(), "boost", "1.89.0").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDescriptor { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let dir = TempDir::new().unwrap();
        write_descriptor(dir.path(), "1.89.0", "libraries = [\"json\", \"json\"]\n");
        let err = DependencyDescriptor::load(dir.path(), "boost", "1.89.0").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDescriptor { .. }));
    }

    #[test]
    fn test_shipped_descriptors_parse() {
        let dir = default_descriptor_dir();
        let desc = DependencyDescriptor::load(&dir, "boost", "1.89.0").unwrap();
        assert!(desc.contains("json"));
        assert!(desc.contains("system"));
        assert!(desc.contains("regex"));
    }
}
