//! Package layout exposed to downstream consumers.
//!
//! After a recipe builds and packages a library, it describes where
//! consumers find headers, link-time libraries, and runtime binaries,
//! optionally split into named components with inter-component
//! dependency links (e.g. the Steamworks `AppTicket` component requiring
//! `SteamAPI`).

use std::path::PathBuf;

use crate::util::ConfigError;

/// A named sub-component of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    /// Component name, unique within the package.
    pub name: String,

    /// CMake target name exported for this component.
    pub cmake_target: Option<String>,

    /// Library names (file stems) this component links.
    pub libs: Vec<String>,

    /// Link-time library directories, relative to the package root.
    pub lib_dirs: Vec<PathBuf>,

    /// Runtime binary directories, relative to the package root.
    pub bin_dirs: Vec<PathBuf>,

    /// Names of other components this one depends on.
    pub requires: Vec<String>,

    /// Library is shipped without a soname and must be linked by path.
    pub no_soname: bool,
}

impl Component {
    /// Create a component with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Component {
            name: name.into(),
            ..Component::default()
        }
    }
}

/// Directory layout of a packaged library.
///
/// All paths are relative to the package root. The default layout exposes
/// the conventional `include` / `lib` / `bin` triple; recipes add
/// platform-specific subdirectories or clear lists that do not apply
/// (header-only packages have no lib or bin dirs at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    pub bin_dirs: Vec<PathBuf>,

    /// Directories containing exported CMake package config files.
    pub build_dirs: Vec<PathBuf>,

    /// CMake file/target naming for consumers, when the package does not
    /// rely on its own installed config files.
    pub cmake_file_name: Option<String>,
    pub cmake_target_name: Option<String>,

    /// Named sub-components, empty for single-component packages.
    pub components: Vec<Component>,
}

impl Default for PackageLayout {
    fn default() -> Self {
        PackageLayout {
            include_dirs: vec![PathBuf::from("include")],
            lib_dirs: vec![PathBuf::from("lib")],
            bin_dirs: vec![PathBuf::from("bin")],
            build_dirs: Vec::new(),
            cmake_file_name: None,
            cmake_target_name: None,
            components: Vec::new(),
        }
    }
}

impl PackageLayout {
    /// The conventional include/lib/bin layout.
    pub fn base() -> Self {
        PackageLayout::default()
    }

    /// Layout for packages whose installed CMake config files drive
    /// consumption: the package root itself is the build dir and no
    /// find-module generation is wanted.
    pub fn cmake_config_driven() -> Self {
        PackageLayout {
            build_dirs: vec![PathBuf::from("")],
            ..PackageLayout::default()
        }
    }

    /// Header-only layout: includes, nothing to link or run.
    pub fn header_only() -> Self {
        PackageLayout {
            include_dirs: vec![PathBuf::from("include")],
            lib_dirs: Vec::new(),
            bin_dirs: Vec::new(),
            build_dirs: Vec::new(),
            cmake_file_name: None,
            cmake_target_name: None,
            components: Vec::new(),
        }
    }

    /// Add a component.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Check internal consistency: component names are unique and every
    /// `requires` edge points at an existing component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, component) in self.components.iter().enumerate() {
            if self.components[..i].iter().any(|c| c.name == component.name) {
                return Err(ConfigError::AuthoringMismatch(format!(
                    "duplicate component `{}`",
                    component.name
                )));
            }
            for req in &component.requires {
                if !self.components.iter().any(|c| c.name == *req) {
                    return Err(ConfigError::AuthoringMismatch(format!(
                        "component `{}` requires unknown component `{}`",
                        component.name, req
                    )));
                }
            }
        }
        Ok(())
    }
}
