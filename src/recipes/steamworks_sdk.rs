//! Recipe for the Steamworks SDK wrapper.
//!
//! The SDK ships prebuilt shared libraries per platform; there is no
//! native build. Packaging copies headers and redistributable binaries,
//! and the layout exposes two components: the main `SteamAPI` library
//! and the `AppTicket` encrypted-ticket validation library, which
//! depends on it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{Arch, Component, Os, PackageLayout};
use crate::recipes::{
    unknown_version, BuildPlan, PackageType, Recipe, RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::fs::{collect_file_stems, copy_matching};
use crate::util::ConfigError;

/// Platform-specific subdirectory holding the redistributable binaries.
///
/// Unsupported (os, arch) pairs get no extra directory; consumers then
/// search only the base `bin` / `lib`.
pub fn platform_subdir(os: Os, arch: Arch) -> Option<&'static str> {
    match (os, arch) {
        (Os::Windows, Arch::X86_64) => Some("win64"),
        (Os::Windows, Arch::X86) => Some("win32"),
        (Os::Linux, Arch::X86_64) => Some("linux64"),
        (Os::Linux, Arch::X86) => Some("linux32"),
        (Os::Macos, _) => Some("osx"),
        _ => None,
    }
}

pub struct SteamworksSdkRecipe {
    metadata: RecipeMetadata,
}

impl SteamworksSdkRecipe {
    pub fn new() -> Self {
        SteamworksSdkRecipe {
            metadata: RecipeMetadata {
                name: "steamworks_sdk",
                description: "Valve's Steamworks SDK redistributables and headers",
                license: "STEAMWORKS SDK license",
                homepage: "https://github.com/rlabrecque/SteamworksSDK",
                package_type: PackageType::SharedLibrary,
            },
        }
    }

    /// Directory pair (bin, lib) exposed for the target platform,
    /// including the base directories.
    fn platform_dirs(&self, os: Os, arch: Arch) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut bin_dirs = vec![PathBuf::from("bin")];
        let mut lib_dirs = vec![PathBuf::from("lib")];
        if let Some(subdir) = platform_subdir(os, arch) {
            bin_dirs.push(PathBuf::from("bin").join(subdir));
            lib_dirs.push(PathBuf::from("lib").join(subdir));
        }
        (bin_dirs, lib_dirs)
    }
}

impl Default for SteamworksSdkRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for SteamworksSdkRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.62" => Ok(SourceSpec::git(
                "https://github.com/rlabrecque/SteamworksSDK.git",
                "52b7b2a894dfa0a296530a476b0e4edc0e57a62e",
            )),
            _ => Err(unknown_version("steamworks_sdk", version)),
        }
    }

    fn plan(&self) -> BuildPlan {
        BuildPlan::CopyOnly
    }

    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        let public = source_dir.join("public");
        let include = package_dir.join("include");
        copy_matching(&public, "**/*.h", &include)?;
        copy_matching(&public, "**/*.json", &include)?;

        // Shared libraries land under lib/, Windows DLLs under bin/.
        for redist in [
            source_dir.join("redistributable_bin"),
            source_dir.join("public/steam/lib"),
        ] {
            copy_matching(&redist, "**/*.so", &package_dir.join("lib"))?;
            copy_matching(&redist, "**/*.dylib", &package_dir.join("lib"))?;
            copy_matching(&redist, "**/*.lib", &package_dir.join("lib"))?;
            copy_matching(&redist, "**/*.dll", &package_dir.join("bin"))?;
        }
        Ok(())
    }

    fn layout(&self, ctx: &RecipeContext, package_dir: &Path) -> Result<PackageLayout> {
        let (bin_dirs, lib_dirs) = self.platform_dirs(ctx.settings.os, ctx.settings.arch);

        let mut layout = PackageLayout::base();
        layout.cmake_file_name = Some("SteamworksSDK".to_string());
        layout.cmake_target_name = Some("SteamworksSDK::SteamworksSDK".to_string());
        layout.bin_dirs = bin_dirs.clone();
        layout.lib_dirs = lib_dirs.clone();

        // Collect the packaged library names and split them into the two
        // shipped components.
        let search: Vec<PathBuf> = lib_dirs.iter().map(|d| package_dir.join(d)).collect();
        let stems = collect_file_stems(&search.iter().map(|p| p.as_path()).collect::<Vec<_>>());
        let find_lib = |needle: &str| -> Result<String, ConfigError> {
            stems
                .iter()
                .find(|s| s.contains(needle))
                .map(|s| s.trim_start_matches("lib").to_string())
                .ok_or_else(|| {
                    ConfigError::AuthoringMismatch(format!(
                        "packaged Steamworks SDK contains no `{}` library",
                        needle
                    ))
                })
        };

        let mut api = Component::new("SteamAPI");
        api.cmake_target = Some("SteamworksSDK::SteamAPI".to_string());
        api.libs = vec![find_lib("steam_api")?];
        api.bin_dirs = bin_dirs.clone();
        api.lib_dirs = lib_dirs.clone();
        layout.add_component(api);

        let mut ticket = Component::new("AppTicket");
        ticket.cmake_target = Some("SteamworksSDK::AppTicket".to_string());
        ticket.libs = vec![find_lib("sdkencryptedappticket")?];
        ticket.bin_dirs = bin_dirs;
        ticket.lib_dirs = lib_dirs;
        ticket.no_soname = true;
        ticket.requires = vec!["SteamAPI".to_string()];
        layout.add_component(ticket);

        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionSet, Settings};
    use tempfile::TempDir;

    fn ctx(os: Os, arch: Arch) -> RecipeContext {
        RecipeContext::new("1.62", Settings::new(os, arch), OptionSet::new())
    }

    fn packaged_tree(subdir: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib").join(subdir);
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(lib.join("steam_api64.lib"), "").unwrap();
        std::fs::write(lib.join("sdkencryptedappticket64.lib"), "").unwrap();
        dir
    }

    #[test]
    fn test_locator_table() {
        assert_eq!(platform_subdir(Os::Windows, Arch::X86_64), Some("win64"));
        assert_eq!(platform_subdir(Os::Windows, Arch::X86), Some("win32"));
        assert_eq!(platform_subdir(Os::Linux, Arch::X86_64), Some("linux64"));
        assert_eq!(platform_subdir(Os::Linux, Arch::X86), Some("linux32"));
        assert_eq!(platform_subdir(Os::Macos, Arch::Armv8), Some("osx"));
        assert_eq!(platform_subdir(Os::Windows, Arch::Armv8), None);
        assert_eq!(platform_subdir(Os::FreeBsd, Arch::X86_64), None);
    }

    #[test]
    fn test_layout_win64() {
        let tree = packaged_tree("win64");
        let layout = SteamworksSdkRecipe::new()
            .layout(&ctx(Os::Windows, Arch::X86_64), tree.path())
            .unwrap();

        assert_eq!(
            layout.bin_dirs,
            vec![PathBuf::from("bin"), PathBuf::from("bin/win64")]
        );
        assert_eq!(
            layout.lib_dirs,
            vec![PathBuf::from("lib"), PathBuf::from("lib/win64")]
        );

        let api = layout.component("SteamAPI").unwrap();
        assert_eq!(api.libs, vec!["steam_api64".to_string()]);

        let ticket = layout.component("AppTicket").unwrap();
        assert_eq!(ticket.libs, vec!["sdkencryptedappticket64".to_string()]);
        assert_eq!(ticket.requires, vec!["SteamAPI".to_string()]);
        assert!(ticket.no_soname);
    }

    #[test]
    fn test_layout_unsupported_arch_base_dirs_only() {
        // Libraries still live in the base lib/ for the fallback case.
        let tree = TempDir::new().unwrap();
        let lib = tree.path().join("lib");
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(lib.join("libsteam_api.so"), "").unwrap();
        std::fs::write(lib.join("libsdkencryptedappticket.so"), "").unwrap();

        let layout = SteamworksSdkRecipe::new()
            .layout(&ctx(Os::Windows, Arch::Armv8), tree.path())
            .unwrap();
        assert_eq!(layout.bin_dirs, vec![PathBuf::from("bin")]);
        assert_eq!(layout.lib_dirs, vec![PathBuf::from("lib")]);

        // `lib` prefixes are stripped from collected names.
        let api = layout.component("SteamAPI").unwrap();
        assert_eq!(api.libs, vec!["steam_api".to_string()]);
    }

    #[test]
    fn test_layout_missing_library_is_authoring_error() {
        let tree = TempDir::new().unwrap();
        let err = SteamworksSdkRecipe::new()
            .layout(&ctx(Os::Linux, Arch::X86_64), tree.path())
            .unwrap_err();
        assert!(err.to_string().contains("steam_api"));
    }

    #[test]
    fn test_package_copies_redistributables() {
        let source = TempDir::new().unwrap();
        let package = TempDir::new().unwrap();

        let public = source.path().join("public/steam");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::write(public.join("steam_api.h"), "// api").unwrap();
        let redist = source.path().join("redistributable_bin/win64");
        std::fs::create_dir_all(&redist).unwrap();
        std::fs::write(redist.join("steam_api64.dll"), "").unwrap();
        std::fs::write(redist.join("steam_api64.lib"), "").unwrap();

        let recipe = SteamworksSdkRecipe::new();
        recipe
            .package(&ctx(Os::Windows, Arch::X86_64), source.path(), package.path())
            .unwrap();

        assert!(package.path().join("include/steam/steam_api.h").exists());
        assert!(package.path().join("bin/win64/steam_api64.dll").exists());
        assert!(package.path().join("lib/win64/steam_api64.lib").exists());
    }
}
