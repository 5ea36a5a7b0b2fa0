//! Recipe for simple_term_colors, a header-only ANSI color library.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::PackageLayout;
use crate::recipes::{
    unknown_version, BuildPlan, PackageType, Recipe, RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::fs::copy_matching;
use crate::util::ConfigError;

pub struct SimpleTermColorsRecipe {
    metadata: RecipeMetadata,
}

impl SimpleTermColorsRecipe {
    pub fn new() -> Self {
        SimpleTermColorsRecipe {
            metadata: RecipeMetadata {
                name: "simple_term_colors",
                description: "C++17 header-only library for coloring terminal output \
                              with ANSI escape sequences",
                license: "MIT",
                homepage: "https://github.com/GrinlexGH/simple_term_colors",
                package_type: PackageType::HeaderLibrary,
            },
        }
    }
}

impl Default for SimpleTermColorsRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for SimpleTermColorsRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.0.0" => Ok(SourceSpec::git(
                "https://github.com/GrinlexGH/simple_term_colors.git",
                "9a1f21b92ccbcd16a27f6e1a3f4f26b9079dbe31",
            )),
            _ => Err(unknown_version("simple_term_colors", version)),
        }
    }

    fn plan(&self) -> BuildPlan {
        BuildPlan::CopyOnly
    }

    /// Header-only with C++17 requirements; an older pinned standard
    /// cannot compile the headers.
    fn validate(&self, ctx: &RecipeContext, _source_dir: &Path) -> Result<()> {
        if let Some(cppstd) = ctx.settings.cppstd {
            // C++98 predates the year-based numbering, so it sorts above 17.
            if cppstd == 98 || cppstd < 17 {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "simple_term_colors requires C++17 or newer, profile pins C++{}",
                    cppstd
                ))
                .into());
            }
        }
        Ok(())
    }

    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        copy_matching(
            &source_dir.join("include"),
            "**/*",
            &package_dir.join("include"),
        )?;
        copy_matching(source_dir, "LICENSE*", &package_dir.join("licenses"))?;
        Ok(())
    }

    fn layout(&self, _ctx: &RecipeContext, _package_dir: &Path) -> Result<PackageLayout> {
        let mut layout = PackageLayout::header_only();
        layout.cmake_file_name = Some("simple_term_colors".to_string());
        layout.cmake_target_name = Some("stc::stc".to_string());
        layout.include_dirs = vec![PathBuf::from("include")];
        Ok(layout)
    }
}
