//! Recipe for SDL (Simple DirectMedia Layer).

use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::core::{DependencyDescriptor, OptionSchema};
use crate::recipes::{
    declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig, PackageType, Recipe,
    RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct SdlRecipe {
    metadata: RecipeMetadata,
}

impl SdlRecipe {
    pub fn new() -> Self {
        SdlRecipe {
            metadata: RecipeMetadata {
                name: "sdl",
                description: "Simple DirectMedia Layer, a cross-platform multimedia library",
                license: "Zlib",
                homepage: "https://github.com/libsdl-org/SDL",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for SdlRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for SdlRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn option_schema(
        &self,
        _version: &str,
        _descriptor: Option<&DependencyDescriptor>,
    ) -> Result<OptionSchema, ConfigError> {
        let mut schema = OptionSchema::new();
        declare_shared_fpic(&mut schema);
        Ok(schema)
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "3.2.20" => Ok(SourceSpec::archive(
                "https://github.com/libsdl-org/SDL/releases/download/release-3.2.20/SDL3-3.2.20.tar.gz",
                "884eda296b20ba3432552de2fa6d17901ef7c0b034100221e1b5c2b0cf13f2a3",
                "SDL3-3.2.20",
            )),
            _ => Err(unknown_version("sdl", version)),
        }
    }

    /// Cross-check the recipe version against the version macros in the
    /// fetched source tree. A mismatch means the source pin and the
    /// requested version have drifted apart.
    fn validate(&self, ctx: &RecipeContext, source_dir: &Path) -> Result<()> {
        let header = source_dir.join("include/SDL3/SDL_version.h");
        let Some(found) = extract_header_version(&header)? else {
            // Header layout changed upstream; leave it to CMake to fail.
            tracing::debug!("No SDL version header at {}", header.display());
            return Ok(());
        };

        if found != ctx.version {
            return Err(ConfigError::InvalidConfiguration(format!(
                "SDL source tree reports version {} but the recipe was asked for {}",
                found, ctx.version
            ))
            .into());
        }
        Ok(())
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        shared_fpic_flags(ctx, &mut config.variables);
        Ok(config)
    }
}

/// Extract the `MAJOR.MINOR.MICRO` version tuple from an SDL version
/// header. Returns `None` when the header is absent or carries no
/// version macros.
pub fn extract_header_version(header: &Path) -> Result<Option<String>> {
    if !header.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(header)?;

    let pattern = Regex::new(r"#define\s+SDL_(MAJOR|MINOR|MICRO)_VERSION\s+(\d+)")
        .expect("version macro pattern");

    let mut major = None;
    let mut minor = None;
    let mut micro = None;
    for capture in pattern.captures_iter(&text) {
        let value: u32 = capture[2].parse()?;
        match &capture[1] {
            "MAJOR" => major = Some(value),
            "MINOR" => minor = Some(value),
            "MICRO" => micro = Some(value),
            _ => unreachable!(),
        }
    }

    match (major, minor, micro) {
        (Some(major), Some(minor), Some(micro)) => {
            Ok(Some(format!("{}.{}.{}", major, minor, micro)))
        }
        _ => Ok(None),
    }
}
