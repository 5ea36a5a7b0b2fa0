//! Recipe for SDL_image, the SDL image file loading extension.

use std::path::Path;

use anyhow::Result;

use crate::core::{DependencyDescriptor, OptionDomain, OptionSchema};
use crate::recipes::{
    copy_license, declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig,
    PackageType, Recipe, RecipeContext, RecipeMetadata, Requirement,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

/// Image-format toggles and the cache variables they drive.
const FORMAT_OPTIONS: &[(&str, &str, bool)] = &[
    ("with_avif", "SDLIMAGE_AVIF", true),
    ("with_libjpeg", "SDLIMAGE_JPG", true),
    ("with_jxl", "SDLIMAGE_JXL", false),
    ("with_libpng", "SDLIMAGE_PNG", true),
    ("with_libtiff", "SDLIMAGE_TIF", true),
    ("with_libwebp", "SDLIMAGE_WEBP", true),
];

pub struct SdlImageRecipe {
    metadata: RecipeMetadata,
}

impl SdlImageRecipe {
    pub fn new() -> Self {
        SdlImageRecipe {
            metadata: RecipeMetadata {
                name: "sdl_image",
                description: "SDL_image is an image file loading library",
                license: "Zlib",
                homepage: "https://github.com/libsdl-org/SDL_image",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for SdlImageRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for SdlImageRecipe {
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
        for (option, _, default) in FORMAT_OPTIONS {
            schema.declare_with_default(*option, OptionDomain::Bool, *default);
        }
        Ok(schema)
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "3.2.4" => Ok(SourceSpec::archive(
                "https://github.com/libsdl-org/SDL_image/releases/download/release-3.2.4/SDL3_image-3.2.4.tar.gz",
                "8e4d33a953a6e9f0f4b00fc1dea8b01ab58e30addc25da9d9fcb0f1ef2872a1e",
                "SDL3_image-3.2.4",
            )),
            _ => Err(unknown_version("sdl_image", version)),
        }
    }

    fn requirements(&self, _ctx: &RecipeContext) -> Vec<Requirement> {
        vec![Requirement::new("sdl", ">=3.2.20")]
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        shared_fpic_flags(ctx, &mut config.variables);
        config.variables.set_bool("SDLIMAGE_DEPS_SHARED", false);
        config.variables.set_bool("SDLIMAGE_SAMPLES", false);
        config.variables.set_bool("SDLIMAGE_STRICT", true);
        for (option, variable, _) in FORMAT_OPTIONS {
            if let Some(enabled) = ctx.options.get_bool(option) {
                config.variables.set_bool(*variable, enabled);
            }
        }
        Ok(config)
    }

    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        copy_license(source_dir, package_dir, "LICENSE.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arch, OptionSet, Os, Settings};

    fn ctx(options: OptionSet) -> RecipeContext {
        let recipe = SdlImageRecipe::new();
        let schema = recipe.option_schema("3.2.4", None).unwrap();
        let resolved = schema.resolve("sdl_image", &options).unwrap();
        RecipeContext::new("3.2.4", Settings::new(Os::Linux, Arch::X86_64), resolved)
    }

    #[test]
    fn test_default_format_flags() {
        let config = SdlImageRecipe::new()
            .build_config(&ctx(OptionSet::new()))
            .unwrap();
        assert_eq!(config.variables.get("SDLIMAGE_PNG"), Some("ON"));
        assert_eq!(config.variables.get("SDLIMAGE_JXL"), Some("OFF"));
        assert_eq!(config.variables.get("SDLIMAGE_STRICT"), Some("ON"));
    }

    #[test]
    fn test_disabled_format() {
        let options = OptionSet::new().with("with_libpng", false);
        let config = SdlImageRecipe::new().build_config(&ctx(options)).unwrap();
        assert_eq!(config.variables.get("SDLIMAGE_PNG"), Some("OFF"));
    }

    #[test]
    fn test_requires_sdl() {
        let reqs = SdlImageRecipe::new().requirements(&ctx(OptionSet::new()));
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].name, "sdl");
    }
}
