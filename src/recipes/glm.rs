//! Recipe for GLM, the OpenGL Mathematics library.

use std::path::Path;

use anyhow::Result;

use crate::core::{DependencyDescriptor, OptionSchema};
use crate::recipes::{
    copy_license, declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig,
    PackageType, Recipe, RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct GlmRecipe {
    metadata: RecipeMetadata,
}

impl GlmRecipe {
    pub fn new() -> Self {
        GlmRecipe {
            metadata: RecipeMetadata {
                name: "glm",
                description: "OpenGL Mathematics, a header-friendly C++ mathematics library",
                license: "MIT",
                homepage: "https://github.com/g-truc/glm",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for GlmRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for GlmRecipe {
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
            "1.0.1" => Ok(SourceSpec::archive(
                "https://github.com/g-truc/glm/archive/refs/tags/1.0.1.tar.gz",
                "9f3174561fd26904b23f0db5e560971cbf9b3cbda0b280f04d5c379d03bf234c",
                "glm-1.0.1",
            )),
            _ => Err(unknown_version("glm", version)),
        }
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        shared_fpic_flags(ctx, &mut config.variables);
        config.variables.set_bool("GLM_BUILD_LIBRARY", true);
        config.variables.set_bool("GLM_BUILD_TESTS", false);
        config.variables.set_bool("GLM_BUILD_INSTALL", true);

        // Enable the highest language level the profile's C++ standard
        // covers; without a pinned standard GLM's own default applies.
        if let Some(cppstd) = ctx.settings.cppstd {
            let ladder = [
                (20, "GLM_ENABLE_CXX_20"),
                (17, "GLM_ENABLE_CXX_17"),
                (14, "GLM_ENABLE_CXX_14"),
                (11, "GLM_ENABLE_CXX_11"),
                (98, "GLM_ENABLE_CXX_98"),
            ];
            // C++98 sorts after the year-2000 standards numerically; treat
            // it as the floor instead.
            let effective = if cppstd == 98 { 0 } else { cppstd };
            for (year, flag) in ladder {
                let threshold = if year == 98 { 0 } else { year };
                if effective >= threshold {
                    config.variables.set_bool(flag, true);
                    break;
                }
            }
        }

        Ok(config)
    }

    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        copy_license(source_dir, package_dir, "copying.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arch, OptionSet, Os, Settings};

    fn ctx(cppstd: Option<u32>) -> RecipeContext {
        let mut settings = Settings::new(Os::Linux, Arch::X86_64);
        settings.cppstd = cppstd;
        let recipe = GlmRecipe::new();
        let schema = recipe.option_schema("1.0.1", None).unwrap();
        let resolved = schema.resolve("glm", &OptionSet::new()).unwrap();
        RecipeContext::new("1.0.1", settings, resolved)
    }

    #[test]
    fn test_cppstd_ladder() {
        let config = GlmRecipe::new().build_config(&ctx(Some(20))).unwrap();
        assert_eq!(config.variables.get("GLM_ENABLE_CXX_20"), Some("ON"));
        assert!(!config.variables.contains("GLM_ENABLE_CXX_17"));

        let config = GlmRecipe::new().build_config(&ctx(Some(17))).unwrap();
        assert_eq!(config.variables.get("GLM_ENABLE_CXX_17"), Some("ON"));

        let config = GlmRecipe::new().build_config(&ctx(Some(98))).unwrap();
        assert_eq!(config.variables.get("GLM_ENABLE_CXX_98"), Some("ON"));
    }

    #[test]
    fn test_no_cppstd_no_ladder_flag() {
        let config = GlmRecipe::new().build_config(&ctx(None)).unwrap();
        for flag in [
            "GLM_ENABLE_CXX_20",
            "GLM_ENABLE_CXX_17",
            "GLM_ENABLE_CXX_14",
            "GLM_ENABLE_CXX_11",
            "GLM_ENABLE_CXX_98",
        ] {
            assert!(!config.variables.contains(flag));
        }
    }
}
