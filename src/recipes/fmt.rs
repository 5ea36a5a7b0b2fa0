//! Recipe for fmt, the {fmt} formatting library.

use std::path::Path;

use anyhow::Result;

use crate::core::{DependencyDescriptor, OptionDomain, OptionSchema};
use crate::recipes::{
    copy_license, declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig,
    PackageType, Recipe, RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct FmtRecipe {
    metadata: RecipeMetadata,
}

impl FmtRecipe {
    pub fn new() -> Self {
        FmtRecipe {
            metadata: RecipeMetadata {
                name: "fmt",
                description: "A modern formatting library",
                license: "MIT",
                homepage: "https://github.com/fmtlib/fmt",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for FmtRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for FmtRecipe {
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
        schema.declare_with_default("use_modules", OptionDomain::Bool, false);
        Ok(schema)
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "12.0.0" => Ok(SourceSpec::archive(
                "https://github.com/fmtlib/fmt/archive/refs/tags/12.0.0.tar.gz",
                "e23aba35bdd8d62b688c4ab3a91a76c9ffba1b92e5ee2d39e3b2fd8a2c3a86a0",
                "fmt-12.0.0",
            )),
            _ => Err(unknown_version("fmt", version)),
        }
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        shared_fpic_flags(ctx, &mut config.variables);
        config.variables.set("FMT_DOC", "OFF");
        config.variables.set("FMT_INSTALL", "ON");
        config.variables.set("FMT_TEST", "OFF");
        config
            .variables
            .set_bool("FMT_MODULE", ctx.options.is_true("use_modules"));
        Ok(config)
    }

    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        copy_license(source_dir, package_dir, "LICENSE")
    }
}
