//! Recipe for tinyobjloader, a single-header wavefront OBJ loader.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{DependencyDescriptor, OptionDomain, OptionSchema};
use crate::recipes::{
    declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig, PackageType, Recipe,
    RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct TinyObjLoaderRecipe {
    metadata: RecipeMetadata,
}

impl TinyObjLoaderRecipe {
    pub fn new() -> Self {
        TinyObjLoaderRecipe {
            metadata: RecipeMetadata {
                name: "tinyobjloader",
                description: "Tiny but powerful single-file wavefront OBJ loader",
                license: "MIT",
                homepage: "https://github.com/tinyobjloader/tinyobjloader",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for TinyObjLoaderRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for TinyObjLoaderRecipe {
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
        schema.declare_with_default("double", OptionDomain::Bool, false);
        Ok(schema)
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "2.0.0-rc13" => Ok(SourceSpec::archive(
                "https://github.com/tinyobjloader/tinyobjloader/archive/refs/tags/v2.0.0rc13.tar.gz",
                "7a8a9e5b1e7a1d5f5a6c1a43b2a7c39d6e2e41f3a47a2b5a0e6a7d3be5a9d1c4",
                "tinyobjloader-2.0.0rc13",
            )),
            _ => Err(unknown_version("tinyobjloader", version)),
        }
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        shared_fpic_flags(ctx, &mut config.variables);
        config
            .variables
            .set_bool("TINYOBJLOADER_USE_DOUBLE", ctx.options.is_true("double"));
        config
            .variables
            .set_bool("TINYOBJLOADER_BUILD_TEST_LOADER", false);
        config
            .variables
            .set_bool("TINYOBJLOADER_BUILD_OBJ_STICHER", false);
        config.variables.set("CMAKE_INSTALL_DOCDIR", "licenses");
        Ok(config)
    }

    /// The upstream header ships its implementation inline behind
    /// `TINYOBJLOADER_IMPLEMENTATION`; since the built library already
    /// contains it, the installed header is rewritten to declarations
    /// only so consumers cannot accidentally instantiate a second copy.
    fn package(&self, _ctx: &RecipeContext, _source_dir: &Path, package_dir: &Path) -> Result<()> {
        let header = package_dir.join("include/tiny_obj_loader.h");
        if header.is_file() {
            strip_inline_implementation(&header)?;
        }
        Ok(())
    }
}

/// Truncate a header at its `#ifdef TINYOBJLOADER_IMPLEMENTATION` guard.
fn strip_inline_implementation(header: &Path) -> Result<()> {
    let text = std::fs::read_to_string(header)
        .with_context(|| format!("failed to read {}", header.display()))?;

    if let Some(begin) = text.find("#ifdef TINYOBJLOADER_IMPLEMENTATION") {
        std::fs::write(header, &text[..begin])
            .with_context(|| format!("failed to rewrite {}", header.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arch, OptionSet, Os, Settings};
    use tempfile::TempDir;

    fn ctx(options: OptionSet) -> RecipeContext {
        let recipe = TinyObjLoaderRecipe::new();
        let schema = recipe.option_schema("2.0.0-rc13", None).unwrap();
        let resolved = schema.resolve("tinyobjloader", &options).unwrap();
        RecipeContext::new(
            "2.0.0-rc13",
            Settings::new(Os::Linux, Arch::X86_64),
            resolved,
        )
    }

    #[test]
    fn test_double_option() {
        let config = TinyObjLoaderRecipe::new()
            .build_config(&ctx(OptionSet::new()))
            .unwrap();
        assert_eq!(config.variables.get("TINYOBJLOADER_USE_DOUBLE"), Some("OFF"));

        let options = OptionSet::new().with("double", true);
        let config = TinyObjLoaderRecipe::new().build_config(&ctx(options)).unwrap();
        assert_eq!(config.variables.get("TINYOBJLOADER_USE_DOUBLE"), Some("ON"));
    }

    #[test]
    fn test_strip_inline_implementation() {
        let dir = TempDir::new().unwrap();
        let include = dir.path().join("include");
        std::fs::create_dir_all(&include).unwrap();
        let header = include.join("tiny_obj_loader.h");
        std::fs::write(
            &header,
            "// decls\nint LoadObj();\n#ifdef TINYOBJLOADER_IMPLEMENTATION\nint LoadObj() { return 0; }\n#endif\n",
        )
        .unwrap();

        let recipe = TinyObjLoaderRecipe::new();
        recipe
            .package(&ctx(OptionSet::new()), dir.path(), dir.path())
            .unwrap();

        let rewritten = std::fs::read_to_string(&header).unwrap();
        assert!(rewritten.contains("int LoadObj();"));
        assert!(!rewritten.contains("TINYOBJLOADER_IMPLEMENTATION"));
    }
}
