//! Package recipes.
//!
//! A recipe is a thin, declarative adapter for one third-party library:
//! it declares the package's options, pins each supported version to a
//! source, translates resolved options into native build flags, and
//! describes the packaged artifact layout. Recipes never execute the
//! build themselves; the ops pipeline drives fetching and CMake around
//! them.

pub mod benchmark;
pub mod boost;
pub mod fmt;
pub mod frozen;
pub mod glm;
pub mod sdl;
pub mod sdl_image;
pub mod simple_term_colors;
pub mod steamworks_sdk;
pub mod tinyobjloader;
pub mod vulkan_headers;
pub mod vulkan_memory_allocator;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::core::{
    DependencyDescriptor, FlagSet, OptionSchema, OptionSet, PackageLayout, Settings,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

/// How a package is consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    /// Compiled library, static or shared per options.
    Library,
    /// Prebuilt shared library, no compile step.
    SharedLibrary,
    /// Header-only library.
    HeaderLibrary,
}

/// Static recipe identity and provenance.
#[derive(Debug, Clone)]
pub struct RecipeMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    pub homepage: &'static str,
    pub package_type: PackageType,
}

/// Which build phases a recipe needs from the CMake driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPlan {
    /// Configure, build, and install.
    ConfigureBuildInstall,
    /// Configure and install only (header-only CMake packages).
    ConfigureInstall,
    /// No native build system at all; packaging copies files directly.
    CopyOnly,
}

/// A runtime requirement on another package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub req: semver::VersionReq,
    /// Headers and libraries of the requirement are visible to this
    /// package's own consumers.
    pub transitive: bool,
}

impl Requirement {
    /// Requirement with a version range, e.g. `>=1.3.1`.
    pub fn new(name: &str, req: &str) -> Self {
        Requirement {
            name: name.to_string(),
            req: semver::VersionReq::parse(req)
                .unwrap_or_else(|_| panic!("invalid version requirement `{}`", req)),
            transitive: false,
        }
    }

    /// Mark headers/libs as transitively visible.
    pub fn transitive(mut self) -> Self {
        self.transitive = true;
        self
    }
}

/// Everything a recipe sees for one build invocation: the requested
/// version, the target environment, the resolved options, and (for
/// multi-library packages) the side-loaded dependency descriptor. Built
/// once at the start of the invocation and passed around immutably.
#[derive(Debug, Clone)]
pub struct RecipeContext {
    pub version: String,
    pub settings: Settings,
    pub options: OptionSet,
    pub descriptor: Option<DependencyDescriptor>,
}

impl RecipeContext {
    /// Context without a descriptor (most packages).
    pub fn new(version: impl Into<String>, settings: Settings, options: OptionSet) -> Self {
        RecipeContext {
            version: version.into(),
            settings,
            options,
            descriptor: None,
        }
    }

    /// Attach a dependency descriptor.
    pub fn with_descriptor(mut self, descriptor: DependencyDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}

/// Translated build configuration: CMake cache variables plus
/// preprocessor definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub variables: FlagSet,
    pub definitions: FlagSet,
}

/// The recipe interface.
///
/// Defaults cover the common case (no options, no requirements, full
/// configure/build/install, license-only packaging); each recipe
/// overrides only what its package needs.
pub trait Recipe: Send + Sync {
    /// Static identity of the packaged library.
    fn metadata(&self) -> &RecipeMetadata;

    /// Load side-loaded per-version metadata, if this recipe has any.
    fn load_descriptor(&self, _version: &str) -> Result<Option<DependencyDescriptor>, ConfigError> {
        Ok(None)
    }

    /// Declared option surface for the given version.
    fn option_schema(
        &self,
        _version: &str,
        _descriptor: Option<&DependencyDescriptor>,
    ) -> Result<OptionSchema, ConfigError> {
        Ok(OptionSchema::new())
    }

    /// Source pin for the given version.
    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError>;

    /// Requirements on other packages implied by the resolved options.
    fn requirements(&self, _ctx: &RecipeContext) -> Vec<Requirement> {
        Vec::new()
    }

    /// Which build phases this recipe uses.
    fn plan(&self) -> BuildPlan {
        BuildPlan::ConfigureBuildInstall
    }

    /// Validate the resolved configuration against the fetched source
    /// and the target environment. Runs after fetch, before configure.
    fn validate(&self, _ctx: &RecipeContext, _source_dir: &Path) -> Result<()> {
        Ok(())
    }

    /// Translate the resolved options into native build flags.
    fn build_config(&self, _ctx: &RecipeContext) -> Result<BuildConfig> {
        Ok(BuildConfig::default())
    }

    /// Copy artifacts and licenses into the package directory. Runs after
    /// the native install step (or instead of it for copy-only recipes).
    fn package(&self, _ctx: &RecipeContext, source_dir: &Path, package_dir: &Path) -> Result<()> {
        copy_license(source_dir, package_dir, "LICENSE*")
    }

    /// Describe the packaged layout for downstream consumers.
    fn layout(&self, _ctx: &RecipeContext, _package_dir: &Path) -> Result<PackageLayout> {
        Ok(PackageLayout::cmake_config_driven())
    }
}

/// Copy license files matching `pattern` from the source tree into the
/// conventional `licenses/` directory of the package.
pub(crate) fn copy_license(source_dir: &Path, package_dir: &Path, pattern: &str) -> Result<()> {
    crate::util::fs::copy_matching(source_dir, pattern, &package_dir.join("licenses"))?;
    Ok(())
}

/// Declare the conventional `shared` / `fPIC` option pair.
pub(crate) fn declare_shared_fpic(schema: &mut OptionSchema) {
    use crate::core::OptionDomain;
    schema.declare_with_default("shared", OptionDomain::Bool, false);
    schema.declare_with_default("fPIC", OptionDomain::Bool, true);
}

/// Translate the `shared` / `fPIC` pair into CMake flags.
///
/// `fPIC` only matters for static builds on non-Windows targets; in the
/// other cases the flag is dropped so the tool default prevails.
pub(crate) fn shared_fpic_flags(ctx: &RecipeContext, flags: &mut FlagSet) {
    use crate::core::Os;

    let shared = ctx.options.is_true("shared");
    flags.set_bool("BUILD_SHARED_LIBS", shared);

    if !shared && ctx.settings.os != Os::Windows {
        if let Some(fpic) = ctx.options.get_bool("fPIC") {
            flags.set_bool("CMAKE_POSITION_INDEPENDENT_CODE", fpic);
        }
    }
}

/// Build the unknown-version error for a recipe.
pub(crate) fn unknown_version(package: &str, version: &str) -> ConfigError {
    ConfigError::UnknownVersion {
        package: package.to_string(),
        version: version.to_string(),
    }
}

/// Registry of all built-in recipes, keyed by package name.
///
/// Construction never fails and performs no I/O; descriptor files and
/// external tools are only touched when a recipe is actually driven.
pub struct RecipeRegistry {
    recipes: BTreeMap<&'static str, Box<dyn Recipe>>,
}

impl RecipeRegistry {
    /// Create a registry with all built-in recipes.
    pub fn new() -> Self {
        let mut registry = RecipeRegistry {
            recipes: BTreeMap::new(),
        };

        registry.register(Box::new(benchmark::BenchmarkRecipe::new()));
        registry.register(Box::new(boost::BoostRecipe::new()));
        registry.register(Box::new(fmt::FmtRecipe::new()));
        registry.register(Box::new(frozen::FrozenRecipe::new()));
        registry.register(Box::new(glm::GlmRecipe::new()));
        registry.register(Box::new(sdl::SdlRecipe::new()));
        registry.register(Box::new(sdl_image::SdlImageRecipe::new()));
        registry.register(Box::new(simple_term_colors::SimpleTermColorsRecipe::new()));
        registry.register(Box::new(steamworks_sdk::SteamworksSdkRecipe::new()));
        registry.register(Box::new(tinyobjloader::TinyObjLoaderRecipe::new()));
        registry.register(Box::new(vulkan_headers::VulkanHeadersRecipe::new()));
        registry.register(Box::new(
            vulkan_memory_allocator::VulkanMemoryAllocatorRecipe::new(),
        ));

        registry
    }

    /// Register a recipe, replacing any previous one with the same name.
    pub fn register(&mut self, recipe: Box<dyn Recipe>) {
        let name = recipe.metadata().name;
        self.recipes.insert(name, recipe);
    }

    /// Look up a recipe by package name.
    pub fn get(&self, name: &str) -> Option<&dyn Recipe> {
        self.recipes.get(name).map(|r| r.as_ref())
    }

    /// Iterate over registered package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.recipes.keys().copied()
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_recipes() {
        let registry = RecipeRegistry::new();
        assert_eq!(registry.len(), 12);
        for name in [
            "benchmark",
            "boost",
            "fmt",
            "frozen",
            "glm",
            "sdl",
            "sdl_image",
            "simple_term_colors",
            "steamworks_sdk",
            "tinyobjloader",
            "vulkan-headers",
            "vulkan-memory-allocator-hpp",
        ] {
            assert!(registry.get(name).is_some(), "missing recipe: {}", name);
        }
    }

    #[test]
    fn test_registry_names_sorted() {
        let registry = RecipeRegistry::new();
        let names: Vec<_> = registry.names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_requirement_parsing() {
        let req = Requirement::new("zlib", ">=1.3.1");
        assert_eq!(req.name, "zlib");
        assert!(!req.transitive);
        assert!(req.req.matches(&semver::Version::new(1, 3, 1)));

        let req = Requirement::new("libbacktrace", "*").transitive();
        assert!(req.transitive);
    }
}
