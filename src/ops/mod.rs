//! High-level operations: the end-to-end package build pipeline.
//!
//! `build_package` drives a recipe through the full lifecycle: descriptor
//! load, option resolution, source fetch, validation, the native build
//! phases its plan calls for, packaging, and the final layout description.
//! `resolve_build` stops after translation and is what dry runs and tests
//! use; it performs no network or toolchain work.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{is_cmake_project, CMakeDriver};
use crate::core::{OptionSet, PackageLayout, Settings};
use crate::recipes::{BuildConfig, BuildPlan, Recipe, RecipeContext, RecipeRegistry, Requirement};
use crate::util::fs::ensure_dir;
use crate::util::ConfigError;

/// A request to build one package.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub package: String,
    pub version: String,
    pub settings: Settings,
    pub options: OptionSet,
    /// Parallel build jobs. `None` lets the generator decide.
    pub jobs: Option<usize>,
}

impl BuildRequest {
    pub fn new(package: impl Into<String>, version: impl Into<String>, settings: Settings) -> Self {
        BuildRequest {
            package: package.into(),
            version: version.into(),
            settings,
            options: OptionSet::new(),
            jobs: None,
        }
    }

    /// Builder-style option assignment.
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }
}

/// The fully resolved configuration for a request, before any I/O beyond
/// reading the descriptor file.
pub struct ResolvedBuild<'a> {
    pub recipe: &'a dyn Recipe,
    pub context: RecipeContext,
    pub config: BuildConfig,
    pub requirements: Vec<Requirement>,
    pub plan: BuildPlan,
}

impl fmt::Debug for ResolvedBuild<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedBuild")
            .field("recipe", &self.recipe.metadata().name)
            .field("context", &self.context)
            .field("config", &self.config)
            .field("requirements", &self.requirements)
            .field("plan", &self.plan)
            .finish()
    }
}

/// What a completed build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub package: String,
    pub version: String,
    pub requirements: Vec<Requirement>,
    pub layout: PackageLayout,
    pub package_dir: PathBuf,
}

/// Resolve a request against the registry: load the descriptor, validate
/// the supplied options against the schema, and translate them into the
/// native build configuration.
pub fn resolve_build<'a>(
    registry: &'a RecipeRegistry,
    request: &BuildRequest,
) -> Result<ResolvedBuild<'a>> {
    let recipe = registry.get(&request.package).ok_or_else(|| {
        ConfigError::InvalidConfiguration(format!(
            "no recipe for package `{}`",
            request.package
        ))
    })?;

    let descriptor = recipe.load_descriptor(&request.version)?;
    let schema = recipe.option_schema(&request.version, descriptor.as_ref())?;
    let options = schema.resolve(&request.package, &request.options)?;

    let mut context = RecipeContext::new(&request.version, request.settings.clone(), options);
    if let Some(descriptor) = descriptor {
        context = context.with_descriptor(descriptor);
    }

    let config = recipe.build_config(&context)?;
    let requirements = recipe.requirements(&context);
    tracing::debug!(
        package = request.package,
        version = request.version,
        requirements = requirements.len(),
        "resolved build configuration"
    );

    Ok(ResolvedBuild {
        recipe,
        context,
        config,
        requirements,
        plan: recipe.plan(),
    })
}

/// Build one package under `workspace`, returning where the packaged
/// artifacts landed and the layout describing them.
///
/// The workspace gets three subdirectories: `src` for the fetched
/// sources, `build` for the native build tree, and `package` for the
/// installed artifacts.
pub fn build_package(
    registry: &RecipeRegistry,
    request: &BuildRequest,
    workspace: &Path,
) -> Result<BuildReport> {
    let resolved = resolve_build(registry, request)?;
    let recipe = resolved.recipe;

    let source_dir = workspace.join("src");
    let build_dir = workspace.join("build");
    let package_dir = workspace.join("package");
    ensure_dir(&package_dir)?;

    tracing::info!(
        package = request.package,
        version = request.version,
        "fetching sources"
    );
    let spec = recipe.source(&request.version)?;
    spec.validate()?;
    spec.fetch(&source_dir)
        .with_context(|| format!("failed to fetch sources for {}", request.package))?;

    recipe
        .validate(&resolved.context, &source_dir)
        .with_context(|| format!("configuration rejected for {}", request.package))?;

    match resolved.plan {
        BuildPlan::CopyOnly => {
            tracing::info!(package = request.package, "no native build, copying artifacts");
        }
        plan => {
            if !is_cmake_project(&source_dir) {
                return Err(ConfigError::AuthoringMismatch(format!(
                    "{} sources contain no CMakeLists.txt but the recipe plans a CMake build",
                    request.package
                ))
                .into());
            }

            let mut variables = resolved.config.variables.clone();
            if let Some(cppstd) = request.settings.cppstd {
                variables.set("CMAKE_CXX_STANDARD", cppstd.to_string());
                variables.set_bool("CMAKE_CXX_STANDARD_REQUIRED", true);
            }

            let driver = CMakeDriver::new(&source_dir, &build_dir, &package_dir)?
                .build_type(request.settings.build_type)
                .variables(variables)
                .definitions(resolved.config.definitions.clone())
                .jobs(request.jobs);

            driver.configure()?;
            if plan == BuildPlan::ConfigureBuildInstall {
                driver.build()?;
            }
            driver.install()?;
        }
    }

    recipe
        .package(&resolved.context, &source_dir, &package_dir)
        .with_context(|| format!("failed to package {}", request.package))?;

    let layout = recipe.layout(&resolved.context, &package_dir)?;
    layout.validate()?;

    tracing::info!(
        package = request.package,
        version = request.version,
        "packaged into {}",
        package_dir.display()
    );

    Ok(BuildReport {
        package: request.package.clone(),
        version: request.version.clone(),
        requirements: resolved.requirements,
        layout,
        package_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arch, Os};

    fn request(package: &str, version: &str) -> BuildRequest {
        BuildRequest::new(package, version, Settings::new(Os::Linux, Arch::X86_64))
    }

    #[test]
    fn test_resolve_simple_package() {
        let registry = RecipeRegistry::new();
        let resolved = resolve_build(&registry, &request("fmt", "12.0.0")).unwrap();

        assert_eq!(resolved.plan, BuildPlan::ConfigureBuildInstall);
        assert_eq!(resolved.config.variables.get("FMT_DOC"), Some("OFF"));
        assert!(resolved.requirements.is_empty());
    }

    #[test]
    fn test_resolved_build_debug_names_recipe() {
        let registry = RecipeRegistry::new();
        let resolved = resolve_build(&registry, &request("fmt", "12.0.0")).unwrap();
        let rendered = format!("{:?}", resolved);
        assert!(rendered.contains("fmt"));
        assert!(rendered.contains("ConfigureBuildInstall"));
    }

    #[test]
    fn test_resolve_unknown_package() {
        let registry = RecipeRegistry::new();
        let err = resolve_build(&registry, &request("nonexistent", "1.0")).unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_resolve_unknown_version() {
        let registry = RecipeRegistry::new();
        let resolved = resolve_build(&registry, &request("fmt", "0.1.0")).unwrap();
        // Version errors surface at source lookup, not at resolution.
        let err = resolved.recipe.source("0.1.0").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVersion { .. }));
    }

    #[test]
    fn test_resolve_rejects_unknown_option() {
        let registry = RecipeRegistry::new();
        let req = request("fmt", "12.0.0")
            .with_options(OptionSet::new().with("with_unicorns", true));
        let err = resolve_build(&registry, &req).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(config_err, ConfigError::UnknownOption { .. }));
    }

    #[test]
    fn test_resolve_boost_uses_shipped_descriptor() {
        let registry = RecipeRegistry::new();
        let req = request("boost", "1.89.0")
            .with_options(OptionSet::new().with("with_json", true));
        let resolved = resolve_build(&registry, &req).unwrap();

        assert!(resolved.context.descriptor.is_some());
        assert_eq!(
            resolved.config.variables.get("BOOST_INCLUDE_LIBRARIES"),
            Some("json")
        );
    }

    #[test]
    fn test_resolve_copy_only_plan() {
        let registry = RecipeRegistry::new();
        let resolved = resolve_build(&registry, &request("steamworks_sdk", "1.62")).unwrap();
        assert_eq!(resolved.plan, BuildPlan::CopyOnly);
    }
}
