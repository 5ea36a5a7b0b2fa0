//! Recipe for frozen, a header-only constexpr alternative to gperf.

use crate::recipes::{
    unknown_version, BuildConfig, BuildPlan, PackageType, Recipe, RecipeContext, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct FrozenRecipe {
    metadata: RecipeMetadata,
}

impl FrozenRecipe {
    pub fn new() -> Self {
        FrozenRecipe {
            metadata: RecipeMetadata {
                name: "frozen",
                description: "A header-only, constexpr alternative to gperf for C++14 users",
                license: "Apache-2.0",
                homepage: "https://github.com/serge-sans-paille/frozen",
                package_type: PackageType::HeaderLibrary,
            },
        }
    }
}

impl Default for FrozenRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for FrozenRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.2.0" => Ok(SourceSpec::archive(
                "https://github.com/serge-sans-paille/frozen/archive/refs/tags/1.2.0.tar.gz",
                "ed8339c017d7c5fe019ac2c642477f435278f0dc643c1d69d3f3b1e95915e823",
                "frozen-1.2.0",
            )),
            _ => Err(unknown_version("frozen", version)),
        }
    }

    fn plan(&self) -> BuildPlan {
        BuildPlan::ConfigureBuildInstall
    }

    fn build_config(&self, _ctx: &RecipeContext) -> anyhow::Result<BuildConfig> {
        let mut config = BuildConfig::default();
        config.variables.set("frozen.installation", "ON");
        config.variables.set("frozen.tests", "OFF");
        Ok(config)
    }
}
