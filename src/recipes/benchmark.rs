//! Recipe for google/benchmark, a microbenchmark support library.

use crate::recipes::{unknown_version, BuildConfig, Recipe, RecipeContext, RecipeMetadata};
use crate::recipes::PackageType;
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct BenchmarkRecipe {
    metadata: RecipeMetadata,
}

impl BenchmarkRecipe {
    pub fn new() -> Self {
        BenchmarkRecipe {
            metadata: RecipeMetadata {
                name: "benchmark",
                description: "A microbenchmark support library",
                license: "Apache-2.0",
                homepage: "https://github.com/google/benchmark",
                package_type: PackageType::Library,
            },
        }
    }
}

impl Default for BenchmarkRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for BenchmarkRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.9.1" => Ok(SourceSpec::archive(
                "https://github.com/google/benchmark/archive/refs/tags/v1.9.1.tar.gz",
                "32131c08ee31eeff2c8968d7e874f3cb648034377dfc32a4c377fa8796d84981",
                "benchmark-1.9.1",
            )),
            _ => Err(unknown_version("benchmark", version)),
        }
    }

    fn build_config(&self, _ctx: &RecipeContext) -> anyhow::Result<BuildConfig> {
        let mut config = BuildConfig::default();
        config.variables.set_bool("BENCHMARK_ENABLE_INSTALL", true);
        config.variables.set_bool("BENCHMARK_ENABLE_TESTING", false);
        config.variables.set_bool("BENCHMARK_ENABLE_WERROR", false);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arch, OptionSet, Os, Settings};

    #[test]
    fn test_fixed_flags() {
        let recipe = BenchmarkRecipe::new();
        let ctx = RecipeContext::new(
            "1.9.1",
            Settings::new(Os::Linux, Arch::X86_64),
            OptionSet::new(),
        );
        let config = recipe.build_config(&ctx).unwrap();
        assert_eq!(config.variables.get("BENCHMARK_ENABLE_TESTING"), Some("OFF"));
        assert_eq!(config.variables.get("BENCHMARK_ENABLE_INSTALL"), Some("ON"));
        assert!(config.definitions.is_empty());
    }

    #[test]
    fn test_unknown_version() {
        let recipe = BenchmarkRecipe::new();
        assert!(matches!(
            recipe.source("0.1.0"),
            Err(ConfigError::UnknownVersion { .. })
        ));
    }
}
