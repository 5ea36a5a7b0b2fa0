//! Recipe for VulkanMemoryAllocator-Hpp, C++ bindings for VMA.

use anyhow::Result;

use crate::recipes::{
    unknown_version, BuildConfig, BuildPlan, PackageType, Recipe, RecipeContext, RecipeMetadata,
    Requirement,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct VulkanMemoryAllocatorRecipe {
    metadata: RecipeMetadata,
}

impl VulkanMemoryAllocatorRecipe {
    pub fn new() -> Self {
        VulkanMemoryAllocatorRecipe {
            metadata: RecipeMetadata {
                name: "vulkan-memory-allocator-hpp",
                description: "C++ bindings for VulkanMemoryAllocator",
                license: "CC0-1.0",
                homepage: "https://github.com/YaaZ/VulkanMemoryAllocator-Hpp",
                package_type: PackageType::HeaderLibrary,
            },
        }
    }
}

impl Default for VulkanMemoryAllocatorRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for VulkanMemoryAllocatorRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        // Tagged releases ship as archives; development pins track a
        // commit because the project vendors VMA as a submodule.
        match version {
            "3.2.1" => Ok(SourceSpec::git(
                "https://github.com/YaaZ/VulkanMemoryAllocator-Hpp.git",
                "4f87e33e9fcd348b8bc7a7709fc2a77ab09a2e27",
            )),
            _ => Err(unknown_version("vulkan-memory-allocator-hpp", version)),
        }
    }

    fn requirements(&self, _ctx: &RecipeContext) -> Vec<Requirement> {
        vec![Requirement::new("vulkan-headers", ">=1.4.335")]
    }

    fn plan(&self) -> BuildPlan {
        BuildPlan::ConfigureInstall
    }

    fn build_config(&self, _ctx: &RecipeContext) -> Result<BuildConfig> {
        let mut config = BuildConfig::default();
        config.variables.set_bool("VMA_HPP_GENERATOR_BUILD", false);
        config.variables.set_bool("VMA_HPP_RUN_GENERATOR", false);
        config.variables.set_bool("VMA_HPP_SAMPLES_BUILD", false);
        config.variables.set("VMA_HPP_VULKAN_REVISION", "system");
        config.variables.set_bool("VMA_HPP_ENABLE_INSTALL", true);
        config.variables.set_bool("VMA_ENABLE_INSTALL", true);
        Ok(config)
    }
}
