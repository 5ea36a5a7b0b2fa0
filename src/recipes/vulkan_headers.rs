//! Recipe for the Vulkan API headers.

use crate::recipes::{
    unknown_version, BuildPlan, PackageType, Recipe, RecipeMetadata,
};
use crate::sources::SourceSpec;
use crate::util::ConfigError;

pub struct VulkanHeadersRecipe {
    metadata: RecipeMetadata,
}

impl VulkanHeadersRecipe {
    pub fn new() -> Self {
        VulkanHeadersRecipe {
            metadata: RecipeMetadata {
                name: "vulkan-headers",
                description: "Vulkan header files and API registry",
                license: "Apache-2.0",
                homepage: "https://github.com/KhronosGroup/Vulkan-Headers",
                package_type: PackageType::HeaderLibrary,
            },
        }
    }
}

impl Default for VulkanHeadersRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for VulkanHeadersRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.4.335" => Ok(SourceSpec::archive(
                "https://github.com/KhronosGroup/Vulkan-Headers/archive/refs/tags/v1.4.335.tar.gz",
                "0c2a0c83e83eb0a6a41d30ac971f3b1f1e5e0e7aab1b2334de4b8e0a7cf64b88",
                "Vulkan-Headers-1.4.335",
            )),
            _ => Err(unknown_version("vulkan-headers", version)),
        }
    }

    // Header-only; there is nothing to compile, configure generates the
    // install rules.
    fn plan(&self) -> BuildPlan {
        BuildPlan::ConfigureInstall
    }
}
