//! Integration tests exercising recipe behavior through the public API.
//!
//! No test here touches the network or external tools; everything runs
//! through option resolution and flag translation.

use slipway::core::{Arch, DependencyDescriptor, Os, Settings};
use slipway::recipes::steamworks_sdk::platform_subdir;
use slipway::{resolve_build, BuildRequest, ConfigError, OptionSet, RecipeRegistry};

fn linux_request(package: &str, version: &str) -> BuildRequest {
    BuildRequest::new(package, version, Settings::new(Os::Linux, Arch::X86_64))
}

#[test]
fn absent_boolean_options_emit_no_flag() {
    // An option the caller leaves unset, with no declared default, must
    // not reach the translated flag set; the tool default stays in force.
    let registry = RecipeRegistry::new();
    let resolved = resolve_build(&registry, &linux_request("boost", "1.89.0")).unwrap();

    assert!(!resolved.config.variables.contains("BOOST_IOSTREAMS_ENABLE_ZLIB"));
    assert!(!resolved.config.variables.contains("BOOST_LOCALE_ENABLE_ICU"));
    assert!(!resolved.config.variables.contains("BOOST_RUNTIME_LINK"));

    // Declared defaults still translate.
    assert_eq!(
        resolved.config.definitions.get("BOOST_ASIO_NO_DEPRECATED"),
        Some("1")
    );
}

#[test]
fn boost_include_exclude_overlap_rejected() {
    let registry = RecipeRegistry::new();
    let request = linux_request("boost", "1.89.0").with_options(
        OptionSet::new()
            .with("with_system", true)
            .with("without_system", true),
    );
    let err = resolve_build(&registry, &request).unwrap_err();
    assert!(err.to_string().contains("system"));
}

#[test]
fn boost_include_list_follows_descriptor_order() {
    let registry = RecipeRegistry::new();
    let request = linux_request("boost", "1.89.0").with_options(
        OptionSet::new()
            .with("with_json", true)
            .with("with_regex", false)
            .with("with_system", true),
    );
    let resolved = resolve_build(&registry, &request).unwrap();

    assert_eq!(
        resolved.config.variables.get("BOOST_INCLUDE_LIBRARIES"),
        Some("json;system")
    );
    assert!(!resolved.config.variables.contains("BOOST_EXCLUDE_LIBRARIES"));
}

#[test]
fn locator_entries_yield_distinct_nonempty_dirs() {
    let supported = [
        (Os::Windows, Arch::X86_64),
        (Os::Windows, Arch::X86),
        (Os::Linux, Arch::X86_64),
        (Os::Linux, Arch::X86),
        (Os::Macos, Arch::X86_64),
        (Os::Macos, Arch::Armv8),
    ];

    let mut seen = Vec::new();
    for (os, arch) in supported {
        let subdir = platform_subdir(os, arch).unwrap();
        assert!(!subdir.is_empty());
        if !seen.contains(&subdir) {
            seen.push(subdir);
        }
    }
    // win64, win32, linux64, linux32, osx.
    assert_eq!(seen.len(), 5);
}

#[test]
fn descriptor_loading_is_idempotent() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("boost").unwrap();

    let first = recipe.load_descriptor("1.89.0").unwrap().unwrap();
    let second = recipe.load_descriptor("1.89.0").unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.libraries(), second.libraries());
}

#[test]
fn per_version_descriptor_prunes_options() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("boost").unwrap();

    let old = recipe.load_descriptor("1.88.0").unwrap().unwrap();
    let new = recipe.load_descriptor("1.89.0").unwrap().unwrap();
    assert!(new.contains("bloom"));
    assert!(!old.contains("bloom"));

    // The pruned option is unknown for the version that lacks the
    // sub-library, and valid for the one that has it.
    let request = BuildRequest::new(
        "boost",
        "1.88.0",
        Settings::new(Os::Linux, Arch::X86_64),
    )
    .with_options(OptionSet::new().with("with_bloom", true));
    let err = resolve_build(&registry, &request).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::UnknownOption { .. }));

    let request = linux_request("boost", "1.89.0")
        .with_options(OptionSet::new().with("with_bloom", true));
    resolve_build(&registry, &request).unwrap();
}

#[test]
fn steamworks_platform_dirs() {
    assert_eq!(platform_subdir(Os::Windows, Arch::X86_64), Some("win64"));
    assert_eq!(platform_subdir(Os::Linux, Arch::X86), Some("linux32"));
    // Unsupported arch on a supported OS: no platform subdirectory.
    assert_eq!(platform_subdir(Os::Windows, Arch::Armv8), None);
    assert_eq!(platform_subdir(Os::Linux, Arch::Armv7), None);
}

#[test]
fn shipped_descriptors_match_option_tables() {
    // Descriptor data files and the recipes that consume them are
    // authored separately; resolving with defaults must succeed for
    // every shipped version.
    let registry = RecipeRegistry::new();
    for version in ["1.88.0", "1.89.0"] {
        let request = linux_request("boost", version);
        let resolved = resolve_build(&registry, &request).unwrap();
        let descriptor: &DependencyDescriptor =
            resolved.context.descriptor.as_ref().unwrap();
        assert!(descriptor.contains("system"));
    }
}

#[test]
fn conditional_requirements_follow_options() {
    let registry = RecipeRegistry::new();

    let bare = resolve_build(&registry, &linux_request("boost", "1.89.0")).unwrap();
    assert!(bare.requirements.is_empty());

    let request = linux_request("boost", "1.89.0").with_options(
        OptionSet::new()
            .with("iostreams_zlib", true)
            .with("locale_icu", true),
    );
    let resolved = resolve_build(&registry, &request).unwrap();
    let names: Vec<_> = resolved.requirements.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zlib", "icu"]);
}

#[test]
fn every_registered_recipe_resolves_with_defaults() {
    let registry = RecipeRegistry::new();
    let versions = [
        ("benchmark", "1.9.1"),
        ("boost", "1.89.0"),
        ("fmt", "12.0.0"),
        ("frozen", "1.2.0"),
        ("glm", "1.0.1"),
        ("sdl", "3.2.20"),
        ("sdl_image", "3.2.4"),
        ("simple_term_colors", "1.0.0"),
        ("steamworks_sdk", "1.62"),
        ("tinyobjloader", "2.0.0-rc13"),
        ("vulkan-headers", "1.4.335"),
        ("vulkan-memory-allocator-hpp", "3.2.1"),
    ];

    for (package, version) in versions {
        let request = linux_request(package, version);
        let resolved = resolve_build(&registry, &request).unwrap();
        resolved.recipe.source(version).unwrap().validate().unwrap();
    }
}
