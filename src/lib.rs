//! Slipway - build recipes for third-party C/C++ libraries
//!
//! This crate provides the core library functionality for Slipway: typed
//! package recipes that pin sources, declare options, translate them into
//! native build flags, and describe the packaged artifact layout, plus
//! the pipeline that drives fetching, CMake, and packaging around them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod recipes;
pub mod sources;
pub mod util;

pub use core::{
    Arch, BuildType, DependencyDescriptor, FlagSet, OptionSchema, OptionSet, Os, PackageLayout,
    Settings,
};
pub use ops::{build_package, resolve_build, BuildReport, BuildRequest};
pub use recipes::{Recipe, RecipeContext, RecipeRegistry};
pub use util::ConfigError;
