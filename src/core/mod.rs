//! Core data model: options, flags, settings, descriptors, layouts.

pub mod descriptor;
pub mod flags;
pub mod layout;
pub mod options;
pub mod settings;

pub use descriptor::DependencyDescriptor;
pub use flags::FlagSet;
pub use layout::{Component, PackageLayout};
pub use options::{OptionDomain, OptionSchema, OptionSet, OptionValue};
pub use settings::{Arch, BuildType, Os, Settings};
