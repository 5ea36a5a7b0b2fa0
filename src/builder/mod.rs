//! Native build-system drivers.

pub mod cmake;

pub use cmake::{is_cmake_project, CMakeDriver};
