//! CMake driver for configuring, building, and installing recipe sources.
//!
//! The driver is a thin adapter: cache variables come in as a translated
//! `FlagSet`, preprocessor definitions are folded into the C/C++ flags
//! variables, and everything else is delegated to the `cmake` executable.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::{BuildType, FlagSet};
use crate::util::process::{find_cmake, ProcessBuilder};
use crate::util::{fs::ensure_dir, ConfigError};

/// CMake configure/build/install driver.
pub struct CMakeDriver {
    cmake: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    install_prefix: PathBuf,
    build_type: BuildType,
    variables: FlagSet,
    definitions: FlagSet,
    jobs: Option<usize>,
}

impl CMakeDriver {
    /// Create a new driver. Fails fast if the `cmake` executable cannot
    /// be found.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
        install_prefix: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let cmake = find_cmake().ok_or_else(|| ConfigError::ToolNotFound {
            tool: "cmake".to_string(),
            hint: "CMake is required to build this package. Install CMake and ensure it is in your PATH.".to_string(),
        })?;

        Ok(CMakeDriver {
            cmake,
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            install_prefix: install_prefix.into(),
            build_type: BuildType::default(),
            variables: FlagSet::new(),
            definitions: FlagSet::new(),
            jobs: None,
        })
    }

    /// Set the build type.
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set cache variables passed as `-D` entries.
    pub fn variables(mut self, variables: FlagSet) -> Self {
        self.variables = variables;
        self
    }

    /// Set preprocessor definitions, appended to `CMAKE_C_FLAGS` and
    /// `CMAKE_CXX_FLAGS` at configure time.
    pub fn definitions(mut self, definitions: FlagSet) -> Self {
        self.definitions = definitions;
        self
    }

    /// Set the parallel job count.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Run CMake configuration.
    pub fn configure(&self) -> Result<()> {
        tracing::info!("Configuring CMake project in {}", self.source_dir.display());

        ensure_dir(&self.build_dir)?;

        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type))
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                self.install_prefix.display()
            ));

        for arg in self.variables.to_cache_args() {
            cmd = cmd.arg(arg);
        }

        if !self.definitions.is_empty() {
            let defines = self.definitions.to_define_flags();
            cmd = cmd
                .arg(format!("-DCMAKE_C_FLAGS={}", defines))
                .arg(format!("-DCMAKE_CXX_FLAGS={}", defines));
        }

        let output = cmd.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("CMake configuration failed:\n{}", stderr);
        }

        Ok(())
    }

    /// Run the CMake build step.
    pub fn build(&self) -> Result<()> {
        tracing::info!("Building CMake project in {}", self.build_dir.display());

        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(&self.build_dir)
            .arg("--config")
            .arg(self.build_type.to_string());

        match self.jobs {
            Some(jobs) => cmd = cmd.arg("--parallel").arg(jobs.to_string()),
            None => cmd = cmd.arg("--parallel"),
        }

        let output = cmd.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("CMake build failed:\n{}", stderr);
        }

        Ok(())
    }

    /// Run the CMake install step into the install prefix.
    pub fn install(&self) -> Result<()> {
        tracing::info!("Installing CMake project to {}", self.install_prefix.display());

        ensure_dir(&self.install_prefix)?;

        let output = ProcessBuilder::new(&self.cmake)
            .arg("--install")
            .arg(&self.build_dir)
            .arg("--config")
            .arg(self.build_type.to_string())
            .exec()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("CMake install failed:\n{}", stderr);
        }

        Ok(())
    }
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cmake_project() {
        use tempfile::TempDir;

        let tmp = TempDir::new().unwrap();
        assert!(!is_cmake_project(tmp.path()));

        std::fs::write(
            tmp.path().join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.16)",
        )
        .unwrap();
        assert!(is_cmake_project(tmp.path()));
    }
}
