//! Target environment settings: operating system, architecture, build type.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    Android,
    Ios,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Windows => write!(f, "Windows"),
            Os::Linux => write!(f, "Linux"),
            Os::Macos => write!(f, "Macos"),
            Os::FreeBsd => write!(f, "FreeBSD"),
            Os::Android => write!(f, "Android"),
            Os::Ios => write!(f, "iOS"),
        }
    }
}

impl FromStr for Os {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" | "osx" => Ok(Os::Macos),
            "freebsd" => Ok(Os::FreeBsd),
            "android" => Ok(Os::Android),
            "ios" => Ok(Os::Ios),
            _ => Err(SettingParseError {
                setting: "os",
                value: s.to_string(),
                valid: "windows, linux, macos, freebsd, android, ios",
            }),
        }
    }
}

/// Target processor architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86 => write!(f, "x86"),
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Armv7 => write!(f, "armv7"),
            Arch::Armv8 => write!(f, "armv8"),
        }
    }
}

impl FromStr for Arch {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "armv7" | "arm" => Ok(Arch::Armv7),
            "armv8" | "arm64" | "aarch64" => Ok(Arch::Armv8),
            _ => Err(SettingParseError {
                setting: "arch",
                value: s.to_string(),
                valid: "x86, x86_64, armv7, armv8",
            }),
        }
    }
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
            BuildType::RelWithDebInfo => write!(f, "RelWithDebInfo"),
            BuildType::MinSizeRel => write!(f, "MinSizeRel"),
        }
    }
}

impl FromStr for BuildType {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(SettingParseError {
                setting: "build_type",
                value: s.to_string(),
                valid: "Debug, Release, RelWithDebInfo, MinSizeRel",
            }),
        }
    }
}

/// Error returned when parsing an invalid setting value.
#[derive(Debug, Clone, Error)]
#[error("invalid {setting} `{value}`, valid values: {valid}")]
pub struct SettingParseError {
    setting: &'static str,
    value: String,
    valid: &'static str,
}

/// Resolved environment settings for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    pub build_type: BuildType,

    /// C++ standard year requested by the profile, if any (98, 11, 14, 17,
    /// 20, 23). Recipes that key flags off the standard treat absence as
    /// "let the build system decide".
    pub cppstd: Option<u32>,
}

impl Settings {
    /// Create settings with the default (release) build type and no
    /// pinned C++ standard.
    pub fn new(os: Os, arch: Arch) -> Self {
        Settings {
            os,
            arch,
            build_type: BuildType::default(),
            cppstd: None,
        }
    }

    /// Set the build type.
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the C++ standard year.
    pub fn with_cppstd(mut self, cppstd: u32) -> Self {
        self.cppstd = Some(cppstd);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parsing() {
        assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Macos);
        assert!("solaris".parse::<Os>().is_err());
    }

    #[test]
    fn test_arch_parsing() {
        assert_eq!("x86_64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("aarch64".parse::<Arch>().unwrap(), Arch::Armv8);
        assert!("mips".parse::<Arch>().is_err());
    }

    #[test]
    fn test_build_type_parsing() {
        assert_eq!(
            "RelWithDebInfo".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
        let err = "fastdebug".parse::<BuildType>().unwrap_err();
        assert!(err.to_string().contains("fastdebug"));
    }

    #[test]
    fn test_settings_builder() {
        let settings = Settings::new(Os::Linux, Arch::X86_64)
            .with_build_type(BuildType::Debug)
            .with_cppstd(17);
        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.cppstd, Some(17));
    }
}
