use std::fmt;

use crate::error::{LauncherError, Result};

/// Operating system tag used in release asset names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePlatform {
    Darwin,
    Linux,
    Windows,
}

impl ReleasePlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleasePlatform::Darwin => "darwin",
            ReleasePlatform::Linux => "linux",
            ReleasePlatform::Windows => "windows",
        }
    }
}

impl fmt::Display for ReleasePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture tag used in release asset names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseArch {
    Amd64,
    Arm64,
}

impl ReleaseArch {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseArch::Amd64 => "amd64",
            ReleaseArch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for ReleaseArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported (platform, arch) pair that has a published release artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseTarget {
    pub platform: ReleasePlatform,
    pub arch: ReleaseArch,
}

impl ReleaseTarget {
    /// Map runtime OS and architecture identifiers to a release target.
    ///
    /// Accepts both Node-style (`darwin`, `win32`, `x64`) and Rust-style
    /// (`macos`, `windows`, `x86_64`) identifiers.
    pub fn map(os: &str, arch: &str) -> Result<Self> {
        let platform = match os {
            "darwin" | "macos" => Some(ReleasePlatform::Darwin),
            "linux" => Some(ReleasePlatform::Linux),
            "win32" | "windows" => Some(ReleasePlatform::Windows),
            _ => None,
        };
        let release_arch = match arch {
            "x64" | "x86_64" | "amd64" => Some(ReleaseArch::Amd64),
            "arm64" | "aarch64" => Some(ReleaseArch::Arm64),
            _ => None,
        };

        match (platform, release_arch) {
            (Some(platform), Some(arch)) => Ok(Self { platform, arch }),
            _ => Err(LauncherError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    pub fn is_windows(&self) -> bool {
        self.platform == ReleasePlatform::Windows
    }

    pub fn exe_suffix(&self) -> &'static str {
        if self.is_windows() {
            ".exe"
        } else {
            ""
        }
    }

    /// Release asset name: `<tool>_<version>_<platform>_<arch>[.exe]`
    pub fn asset_name(&self, tool: &str, version: &str) -> String {
        format!(
            "{tool}_{version}_{}_{}{}",
            self.platform,
            self.arch,
            self.exe_suffix()
        )
    }
}
