use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

pub const TOOL_NAME: &str = "tender";

pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com/elimydlarz/tender/releases/download";

pub const BINARY_PATH_VAR: &str = "TENDER_BINARY_PATH";
pub const CACHE_DIR_VAR: &str = "TENDER_CACHE_DIR";
pub const RELEASE_BASE_URL_VAR: &str = "TENDER_RELEASE_BASE_URL";
pub const LOCAL_APP_DATA_VAR: &str = "LOCALAPPDATA";
pub const XDG_CACHE_HOME_VAR: &str = "XDG_CACHE_HOME";

/// Everything the launcher needs to know about its environment, captured once
/// at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tool_name: String,
    pub version: String,
    pub release_base_url: String,

    /// `TENDER_BINARY_PATH`
    pub binary_override: Option<PathBuf>,
    /// `TENDER_CACHE_DIR`
    pub cache_dir_override: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
    pub xdg_cache_home: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,

    /// Host OS identifier, as reported by `std::env::consts::OS`
    pub os: String,
    /// Host architecture identifier, as reported by `std::env::consts::ARCH`
    pub arch: String,

    /// `None` when the working directory is gone or unreadable
    pub current_dir: Option<PathBuf>,
    /// Directory the launcher was installed into (parent of its `bin/`)
    pub package_root: Option<PathBuf>,
    pub launcher_exe: Option<PathBuf>,
}

impl Settings {
    /// Build settings from the real process environment
    pub fn from_env() -> Result<Self> {
        let current_dir = std::env::current_dir()
            .inspect_err(|e| tracing::debug!("Unable to read the working directory: {}", e))
            .ok();
        let mut settings = Self::from_lookup(|key| std::env::var_os(key), current_dir);

        settings.home_dir = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

        let launcher_exe = std::env::current_exe().ok();
        settings.package_root = launcher_exe
            .as_deref()
            .and_then(Path::parent)
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        settings.launcher_exe = launcher_exe;

        if let Some(root) = &settings.package_root {
            if let Some(metadata) = PackageMetadata::load(root)? {
                settings.version = metadata.version;
            }
        }

        Ok(settings)
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as
    /// unset. Process facts that do not come from variables get neutral
    /// defaults and can be overwritten by the caller.
    pub fn from_lookup<F>(lookup: F, current_dir: impl Into<Option<PathBuf>>) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            tool_name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            release_base_url: var(RELEASE_BASE_URL_VAR)
                .map(|value| value.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_RELEASE_BASE_URL.to_string()),
            binary_override: var(BINARY_PATH_VAR).map(PathBuf::from),
            cache_dir_override: var(CACHE_DIR_VAR).map(PathBuf::from),
            local_app_data: var(LOCAL_APP_DATA_VAR).map(PathBuf::from),
            xdg_cache_home: var(XDG_CACHE_HOME_VAR).map(PathBuf::from),
            home_dir: None,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            current_dir: current_dir.into(),
            package_root: None,
            launcher_exe: None,
        }
    }

    /// File name of the delegated binary on the host, e.g. `tender.exe`
    pub fn local_binary_name(&self) -> String {
        if matches!(self.os.as_str(), "windows" | "win32") {
            format!("{}.exe", self.tool_name)
        } else {
            self.tool_name.clone()
        }
    }
}

/// The subset of `package.json` the launcher cares about
#[derive(Debug, Deserialize)]
pub struct PackageMetadata {
    pub version: String,
}

impl PackageMetadata {
    pub const FILE_NAME: &'static str = "package.json";

    /// Load metadata from `<package_root>/package.json`. A missing file is not
    /// an error; a present but malformed one is.
    pub fn load(package_root: &Path) -> Result<Option<Self>> {
        let path = package_root.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| LauncherError::Metadata {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let metadata: Self = serde_json::from_str(&content).map_err(|e| LauncherError::Metadata {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Some(metadata))
    }
}
