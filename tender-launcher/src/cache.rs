use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{LauncherError, Result};
use crate::platform::ReleaseTarget;

/// Which default cache location convention applies to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    OtherUnix,
}

impl OsFamily {
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" | "win32" => OsFamily::Windows,
            "macos" | "darwin" => OsFamily::MacOs,
            _ => OsFamily::OtherUnix,
        }
    }
}

/// Root directory under which all tool caches live.
///
/// `TENDER_CACHE_DIR` wins outright; otherwise the platform convention is
/// used: `%LOCALAPPDATA%` on Windows, `~/Library/Caches` on macOS and
/// `$XDG_CACHE_HOME` or `~/.cache` elsewhere.
pub fn cache_root(settings: &Settings, family: OsFamily) -> Result<PathBuf> {
    if let Some(dir) = &settings.cache_dir_override {
        return Ok(dir.clone());
    }

    match family {
        OsFamily::Windows => match &settings.local_app_data {
            Some(dir) => Ok(dir.clone()),
            None => home(settings).map(|home| home.join("AppData").join("Local")),
        },
        OsFamily::MacOs => home(settings).map(|home| home.join("Library").join("Caches")),
        OsFamily::OtherUnix => match &settings.xdg_cache_home {
            Some(dir) => Ok(dir.clone()),
            None => home(settings).map(|home| home.join(".cache")),
        },
    }
}

fn home(settings: &Settings) -> Result<&Path> {
    settings.home_dir.as_deref().ok_or_else(|| {
        LauncherError::CacheRoot(format!(
            "home directory is unknown; set {} to choose one",
            crate::config::CACHE_DIR_VAR
        ))
    })
}

/// Location of one cached release binary: `<root>/<tool>/cli/<version>/<tool>[.exe]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub dir: PathBuf,
    pub binary: PathBuf,
}

impl CacheEntry {
    pub fn locate(root: &Path, tool: &str, version: &str, target: &ReleaseTarget) -> Self {
        let dir = root.join(tool).join("cli").join(version);
        let binary = dir.join(format!("{tool}{}", target.exe_suffix()));
        Self { dir, binary }
    }

    /// Prefix for temp files staged next to the final binary. Embeds the pid
    /// so concurrent launchers never share a temp file.
    pub fn temp_prefix(&self) -> String {
        let name = self
            .binary
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{name}.tmp-{}-", std::process::id())
    }

    pub fn is_populated(&self) -> bool {
        self.binary.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        let mut settings = Settings::from_lookup(|_| None, PathBuf::from("/work"));
        settings.home_dir = Some(PathBuf::from("/home/dev"));
        settings
    }

    fn linux_amd64() -> ReleaseTarget {
        ReleaseTarget::map("linux", "x64").unwrap()
    }

    #[test]
    fn test_override_wins_on_every_family() {
        let mut settings = settings();
        settings.cache_dir_override = Some(PathBuf::from("/custom/cache"));
        settings.xdg_cache_home = Some(PathBuf::from("/xdg"));
        settings.local_app_data = Some(PathBuf::from("/appdata"));

        for family in [OsFamily::Windows, OsFamily::MacOs, OsFamily::OtherUnix] {
            assert_eq!(
                cache_root(&settings, family).unwrap(),
                PathBuf::from("/custom/cache")
            );
        }
    }

    #[test]
    fn test_windows_root() {
        let mut settings = settings();
        assert_eq!(
            cache_root(&settings, OsFamily::Windows).unwrap(),
            PathBuf::from("/home/dev").join("AppData").join("Local")
        );

        settings.local_app_data = Some(PathBuf::from("/appdata"));
        assert_eq!(
            cache_root(&settings, OsFamily::Windows).unwrap(),
            PathBuf::from("/appdata")
        );
    }

    #[test]
    fn test_macos_root_ignores_xdg() {
        let mut settings = settings();
        settings.xdg_cache_home = Some(PathBuf::from("/xdg"));
        assert_eq!(
            cache_root(&settings, OsFamily::MacOs).unwrap(),
            PathBuf::from("/home/dev/Library/Caches")
        );
    }

    #[test]
    fn test_unix_root() {
        let mut settings = settings();
        assert_eq!(
            cache_root(&settings, OsFamily::OtherUnix).unwrap(),
            PathBuf::from("/home/dev/.cache")
        );

        settings.xdg_cache_home = Some(PathBuf::from("/xdg"));
        assert_eq!(
            cache_root(&settings, OsFamily::OtherUnix).unwrap(),
            PathBuf::from("/xdg")
        );
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let mut settings = settings();
        settings.home_dir = None;
        let err = cache_root(&settings, OsFamily::OtherUnix).unwrap_err();
        assert!(err.to_string().contains("TENDER_CACHE_DIR"));
    }

    #[test]
    fn test_family_from_os() {
        assert_eq!(OsFamily::from_os("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os("win32"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os("macos"), OsFamily::MacOs);
        assert_eq!(OsFamily::from_os("linux"), OsFamily::OtherUnix);
        assert_eq!(OsFamily::from_os("freebsd"), OsFamily::OtherUnix);
    }

    #[test]
    fn test_entry_layout() {
        let entry = CacheEntry::locate(Path::new("/cache"), "tender", "1.2.3", &linux_amd64());
        assert_eq!(entry.dir, PathBuf::from("/cache/tender/cli/1.2.3"));
        assert_eq!(entry.binary, PathBuf::from("/cache/tender/cli/1.2.3/tender"));

        let windows = ReleaseTarget::map("win32", "x64").unwrap();
        let entry = CacheEntry::locate(Path::new("/cache"), "tender", "1.2.3", &windows);
        assert_eq!(entry.binary, PathBuf::from("/cache/tender/cli/1.2.3/tender.exe"));
    }

    #[test]
    fn test_entry_is_deterministic_and_version_keyed() {
        let root = Path::new("/cache");
        let a = CacheEntry::locate(root, "tender", "1.2.3", &linux_amd64());
        let b = CacheEntry::locate(root, "tender", "1.2.3", &linux_amd64());
        let c = CacheEntry::locate(root, "tender", "1.2.4", &linux_amd64());

        assert_eq!(a, b);
        assert_ne!(a.dir, c.dir);
        assert_ne!(a.binary, c.binary);
    }

    #[test]
    fn test_temp_prefix_embeds_pid() {
        let entry = CacheEntry::locate(Path::new("/cache"), "tender", "1.2.3", &linux_amd64());
        assert_eq!(
            entry.temp_prefix(),
            format!("tender.tmp-{}-", std::process::id())
        );
    }
}
