use std::fs;
use std::path::PathBuf;

use crate::cache::{cache_root, CacheEntry, OsFamily};
use crate::config::Settings;
use crate::error::{LauncherError, ProvisionCause, Result};
use crate::fetch::{release_url, ArtifactFetcher};
use crate::platform::ReleaseTarget;
use crate::utils;

/// Where a resolved binary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySource {
    /// `TENDER_BINARY_PATH`
    Override,
    /// `bin/` under the working directory or the package root
    LocalInstall,
    /// Previously provisioned cache entry
    Cache,
    /// Downloaded during this invocation
    Downloaded,
    /// Download failed, but another launcher populated the cache meanwhile
    CacheAfterFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinary {
    pub path: PathBuf,
    pub source: BinarySource,
}

/// Decides which `tender` executable to run, downloading one if needed.
///
/// Precedence is strict: explicit override, then local installs, then the
/// version-keyed cache, then the network.
pub struct BinaryResolver<'a, F> {
    settings: &'a Settings,
    fetcher: F,
}

impl<'a, F: ArtifactFetcher> BinaryResolver<'a, F> {
    pub fn new(settings: &'a Settings, fetcher: F) -> Self {
        Self { settings, fetcher }
    }

    pub async fn resolve(&self) -> Result<ResolvedBinary> {
        if let Some(path) = &self.settings.binary_override {
            if !path.exists() {
                return Err(LauncherError::OverrideNotFound(path.clone()));
            }
            tracing::debug!("Using {} from TENDER_BINARY_PATH", path.display());
            return Ok(ResolvedBinary {
                path: path.clone(),
                source: BinarySource::Override,
            });
        }

        if let Some(path) = self.local_install() {
            tracing::debug!("Using local install at {}", path.display());
            return Ok(ResolvedBinary {
                path,
                source: BinarySource::LocalInstall,
            });
        }

        self.provision().await
    }

    /// Local install locations in precedence order
    pub fn candidates(&self) -> Vec<PathBuf> {
        let name = self.settings.local_binary_name();
        [&self.settings.current_dir, &self.settings.package_root]
            .into_iter()
            .flatten()
            .map(|dir| dir.join("bin").join(&name))
            .collect()
    }

    fn local_install(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|candidate| {
            if !candidate.exists() {
                return false;
            }
            // A launcher installed as `<root>/bin/tender` must not exec itself
            if let Some(exe) = &self.settings.launcher_exe {
                if utils::same_file(candidate, exe) {
                    tracing::debug!("Skipping {}: it is this launcher", candidate.display());
                    return false;
                }
            }
            true
        })
    }

    async fn provision(&self) -> Result<ResolvedBinary> {
        let settings = self.settings;
        let target = ReleaseTarget::map(&settings.os, &settings.arch)?;

        let root = cache_root(settings, OsFamily::from_os(&settings.os))?;
        let entry = CacheEntry::locate(&root, &settings.tool_name, &settings.version, &target);
        if entry.is_populated() {
            tracing::debug!("Using cached binary at {}", entry.binary.display());
            return Ok(ResolvedBinary {
                path: entry.binary,
                source: BinarySource::Cache,
            });
        }

        let asset = target.asset_name(&settings.tool_name, &settings.version);
        let url = release_url(&settings.release_base_url, &settings.version, &asset);

        match self.install(&entry, &target, &url).await {
            Ok(()) => {
                tracing::info!("Installed {} to {}", asset, entry.binary.display());
                Ok(ResolvedBinary {
                    path: entry.binary,
                    source: BinarySource::Downloaded,
                })
            }
            Err(cause) if entry.is_populated() => {
                tracing::warn!(
                    "Download of {} failed ({}); using {} installed by another launcher",
                    url,
                    cause,
                    entry.binary.display()
                );
                Ok(ResolvedBinary {
                    path: entry.binary,
                    source: BinarySource::CacheAfterFailure,
                })
            }
            Err(cause) => Err(LauncherError::Provision {
                platform: target.platform.to_string(),
                arch: target.arch.to_string(),
                version: settings.version.clone(),
                url,
                source: cause,
            }),
        }
    }

    /// Download into a temp file beside the final path, then rename it into
    /// place. The temp file is deleted on drop if anything fails before the
    /// rename.
    async fn install(
        &self,
        entry: &CacheEntry,
        target: &ReleaseTarget,
        url: &str,
    ) -> std::result::Result<(), ProvisionCause> {
        fs::create_dir_all(&entry.dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(&entry.temp_prefix())
            .tempfile_in(&entry.dir)?;

        self.fetcher.download(url, temp.as_file_mut()).await?;

        if !target.is_windows() {
            utils::make_executable(temp.path())?;
        }

        // Close the write handle right away; exec on Linux fails with
        // ETXTBSY while one is open.
        let file = temp.persist(&entry.binary).map_err(|e| e.error)?;
        drop(file);

        Ok(())
    }
}
