use std::ffi::OsString;
use std::io::Write;

use crate::cli::{self, Cli, Invocation};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::{ArtifactFetcher, HttpFetcher};
use crate::resolver::BinaryResolver;
use crate::supervisor;

/// Exit code for arguments the interactive-only launcher refuses
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Forward every argument to tender
    PassThrough,
    /// Only ever start tender's interactive UI; arguments are rejected
    InteractiveOnly,
}

pub struct Launcher {
    settings: Settings,
    mode: LaunchMode,
}

impl Launcher {
    pub fn new(settings: Settings, mode: LaunchMode) -> Self {
        Self { settings, mode }
    }

    /// Run one invocation and return the exit code the launcher should use
    pub async fn run(&self, cli: Cli, stdout: &mut impl Write, stderr: &mut impl Write) -> Result<i32> {
        match cli.invocation() {
            Invocation::Help => {
                cli::print_help(stdout)?;
                Ok(0)
            }
            Invocation::Version => {
                cli::print_version(stdout, &self.settings.version)?;
                Ok(0)
            }
            Invocation::Delegate(args) => {
                if self.mode == LaunchMode::InteractiveOnly && !args.is_empty() {
                    writeln!(
                        stderr,
                        "{}-tui takes no arguments; run `{} <command>` for non-interactive use",
                        self.settings.tool_name, self.settings.tool_name
                    )?;
                    return Ok(USAGE_EXIT_CODE);
                }

                self.delegate(HttpFetcher::new(), &args).await
            }
        }
    }

    /// Resolve the binary with `fetcher` and run it with `args`
    pub async fn delegate<F: ArtifactFetcher>(&self, fetcher: F, args: &[OsString]) -> Result<i32> {
        let resolved = BinaryResolver::new(&self.settings, fetcher).resolve().await?;
        tracing::debug!("Resolved {} ({:?})", resolved.path.display(), resolved.source);

        supervisor::supervise(&resolved.path, args)
            .await
            .into_exit_code()
    }
}
