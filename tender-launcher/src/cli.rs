use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

pub const HELP_FLAGS: [&str; 2] = ["--help", "-h"];
pub const VERSION_FLAGS: [&str; 2] = ["--version", "-v"];

/// The launcher's own command line.
///
/// Launcher flags are exact tokens matched anywhere in argv; nothing is
/// parsed, split or consumed, so whatever is not a help or version request
/// reaches the tender binary untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cli {
    args: Vec<OsString>,
}

/// What a single invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Delegate(Vec<OsString>),
}

impl Cli {
    /// Arguments of the running process, without the program name
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os().skip(1))
    }

    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Help wins over version when both are present
    pub fn invocation(self) -> Invocation {
        if self.requests(&HELP_FLAGS) {
            Invocation::Help
        } else if self.requests(&VERSION_FLAGS) {
            Invocation::Version
        } else {
            Invocation::Delegate(self.args)
        }
    }

    fn requests(&self, flags: &[&str]) -> bool {
        self.args
            .iter()
            .any(|arg| flags.iter().any(|flag| arg.as_os_str() == OsStr::new(flag)))
    }
}

pub const HELP_TEXT: &str = "\
tender

Purpose:
  Manage autonomous OpenCode runs with GitHub Actions workflows.
  OpenCode users only: tender reuses your existing opencode.json/.opencode setup.
  Workflow files are the source of truth (no sidecar metadata files).

Coding Agent Guide:
  1. Inspect current tenders with `ls`.
  2. Use `add` or `update` to define automation declaratively.
  3. Use `run` to trigger workflow_dispatch runs immediately.
  4. Commit generated workflow changes under .github/workflows.

Use Cases:
  - Push target test trees and run an agent that diffs target vs actual, then implements.
  - Run a test review + improvement agent hourly in a busy trunk-based codebase.
  - Run an intent-capture flow: inspect rough code, write formalizing tests, then reimplement TDD-style.

Advice For Coding Agents:
  After reading this guide, propose creative new tender workflows for this repo.
  Share those ideas with the user before making major automation changes.

Usage:
  pnpm dlx @susu-eng/tender@latest
  npx @susu-eng/tender@latest <command>
  npx @susu-eng/tender@latest help <command>
  npx @susu-eng/tender@latest <command> --help

Commands:
  init            Ensure .github/workflows exists
  add             Add a tender non-interactively (agent-friendly)
  update          Update a tender non-interactively (agent-friendly)
  ls              List managed tender workflows
  run             Trigger an on-demand tender now via GitHub CLI
  rm              Remove a tender workflow
  help [command]  Show command help

Examples:
  npx @susu-eng/tender@latest ls
  npx @susu-eng/tender@latest add --name nightly --agent Build --cron \"0 9 * * 1\"
  npx @susu-eng/tender@latest run nightly --prompt \"review and commit\"
  npx @susu-eng/tender@latest help add
";

pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    out.write_all(HELP_TEXT.as_bytes())
}

pub fn print_version(out: &mut impl Write, version: &str) -> io::Result<()> {
    writeln!(out, "{version}")
}
