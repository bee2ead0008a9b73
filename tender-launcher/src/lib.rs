//! # tender-launcher
//!
//! A thin front-end that finds or downloads the platform-specific `tender`
//! binary and runs it in place of itself.
//!
//! ## Overview
//!
//! Package managers ship this launcher instead of one large binary per
//! platform. On each invocation it picks the binary to run, in order:
//!
//! - `TENDER_BINARY_PATH`, if set (must exist)
//! - `bin/tender` under the working directory, then under the package root
//! - `<cache>/tender/cli/<version>/tender`, downloading it from the release
//!   host on first use
//!
//! The chosen binary inherits stdin, stdout and stderr, receives every
//! argument verbatim, and its exit code becomes the launcher's own.
//!
//! ## Environment
//!
//! - `TENDER_BINARY_PATH` - run this binary and nothing else
//! - `TENDER_CACHE_DIR` - cache root override
//! - `TENDER_RELEASE_BASE_URL` - where release assets are downloaded from
//! - `TENDER_LOG` - launcher log filter (default `warn`)

/// Per-version cache location
pub mod cache;

/// Launcher flags and help/version output
pub mod cli;

/// Startup settings gathered from the environment and package metadata
pub mod config;

/// Error types
pub mod error;

/// Release artifact downloads
pub mod fetch;

/// Ties resolution and supervision together for one invocation
pub mod launcher;

/// Diagnostic logging setup
pub mod logging;

/// Runtime OS/arch to release asset tags
pub mod platform;

/// Picks or provisions the binary to run
pub mod resolver;

/// Runs the delegated binary and interprets how it ended
pub mod supervisor;

/// Filesystem helpers
pub mod utils;
