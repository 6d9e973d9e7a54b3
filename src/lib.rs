//! homebrew-go-resources
//!
//! Generates Homebrew `go_resource` blocks for the currently checked-out
//! dependencies of a Go project. It works for git and Mercurial checkouts.
//!
//! # Architecture Overview
//!
//! A linear pipeline of three stages:
//!
//! 1. [`deps`] lists the root package and its transitive dependencies with
//!    `go list` and locates each one on disk
//! 2. [`resolver`] maps every non-standard package to the repository that
//!    holds it, normalizes the clone URL and deduplicates by identifier
//! 3. [`templating`] renders the resulting records as `go_resource` blocks
//!
//! [`pipeline::generate`] composes the three; [`cli`] wires it to the real
//! toolchain. All external processes are reached through two traits,
//! [`deps::PackageQuery`] and [`vcs::VcsProbe`], so the core runs against
//! in-memory fakes in tests.
//!
//! # Supporting Modules
//! - [`config`] - optional TOML configuration (tool paths, fixed source root)
//! - [`core`] - error types and user-facing diagnostics
//! - [`models`] - records flowing between the stages

pub mod cli;
pub mod config;
pub mod core;
pub mod deps;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod templating;
pub mod vcs;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
