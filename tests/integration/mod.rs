//! Integration test suite for homebrew-go-resources
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument handling, exit codes and diagnostics of the binary
//! - **run**: successful runs of the binary with a scripted `go`
//! - **system_vcs**: the full pipeline against real git checkouts

#[path = "../common/mod.rs"]
mod common;

mod cli;
#[cfg(unix)]
mod run;
mod system_vcs;
