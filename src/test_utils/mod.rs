//! Test utilities for homebrew-go-resources
//!
//! Compiled for unit tests and, behind the `test-utils` feature, for the
//! integration tests:
//! - [`FakePackages`] and [`FakeVcs`] replace `go list` and `git`/`hg`
//! - [`TestGit`] builds real git checkouts in temporary directories
//! - [`init_test_logging`] routes `tracing` output through the test harness
//!
//! # Example
//!
//! ```rust,no_run
//! use homebrew_go_resources::models::VcsKind;
//! use homebrew_go_resources::test_utils::{FakePackages, FakeVcs};
//!
//! let packages = FakePackages::new("example.com/app", "/go/src/example.com/app")
//!     .with_dep("github.com/foo/bar", "/go/src/github.com/foo/bar", false);
//! let vcs = FakeVcs::new()
//!     .with_repo(VcsKind::Git, "/go/src/github.com/foo/bar", Some("git@github.com:foo/bar"), "abc123");
//! ```

pub mod fakes;
pub mod git_helper;

pub use fakes::{FakePackages, FakeVcs};
pub use git_helper::TestGit;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests stay silent.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
