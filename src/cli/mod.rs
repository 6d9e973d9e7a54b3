//! Command-line interface for homebrew-go-resources.
//!
//! The tool takes at most one positional argument, the import path of the
//! project to describe, and prints the `go_resource` blocks for every
//! non-standard dependency on stdout:
//!
//! ```bash
//! # Current directory's package
//! homebrew-go-resources > resources.rb
//!
//! # Explicit package, with per-dependency diagnostics on stderr
//! homebrew-go-resources --debug github.com/me/tool
//!
//! # Derive identifiers against one source tree
//! homebrew-go-resources --src-root ~/go/src github.com/me/tool
//! ```
//!
//! Diagnostics never go to stdout, so the output can be redirected as-is.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ToolConfig;
use crate::deps::GoToolchain;
use crate::pipeline::generate;
use crate::vcs::SystemVcs;

const LONG_ABOUT: &str = "homebrew-go-resources generates \"go_resource\" statements for homebrew \
formulas. It generates \"go_resource\" statements for the currently checked out repos for your \
project. It works for 'hg' and 'git' repositories.";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "homebrew-go-resources",
    about = "Generate Homebrew go_resource blocks for a Go project's dependencies",
    version,
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Import path of the project (defaults to the package in the current directory)
    #[arg(value_name = "PACKAGE")]
    package: Option<String>,

    /// Show debug messages on stderr
    #[arg(long, short = 'v', visible_alias = "verbose")]
    debug: bool,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,

    /// Derive every identifier relative to this directory instead of each
    /// package's own source root
    #[arg(long, value_name = "DIR")]
    src_root: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE", env = "HOMEBREW_GO_RESOURCES_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Log filter directive selected by the verbosity flags.
    ///
    /// `None` defers to `RUST_LOG`, falling back to `warn`.
    #[must_use]
    pub fn log_level(&self) -> Option<&'static str> {
        if self.debug {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Install the stderr `tracing` subscriber.
    pub fn init_logging(&self) {
        let filter = match self.log_level() {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    }

    /// Run the pipeline and print the manifest fragment.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let config = ToolConfig::load_with_optional(self.config).await?;
        let source_root = config.source_root(self.src_root);
        tracing::debug!("Source root: {:?}", source_root);

        let go = GoToolchain::new(config.tools.go.clone());
        let vcs = SystemVcs::new(&config.tools);
        let document = generate(&go, &vcs, self.package.as_deref(), source_root).await?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(document.as_bytes()).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(())
    }
}
