//! homebrew-go-resources entry point
//!
//! Parses arguments, runs the pipeline and turns any failure into a single
//! diagnostic on stderr with exit status 1. Argument errors are reported by
//! clap with exit status 2.

use anyhow::Result;
use clap::Parser;
use homebrew_go_resources::cli;
use homebrew_go_resources::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
