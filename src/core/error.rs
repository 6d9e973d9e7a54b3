//! Error handling for homebrew-go-resources
//!
//! Every failure the tool can detect is fatal: a missing repository, a remote
//! without an `origin`, or a `go list` that cannot be decoded all mean the
//! workspace is not in a state the tool can describe. The error system is
//! built around two pieces:
//!
//! - [`GoResourcesError`] - one variant per fatal condition, used with `?` and
//!   `anyhow` throughout the crate
//! - [`ErrorContext`] - wraps an error with optional details and a suggestion
//!   for display on stderr
//!
//! [`user_friendly_error`] converts the final [`anyhow::Error`] of a run into
//! an [`ErrorContext`], which `main` prints before exiting with status 1.
//!
//! # Examples
//!
//! ```rust,no_run
//! use homebrew_go_resources::core::{GoResourcesError, user_friendly_error};
//!
//! let error = GoResourcesError::NoDependencies {
//!     package: "example.com/app".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored "error: ..." line on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions raised while enumerating, resolving or rendering.
#[derive(Error, Debug, Clone)]
pub enum GoResourcesError {
    /// An external executable (`go`, `git`, `hg`) could not be started.
    #[error("'{program}' is not installed or not found in PATH")]
    ToolNotFound {
        /// Program that failed to spawn
        program: String,
    },

    /// An external command ran but exited with a non-zero status.
    #[error("{program} {operation} failed: {stderr}")]
    CommandFailed {
        /// Program that was invoked
        program: String,
        /// First argument of the invocation (e.g. "list", "remote")
        operation: String,
        /// Trimmed stderr of the failed process
        stderr: String,
    },

    /// `go list` produced output that could not be decoded.
    #[error("Could not decode 'go list' output: {reason}")]
    InvalidListing {
        /// Decoder message
        reason: String,
    },

    /// The root package reported no dependencies at all.
    #[error("No deps found for {package}. If this is unexpected, please file a bug report.")]
    NoDependencies {
        /// Import path of the root package
        package: String,
    },

    /// An import path could not be resolved to a directory.
    #[error("Could not find package {import_path}: {reason}")]
    PackageNotFound {
        /// Import path that failed to resolve
        import_path: String,
        /// Reason reported by the query tool
        reason: String,
    },

    /// Neither git nor hg claimed the dependency directory.
    #[error("Could not find 'git' or 'hg' repo for {import_path}")]
    NoRepository {
        /// Import path of the dependency
        import_path: String,
        /// Directory the VCS queries ran in
        dir: PathBuf,
    },

    /// A VCS top-level directory does not live under the source root.
    #[error("Repository {top_level} is outside of source root {source_root}")]
    OutsideSourceRoot {
        /// Top-level directory reported by the VCS
        top_level: PathBuf,
        /// Source root the identifier is derived against
        source_root: PathBuf,
    },

    /// A git repository has no remote called `origin`.
    #[error("Could not find a clone path for {identifier}. Please file a bug report.")]
    MissingOrigin {
        /// Identifier of the repository
        identifier: String,
    },

    /// The top-level directory has neither a `.git` nor a `.hg` entry.
    #[error("Could not find vcs for {identifier}. If this is unexpected, please file a bug report.")]
    UnknownVcs {
        /// Identifier of the repository
        identifier: String,
    },

    /// A raw clone string could not be turned into an `https://host/path` URL.
    #[error("Error normalizing clone path {clone:?}: {reason}")]
    InvalidCloneUrl {
        /// Raw clone string as reported by the VCS
        clone: String,
        /// What went wrong
        reason: String,
    },

    /// The configuration file is missing or malformed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// The manifest template failed to render.
    #[error("Failed to render manifest: {reason}")]
    TemplateError {
        /// Rendering error chain
        reason: String,
    },

    /// Catch-all for errors without a dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show the main message in red, optional details in
/// yellow and an optional suggestion in green.
///
/// ```rust,no_run
/// use homebrew_go_resources::core::{ErrorContext, GoResourcesError};
///
/// let context = ErrorContext::new(GoResourcesError::ToolNotFound {
///     program: "go".to_string(),
/// })
/// .with_suggestion("Install Go from https://go.dev/dl/");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: GoResourcesError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: GoResourcesError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// [`GoResourcesError`] values anywhere in the chain get a tailored
/// suggestion; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.chain().find_map(|e| e.downcast_ref::<GoResourcesError>()) {
        return create_error_context(known.clone());
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(GoResourcesError::Other {
        message,
    })
}

fn create_error_context(error: GoResourcesError) -> ErrorContext {
    match &error {
        GoResourcesError::ToolNotFound {
            program,
        } => {
            let suggestion = match program.as_str() {
                "go" => "Install Go from https://go.dev/dl/ or set [tools].go in the config file",
                "hg" => "Install Mercurial or set [tools].hg in the config file",
                _ => "Install git from https://git-scm.com/ or set [tools].git in the config file",
            };
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }
        GoResourcesError::NoRepository {
            dir,
            ..
        } => {
            let details = format!("Neither 'git' nor 'hg' reported a working tree for {}", dir.display());
            ErrorContext::new(error.clone())
                .with_details(details)
                .with_suggestion("Check out every dependency from version control before generating resources")
        }
        GoResourcesError::OutsideSourceRoot {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Pass --src-root or set source_root in the config file to the directory holding your checkouts"),
        GoResourcesError::MissingOrigin {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Add an 'origin' remote with 'git remote add origin <url>'"),
        GoResourcesError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the TOML syntax of the configuration file"),
        _ => ErrorContext::new(error),
    }
}
