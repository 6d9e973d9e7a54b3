//! Fluent builder for the external commands the tool shells out to
//!
//! `go`, `git` and `hg` are all driven through [`ToolCommand`] so that logging,
//! output capture and error mapping behave the same for every collaborator.
//! Commands run without a timeout: a hung tool hangs the run.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::GoResourcesError;

/// Builder for a single invocation of an external tool.
///
/// # Examples
///
/// ```rust,no_run
/// use homebrew_go_resources::vcs::command_builder::ToolCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let head = ToolCommand::new("git")
///     .args(["rev-parse", "HEAD"])
///     .current_dir("/home/me/go/src/github.com/foo/bar")
///     .with_context("github.com/foo/bar")
///     .execute_stdout()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Executable name or path
    program: String,

    /// Arguments passed to the executable
    args: Vec<String>,

    /// Working directory (defaults to the process directory)
    current_dir: Option<PathBuf>,

    /// Identifier included in log lines, usually the import path being resolved
    context: Option<String>,
}

impl ToolCommand {
    /// Creates a builder for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
        }
    }

    /// Sets the working directory the command runs in.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a context for logging (e.g., the dependency's import path)
    ///
    /// ```text
    /// (github.com/foo/bar) Executing command: git remote -v
    /// ```
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn prefix(&self) -> String {
        self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default()
    }

    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    /// Execute the command and return its raw stdout.
    ///
    /// Stderr is only logged, or carried in the error on failure.
    ///
    /// # Errors
    ///
    /// - [`GoResourcesError::ToolNotFound`] when the executable cannot be spawned
    /// - [`GoResourcesError::CommandFailed`] when it exits with a non-zero status
    pub async fn execute(self) -> Result<String> {
        let start = std::time::Instant::now();
        let prefix = self.prefix();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(
            target: "vcs",
            "{}Executing command: {} {}{}",
            prefix,
            self.program,
            self.args.join(" "),
            self.current_dir
                .as_ref()
                .map(|d| format!(" (in {})", d.display()))
                .unwrap_or_default()
        );

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GoResourcesError::ToolNotFound {
                    program: self.program.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to execute {} {}", self.program, self.args.join(" "))));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "vcs",
                "{}Command failed with exit code: {:?}",
                prefix,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "vcs", "{}Error: {}", prefix, stderr.trim());
            }

            return Err(GoResourcesError::CommandFailed {
                program: self.program.clone(),
                operation: self.operation(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        if !stderr.trim().is_empty() {
            tracing::debug!(target: "vcs", "{}{}", prefix, stderr.trim());
        }
        tracing::trace!(target: "vcs", "{}{}", prefix, stdout.trim());

        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            tracing::debug!(
                target: "vcs::perf",
                "{}{} {} took {}ms",
                prefix,
                self.program,
                self.operation(),
                elapsed.as_millis()
            );
        }

        Ok(stdout)
    }

    /// Execute the command and return only stdout with the trailing newline removed.
    pub async fn execute_stdout(self) -> Result<String> {
        let stdout = self.execute().await?;
        Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Execute the command as a yes/no probe.
    ///
    /// Returns the trimmed stdout on success, or `None` when the command could
    /// not be spawned, failed, or printed nothing.
    pub async fn probe(self) -> Option<String> {
        let prefix = self.prefix();
        let program = self.program.clone();
        match self.execute_stdout().await {
            Ok(out) if !out.trim().is_empty() => Some(out),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(target: "vcs", "{}{} probe failed: {}", prefix, program, e);
                None
            }
        }
    }
}

/// Check that `program` resolves to an executable on `PATH` (or is a usable path).
///
/// # Errors
///
/// Returns [`GoResourcesError::ToolNotFound`] when it does not.
pub fn ensure_available(program: &str) -> Result<()> {
    if which::which(program).is_err() {
        return Err(GoResourcesError::ToolNotFound {
            program: program.to_string(),
        }
        .into());
    }
    Ok(())
}

// Builders for the queries the resolver needs

impl ToolCommand {
    /// `git rev-parse --show-toplevel`
    pub fn git_top_level(git: &str) -> Self {
        Self::new(git).args(["rev-parse", "--show-toplevel"])
    }

    /// `git remote -v`
    pub fn git_remotes(git: &str) -> Self {
        Self::new(git).args(["remote", "-v"])
    }

    /// `git rev-parse HEAD`, the full untruncated commit hash
    pub fn git_head(git: &str) -> Self {
        Self::new(git).args(["rev-parse", "HEAD"])
    }

    /// `hg root`
    pub fn hg_root(hg: &str) -> Self {
        Self::new(hg).arg("root")
    }

    /// `hg paths default`
    pub fn hg_default_path(hg: &str) -> Self {
        Self::new(hg).args(["paths", "default"])
    }

    /// `hg identify --debug -i`, the full changeset id
    pub fn hg_identify(hg: &str) -> Self {
        Self::new(hg).args(["identify", "--debug", "-i"])
    }

    /// `go list -e -json [package]`
    pub fn go_list(go: &str, package: Option<&str>) -> Self {
        let cmd = Self::new(go).args(["list", "-e", "-json"]);
        match package {
            Some(package) => cmd.arg(package),
            None => cmd,
        }
    }

    /// `go list -e -find -json <import_path>`
    pub fn go_find(go: &str, import_path: &str) -> Self {
        Self::new(go).args(["list", "-e", "-find", "-json", import_path])
    }
}
