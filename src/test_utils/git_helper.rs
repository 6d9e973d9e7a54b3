//! Real git checkouts for tests that exercise [`SystemVcs`](crate::vcs::SystemVcs).

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A committed git working tree in a test directory.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    /// Create `repo_path`, `git init` it and commit a single Go file.
    pub fn init_with_commit(repo_path: impl Into<PathBuf>) -> Result<Self> {
        let git = Self {
            repo_path: repo_path.into(),
        };
        std::fs::create_dir_all(&git.repo_path)
            .with_context(|| format!("Failed to create {}", git.repo_path.display()))?;
        std::fs::write(git.repo_path.join("doc.go"), "package doc\n")
            .context("Failed to write doc.go")?;

        git.git(&["init", "--quiet"])?;
        git.git(&["add", "."])?;
        git.git(&[
            "-c",
            "user.email=test@go-resources.example",
            "-c",
            "user.name=Test User",
            "commit",
            "--quiet",
            "-m",
            "Initial commit",
        ])?;
        Ok(git)
    }

    /// `git remote add <name> <url>`
    pub fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url])?;
        Ok(())
    }

    /// Full hash of `HEAD`.
    pub fn rev_parse_head(&self) -> Result<String> {
        Ok(self.git(&["rev-parse", "HEAD"])?.trim().to_string())
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            bail!("git {} failed: {}", args.join(" "), String::from_utf8_lossy(&output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
