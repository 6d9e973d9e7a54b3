//! Version-control queries behind a narrow capability trait
//!
//! The resolver never spawns processes itself. It asks a [`VcsProbe`] four
//! questions about a checkout:
//!
//! | Question | git | hg |
//! |----------|-----|----|
//! | top-level directory | `git rev-parse --show-toplevel` | `hg root` |
//! | owns this directory? | `.git` entry exists | `.hg` entry exists |
//! | remote URL | `origin` line of `git remote -v` | `hg paths default` |
//! | revision | `git rev-parse HEAD` | `hg identify --debug -i` |
//!
//! [`SystemVcs`] answers them with the real tools; tests substitute an
//! in-memory fake.

pub mod command_builder;

use anyhow::Result;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::config::ToolPaths;
use crate::core::GoResourcesError;
use crate::models::VcsKind;
use command_builder::ToolCommand;

/// Read-only questions the resolver asks about version-control checkouts.
pub trait VcsProbe {
    /// Top-level working directory of the `kind` checkout containing `dir`.
    ///
    /// `None` when `kind` does not manage `dir` (or its tool is unavailable).
    fn top_level(&self, kind: VcsKind, dir: &Path) -> impl Future<Output = Option<PathBuf>> + Send;

    /// Whether `repo` carries the control entry of `kind` (`.git`, `.hg`).
    fn has_control_dir(&self, kind: VcsKind, repo: &Path) -> bool;

    /// Raw (unnormalized) clone string of the repository's default remote.
    ///
    /// `identifier` is only used for diagnostics.
    fn remote_url(
        &self,
        kind: VcsKind,
        repo: &Path,
        identifier: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Full, unambiguous identifier of the checked-out revision.
    fn revision(&self, kind: VcsKind, repo: &Path) -> impl Future<Output = Result<String>> + Send;
}

/// [`VcsProbe`] backed by the `git` and `hg` executables.
#[derive(Debug, Clone)]
pub struct SystemVcs {
    git: String,
    hg: String,
}

impl SystemVcs {
    /// Use the executables configured in `tools`.
    #[must_use]
    pub fn new(tools: &ToolPaths) -> Self {
        Self {
            git: tools.git.clone(),
            hg: tools.hg.clone(),
        }
    }

    fn program(&self, kind: VcsKind) -> &str {
        match kind {
            VcsKind::Git => &self.git,
            VcsKind::Hg => &self.hg,
        }
    }
}

impl VcsProbe for SystemVcs {
    async fn top_level(&self, kind: VcsKind, dir: &Path) -> Option<PathBuf> {
        let cmd = match kind {
            VcsKind::Git => ToolCommand::git_top_level(self.program(kind)),
            VcsKind::Hg => ToolCommand::hg_root(self.program(kind)),
        };
        cmd.current_dir(dir).probe().await.map(PathBuf::from)
    }

    fn has_control_dir(&self, kind: VcsKind, repo: &Path) -> bool {
        repo.join(kind.control_dir()).exists()
    }

    async fn remote_url(&self, kind: VcsKind, repo: &Path, identifier: &str) -> Result<String> {
        match kind {
            VcsKind::Git => {
                let remotes = ToolCommand::git_remotes(self.program(kind))
                    .current_dir(repo)
                    .with_context(identifier)
                    .execute_stdout()
                    .await?;
                parse_origin(&remotes).ok_or_else(|| {
                    GoResourcesError::MissingOrigin {
                        identifier: identifier.to_string(),
                    }
                    .into()
                })
            }
            VcsKind::Hg => {
                ToolCommand::hg_default_path(self.program(kind))
                    .current_dir(repo)
                    .with_context(identifier)
                    .execute_stdout()
                    .await
            }
        }
    }

    async fn revision(&self, kind: VcsKind, repo: &Path) -> Result<String> {
        let cmd = match kind {
            VcsKind::Git => ToolCommand::git_head(self.program(kind)),
            VcsKind::Hg => ToolCommand::hg_identify(self.program(kind)),
        };
        cmd.current_dir(repo).execute_stdout().await
    }
}

/// Extract the clone string of the `origin` remote from `git remote -v` output.
///
/// Each line reads `<name>\t<url> (<direction>)`. The last `origin` line wins,
/// so a distinct push URL takes precedence over the fetch URL.
///
/// ```rust
/// use homebrew_go_resources::vcs::parse_origin;
///
/// let remotes = "origin\tgit@github.com:foo/bar.git (fetch)\n\
///                origin\tgit@github.com:foo/bar.git (push)\n";
/// assert_eq!(parse_origin(remotes).as_deref(), Some("git@github.com:foo/bar.git"));
/// assert_eq!(parse_origin("upstream\thttps://example.com/x (fetch)"), None);
/// ```
#[must_use]
pub fn parse_origin(remotes: &str) -> Option<String> {
    remotes
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("origin"), Some(url)) => Some(url.to_string()),
                _ => None,
            }
        })
        .last()
}
