//! Data types flowing through the enumerate -> resolve -> render pipeline.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Version-control systems a dependency checkout may belong to.
///
/// The discovery order used by the resolver is [`VcsKind::ALL`]: git first,
/// then hg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    /// Git (`.git` control directory)
    Git,
    /// Mercurial (`.hg` control directory)
    Hg,
}

impl VcsKind {
    /// Every supported kind, in discovery order.
    pub const ALL: [Self; 2] = [Self::Git, Self::Hg];

    /// Short tag used in the manifest's `:using => :<tag>` clause.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Hg => "hg",
        }
    }

    /// Name of the control entry at the top of a working tree.
    #[must_use]
    pub const fn control_dir(self) -> &'static str {
        match self {
            Self::Git => ".git",
            Self::Hg => ".hg",
        }
    }

    /// Whether `clone_path` already names this VCS through its suffix.
    #[must_use]
    pub fn is_implied_by(self, clone_path: &str) -> bool {
        clone_path.ends_with(&format!(".{}", self.tag()))
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Directory that repository identifiers are made relative to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceRoot {
    /// Each package's own source root, as reported by `go list`
    #[default]
    PerPackage,
    /// One directory shared by every package
    Fixed(PathBuf),
}

impl SourceRoot {
    /// Source root to use for `dep`.
    #[must_use]
    pub fn for_dependency<'a>(&'a self, dep: &'a DependencyRef) -> &'a Path {
        match self {
            Self::PerPackage => &dep.src_root,
            Self::Fixed(root) => root,
        }
    }
}

/// A package produced by the enumerator, ready for repository resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// Import path as reported by the dependency query
    pub import_path: String,
    /// Directory holding the package sources
    pub dir: PathBuf,
    /// Source root the package was found under (`$GOPATH/src`)
    pub src_root: PathBuf,
    /// Package lives in the standard library tree
    pub standard: bool,
    /// Package is the project being described; resolved but never emitted
    pub root: bool,
}

/// One `go_resource` block of the generated manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    /// Repository top-level directory relative to the source root
    pub identifier: String,
    /// Canonical `https://host/path` clone URL
    pub clone_path: String,
    /// Commit hash or changeset id of the checkout
    pub revision: String,
    /// Explicit VCS annotation, `None` when the clone path suffix implies it
    pub vcs: Option<VcsKind>,
}

impl ResourceRecord {
    /// Build a record, applying the git suffix fixup and tag suppression.
    ///
    /// Git clone paths always end in `.git` exactly once. The tag is dropped
    /// whenever the final clone path ends in `.<tag>`.
    #[must_use]
    pub fn new(identifier: String, clone_path: String, revision: String, vcs: VcsKind) -> Self {
        let clone_path = if vcs == VcsKind::Git && !clone_path.ends_with(".git") {
            format!("{clone_path}.git")
        } else {
            clone_path
        };
        let vcs = (!vcs.is_implied_by(&clone_path)).then_some(vcs);

        Self {
            identifier,
            clone_path,
            revision,
            vcs,
        }
    }
}
