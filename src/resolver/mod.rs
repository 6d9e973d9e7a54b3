//! Repository resolution and normalization
//!
//! The resolver walks the enumerated dependencies in order and turns each one
//! into at most one [`ResourceRecord`]:
//!
//! 1. standard-library packages are skipped outright
//! 2. the VCS top-level directory is found (git first, then hg)
//! 3. the identifier is the top-level directory relative to the source root
//! 4. identifiers already claimed are skipped without further queries
//! 5. the owning VCS is detected from its control directory and queried for
//!    the remote and revision
//! 6. the remote is normalized to `https://host/path`, with the git suffix
//!    fixup and tag suppression applied by [`ResourceRecord::new`]
//! 7. the record is inserted first-write-wins; the root project only claims
//!    its identifier
//!
//! Every failure is fatal. Sub-packages of one repository collapse into a
//! single record because they share a top-level directory.
//!
//! ```rust,no_run
//! use homebrew_go_resources::config::ToolPaths;
//! use homebrew_go_resources::models::SourceRoot;
//! use homebrew_go_resources::resolver::Resolver;
//! use homebrew_go_resources::vcs::SystemVcs;
//!
//! # async fn example(deps: Vec<homebrew_go_resources::models::DependencyRef>) -> anyhow::Result<()> {
//! let vcs = SystemVcs::new(&ToolPaths::default());
//! let records = Resolver::new(&vcs, SourceRoot::PerPackage).resolve(&deps).await?;
//! # Ok(())
//! # }
//! ```

mod clone_url;
mod resource_set;

pub use clone_url::normalize_clone_path;
pub use resource_set::ResourceSet;

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

use crate::core::GoResourcesError;
use crate::models::{DependencyRef, ResourceRecord, SourceRoot, VcsKind};
use crate::vcs::VcsProbe;

/// Resolves dependencies to deduplicated resource records.
#[derive(Debug)]
pub struct Resolver<'a, V> {
    vcs: &'a V,
    source_root: SourceRoot,
}

impl<'a, V: VcsProbe> Resolver<'a, V> {
    /// Create a resolver querying `vcs` and deriving identifiers against `source_root`.
    pub const fn new(vcs: &'a V, source_root: SourceRoot) -> Self {
        Self {
            vcs,
            source_root,
        }
    }

    /// Resolve `deps` in order into the records to emit.
    ///
    /// The first entry flagged `root` claims its identifier but is not returned.
    ///
    /// # Errors
    ///
    /// Any dependency that cannot be resolved aborts the whole run.
    pub async fn resolve(&self, deps: &[DependencyRef]) -> Result<Vec<ResourceRecord>> {
        let mut resources = ResourceSet::new();

        for dep in deps {
            tracing::debug!("Importing dep {}", dep.import_path);
            if dep.standard {
                tracing::debug!("In GOROOT, continuing...");
                continue;
            }
            tracing::debug!("Go found package source in '{}'", dep.dir.display());

            let top_level = self.top_level(dep).await?;
            tracing::debug!("Operating on top level dir '{}'", top_level.display());

            let identifier = self.identifier(dep, &top_level).await?;
            tracing::debug!("Import path {}", identifier);
            if resources.contains(&identifier) {
                tracing::debug!("Seen, continuing...");
                continue;
            }

            let record = self
                .extract(identifier, &top_level)
                .await
                .with_context(|| format!("Resolving repository of {}", dep.import_path))?;
            resources.insert(record, !dep.root);
        }

        tracing::debug!("Resolved {} resources", resources.len());
        Ok(resources.into_records())
    }

    /// Ask each supported VCS, in order, for the top-level directory.
    async fn top_level(&self, dep: &DependencyRef) -> Result<PathBuf> {
        for kind in VcsKind::ALL {
            if let Some(dir) = self.vcs.top_level(kind, &dep.dir).await {
                return Ok(dir);
            }
            tracing::debug!("No {} repository contains {}", kind, dep.dir.display());
        }

        Err(GoResourcesError::NoRepository {
            import_path: dep.import_path.clone(),
            dir: dep.dir.clone(),
        }
        .into())
    }

    /// Top-level directory relative to the source root, with `/` separators.
    async fn identifier(&self, dep: &DependencyRef, top_level: &Path) -> Result<String> {
        let source_root = self.source_root.for_dependency(dep);

        let relative = match top_level.strip_prefix(source_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => canonical_relative(top_level, source_root).await.ok_or_else(|| {
                GoResourcesError::OutsideSourceRoot {
                    top_level: top_level.to_path_buf(),
                    source_root: source_root.to_path_buf(),
                }
            })?,
        };

        Ok(to_identifier(&relative))
    }

    /// Detect the owning VCS and read its remote and revision.
    async fn extract(&self, identifier: String, top_level: &Path) -> Result<ResourceRecord> {
        let mut owner = None;
        for kind in VcsKind::ALL {
            if self.vcs.has_control_dir(kind, top_level) {
                if let Some(previous) = owner {
                    tracing::warn!(
                        "{} has both {} and {} metadata, using {}",
                        identifier,
                        previous,
                        kind,
                        kind
                    );
                }
                owner = Some(kind);
            }
        }
        let kind = owner.ok_or_else(|| GoResourcesError::UnknownVcs {
            identifier: identifier.clone(),
        })?;

        let clone = self.vcs.remote_url(kind, top_level, &identifier).await?;
        let clone_path = normalize_clone_path(&clone)?;
        let revision = self.vcs.revision(kind, top_level).await?;
        tracing::debug!("{} -> {} @ {} ({})", identifier, clone_path, revision, kind);

        Ok(ResourceRecord::new(identifier, clone_path, revision, kind))
    }
}

/// Retry the relativization with symlinks resolved on both sides.
///
/// VCS tools report physical paths; a source root under a symlink (such as
/// `/var` on macOS) would otherwise never match.
async fn canonical_relative(top_level: &Path, source_root: &Path) -> Option<PathBuf> {
    let top_level = tokio::fs::canonicalize(top_level).await.ok()?;
    let source_root = tokio::fs::canonicalize(source_root).await.ok()?;
    top_level.strip_prefix(source_root).ok().map(Path::to_path_buf)
}

/// Join the normal components of `relative` with `/`.
///
/// An empty path (the top level is the source root itself) becomes `.`.
fn to_identifier(relative: &Path) -> String {
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
