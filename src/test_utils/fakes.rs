//! In-memory implementations of the capability traits
//!
//! [`FakePackages`] stands in for `go list` and [`FakeVcs`] for `git`/`hg`, so
//! the resolver can be driven without spawning processes.

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::GoResourcesError;
use crate::deps::{PackageListing, PackageLocation, PackageQuery};
use crate::models::VcsKind;
use crate::vcs::VcsProbe;

/// Fake dependency graph with one root package.
#[derive(Debug, Clone)]
pub struct FakePackages {
    root: String,
    root_dir: PathBuf,
    src_root: PathBuf,
    deps: Vec<String>,
    locations: HashMap<String, PackageLocation>,
}

impl FakePackages {
    /// Root package `root` living in `root_dir`, under source root `/go/src`.
    pub fn new(root: &str, root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let mut packages = Self {
            root: root.to_string(),
            root_dir: root_dir.clone(),
            src_root: PathBuf::from("/go/src"),
            deps: Vec::new(),
            locations: HashMap::new(),
        };
        packages.insert_location(root, root_dir, false);
        packages
    }

    /// Source root reported for the root package and every dependency added afterwards.
    pub fn with_src_root(mut self, src_root: impl Into<PathBuf>) -> Self {
        self.src_root = src_root.into();
        let root = self.root.clone();
        let root_dir = self.root_dir.clone();
        self.insert_location(&root, root_dir, false);
        self
    }

    /// Append `import_path` to the dependency list.
    ///
    /// Adding the same import path twice lists it twice.
    pub fn with_dep(mut self, import_path: &str, dir: impl Into<PathBuf>, standard: bool) -> Self {
        self.deps.push(import_path.to_string());
        self.insert_location(import_path, dir.into(), standard);
        self
    }

    /// Append `import_path` to the dependency list without a known location.
    pub fn with_unlocatable_dep(mut self, import_path: &str) -> Self {
        self.deps.push(import_path.to_string());
        self
    }

    fn insert_location(&mut self, import_path: &str, dir: PathBuf, standard: bool) {
        self.locations.insert(
            import_path.to_string(),
            PackageLocation {
                dir,
                src_root: self.src_root.clone(),
                standard,
            },
        );
    }
}

impl PackageQuery for FakePackages {
    async fn list(&self, package: Option<&str>) -> Result<PackageListing> {
        if let Some(package) = package.filter(|p| *p != self.root) {
            return Err(GoResourcesError::PackageNotFound {
                import_path: package.to_string(),
                reason: "not the fake root".to_string(),
            }
            .into());
        }

        Ok(PackageListing {
            import_path: self.root.clone(),
            dir: self.root_dir.clone(),
            deps: self.deps.clone(),
        })
    }

    async fn locate(&self, import_path: &str) -> Result<PackageLocation> {
        self.locations.get(import_path).cloned().ok_or_else(|| {
            GoResourcesError::PackageNotFound {
                import_path: import_path.to_string(),
                reason: "cannot find package".to_string(),
            }
            .into()
        })
    }
}

#[derive(Debug, Clone)]
struct FakeRepo {
    kinds: Vec<VcsKind>,
    remote: Option<String>,
    revision: String,
}

/// Fake git/hg checkouts keyed by directory.
///
/// Every remote and revision query is recorded and can be inspected with
/// [`FakeVcs::queries`].
#[derive(Debug, Default)]
pub struct FakeVcs {
    top_levels: HashMap<(VcsKind, PathBuf), PathBuf>,
    repos: HashMap<PathBuf, FakeRepo>,
    queries: Mutex<Vec<String>>,
}

impl FakeVcs {
    /// Empty fake: no directory belongs to any repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `kind` checkout at `top` with the given remote and revision.
    ///
    /// `remote: None` simulates a git repository without `origin`.
    pub fn with_repo(
        mut self,
        kind: VcsKind,
        top: impl Into<PathBuf>,
        remote: Option<&str>,
        revision: &str,
    ) -> Self {
        let top = top.into();
        self.top_levels.insert((kind, top.clone()), top.clone());
        self.repos.insert(
            top,
            FakeRepo {
                kinds: vec![kind],
                remote: remote.map(str::to_string),
                revision: revision.to_string(),
            },
        );
        self
    }

    /// Make `dir` report `top` as its `kind` top-level directory.
    pub fn with_package_dir(
        mut self,
        kind: VcsKind,
        dir: impl Into<PathBuf>,
        top: impl Into<PathBuf>,
    ) -> Self {
        self.top_levels.insert((kind, dir.into()), top.into());
        self
    }

    /// Add the control directory of `kind` to an already registered checkout.
    pub fn with_control_dir(mut self, top: impl AsRef<Path>, kind: VcsKind) -> Self {
        if let Some(repo) = self.repos.get_mut(top.as_ref()) {
            repo.kinds.push(kind);
        }
        self
    }

    /// Remote and revision queries issued so far, as `"<query> <kind> <dir>"`.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    fn record(&self, query: &str, kind: VcsKind, dir: &Path) {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(format!("{query} {kind} {}", dir.display()));
        }
    }

    fn repo(&self, repo: &Path) -> Result<&FakeRepo> {
        self.repos.get(repo).ok_or_else(|| {
            GoResourcesError::Other {
                message: format!("no fake repository at {}", repo.display()),
            }
            .into()
        })
    }
}

impl VcsProbe for FakeVcs {
    async fn top_level(&self, kind: VcsKind, dir: &Path) -> Option<PathBuf> {
        self.top_levels.get(&(kind, dir.to_path_buf())).cloned()
    }

    fn has_control_dir(&self, kind: VcsKind, repo: &Path) -> bool {
        self.repos.get(repo).is_some_and(|r| r.kinds.contains(&kind))
    }

    async fn remote_url(&self, kind: VcsKind, repo: &Path, identifier: &str) -> Result<String> {
        self.record("remote", kind, repo);
        let fake = self.repo(repo)?;
        match (&fake.remote, kind) {
            (Some(remote), _) => Ok(remote.clone()),
            (None, VcsKind::Git) => Err(GoResourcesError::MissingOrigin {
                identifier: identifier.to_string(),
            }
            .into()),
            (None, VcsKind::Hg) => Err(GoResourcesError::CommandFailed {
                program: "hg".to_string(),
                operation: "paths".to_string(),
                stderr: "not found!".to_string(),
            }
            .into()),
        }
    }

    async fn revision(&self, kind: VcsKind, repo: &Path) -> Result<String> {
        self.record("revision", kind, repo);
        Ok(self.repo(repo)?.revision.clone())
    }
}
