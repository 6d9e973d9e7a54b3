//! Dependency enumeration through the Go toolchain
//!
//! [`enumerate`] turns an optional root package into the ordered list of
//! [`DependencyRef`]s the resolver walks. The root package itself is the first
//! entry, flagged with `root: true`, so it goes through the same resolution as
//! every dependency but is never emitted.
//!
//! The queries are expressed by the [`PackageQuery`] trait; [`GoToolchain`]
//! implements them with `go list`.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::PathBuf;

use crate::core::GoResourcesError;
use crate::models::DependencyRef;
use crate::vcs::command_builder::{ToolCommand, ensure_available};

/// Root package with its transitive dependency list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageListing {
    /// Fully-qualified import path of the root package
    pub import_path: String,
    /// Directory of the root package
    #[serde(default)]
    pub dir: PathBuf,
    /// Transitive dependencies, in the order `go list` reports them
    #[serde(default)]
    pub deps: Vec<String>,
}

/// On-disk location of a single package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocation {
    /// Directory holding the package sources
    pub dir: PathBuf,
    /// Source root the package lives under
    pub src_root: PathBuf,
    /// Package belongs to the standard library tree
    pub standard: bool,
}

/// Read-only queries against the dependency graph.
pub trait PackageQuery {
    /// List `package` (the current directory's package when `None`) with its
    /// transitive dependencies.
    fn list(&self, package: Option<&str>) -> impl Future<Output = Result<PackageListing>> + Send;

    /// Resolve `import_path` to its directory without loading its dependencies.
    fn locate(&self, import_path: &str) -> impl Future<Output = Result<PackageLocation>> + Send;
}

/// [`PackageQuery`] backed by `go list`.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    go: String,
}

impl GoToolchain {
    /// Use the given `go` executable.
    pub fn new(go: impl Into<String>) -> Self {
        Self {
            go: go.into(),
        }
    }
}

impl PackageQuery for GoToolchain {
    async fn list(&self, package: Option<&str>) -> Result<PackageListing> {
        ensure_available(&self.go)?;
        let out = ToolCommand::go_list(&self.go, package).execute_stdout().await?;
        parse_listing(&out)
    }

    async fn locate(&self, import_path: &str) -> Result<PackageLocation> {
        let out = ToolCommand::go_find(&self.go, import_path)
            .with_context(import_path)
            .execute_stdout()
            .await?;
        parse_location(import_path, &out)
    }
}

/// Raw `go list -find -json` record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoPackage {
    dir: PathBuf,
    root: PathBuf,
    goroot: bool,
    standard: bool,
    error: Option<GoPackageError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoPackageError {
    err: String,
}

/// Decode the first JSON object of `go list -json` output.
///
/// A pattern matching several packages prints a stream of objects; only the
/// first one describes the root.
fn first_object<T: DeserializeOwned>(output: &str) -> Result<T> {
    serde_json::Deserializer::from_str(output)
        .into_iter::<T>()
        .next()
        .ok_or_else(|| GoResourcesError::InvalidListing {
            reason: "empty output".to_string(),
        })?
        .map_err(|e| {
            GoResourcesError::InvalidListing {
                reason: e.to_string(),
            }
            .into()
        })
}

/// Parse the root listing printed by `go list -e -json`.
pub fn parse_listing(output: &str) -> Result<PackageListing> {
    first_object(output)
}

/// Parse the location record printed by `go list -e -find -json`.
pub fn parse_location(import_path: &str, output: &str) -> Result<PackageLocation> {
    let pkg: GoPackage = first_object(output)?;

    if pkg.dir.as_os_str().is_empty() {
        let reason = pkg
            .error
            .map(|e| e.err)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "no directory reported".to_string());
        return Err(GoResourcesError::PackageNotFound {
            import_path: import_path.to_string(),
            reason,
        }
        .into());
    }

    Ok(PackageLocation {
        src_root: pkg.root.join("src"),
        standard: pkg.goroot || pkg.standard,
        dir: pkg.dir,
    })
}

/// List the root package and locate it and every dependency, in order.
///
/// # Errors
///
/// Fails with [`GoResourcesError::NoDependencies`] when the root has no
/// dependencies, and propagates every query failure.
pub async fn enumerate<Q: PackageQuery>(query: &Q, package: Option<&str>) -> Result<Vec<DependencyRef>> {
    let listing = query.list(package).await?;
    tracing::debug!("Root package {} in {}", listing.import_path, listing.dir.display());

    if listing.deps.is_empty() {
        return Err(GoResourcesError::NoDependencies {
            package: listing.import_path,
        }
        .into());
    }

    let import_paths = std::iter::once(listing.import_path).chain(listing.deps);
    let mut refs = Vec::new();
    for (index, import_path) in import_paths.enumerate() {
        let location = query
            .locate(&import_path)
            .await
            .with_context(|| format!("Locating package {import_path}"))?;
        refs.push(DependencyRef {
            import_path,
            dir: location.dir,
            src_root: location.src_root,
            standard: location.standard,
            root: index == 0,
        });
    }

    Ok(refs)
}
