//! The enumerate -> resolve -> render pipeline.

use anyhow::Result;

use crate::deps::{PackageQuery, enumerate};
use crate::models::SourceRoot;
use crate::resolver::Resolver;
use crate::templating::render_resources;
use crate::vcs::VcsProbe;

/// Produce the full `go_resource` document for `package` (the current
/// directory's package when `None`).
///
/// Nothing is returned unless every dependency resolved.
pub async fn generate<Q, V>(
    query: &Q,
    vcs: &V,
    package: Option<&str>,
    source_root: SourceRoot,
) -> Result<String>
where
    Q: PackageQuery,
    V: VcsProbe,
{
    let deps = enumerate(query, package).await?;
    tracing::debug!("Enumerated {} packages", deps.len());

    let records = Resolver::new(vcs, source_root).resolve(&deps).await?;
    render_resources(&records)
}
