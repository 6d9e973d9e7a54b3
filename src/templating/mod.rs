//! Rendering of `go_resource` blocks with Tera.
//!
//! The output is a fragment meant to be pasted into a Homebrew formula:
//!
//! ```text
//!
//!
//!   go_resource "github.com/foo/bar" do
//!     url "https://github.com/foo/bar.git",
//!       :revision => "abc123"
//!   end
//!
//!   go_resource "code.google.com/p/go.net" do
//!     url "https://code.google.com/p/go.net",
//!       :revision => "0123abcd", :using => :hg
//!   end
//!
//! ```
//!
//! Whitespace is part of the contract: one leading newline, then each block
//! preceded by a newline and ended by `  end\n`, then a trailing newline.
//! Values are emitted verbatim, without escaping.

use anyhow::Result;
use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::core::GoResourcesError;
use crate::models::ResourceRecord;

/// Registered name of the template; no extension, so autoescaping never applies.
const TEMPLATE_NAME: &str = "go_resources";

const GO_RESOURCES_TEMPLATE: &str = r#"
{% for resource in resources %}
  go_resource "{{ resource.identifier }}" do
    url "{{ resource.clone_path }}",
      :revision => "{{ resource.revision }}"{% if resource.vcs %}, :using => :{{ resource.vcs }}{% endif %}
  end
{% endfor %}
"#;

#[derive(Serialize)]
struct RenderContext<'a> {
    resources: &'a [ResourceRecord],
}

/// Render `records`, in order, as `go_resource` blocks.
///
/// # Errors
///
/// Returns [`GoResourcesError::TemplateError`] if Tera fails to compile or
/// render the template.
pub fn render_resources(records: &[ResourceRecord]) -> Result<String> {
    let template_error = |e: tera::Error| GoResourcesError::TemplateError {
        reason: format_tera_error(&e),
    };

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(TEMPLATE_NAME, GO_RESOURCES_TEMPLATE).map_err(template_error)?;

    let context = TeraContext::from_serialize(RenderContext {
        resources: records,
    })
    .map_err(template_error)?;

    tracing::debug!("Rendering {} go_resource blocks", records.len());
    let rendered = tera.render(TEMPLATE_NAME, &context).map_err(template_error)?;
    Ok(rendered)
}

/// Flatten a Tera error and its sources into one line.
fn format_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
