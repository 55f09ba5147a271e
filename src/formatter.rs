//! Release notes rendering.
//!
//! Turns grouped commits into a Markdown changelog body, optionally headed by
//! the next version.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::classifier::GroupedCommits;
use crate::domain::{ChangeKind, Commit, Version};
use crate::warning::PreviewWarning;

/// Section heading for a bucket of changes
pub fn heading(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Major => "### Breaking Changes",
        ChangeKind::Minor => "### Features",
        ChangeKind::Patch => "### Fixes",
        ChangeKind::None => "### Other Changes",
    }
}

/// Format a single commit as a Markdown list item
pub fn format_commit(commit: &Commit) -> String {
    format!(
        "- {} ({}) by @{}",
        commit.title,
        commit.short_sha(),
        commit.author
    )
}

/// Render the changelog body: one section per non-empty bucket.
///
/// Sections are separated by a blank line. No commits yields an empty string.
pub fn render_body(grouped: &GroupedCommits) -> String {
    let mut sections = Vec::new();

    for (kind, commits) in grouped.iter() {
        let mut section = String::new();
        let _ = writeln!(section, "{}\n", heading(kind));
        for commit in commits {
            let _ = writeln!(section, "{}", format_commit(commit));
        }
        sections.push(section);
    }

    sections.join("\n")
}

/// Output of [`render_release`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRelease {
    pub text: String,
    pub warning: Option<PreviewWarning>,
}

/// Render the changelog under a `## {next}` heading.
///
/// `direction` is the ordering of `next` against the baseline. When `next`
/// does not exceed it, the body is rendered alone and an
/// [`PreviewWarning::InvalidNextVersion`] is returned with it.
pub fn render_release(
    next: &Version,
    grouped: &GroupedCommits,
    direction: Ordering,
    baseline: &str,
) -> RenderedRelease {
    let body = render_body(grouped);

    if direction != Ordering::Greater {
        return RenderedRelease {
            text: body,
            warning: Some(PreviewWarning::InvalidNextVersion {
                next: next.clone(),
                baseline: baseline.to_string(),
            }),
        };
    }

    let mut text = String::new();
    let _ = writeln!(text, "## {}\n", next);
    text.push_str(&body);

    RenderedRelease {
        text,
        warning: None,
    }
}
