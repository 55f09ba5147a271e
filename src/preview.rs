//! Changelog preview pipeline
//!
//! Runs the whole preview for one invocation: repository resolution, range
//! resolution, next version computation, commit fetching, classification and
//! rendering. The forge is passed in, so the pipeline runs unchanged against
//! [`crate::forge::MockForge`].

use std::cmp::Ordering;
use std::path::Path;

use crate::classifier::CommitClassifier;
use crate::detect;
use crate::domain::{comparison, ChangeKind, Comparison, Releases, Repository, Version};
use crate::error::Result;
use crate::forge::Forge;
use crate::formatter;
use crate::warning::PreviewWarning;

/// Arguments for the preview pipeline
///
/// Mirrors the CLI arguments without depending on clap, so the pipeline can
/// be called programmatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewArgs {
    /// Explicit `owner/name`; detected from `.git/config` when absent
    pub repository: Option<String>,

    /// Start of the range; latest release when absent
    pub from: Option<String>,

    /// End of the range; default branch when absent
    pub to: Option<String>,

    /// Bump hint (major, minor, patch and aliases) or explicit version
    pub next: Option<String>,
}

/// Result of a successful preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    /// Repository the changelog was generated for (upstream of a fork)
    pub repository: Repository,

    pub comparison: Comparison,

    /// Computed next version, when a hint was given
    pub next: Option<Version>,

    /// Rendered changelog text
    pub text: String,

    pub commit_count: usize,

    /// Non-fatal issues to report alongside the text
    pub warnings: Vec<PreviewWarning>,
}

/// Resolve the repository to generate the changelog for.
///
/// An explicit identifier is used as given. Otherwise the identifier is
/// detected from `cwd`, and a fork is redirected to its parent.
pub fn resolve_repository(
    forge: &dyn Forge,
    explicit: Option<&str>,
    cwd: &Path,
) -> Result<Repository> {
    if let Some(identifier) = explicit {
        return forge.get_repository(identifier);
    }

    let identifier = detect::detect_repository(cwd)?;
    let repository = forge.get_repository(&identifier)?;

    if repository.is_fork() {
        tracing::info!(fork = %repository, "detected repository is a fork, using its parent");
    }

    Ok(repository.upstream())
}

/// The version the next release is measured against: the `from` endpoint when
/// it is a version, else the latest release
pub fn baseline_version(comparison: &Comparison, releases: &Releases) -> Option<Version> {
    Version::parse(&comparison.from)
        .ok()
        .or_else(|| releases.latest().map(|release| release.version.clone()))
}

/// Compute the next version from a hint.
///
/// With releases, the latest one is bumped. Without any, the baseline (or
/// 0.0.0) is bumped instead. Explicit versions are taken as-is.
pub fn next_version(hint: &str, releases: &Releases, baseline: Option<&Version>) -> Result<Version> {
    if !releases.is_empty() {
        return releases.next(hint);
    }
    if let Some(explicit) = Version::parse_explicit(hint)? {
        return Ok(explicit);
    }

    let kind = ChangeKind::resolve_bump(hint)?;
    baseline
        .cloned()
        .unwrap_or_else(|| Version::new(0, 0, 0))
        .bump(kind)
}

/// Everything resolved before commits are fetched
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPlan {
    /// Repository the changelog is generated for (upstream of a fork)
    pub repository: Repository,

    pub comparison: Comparison,

    /// Computed next version, when a hint was given
    pub next: Option<Version>,

    /// Version the next release must exceed
    pub baseline: Option<Version>,
}

/// Resolve repository, range and next version.
///
/// An invalid hint fails here, so no commits are fetched for it.
pub fn plan_preview(forge: &dyn Forge, args: &PreviewArgs, cwd: &Path) -> Result<PreviewPlan> {
    let repository = resolve_repository(forge, args.repository.as_deref(), cwd)?;
    let releases = forge.list_releases(&repository)?;

    let comparison = comparison::resolve(
        args.from.as_deref(),
        args.to.as_deref(),
        releases.latest(),
        &repository.default_branch,
    )?;

    let baseline = baseline_version(&comparison, &releases);
    let next = args
        .next
        .as_deref()
        .map(|hint| next_version(hint, &releases, baseline.as_ref()))
        .transpose()?;

    Ok(PreviewPlan {
        repository,
        comparison,
        next,
        baseline,
    })
}

/// Fetch the commits of a planned range and render them
pub fn render_preview(
    forge: &dyn Forge,
    classifier: &CommitClassifier,
    plan: PreviewPlan,
) -> Result<PreviewResult> {
    let PreviewPlan {
        repository,
        comparison,
        next,
        baseline,
    } = plan;

    tracing::info!(%repository, %comparison, "generating changelog");

    let commits = forge.get_commits(&repository, &comparison)?;
    let grouped = classifier.group(&commits);
    let mut warnings = Vec::new();

    if commits.is_empty() {
        warnings.push(PreviewWarning::NoCommits {
            comparison: comparison.to_string(),
        });
    }

    let text = match &next {
        Some(next) => {
            let direction = baseline
                .as_ref()
                .map_or(Ordering::Greater, |baseline| next.compare_with(baseline));
            let rendered = formatter::render_release(next, &grouped, direction, &comparison.from);
            warnings.extend(rendered.warning);
            rendered.text
        }
        None => formatter::render_body(&grouped),
    };

    Ok(PreviewResult {
        repository,
        comparison,
        next,
        text,
        commit_count: commits.len(),
        warnings,
    })
}

/// Main preview workflow
///
/// # Returns
///
/// The rendered changelog with its context, or the first fatal error
pub fn run_preview(
    forge: &dyn Forge,
    classifier: &CommitClassifier,
    args: &PreviewArgs,
    cwd: &Path,
) -> Result<PreviewResult> {
    let plan = plan_preview(forge, args, cwd)?;
    render_preview(forge, classifier, plan)
}
