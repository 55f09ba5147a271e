use changelog_preview::classifier::CommitClassifier;
use changelog_preview::domain::{Commit, Comparison, Release, Repository, Version};
use changelog_preview::forge::MockForge;
use changelog_preview::preview::{
    plan_preview, render_preview, resolve_repository, run_preview, PreviewArgs,
};
use changelog_preview::warning::PreviewWarning;
use changelog_preview::ChangelogError;
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

fn commit(sha: &str, title: &str, author: &str, labels: &[&str]) -> Commit {
    Commit::new(
        sha,
        title,
        author,
        Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap(),
    )
    .with_labels(labels.iter().copied())
}

fn checkout(remote_url: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(
        dir.path().join(".git/config"),
        format!("[remote \"origin\"]\n\turl = {}\n", remote_url),
    )
    .unwrap();
    dir
}

/// Forge with `zenstruck/changelog` released at v1.2.0 and two commits since
fn forge() -> MockForge {
    let mut forge = MockForge::new();
    forge.add_repository(Repository::new("zenstruck", "changelog", "1.x"));
    forge.set_releases(
        "zenstruck/changelog",
        vec![
            Release::from_tag("v1.2.0").unwrap(),
            Release::from_tag("v1.1.0").unwrap(),
        ],
    );
    forge.set_commits(
        "zenstruck/changelog",
        &Comparison::new("v1.2.0", "1.x"),
        vec![
            commit("1111111aaaa", "fix bug", "alice", &[]),
            commit("2222222bbbb", "add feature", "bob", &["enhancement"]),
        ],
    );
    forge
}

fn args(next: Option<&str>) -> PreviewArgs {
    PreviewArgs {
        repository: Some("zenstruck/changelog".to_string()),
        next: next.map(str::to_string),
        ..PreviewArgs::default()
    }
}

#[test]
fn test_preview_body_only() {
    let dir = TempDir::new().unwrap();
    let result = run_preview(
        &forge(),
        &CommitClassifier::default(),
        &args(None),
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.comparison, Comparison::new("v1.2.0", "1.x"));
    assert_eq!(result.next, None);
    assert_eq!(result.commit_count, 2);
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.text,
        "### Features\n\n- add feature (2222222) by @bob\n\n### Fixes\n\n- fix bug (1111111) by @alice\n"
    );
}

#[test]
fn test_preview_with_next_bump() {
    let dir = TempDir::new().unwrap();
    let result = run_preview(
        &forge(),
        &CommitClassifier::default(),
        &args(Some("minor")),
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.next, Some(Version::new(1, 3, 0)));
    assert!(result.text.starts_with("## 1.3.0\n\n### Features\n"));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_preview_next_not_exceeding_baseline_warns() {
    let dir = TempDir::new().unwrap();
    let result = run_preview(
        &forge(),
        &CommitClassifier::default(),
        &args(Some("1.1.0")),
        dir.path(),
    )
    .unwrap();

    assert!(result.text.starts_with("### Features"));
    assert_eq!(
        result.warnings,
        vec![PreviewWarning::InvalidNextVersion {
            next: Version::new(1, 1, 0),
            baseline: "v1.2.0".to_string(),
        }]
    );
}

#[test]
fn test_preview_unknown_bump_kind_aborts_before_commits() {
    let dir = TempDir::new().unwrap();
    let forge = forge();
    let result = run_preview(
        &forge,
        &CommitClassifier::default(),
        &args(Some("bogus")),
        dir.path(),
    );

    assert!(matches!(result, Err(ChangelogError::UnknownBumpKind(_))));
    assert!(!forge
        .requests()
        .iter()
        .any(|request| request.starts_with("get_commits")));
}

#[test]
fn test_preview_explicit_range() {
    let dir = TempDir::new().unwrap();
    let mut forge = forge();
    forge.set_commits(
        "zenstruck/changelog",
        &Comparison::new("v1.1.0", "v1.2.0"),
        vec![commit("3333333cccc", "Drop PHP 7", "carol", &["breaking-change"])],
    );

    let preview_args = PreviewArgs {
        from: Some("v1.1.0".to_string()),
        to: Some("v1.2.0".to_string()),
        ..args(Some("major"))
    };
    let result = run_preview(
        &forge,
        &CommitClassifier::default(),
        &preview_args,
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.comparison.to_string(), "v1.1.0...v1.2.0");
    assert_eq!(
        result.text,
        "## 2.0.0\n\n### Breaking Changes\n\n- Drop PHP 7 (3333333) by @carol\n"
    );
}

#[test]
fn test_preview_no_baseline() {
    let dir = TempDir::new().unwrap();
    let mut forge = MockForge::new();
    forge.add_repository(Repository::new("o", "new", "main"));

    let preview_args = PreviewArgs {
        repository: Some("o/new".to_string()),
        ..PreviewArgs::default()
    };
    let result = run_preview(
        &forge,
        &CommitClassifier::default(),
        &preview_args,
        dir.path(),
    );
    assert!(matches!(result, Err(ChangelogError::NoBaselineFound)));
}

#[test]
fn test_preview_invalid_range() {
    let dir = TempDir::new().unwrap();
    let preview_args = PreviewArgs {
        from: Some("v0.0.1".to_string()),
        ..args(None)
    };
    let result = run_preview(
        &forge(),
        &CommitClassifier::default(),
        &preview_args,
        dir.path(),
    );
    assert!(matches!(
        result,
        Err(ChangelogError::InvalidComparisonRange(_))
    ));
}

#[test]
fn test_preview_empty_range_warns() {
    let dir = TempDir::new().unwrap();
    let mut forge = forge();
    forge.set_commits(
        "zenstruck/changelog",
        &Comparison::new("v1.2.0", "1.x"),
        Vec::new(),
    );

    let result = run_preview(
        &forge,
        &CommitClassifier::default(),
        &args(None),
        dir.path(),
    )
    .unwrap();
    assert_eq!(result.text, "");
    assert_eq!(
        result.warnings,
        vec![PreviewWarning::NoCommits {
            comparison: "v1.2.0...1.x".to_string()
        }]
    );
}

#[test]
fn test_detected_fork_uses_parent() {
    let dir = checkout("git@github.com:kbond/changelog.git");
    let mut forge = forge();
    forge.add_repository(
        Repository::new("kbond", "changelog", "main")
            .with_parent(Repository::new("zenstruck", "changelog", "1.x")),
    );

    let preview_args = PreviewArgs::default();
    let result = run_preview(
        &forge,
        &CommitClassifier::default(),
        &preview_args,
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.repository.identifier(), "zenstruck/changelog");
    assert_eq!(result.comparison, Comparison::new("v1.2.0", "1.x"));
    assert_eq!(
        forge
            .requests()
            .iter()
            .filter(|request| request.starts_with("get_repository"))
            .count(),
        1
    );
}

#[test]
fn test_explicit_repository_is_not_redirected() {
    let dir = TempDir::new().unwrap();
    let mut forge = MockForge::new();
    forge.add_repository(
        Repository::new("kbond", "changelog", "main")
            .with_parent(Repository::new("zenstruck", "changelog", "1.x")),
    );

    let repository = resolve_repository(&forge, Some("kbond/changelog"), dir.path()).unwrap();
    assert_eq!(repository.identifier(), "kbond/changelog");
}

#[test]
fn test_undetectable_repository() {
    let dir = TempDir::new().unwrap();
    let result = resolve_repository(&MockForge::new(), None, dir.path());
    assert!(matches!(
        result,
        Err(ChangelogError::RepositoryUndetectable(_))
    ));

    let gitlab = checkout("https://gitlab.com/o/n.git");
    let result = resolve_repository(&MockForge::new(), None, gitlab.path());
    assert!(matches!(
        result,
        Err(ChangelogError::RepositoryUndetectable(_))
    ));
}

#[test]
fn test_detected_repository_not_found() {
    let dir = checkout("https://github.com/nobody/nothing");
    let result = resolve_repository(&MockForge::new(), None, dir.path());
    assert!(matches!(result, Err(ChangelogError::RepositoryNotFound(_))));
}

#[test]
fn test_plan_resolves_range_before_fetching_commits() {
    let dir = TempDir::new().unwrap();
    let forge = forge();

    let plan = plan_preview(&forge, &args(Some("patch")), dir.path()).unwrap();
    assert_eq!(plan.repository.identifier(), "zenstruck/changelog");
    assert_eq!(plan.comparison.to_string(), "v1.2.0...1.x");
    assert_eq!(plan.next, Some(Version::new(1, 2, 1)));
    assert!(!forge
        .requests()
        .iter()
        .any(|request| request.starts_with("get_commits")));

    let result = render_preview(&forge, &CommitClassifier::default(), plan).unwrap();
    assert_eq!(result.commit_count, 2);
    assert!(result.text.starts_with("## 1.2.1\n\n"));
    assert!(forge
        .requests()
        .iter()
        .any(|request| request.starts_with("get_commits")));
}

#[test]
fn test_preview_malformed_next_version() {
    let dir = TempDir::new().unwrap();
    let result = run_preview(
        &forge(),
        &CommitClassifier::default(),
        &args(Some("v1.2")),
        dir.path(),
    );
    assert!(matches!(result, Err(ChangelogError::Parse(_))));
}
