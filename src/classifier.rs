//! Commit classification and grouping by semantic change kind.

use crate::config::ClassifierConfig;
use crate::domain::{ChangeKind, Commit};
use std::collections::HashMap;

/// Classifies commits using a label table and a title keyword table
#[derive(Debug, Clone)]
pub struct CommitClassifier {
    labels: HashMap<String, ChangeKind>,
    keywords: HashMap<String, ChangeKind>,
}

impl CommitClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        CommitClassifier {
            labels: config.labels.clone(),
            keywords: config
                .keywords
                .iter()
                .map(|(keyword, kind)| (keyword.to_lowercase(), *kind))
                .collect(),
        }
    }

    /// Determine the change kind of a commit.
    ///
    /// Labels are checked first; the title is only scanned when no label matches.
    /// The most significant match wins.
    pub fn classify(&self, commit: &Commit) -> ChangeKind {
        let from_labels = commit
            .labels
            .iter()
            .filter_map(|label| self.labels.get(label).copied())
            .max_by_key(ChangeKind::significance);

        if let Some(kind) = from_labels {
            return kind;
        }

        commit
            .title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .filter_map(|word| self.keywords.get(&word.to_lowercase()).copied())
            .max_by_key(ChangeKind::significance)
            .unwrap_or(ChangeKind::None)
    }

    /// Bucket commits by kind in display order, keeping forge order within a bucket
    pub fn group<'a, I>(&self, commits: I) -> GroupedCommits
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut grouped = GroupedCommits::default();
        for commit in commits {
            let kind = self.classify(commit);
            grouped.push(kind, commit.clone());
        }
        grouped
    }
}

impl Default for CommitClassifier {
    fn default() -> Self {
        CommitClassifier::new(&ClassifierConfig::default())
    }
}

/// Commits bucketed by change kind, iterated in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCommits {
    buckets: Vec<(ChangeKind, Vec<Commit>)>,
}

impl GroupedCommits {
    fn push(&mut self, kind: ChangeKind, commit: Commit) {
        match self.buckets.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, commits)) => commits.push(commit),
            None => {
                self.buckets.push((kind, vec![commit]));
                self.buckets.sort_by_key(|(k, _)| *k);
            }
        }
    }

    /// Non-empty buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (ChangeKind, &[Commit])> {
        self.buckets
            .iter()
            .map(|(kind, commits)| (*kind, commits.as_slice()))
    }

    pub fn get(&self, kind: ChangeKind) -> Option<&[Commit]> {
        self.iter().find(|(k, _)| *k == kind).map(|(_, c)| c)
    }

    /// Kinds present, in display order
    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.buckets.iter().map(|(kind, _)| *kind).collect()
    }

    /// Most significant kind present, e.g. to suggest a bump
    pub fn highest(&self) -> Option<ChangeKind> {
        self.buckets
            .iter()
            .map(|(kind, _)| *kind)
            .find(|kind| *kind != ChangeKind::None)
    }

    pub fn commit_count(&self) -> usize {
        self.buckets.iter().map(|(_, commits)| commits.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
