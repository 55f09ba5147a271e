use std::fmt;

/// A repository on the forge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub default_branch: String,
    /// Upstream repository when this one is a fork
    pub parent: Option<Box<Repository>>,
}

impl Repository {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        default_branch: impl Into<String>,
    ) -> Self {
        Repository {
            owner: owner.into(),
            name: name.into(),
            default_branch: default_branch.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Repository) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// `owner/name` identifier
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn is_fork(&self) -> bool {
        self.parent.is_some()
    }

    /// The repository changelogs are generated for: the parent of a fork, else itself.
    ///
    /// Follows the parent link a single hop; the parent's own parent is ignored.
    pub fn upstream(self) -> Repository {
        match self.parent {
            Some(parent) => *parent,
            None => self,
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Split an `owner/name` identifier
pub fn split_identifier(identifier: &str) -> Option<(&str, &str)> {
    let (owner, name) = identifier.trim().split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((owner, name))
}
