use std::fmt;

use thiserror::Error;

use crate::domain::NormalizedBranch;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{0}")]
    Branches(#[from] BranchErrors),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag format error: {0}")]
    TagFormat(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a tag format error with context
    pub fn tag_format(msg: impl Into<String>) -> Self {
        ReleaseError::TagFormat(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }
}

/// A single violated branch configuration invariant.
///
/// Every variant maps to a stable code (see [`BranchError::code`]) which is
/// also the first word of its rendered message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BranchError {
    #[error("EINVALIDBRANCH A branch must be a table with a non-empty `name`, got: {branch}")]
    InvalidBranch { branch: String },

    #[error("EDUPLICATEBRANCHES Each branch must have a unique name, duplicated: {}", quoted(.duplicates))]
    DuplicateBranches { duplicates: Vec<String> },

    #[error("EINVALIDBRANCHNAME The branch name `{name}` is not a valid git reference name")]
    InvalidBranchName { name: String },

    #[error(
        "ELTSBRANCHES Each maintenance branch must have a unique range, found: {}",
        with_ranges(.branches)
    )]
    MaintenanceBranches { branches: Vec<NormalizedBranch> },

    #[error(
        "ERELEASEBRANCHES Between 1 and 3 release branches are required, found {}: {}",
        count(.branches),
        names(.branches)
    )]
    ReleaseBranches { branches: Vec<NormalizedBranch> },

    #[error(
        "EPRERELEASEBRANCHES Each prerelease branch must have a unique identifier, found: {}",
        with_identifiers(.branches)
    )]
    PrereleaseBranches { branches: Vec<NormalizedBranch> },

    #[error(
        "EUNKNOWNBRANCH These branches match no maintenance, release or prerelease definition: {}",
        quoted(.names)
    )]
    UnknownBranch { names: Vec<String> },
}

impl BranchError {
    /// The stable error code callers match on.
    pub fn code(&self) -> &'static str {
        match self {
            BranchError::InvalidBranch { .. } => "EINVALIDBRANCH",
            BranchError::DuplicateBranches { .. } => "EDUPLICATEBRANCHES",
            BranchError::InvalidBranchName { .. } => "EINVALIDBRANCHNAME",
            BranchError::MaintenanceBranches { .. } => "ELTSBRANCHES",
            BranchError::ReleaseBranches { .. } => "ERELEASEBRANCHES",
            BranchError::PrereleaseBranches { .. } => "EPRERELEASEBRANCHES",
            BranchError::UnknownBranch { .. } => "EUNKNOWNBRANCH",
        }
    }
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("`{}`", v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn count(branches: &[NormalizedBranch]) -> usize {
    branches.len()
}

fn names(branches: &[NormalizedBranch]) -> String {
    branches
        .iter()
        .map(|b| format!("`{}`", b.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_ranges(branches: &[NormalizedBranch]) -> String {
    branches
        .iter()
        .map(|b| match b.range() {
            Some(range) => format!("`{}` ({})", b.name, range),
            None => format!("`{}`", b.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_identifiers(branches: &[NormalizedBranch]) -> String {
    branches
        .iter()
        .map(|b| match b.prerelease() {
            Some(id) => format!("`{}` ({})", b.name, id),
            None => format!("`{}`", b.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every branch configuration problem found in one validation pass, in
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchErrors {
    errors: Vec<BranchError>,
}

impl BranchErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: BranchError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BranchError> {
        self.errors.iter()
    }

    /// Codes of the collected errors, in order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.errors.iter().map(BranchError::code).collect()
    }

    /// `Ok(value)` when nothing was collected, otherwise the whole aggregate.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, BranchErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for BranchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} branch configuration error(s)",
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BranchErrors {}

impl IntoIterator for BranchErrors {
    type Item = BranchError;
    type IntoIter = std::vec::IntoIter<BranchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a BranchErrors {
    type Item = &'a BranchError;
    type IntoIter = std::slice::Iter<'a, BranchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
