use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TaggedCommit};
use git2::Oid;
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch_heads: HashMap<String, Oid>,
    branch_tags: HashMap<String, Vec<TaggedCommit>>,
    rejected_names: HashSet<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branch_heads: HashMap::new(),
            branch_tags: HashMap::new(),
            rejected_names: HashSet::new(),
        }
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Add a tag reachable from `branch`
    pub fn add_branch_tag(&mut self, branch: impl Into<String>, tag: impl Into<String>, oid: Oid) {
        self.branch_tags
            .entry(branch.into())
            .or_default()
            .push(TaggedCommit::new(tag, oid));
    }

    /// Make the ref name check fail for `name`, on top of git's own rules
    pub fn reject_branch_name(&mut self, name: impl Into<String>) {
        self.rejected_names.insert(name.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_valid_branch_name(&self, name: &str) -> bool {
        !self.rejected_names.contains(name) && super::is_valid_branch_name(name)
    }

    fn get_branch_head_oid(&self, branch_name: &str) -> Result<Oid> {
        self.branch_heads
            .get(branch_name)
            .copied()
            .ok_or_else(|| ReleaseError::config(format!("Branch not found: {}", branch_name)))
    }

    fn tags_on_branch(&self, branch_name: &str) -> Result<Vec<TaggedCommit>> {
        Ok(self
            .branch_tags
            .get(branch_name)
            .cloned()
            .unwrap_or_default())
    }
}
