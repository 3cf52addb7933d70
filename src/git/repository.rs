use crate::error::{ReleaseError, Result};
use crate::git::TaggedCommit;
use git2::{BranchType, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn get_branch_head_oid(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| {
                ReleaseError::config(format!("Cannot find branch '{}': {}", branch_name, e))
            })?;

        let commit = branch.into_reference().peel_to_commit()?;
        Ok(commit.id())
    }

    fn tags_on_branch(&self, branch_name: &str) -> Result<Vec<TaggedCommit>> {
        let head = self.get_branch_head_oid(branch_name)?;
        let names = self.repo.tag_names(None)?;

        let mut tagged = Vec::new();
        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(e) => {
                    log::warn!("Skipping tag {} not pointing at a commit: {}", name, e);
                    continue;
                }
            };

            if commit == head || self.repo.graph_descendant_of(head, commit)? {
                tagged.push(TaggedCommit::new(name, commit));
            }
        }

        Ok(tagged)
    }
}
