//! Git operations abstraction layer
//!
//! Branch validation and release resolution only need three things from
//! version control: whether a name is a legal branch reference, where a
//! branch head is, and which tags are reachable from it. The [Repository]
//! trait captures exactly that, so the engine can run against a real
//! repository or against a mock in tests.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! ```rust
//! # use git_release::git::{attach_tags, Repository};
//! # use git_release::domain::{NormalizedBranch, TagFormat};
//! # fn example<R: Repository>(repo: &R, branch: NormalizedBranch) -> git_release::Result<()> {
//! let format = TagFormat::new("v{version}")?;
//! let branch = attach_tags(branch, repo, &format)?;
//! println!("{} tags on {}", branch.tags.len(), branch.name);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{NormalizedBranch, ReleaseTag, TagFormat};
use crate::error::Result;
use git2::Oid;

/// A tag and the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedCommit {
    pub tag: String,
    pub commit: Oid,
}

impl TaggedCommit {
    pub fn new(tag: impl Into<String>, commit: Oid) -> Self {
        TaggedCommit {
            tag: tag.into(),
            commit,
        }
    }
}

/// Whether `name` is acceptable as a local branch name (`refs/heads/<name>`).
pub fn is_valid_branch_name(name: &str) -> bool {
    git2::Reference::is_valid_name(&format!("refs/heads/{}", name))
}

/// Version control operations needed to validate branches and resolve releases.
pub trait Repository {
    /// Check that `name` is a legal branch reference name.
    ///
    /// The default follows git's `check-ref-format` rules.
    fn is_valid_branch_name(&self, name: &str) -> bool {
        is_valid_branch_name(name)
    }

    /// Get the OID of a branch's HEAD
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object ID of the branch's HEAD commit
    /// * `Err` - If the branch doesn't exist or if there's a Git error
    fn get_branch_head_oid(&self, branch_name: &str) -> Result<Oid>;

    /// List the tags whose commit is the branch head or one of its ancestors.
    ///
    /// Tags that do not point (directly or through an annotated tag) at a
    /// commit are skipped.
    fn tags_on_branch(&self, branch_name: &str) -> Result<Vec<TaggedCommit>>;
}

/// Attach the release tags reachable from `branch` to it.
///
/// Only tags produced by `format` are kept; their version part is stored
/// as-is, so tags with a non-semver version are attached and later ignored
/// by release resolution.
pub fn attach_tags<R: Repository + ?Sized>(
    branch: NormalizedBranch,
    repo: &R,
    format: &TagFormat,
) -> Result<NormalizedBranch> {
    let tags: Vec<ReleaseTag> = repo
        .tags_on_branch(&branch.name)?
        .into_iter()
        .filter_map(|tagged| match format.parse(&tagged.tag) {
            Some((version, channel)) => Some(ReleaseTag {
                version,
                git_tag: tagged.tag,
                git_head: tagged.commit.to_string(),
                channel,
            }),
            None => {
                log::debug!(
                    "Ignoring tag {} not matching format {}",
                    tagged.tag,
                    format.pattern()
                );
                None
            }
        })
        .collect();

    log::debug!("Found {} release tags on branch {}", tags.len(), branch.name);
    Ok(branch.with_tags(tags))
}
