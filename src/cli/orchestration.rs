//! Workflow orchestration logic
//!
//! The commands exposed by the binary, callable programmatically against
//! any [Repository] without depending on clap.

use crate::branches::build_branches;
use crate::config::Config;
use crate::domain::NormalizedBranch;
use crate::error::{ReleaseError, Result};
use crate::git::{attach_tags, Repository};
use crate::last_release::{last_release, parse_version, LastRelease};

/// Result of resolving the last release of one branch
#[derive(Debug, Clone, PartialEq)]
pub struct LastReleaseReport {
    /// The branch, with its release tags attached
    pub branch: NormalizedBranch,

    /// `None` when nothing was released on the branch yet
    pub last_release: Option<LastRelease>,
}

/// Validate the configured tag format and branches.
///
/// # Returns
///
/// The normalized branches, or every branch configuration error at once
/// ([ReleaseError::Branches]).
pub fn run_verify<R: Repository + ?Sized>(config: &Config, repo: &R) -> Result<Vec<NormalizedBranch>> {
    config.tag_format()?;
    let branches = build_branches(&config.branches, repo)?;
    log::info!("Validated {} branches", branches.len());
    Ok(branches)
}

/// Resolve the last release of `branch_name`.
///
/// Validates the whole configuration first, attaches the tags reachable
/// from the branch, then picks the highest qualifying one, lower than
/// `before` when given.
pub fn run_last_release<R: Repository + ?Sized>(
    config: &Config,
    repo: &R,
    branch_name: &str,
    before: Option<&str>,
) -> Result<LastReleaseReport> {
    let format = config.tag_format()?;
    let before = before
        .map(|version| {
            parse_version(version).ok_or_else(|| {
                ReleaseError::version(format!("'{}' is not a valid semantic version", version))
            })
        })
        .transpose()?;

    let branch = build_branches(&config.branches, repo)?
        .into_iter()
        .find(|branch| branch.name == branch_name)
        .ok_or_else(|| {
            ReleaseError::config(format!(
                "Branch '{}' is not configured for releases",
                branch_name
            ))
        })?;

    let branch = attach_tags(branch, repo, &format)?;
    let last_release = last_release(&branch, before.as_ref());

    Ok(LastReleaseReport {
        branch,
        last_release,
    })
}
