//! Last release resolution.
//!
//! The last release of a branch is its highest tagged version:
//!
//! - tags whose version is not valid semver are ignored
//! - maintenance and release branches only consider stable versions
//! - with `before`, only versions strictly lower than it are considered

use semver::Version;
use std::cmp::Ordering;

use crate::domain::{BranchType, NormalizedBranch};

/// The release a new version will be computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRelease {
    pub version: Version,
    pub git_tag: String,
    pub git_head: String,
    pub channel: Option<String>,
}

/// Parse a tag version, accepting a single `v` or `=` prefix.
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('='))
        .unwrap_or(version);
    Version::parse(version).ok()
}

/// Semver precedence: build metadata does not take part in the ordering.
pub fn compare_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Find the last release tagged on `branch`, optionally limited to versions
/// lower than `before`. `None` when no tag qualifies.
pub fn last_release(branch: &NormalizedBranch, before: Option<&Version>) -> Option<LastRelease> {
    let accepts_prerelease = branch.branch_type() == BranchType::Prerelease;

    let mut candidates: Vec<_> = branch
        .tags
        .iter()
        .filter_map(|tag| parse_version(&tag.version).map(|version| (version, tag)))
        .filter(|(version, _)| accepts_prerelease || version.pre.is_empty())
        .filter(|(version, _)| {
            before.map_or(true, |before| {
                compare_precedence(version, before) == Ordering::Less
            })
        })
        .collect();

    // highest first; stable, so the first declared tag wins a tie
    candidates.sort_by(|(a, _), (b, _)| compare_precedence(b, a));

    match candidates.into_iter().next() {
        Some((version, tag)) => {
            log::info!(
                "Found git tag {} associated with version {} on branch {}",
                tag.git_tag,
                version,
                branch.name
            );
            Some(LastRelease {
                version,
                git_tag: tag.git_tag.clone(),
                git_head: tag.git_head.clone(),
                channel: tag.channel.clone(),
            })
        }
        None => {
            log::info!("No git tag version found on branch {}", branch.name);
            None
        }
    }
}
