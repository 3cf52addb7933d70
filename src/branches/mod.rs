//! Branch graph construction.
//!
//! Turns the configured `branches` list into a validated set of
//! [NormalizedBranch] values in a single pass:
//!
//! 1. structural checks ([verify::verify]) on every entry
//! 2. classification, normalization and validation per category, in
//!    [definitions::DEFINITIONS] order (maintenance, release, prerelease)
//! 3. a coverage check for names no category claimed
//!
//! Problems found at any step are accumulated; the result is either the
//! complete branch list or every error at once, never a partial list.

pub mod definitions;
pub mod verify;

use std::collections::HashSet;

use crate::domain::{BranchEntry, NormalizedBranch};
use crate::error::{BranchError, BranchErrors};
use crate::git::Repository;

use definitions::DEFINITIONS;

/// Classify, normalize and validate the configured branches.
///
/// On success the branches are grouped by category (maintenance sorted by
/// range, release and prerelease in declaration order). On failure every
/// discovered error is returned, structural ones first, then per category,
/// then unknown branches.
pub fn build_branches<R: Repository + ?Sized>(
    entries: &[BranchEntry],
    repo: &R,
) -> Result<Vec<NormalizedBranch>, BranchErrors> {
    let mut errors = BranchErrors::new();
    let specs = verify::verify(entries, repo, &mut errors);

    let mut branches = Vec::new();
    for definition in &DEFINITIONS {
        let matched: Vec<_> = specs
            .iter()
            .copied()
            .filter(|spec| (definition.matches)(spec))
            .collect();
        let normalized = (definition.normalize)(&matched);

        log::debug!(
            "{} branches: {:?}",
            definition.branch_type,
            normalized.iter().map(|b| &b.name).collect::<Vec<_>>()
        );

        if !(definition.validate)(&normalized) {
            errors.push((definition.error)(normalized.clone()));
        }
        branches.extend(normalized);
    }

    let known: HashSet<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    let unknowns: Vec<String> = specs
        .iter()
        .filter(|spec| !known.contains(spec.name.as_str()))
        .map(|spec| spec.name.clone())
        .collect();
    if !unknowns.is_empty() {
        errors.push(BranchError::UnknownBranch { names: unknowns });
    }

    errors.into_result(branches)
}
