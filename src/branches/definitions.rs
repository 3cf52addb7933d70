//! Per-category branch rules.
//!
//! Each category is a [BranchDefinition] bundling how a configured branch is
//! recognised, how matching branches are normalized, which invariant the
//! normalized set must satisfy, and the error raised when it does not.
//! [DEFINITIONS] fixes the order categories are processed and reported in.

use std::collections::HashSet;

use crate::domain::{
    is_maintenance_range, is_valid_range, BranchKind, BranchSpec, BranchType, MaintenanceRange,
    NormalizedBranch, Prerelease,
};
use crate::error::BranchError;

/// Release branches allowed at most
pub const MAX_RELEASE_BRANCHES: usize = 3;

pub struct BranchDefinition {
    pub branch_type: BranchType,
    /// Whether a configured branch belongs to this category
    pub matches: fn(&BranchSpec) -> bool,
    /// Resolve category data for the matched branches
    pub normalize: fn(&[&BranchSpec]) -> Vec<NormalizedBranch>,
    /// Invariant over every normalized branch of the category
    pub validate: fn(&[NormalizedBranch]) -> bool,
    pub error: fn(Vec<NormalizedBranch>) -> BranchError,
}

pub const DEFINITIONS: [BranchDefinition; 3] = [MAINTENANCE, RELEASE, PRERELEASE];

pub const MAINTENANCE: BranchDefinition = BranchDefinition {
    branch_type: BranchType::Maintenance,
    matches: is_maintenance,
    normalize: normalize_maintenance,
    validate: unique_ranges,
    error: maintenance_error,
};

pub const RELEASE: BranchDefinition = BranchDefinition {
    branch_type: BranchType::Release,
    matches: is_release,
    normalize: normalize_release,
    validate: release_count_in_bounds,
    error: release_error,
};

pub const PRERELEASE: BranchDefinition = BranchDefinition {
    branch_type: BranchType::Prerelease,
    matches: is_prerelease,
    normalize: normalize_prerelease,
    validate: unique_identifiers,
    error: prerelease_error,
};

/// A maintenance branch declares a maintenance range, or is named like one,
/// and has no prerelease setting.
pub fn is_maintenance(spec: &BranchSpec) -> bool {
    let range = spec.range.as_deref().unwrap_or(&spec.name);
    is_maintenance_range(range) && spec.prerelease.is_none()
}

/// A release branch has neither range nor prerelease setting and is not
/// named like a range.
pub fn is_release(spec: &BranchSpec) -> bool {
    spec.range.is_none() && spec.prerelease.is_none() && !is_valid_range(&spec.name)
}

/// A prerelease branch has `prerelease = true` or a non-empty identifier,
/// no range, and is not named like a range.
pub fn is_prerelease(spec: &BranchSpec) -> bool {
    let flagged = match &spec.prerelease {
        Some(Prerelease::Flag(flag)) => *flag,
        Some(Prerelease::Identifier(id)) => !id.is_empty(),
        None => false,
    };
    flagged && spec.range.is_none() && !is_valid_range(&spec.name)
}

fn normalize_maintenance(specs: &[&BranchSpec]) -> Vec<NormalizedBranch> {
    let mut branches: Vec<NormalizedBranch> = specs
        .iter()
        .filter_map(|spec| {
            let range = MaintenanceRange::parse(spec.range.as_deref().unwrap_or(&spec.name))?;
            Some(normalized(spec, BranchKind::Maintenance { range }))
        })
        .collect();

    // stable, so equivalent ranges keep declaration order
    branches.sort_by_key(|branch| branch.range());
    branches
}

fn normalize_release(specs: &[&BranchSpec]) -> Vec<NormalizedBranch> {
    specs
        .iter()
        .map(|spec| normalized(spec, BranchKind::Release))
        .collect()
}

fn normalize_prerelease(specs: &[&BranchSpec]) -> Vec<NormalizedBranch> {
    specs
        .iter()
        .map(|spec| {
            let identifier = match &spec.prerelease {
                Some(Prerelease::Identifier(id)) => id.clone(),
                _ => spec.name.clone(),
            };
            normalized(spec, BranchKind::Prerelease { identifier })
        })
        .collect()
}

fn normalized(spec: &BranchSpec, kind: BranchKind) -> NormalizedBranch {
    NormalizedBranch {
        name: spec.name.clone(),
        channel: spec.channel.clone(),
        kind,
        tags: Vec::new(),
    }
}

fn unique_ranges(branches: &[NormalizedBranch]) -> bool {
    let ranges: HashSet<MaintenanceRange> =
        branches.iter().filter_map(NormalizedBranch::range).collect();
    ranges.len() == branches.len()
}

fn release_count_in_bounds(branches: &[NormalizedBranch]) -> bool {
    (1..=MAX_RELEASE_BRANCHES).contains(&branches.len())
}

fn unique_identifiers(branches: &[NormalizedBranch]) -> bool {
    let identifiers: HashSet<&str> = branches
        .iter()
        .filter_map(NormalizedBranch::prerelease)
        .collect();
    identifiers.len() == branches.len()
}

fn maintenance_error(branches: Vec<NormalizedBranch>) -> BranchError {
    BranchError::MaintenanceBranches { branches }
}

fn release_error(branches: Vec<NormalizedBranch>) -> BranchError {
    BranchError::ReleaseBranches { branches }
}

fn prerelease_error(branches: Vec<NormalizedBranch>) -> BranchError {
    BranchError::PrereleaseBranches { branches }
}
