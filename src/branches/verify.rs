//! Structural checks on the raw branch configuration.

use std::collections::HashSet;

use crate::domain::{BranchEntry, BranchSpec};
use crate::error::{BranchError, BranchErrors};
use crate::git::Repository;

/// Check every entry's shape and name, recording problems in `errors`.
///
/// Produces, in order: one `EINVALIDBRANCH` per entry without a non-blank
/// name, a single `EDUPLICATEBRANCHES` listing every repeated name, and one
/// `EINVALIDBRANCHNAME` per name git rejects. Every entry is checked even
/// after a failure.
///
/// Returns the well-formed specs, keeping the first occurrence of each name.
pub fn verify<'a, R: Repository + ?Sized>(
    entries: &'a [BranchEntry],
    repo: &R,
    errors: &mut BranchErrors,
) -> Vec<&'a BranchSpec> {
    for entry in entries {
        if entry.valid_name().is_none() {
            errors.push(BranchError::InvalidBranch {
                branch: entry.to_string(),
            });
        }
    }

    let duplicates = duplicate_names(entries);
    if !duplicates.is_empty() {
        errors.push(BranchError::DuplicateBranches { duplicates });
    }

    for name in entries.iter().filter_map(BranchEntry::valid_name) {
        if !repo.is_valid_branch_name(name) {
            errors.push(BranchError::InvalidBranchName {
                name: name.to_string(),
            });
        }
    }

    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(BranchEntry::spec)
        .filter(|spec| !spec.name.trim().is_empty())
        .filter(|&spec| seen.insert(spec.name.trim()))
        .collect()
}

/// Names appearing more than once, each reported once, in sorted order.
fn duplicate_names(entries: &[BranchEntry]) -> Vec<String> {
    let mut names: Vec<&str> = entries
        .iter()
        .filter_map(BranchEntry::valid_name)
        .map(str::trim)
        .collect();
    names.sort_unstable();

    names
        .iter()
        .enumerate()
        .filter(|&(idx, name)| {
            names.get(idx + 1) == Some(name) && (idx == 0 || names[idx - 1] != *name)
        })
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn run(entries: &[BranchEntry]) -> (Vec<String>, BranchErrors) {
        let repo = MockRepository::new();
        let mut errors = BranchErrors::new();
        let names = verify(entries, &repo, &mut errors)
            .into_iter()
            .map(|spec| spec.name.clone())
            .collect();
        (names, errors)
    }

    #[test]
    fn test_valid_branches() {
        let entries = vec![
            BranchEntry::from("master"),
            BranchEntry::from("next"),
            BranchEntry::from("beta"),
        ];
        let (names, errors) = run(&entries);

        assert!(errors.is_empty());
        assert_eq!(names, vec!["master", "next", "beta"]);
    }

    #[test]
    fn test_every_problem_is_reported() {
        let entries = vec![
            BranchEntry::from(""),
            BranchEntry::Invalid("false".to_string()),
            BranchEntry::Invalid("{}".to_string()),
            BranchEntry::from("   "),
            BranchEntry::from("master"),
            BranchEntry::from("master"),
            BranchEntry::from("master"),
            BranchEntry::from("master"),
            BranchEntry::from("test:"),
        ];
        let (names, errors) = run(&entries);

        assert_eq!(
            errors.codes(),
            vec![
                "EINVALIDBRANCH",
                "EINVALIDBRANCH",
                "EINVALIDBRANCH",
                "EINVALIDBRANCH",
                "EDUPLICATEBRANCHES",
                "EINVALIDBRANCHNAME",
            ]
        );
        assert_eq!(names, vec!["master", "test:"]);
    }

    #[test]
    fn test_duplicates_reported_once_each() {
        let entries: Vec<BranchEntry> = ["b", "a", "b", "a", "a", "c"]
            .iter()
            .map(|name| BranchEntry::from(*name))
            .collect();

        assert_eq!(duplicate_names(&entries), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_compare_trimmed_names() {
        let entries = vec![BranchEntry::from("master"), BranchEntry::from(" master ")];
        assert_eq!(duplicate_names(&entries), vec!["master"]);
    }

    #[test]
    fn test_rejected_names_each_reported() {
        let mut repo = MockRepository::new();
        repo.reject_branch_name("release");
        let entries = vec![
            BranchEntry::from("release"),
            BranchEntry::from("~invalid"),
            BranchEntry::from("master"),
        ];
        let mut errors = BranchErrors::new();
        verify(&entries, &repo, &mut errors);

        let rejected: Vec<BranchError> = errors.into_iter().collect();
        assert_eq!(
            rejected,
            vec![
                BranchError::InvalidBranchName {
                    name: "release".to_string()
                },
                BranchError::InvalidBranchName {
                    name: "~invalid".to_string()
                },
            ]
        );
    }
}
