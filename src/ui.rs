//! Terminal output formatting.
//!
//! Formatting is split from printing so the rendered text can be tested.

use console::style;

use crate::domain::{BranchType, NormalizedBranch};
use crate::error::BranchErrors;
use crate::last_release::LastRelease;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print every branch configuration error, one per line, code first.
pub fn display_branch_errors(errors: &BranchErrors) {
    display_error(&format!(
        "The branch configuration has {} error(s):",
        errors.len()
    ));
    for line in format_branch_errors(errors) {
        eprintln!("{}", line);
    }
}

/// Render branch errors as `  CODE message` lines.
pub fn format_branch_errors(errors: &BranchErrors) -> Vec<String> {
    errors
        .iter()
        .map(|error| {
            let message = error.to_string();
            let detail = message
                .strip_prefix(error.code())
                .unwrap_or(&message)
                .trim_start();
            format!("  {} {}", style(error.code()).red().bold(), detail)
        })
        .collect()
}

/// Print the validated branches grouped by type.
pub fn display_branches(branches: &[NormalizedBranch]) {
    for line in format_branches(branches) {
        println!("{}", line);
    }
}

/// Render branches grouped under a heading per type, skipping empty groups.
pub fn format_branches(branches: &[NormalizedBranch]) -> Vec<String> {
    let mut lines = Vec::new();

    for branch_type in [
        BranchType::Maintenance,
        BranchType::Release,
        BranchType::Prerelease,
    ] {
        let group: Vec<&NormalizedBranch> = branches
            .iter()
            .filter(|b| b.branch_type() == branch_type)
            .collect();
        if group.is_empty() {
            continue;
        }

        lines.push(format!("{}", style(format!("{} branches:", branch_type)).bold()));
        for branch in group {
            lines.push(format!("  - {}", describe_branch(branch)));
        }
    }

    lines
}

fn describe_branch(branch: &NormalizedBranch) -> String {
    let mut line = branch.name.clone();
    if let Some(range) = branch.range() {
        line.push_str(&format!(" (range {})", range));
    }
    if let Some(identifier) = branch.prerelease() {
        line.push_str(&format!(" (prerelease {})", identifier));
    }
    if let Some(channel) = &branch.channel {
        line.push_str(&format!(" [channel {}]", channel));
    }
    line
}

/// Print the last release of a branch.
pub fn display_last_release(branch: &str, last_release: Option<&LastRelease>) {
    match last_release {
        Some(release) => display_success(&format_last_release(branch, release)),
        None => display_status(&format!("No release found on branch '{}'", branch)),
    }
}

/// Render a found release on one line.
pub fn format_last_release(branch: &str, release: &LastRelease) -> String {
    let mut line = format!(
        "Last release on branch '{}': {} (tag {}, commit {})",
        branch,
        release.version,
        release.git_tag,
        short_hash(&release.git_head)
    );
    if let Some(channel) = &release.channel {
        line.push_str(&format!(" on channel {}", channel));
    }
    line
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Display configured branch names.
pub fn display_available_branches(branches: &[&str]) {
    println!("{}", style("Configured branches:").bold());
    for branch in branches {
        println!("  - {}", branch);
    }
}
