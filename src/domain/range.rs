//! Version ranges attached to branches.
//!
//! Maintenance branches are restricted to a tiny range grammar: a single-digit
//! major, then either a single-digit minor or `x`, optionally followed by
//! `.x` (`1.x`, `1.2.x`, `1.x.x`).
//!
//! Any npm-style range expression counts as a "range name" for the purpose
//! of excluding it from the release and prerelease categories: `||`
//! alternatives of space separated comparators, each optionally prefixed
//! with `v` or `=` (`v2`, `>=1.0.0 <2`, `1.x || 2.x`). Comparators are
//! checked with the `semver` crate once rewritten into its syntax.

use regex::Regex;
use semver::VersionReq;
use std::fmt;
use std::sync::OnceLock;

fn maintenance_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)^[0-9]\.([0-9]|x)(\.x)?$").ok())
        .as_ref()
}

/// True when `value` has the shape of a maintenance range (`1.x`, `1.2.x`, `1.x.x`).
pub fn is_maintenance_range(value: &str) -> bool {
    maintenance_pattern().is_some_and(|re| re.is_match(value))
}

/// True when `value` is a version range expression.
///
/// Maintenance ranges always count, whether or not the requirement parser
/// accepts every spelling of them.
pub fn is_valid_range(value: &str) -> bool {
    is_maintenance_range(value) || value.split("||").all(is_valid_comparator_set)
}

const OPERATORS: [&str; 8] = [">=", "<=", "~>", ">", "<", "=", "~", "^"];

/// One `||` alternative. An empty one matches any version.
fn is_valid_comparator_set(set: &str) -> bool {
    let set = set.trim();
    if set.is_empty() || is_maintenance_range(set) {
        return true;
    }

    match comparators(set) {
        Some(comparators) => VersionReq::parse(&comparators.join(", ")).is_ok(),
        None => false,
    }
}

/// Split a space separated comparator set, joining operators written apart
/// from their version (`>= 1.0.0`).
fn comparators(set: &str) -> Option<Vec<String>> {
    let mut result = Vec::new();
    let mut pending = String::new();

    for token in set.split_whitespace() {
        pending.push_str(token);
        if OPERATORS.contains(&pending.as_str()) {
            continue;
        }
        result.push(comparator(&pending)?);
        pending.clear();
    }

    if pending.is_empty() {
        Some(result)
    } else {
        None
    }
}

/// Rewrite one comparator for the `semver` crate: `~>` becomes `~` and any
/// `v`/`=` between the operator and the version is dropped.
fn comparator(value: &str) -> Option<String> {
    let operator = OPERATORS
        .iter()
        .find(|op| value.starts_with(**op))
        .copied()
        .unwrap_or("");
    let version = value[operator.len()..].trim_start_matches(['v', '=']);
    if version.is_empty() {
        return None;
    }

    let operator = if operator == "~>" { "~" } else { operator };
    Some(format!("{}{}", operator, version))
}

/// A parsed maintenance range.
///
/// `1.x` and `1.x.x` parse to the same value. Ordering follows the range's
/// lower bound, with the wider range first on a tie, so `1.x < 1.0.x < 1.2.x < 2.x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaintenanceRange {
    pub major: u64,
    pub minor: Option<u64>,
}

impl MaintenanceRange {
    /// Parse a maintenance range, returning `None` if `value` is not one.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = maintenance_pattern()?.captures(value)?;
        let major = value.get(..1)?.parse::<u64>().ok()?;
        let minor = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u64>().ok());

        Some(MaintenanceRange { major, minor })
    }
}

impl fmt::Display for MaintenanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}.x", self.major, minor),
            None => write!(f, "{}.x", self.major),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_range_shapes() {
        assert!(is_maintenance_range("1.x.x"));
        assert!(is_maintenance_range("1.0.x"));
        assert!(is_maintenance_range("1.x"));
        assert!(is_maintenance_range("1.X"));
        assert!(is_maintenance_range("2.5"));

        assert!(!is_maintenance_range("some-name"));
        assert!(!is_maintenance_range("1.0.0"));
        assert!(!is_maintenance_range("x.x.x"));
        assert!(!is_maintenance_range("10.x"));
        assert!(!is_maintenance_range("1.x.x.x"));
        assert!(!is_maintenance_range(""));
    }

    #[test]
    fn test_valid_range_names() {
        assert!(is_valid_range("1.x"));
        assert!(is_valid_range("1.0.0"));
        assert!(is_valid_range("*"));

        assert!(!is_valid_range("master"));
        assert!(!is_valid_range("next"));
        assert!(!is_valid_range("beta"));
        assert!(!is_valid_range("some-name"));
    }

    #[test]
    fn test_npm_style_ranges() {
        assert!(is_valid_range("v1"));
        assert!(is_valid_range("v2"));
        assert!(is_valid_range("v1.0.0"));
        assert!(is_valid_range("=v1.0.0"));
        assert!(is_valid_range("~1.2"));
        assert!(is_valid_range("~>1.2"));
        assert!(is_valid_range(">=v1.0.0"));
        assert!(is_valid_range("1||2"));
        assert!(is_valid_range("1.x || 2.x"));
        assert!(is_valid_range("1.x.x || 2.x.x"));
        assert!(is_valid_range(">=1.0.0 <2.0.0"));
        assert!(is_valid_range(">= 1.0.0"));

        assert!(!is_valid_range("v"));
        assert!(!is_valid_range("vnext"));
        assert!(!is_valid_range("next-major"));
        assert!(!is_valid_range("1||next"));
        assert!(!is_valid_range(">="));
    }

    #[test]
    fn test_comparator_rewrite() {
        assert_eq!(comparator("v2").as_deref(), Some("2"));
        assert_eq!(comparator("=v1.0.0").as_deref(), Some("=1.0.0"));
        assert_eq!(comparator("~>1.2").as_deref(), Some("~1.2"));
        assert_eq!(comparator(">=v1").as_deref(), Some(">=1"));
        assert_eq!(comparator("v"), None);
    }

    #[test]
    fn test_parse_equivalent_spellings() {
        assert_eq!(MaintenanceRange::parse("1.x"), MaintenanceRange::parse("1.x.x"));
        assert_eq!(MaintenanceRange::parse("1.X.x"), MaintenanceRange::parse("1.x"));
        assert_ne!(MaintenanceRange::parse("1.x"), MaintenanceRange::parse("1.0.x"));
        assert_eq!(
            MaintenanceRange::parse("1.2"),
            Some(MaintenanceRange {
                major: 1,
                minor: Some(2)
            })
        );
        assert_eq!(MaintenanceRange::parse("master"), None);
    }

    #[test]
    fn test_ordering_by_lower_bound() {
        let mut ranges: Vec<MaintenanceRange> = ["2.x", "1.2.x", "1.x", "1.0.x"]
            .iter()
            .filter_map(|r| MaintenanceRange::parse(r))
            .collect();
        ranges.sort();

        let rendered: Vec<String> = ranges.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["1.x", "1.0.x", "1.2.x", "2.x"]);
    }
}
