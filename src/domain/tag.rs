use crate::error::{ReleaseError, Result};
use regex::Regex;

/// A release previously tagged on a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    /// Version part of the tag name; not guaranteed to be valid semver
    pub version: String,
    /// Full git tag name
    pub git_tag: String,
    /// Sha of the tagged commit
    pub git_head: String,
    /// Distribution channel the release was published on
    pub channel: Option<String>,
}

impl ReleaseTag {
    pub fn new(
        version: impl Into<String>,
        git_tag: impl Into<String>,
        git_head: impl Into<String>,
    ) -> Self {
        ReleaseTag {
            version: version.into(),
            git_tag: git_tag.into(),
            git_head: git_head.into(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// Tag naming template (e.g. "v{version}", "release-{version}").
///
/// The version part may carry a channel suffix: `v{version}` renders
/// version `1.0.0` on channel `next` as `v1.0.0@next`.
#[derive(Debug, Clone)]
pub struct TagFormat {
    pattern: String,
    matcher: Regex,
}

impl TagFormat {
    pub const PLACEHOLDER: &'static str = "{version}";

    /// Create a tag format, checking it has exactly one `{version}`
    /// placeholder and renders to a legal tag name.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        if pattern.matches(Self::PLACEHOLDER).count() != 1 {
            return Err(ReleaseError::tag_format(format!(
                "'{}' must contain the {} placeholder exactly once",
                pattern,
                Self::PLACEHOLDER
            )));
        }

        let sample = pattern.replace(Self::PLACEHOLDER, "0.0.0");
        if !git2::Reference::is_valid_name(&format!("refs/tags/{}", sample)) {
            return Err(ReleaseError::tag_format(format!(
                "'{}' does not produce valid git tag names",
                pattern
            )));
        }

        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", "(.+)");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| ReleaseError::tag_format(format!("Invalid pattern: {}", e)))?;

        Ok(TagFormat { pattern, matcher })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render the tag name for `version`, optionally published on `channel`.
    pub fn format(&self, version: &str, channel: Option<&str>) -> String {
        let version_part = match channel {
            Some(channel) => format!("{}@{}", version, channel),
            None => version.to_string(),
        };
        self.pattern.replace(Self::PLACEHOLDER, &version_part)
    }

    /// Split a tag name back into its version and channel, or `None` if the
    /// tag was not produced by this format.
    pub fn parse(&self, tag: &str) -> Option<(String, Option<String>)> {
        let version_part = self.matcher.captures(tag)?.get(1)?.as_str();

        match version_part.rsplit_once('@') {
            Some((version, channel)) if !version.is_empty() && !channel.is_empty() => {
                Some((version.to_string(), Some(channel.to_string())))
            }
            _ => Some((version_part.to_string(), None)),
        }
    }
}
