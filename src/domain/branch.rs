use serde::Deserialize;
use std::fmt;

use super::range::MaintenanceRange;
use super::tag::ReleaseTag;

/// The `prerelease` setting of a branch: a bare flag or an explicit identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerelease {
    Flag(bool),
    Identifier(String),
}

impl From<bool> for Prerelease {
    fn from(flag: bool) -> Self {
        Prerelease::Flag(flag)
    }
}

impl From<&str> for Prerelease {
    fn from(identifier: &str) -> Self {
        Prerelease::Identifier(identifier.to_string())
    }
}

impl From<String> for Prerelease {
    fn from(identifier: String) -> Self {
        Prerelease::Identifier(identifier)
    }
}

/// A branch as configured by the user, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchSpec {
    pub name: String,
    pub range: Option<String>,
    pub prerelease: Option<Prerelease>,
    pub channel: Option<String>,
}

impl BranchSpec {
    pub fn new(name: impl Into<String>) -> Self {
        BranchSpec {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_prerelease(mut self, prerelease: impl Into<Prerelease>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

impl fmt::Display for BranchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ name = {:?}", self.name)?;
        if let Some(range) = &self.range {
            write!(f, ", range = {:?}", range)?;
        }
        match &self.prerelease {
            Some(Prerelease::Flag(flag)) => write!(f, ", prerelease = {}", flag)?,
            Some(Prerelease::Identifier(id)) => write!(f, ", prerelease = {:?}", id)?,
            None => {}
        }
        if let Some(channel) = &self.channel {
            write!(f, ", channel = {:?}", channel)?;
        }
        write!(f, " }}")
    }
}

/// One entry of the `branches` configuration list.
///
/// Loading never fails on a malformed entry: it is kept as `Invalid` with
/// its rendered value so branch validation can report it with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "toml::Value")]
pub enum BranchEntry {
    Spec(BranchSpec),
    Invalid(String),
}

impl BranchEntry {
    /// The branch spec, if the entry has the right shape.
    pub fn spec(&self) -> Option<&BranchSpec> {
        match self {
            BranchEntry::Spec(spec) => Some(spec),
            BranchEntry::Invalid(_) => None,
        }
    }

    /// The configured name when it is a non-blank string.
    pub fn valid_name(&self) -> Option<&str> {
        self.spec()
            .map(|spec| spec.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

impl fmt::Display for BranchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchEntry::Spec(spec) => write!(f, "{}", spec),
            BranchEntry::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<BranchSpec> for BranchEntry {
    fn from(spec: BranchSpec) -> Self {
        BranchEntry::Spec(spec)
    }
}

impl From<&str> for BranchEntry {
    fn from(name: &str) -> Self {
        BranchEntry::Spec(BranchSpec::new(name))
    }
}

impl From<toml::Value> for BranchEntry {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(name) => BranchEntry::Spec(BranchSpec::new(name)),
            toml::Value::Table(table) => match spec_from_table(&table) {
                Some(spec) => BranchEntry::Spec(spec),
                None => BranchEntry::Invalid(toml::Value::Table(table).to_string()),
            },
            other => BranchEntry::Invalid(other.to_string()),
        }
    }
}

fn spec_from_table(table: &toml::Table) -> Option<BranchSpec> {
    let name = table.get("name")?.as_str()?.to_string();
    let prerelease = match table.get("prerelease") {
        None => None,
        Some(toml::Value::Boolean(flag)) => Some(Prerelease::Flag(*flag)),
        Some(toml::Value::String(id)) => Some(Prerelease::Identifier(id.clone())),
        // set, but neither enabling nor naming a prerelease
        Some(_) => Some(Prerelease::Flag(false)),
    };

    Some(BranchSpec {
        name,
        range: string_value(table, "range"),
        prerelease,
        channel: string_value(table, "channel"),
    })
}

/// Strings as-is, any other value rendered as TOML.
fn string_value(table: &toml::Table, key: &str) -> Option<String> {
    table.get(key).map(|value| match value {
        toml::Value::String(value) => value.clone(),
        other => other.to_string(),
    })
}

/// Release category of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchType {
    /// Backports fixes to an older version range (a.k.a. "lts")
    Maintenance,
    /// Produces the mainline stable releases
    Release,
    /// Produces prereleases under a named identifier
    Prerelease,
}

impl BranchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchType::Maintenance => "maintenance",
            BranchType::Release => "release",
            BranchType::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific data resolved during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    Maintenance { range: MaintenanceRange },
    Release,
    Prerelease { identifier: String },
}

/// A classified, normalized branch ready for release resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBranch {
    pub name: String,
    pub channel: Option<String>,
    pub kind: BranchKind,
    pub tags: Vec<ReleaseTag>,
}

impl NormalizedBranch {
    pub fn new(name: impl Into<String>, kind: BranchKind) -> Self {
        NormalizedBranch {
            name: name.into(),
            channel: None,
            kind,
            tags: Vec::new(),
        }
    }

    pub fn branch_type(&self) -> BranchType {
        match self.kind {
            BranchKind::Maintenance { .. } => BranchType::Maintenance,
            BranchKind::Release => BranchType::Release,
            BranchKind::Prerelease { .. } => BranchType::Prerelease,
        }
    }

    /// Resolved range of a maintenance branch
    pub fn range(&self) -> Option<MaintenanceRange> {
        match &self.kind {
            BranchKind::Maintenance { range } => Some(*range),
            _ => None,
        }
    }

    /// Resolved identifier of a prerelease branch
    pub fn prerelease(&self) -> Option<&str> {
        match &self.kind {
            BranchKind::Prerelease { identifier } => Some(identifier),
            _ => None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<ReleaseTag>) -> Self {
        self.tags = tags;
        self
    }
}
