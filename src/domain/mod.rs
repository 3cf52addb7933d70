//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod range;
pub mod tag;

pub use branch::{BranchEntry, BranchKind, BranchSpec, BranchType, NormalizedBranch, Prerelease};
pub use range::{is_maintenance_range, is_valid_range, MaintenanceRange};
pub use tag::{ReleaseTag, TagFormat};
