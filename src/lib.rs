pub mod branches;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod last_release;
pub mod ui;

pub use branches::build_branches;
pub use error::{BranchError, BranchErrors, ReleaseError, Result};
pub use last_release::{last_release, LastRelease};
