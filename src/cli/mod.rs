//! Command workflows shared by the binary and library callers

pub mod orchestration;

pub use orchestration::{run_last_release, run_verify, LastReleaseReport};
