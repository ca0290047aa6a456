// src/features/mod.rs

//! Wrappers around external tools commonly driven from a plugin.

pub mod fastlane;
pub mod git_autotag;

pub use fastlane::Fastlane;
pub use git_autotag::{GitAutotag, parse_version_tag};
