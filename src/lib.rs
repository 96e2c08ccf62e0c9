//! merge-down - keep one branch merged into another from CI
//!
//! Attempts a merge of a head branch into a base branch through the GitHub
//! API. On conflict, a dated recovery branch is created (or fast-forwarded)
//! at the head tip so the conflict can be resolved by hand.

pub mod actions;
pub mod auth;
pub mod error;
pub mod platform;
pub mod sync;
pub mod types;
