//! Git access: subprocess bridge for repository state, git2 for discovery.

pub mod bridge;
pub mod repo;

pub use bridge::GitBridge;
pub use repo::{RepoLocation, locate_repository};
