//! Repository discovery using git2-rs.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Paths of the repository the tool is operating on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// The `.git` directory (or the worktree's private git dir).
    pub git_dir: PathBuf,
    /// Working tree root. `None` for bare repositories.
    pub workdir: Option<PathBuf>,
}

impl RepoLocation {
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir.join("hooks")
    }
}

/// Find the repository containing `path`, searching parent directories.
pub fn locate_repository(path: &Path) -> Result<RepoLocation, GitError> {
    let repo = Repository::discover(path).map_err(GitError::NotARepository)?;

    Ok(RepoLocation {
        git_dir: repo.path().to_path_buf(),
        workdir: repo.workdir().map(Path::to_path_buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_repository_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let location = locate_repository(&nested).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert!(location.hooks_dir().ends_with(".git/hooks"));
        assert_eq!(
            location.workdir.as_deref().unwrap().canonicalize().unwrap(),
            expected
        );
    }

    #[test]
    fn test_locate_repository_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        if Repository::discover(dir.path()).is_err() {
            let err = locate_repository(dir.path()).unwrap_err();
            assert!(matches!(err, GitError::NotARepository(_)));
        }
    }
}
