//! Upload and instance directory layout.

use preflight_common::{PreflightError, PreflightResult};
use std::path::{Path, PathBuf};

/// Directories the application expects to exist, relative to its working directory.
pub const UPLOAD_DIRS: [&str; 7] = [
    "static/uploads",
    "static/uploads/profile",
    "static/uploads/portfolio",
    "static/uploads/carousel",
    "static/uploads/services",
    "static/uploads/projects",
    "instance",
];

/// Create every directory in [`UPLOAD_DIRS`] beneath `root`.
///
/// Existing directories are left as they are. The first failure stops the
/// walk and is returned; directories after it are not attempted.
pub fn ensure_directories(root: &Path) -> PreflightResult<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(UPLOAD_DIRS.len());
    for dir in UPLOAD_DIRS {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|source| PreflightError::CreateDir {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Directory ready: {dir}");
        created.push(path);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_dirs_under(root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    found.push(path.strip_prefix(root).unwrap().to_path_buf());
                    stack.push(path);
                }
            }
        }
        found.sort();
        found
    }

    #[test]
    fn creates_exactly_the_expected_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let created = ensure_directories(tmp.path()).unwrap();
        assert_eq!(created.len(), UPLOAD_DIRS.len());

        // `static` itself is an implicit parent
        let mut expected: Vec<PathBuf> = UPLOAD_DIRS.iter().map(PathBuf::from).collect();
        expected.push(PathBuf::from("static"));
        expected.sort();
        assert_eq!(all_dirs_under(tmp.path()), expected);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_directories(tmp.path()).unwrap();
        std::fs::write(tmp.path().join("static/uploads/profile/avatar.png"), b"png").unwrap();

        let before = all_dirs_under(tmp.path());
        ensure_directories(tmp.path()).unwrap();
        assert_eq!(all_dirs_under(tmp.path()), before);
        assert!(tmp.path().join("static/uploads/profile/avatar.png").is_file());
    }

    #[test]
    fn blocked_path_aborts_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        std::fs::write(tmp.path().join("static"), b"").unwrap();

        let err = ensure_directories(tmp.path()).unwrap_err();
        match err {
            PreflightError::CreateDir { path, .. } => {
                assert_eq!(path, tmp.path().join("static/uploads"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!tmp.path().join("instance").exists());
    }
}
