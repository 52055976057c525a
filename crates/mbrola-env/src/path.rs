//! `PATH` lookup

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const EXTENSIONS: &[&str] = &["", "exe", "com", "bat", "cmd"];
#[cfg(not(windows))]
const EXTENSIONS: &[&str] = &[""];

/// Find `program` in a `PATH`-style directory list
///
/// A program given with a directory component is checked as-is.
pub fn find_on_path(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let program_path = Path::new(program);
    if program_path.components().count() > 1 {
        return executable(program_path).then(|| program_path.to_path_buf());
    }

    let found = std::env::split_paths(path_var?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| {
            EXTENSIONS.iter().map(move |ext| {
                if ext.is_empty() {
                    dir.join(program)
                } else {
                    dir.join(format!("{}.{}", program, ext))
                }
            })
        })
        .find(|candidate| executable(candidate));

    tracing::trace!(program, found = ?found, "PATH lookup");
    found
}

#[cfg(unix)]
fn executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mbrola-env-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_path_var() {
        assert!(find_on_path("mbrola", None).is_none());
    }

    #[test]
    fn test_empty_entries_skipped() {
        assert!(find_on_path("mbrola-missing", Some(OsStr::new(""))).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("exec");
        let bin = dir.join("mbrola");
        fs::write(&bin, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let path_var = std::env::join_paths([dir.clone()]).unwrap();
        assert_eq!(find_on_path("mbrola", Some(path_var.as_os_str())), Some(bin.clone()));
        assert_eq!(find_on_path(bin.to_str().unwrap(), None), Some(bin));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("noexec");
        let bin = dir.join("mbrola");
        fs::write(&bin, "data").unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o644)).unwrap();

        let path_var = std::env::join_paths([dir.clone()]).unwrap();
        assert!(find_on_path("mbrola", Some(path_var.as_os_str())).is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
