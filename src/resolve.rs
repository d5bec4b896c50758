// src/resolve.rs

//! Executable resolution against the process search path.
//!
//! Resolution never executes anything. A binary that disappears between
//! [`resolve`] and spawn is reported later by the runner as a spawn failure.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::fs::{FileSystem, RealFileSystem};
use crate::types::ResolvedExecutable;

/// Ordered directories to search, plus the directory relative entries are
/// anchored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
    cwd: PathBuf,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            dirs,
            cwd: cwd.into(),
        }
    }

    /// Parse a `PATH`-style value (platform separator) anchored at `cwd`.
    ///
    /// Empty entries stand for the working directory, as in POSIX shells.
    pub fn parse(value: &OsStr, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let dirs = env::split_paths(value)
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    cwd.clone()
                } else if dir.is_relative() {
                    cwd.join(dir)
                } else {
                    dir
                }
            })
            .collect();
        Self { dirs, cwd }
    }

    /// Search path of the current process.
    ///
    /// When the working directory cannot be determined, only absolute `PATH`
    /// entries are kept.
    pub fn from_env() -> Self {
        let value = env::var_os("PATH");
        match (env::current_dir(), value) {
            (Ok(cwd), Some(value)) => Self::parse(&value, cwd),
            (Ok(cwd), None) => Self::new(Vec::new(), cwd),
            (Err(err), value) => {
                warn!(error = %err, "working directory unavailable; ignoring relative PATH entries");
                Self::absolute_only(&value.unwrap_or_default())
            }
        }
    }

    /// Keep only the absolute entries of a `PATH`-style value.
    ///
    /// Relative names (including ones containing a separator) never resolve
    /// against such a path.
    pub fn absolute_only(value: &OsStr) -> Self {
        let dirs = env::split_paths(value)
            .filter(|dir| dir.is_absolute())
            .collect();
        Self {
            dirs,
            cwd: PathBuf::new(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find `name` using `fs` to inspect candidates.
    ///
    /// Names containing a path separator are checked as-is (anchored to
    /// `cwd` when relative) instead of being searched for.
    pub fn resolve_with(&self, fs: &dyn FileSystem, name: &str) -> Option<ResolvedExecutable> {
        if name.is_empty() {
            return None;
        }

        if has_separator(name) {
            let candidate = Path::new(name);
            let candidate = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else if self.cwd.is_absolute() {
                self.cwd.join(candidate)
            } else {
                return None;
            };
            return fs
                .is_executable(&candidate)
                .then(|| ResolvedExecutable::new(candidate));
        }

        for dir in &self.dirs {
            let candidate = dir.join(name);
            trace!(candidate = %candidate.display(), "checking search path candidate");
            if fs.is_executable(&candidate) {
                return Some(ResolvedExecutable::new(candidate));
            }
        }
        None
    }
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || (cfg!(windows) && name.contains('\\'))
}

/// Resolve `name` on the current process `PATH`.
pub fn resolve(name: &str) -> Option<ResolvedExecutable> {
    SearchPath::from_env().resolve_with(&RealFileSystem, name)
}

/// True iff [`resolve`] finds `name`.
pub fn is_valid_command(name: &str) -> bool {
    resolve(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn search_path(dirs: &[&str]) -> SearchPath {
        SearchPath::new(dirs.iter().map(PathBuf::from).collect(), "/home/user")
    }

    #[test]
    fn first_matching_directory_wins() {
        let fs = MockFileSystem::new();
        fs.add_executable("/usr/local/bin/sort");
        fs.add_executable("/usr/bin/sort");

        let found = search_path(&["/usr/local/bin", "/usr/bin"])
            .resolve_with(&fs, "sort")
            .unwrap();

        assert_eq!(found.path(), Path::new("/usr/local/bin/sort"));
    }

    #[test]
    fn non_executable_files_are_skipped() {
        let fs = MockFileSystem::new();
        fs.add_file("/opt/bin/jq", "not executable");
        fs.add_executable("/usr/bin/jq");

        let found = search_path(&["/opt/bin", "/usr/bin"])
            .resolve_with(&fs, "jq")
            .unwrap();

        assert_eq!(found.path(), Path::new("/usr/bin/jq"));
    }

    #[test]
    fn directories_do_not_resolve() {
        let fs = MockFileSystem::new();
        fs.add_dir("/usr/bin/tool");

        assert!(search_path(&["/usr/bin"]).resolve_with(&fs, "tool").is_none());
    }

    #[test]
    fn missing_and_empty_names_are_absent() {
        let fs = MockFileSystem::new();
        fs.add_executable("/usr/bin/tr");
        let path = search_path(&["/usr/bin"]);

        assert!(path.resolve_with(&fs, "doesnotexist123").is_none());
        assert!(path.resolve_with(&fs, "").is_none());
    }

    #[test]
    fn names_with_separator_are_checked_directly() {
        let fs = MockFileSystem::new();
        fs.add_executable("/home/user/scripts/fmt.sh");
        let path = search_path(&["/usr/bin"]);

        let found = path.resolve_with(&fs, "scripts/fmt.sh").unwrap();
        assert_eq!(found.path(), Path::new("/home/user/scripts/fmt.sh"));

        let found = path.resolve_with(&fs, "/home/user/scripts/fmt.sh").unwrap();
        assert_eq!(found.path(), Path::new("/home/user/scripts/fmt.sh"));
    }

    #[cfg(unix)]
    #[test]
    fn parse_anchors_relative_and_empty_entries() {
        let path = SearchPath::parse(OsStr::new("/usr/bin::bin"), "/work");

        assert_eq!(
            path.dirs(),
            &[
                PathBuf::from("/usr/bin"),
                PathBuf::from("/work"),
                PathBuf::from("/work/bin"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolute_only_drops_relative_entries() {
        let path = SearchPath::absolute_only(OsStr::new("/usr/bin::bin:./tools"));
        assert_eq!(path.dirs(), &[PathBuf::from("/usr/bin")]);
    }

    #[cfg(unix)]
    #[test]
    fn without_working_dir_relative_names_are_absent() {
        let fs = MockFileSystem::new();
        fs.add_executable("scripts/fmt.sh");
        fs.add_executable("/usr/bin/fmt");
        let path = SearchPath::absolute_only(OsStr::new("/usr/bin:bin"));

        assert!(path.resolve_with(&fs, "scripts/fmt.sh").is_none());
        let found = path.resolve_with(&fs, "fmt").unwrap();
        assert!(found.path().is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn process_path_finds_sh() {
        let found = resolve("sh").expect("sh should be on PATH");
        assert!(found.path().is_absolute());
        assert!(is_valid_command("sh"));
        assert!(!is_valid_command("doesnotexist123"));
    }
}
