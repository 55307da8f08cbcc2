//! Discovery of the manifest files a run applies, in apply order.
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::classify::{Level, is_admin_config, is_standard_config};
use crate::error::ConfigError;

/// Files and directories whose names start with this prefix are ignored.
pub const IGNORED_PREFIX: char = '_';

/// Which naming bucket a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    /// `admin_*_rbac.yaml` files; applied before standard files.
    Admin,
    /// Other `*_rbac.yaml` files.
    Standard,
}

impl Bucket {
    /// Classify a bare filename, or `None` if it is not a config file.
    #[must_use]
    pub fn of(filename: &str) -> Option<Self> {
        if is_admin_config(filename) {
            Some(Self::Admin)
        } else if is_standard_config(filename) {
            Some(Self::Standard)
        } else {
            None
        }
    }

    const fn selected_by(self, level: Level) -> bool {
        match self {
            Self::Admin => level.includes_admin(),
            Self::Standard => level.includes_standard(),
        }
    }
}

/// A config file selected for applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Bucket the file was classified into.
    pub bucket: Bucket,
}

/// Walk `dir` recursively and return every file selected by `level`.
///
/// Entries are visited in lexical order and entries whose names start with
/// `_` are skipped along with everything below them.  Admin files come
/// before standard files; within a bucket, lexical path order is kept.
///
/// # Errors
///
/// Returns an error if `dir` is missing, is not a directory, or cannot be
/// read.
pub fn discover(dir: &Path, level: Level) -> Result<Vec<ManifestFile>, ConfigError> {
    if !dir.exists() {
        return Err(ConfigError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e));
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some(bucket) = Bucket::of(name).filter(|b| b.selected_by(level)) {
            files.push(ManifestFile {
                path: entry.into_path(),
                bucket,
            });
        }
    }
    // Stable: lexical order survives within each bucket.
    files.sort_by_key(|f| f.bucket);
    Ok(files)
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with(IGNORED_PREFIX))
}

fn walk_error(root: &Path, err: walkdir::Error) -> ConfigError {
    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    ConfigError::Io {
        path,
        source: io::Error::from(err),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "kind: RoleBinding\n").unwrap();
    }

    fn names(root: &Path, files: &[ManifestFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for rel in [
            "team-b/02_roles_rbac.yaml",
            "team-a/01_roles_rbac.yaml",
            "team-a/admin_01_crb_rbac.yaml",
            "admin_00_namespaces_rbac.yaml",
            "README.md",
            "team-a/roles_rbac.yml",
            "_disabled/03_roles_rbac.yaml",
            "team-b/_04_old_rbac.yaml",
        ] {
            touch(tmp.path(), rel);
        }
        tmp
    }

    #[test]
    fn bucket_of_filename() {
        assert_eq!(Bucket::of("admin_01_x_rbac.yaml"), Some(Bucket::Admin));
        assert_eq!(Bucket::of("01_x_rbac.yaml"), Some(Bucket::Standard));
        assert_eq!(Bucket::of("x.yaml"), None);
    }

    #[test]
    fn standard_level_selects_standard_files_in_lexical_order() {
        let tmp = fixture();
        let files = discover(tmp.path(), Level::Standard).unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            ["team-a/01_roles_rbac.yaml", "team-b/02_roles_rbac.yaml"]
        );
        assert!(files.iter().all(|f| f.bucket == Bucket::Standard));
    }

    #[test]
    fn admin_level_selects_admin_files() {
        let tmp = fixture();
        let files = discover(tmp.path(), Level::Admin).unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            [
                "admin_00_namespaces_rbac.yaml",
                "team-a/admin_01_crb_rbac.yaml"
            ]
        );
    }

    #[test]
    fn all_level_puts_admin_bucket_first() {
        let tmp = fixture();
        let files = discover(tmp.path(), Level::All).unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            [
                "admin_00_namespaces_rbac.yaml",
                "team-a/admin_01_crb_rbac.yaml",
                "team-a/01_roles_rbac.yaml",
                "team-b/02_roles_rbac.yaml",
            ]
        );
    }

    #[test]
    fn underscore_entries_are_ignored() {
        let tmp = fixture();
        let files = discover(tmp.path(), Level::All).unwrap();
        let listed = names(tmp.path(), &files);
        assert!(!listed.iter().any(|n| n.contains("_disabled")));
        assert!(!listed.iter().any(|n| n.contains("_04_old")));
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_loop_is_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "01_a_rbac.yaml");
        std::os::unix::fs::symlink(".", tmp.path().join("loop")).unwrap();

        let files = discover(tmp.path(), Level::Standard).unwrap();

        assert_eq!(names(tmp.path(), &files), ["01_a_rbac.yaml"]);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover(tmp.path(), Level::All).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover(&tmp.path().join("nope"), Level::All).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDirectory { .. }));
    }

    #[test]
    fn file_instead_of_directory_is_an_error() {
        let tmp = fixture();
        let err = discover(&tmp.path().join("README.md"), Level::All).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory { .. }));
    }
}
