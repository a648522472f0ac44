//! Filesystem capability
//!
//! The generator never touches the disk directly; it goes through
//! [`Filesystem`], so runs can be replayed against
//! [`MemoryFs`](crate::testing::MemoryFs) or a mock.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::Glob;

/// Abstraction over the operations the generator performs on disk
///
/// All paths are used as given; resolving them against a project root is the
/// caller's job.
///
/// # Examples
///
/// ```rust,no_run
/// use modforge::fs::{Filesystem, LocalFs};
/// use std::path::Path;
///
/// # fn example() -> std::io::Result<()> {
/// let fs = LocalFs;
/// let existing = fs.glob(Path::new("database/migrations"), "*_create_orders_table.*")?;
/// println!("{} earlier migration(s)", existing.len());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Whether `path` is an existing regular file
    fn file_exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created. An already existing
    /// directory is not an error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Read a UTF-8 file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` with `contents`
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or not writable.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Delete a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Files directly inside `dir` whose name matches the glob `pattern`, sorted
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the directory cannot be listed.
    fn glob(&self, dir: &Path, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// [`Filesystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn glob(&self, dir: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let matcher = compile_pattern(pattern)?;

        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && matcher.is_match(entry.file_name()) {
                matches.push(entry.path());
            }
        }
        matches.sort();
        Ok(matches)
    }
}

/// Compile a file-name glob, mapping pattern errors to `InvalidInput`
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn compile_pattern(pattern: &str) -> io::Result<globset::GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matches_only_direct_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2024_01_01_000000_create_orders_table.php"), "").unwrap();
        fs::write(dir.path().join("2025_06_01_120000_create_orders_table.php"), "").unwrap();
        fs::write(dir.path().join("2024_01_01_000000_create_order_items_table.php"), "").unwrap();
        fs::create_dir(dir.path().join("x_create_orders_table.d")).unwrap();

        let found = LocalFs.glob(dir.path(), "*_create_orders_table.*").unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "2024_01_01_000000_create_orders_table.php",
                "2025_06_01_120000_create_orders_table.php",
            ]
        );
    }

    #[test]
    fn test_glob_on_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = LocalFs.glob(&dir.path().join("nope"), "*").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_invalid_input() {
        let err = compile_pattern("[unclosed").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        LocalFs.create_dir_all(&nested).unwrap();
        LocalFs.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Order.php");

        LocalFs.write(&file, "<?php\n").unwrap();
        assert!(LocalFs.file_exists(&file));
        assert_eq!(LocalFs.read_to_string(&file).unwrap(), "<?php\n");

        LocalFs.remove_file(&file).unwrap();
        assert!(!LocalFs.file_exists(&file));
    }
}
