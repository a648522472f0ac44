//! Test doubles for the generator's injected capabilities
//!
//! [`MemoryFs`] is an in-memory [`Filesystem`] that records every mutating
//! operation; [`ScriptedConfirm`] replays canned answers and remembers every
//! prompt it was shown.
//!
//! # Examples
//!
//! ```
//! use modforge::testing::{MemoryFs, ScriptedConfirm};
//! use modforge::fs::Filesystem;
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.add_file("database/migrations/2024_01_01_000000_create_orders_table.php", "old");
//! assert!(fs.file_exists(Path::new("database/migrations/2024_01_01_000000_create_orders_table.php")));
//!
//! let confirm = ScriptedConfirm::new([false]);
//! assert_eq!(confirm.remaining(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

use crate::fs::{compile_pattern, Filesystem};
use crate::policy::Confirm;

/// A mutating filesystem operation recorded by [`MemoryFs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    /// `create_dir_all`
    CreateDir(PathBuf),
    /// `write`
    Write(PathBuf),
    /// `remove_file`
    Remove(PathBuf),
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    ops: Vec<FsOp>,
    reads: usize,
    failing_writes: BTreeSet<PathBuf>,
}

/// In-memory [`Filesystem`]
///
/// `write` requires the parent directory to exist, like a real disk. Seeding
/// helpers do not appear in the operation log.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: RefCell<State>,
}

impl MemoryFs {
    /// Empty filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file and its parent directories
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
        let path = path.into();
        let mut state = self.state.borrow_mut();
        if let Some(parent) = path.parent() {
            insert_ancestors(&mut state.dirs, parent);
        }
        state.files.insert(path, contents.to_string());
    }

    /// Seed a directory and its parents
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        insert_ancestors(&mut self.state.borrow_mut().dirs, path.as_ref());
    }

    /// Make every later `write` to `path` fail with `PermissionDenied`
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().failing_writes.insert(path.into());
    }

    /// Contents of `path`, if present
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.borrow().files.get(path.as_ref()).cloned()
    }

    /// Whether `path` was seeded or created as a directory
    #[must_use]
    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.borrow().dirs.contains(path.as_ref())
    }

    /// All file paths, sorted
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.state.borrow().files.keys().cloned().collect()
    }

    /// Mutating operations in the order they happened
    #[must_use]
    pub fn ops(&self) -> Vec<FsOp> {
        self.state.borrow().ops.clone()
    }

    /// Number of successful reads
    #[must_use]
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }
}

fn insert_ancestors(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl Filesystem for MemoryFs {
    fn file_exists(&self, path: &Path) -> bool {
        self.state.borrow().files.contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        insert_ancestors(&mut state.dirs, path);
        state.ops.push(FsOp::CreateDir(path.to_path_buf()));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut state = self.state.borrow_mut();
        let contents = state.files.get(path).cloned().ok_or_else(|| not_found(path))?;
        state.reads += 1;
        Ok(contents)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.failing_writes.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !state.dirs.contains(parent) {
                return Err(not_found(parent));
            }
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.ops.push(FsOp::Write(path.to_path_buf()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.files.remove(path).ok_or_else(|| not_found(path))?;
        state.ops.push(FsOp::Remove(path.to_path_buf()));
        Ok(())
    }

    fn glob(&self, dir: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let matcher = compile_pattern(pattern)?;
        Ok(self
            .state
            .borrow()
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
            .cloned()
            .collect())
    }
}

/// [`Confirm`] that replays queued answers
///
/// Once the queue is empty, further prompts fail with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    prompts: Vec<String>,
}

impl ScriptedConfirm {
    /// Queue `answers` in order
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}
