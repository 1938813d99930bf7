//! Directory tree materializer
//!
//! Walks a [`DirTree`] in pre-order, creating one directory per node and
//! recording a [`LogEntry`] for every meaningful outcome. The walk is best
//! effort: a bad node is logged and skipped, never raised, and existing
//! directories are left untouched. Only a missing or uncreatable root aborts
//! the run.

use crate::tree::DirTree;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a directory name
const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Default maximum full-path length on platforms that enforce one
const WINDOWS_PATH_LIMIT: usize = 260;

/// Filesystem operations the materializer needs
///
/// Implemented by [`OsFs`] for real runs; tests can substitute an
/// implementation that injects failures.
pub trait DirFs {
    fn exists(&self, path: &Path) -> bool;

    /// Create a single directory; the parent must already exist
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`DirFs`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl DirFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Uniform directory-name prefixing rule
///
/// When enabled with a non-empty prefix, every name at every depth gets the
/// prefix prepended before being joined to its parent path. The policy is
/// never reset or altered between nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePolicy {
    pub enabled: bool,
    pub prefix: String,
}

impl NamePolicy {
    /// Policy that leaves every name unchanged
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Policy that prepends `prefix` to every name
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            enabled: true,
            prefix: prefix.into(),
        }
    }

    /// The prefixed name, or `None` when the policy does not apply
    fn apply(&self, name: &str) -> Option<String> {
        if self.enabled && !self.prefix.is_empty() {
            Some(format!("{}{name}", self.prefix))
        } else {
            None
        }
    }
}

/// One recorded outcome for a single node (or for the run's root)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Root path was empty; nothing was attempted
    EmptyRootPath,
    /// Root path did not exist and was created (with parents)
    RootCreated { path: PathBuf },
    /// Root path did not exist and could not be created; run aborted
    RootCreateFailed { path: PathBuf, reason: String },
    /// The name policy rewrote a directory name
    PrefixApplied { name: String, final_name: String },
    /// A tree key was the empty string
    SkippedEmptyName,
    /// Final name contained a reserved character
    SkippedIllegalChars { name: String },
    /// Full path exceeded the platform path-length limit
    SkippedPathTooLong { path: PathBuf },
    /// Directory was created
    Created { path: PathBuf },
    /// Directory was already present; children still processed
    AlreadyExists { path: PathBuf },
    /// Creation failed with a permission error
    PermissionDenied { path: PathBuf },
    /// Creation failed with some other I/O error
    OtherError { path: PathBuf, reason: String },
}

/// Summary bucket for a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    /// Counts toward the created total
    Created,
    /// Counts toward the skipped/failed total
    SkippedOrFailed,
    /// Counts toward neither
    Info,
}

impl LogEntry {
    /// Which summary bucket this entry belongs to
    ///
    /// `AlreadyExists` is informational: the directory is a valid base for
    /// nested creation but nothing was created for it on this run.
    pub fn class(&self) -> EntryClass {
        match self {
            Self::Created { .. } => EntryClass::Created,
            Self::EmptyRootPath
            | Self::RootCreateFailed { .. }
            | Self::SkippedEmptyName
            | Self::SkippedIllegalChars { .. }
            | Self::SkippedPathTooLong { .. }
            | Self::PermissionDenied { .. }
            | Self::OtherError { .. } => EntryClass::SkippedOrFailed,
            Self::RootCreated { .. } | Self::PrefixApplied { .. } | Self::AlreadyExists { .. } => {
                EntryClass::Info
            }
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRootPath => {
                write!(f, "Error: target path is empty, nothing to create")
            }
            Self::RootCreated { path } => {
                write!(f, "Created target path: {}", path.display())
            }
            Self::RootCreateFailed { path, reason } => {
                write!(f, "Error: cannot create target path {}: {reason}", path.display())
            }
            Self::PrefixApplied { name, final_name } => {
                write!(f, "Prefix applied: \"{name}\" -> \"{final_name}\"")
            }
            Self::SkippedEmptyName => write!(f, "Skipped: empty directory name"),
            Self::SkippedIllegalChars { name } => {
                write!(f, "Skipped: directory name contains illegal characters \"{name}\"")
            }
            Self::SkippedPathTooLong { path } => {
                write!(f, "Skipped: path exceeds length limit \"{}\"", path.display())
            }
            Self::Created { path } => write!(f, "Created: {}", path.display()),
            Self::AlreadyExists { path } => {
                write!(f, "Already exists: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                write!(f, "Failed: permission denied creating {}", path.display())
            }
            Self::OtherError { path, reason } => {
                write!(f, "Failed: cannot create {}: {reason}", path.display())
            }
        }
    }
}

/// Creates directories from a [`DirTree`]
pub struct Materializer<F = OsFs> {
    fs: F,
    path_limit: Option<usize>,
}

impl Materializer<OsFs> {
    /// Materializer over the real filesystem, with the platform default
    /// path-length limit
    pub fn new() -> Self {
        Self::with_fs(OsFs)
    }
}

impl Default for Materializer<OsFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: DirFs> Materializer<F> {
    /// Materializer over a custom filesystem implementation
    pub fn with_fs(fs: F) -> Self {
        let path_limit = cfg!(windows).then_some(WINDOWS_PATH_LIMIT);
        Self { fs, path_limit }
    }

    /// Override the full-path length limit (`None` disables the check)
    #[must_use]
    pub fn with_path_limit(mut self, limit: Option<usize>) -> Self {
        self.path_limit = limit;
        self
    }

    /// Create every directory the tree describes under `root`
    ///
    /// Returns the complete run log in pre-order: a node's outcome precedes
    /// its children's, which precede the node's next sibling. Per-node
    /// failures are logged and the walk continues; only an empty or
    /// uncreatable root ends the run early.
    pub fn materialize(&self, root: &Path, tree: &DirTree, policy: &NamePolicy) -> Vec<LogEntry> {
        let mut log = Vec::new();

        if root.as_os_str().is_empty() {
            log.push(LogEntry::EmptyRootPath);
            return log;
        }

        if !self.fs.exists(root) {
            match self.fs.create_dir_all(root) {
                Ok(()) => log.push(LogEntry::RootCreated {
                    path: root.to_path_buf(),
                }),
                Err(e) => {
                    log.push(LogEntry::RootCreateFailed {
                        path: root.to_path_buf(),
                        reason: e.to_string(),
                    });
                    return log;
                }
            }
        }

        // Explicit work stack instead of recursion; tree depth is caller
        // controlled. Children are pushed in reverse so pre-order pops in
        // sibling order.
        let mut stack: Vec<(PathBuf, &str, Option<&DirTree>)> = Vec::new();
        push_level(&mut stack, root, tree);

        while let Some((base, name, children)) = stack.pop() {
            if name.is_empty() {
                log.push(LogEntry::SkippedEmptyName);
                continue;
            }

            let final_name = match policy.apply(name) {
                Some(prefixed) => {
                    log.push(LogEntry::PrefixApplied {
                        name: name.to_string(),
                        final_name: prefixed.clone(),
                    });
                    prefixed
                }
                None => name.to_string(),
            };

            if final_name.contains(ILLEGAL_NAME_CHARS) {
                log.push(LogEntry::SkippedIllegalChars { name: final_name });
                continue;
            }

            let full = base.join(&final_name);

            if let Some(limit) = self.path_limit {
                if full.as_os_str().len() > limit {
                    log.push(LogEntry::SkippedPathTooLong { path: full });
                    continue;
                }
            }

            // Parent existence is guaranteed by pre-order, so a single-level
            // create is enough and its AlreadyExists error kind gives the
            // exact outcome split we need.
            let descend = match self.fs.create_dir(&full) {
                Ok(()) => {
                    log.push(LogEntry::Created { path: full.clone() });
                    true
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log.push(LogEntry::AlreadyExists { path: full.clone() });
                    true
                }
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                    log.push(LogEntry::PermissionDenied { path: full.clone() });
                    false
                }
                Err(e) => {
                    log.push(LogEntry::OtherError {
                        path: full.clone(),
                        reason: e.to_string(),
                    });
                    false
                }
            };

            if descend {
                if let Some(subtree) = children {
                    push_level(&mut stack, &full, subtree);
                }
            }
        }

        log
    }
}

fn push_level<'t>(
    stack: &mut Vec<(PathBuf, &'t str, Option<&'t DirTree>)>,
    base: &Path,
    tree: &'t DirTree,
) {
    let level: Vec<_> = tree.entries().collect();
    for (name, children) in level.into_iter().rev() {
        stack.push((base.to_path_buf(), name, children));
    }
}
