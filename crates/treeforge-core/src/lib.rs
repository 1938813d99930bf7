//! treeforge core - directory structure parsing and materialization
//!
//! This crate turns a nested JSON or YAML mapping into real directories on
//! disk. It has two halves: the structure parser, which decodes and validates
//! a document into a [`DirTree`], and the materializer, which walks that tree
//! creating directories and recording a per-node outcome log.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod error;
pub mod materialize;
pub mod parser;
pub mod summary;
pub mod tree;

pub use error::{LoadError, LoadResult};
pub use materialize::{DirFs, EntryClass, LogEntry, Materializer, NamePolicy, OsFs};
pub use parser::{load_structure, parse, Format};
pub use summary::{summarize, RunSummary};
pub use tree::DirTree;
