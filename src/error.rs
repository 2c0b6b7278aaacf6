//! Error types for grid parsing, dictionary loading, lookups and filling.

use std::path::PathBuf;

use thiserror::Error;

use crate::crossword::Grid;

/// A grid skeleton that cannot be turned into a [`Grid`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,

    /// Rows are numbered from 1.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Rows and columns are numbered from 1.
    #[error("invalid cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: String },

    #[error("cannot write a {found}-letter word into a {expected}-letter slot")]
    WordLength { expected: usize, found: usize },

    /// Offsets are numbered from 1.
    #[error("{found:?} at offset {offset} of {word:?} is not a letter")]
    InvalidLetter {
        word: String,
        offset: usize,
        found: char,
    },

    /// Rows and columns are numbered from 1.
    #[error("{length}-cell slot at row {row}, column {col} does not fit a {width}x{height} grid")]
    SlotOutOfBounds {
        row: usize,
        col: usize,
        length: usize,
        width: usize,
        height: usize,
    },
}

/// A dictionary record that was skipped while loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("{source_name}:{line}: record has no word")]
    MissingWord { source_name: String, line: usize },

    #[error("{source_name}:{line}: word {token:?} has characters other than letters")]
    InvalidWord {
        source_name: String,
        line: usize,
        token: String,
    },

    #[error("{source_name}:{line}: score {token:?} is not an integer")]
    InvalidScore {
        source_name: String,
        line: usize,
        token: String,
    },
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read dictionary {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    /// Positions are numbered from 1.
    #[error("{found:?} at position {position} is neither a letter nor a wildcard")]
    InvalidChar { position: usize, found: char },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to create {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed grid in {}", .path.display())]
    Grid {
        path: PathBuf,
        #[source]
        source: GridError,
    },
}

#[derive(Debug, Error)]
pub enum FillError {
    /// The search was aborted through its [`CancelToken`](crate::fill::CancelToken).
    /// Solutions found before the abort are kept.
    #[error("search cancelled after {} solution(s)", .results.len())]
    Cancelled { results: Vec<Grid> },

    #[error(transparent)]
    Grid(#[from] GridError),
}
