use std::{fmt, str::FromStr};

use crate::{crossword::Cell, error::PatternError};

pub const WILDCARD: char = '.';

/// Fixed letters and single-letter wildcards, compared position by position against
/// dictionary words. Letters are stored uppercase and wildcards as [`WILDCARD`], so two
/// spellings of the same query share a cache entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    text: String,
    length: usize,
}

impl Pattern {
    /// Accepts letters (any case) and `.` or `_` as wildcards.
    pub fn parse(text: &str) -> Result<Pattern, PatternError> {
        let mut normalized = String::with_capacity(text.len());
        for (index, c) in text.chars().enumerate() {
            match c {
                '.' | '_' => normalized.push(WILDCARD),
                c if c.is_ascii_alphabetic() => normalized.push(c.to_ascii_uppercase()),
                found => {
                    return Err(PatternError::InvalidChar {
                        position: index + 1,
                        found,
                    })
                }
            }
        }

        if normalized.is_empty() {
            return Err(PatternError::Empty);
        }
        let length = normalized.chars().count();
        Ok(Pattern {
            text: normalized,
            length,
        })
    }

    pub(crate) fn from_cells<I: Iterator<Item = Cell>>(cells: I) -> Pattern {
        let text: String = cells.map(Cell::to_char).collect();
        let length = text.chars().count();
        Pattern { text, length }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn is_complete(&self) -> bool {
        !self.text.contains(WILDCARD)
    }

    /// `word` must already be uppercase.
    pub fn matches(&self, word: &str) -> bool {
        let mut letters = word.chars();
        for expected in self.text.chars() {
            match letters.next() {
                Some(c) if expected == WILDCARD || expected == c => continue,
                _ => return false,
            }
        }
        letters.next().is_none()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
