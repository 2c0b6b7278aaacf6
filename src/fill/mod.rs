use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rustc_hash::FxHashSet;

use crate::{
    crossword::Grid,
    error::{FillError, GridError},
    lexicon::Lexicon,
    parse::Slot,
};

pub mod cache;
pub mod simple;

use simple::SimpleFiller;

pub trait Filler {
    /// Every completed grid reachable from `grid`, in search order.
    fn fill(&mut self, grid: &Grid) -> Result<Vec<Grid>, FillError>;
}

#[derive(Clone, Copy, Debug)]
pub struct FillOptions {
    /// Skip states already visited through a different fill order. Turning this off
    /// never changes which grids are found, only how long it takes (and may report the
    /// same grid more than once).
    pub memoize: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        FillOptions { memoize: true }
    }
}

/// Shared flag for aborting a running search from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    pub states_visited: u64,
    pub duplicate_states: u64,
    /// Branches abandoned because a slot had no candidates or a commit spelled a
    /// non-word across a crossing slot.
    pub dead_ends: u64,
    pub solutions: u64,
}

/// Bookkeeping for one search. Never shared between searches.
#[derive(Default)]
pub(crate) struct SolveSession {
    pub(crate) seen: FxHashSet<String>,
    pub(crate) results: Vec<Grid>,
    pub(crate) stats: FillStats,
}

/// A copy of `candidate` with `word` written into `slot`.
pub fn fill_one_word(candidate: &Grid, slot: &Slot, word: &str) -> Result<Grid, GridError> {
    let mut result = candidate.clone();
    slot.commit(&mut result, word)?;
    Ok(result)
}

/// After `filled` was written into `candidate` to give `next`, every crossing slot that
/// this write completed must spell a word. Slots complete before the write are left
/// alone, so pre-filled entries are never checked.
pub fn is_viable(candidate: &Grid, next: &Grid, filled: &Slot, lexicon: &Lexicon) -> bool {
    next.slots()
        .orthogonals(filled, next.width())
        .all(|crossing| {
            crossing.is_complete(candidate)
                || !crossing.is_complete(next)
                || lexicon.contains(&crossing.word(next))
        })
}

impl Grid {
    /// Fills the grid with every combination of `lexicon` words that satisfies all
    /// crossings.
    pub fn solve(&self, lexicon: &Lexicon) -> Result<Vec<Grid>, FillError> {
        SimpleFiller::new(lexicon).fill(self)
    }
}
