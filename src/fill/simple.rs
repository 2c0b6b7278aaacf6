use std::time::Instant;

use log::{debug, info, trace};

use crate::{
    crossword::Grid,
    error::FillError,
    lexicon::Lexicon,
    parse::Slot,
};

use super::{
    cache::SearchCache, fill_one_word, is_viable, CancelToken, FillOptions, FillStats, Filler,
    SolveSession,
};

/// Exhaustive depth-first filler. Each step fills the incomplete slot with the fewest
/// candidate words, trying candidates from highest score down, and every completed grid
/// is collected.
pub struct SimpleFiller<'s> {
    cache: SearchCache<'s>,
    options: FillOptions,
    cancel: CancelToken,
    stats: FillStats,
}

impl<'s> SimpleFiller<'s> {
    pub fn new(lexicon: &'s Lexicon) -> SimpleFiller<'s> {
        SimpleFiller::with_cache(SearchCache::new(lexicon))
    }

    /// Reuses lookups made by an earlier search over the same lexicon.
    pub fn with_cache(cache: SearchCache<'s>) -> SimpleFiller<'s> {
        SimpleFiller {
            cache,
            options: FillOptions::default(),
            cancel: CancelToken::new(),
            stats: FillStats::default(),
        }
    }

    pub fn options(mut self, options: FillOptions) -> SimpleFiller<'s> {
        self.options = options;
        self
    }

    pub fn cancel_token(mut self, cancel: CancelToken) -> SimpleFiller<'s> {
        self.cancel = cancel;
        self
    }

    pub fn cache(&self) -> &SearchCache<'s> {
        &self.cache
    }

    pub fn into_cache(self) -> SearchCache<'s> {
        self.cache
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> FillStats {
        self.stats
    }

    /// Like [`Filler::fill`], also handing each completed grid to `on_solution` as soon
    /// as it is found.
    pub fn fill_with<F: FnMut(&Grid)>(
        &mut self,
        initial_grid: &Grid,
        mut on_solution: F,
    ) -> Result<Vec<Grid>, FillError> {
        let thread_start = Instant::now();
        let lexicon = self.cache.lexicon();
        let mut session = SolveSession::default();

        // Children are pushed in reverse so they pop in candidate order, which visits
        // states in the same order as the recursive formulation.
        let mut candidates = vec![initial_grid.to_owned()];

        while let Some(candidate) = candidates.pop() {
            if self.cancel.is_cancelled() {
                info!(
                    "search cancelled after {} states and {} solution(s)",
                    session.stats.states_visited, session.stats.solutions
                );
                self.stats = session.stats;
                return Err(FillError::Cancelled {
                    results: session.results,
                });
            }

            session.stats.states_visited += 1;
            if session.stats.states_visited % 10_000 == 0 {
                info!(
                    "throughput: {:.2} states/ms, current state:\n{}",
                    session.stats.states_visited as f32
                        / thread_start.elapsed().as_millis().max(1) as f32,
                    candidate
                );
            }

            if self.options.memoize && !session.seen.insert(candidate.state_key()) {
                trace!("skipping repeated state {}", candidate.state_key());
                session.stats.duplicate_states += 1;
                continue;
            }

            let (to_fill, candidate_count) = match most_constrained(&mut self.cache, &candidate)
            {
                Some(choice) => choice,
                None => {
                    session.stats.solutions += 1;
                    info!("solution {} found:\n{}", session.stats.solutions, candidate);
                    on_solution(&candidate);
                    session.results.push(candidate);
                    continue;
                }
            };

            let pattern = to_fill.pattern(&candidate);
            debug!(
                "most constrained: {:?} slot at ({}, {}) {} with {} candidate(s)",
                to_fill.direction(),
                to_fill.start_row(),
                to_fill.start_col(),
                pattern,
                candidate_count
            );

            if candidate_count == 0 {
                session.stats.dead_ends += 1;
                continue;
            }

            let potential_fills = self.cache.find(&pattern);
            let mut viables = Vec::with_capacity(potential_fills.len());
            for potential_fill in potential_fills {
                let new_candidate = fill_one_word(&candidate, to_fill, &potential_fill.word)?;
                if is_viable(&candidate, &new_candidate, to_fill, lexicon) {
                    viables.push(new_candidate);
                } else {
                    session.stats.dead_ends += 1;
                }
            }
            candidates.extend(viables.into_iter().rev());
        }

        self.stats = session.stats;
        info!(
            "search finished in {}ms: {} states, {} repeated, {} dead ends, {} solution(s), {} patterns cached",
            thread_start.elapsed().as_millis(),
            self.stats.states_visited,
            self.stats.duplicate_states,
            self.stats.dead_ends,
            self.stats.solutions,
            self.cache.len()
        );
        Ok(session.results)
    }
}

impl<'s> Filler for SimpleFiller<'s> {
    fn fill(&mut self, grid: &Grid) -> Result<Vec<Grid>, FillError> {
        self.fill_with(grid, |_| {})
    }
}

/// The incomplete slot with the fewest candidates, first in across-then-down order among
/// ties, or `None` when the grid is complete.
fn most_constrained<'g>(cache: &mut SearchCache<'_>, grid: &'g Grid) -> Option<(&'g Slot, usize)> {
    let mut best: Option<(&'g Slot, usize)> = None;
    for slot in grid.incomplete_slots() {
        let count = cache.find(&slot.pattern(grid)).len();
        if best.map_or(true, |(_, fewest)| count < fewest) {
            best = Some((slot, count));
            if count == 0 {
                break;
            }
        }
    }
    best
}
