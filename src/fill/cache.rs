use cached::{Cached, UnboundCache};

use crate::{
    lexicon::{Answer, Lexicon},
    pattern::Pattern,
};

/// Counters for a [`SearchCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to [`SearchCache::find`].
    pub lookups: u64,
    /// Lookups that had to scan the lexicon.
    pub scans: u64,
}

/// Memoized pattern lookups against a [`Lexicon`]. Results depend only on the pattern
/// text, so one cache serves every branch of a search and can be handed on to later
/// searches over the same lexicon.
pub struct SearchCache<'s> {
    lexicon: &'s Lexicon,
    store: UnboundCache<Pattern, Vec<Answer>>,
    stats: CacheStats,
}

impl<'s> SearchCache<'s> {
    pub fn new(lexicon: &'s Lexicon) -> SearchCache<'s> {
        SearchCache {
            lexicon,
            store: UnboundCache::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn lexicon(&self) -> &'s Lexicon {
        self.lexicon
    }

    /// Every answer of the pattern's length whose letters agree with its fixed positions,
    /// highest score first; equal scores keep lexicon order. An empty result is cached
    /// like any other.
    pub fn find(&mut self, pattern: &Pattern) -> &[Answer] {
        self.stats.lookups += 1;

        let lexicon = self.lexicon;
        let scans = &mut self.stats.scans;
        self.store.cache_get_or_set_with(pattern.clone(), || {
            *scans += 1;
            scan(lexicon, pattern)
        })
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of distinct patterns cached.
    pub fn len(&self) -> usize {
        self.store.cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scan(lexicon: &Lexicon, pattern: &Pattern) -> Vec<Answer> {
    let mut matches: Vec<Answer> = lexicon
        .candidates_of_length(pattern.len())
        .iter()
        .filter(|answer| pattern.matches(&answer.word))
        .cloned()
        .collect();
    // stable: ties keep lexicon order
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::{CacheStats, SearchCache};
    use crate::{
        lexicon::{Answer, Lexicon},
        pattern::Pattern,
    };

    fn lexicon() -> Lexicon {
        Lexicon::build(vec![
            Answer::new("bass", 10),
            Answer::new("bats", 40),
            Answer::new("bess", 40),
            Answer::new("boss", 10),
            Answer::new("be", 30),
        ])
    }

    fn words(answers: &[Answer]) -> Vec<&str> {
        answers.iter().map(|answer| answer.word.as_str()).collect()
    }

    #[test]
    fn find_orders_by_score_then_lexicon_order() {
        let lexicon = lexicon();
        let mut cache = SearchCache::new(&lexicon);

        let pattern = Pattern::parse("b...").unwrap();
        assert_eq!(
            vec!["BATS", "BESS", "BASS", "BOSS"],
            words(cache.find(&pattern))
        );

        let pattern = Pattern::parse("_ss").unwrap();
        assert!(cache.find(&pattern).is_empty());

        let pattern = Pattern::parse("b_ss").unwrap();
        assert_eq!(vec!["BESS", "BASS", "BOSS"], words(cache.find(&pattern)));
    }

    #[test]
    fn find_is_case_insensitive() {
        let lexicon = lexicon();
        let mut cache = SearchCache::new(&lexicon);

        let lower = cache.find(&Pattern::parse("be").unwrap()).to_vec();
        let upper = cache.find(&Pattern::parse("BE").unwrap()).to_vec();

        assert_eq!(vec![Answer::new("BE", 30)], lower);
        assert_eq!(lower, upper);
        assert_eq!(1, cache.len());
    }

    #[test]
    fn repeated_lookups_do_not_rescan() {
        let lexicon = lexicon();
        let mut cache = SearchCache::new(&lexicon);
        let pattern = Pattern::parse("..SS").unwrap();

        let first = cache.find(&pattern).to_vec();
        let second = cache.find(&pattern).to_vec();

        assert_eq!(first, second);
        assert_eq!(
            CacheStats {
                lookups: 2,
                scans: 1
            },
            cache.stats()
        );
    }

    #[test]
    fn empty_results_are_cached() {
        let lexicon = lexicon();
        let mut cache = SearchCache::new(&lexicon);
        let pattern = Pattern::parse("zz").unwrap();

        assert!(cache.find(&pattern).is_empty());
        assert!(cache.find(&pattern).is_empty());
        assert_eq!(1, cache.stats().scans);
    }
}
