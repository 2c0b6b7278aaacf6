use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{EntryError, LexiconError};

pub const DEFAULT_WORDLIST: &str = "resources/broda_diehl_list.txt";
pub const UNSCORED: i64 = -1;

/// A dictionary word and its score.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Answer {
    pub word: String,
    pub score: i64,
}

impl Answer {
    /// Uppercases `word`.
    pub fn new(word: &str, score: i64) -> Answer {
        Answer {
            word: word.to_ascii_uppercase(),
            score,
        }
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

/// Every known answer, bucketed by length. Loaded once, then only read.
#[derive(Debug, Default)]
pub struct Lexicon {
    by_length: FxHashMap<usize, Vec<Answer>>,
    words: FxHashSet<String>,
    skipped: Vec<EntryError>,
}

impl Lexicon {
    pub fn new() -> Lexicon {
        Lexicon::default()
    }

    /// Builds a lexicon from in-memory answers; the first occurrence of a word wins.
    pub fn build<I: IntoIterator<Item = Answer>>(answers: I) -> Lexicon {
        let mut lexicon = Lexicon::new();
        for answer in answers {
            lexicon.add(answer);
        }
        lexicon
    }

    /// Loads every source in order. Words already loaded from an earlier source are
    /// skipped.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Lexicon, LexiconError> {
        let mut lexicon = Lexicon::new();
        for path in paths {
            lexicon.load_file(path.as_ref())?;
        }
        Ok(lexicon)
    }

    pub fn load_default() -> Result<Lexicon, LexiconError> {
        Lexicon::load(&[DEFAULT_WORDLIST])
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), LexiconError> {
        info!("loading word list from {}", path.display());
        let io_error = |source: std::io::Error| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        self.read_records(BufReader::new(file), &path.display().to_string())
            .map_err(io_error)
    }

    /// Reads newline-separated `WORD;SCORE` records. A missing score means
    /// [`UNSCORED`]. Malformed records are logged, remembered in
    /// [`skipped`](Lexicon::skipped) and otherwise ignored.
    pub fn read_records<R: BufRead>(&mut self, reader: R, source: &str) -> std::io::Result<()> {
        let before = self.len();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match parse_record(&line, source, index + 1) {
                Ok(answer) => {
                    self.add(answer);
                }
                Err(err) => {
                    warn!("skipping dictionary record: {}", err);
                    self.skipped.push(err);
                }
            }
        }

        info!("loaded {} answers from {}", self.len() - before, source);
        Ok(())
    }

    /// Returns false when the word was already present or is not made of ASCII letters
    /// only; such answers are not added.
    pub fn add(&mut self, answer: Answer) -> bool {
        if !is_word(&answer.word) {
            debug!("dropping {:?}: only letters can fill a grid", answer.word);
            return false;
        }
        if self.words.contains(&answer.word) {
            return false;
        }
        self.words.insert(answer.word.clone());
        self.by_length.entry(answer.len()).or_default().push(answer);
        true
    }

    /// Answers of exactly `length` letters, in load order.
    pub fn candidates_of_length(&self, length: usize) -> &[Answer] {
        self.by_length
            .get(&length)
            .map(|answers| answers.as_slice())
            .unwrap_or(&[])
    }

    /// `word` must be uppercase.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn skipped(&self) -> &[EntryError] {
        &self.skipped
    }
}

fn is_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_record(line: &str, source: &str, line_number: usize) -> Result<Answer, EntryError> {
    let mut fields = line.splitn(2, ';');
    let word = fields.next().unwrap_or("").trim();
    if word.is_empty() {
        return Err(EntryError::MissingWord {
            source_name: source.to_string(),
            line: line_number,
        });
    }

    if !is_word(word) {
        return Err(EntryError::InvalidWord {
            source_name: source.to_string(),
            line: line_number,
            token: word.to_string(),
        });
    }

    let score = match fields.next().map(str::trim) {
        None | Some("") => UNSCORED,
        Some(token) => token.parse().map_err(|_| EntryError::InvalidScore {
            source_name: source.to_string(),
            line: line_number,
            token: token.to_string(),
        })?,
    };

    Ok(Answer::new(word, score))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::{Answer, Lexicon, UNSCORED};
    use crate::error::{EntryError, LexiconError};

    #[test]
    fn build_dedups() {
        let lexicon = Lexicon::build(vec![
            Answer::new("bass", 50),
            Answer::new("bats", 40),
            Answer::new("BASS", 10),
            Answer::new("be", 30),
        ]);

        assert_eq!(3, lexicon.len());
        assert_eq!(
            vec![Answer::new("BASS", 50), Answer::new("BATS", 40)],
            lexicon.candidates_of_length(4)
        );
        assert_eq!(1, lexicon.candidates_of_length(2).len());
        assert!(lexicon.candidates_of_length(7).is_empty());
        assert!(lexicon.contains("BE"));
        assert!(!lexicon.contains("BAT"));
    }

    #[test]
    fn build_drops_non_letters() {
        let mut lexicon = Lexicon::build(vec![
            Answer::new("a.", 9),
            Answer::new("ice cream", 5),
            Answer::new("", 1),
            Answer::new("cd", 1),
        ]);

        assert_eq!(1, lexicon.len());
        assert_eq!(vec![Answer::new("CD", 1)], lexicon.candidates_of_length(2));
        assert!(!lexicon.contains("A."));
        assert!(!lexicon.add(Answer::new("x-ray", 3)));
        assert!(lexicon.add(Answer::new("xray", 3)));
    }

    #[test]
    fn read_records_works() {
        let input = "\
bass;50
bats
;20
bess;lots
bass;10
a.;9

be;30
";
        let mut lexicon = Lexicon::new();
        lexicon.read_records(input.as_bytes(), "inline").unwrap();

        assert_eq!(3, lexicon.len());
        assert_eq!(
            vec![Answer::new("BASS", 50), Answer::new("BATS", UNSCORED)],
            lexicon.candidates_of_length(4)
        );
        assert_eq!(
            vec![
                EntryError::MissingWord {
                    source_name: String::from("inline"),
                    line: 3
                },
                EntryError::InvalidScore {
                    source_name: String::from("inline"),
                    line: 4,
                    token: String::from("lots")
                },
                EntryError::InvalidWord {
                    source_name: String::from("inline"),
                    line: 6,
                    token: String::from("a.")
                },
            ],
            lexicon.skipped()
        );
    }

    #[test]
    fn load_reads_sources_in_order() {
        let mut first = NamedTempFile::new().unwrap();
        writeln!(first, "ALPHA;10\nBETA;20").unwrap();
        let mut second = NamedTempFile::new().unwrap();
        writeln!(second, "BETA;99\nGAMMA;30").unwrap();

        let lexicon = Lexicon::load(&[first.path(), second.path()]).unwrap();

        assert_eq!(3, lexicon.len());
        assert_eq!(
            vec![Answer::new("ALPHA", 10), Answer::new("GAMMA", 30)],
            lexicon.candidates_of_length(5)
        );
        assert_eq!(vec![Answer::new("BETA", 20)], lexicon.candidates_of_length(4));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        match Lexicon::load(&[&missing]) {
            Err(LexiconError::Io { path, .. }) => assert_eq!(missing, path),
            other => panic!("unexpected {:?}", other),
        }
    }
}
