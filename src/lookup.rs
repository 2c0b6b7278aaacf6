//! Interactive dictionary lookup: type a pattern, get every matching answer.

use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    error::PatternError,
    fill::cache::SearchCache,
    lexicon::Answer,
    pattern::Pattern,
};

/// Typing this on its own line ends the session.
pub const EXIT_QUERY: &str = "q";

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Exit,
    Empty,
    Matches {
        pattern: Pattern,
        answers: Vec<Answer>,
    },
    Invalid(PatternError),
}

impl Reply {
    /// The text printed for this reply, or `None` when nothing should be printed.
    pub fn render(&self) -> Option<String> {
        match self {
            Reply::Exit | Reply::Empty => None,
            Reply::Matches { pattern, answers } => {
                let mut out = format!("search string: {}\n----------", pattern);
                for answer in answers {
                    out.push('\n');
                    out.push_str(&answer.word);
                }
                Some(out)
            }
            Reply::Invalid(err) => Some(format!("invalid pattern: {}", err)),
        }
    }
}

pub struct Interactive<'s> {
    cache: SearchCache<'s>,
}

impl<'s> Interactive<'s> {
    pub fn new(cache: SearchCache<'s>) -> Interactive<'s> {
        Interactive { cache }
    }

    pub fn respond(&mut self, line: &str) -> Reply {
        let query = line.trim();
        if query == EXIT_QUERY {
            return Reply::Exit;
        }
        if query.is_empty() {
            return Reply::Empty;
        }

        match Pattern::parse(query) {
            Ok(pattern) => {
                let answers = self.cache.find(&pattern).to_vec();
                debug!("{} matched {} answer(s)", pattern, answers.len());
                Reply::Matches { pattern, answers }
            }
            Err(err) => Reply::Invalid(err),
        }
    }

    /// Reads queries from the terminal until [`EXIT_QUERY`], end of input or Ctrl-C.
    pub fn run(&mut self) -> Result<(), ReadlineError> {
        let mut editor = DefaultEditor::new()?;

        println!(
            "starting interactive mode! to exit, input \"{}\" and press enter",
            EXIT_QUERY
        );
        println!("-------------------------------------------------------------");

        loop {
            let line = match editor.readline("search for: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            };
            editor.add_history_entry(line.as_str())?;

            let reply = self.respond(&line);
            if reply == Reply::Exit {
                break;
            }
            if let Some(text) = reply.render() {
                println!("\n{}\n", text);
            }
        }

        println!("-------------------------------------------------");
        println!("now exiting interactive mode. thanks for playing!");
        println!("-------------------------------------------------");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Interactive, Reply};
    use crate::{
        error::PatternError,
        fill::cache::SearchCache,
        lexicon::{Answer, Lexicon},
        pattern::Pattern,
    };

    fn lexicon() -> Lexicon {
        Lexicon::build(vec![
            Answer::new("bass", 10),
            Answer::new("bess", 40),
            Answer::new("bats", 20),
        ])
    }

    #[test]
    fn respond_finds_matches() {
        let lexicon = lexicon();
        let mut interactive = Interactive::new(SearchCache::new(&lexicon));

        let reply = interactive.respond("b_ss\n");

        assert_eq!(
            Reply::Matches {
                pattern: Pattern::parse("B.SS").unwrap(),
                answers: vec![Answer::new("BESS", 40), Answer::new("BASS", 10)],
            },
            reply
        );
        assert_eq!(
            Some(String::from("search string: B.SS\n----------\nBESS\nBASS")),
            reply.render()
        );
    }

    #[test]
    fn respond_handles_exit_blank_and_garbage() {
        let lexicon = lexicon();
        let mut interactive = Interactive::new(SearchCache::new(&lexicon));

        assert_eq!(Reply::Exit, interactive.respond("q"));
        assert_eq!(Reply::Empty, interactive.respond("   "));
        assert_eq!(None, Reply::Empty.render());

        let reply = interactive.respond("b[ae]ss");
        assert_eq!(
            Reply::Invalid(PatternError::InvalidChar {
                position: 2,
                found: '['
            }),
            reply
        );
        assert!(reply.render().unwrap().starts_with("invalid pattern"));
    }

    #[test]
    fn no_matches_prints_header_only() {
        let lexicon = lexicon();
        let mut interactive = Interactive::new(SearchCache::new(&lexicon));

        let reply = interactive.respond("zzzz");

        assert_eq!(
            Some(String::from("search string: ZZZZ\n----------")),
            reply.render()
        );
    }
}
