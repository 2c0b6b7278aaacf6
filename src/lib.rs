//! Fills crossword grid skeletons with every combination of dictionary words that
//! satisfies all crossings.
//!
//! ```no_run
//! use gridfill::{Grid, Lexicon};
//!
//! let lexicon = Lexicon::load_default()?;
//! let grid = Grid::parse("#D.. .I.. .F.. .F.#")?;
//! for solution in grid.solve(&lexicon)? {
//!     println!("{}\n", solution);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod crossword;
pub mod error;
pub mod export;
pub mod fill;
pub mod lexicon;
pub mod lookup;
pub mod parse;
pub mod pattern;

pub use crossword::{Cell, Direction, Grid};
pub use error::{EntryError, ExportError, FillError, GridError, LexiconError, PatternError};
pub use fill::{cache::SearchCache, simple::SimpleFiller, CancelToken, FillOptions, Filler};
pub use lexicon::{Answer, Lexicon};
pub use parse::Slot;
pub use pattern::Pattern;

/// Parses `text` and fills it from `lexicon`.
pub fn fill_grid_text(text: &str, lexicon: &Lexicon) -> Result<Vec<Grid>, FillError> {
    let grid = Grid::parse(text)?;
    grid.solve(lexicon)
}
