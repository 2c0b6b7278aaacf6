use crate::{
    error::GridError,
    parse::{parse_slots, Slot, Slots},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Letter(char),
    Blank,
    Block,
}

impl Cell {
    /// Reads one cell of grid text: `#` is a block, `.` a blank, and an ASCII letter a
    /// pre-filled cell (stored uppercase).
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Block),
            '.' => Some(Cell::Blank),
            c if c.is_ascii_alphabetic() => Some(Cell::Letter(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Letter(c) => c,
            Cell::Blank => '.',
            Cell::Block => '#',
        }
    }

    pub fn is_blank(self) -> bool {
        self == Cell::Blank
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Direction {
    Across,
    Down,
}

/// The cell matrix of a crossword plus the slots derived from it.
///
/// Cloning copies only the cells; the slot list is shared between every clone made during
/// a search.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) cells: Vec<Cell>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) slots: Arc<Slots>,
}

impl Grid {
    /// Builds a grid from whitespace-separated rows over `A-Z`, `.` and `#`
    /// (case-insensitive).
    pub fn parse(text: &str) -> Result<Grid, GridError> {
        let rows: Vec<&str> = text.split_whitespace().collect();
        Grid::from_rows(&rows)
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, GridError> {
        let width = match rows.first() {
            Some(row) => row.as_ref().chars().count(),
            None => return Err(GridError::Empty),
        };
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: row_index + 1,
                    expected: width,
                    found,
                });
            }
            for (col_index, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| GridError::InvalidCell {
                    row: row_index + 1,
                    col: col_index + 1,
                    found: c.to_string(),
                })?;
                cells.push(cell);
            }
        }

        Ok(Grid::from_cells(cells, width, rows.len()))
    }

    pub(crate) fn from_cells(cells: Vec<Cell>, width: usize, height: usize) -> Grid {
        let slots = parse_slots(&cells, width, height);
        Grid {
            cells,
            width,
            height,
            slots: Arc::new(slots),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn incomplete_slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter().filter(move |slot| !slot.is_complete(self))
    }

    /// True when no cell is blank. Every non-block cell belongs to a slot, so this is the
    /// same as every slot being complete.
    pub fn is_complete(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_blank())
    }

    /// Serialization of every cell, used to recognise a state reached twice.
    pub fn state_key(&self) -> String {
        self.cells.iter().map(|cell| cell.to_char()).collect()
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}

// Slots are derived from the cells, so equality only looks at the cells.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Hash for Grid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.cells.hash(state);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[row * self.width + col].to_char())?;
                if col != self.width - 1 {
                    write!(f, " ")?;
                }
            }
            if row != self.height - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Walks the cells of one slot in reading order.
#[derive(Clone, Debug)]
pub struct SlotIter<'s> {
    grid: &'s Grid,
    slot: &'s Slot,
    index: usize,
}

impl<'s> SlotIter<'s> {
    pub fn new(grid: &'s Grid, slot: &'s Slot) -> SlotIter<'s> {
        SlotIter {
            grid,
            slot,
            index: 0,
        }
    }
}

impl<'s> Iterator for SlotIter<'s> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.slot.length {
            return None;
        }

        let cell_index = self.slot.cell_index(self.grid.width, self.index);
        self.index += 1;
        Some(self.grid.cells[cell_index])
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Grid, SlotIter};
    use crate::{crossword::Direction, error::GridError, parse::Slot};
    use std::collections::HashSet;

    #[test]
    fn parse_works() {
        let result = Grid::parse(
            "
ab#
d.f
#hi
",
        );

        assert!(result.is_ok());

        let g = result.unwrap();
        assert_eq!(3, g.width());
        assert_eq!(3, g.height());
        assert_eq!(Some(Cell::Letter('A')), g.cell(0, 0));
        assert_eq!(Some(Cell::Block), g.cell(0, 2));
        assert_eq!(Some(Cell::Blank), g.cell(1, 1));
        assert_eq!(None, g.cell(3, 0));
        assert_eq!("AB#D.F#HI", g.state_key());
        assert_eq!("A B #\nD . F\n# H I", g.to_string());
    }

    #[test]
    fn parse_rectangle() {
        let g: Grid = "....# ##...".parse().unwrap();
        assert_eq!(5, g.width());
        assert_eq!(2, g.height());
        assert_eq!(vec!["....#", "##..."], g.rows());
    }

    #[test]
    fn parse_reports_ragged_row() {
        assert_eq!(
            Err(GridError::RaggedRow {
                row: 3,
                expected: 3,
                found: 2
            }),
            Grid::parse("...\n...\n..")
        );
    }

    #[test]
    fn parse_reports_invalid_cell() {
        assert_eq!(
            Err(GridError::InvalidCell {
                row: 2,
                col: 2,
                found: String::from("*")
            }),
            Grid::parse("...\n.*.")
        );
        assert_eq!(Err(GridError::Empty), Grid::parse("  \n "));
    }

    #[test]
    fn slot_iter_works() {
        let g = Grid::parse("ABC DEF GHI").unwrap();
        let across = Slot {
            start_row: 0,
            start_col: 0,
            direction: Direction::Across,
            length: 3,
        };
        let s: String = SlotIter::new(&g, &across).map(Cell::to_char).collect();
        assert_eq!("ABC", s);

        let down = Slot {
            start_row: 0,
            start_col: 1,
            direction: Direction::Down,
            length: 3,
        };
        let s: String = SlotIter::new(&g, &down).map(Cell::to_char).collect();
        assert_eq!("BEH", s);
    }

    #[test]
    fn clones_share_slots() {
        let g = Grid::parse("... ... ...").unwrap();
        let mut h = g.clone();
        h.cells[0] = Cell::Letter('Q');

        assert!(std::sync::Arc::ptr_eq(&g.slots, &h.slots));
        assert_eq!(Cell::Blank, g.cells[0]);
        assert_ne!(g, h);
    }

    #[test]
    fn equal_grids_hash_together() {
        let a = Grid::parse("ab cd").unwrap();
        let b = Grid::parse("AB CD").unwrap();

        let mut set = HashSet::new();
        set.insert(a);

        assert!(set.contains(&b));
    }

    #[test]
    fn completeness() {
        assert!(Grid::parse("AB #C").unwrap().is_complete());
        assert!(!Grid::parse("A. #C").unwrap().is_complete());
    }
}
