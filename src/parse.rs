use crate::{
    crossword::{Cell, Direction, Grid, SlotIter},
    error::GridError,
    pattern::Pattern,
};

/// One across or down run of cells that holds a word. Slots never store letters; they
/// read and write through a [`Grid`].
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Slot {
    pub(crate) start_row: usize,
    pub(crate) start_col: usize,
    pub(crate) length: usize,
    pub(crate) direction: Direction,
}

impl Slot {
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn cell_index(&self, width: usize, offset: usize) -> usize {
        match self.direction {
            Direction::Across => self.start_row * width + self.start_col + offset,
            Direction::Down => (self.start_row + offset) * width + self.start_col,
        }
    }

    pub fn iter<'s>(&'s self, grid: &'s Grid) -> SlotIter<'s> {
        SlotIter::new(grid, self)
    }

    /// The slot's current letters with a wildcard for every blank cell.
    pub fn pattern(&self, grid: &Grid) -> Pattern {
        Pattern::from_cells(self.iter(grid))
    }

    /// The slot's cells as grid text (`.` for blanks).
    pub fn word(&self, grid: &Grid) -> String {
        self.iter(grid).map(Cell::to_char).collect()
    }

    pub fn is_complete(&self, grid: &Grid) -> bool {
        !self.iter(grid).any(Cell::is_blank)
    }

    /// Overwrites the slot's cells in `grid` with `word`. Crossing slots see the new
    /// letters because they read the same cells. Nothing is written unless the slot fits
    /// the grid and `word` is exactly `length` ASCII letters.
    pub fn commit(&self, grid: &mut Grid, word: &str) -> Result<(), GridError> {
        let (last_row, last_col) = match self.direction {
            Direction::Across => (self.start_row, self.start_col + self.length - 1),
            Direction::Down => (self.start_row + self.length - 1, self.start_col),
        };
        if last_row >= grid.height || last_col >= grid.width {
            return Err(GridError::SlotOutOfBounds {
                row: self.start_row + 1,
                col: self.start_col + 1,
                length: self.length,
                width: grid.width,
                height: grid.height,
            });
        }

        let found = word.chars().count();
        if found != self.length {
            return Err(GridError::WordLength {
                expected: self.length,
                found,
            });
        }

        if let Some((offset, found)) = word
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphabetic())
        {
            return Err(GridError::InvalidLetter {
                word: word.to_string(),
                offset: offset + 1,
                found,
            });
        }

        for (offset, c) in word.chars().enumerate() {
            let index = self.cell_index(grid.width, offset);
            grid.cells[index] = Cell::Letter(c.to_ascii_uppercase());
        }
        Ok(())
    }
}

/// Every slot of a grid, computed once and shared by all of its clones.
#[derive(Debug, PartialEq, Eq)]
pub struct Slots {
    across: Vec<Slot>,
    down: Vec<Slot>,
    // Per cell: index into `across`, index into `down`.
    crossings: Vec<[Option<usize>; 2]>,
}

impl Slots {
    pub fn across(&self) -> &[Slot] {
        &self.across
    }

    pub fn down(&self) -> &[Slot] {
        &self.down
    }

    /// Across slots followed by down slots. This is the tie-break order of the search.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.across.iter().chain(self.down.iter())
    }

    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slot running in `direction` through the cell at `index`, if any.
    pub fn through(&self, index: usize, direction: Direction) -> Option<&Slot> {
        let entry = self.crossings.get(index)?;
        match direction {
            Direction::Across => entry[0].map(|i| &self.across[i]),
            Direction::Down => entry[1].map(|i| &self.down[i]),
        }
    }

    /// Slots that share a cell with `slot`, in reading order of `slot`.
    pub fn orthogonals<'s>(
        &'s self,
        slot: &'s Slot,
        width: usize,
    ) -> impl Iterator<Item = &'s Slot> + 's {
        let other = match slot.direction {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        };
        (0..slot.length).filter_map(move |offset| self.through(slot.cell_index(width, offset), other))
    }
}

/// Scans for run starts in row-major order. A cell starts an across run when the cell to
/// its left is a block or off the grid, and a down run likewise for the cell above.
///
/// A run of one cell is only a slot when the cell is isolated in both directions, and then
/// only as an across slot.
pub(crate) fn parse_slots(cells: &[Cell], width: usize, height: usize) -> Slots {
    let is_open = |row: usize, col: usize| cells[row * width + col] != Cell::Block;

    let run_length = |row: usize, col: usize, direction: Direction| -> usize {
        let mut length = 0;
        match direction {
            Direction::Across => {
                while col + length < width && is_open(row, col + length) {
                    length += 1;
                }
            }
            Direction::Down => {
                while row + length < height && is_open(row + length, col) {
                    length += 1;
                }
            }
        }
        length
    };

    // Length of the down run covering each cell.
    let mut down_lengths = vec![0; cells.len()];
    for col in 0..width {
        for row in 0..height {
            if is_open(row, col) && (row == 0 || !is_open(row - 1, col)) {
                let length = run_length(row, col, Direction::Down);
                for offset in 0..length {
                    down_lengths[(row + offset) * width + col] = length;
                }
            }
        }
    }

    let mut across = vec![];
    let mut down = vec![];
    let mut crossings = vec![[None, None]; cells.len()];

    for row in 0..height {
        for col in 0..width {
            if !is_open(row, col) {
                continue;
            }

            if col == 0 || !is_open(row, col - 1) {
                let length = run_length(row, col, Direction::Across);
                if length > 1 || down_lengths[row * width + col] == 1 {
                    let slot = Slot {
                        start_row: row,
                        start_col: col,
                        length,
                        direction: Direction::Across,
                    };
                    for offset in 0..length {
                        crossings[slot.cell_index(width, offset)][0] = Some(across.len());
                    }
                    across.push(slot);
                }
            }

            if row == 0 || !is_open(row - 1, col) {
                let length = down_lengths[row * width + col];
                if length > 1 {
                    let slot = Slot {
                        start_row: row,
                        start_col: col,
                        length,
                        direction: Direction::Down,
                    };
                    for offset in 0..length {
                        crossings[slot.cell_index(width, offset)][1] = Some(down.len());
                    }
                    down.push(slot);
                }
            }
        }
    }

    Slots {
        across,
        down,
        crossings,
    }
}
