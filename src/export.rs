//! CSV import of grid skeletons and CSV export of filled grids.
//!
//! Each field is one cell. On import an empty field is a blank, `#` a block and a letter a
//! pre-filled cell; on export blocks are written as empty fields.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    crossword::{Cell, Grid},
    error::{ExportError, GridError},
};

pub const DEFAULT_RESULTS_DIR: &str = "./results/";

pub fn read_csv(path: &Path) -> Result<Grid, ExportError> {
    let csv_error = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = vec![];
    for (row_index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let mut row = String::with_capacity(record.len());
        for (col_index, field) in record.iter().enumerate() {
            let field = field.trim();
            let mut chars = field.chars();
            match (chars.next(), chars.next()) {
                (None, _) => row.push(Cell::Blank.to_char()),
                (Some(c), None) => row.push(c),
                _ => {
                    return Err(ExportError::Grid {
                        path: path.to_path_buf(),
                        source: GridError::InvalidCell {
                            row: row_index + 1,
                            col: col_index + 1,
                            found: field.to_string(),
                        },
                    })
                }
            }
        }
        rows.push(row);
    }

    Grid::from_rows(&rows).map_err(|source| ExportError::Grid {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_csv(grid: &Grid, path: &Path) -> Result<(), ExportError> {
    let csv_error = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    for row in grid.cells().chunks(grid.width()) {
        let record: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Block => String::new(),
                cell => cell.to_char().to_string(),
            })
            .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes numbered solution files (`result_1.csv`, `result_2.csv`, ...) into one
/// directory, creating it on first use.
pub struct ResultWriter {
    dir: PathBuf,
    written: usize,
}

impl ResultWriter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> ResultWriter {
        ResultWriter {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn write(&mut self, grid: &Grid) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(format!("result_{}.csv", self.written + 1));
        write_csv(grid, &path)?;
        self.written += 1;
        info!("{} result(s) found, wrote {}", self.written, path.display());
        Ok(path)
    }

    pub fn written(&self) -> usize {
        self.written
    }
}
