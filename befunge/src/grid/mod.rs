//! Program grid: the two-dimensional, self-modifying program memory

mod cell;

pub use cell::{Cell, Opcode};

use crate::error::{LoadError, Result};
use crate::lexer::tokenize_line;
use serde::Serialize;
use std::fmt;

/// A grid coordinate as `(row, col)`.
///
/// Signed so that an instruction pointer that walks off the top or left edge
/// still has a representable position to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The program entry point.
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Attempted access outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub position: Position,
    pub height: usize,
    pub width: usize,
}

/// Rectangular grid of cells, stored row-major in one flat buffer.
///
/// The shape is fixed at construction; only cell contents change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of cells, padding short rows with blanks.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LoadError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Cell::Blank);
            cells.extend(row);
        }

        tracing::debug!(width, height, "loaded program grid");
        Ok(Grid { width, height, cells })
    }

    /// Lex program text into a grid, one row per source line.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_rows(source.lines().map(tokenize_line).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> std::result::Result<usize, OutOfBounds> {
        let in_rows = (0..self.height as i64).contains(&pos.row);
        let in_cols = (0..self.width as i64).contains(&pos.col);
        if in_rows && in_cols {
            Ok(pos.row as usize * self.width + pos.col as usize)
        } else {
            Err(OutOfBounds {
                position: pos,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn read(&self, pos: Position) -> std::result::Result<Cell, OutOfBounds> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn write(&mut self, pos: Position, cell: Cell) -> std::result::Result<(), OutOfBounds> {
        let i = self.index(pos)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_pads_rows() {
        let grid = Grid::from_source("12\n3\n456").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.read(Position::new(1, 1)).unwrap(), Cell::Blank);
        assert_eq!(grid.read(Position::new(1, 2)).unwrap(), Cell::Blank);
        assert_eq!(grid.read(Position::new(2, 2)).unwrap(), Cell::Digit(6));
    }

    #[test]
    fn test_from_source_handles_crlf_and_trailing_newline() {
        let grid = Grid::from_source("@\r\n.\r\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.read(Position::origin()).unwrap(), Cell::Op(Opcode::Halt));
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(matches!(Grid::from_source(""), Err(LoadError::Empty)));
        assert!(matches!(Grid::from_source("\n\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let grid = Grid::from_source("@").unwrap();
        let err = grid.read(Position::new(0, 1)).unwrap_err();
        assert_eq!(err.position, Position::new(0, 1));
        assert_eq!((err.height, err.width), (1, 1));
        assert!(grid.read(Position::new(-1, 0)).is_err());
    }

    #[test]
    fn test_write_replaces_cell() {
        let mut grid = Grid::from_source("  \n  ").unwrap();
        grid.write(Position::new(1, 0), Cell::Character('X' as i64)).unwrap();
        assert_eq!(grid.read(Position::new(1, 0)).unwrap(), Cell::Character('X' as i64));
        assert_eq!(grid.read(Position::new(0, 0)).unwrap(), Cell::Blank);
    }

    #[test]
    fn test_write_out_of_bounds_leaves_grid_untouched() {
        let mut grid = Grid::from_source("ab").unwrap();
        let before = grid.clone();
        assert!(grid.write(Position::new(5, 5), Cell::Blank).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_display_dump() {
        let grid = Grid::from_source("v  <\n>1.@\n^\"x<").unwrap();
        insta::assert_snapshot!(grid.to_string(), @r#"
        v  <
        >1.@
        ^"x<
        "#);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(2, -1).to_string(), "[2,-1]");
    }
}
