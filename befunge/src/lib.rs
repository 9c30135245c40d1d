//! Befunge-93 interpreter library
//!
//! Loads program text into a rectangular, self-modifying grid and executes
//! it on a stack machine with host-supplied I/O.

pub mod config;
pub mod error;
pub mod grid;
pub mod interp;
pub mod lexer;

pub use config::RunConfig;
pub use error::{LoadError, Result};
pub use grid::{Cell, Grid, Opcode, Position};
pub use interp::{Interpreter, RuntimeError};

use std::path::Path;

/// Read a source file and build its program grid
pub fn load_file(path: impl AsRef<Path>) -> Result<Grid> {
    let source = std::fs::read_to_string(path)?;
    Grid::from_source(&source)
}
