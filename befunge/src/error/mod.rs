//! Error types and reporting

use crate::grid::Position;
use crate::interp::{ErrorKind, RuntimeError};
use std::io;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure to turn source text into a runnable grid
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No rows, or only empty rows: there is no cell at the entry point
    #[error("program is empty")]
    Empty,
}

/// Char offset range of the cell at `pos` in `source`, if it was written
/// there rather than padded in.
fn cell_range(source: &str, pos: Position) -> Option<std::ops::Range<usize>> {
    let row = usize::try_from(pos.row).ok()?;
    let col = usize::try_from(pos.col).ok()?;

    let mut offset = 0;
    for (i, line) in source.split_inclusive('\n').enumerate() {
        if i == row {
            let text = line.trim_end_matches(['\n', '\r']);
            if col < text.chars().count() {
                let start = offset + col;
                return Some(start..start + 1);
            }
            return None;
        }
        offset += line.chars().count();
    }
    None
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::DivisionByZero => "Division by zero",
        ErrorKind::InputError => "Input",
        ErrorKind::OutOfBounds => "Out of bounds",
        ErrorKind::OutputError => "Output",
        ErrorKind::StepLimitExceeded => "Step limit",
    }
}

/// Report a runtime error with ariadne, pointing at the failing cell.
pub fn report_runtime_error(filename: &str, source: &str, error: &RuntimeError) -> io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let title = format!("{} error at {}", kind_label(error.kind), error.position);

    if let Some(range) = cell_range(source, error.position) {
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(title)
            .with_label(
                Label::new((filename, range))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        // Padding or off-grid: nothing in the source to underline
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{title}: {}", error.message))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_range_first_line() {
        assert_eq!(cell_range("12@", Position::new(0, 2)), Some(2..3));
    }

    #[test]
    fn test_cell_range_counts_previous_lines() {
        // "ab\n" is 3 chars, "é\r\n" is 3 chars
        let source = "ab\né\r\nxyz";
        assert_eq!(cell_range(source, Position::new(1, 0)), Some(3..4));
        assert_eq!(cell_range(source, Position::new(2, 1)), Some(7..8));
    }

    #[test]
    fn test_cell_range_padding_and_off_grid() {
        let source = "abc\nd";
        assert_eq!(cell_range(source, Position::new(1, 2)), None);
        assert_eq!(cell_range(source, Position::new(-1, 0)), None);
        assert_eq!(cell_range(source, Position::new(0, -1)), None);
        assert_eq!(cell_range(source, Position::new(5, 0)), None);
    }

    #[test]
    fn test_load_error_display() {
        assert_eq!(LoadError::Empty.to_string(), "program is empty");
        let io = LoadError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(io.to_string().contains("missing"));
    }
}
