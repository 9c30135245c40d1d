//! Runtime errors for the interpreter

use crate::grid::{OutOfBounds, Position};
use thiserror::Error;

/// Runtime error during interpretation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Runtime error at {position}: {message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    /// Instruction pointer position when the run failed
    pub position: Position,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `/` or `%` with a zero divisor
    DivisionByZero,
    /// The host could not supply a number or character
    InputError,
    /// Fetch, `p` or `g` addressed a cell outside the grid
    OutOfBounds,
    /// The host could not accept output
    OutputError,
    /// The configured step budget ran out
    StepLimitExceeded,
}

impl RuntimeError {
    pub fn division_by_zero(position: Position) -> Self {
        RuntimeError {
            kind: ErrorKind::DivisionByZero,
            message: "division by zero".to_string(),
            position,
        }
    }

    pub fn input_error(position: Position, msg: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::InputError,
            message: format!("unable to read input: {msg}"),
            position,
        }
    }

    pub fn out_of_bounds(position: Position, access: OutOfBounds) -> Self {
        RuntimeError {
            kind: ErrorKind::OutOfBounds,
            message: format!(
                "cell {} is outside the {}x{} grid",
                access.position, access.height, access.width
            ),
            position,
        }
    }

    pub fn output_error(position: Position, msg: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::OutputError,
            message: format!("unable to write output: {msg}"),
            position,
        }
    }

    pub fn step_limit_exceeded(position: Position, limit: u64) -> Self {
        RuntimeError {
            kind: ErrorKind::StepLimitExceeded,
            message: format!("step limit of {limit} exceeded"),
            position,
        }
    }
}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero() {
        let err = RuntimeError::division_by_zero(Position::new(0, 3));
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(err.position, Position::new(0, 3));
        assert!(err.message.contains("division by zero"));
    }

    #[test]
    fn test_input_error() {
        let err = RuntimeError::input_error(Position::origin(), "end of input");
        assert_eq!(err.kind, ErrorKind::InputError);
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_out_of_bounds_names_coordinates() {
        let access = OutOfBounds {
            position: Position::new(7, -2),
            height: 3,
            width: 4,
        };
        let err = RuntimeError::out_of_bounds(Position::new(1, 1), access);
        assert_eq!(err.kind, ErrorKind::OutOfBounds);
        assert!(err.message.contains("[7,-2]"));
        assert!(err.message.contains("3x4"));
    }

    #[test]
    fn test_step_limit_exceeded() {
        let err = RuntimeError::step_limit_exceeded(Position::origin(), 100);
        assert_eq!(err.kind, ErrorKind::StepLimitExceeded);
        assert!(err.message.contains("100"));
    }

    #[test]
    fn test_display() {
        let err = RuntimeError::division_by_zero(Position::new(2, 5));
        let display = format!("{}", err);
        assert!(display.starts_with("Runtime error at [2,5]:"));
        assert!(display.contains("division by zero"));
    }
}
