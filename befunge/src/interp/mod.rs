//! Befunge execution engine
//!
//! Owns the grid for the duration of a run and drives the
//! fetch/execute/advance loop until `@` or a runtime error.

mod error;
mod io;
mod machine;
mod stack;

pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use io::{Input, InputFailure, Output, ScriptedHost, StdHost};
pub use machine::{Direction, Interpreter, State};
pub use stack::Stack;
