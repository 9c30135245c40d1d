//! Host I/O capabilities
//!
//! The engine never touches the console directly. `&`, `~`, `.` and `,` call
//! out through [`Input`] and [`Output`], so an embedder decides where bytes
//! come from and go to.

use std::collections::VecDeque;
use std::io::{self, BufRead, Cursor, Write};
use thiserror::Error;

/// Why the host could not supply input
#[derive(Debug, Error)]
pub enum InputFailure {
    #[error("end of input")]
    Eof,

    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of values for `&` and `~`. Calls may block.
pub trait Input {
    fn read_integer(&mut self) -> Result<i64, InputFailure>;

    /// Next character, as a code point.
    fn read_char(&mut self) -> Result<i64, InputFailure>;
}

/// Sink for `.` and `,`
pub trait Output {
    /// Emit `value` as decimal text followed by one space.
    fn write_integer(&mut self, value: i64) -> io::Result<()>;

    /// Emit a single character given by code point.
    fn write_char(&mut self, code_point: i64) -> io::Result<()>;
}

/// Line-buffered host over any reader and writer.
///
/// `&` consumes a whole line; `~` consumes one character at a time,
/// including the line terminator.
pub struct StdHost<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<char>,
}

impl<R: BufRead, W: Write> StdHost<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StdHost {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    fn next_line(&mut self) -> Result<String, InputFailure> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputFailure::Eof);
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Input for StdHost<R, W> {
    fn read_integer(&mut self) -> Result<i64, InputFailure> {
        // Finish a line partly consumed by `~` before reading a new one,
        // unless all `~` left behind is the line terminator
        let mut line: String = self.pending.drain(..).collect();
        if line.trim().is_empty() {
            line = self.next_line()?;
        }
        let text = line.trim();
        text.parse()
            .map_err(|_| InputFailure::InvalidInteger(text.to_string()))
    }

    fn read_char(&mut self) -> Result<i64, InputFailure> {
        if self.pending.is_empty() {
            let line = self.next_line()?;
            self.pending.extend(line.chars());
        }
        self.pending
            .pop_front()
            .map(|c| c as i64)
            .ok_or(InputFailure::Eof)
    }
}

impl<R: BufRead, W: Write> Output for StdHost<R, W> {
    fn write_integer(&mut self, value: i64) -> io::Result<()> {
        write!(self.writer, "{value} ")?;
        self.writer.flush()
    }

    fn write_char(&mut self, code_point: i64) -> io::Result<()> {
        let c = u32::try_from(code_point)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        write!(self.writer, "{c}")?;
        self.writer.flush()
    }
}

/// Host with canned input and captured output, for tests and embedding
pub type ScriptedHost = StdHost<Cursor<Vec<u8>>, Vec<u8>>;

impl ScriptedHost {
    pub fn scripted(input: &str) -> Self {
        StdHost::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Everything written so far, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.writer).into_owned()
    }
}
