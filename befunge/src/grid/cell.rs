//! Cell and opcode definitions

use serde::Serialize;
use std::fmt;

/// The fixed Befunge-93 instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Not,
    Greater,
    // Control flow
    Right,
    Left,
    Up,
    Down,
    Random,
    HorizontalIf,
    VerticalIf,
    StringMode,
    Bridge,
    Halt,
    // Stack manipulation
    Duplicate,
    Swap,
    Discard,
    // I/O
    OutputInteger,
    OutputChar,
    InputInteger,
    InputChar,
    // Self-modification
    Put,
    Get,
}

impl Opcode {
    /// The source character this opcode is written as.
    pub fn glyph(self) -> char {
        match self {
            Opcode::Add => '+',
            Opcode::Subtract => '-',
            Opcode::Multiply => '*',
            Opcode::Divide => '/',
            Opcode::Modulo => '%',
            Opcode::Not => '!',
            Opcode::Greater => '`',
            Opcode::Right => '>',
            Opcode::Left => '<',
            Opcode::Up => '^',
            Opcode::Down => 'v',
            Opcode::Random => '?',
            Opcode::HorizontalIf => '_',
            Opcode::VerticalIf => '|',
            Opcode::StringMode => '"',
            Opcode::Bridge => '#',
            Opcode::Halt => '@',
            Opcode::Duplicate => ':',
            Opcode::Swap => '\\',
            Opcode::Discard => '$',
            Opcode::OutputInteger => '.',
            Opcode::OutputChar => ',',
            Opcode::InputInteger => '&',
            Opcode::InputChar => '~',
            Opcode::Put => 'p',
            Opcode::Get => 'g',
        }
    }
}

/// One position of the program grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    /// Literal digit 0-9
    Digit(u8),
    /// An instruction
    Op(Opcode),
    /// Any other character, kept by code point.
    ///
    /// Cells written by `p` may hold values that are not valid Unicode
    /// scalars; they are stored as-is so `g` reads back what was written.
    Character(i64),
    /// Space, or padding
    Blank,
}

impl Cell {
    /// Derive a cell from a runtime value, as `p` does.
    pub fn from_value(value: i64) -> Self {
        u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .map(crate::lexer::lex_char)
            .unwrap_or(Cell::Character(value))
    }

    /// Numeric code point of the character this cell displays as.
    pub fn code_point(self) -> i64 {
        match self {
            Cell::Digit(d) => i64::from(b'0' + d),
            Cell::Op(op) => op.glyph() as i64,
            Cell::Character(c) => c,
            Cell::Blank => ' ' as i64,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = u32::try_from(self.code_point())
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        write!(f, "{c}")
    }
}
