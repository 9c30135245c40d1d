//! Token definitions

use crate::grid::{Cell, Opcode};
use logos::Logos;

/// One source character, classified
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum Token {
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("`")]
    Backtick,

    // Direction
    #[token(">")]
    Right,
    #[token("<")]
    Left,
    #[token("^")]
    Up,
    #[token("v")]
    Down,
    #[token("?")]
    Question,
    #[token("_")]
    Underscore,
    #[token("|")]
    Pipe,

    #[token("\"")]
    Quote,
    #[token(":")]
    Colon,
    #[token("\\")]
    Backslash,
    #[token("$")]
    Dollar,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("#")]
    Hash,
    #[token("p")]
    Put,
    #[token("g")]
    Get,
    #[token("&")]
    Ampersand,
    #[token("~")]
    Tilde,
    #[token("@")]
    At,

    #[regex("[0-9]", |lex| lex.slice().as_bytes()[0] - b'0', priority = 3)]
    Digit(u8),

    #[token(" ")]
    Space,

    /// Anything else; carried through so `g` can read it back
    #[regex(".", |lex| lex.slice().chars().next(), priority = 1)]
    Other(char),
}

impl Token {
    pub fn into_cell(self) -> Cell {
        let op = match self {
            Token::Digit(d) => return Cell::Digit(d),
            Token::Space => return Cell::Blank,
            Token::Other(c) => return Cell::Character(c as i64),
            Token::Plus => Opcode::Add,
            Token::Minus => Opcode::Subtract,
            Token::Star => Opcode::Multiply,
            Token::Slash => Opcode::Divide,
            Token::Percent => Opcode::Modulo,
            Token::Bang => Opcode::Not,
            Token::Backtick => Opcode::Greater,
            Token::Right => Opcode::Right,
            Token::Left => Opcode::Left,
            Token::Up => Opcode::Up,
            Token::Down => Opcode::Down,
            Token::Question => Opcode::Random,
            Token::Underscore => Opcode::HorizontalIf,
            Token::Pipe => Opcode::VerticalIf,
            Token::Quote => Opcode::StringMode,
            Token::Colon => Opcode::Duplicate,
            Token::Backslash => Opcode::Swap,
            Token::Dollar => Opcode::Discard,
            Token::Dot => Opcode::OutputInteger,
            Token::Comma => Opcode::OutputChar,
            Token::Hash => Opcode::Bridge,
            Token::Put => Opcode::Put,
            Token::Get => Opcode::Get,
            Token::Ampersand => Opcode::InputInteger,
            Token::Tilde => Opcode::InputChar,
            Token::At => Opcode::Halt,
        };
        Cell::Op(op)
    }
}
