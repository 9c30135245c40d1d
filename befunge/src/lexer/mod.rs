//! Character-to-cell mapping using logos
//!
//! Befunge source is lexed one character at a time: every character becomes
//! exactly one grid cell, so a line of `n` characters yields `n` cells.

mod token;

pub use token::Token;

use crate::grid::Cell;
use logos::Logos;

/// Lex one source line into cells.
pub fn tokenize_line(line: &str) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(line.len());
    let mut lexer = Token::lexer(line);

    while let Some(result) = lexer.next() {
        let cell = match result {
            Ok(token) => token.into_cell(),
            // Only line terminators fall through `.`; keep them by code point
            Err(()) => lexer
                .slice()
                .chars()
                .next()
                .map_or(Cell::Blank, |c| Cell::Character(c as i64)),
        };
        cells.push(cell);
    }

    cells
}

/// Lex a single character, as `p` does when writing into the grid.
pub fn lex_char(c: char) -> Cell {
    let mut buf = [0u8; 4];
    tokenize_line(c.encode_utf8(&mut buf))
        .first()
        .copied()
        .unwrap_or(Cell::Character(c as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Opcode;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize_line("").is_empty());
    }

    #[test]
    fn test_tokenize_one_cell_per_char() {
        let line = "v  > 12+ .@ \"héllo\"";
        assert_eq!(tokenize_line(line).len(), line.chars().count());
    }

    #[test]
    fn test_tokenize_digits() {
        let cells = tokenize_line("0189");
        assert_eq!(cells, vec![Cell::Digit(0), Cell::Digit(1), Cell::Digit(8), Cell::Digit(9)]);
    }

    #[test]
    fn test_tokenize_arithmetic() {
        let cells = tokenize_line("+-*/%!`");
        let ops = [
            Opcode::Add,
            Opcode::Subtract,
            Opcode::Multiply,
            Opcode::Divide,
            Opcode::Modulo,
            Opcode::Not,
            Opcode::Greater,
        ];
        assert_eq!(cells, ops.map(Cell::Op).to_vec());
    }

    #[test]
    fn test_tokenize_every_opcode_glyph_round_trips() {
        let glyphs = "+-*/%!`><^v?_|\":\\$.,#pg&~@";
        for (c, cell) in glyphs.chars().zip(tokenize_line(glyphs)) {
            match cell {
                Cell::Op(op) => assert_eq!(op.glyph(), c),
                other => panic!("{c:?} lexed as {other:?}"),
            }
        }
    }

    #[test]
    fn test_tokenize_space_is_blank() {
        assert_eq!(tokenize_line(" "), vec![Cell::Blank]);
    }

    #[test]
    fn test_tokenize_unknown_characters() {
        let cells = tokenize_line("xV\té");
        assert_eq!(
            cells,
            vec![
                Cell::Character('x' as i64),
                Cell::Character('V' as i64),
                Cell::Character('\t' as i64),
                Cell::Character('é' as i64),
            ]
        );
    }

    #[test]
    fn test_lex_char() {
        assert_eq!(lex_char('@'), Cell::Op(Opcode::Halt));
        assert_eq!(lex_char('5'), Cell::Digit(5));
        assert_eq!(lex_char('\n'), Cell::Character(10));
    }
}
