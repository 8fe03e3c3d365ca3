use std::fmt;

use crate::ast::position::Position;

#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedEOF(Position),
    UnexpectedChar(char, Position),
    MissingOpenParen(Position),
    MissingClosingParen(Position),
    ExpectedArgument(Position),
    UnterminatedString(Position),
    InvalidEscape(char, Position),
    UnterminatedBlock(Position),
    ExtraCharacters(Position),
}

impl ParseError {
    pub fn pos(&self) -> Position {
        match *self {
            ParseError::UnexpectedEOF(position) => position,
            ParseError::UnexpectedChar(_, position) => position,
            ParseError::MissingOpenParen(position) => position,
            ParseError::MissingClosingParen(position) => position,
            ParseError::ExpectedArgument(position) => position,
            ParseError::UnterminatedString(position) => position,
            ParseError::InvalidEscape(_, position) => position,
            ParseError::UnterminatedBlock(position) => position,
            ParseError::ExtraCharacters(position) => position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEOF(at) => {
                write!(f, "Unexpected end of input, at {}:{}", at.line, at.column)
            }
            ParseError::UnexpectedChar(ch, at) => {
                write!(f, "Unexpected char '{}', at {}:{}", ch, at.line, at.column)
            }
            ParseError::MissingOpenParen(at) => {
                write!(
                    f,
                    "Expected '(' after function name, at {}:{}",
                    at.line, at.column
                )
            }
            ParseError::MissingClosingParen(at) => {
                write!(
                    f,
                    "Missing closing parenthesis, at {}:{}",
                    at.line, at.column
                )
            }
            ParseError::ExpectedArgument(at) => {
                write!(f, "Expected argument, at {}:{}", at.line, at.column)
            }
            ParseError::UnterminatedString(at) => {
                write!(
                    f,
                    "Unterminated string, expected closing quote, at {}:{}",
                    at.line, at.column
                )
            }
            ParseError::InvalidEscape(ch, at) => {
                write!(
                    f,
                    "Invalid escape character, found '{}', at {}:{}",
                    ch, at.line, at.column
                )
            }
            ParseError::UnterminatedBlock(at) => {
                write!(
                    f,
                    "Unterminated block, expected closing brace, at {}:{}",
                    at.line, at.column
                )
            }
            ParseError::ExtraCharacters(at) => {
                write!(
                    f,
                    "Extra characters after script, at {}:{}",
                    at.line, at.column
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
