pub mod errors;

pub type ParseResult<T> = std::result::Result<T, crate::parser::errors::ParseError>;

use std::{iter::Peekable, str::Chars};

use crate::{
    ast::{block::Block, position::Position, stmt::CallStmt},
    parser::errors::ParseError,
};

/// Parse a whole script into its top-level block.
pub fn parse(input: &str) -> ParseResult<Block> {
    Parser::new(input).parse_script()
}

/// Recursive-descent parser over a raw char cursor.
///
/// There is no token stream: bare argument text is context-sensitive (it runs
/// to the next `,` or `)`), so the statement grammar is read straight off the
/// characters.
struct Parser<'a> {
    input: &'a str,
    chars: Peekable<Chars<'a>>,
    /// Current byte offset into `input`. Always points to the starting byte
    /// of the character in `current`.
    pos: usize,
    /// If `Some(c)`, that is the current character under consideration; if
    /// `None`, we've hit EOF.
    current: Option<char>,
    /// 1-based source line
    line: usize,
    /// 1-based column
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut chars = input.chars().peekable();
        let first = chars.next();
        Parser {
            input,
            chars,
            pos: 0,
            current: first,
            line: 1,
            column: 1,
        }
    }

    /// Advance one character by popping from `chars`, updating `pos` and `current`.
    fn advance(&mut self) {
        if let Some(ch) = self.current {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += ch.len_utf8();
        }
        self.current = self.chars.next();
    }

    /// Look at the current character without consuming it.
    fn current_char(&self) -> Option<char> {
        self.current
    }

    /// Peek one character ahead (lookahead) without changing state.
    fn peek_next(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Skip whitespace and comments (`// ...` and `/* ... */`).
    fn skip_whitespace(&mut self) {
        loop {
            while let Some(ch) = self.current_char() {
                if ch.is_whitespace() {
                    self.advance();
                } else {
                    break;
                }
            }
            // Skip line comments
            if self.current_char() == Some('/') && self.peek_next() == Some('/') {
                self.advance();
                self.advance();
                let start = self.pos;
                self.scan_while(start, |ch| ch != '\n');
                continue;
            }
            // Skip block comments
            if self.current_char() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                while let Some(ch) = self.current_char() {
                    if ch == '*' && self.peek_next() == Some('/') {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }
                continue;
            }
            break;
        }
    }

    /// Scan characters while `pred` holds true, returning the slice from `start` to current `pos`.
    fn scan_while<F>(&mut self, start: usize, pred: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        while let Some(ch) = self.current_char() {
            if pred(ch) {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    /// Consume an identifier: [A-Za-z_][A-Za-z0-9_]*
    fn lex_identifier(&mut self) -> String {
        let start = self.pos;
        let slice = self.scan_while(start, |ch| ch.is_ascii_alphanumeric() || ch == '_');
        slice.to_string()
    }

    fn parse_script(&mut self) -> ParseResult<Block> {
        let mut stmts = Vec::new();
        loop {
            self.skip_whitespace();
            match self.current_char() {
                None => break,
                Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                    stmts.push(self.parse_call()?);
                }
                Some('}') | Some(')') => {
                    return Err(ParseError::ExtraCharacters(self.here()));
                }
                Some(ch) => return Err(ParseError::UnexpectedChar(ch, self.here())),
            }
        }
        Ok(Block::new(stmts, Position::new(1, 1)))
    }

    /// `name "(" [args] ")" ["{" stmts "}"]`: the caller has already checked
    /// that the current character starts an identifier.
    fn parse_call(&mut self) -> ParseResult<CallStmt> {
        let pos = self.here();
        let name = self.lex_identifier();

        self.skip_whitespace();
        if self.current_char() != Some('(') {
            return Err(ParseError::MissingOpenParen(self.here()));
        }
        self.advance(); // consume '('

        let args = self.parse_args()?;

        self.skip_whitespace();
        let block = if self.current_char() == Some('{') {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(CallStmt {
            name,
            args,
            block,
            pos,
        })
    }

    /// Comma-separated arguments up to the closing paren (already past `(`).
    fn parse_args(&mut self) -> ParseResult<Vec<String>> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.current_char() == Some(')') {
            self.advance();
            return Ok(args);
        }

        loop {
            self.skip_whitespace();
            args.push(self.parse_arg()?);
            self.skip_whitespace();
            match self.current_char() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                Some(ch) => return Err(ParseError::UnexpectedChar(ch, self.here())),
                None => return Err(ParseError::MissingClosingParen(self.here())),
            }
        }
    }

    /// One argument: a quoted string, or bare text running to the next `,`
    /// or `)` (trailing whitespace trimmed). The text is kept raw; `$`
    /// references in it are resolved later, by whichever builtin evaluates
    /// the argument.
    fn parse_arg(&mut self) -> ParseResult<String> {
        let pos = self.here();
        if self.current_char() == Some('"') {
            return self.lex_string();
        }

        let start = self.pos;
        let text = self.scan_while(start, |ch| {
            !matches!(ch, ',' | ')' | '(' | '"' | '{' | '}' | '\n')
        });
        let text = text.trim_end();
        if text.is_empty() {
            return Err(ParseError::ExpectedArgument(pos));
        }
        Ok(text.to_string())
    }

    fn lex_string(&mut self) -> ParseResult<String> {
        let start_pos = self.here();

        self.advance(); // consume the opening quote
        let mut s = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(s);
            } else if ch == '\\' {
                self.advance(); // consume '\'
                match self.current_char() {
                    Some('n') => {
                        s.push('\n');
                        self.advance();
                    }
                    Some('t') => {
                        s.push('\t');
                        self.advance();
                    }
                    Some('r') => {
                        s.push('\r');
                        self.advance();
                    }
                    Some('"') => {
                        s.push('"');
                        self.advance();
                    }
                    Some('\\') => {
                        s.push('\\');
                        self.advance();
                    }
                    Some(other) => return Err(ParseError::InvalidEscape(other, start_pos)),
                    None => return Err(ParseError::UnexpectedEOF(start_pos)),
                }
            } else {
                s.push(ch);
                self.advance();
            }
        }
        Err(ParseError::UnterminatedString(start_pos))
    }

    /// `"{" stmts "}"`: the caller has already seen the opening brace.
    fn parse_block(&mut self) -> ParseResult<Block> {
        let pos = self.here();
        self.advance(); // consume '{'

        let mut stmts = Vec::new();
        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some('}') => {
                    self.advance();
                    return Ok(Block::new(stmts, pos));
                }
                None => return Err(ParseError::UnterminatedBlock(pos)),
                Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                    stmts.push(self.parse_call()?);
                }
                Some(ch) => return Err(ParseError::UnexpectedChar(ch, self.here())),
            }
        }
    }
}
