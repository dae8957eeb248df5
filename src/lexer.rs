//! GraphQL lexer
//!
//! Turns request source text into a flat token stream terminated by an
//! `Eof` token. Whitespace, commas and `#` line comments are skipped
//! between tokens; every token records the line and column of its first
//! character.

use crate::error::{GraphQLError, GraphQLResult, SourcePosition};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Int,
    Float,
    String,
    Boolean,
    Null,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Colon,
    Pipe,
    Equals,
    Bang,
    Dollar,
    At,
    Spread,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme text. Numbers stay textual (the parser converts them);
    /// strings carry their decoded contents.
    pub value: String,
    pub position: SourcePosition,
}

impl Token {
    fn new(kind: TokenKind, value: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Lexes the whole source, appending a final `Eof` token.
    pub fn tokenize(source: &'a str) -> GraphQLResult<Vec<Token>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | ',' => {
                    self.advance();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> GraphQLResult<Token> {
        self.skip_ignored();
        let position = self.position();
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", position));
        };

        match c {
            '(' => Ok(self.punctuator(TokenKind::LeftParen, position)),
            ')' => Ok(self.punctuator(TokenKind::RightParen, position)),
            '[' => Ok(self.punctuator(TokenKind::LeftBracket, position)),
            ']' => Ok(self.punctuator(TokenKind::RightBracket, position)),
            '{' => Ok(self.punctuator(TokenKind::LeftBrace, position)),
            '}' => Ok(self.punctuator(TokenKind::RightBrace, position)),
            ':' => Ok(self.punctuator(TokenKind::Colon, position)),
            '|' => Ok(self.punctuator(TokenKind::Pipe, position)),
            '=' => Ok(self.punctuator(TokenKind::Equals, position)),
            '!' => Ok(self.punctuator(TokenKind::Bang, position)),
            '$' => Ok(self.punctuator(TokenKind::Dollar, position)),
            '@' => Ok(self.punctuator(TokenKind::At, position)),
            '.' => self.read_spread(position),
            '"' => self.read_string(position),
            '-' | '0'..='9' => self.read_number(position),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.read_name(position)),
            c => Err(GraphQLError::parse(
                format!("Unexpected character '{c}'"),
                position,
            )),
        }
    }

    fn punctuator(&mut self, kind: TokenKind, position: SourcePosition) -> Token {
        let value = match self.advance() {
            Some(c) => c.to_string(),
            None => String::new(),
        };
        Token::new(kind, value, position)
    }

    fn read_spread(&mut self, position: SourcePosition) -> GraphQLResult<Token> {
        let mut dots = 0;
        while self.peek() == Some('.') {
            self.advance();
            dots += 1;
        }
        if dots == 3 {
            Ok(Token::new(TokenKind::Spread, "...", position))
        } else {
            Err(GraphQLError::parse(
                format!("Expected '...' but found {dots} dot(s)"),
                position,
            ))
        }
    }

    fn read_name(&mut self, position: SourcePosition) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match name.as_str() {
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            _ => TokenKind::Name,
        };
        Token::new(kind, name, position)
    }

    fn read_number(&mut self, position: SourcePosition) -> GraphQLResult<Token> {
        let mut lexeme = String::new();
        if self.peek() == Some('-') {
            lexeme.push('-');
            self.advance();
        }
        if !self.consume_digits(&mut lexeme) {
            return Err(GraphQLError::parse("Expected digit after '-'", position));
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            lexeme.push('.');
            self.advance();
            if !self.consume_digits(&mut lexeme) {
                return Err(GraphQLError::parse(
                    "Expected digit after decimal point",
                    position,
                ));
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            if let Some(c) = self.advance() {
                lexeme.push(c);
            }
            if matches!(self.peek(), Some('+') | Some('-')) {
                if let Some(c) = self.advance() {
                    lexeme.push(c);
                }
            }
            if !self.consume_digits(&mut lexeme) {
                return Err(GraphQLError::parse(
                    "Expected digit in exponent",
                    position,
                ));
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Ok(Token::new(kind, lexeme, position))
    }

    fn consume_digits(&mut self, into: &mut String) -> bool {
        let mut any = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                into.push(c);
                self.advance();
                any = true;
            } else {
                break;
            }
        }
        any
    }

    fn read_string(&mut self, position: SourcePosition) -> GraphQLResult<Token> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            let Some(c) = self.advance() else {
                return Err(GraphQLError::parse("Unterminated string", position));
            };
            match c {
                '"' => return Ok(Token::new(TokenKind::String, value, position)),
                '\n' => return Err(GraphQLError::parse("Unterminated string", position)),
                '\\' => {
                    let Some(escaped) = self.advance() else {
                        return Err(GraphQLError::parse("Unterminated string", position));
                    };
                    match escaped {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        '/' => value.push('/'),
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'b' => value.push('\u{0008}'),
                        'f' => value.push('\u{000C}'),
                        'u' => value.push(self.read_unicode_escape(position)?),
                        other => {
                            return Err(GraphQLError::parse(
                                format!("Unknown escape sequence '\\{other}'"),
                                position,
                            ))
                        }
                    }
                }
                c => value.push(c),
            }
        }
    }

    fn read_unicode_escape(&mut self, position: SourcePosition) -> GraphQLResult<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            let Some(c) = self.advance() else {
                return Err(GraphQLError::parse("Unterminated string", position));
            };
            let digit = c.to_digit(16).ok_or_else(|| {
                GraphQLError::parse(format!("Invalid unicode escape digit '{c}'"), position)
            })?;
            code = code * 16 + digit;
        }
        char::from_u32(code)
            .ok_or_else(|| GraphQLError::parse("Invalid unicode escape", position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_float_as_single_token() {
        let tokens = Lexer::tokenize("2.5e10").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].value, "2.5e10");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn lexes_spread_as_single_token() {
        let tokens = Lexer::tokenize("...").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Spread);
        assert_eq!(tokens[0].value, "...");
    }

    #[test]
    fn lone_dot_is_an_error() {
        assert!(Lexer::tokenize(".").is_err());
        assert!(Lexer::tokenize("..").is_err());
    }

    #[test]
    fn keywords_stay_names_except_literals() {
        assert_eq!(
            kinds("query mutation fragment on true false null"),
            vec![
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_commas_and_comments() {
        assert_eq!(
            kinds("a, b # trailing comment\nc"),
            vec![
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = Lexer::tokenize("a\n  b").unwrap();
        assert_eq!(tokens[0].position, SourcePosition::new(1, 1));
        assert_eq!(tokens[1].position, SourcePosition::new(2, 3));
    }

    #[test]
    fn decodes_string_escapes() {
        let tokens = Lexer::tokenize(r#""a\n\t\"A""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, "a\n\t\"A");
    }

    #[test]
    fn unterminated_string_reports_start_position() {
        let err = Lexer::tokenize("  \"abc").unwrap_err();
        assert_eq!(err.position(), Some(SourcePosition::new(1, 3)));
    }

    #[test]
    fn unknown_escape_is_an_error() {
        assert!(Lexer::tokenize(r#""\q""#).is_err());
    }

    #[test]
    fn lexes_negative_and_integer_numbers() {
        let tokens = Lexer::tokenize("-42 7 1.5").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].value, "-42");
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(tokens[2].kind, TokenKind::Float);
    }

    #[test]
    fn punctuators_lex_individually() {
        assert_eq!(
            kinds("( ) [ ] { } : | = ! $ @"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Colon,
                TokenKind::Pipe,
                TokenKind::Equals,
                TokenKind::Bang,
                TokenKind::Dollar,
                TokenKind::At,
                TokenKind::Eof,
            ]
        );
    }
}
