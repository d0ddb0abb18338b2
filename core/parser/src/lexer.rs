//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans raw delimited text and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It resolves
//! quoting (embedded delimiters, embedded newlines, doubled-quote escapes)
//! and normalizes CRLF / LF record terminators.
//!
//! TOKEN SHAPE:
//! - Every record yields at least one Field, so `a,` is Field(a) Delimiter Field("").
//! - A record that starts at end of input yields nothing, which is how a
//!   trailing newline avoids producing a phantom row.
//! - An unterminated quote runs to end of input and is closed implicitly.

use crate::token::Token;
use std::iter::Peekable;
use std::str::Chars;

pub const DEFAULT_DELIMITER: char = ',';

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    delimiter: char,
    /// True when the next token must be a Field (start of record or after a delimiter).
    expect_field: bool,
    /// True when the previous token ended a record (or nothing was read yet).
    at_record_start: bool,
    unterminated_quote: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_delimiter(input, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(input: &'a str, delimiter: char) -> Self {
        Lexer {
            input: input.chars().peekable(),
            delimiter,
            expect_field: true,
            at_record_start: true,
            unterminated_quote: false,
        }
    }

    /// Whether a quoted field was still open when input ran out.
    pub fn hit_unterminated_quote(&self) -> bool {
        self.unterminated_quote
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        if self.expect_field {
            if self.at_record_start && self.input.peek().is_none() {
                return Token::EOF;
            }
            self.expect_field = false;
            self.at_record_start = false;
            return self.read_field();
        }

        match self.input.next() {
            Some(ch) if ch == self.delimiter => {
                self.expect_field = true;
                Token::Delimiter
            }
            Some('\n') => self.end_record(),
            Some('\r') => {
                // read_field only stops on '\r' when a '\n' follows
                self.input.next();
                self.end_record()
            }
            None => Token::EOF,
            // read_field consumes everything else, so this arm only guards
            // against a field reader that stopped early.
            Some(_) => {
                self.expect_field = true;
                Token::Delimiter
            }
        }
    }

    fn end_record(&mut self) -> Token {
        self.expect_field = true;
        self.at_record_start = true;
        Token::RecordEnd
    }

    fn read_field(&mut self) -> Token {
        if self.input.peek() == Some(&'"') {
            self.input.next();
            return self.read_quoted_field();
        }

        let mut text = String::new();
        while let Some(&ch) = self.input.peek() {
            if ch == self.delimiter || ch == '\n' || self.at_crlf(ch) {
                break;
            }
            text.push(ch);
            self.input.next();
        }
        Token::field(text)
    }

    /// Reads the body of a quoted field; the opening quote is already consumed.
    /// Text between the closing quote and the next delimiter is kept verbatim.
    fn read_quoted_field(&mut self) -> Token {
        let mut text = String::new();
        loop {
            match self.input.next() {
                Some('"') => {
                    if self.input.peek() == Some(&'"') {
                        text.push('"');
                        self.input.next();
                    } else {
                        break;
                    }
                }
                Some(ch) => text.push(ch),
                None => {
                    self.unterminated_quote = true;
                    return Token::quoted(text);
                }
            }
        }

        while let Some(&ch) = self.input.peek() {
            if ch == self.delimiter || ch == '\n' || self.at_crlf(ch) {
                break;
            }
            text.push(ch);
            self.input.next();
        }
        Token::quoted(text)
    }

    /// A '\r' only terminates a record when it is the first half of CRLF.
    fn at_crlf(&self, ch: char) -> bool {
        if ch != '\r' {
            return false;
        }
        let mut ahead = self.input.clone();
        ahead.next();
        ahead.peek() == Some(&'\n')
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::EOF => None,
            token => Some(token),
        }
    }
}
