//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the delimited-text lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the parser.

/// Tokens recognized by the delimited-text lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// One cell of raw text, with quoting already resolved (`""` -> `"`).
    /// `quoted` records whether the cell opened with a quote character.
    Field { text: String, quoted: bool },

    /// The field separator (`,` by default).
    Delimiter,

    /// End of a physical record: `\n` or `\r\n`.
    RecordEnd,

    EOF,
}

impl Token {
    pub fn field(text: impl Into<String>) -> Self {
        Token::Field {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Token::Field {
            text: text.into(),
            quoted: true,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Field { text, quoted: true } => write!(f, "\"{}\"", text.replace('"', "\"\"")),
            Token::Field { text, quoted: false } => write!(f, "{}", text),
            Token::Delimiter => write!(f, ","),
            Token::RecordEnd => write!(f, "\\n"),
            Token::EOF => write!(f, "EOF"),
        }
    }
}
