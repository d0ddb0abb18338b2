//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Groups the lexer's token stream into a header and raw records.
//! CONTEXT: This is the second stage of the parsing pipeline. Parsing is
//! total: structurally odd input (ragged rows, unterminated quotes, stray
//! quotes inside unquoted cells) is accepted and reported through
//! `ParseDiagnostics` instead of failing.
//!
//! GRAMMAR:
//!   document --> BOM? record*
//!   record   --> field (DELIMITER field)* (RECORD_END | EOF)
//!   field    --> QUOTED | UNQUOTED

use crate::lexer::{Lexer, DEFAULT_DELIMITER};
use crate::token::Token;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Options controlling how raw text is split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    pub delimiter: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Anomalies the parser tolerated while reading a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseDiagnostics {
    /// End of input was reached inside a quoted field.
    pub unterminated_quote: bool,
    /// Data records whose cell count differs from the header's.
    pub ragged_records: usize,
    /// Header names that occur more than once (each listed once).
    pub duplicate_headers: Vec<String>,
}

/// A parsed document before any type coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header cells, trimmed. Duplicates are kept as-is.
    pub headers: Vec<String>,
    /// Data records in document order. Cells are untrimmed raw text.
    pub records: Vec<Vec<String>>,
    pub diagnostics: ParseDiagnostics,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.records.is_empty()
    }
}

/// Parses a document with the default options (comma-delimited).
pub fn parse(input: &str) -> RawTable {
    parse_with(input, ParseOptions::default())
}

/// Parses a document. The first physical record is always the header.
pub fn parse_with(input: &str, options: ParseOptions) -> RawTable {
    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let mut lexer = Lexer::with_delimiter(input, options.delimiter);

    let mut records = read_records(&mut lexer);
    let unterminated_quote = lexer.hit_unterminated_quote();

    while records.last().is_some_and(|r| r.is_blank()) {
        records.pop();
    }

    let mut records = records.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(header) => header.cells.iter().map(|h| h.trim().to_string()).collect(),
        None => Vec::new(),
    };

    let records: Vec<Vec<String>> = records.map(|r| r.cells).collect();
    let ragged_records = records
        .iter()
        .filter(|r| r.len() != headers.len())
        .count();

    RawTable {
        diagnostics: ParseDiagnostics {
            unterminated_quote,
            ragged_records,
            duplicate_headers: duplicate_names(&headers),
        },
        headers,
        records,
    }
}

struct PendingRecord {
    cells: Vec<String>,
    any_quoted: bool,
}

impl PendingRecord {
    /// A record made of a single empty, unquoted cell: what a blank line produces.
    fn is_blank(&self) -> bool {
        !self.any_quoted && self.cells.iter().all(|c| c.is_empty())
    }
}

fn read_records(lexer: &mut Lexer<'_>) -> Vec<PendingRecord> {
    let mut records = Vec::new();
    let mut current = PendingRecord {
        cells: Vec::new(),
        any_quoted: false,
    };

    loop {
        match lexer.next_token() {
            Token::Field { text, quoted } => {
                current.any_quoted |= quoted;
                current.cells.push(text);
            }
            Token::Delimiter => {}
            Token::RecordEnd => {
                records.push(std::mem::replace(
                    &mut current,
                    PendingRecord {
                        cells: Vec::new(),
                        any_quoted: false,
                    },
                ));
            }
            Token::EOF => {
                if !current.cells.is_empty() {
                    records.push(current);
                }
                return records;
            }
        }
    }
}

fn duplicate_names(headers: &[String]) -> Vec<String> {
    let mut duplicates: Vec<String> = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if headers[..i].contains(name) && !duplicates.contains(name) {
            duplicates.push(name.clone());
        }
    }
    duplicates
}
