//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the delimited-text parser.
//! CONTEXT: This module exposes the lexer and parser needed to turn raw
//! comma-separated text into a header plus raw string records. Type
//! coercion happens downstream in the `engine` crate.
//!
//! PIPELINE: Raw Text --> (BOM strip) --> Lexer --> Tokens --> Parser --> RawTable
//!
//! SUPPORTED FEATURES:
//! - Optional leading byte-order marker
//! - Quoted fields containing delimiters, newlines, and `""` escapes
//! - CRLF and LF record terminators
//! - Ragged records and unterminated quotes (tolerated, reported)
//! - Configurable delimiter

pub mod lexer;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use lexer::{Lexer, DEFAULT_DELIMITER};
pub use parser::{parse, parse_with, ParseDiagnostics, ParseOptions, RawTable};
pub use token::Token;
