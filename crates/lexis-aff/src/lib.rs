//! The `.aff` / `.dic` text-format layer of the lexis spellchecking engine.
//!
//! This crate turns the two line-oriented dictionary inputs into the
//! immutable in-memory tables the engine queries:
//!
//! - [`aff`] -- the affix description: directives, option flags, and the
//!   REP/MAP/BREAK/ICONV/OCONV/PHONE/COMPOUNDRULE tables
//! - [`dic`] -- the word list: stems, flag sets, morphological data, and
//!   the homonym index
//! - [`affix`] -- prefix/suffix entries and the flag- and substring-keyed
//!   indexes built over them
//! - [`condition`] -- the tiny character-class pattern dialect of affix
//!   conditions
//! - [`trie`] -- the character trie behind substring-keyed affix lookup
//! - [`compound_rule`] -- flag regexes (`A*B?C`) for rule-based compounding
//! - [`phonet`] -- the PHONE rule table and phonetic key construction
//! - [`tables`] -- the smaller row tables (REP, BREAK, conversions, MAP,
//!   CHECKCOMPOUNDPATTERN)
//!
//! All parsing errors carry the 1-based line they were found on; a failed
//! parse means the engine does not get built at all.

pub mod aff;
pub mod affix;
pub mod compound_rule;
pub mod condition;
pub mod dic;
pub mod phonet;
pub mod tables;
pub mod trie;

use lexis_core::flags::FlagParseError;

pub use aff::Aff;
pub use affix::{AffixIndex, Prefix, Suffix};
pub use dic::{Dic, Word};

/// A malformed affix description or word list.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the offending file.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("bad {directive} count: {value:?}")]
    BadCount { directive: &'static str, value: String },

    #[error("{0} table ends before its declared count")]
    TruncatedTable(&'static str),

    #[error("malformed {directive} row: {row:?}")]
    MalformedRow { directive: &'static str, row: String },

    #[error("bad number for {directive}: {value:?}")]
    BadNumber { directive: &'static str, value: String },

    #[error("bad condition pattern: {0:?}")]
    BadCondition(String),

    #[error("alias index {0} out of range")]
    BadAliasIndex(usize),

    #[error(transparent)]
    Flag(#[from] FlagParseError),
}

impl ParseErrorKind {
    /// Attach a line number, producing the public error.
    pub(crate) fn at(self, line: usize) -> ParseError {
        ParseError { line, kind: self }
    }
}
