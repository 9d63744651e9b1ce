// LexisHandle: the public integration point.
//
// Owns the parsed affix description and word list and answers queries
// against them. Construction does all the validation; afterwards the
// handle is immutable and queries never fail, so callers can share one
// handle across threads freely.

use std::path::Path;

use lexis_aff::{Aff, Dic, ParseError};

use crate::lookup::{is_number, Lookuper};
use crate::suggest::Suggester;

/// Error type for handle construction failures.
#[derive(Debug, thiserror::Error)]
pub enum LexisError {
    #[error("failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed affix description: {0}")]
    AffixParse(#[source] ParseError),

    #[error("malformed word list: {0}")]
    WordListParse(#[source] ParseError),
}

/// Outcome of a [`LexisHandle::check`] call. The three fields are
/// independent: a word can be well-formed yet forbidden, or accepted
/// with a warning attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult {
    /// The word is an accepted spelling.
    pub correct: bool,
    /// Some dictionary homonym carries FORBIDDENWORD.
    pub forbidden: bool,
    /// Some dictionary homonym carries WARN (probably-wrong word).
    pub warn: bool,
}

/// The engine: affix description, word list, and the precomputed root
/// set for similarity suggestions.
#[derive(Debug)]
pub struct LexisHandle {
    aff: Aff,
    dic: Dic,
    /// Dictionary indexes eligible as n-gram/phonetic roots; built once
    /// so suggestion queries do not re-filter the whole word list.
    ngram_roots: Vec<u32>,
}

impl LexisHandle {
    /// Build an engine from the contents of an `.aff` and a `.dic` file.
    pub fn from_strings(aff_text: &str, dic_text: &str) -> Result<Self, LexisError> {
        let aff = Aff::parse(aff_text).map_err(LexisError::AffixParse)?;
        let dic = Dic::parse(dic_text, &aff).map_err(LexisError::WordListParse)?;
        let ngram_roots = suggestible_roots(&aff, &dic);
        Ok(LexisHandle {
            aff,
            dic,
            ngram_roots,
        })
    }

    /// Build an engine from `<base>.aff` and `<base>.dic`.
    pub fn from_path(base: &Path) -> Result<Self, LexisError> {
        let aff_text = std::fs::read_to_string(base.with_extension("aff"))?;
        let dic_text = std::fs::read_to_string(base.with_extension("dic"))?;
        LexisHandle::from_strings(&aff_text, &dic_text)
    }

    pub fn aff(&self) -> &Aff {
        &self.aff
    }

    pub fn dic(&self) -> &Dic {
        &self.dic
    }

    /// Full spellcheck verdict for one token.
    pub fn check(&self, word: &str) -> LookupResult {
        let look = Lookuper::new(&self.aff, &self.dic);
        let converted = self.convert_input(word);

        let forbidden = self
            .dic
            .has_flag(&converted, self.aff.forbiddenword, false);
        let warn = self.dic.has_flag(&converted, self.aff.warn, false);

        let mut correct = is_number(&converted) || look.correct(&converted, true, true);
        if warn && self.aff.forbidwarn {
            correct = false;
        }
        LookupResult {
            correct,
            forbidden,
            warn,
        }
    }

    /// `check(word).correct`.
    pub fn lookup(&self, word: &str) -> bool {
        self.check(word).correct
    }

    /// Ranked corrections for a misspelling, bounded and deduplicated.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        Suggester::new(&self.aff, &self.dic, &self.ngram_roots).suggest(word)
    }

    /// Stems of every accepted reading of the word.
    pub fn stems(&self, word: &str) -> Vec<String> {
        let look = Lookuper::new(&self.aff, &self.dic);
        look.stems(&self.convert_input(word))
    }

    /// Morphological data of every dictionary word the token matches.
    pub fn data(&self, word: &str) -> Vec<Vec<(String, String)>> {
        let look = Lookuper::new(&self.aff, &self.dic);
        look.data(&self.convert_input(word))
    }

    /// The ICONV + IGNORE pre-pass applied to every query.
    fn convert_input(&self, word: &str) -> String {
        let mut converted = self.aff.iconv.apply(word);
        if !self.aff.ignore.is_empty() {
            converted.retain(|c| !self.aff.ignore.contains(&c));
        }
        converted
    }
}

/// Indexes of the words usable as similarity roots: forbidden,
/// no-suggest and compound-only entries never surface as suggestions,
/// so they are filtered once at build time.
pub(crate) fn suggestible_roots(aff: &Aff, dic: &Dic) -> Vec<u32> {
    dic.words()
        .iter()
        .enumerate()
        .filter(|(_, word)| {
            !word.flags.has(aff.forbiddenword)
                && !word.flags.has(aff.nosuggest)
                && !word.flags.has(aff.onlyincompound)
        })
        .map(|(idx, _)| idx as u32)
        .collect()
}
