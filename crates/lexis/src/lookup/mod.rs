// Acceptance pipeline: is this word a form the dictionary licenses?
//
// A query flows: input conversion -> casing variants -> break splits ->
// affix decomposition -> form validation -> (failing that) compounding.
// Every enumeration short-circuits on the first accepting form.

pub mod compound;
pub mod decompose;
pub mod forms;
pub mod validate;
pub mod word;

use std::ops::ControlFlow;

use lexis_aff::tables::BreakSide;
use lexis_aff::{Aff, Dic};

use crate::MAX_WORD_LEN;
use forms::FormLimits;
use word::LookupWord;

/// Recursion cap for BREAK splitting.
const MAX_BREAK_DEPTH: usize = 10;

/// Borrowing view over the engine's tables with the whole acceptance
/// logic hanging off it. Cheap to construct per query.
#[derive(Clone, Copy)]
pub struct Lookuper<'a> {
    pub aff: &'a Aff,
    pub dic: &'a Dic,
}

impl<'a> Lookuper<'a> {
    pub fn new(aff: &'a Aff, dic: &'a Dic) -> Self {
        Lookuper { aff, dic }
    }

    /// Full acceptance check on an already input-converted word.
    ///
    /// `capitalization` controls whether case variants of the word are
    /// tried ("Kitten" as "kitten"); suggestion candidates are checked
    /// with it off. `allow_nosuggest` is off while suggesting too, so
    /// NOSUGGEST words never surface as corrections.
    pub fn correct(&self, word: &str, capitalization: bool, allow_nosuggest: bool) -> bool {
        if word.is_empty() {
            return true;
        }
        if word.chars().count() > MAX_WORD_LEN {
            return false;
        }
        if is_number(word) {
            return true;
        }
        // A word whose every homonym is forbidden is not accepted, no
        // matter what decomposition would say.
        if self.aff.forbiddenword.is_some()
            && self.dic.has_flag(word, self.aff.forbiddenword, true)
        {
            return false;
        }
        self.broken_ok(word, 0, &|part| {
            self.word_ok(part, capitalization, allow_nosuggest)
        })
    }

    /// One word (no breaks): casing variants through affix decomposition
    /// and compounding.
    fn word_ok(&self, word: &str, capitalization: bool, allow_nosuggest: bool) -> bool {
        let (captype, variants) = if capitalization {
            self.aff.casing.variants(word)
        } else {
            (self.aff.casing.guess(word), vec![word.to_string()])
        };
        for variant in variants {
            let lookup_word = LookupWord::new(variant, captype);
            if self.has_affix_form(&lookup_word, allow_nosuggest) {
                return true;
            }
            if self.has_compound_form(&lookup_word, allow_nosuggest) {
                return true;
            }
        }
        false
    }

    pub fn has_affix_form(&self, word: &LookupWord, allow_nosuggest: bool) -> bool {
        let mut found = false;
        let _ = self.affix_forms(word, &FormLimits::default(), allow_nosuggest, &mut |_| {
            found = true;
            ControlFlow::Break(())
        });
        found
    }

    pub fn has_compound_form(&self, word: &LookupWord, allow_nosuggest: bool) -> bool {
        let mut found = false;
        let _ = self.compound_forms(word, allow_nosuggest, &mut |_| {
            found = true;
            ControlFlow::Break(())
        });
        found
    }

    /// Try the word whole, then under every BREAK split. A split is good
    /// when each piece individually passes `ok`.
    fn broken_ok(&self, text: &str, depth: usize, ok: &dyn Fn(&str) -> bool) -> bool {
        if ok(text) {
            return true;
        }
        if depth >= MAX_BREAK_DEPTH {
            return false;
        }
        for pattern in &self.aff.break_patterns {
            if pattern.text.is_empty() {
                continue;
            }
            match pattern.side {
                BreakSide::Start => {
                    if let Some(rest) = text.strip_prefix(&pattern.text) {
                        if !rest.is_empty() && self.broken_ok(rest, depth + 1, ok) {
                            return true;
                        }
                    }
                }
                BreakSide::End => {
                    if let Some(head) = text.strip_suffix(&pattern.text) {
                        if !head.is_empty() && ok(head) {
                            return true;
                        }
                    }
                }
                BreakSide::Middle => {
                    for (pos, _) in text.match_indices(&pattern.text) {
                        let left = &text[..pos];
                        let right = &text[pos + pattern.text.len()..];
                        if !left.is_empty() && !ok(left) {
                            continue;
                        }
                        if right.is_empty() {
                            if !left.is_empty() {
                                return true;
                            }
                            continue;
                        }
                        if self.broken_ok(right, depth + 1, ok) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Stems of every accepted affix form across casing variants, plus
    /// the parts' stems of accepted compounds.
    pub fn stems(&self, word: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut push = |stem: &str| {
            if !out.iter().any(|s| s == stem) {
                out.push(stem.to_string());
            }
        };
        let (captype, variants) = self.aff.casing.variants(word);
        for variant in &variants {
            let lookup_word = LookupWord::new(variant.clone(), captype);
            let _ = self.affix_forms(&lookup_word, &FormLimits::default(), true, &mut |form| {
                push(&form.stem);
                ControlFlow::Continue(())
            });
            let _ = self.compound_forms(&lookup_word, true, &mut |parts| {
                for part in parts {
                    if let Some(w) = part.word {
                        push(&w.stem);
                    }
                }
                ControlFlow::Continue(())
            });
        }
        out
    }

    /// Morphological data of every dictionary word matched by an accepted
    /// affix form.
    pub fn data(&self, word: &str) -> Vec<Vec<(String, String)>> {
        let mut out = Vec::new();
        let (captype, variants) = self.aff.casing.variants(word);
        for variant in &variants {
            let lookup_word = LookupWord::new(variant.clone(), captype);
            let _ = self.affix_forms(&lookup_word, &FormLimits::default(), true, &mut |form| {
                if let Some(w) = form.word {
                    out.push(w.data.clone());
                }
                ControlFlow::Continue(())
            });
        }
        out
    }
}

/// Numeric tokens are always accepted: digits optionally separated by
/// single `.` / `,` / `-`, each separator between digits.
pub(crate) fn is_number(word: &str) -> bool {
    let mut seen_digit = false;
    let mut prev_sep = true; // a separator may not start the token
    for c in word.chars() {
        if c.is_ascii_digit() {
            seen_digit = true;
            prev_sep = false;
        } else if matches!(c, '.' | ',' | '-') {
            if prev_sep {
                return false;
            }
            prev_sep = true;
        } else {
            return false;
        }
    }
    seen_digit && !prev_sep
}
