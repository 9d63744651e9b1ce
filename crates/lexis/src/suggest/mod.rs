// Suggestion search: propose corrections for a misspelling, best first.
//
// Stages, in order: a FORCEUCASE short-circuit, case-variant hits, edit
// operators validated as affix forms, edit operators validated as
// compounds, dash-chunk reassembly, and finally n-gram plus phonetic
// similarity over the whole dictionary. Every candidate passes one
// handler that coerces case, filters forbidden words, applies output
// conversion and deduplicates.

pub mod ngram;
pub mod permutations;
pub mod phonet;

use hashbrown::HashSet;

use lexis_aff::{Aff, Dic};
use lexis_core::casing::CapType;

use crate::lookup::word::LookupWord;
use crate::lookup::Lookuper;
use crate::MAX_WORD_LEN;

/// Cap on suggestions from the edit-operator stage.
const MAX_SUGGESTIONS: usize = 15;
/// Cap on suggestions from the phonetic stage.
const MAX_PHONET_SUGGESTIONS: usize = 2;

/// Which edit operator produced a candidate; a few kinds steer the
/// stage machine (uppercase/REP/MAP hits suppress the compound pass, a
/// split hit ends the edit stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Uppercase,
    RepChars,
    MapChars,
    SwapChar,
    LongSwapChar,
    BadCharKey,
    ExtraChar,
    ForgotChar,
    MoveChar,
    BadChar,
    DoubleTwoChars,
    SpaceWord,
}

pub struct Suggester<'a> {
    aff: &'a Aff,
    dic: &'a Dic,
    look: Lookuper<'a>,
    /// Indexes of the dictionary words eligible as similarity roots.
    roots: &'a [u32],
}

impl<'a> Suggester<'a> {
    pub fn new(aff: &'a Aff, dic: &'a Dic, roots: &'a [u32]) -> Self {
        Suggester {
            aff,
            dic,
            look: Lookuper::new(aff, dic),
            roots,
        }
    }

    pub fn suggest(&self, word: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.suggestions(word, &mut out);
        out
    }

    fn suggestions(&self, word: &str, out: &mut Vec<String>) {
        let word = self.aff.iconv.apply(word);
        if word.is_empty() || word.chars().count() > MAX_WORD_LEN {
            return;
        }
        let (captype, variants) = self.aff.casing.corrections(&word);
        let mut handled: HashSet<String> = HashSet::new();

        // Stage 1: a compound dictionary may insist on capitalization;
        // if capitalizing alone fixes the word, that is the answer.
        if self.aff.forceucase.is_some() && captype == CapType::No {
            let capitalized = self.aff.casing.capitalize(&word);
            if self.correct(&capitalized) {
                self.emit(capitalized, None, &word, &mut handled, out, false);
                return;
            }
        }

        let mut edit_found = false;
        let mut nocompound = false;
        let mut stop = false;

        // Stage 2: per case variant, the variant itself, then the edit
        // operators, each accepted only as a plain affix form.
        'edit_stage: for variant in &variants {
            if variant != &word && self.correct(variant) {
                self.emit(variant.clone(), Some(captype), &word, &mut handled, out, false);
            }
            for (candidate, kind) in self.edits(variant) {
                if out.len() >= MAX_SUGGESTIONS {
                    break 'edit_stage;
                }
                if !self.edit_is_good(&candidate) {
                    continue;
                }
                if self.emit(candidate, Some(captype), &word, &mut handled, out, false) {
                    edit_found = true;
                    match kind {
                        EditKind::Uppercase | EditKind::RepChars | EditKind::MapChars => {
                            nocompound = true
                        }
                        EditKind::SpaceWord => {
                            stop = true;
                            break 'edit_stage;
                        }
                        _ => {}
                    }
                }
            }
        }

        // Stage 3: the same edits re-validated as compounds only.
        if !nocompound && !stop {
            for variant in &variants {
                let mut compound_found = 0usize;
                for (candidate, _) in self.edits(variant) {
                    if compound_found >= self.aff.max_cpd_sugs {
                        break;
                    }
                    if candidate.contains(' ') {
                        continue;
                    }
                    if !self.correct_compound(&candidate) {
                        continue;
                    }
                    if self.emit(candidate, Some(captype), &word, &mut handled, out, false) {
                        compound_found += 1;
                    }
                }
            }
        }

        // Stage 4: repair each misspelled chunk of a dashed word.
        if !edit_found && word.contains('-') {
            let chunks: Vec<&str> = word.split('-').collect();
            for (idx, chunk) in chunks.iter().enumerate() {
                if chunk.is_empty() || self.correct(chunk) {
                    continue;
                }
                for repaired in self.suggest(chunk) {
                    let candidate = chunks
                        .iter()
                        .enumerate()
                        .map(|(j, c)| if j == idx { repaired.as_str() } else { *c })
                        .collect::<Vec<_>>()
                        .join("-");
                    if self.correct(&candidate) {
                        self.emit(candidate, None, &word, &mut handled, out, false);
                    }
                }
            }
        }

        // Stage 5: similarity search, only when nothing else surfaced.
        if out.is_empty() {
            if self.aff.max_ngram_sugs > 0 {
                let has_phonetic = self.aff.phone.is_some();
                let guesses =
                    ngram::ngram_suggest(&word, self.root_words(), self.aff, has_phonetic);
                for guess in guesses {
                    self.emit(guess, Some(captype), &word, &mut handled, out, true);
                }
            }
            if let Some(table) = &self.aff.phone {
                let guesses =
                    phonet::phonet_suggest(&word, self.root_words(), table, self.aff.casing);
                for guess in guesses.into_iter().take(MAX_PHONET_SUGGESTIONS) {
                    self.emit(guess, Some(captype), &word, &mut handled, out, true);
                }
            }
        }
    }

    fn root_words(&self) -> impl Iterator<Item = &'a lexis_aff::Word> + '_ {
        self.roots.iter().map(|&i| &self.dic.words()[i as usize])
    }

    // -----------------------------------------------------------------
    // Candidate production and validation
    // -----------------------------------------------------------------

    /// All edit-operator candidates for one variant, in operator order.
    fn edits(&self, word: &str) -> Vec<(String, EditKind)> {
        let aff = self.aff;
        let mut out: Vec<(String, EditKind)> = Vec::new();
        let push_all = |candidates: Vec<String>, kind: EditKind, out: &mut Vec<_>| {
            out.extend(candidates.into_iter().map(|c| (c, kind)));
        };

        out.push((aff.casing.upper(word), EditKind::Uppercase));
        push_all(permutations::replchars(word, &aff.rep), EditKind::RepChars, &mut out);
        push_all(permutations::mapchars(word, &aff.map), EditKind::MapChars, &mut out);
        push_all(permutations::swapchar(word), EditKind::SwapChar, &mut out);
        push_all(permutations::longswapchar(word), EditKind::LongSwapChar, &mut out);
        push_all(permutations::badcharkey(word, &aff.key), EditKind::BadCharKey, &mut out);
        push_all(permutations::extrachar(word), EditKind::ExtraChar, &mut out);
        push_all(permutations::forgotchar(word, &aff.try_chars), EditKind::ForgotChar, &mut out);
        push_all(permutations::movechar(word), EditKind::MoveChar, &mut out);
        push_all(permutations::badchar(word, &aff.try_chars), EditKind::BadChar, &mut out);
        push_all(permutations::doubletwochars(word), EditKind::DoubleTwoChars, &mut out);
        if !aff.nosplitsugs {
            let dash_split = aff.try_chars.contains('-');
            for (a, b) in permutations::twowords(word) {
                out.push((format!("{a} {b}"), EditKind::SpaceWord));
                if dash_split {
                    out.push((format!("{a}-{b}"), EditKind::SpaceWord));
                }
            }
        }
        out
    }

    /// An edit candidate counts when it is a plain affix form; a spaced
    /// candidate also counts when both halves are words on their own.
    fn edit_is_good(&self, candidate: &str) -> bool {
        if self.correct_affixed(candidate) {
            return true;
        }
        if let Some((a, b)) = candidate.split_once(' ') {
            return !a.is_empty() && !b.is_empty() && self.correct(a) && self.correct(b);
        }
        false
    }

    /// Full acceptance, candidate taken as written and NOSUGGEST words
    /// excluded.
    fn correct(&self, word: &str) -> bool {
        self.look.correct(word, false, false)
    }

    fn correct_affixed(&self, word: &str) -> bool {
        let captype = self.aff.casing.guess(word);
        self.look
            .has_affix_form(&LookupWord::new(word, captype), false)
    }

    fn correct_compound(&self, word: &str) -> bool {
        let captype = self.aff.casing.guess(word);
        self.look
            .has_compound_form(&LookupWord::new(word, captype), false)
    }

    fn is_forbidden(&self, word: &str) -> bool {
        self.aff.forbiddenword.is_some()
            && self.dic.has_flag(word, self.aff.forbiddenword, false)
    }

    // -----------------------------------------------------------------
    // The handler every accepted candidate funnels through
    // -----------------------------------------------------------------

    /// Coerce case, filter forbidden candidates, apply OCONV, dedup.
    /// Returns whether the candidate made it into `out`.
    fn emit(
        &self,
        text: String,
        coerce_to: Option<CapType>,
        original: &str,
        handled: &mut HashSet<String>,
        out: &mut Vec<String>,
        check_inclusion: bool,
    ) -> bool {
        let mut text = text;
        if let Some(captype) = coerce_to {
            // KEEPCASE words own their capitalization (except under
            // CHECKSHARPS, where recapitalization is routine).
            let keep = self.aff.keepcase.is_some()
                && self.dic.has_flag(&text, self.aff.keepcase, false)
                && !self.aff.checksharps;
            if !keep {
                let coerced = self.aff.casing.coerce(&text, captype);
                if coerced != text && !self.is_forbidden(&coerced) {
                    text = coerced;
                }
            }
            if matches!(captype, CapType::Huh | CapType::HuhInit) {
                text = restore_char_after_space(&text, original);
            }
        }

        if self.is_forbidden(&text) {
            return false;
        }
        if self.aff.forbidwarn && self.dic.has_flag(&text, self.aff.warn, false) {
            return false;
        }

        let text = self.aff.oconv.apply(&text);

        if handled.contains(&text) {
            return false;
        }
        if check_inclusion && handled.iter().any(|prev| prev.contains(text.as_str())) {
            return false;
        }
        handled.insert(text.clone());
        out.push(text);
        true
    }
}

/// For mixed-case originals, a two-word suggestion keeps the original's
/// character right after the split point ("BAnana" -> "BA nana" keeps
/// the 'n' the user typed, not a case-mangled copy).
fn restore_char_after_space(text: &str, original: &str) -> String {
    let Some(space_at) = text.chars().position(|c| c == ' ') else {
        return text.to_string();
    };
    let text_chars: Vec<char> = text.chars().collect();
    let orig_chars: Vec<char> = original.chars().collect();
    let Some(&orig_c) = orig_chars.get(space_at) else {
        return text.to_string();
    };
    let Some(&sug_c) = text_chars.get(space_at + 1) else {
        return text.to_string();
    };
    if sug_c != orig_c && sug_c.to_uppercase().eq(orig_c.to_uppercase()) {
        let mut fixed = text_chars;
        fixed[space_at + 1] = orig_c;
        fixed.into_iter().collect()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(aff: &str, dic: &str) -> (Aff, Dic, Vec<u32>) {
        let aff = Aff::parse(aff).unwrap();
        let dic = Dic::parse(dic, &aff).unwrap();
        let roots = crate::handle::suggestible_roots(&aff, &dic);
        (aff, dic, roots)
    }

    fn suggest(aff: &Aff, dic: &Dic, roots: &[u32], word: &str) -> Vec<String> {
        Suggester::new(aff, dic, roots).suggest(word)
    }

    #[test]
    fn swap_fix_is_found() {
        let (aff, dic, roots) = build("", "1\nhello\n");
        let out = suggest(&aff, &dic, &roots, "hlelo");
        assert_eq!(out, vec!["hello"]);
    }

    #[test]
    fn rep_fix_comes_early() {
        let (aff, dic, roots) = build(
            "REP 1\nREP alot a_lot\n",
            "2\na lot\nalto\n",
        );
        let out = suggest(&aff, &dic, &roots, "alot");
        assert_eq!(out.first().map(String::as_str), Some("a lot"));
    }

    #[test]
    fn case_suggestion_for_miscapitalized_word() {
        let (aff, dic, roots) = build("", "1\nNASA\n");
        let out = suggest(&aff, &dic, &roots, "nasa");
        assert_eq!(out.first().map(String::as_str), Some("NASA"));
    }

    #[test]
    fn two_word_split() {
        let (aff, dic, roots) = build("", "2\nice\ncream\n");
        let out = suggest(&aff, &dic, &roots, "icecream");
        assert!(out.contains(&"ice cream".to_string()));
    }

    #[test]
    fn nosplitsugs_suppresses_splits() {
        let (aff, dic, roots) = build("NOSPLITSUGS\n", "2\nice\ncream\n");
        let out = suggest(&aff, &dic, &roots, "icecream");
        assert!(!out.contains(&"ice cream".to_string()));
    }

    #[test]
    fn forbidden_words_never_suggested() {
        let (aff, dic, roots) = build(
            "FORBIDDENWORD Z\nTRY ab\n",
            "2\nabba/Z\nabbey\n",
        );
        let out = suggest(&aff, &dic, &roots, "abbaa");
        assert!(!out.contains(&"abba".to_string()));
    }

    #[test]
    fn nosuggest_words_never_suggested() {
        let (aff, dic, roots) = build("NOSUGGEST N\nTRY x\n", "1\ntabu/N\n");
        let out = suggest(&aff, &dic, &roots, "tabuu");
        assert!(out.is_empty());
    }

    #[test]
    fn uppercase_coerced_back_to_original_class() {
        // An ALL-caps misspelling gets ALL-caps suggestions.
        let (aff, dic, roots) = build("", "1\nkitten\n");
        let out = suggest(&aff, &dic, &roots, "KITEN");
        assert!(out.contains(&"KITTEN".to_string()));
    }

    #[test]
    fn dash_chunks_repaired() {
        let (aff, dic, roots) = build("", "2\nwell\nknown\n");
        let out = suggest(&aff, &dic, &roots, "well-knwon");
        assert!(out.contains(&"well-known".to_string()));
    }

    #[test]
    fn ngram_stage_runs_when_edits_fail() {
        let (aff, dic, roots) = build("", "1\nadventure\n");
        let out = suggest(&aff, &dic, &roots, "advantures");
        assert!(out.contains(&"adventure".to_string()));
    }

    #[test]
    fn bounded_output() {
        let (aff, dic, roots) = build(
            "TRY abcdefghijklmnopqrstuvwxyz\n",
            "6\ncat\nbat\nrat\nmat\nsat\nfat\n",
        );
        let out = suggest(&aff, &dic, &roots, "zat");
        assert!(out.len() <= MAX_SUGGESTIONS + 3 + 4 + MAX_PHONET_SUGGESTIONS);
    }

    #[test]
    fn restore_char_after_space_keeps_original_case() {
        assert_eq!(restore_char_after_space("ba Nana", "baNana"), "ba Nana");
        assert_eq!(restore_char_after_space("ba nana", "baNana"), "ba Nana");
        assert_eq!(restore_char_after_space("banana", "baNana"), "banana");
    }
}
