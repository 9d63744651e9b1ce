// Compounding: accept a word as a licensed concatenation of dictionary
// forms, under the flag-based regime (COMPOUNDFLAG / COMPOUNDBEGIN...)
// and the rule-based one (COMPOUNDRULE), then reject generated compounds
// that trip any of the boundary checks.

use std::ops::ControlFlow;

use lexis_aff::compound_rule::CompoundRule;
use lexis_core::casing::CapType;
use lexis_core::flags::{Flag, FlagSet};

use crate::suggest::permutations;

use super::forms::{AffixForm, CompoundForm, FormLimits};
use super::word::{CompoundPos, LookupWord};
use super::Lookuper;

/// Visitor over accepted compound segmentations.
pub type CompoundVisitor<'a, 'v> = dyn FnMut(&CompoundForm<'a>) -> ControlFlow<()> + 'v;

impl<'a> Lookuper<'a> {
    /// Enumerate every accepted compound segmentation of `word`, both
    /// regimes, with the boundary checks already applied.
    pub fn compound_forms(
        &self,
        word: &LookupWord,
        allow_nosuggest: bool,
        visit: &mut CompoundVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        let aff = self.aff;
        // A word whose homonym is forbidden cannot be re-derived as a
        // compound of smaller pieces.
        if aff.forbiddenword.is_some()
            && self.dic.has_flag(&word.text, aff.forbiddenword, false)
        {
            return ControlFlow::Continue(());
        }

        if aff.compound_flag.is_some() || aff.compound_begin.is_some() {
            let mut parts = Vec::new();
            self.compounds_by_flags(word, &mut parts, allow_nosuggest, &mut |parts| {
                if self.is_bad_compound(parts, word.captype) {
                    ControlFlow::Continue(())
                } else {
                    visit(parts)
                }
            })?;
        }

        if !aff.compound_rules.is_empty() {
            let rules: Vec<&CompoundRule> = aff.compound_rules.iter().collect();
            let mut parts = Vec::new();
            self.compounds_by_rules(&word.text, &mut parts, &rules, &mut |parts| {
                if self.is_bad_compound(parts, word.captype) {
                    ControlFlow::Continue(())
                } else {
                    visit(parts)
                }
            })?;
        }
        ControlFlow::Continue(())
    }

    /// Flag-based segmentation. `parts` is the stack of segments already
    /// fixed; `rest` is the remaining surface.
    fn compounds_by_flags(
        &self,
        rest: &LookupWord,
        parts: &mut Vec<AffixForm<'a>>,
        allow_nosuggest: bool,
        visit: &mut CompoundVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        let aff = self.aff;
        let permit: Vec<Flag> = aff.compound_permit.into_iter().collect();
        let forbidden: Vec<Flag> = aff.compound_forbid.into_iter().collect();

        // Close the compound here: the rest is its final segment.
        if !parts.is_empty() {
            let limits = FormLimits {
                prefix: permit.clone(),
                suffix: Vec::new(),
                forbidden: forbidden.clone(),
            };
            let end_word = rest.clone().with_pos(Some(CompoundPos::End));
            self.affix_forms(&end_word, &limits, allow_nosuggest, &mut |form| {
                parts.push(form);
                let result = visit(parts);
                parts.pop();
                result
            })?;
        }

        let len = rest.char_len();
        if len < aff.compound_min * 2 {
            return ControlFlow::Continue(());
        }
        if let Some(max) = aff.compound_word_max {
            if parts.len() + 1 >= max.max(1) {
                return ControlFlow::Continue(());
            }
        }

        let pos = if parts.is_empty() {
            CompoundPos::Begin
        } else {
            CompoundPos::Middle
        };
        let limits = FormLimits {
            prefix: if pos == CompoundPos::Begin {
                Vec::new()
            } else {
                permit.clone()
            },
            suffix: permit,
            forbidden,
        };

        let chars: Vec<char> = rest.text.chars().collect();
        for split in aff.compound_min..=(len - aff.compound_min) {
            let left: String = chars[..split].iter().collect();
            let right: String = chars[split..].iter().collect();

            self.split_at(rest, &left, &right, None, pos, &limits, allow_nosuggest, parts, visit)?;

            // SIMPLIFIEDTRIPLE: "busstop" may stand for "buss|stop" with
            // one of the three s's elided.
            if aff.simplified_triple && chars[split - 1] == chars[split] {
                let mut extended = left.clone();
                extended.push(chars[split]);
                self.split_at(
                    rest,
                    &extended,
                    &right,
                    Some(&left),
                    pos,
                    &limits,
                    allow_nosuggest,
                    parts,
                    visit,
                )?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Decompose one left segment and recurse over the right remainder.
    /// `record_as` substitutes the text stored on the form (used by the
    /// simplified-triple retry, which analyzes the extended text but
    /// records the original spelling).
    #[allow(clippy::too_many_arguments)]
    fn split_at(
        &self,
        rest: &LookupWord,
        left: &str,
        right: &str,
        record_as: Option<&str>,
        pos: CompoundPos,
        limits: &FormLimits,
        allow_nosuggest: bool,
        parts: &mut Vec<AffixForm<'a>>,
        visit: &mut CompoundVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        let left_word = rest.to(left).with_pos(Some(pos));
        self.affix_forms(&left_word, limits, allow_nosuggest, &mut |mut form| {
            if let Some(text) = record_as {
                form.text = text.to_string();
            }
            parts.push(form);
            let right_word = rest.to(right);
            let result = self.compounds_by_flags(&right_word, parts, allow_nosuggest, visit);
            parts.pop();
            result
        })
    }

    /// Rule-based segmentation: split into dictionary words whose flag
    /// sequence satisfies a COMPOUNDRULE.
    fn compounds_by_rules(
        &self,
        rest: &str,
        parts: &mut Vec<AffixForm<'a>>,
        rules: &[&'a CompoundRule],
        visit: &mut CompoundVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        let aff = self.aff;

        // Close the compound: the rest is the final part.
        if !parts.is_empty() {
            for homonym in self.dic.homonyms(rest) {
                let flag_sets: Vec<&FlagSet> = parts
                    .iter()
                    .filter_map(|p| p.word.map(|w| &w.flags))
                    .chain([&homonym.flags])
                    .collect();
                if rules.iter().any(|rule| rule.full_match(&flag_sets)) {
                    parts.push(AffixForm::base_of(rest, homonym));
                    let result = visit(parts);
                    parts.pop();
                    result?;
                }
            }
        }

        let len = rest.chars().count();
        if len < aff.compound_min * 2 {
            return ControlFlow::Continue(());
        }
        if let Some(max) = aff.compound_word_max {
            if parts.len() + 1 >= max.max(1) {
                return ControlFlow::Continue(());
            }
        }

        let chars: Vec<char> = rest.chars().collect();
        for split in aff.compound_min..=(len - aff.compound_min) {
            let left: String = chars[..split].iter().collect();
            let right: String = chars[split..].iter().collect();
            for homonym in self.dic.homonyms(&left) {
                let flag_sets: Vec<&FlagSet> = parts
                    .iter()
                    .filter_map(|p| p.word.map(|w| &w.flags))
                    .chain([&homonym.flags])
                    .collect();
                let filtered: Vec<&'a CompoundRule> = rules
                    .iter()
                    .copied()
                    .filter(|rule| rule.partial_match(&flag_sets))
                    .collect();
                if filtered.is_empty() {
                    continue;
                }
                parts.push(AffixForm::base_of(&left, homonym));
                let result = self.compounds_by_rules(&right, parts, &filtered, visit);
                parts.pop();
                result?;
            }
        }
        ControlFlow::Continue(())
    }

    /// The boundary checks: a generated segmentation is discarded when
    /// any of these finds it malformed.
    fn is_bad_compound(&self, parts: &[AffixForm<'a>], captype: CapType) -> bool {
        let aff = self.aff;

        if aff.forceucase.is_some() && !matches!(captype, CapType::All | CapType::Init) {
            if let Some(last) = parts.last() {
                if self.dic.has_flag(&last.text, aff.forceucase, false) {
                    return true;
                }
            }
        }

        for (idx, pair) in parts.windows(2).enumerate() {
            let left = &pair[0].text;
            let right = &pair[1].text;

            if aff.compound_forbid.is_some()
                && self.dic.has_flag(left, aff.compound_forbid, false)
            {
                return true;
            }

            // A compound already expressible as two dictionary words with
            // a space is spurious.
            let spaced = format!("{left} {right}");
            let spaced_word = LookupWord::new(spaced, captype);
            if self.has_affix_form(&spaced_word, true) {
                return true;
            }

            if aff.check_compound_rep {
                let joined = format!("{left}{right}");
                for candidate in permutations::replchars(&joined, &aff.rep) {
                    if candidate.contains(' ') {
                        continue;
                    }
                    let candidate_word = LookupWord::new(candidate, captype);
                    if self.has_affix_form(&candidate_word, true) {
                        return true;
                    }
                }
            }

            if aff.check_compound_triple && has_triple(left, right) {
                return true;
            }

            if aff.check_compound_case {
                let left_last = LookupWord::new(left.clone(), captype).at(-1);
                let right_first = right.chars().next();
                if let (Some(lc), Some(rc)) = (left_last, right_first) {
                    if (lc.is_uppercase() || rc.is_uppercase()) && lc != '-' && rc != '-' {
                        return true;
                    }
                }
            }

            for pattern in &aff.compound_patterns {
                if pattern.matches_texts(left, right)
                    && pattern
                        .left_flag
                        .map_or(true, |f| pair[0].has_flag(Some(f)))
                    && pattern
                        .right_flag
                        .map_or(true, |f| pair[1].has_flag(Some(f)))
                {
                    return true;
                }
            }

            if aff.check_compound_dup && left == right && idx == parts.len() - 2 {
                return true;
            }
        }
        false
    }
}

/// Three identical letters straddling a boundary ("busssto p" shapes).
fn has_triple(left: &str, right: &str) -> bool {
    let mut tail: Vec<char> = left.chars().rev().take(2).collect();
    tail.reverse();
    let head: Vec<char> = right.chars().take(2).collect();
    let straddle_left = tail.len() == 2 && !head.is_empty() && {
        let c = tail[1];
        tail[0] == c && head[0] == c
    };
    let straddle_right = !tail.is_empty() && head.len() == 2 && {
        let c = head[0];
        tail.last() == Some(&c) && head[1] == c
    };
    straddle_left || straddle_right
}

#[cfg(test)]
mod tests {
    use lexis_aff::{Aff, Dic};

    use crate::lookup::Lookuper;

    fn engine(aff: &str, dic: &str) -> (Aff, Dic) {
        let aff = Aff::parse(aff).unwrap();
        let dic = Dic::parse(dic, &aff).unwrap();
        (aff, dic)
    }

    fn correct(aff: &Aff, dic: &Dic, word: &str) -> bool {
        Lookuper::new(aff, dic).correct(word, true, true)
    }

    #[test]
    fn compound_flag_joins_words() {
        let (aff, dic) = engine("COMPOUNDFLAG C\nCOMPOUNDMIN 3\n", "2\nfoo/C\nbar/C\n");
        assert!(correct(&aff, &dic, "foobar"));
        assert!(correct(&aff, &dic, "barfoo"));
        assert!(correct(&aff, &dic, "foobarfoo"));
        assert!(!correct(&aff, &dic, "fo"));
        assert!(!correct(&aff, &dic, "foobaz"));
    }

    #[test]
    fn compound_min_limits_segment_length() {
        let (aff, dic) = engine("COMPOUNDFLAG C\nCOMPOUNDMIN 4\n", "2\nfoo/C\nbar/C\n");
        assert!(!correct(&aff, &dic, "foobar"));
    }

    #[test]
    fn compound_word_max_limits_parts() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCOMPOUNDWORDMAX 2\n",
            "2\nfoo/C\nbar/C\n",
        );
        assert!(correct(&aff, &dic, "foobar"));
        assert!(!correct(&aff, &dic, "foobarfoo"));
    }

    #[test]
    fn positional_flags() {
        let (aff, dic) = engine(
            "COMPOUNDBEGIN B\nCOMPOUNDMIDDLE M\nCOMPOUNDEND E\nCOMPOUNDMIN 3\n",
            "3\nfoo/B\nbar/M\nbaz/E\n",
        );
        assert!(correct(&aff, &dic, "foobaz"));
        assert!(correct(&aff, &dic, "foobarbaz"));
        assert!(!correct(&aff, &dic, "bazfoo"));
        assert!(!correct(&aff, &dic, "foobar"));
    }

    #[test]
    fn compound_rules_color_fixture() {
        let (aff, dic) = engine(
            "COMPOUNDRULE 1\nCOMPOUNDRULE AB*C\nCOMPOUNDMIN 1\n",
            "3\nred/A\nblue/B\ngreen/C\n",
        );
        assert!(correct(&aff, &dic, "redgreen"));
        assert!(correct(&aff, &dic, "redbluegreen"));
        assert!(correct(&aff, &dic, "redbluebluegreen"));
        assert!(!correct(&aff, &dic, "redred"));
        assert!(!correct(&aff, &dic, "bluegreen"));
        // A rule word is still an ordinary standalone entry.
        assert!(correct(&aff, &dic, "red"));
    }

    #[test]
    fn check_compound_dup_rejects_doubling() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCHECKCOMPOUNDDUP\n",
            "1\nfoo/C\n",
        );
        assert!(!correct(&aff, &dic, "foofoo"));
    }

    #[test]
    fn check_compound_triple_rejects_triples() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCHECKCOMPOUNDTRIPLE\n",
            "2\nfuss/C\nsport/C\n",
        );
        assert!(!correct(&aff, &dic, "fusssport"));
    }

    #[test]
    fn simplified_triple_restores_elided_letter() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCHECKCOMPOUNDTRIPLE\nSIMPLIFIEDTRIPLE\n",
            "2\nfuss/C\nsport/C\n",
        );
        assert!(correct(&aff, &dic, "fussport"));
    }

    #[test]
    fn check_compound_case_rejects_inner_capitals() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCHECKCOMPOUNDCASE\n",
            "2\nfoo/C\nBar/C\n",
        );
        assert!(!correct(&aff, &dic, "fooBar"));
    }

    #[test]
    fn compound_forbid_flag_blocks_left_parts() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDFORBIDFLAG F\nCOMPOUNDMIN 3\n",
            "2\nfoo/CF\nbar/C\n",
        );
        assert!(!correct(&aff, &dic, "foobar"));
    }

    #[test]
    fn compound_pattern_blocks_boundary() {
        let (aff, dic) = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nCHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o b\n",
            "2\nfoo/C\nbar/C\n",
        );
        assert!(!correct(&aff, &dic, "foobar"));
        assert!(correct(&aff, &dic, "barfoo"));
    }

    #[test]
    fn affixed_segments_require_permit_flag() {
        // A suffix inside a compound needs COMPOUNDPERMITFLAG.
        let no_permit = engine(
            "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nSFX S Y 1\nSFX S 0 s .\n",
            "2\nfoo/CS\nbar/C\n",
        );
        assert!(!correct(&no_permit.0, &no_permit.1, "foosbar"));

        let with_permit = engine(
            "COMPOUNDFLAG C\nCOMPOUNDPERMITFLAG P\nCOMPOUNDMIN 3\nSFX S Y 1\nSFX S 0 s/P .\n",
            "2\nfoo/CS\nbar/C\n",
        );
        assert!(correct(&with_permit.0, &with_permit.1, "foosbar"));
    }

    #[test]
    fn compound_parts_concatenate_to_the_surface() {
        use std::ops::ControlFlow;

        use lexis_core::casing::CapType;

        use crate::lookup::word::LookupWord;

        let (aff, dic) = engine("COMPOUNDFLAG C\nCOMPOUNDMIN 3\n", "2\nfoo/C\nbar/C\n");
        let look = Lookuper::new(&aff, &dic);
        let mut seen = 0;
        let _ = look.compound_forms(
            &LookupWord::new("foobarfoo", CapType::No),
            true,
            &mut |parts| {
                let joined: String = parts.iter().map(|p| p.text.as_str()).collect();
                assert_eq!(joined, "foobarfoo");
                seen += 1;
                ControlFlow::Continue(())
            },
        );
        assert!(seen >= 1);
    }

    #[test]
    fn triple_detection() {
        assert!(super::has_triple("fuss", "sport"));
        assert!(super::has_triple("fus", "sstop"));
        assert!(!super::has_triple("fuss", "port"));
        assert!(!super::has_triple("fus", "sport"));
    }
}
