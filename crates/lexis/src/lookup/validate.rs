// Form validation: is a dictionary-bound decomposition actually licensed?
//
// The checks are independent gates; a form passes only if every gate
// does. The compound-position gate is three separate position checks,
// not a cascade.

use super::forms::AffixForm;
use super::word::{CompoundPos, LookupWord};
use super::Lookuper;

impl<'a> Lookuper<'a> {
    pub(crate) fn is_good_form(
        &self,
        form: &AffixForm<'a>,
        word: &LookupWord,
        allow_nosuggest: bool,
    ) -> bool {
        let aff = self.aff;
        let Some(dict_word) = form.word else {
            return false;
        };
        let root_flags = &dict_word.flags;

        if !allow_nosuggest && root_flags.has(aff.nosuggest) {
            return false;
        }

        // KEEPCASE: the entry's own capitalization is the only valid one.
        // Sharp-s stems are exempt in German mode, where the all-caps
        // spelling necessarily rewrites ß.
        if word.captype != dict_word.captype
            && root_flags.has(aff.keepcase)
            && !(aff.checksharps && dict_word.stem.contains('ß'))
        {
            return false;
        }

        // NEEDAFFIX: a bare pseudo-root is no word; neither is a form
        // whose every affix is itself a pseudo-affix.
        if let Some(needaffix) = aff.needaffix {
            if form.is_base() {
                if root_flags.contains(needaffix) {
                    return false;
                }
            } else if form.all_affixes_have(needaffix) {
                return false;
            }
        }

        // The stem (or a stem-adjacent affix) must opt in to each affix
        // class used.
        if let Some(prefix) = form.prefix {
            if !form.has_flag(Some(prefix.flag)) {
                return false;
            }
        }
        if let Some(suffix) = form.suffix {
            if !form.has_flag(Some(suffix.flag)) {
                return false;
            }
        }

        // A circumfix half is only licensed together with its other half.
        if let Some(circumfix) = aff.circumfix {
            let prefix_has = form.prefix.is_some_and(|p| p.flags.contains(circumfix));
            let suffix_has = form.suffix.is_some_and(|s| s.flags.contains(circumfix));
            if prefix_has != suffix_has {
                return false;
            }
        }

        match word.pos {
            None => !form.has_flag(aff.onlyincompound),
            Some(pos) => {
                if form.has_flag(aff.compound_flag) {
                    return true;
                }
                let position_flag = match pos {
                    CompoundPos::Begin => aff.compound_begin,
                    CompoundPos::Middle => aff.compound_middle,
                    CompoundPos::End => aff.compound_end,
                };
                form.has_flag(position_flag)
            }
        }
    }
}
