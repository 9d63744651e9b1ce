// Affix decomposition: enumerate every (prefix, stem, suffix) hypothesis
// that could have produced a surface word, bind each to dictionary
// homonyms, and hand validated forms to the visitor.
//
// Enumeration is visitor-driven so callers can stop at the first
// accepting form; nothing is materialized. At most two affixes of either
// side ever stack.

use std::ops::ControlFlow;

use lexis_aff::affix::compatible;
use lexis_core::casing::CapType;
use lexis_core::flags::Flag;

use super::forms::{AffixForm, FormLimits};
use super::word::{CompoundPos, LookupWord};
use super::Lookuper;

/// Visitor over enumerated forms; `Break` stops the enumeration.
pub type FormVisitor<'a, 'v> = dyn FnMut(AffixForm<'a>) -> ControlFlow<()> + 'v;

impl<'a> Lookuper<'a> {
    /// Enumerate the *valid* affix forms of `word`: every decomposition
    /// hypothesis that binds to a dictionary homonym and passes
    /// validation. Meeting a forbidden homonym on an affixed or
    /// compound-positioned hypothesis aborts the enumeration.
    pub fn affix_forms(
        &self,
        word: &LookupWord,
        limits: &FormLimits,
        allow_nosuggest: bool,
        visit: &mut FormVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        let mut aborted = false;
        let flow = self.produce_affix_forms(word, limits, &mut |candidate| {
            match self.bind_candidate(word, &candidate, allow_nosuggest, visit) {
                Binding::Stopped => ControlFlow::Break(()),
                Binding::Forbidden => {
                    aborted = true;
                    ControlFlow::Break(())
                }
                Binding::Done => ControlFlow::Continue(()),
            }
        });
        if aborted {
            ControlFlow::Continue(())
        } else {
            flow
        }
    }

    fn bind_candidate(
        &self,
        word: &LookupWord,
        candidate: &AffixForm<'a>,
        allow_nosuggest: bool,
        visit: &mut FormVisitor<'a, '_>,
    ) -> Binding {
        let aff = self.aff;
        let mut found = false;
        for homonym in self.dic.homonyms(&candidate.stem) {
            // A forbidden homonym poisons every affixed or in-compound
            // reading of this stem.
            if (word.pos.is_some() || !candidate.is_base())
                && homonym.flags.has(aff.forbiddenword)
            {
                return Binding::Forbidden;
            }
            let form = candidate.with_word(homonym);
            if self.is_good_form(&form, word, allow_nosuggest) {
                found = true;
                if visit(form).is_break() {
                    return Binding::Stopped;
                }
            }
        }

        // FORCEUCASE begin-hook: "Foobar" may compound from "foo".
        if word.pos == Some(CompoundPos::Begin)
            && aff.forceucase.is_some()
            && word.captype == CapType::Init
        {
            let lowered = aff.casing.lower(&candidate.stem);
            for homonym in self.dic.homonyms(&lowered) {
                let form = candidate.with_word(homonym);
                if self.is_good_form(&form, word, allow_nosuggest) {
                    found = true;
                    if visit(form).is_break() {
                        return Binding::Stopped;
                    }
                }
            }
        }

        // ALL-caps fallback: an all-caps query may match any-cased
        // entries, unless the stem insists on its own case.
        if !found && word.pos.is_none() && word.captype == CapType::All {
            if !self.dic.has_flag(&candidate.stem, aff.keepcase, false) {
                let lowered = aff.casing.lower(&candidate.stem);
                for homonym in self.dic.homonyms_ignorecase(&lowered) {
                    let form = candidate.with_word(homonym);
                    if self.is_good_form(&form, word, allow_nosuggest) {
                        if visit(form).is_break() {
                            return Binding::Stopped;
                        }
                    }
                }
            }
        }
        Binding::Done
    }

    /// Enumerate decomposition hypotheses (not yet dictionary-bound):
    /// the identity form, single and double suffixes, single and double
    /// prefixes, and prefix+suffix cross products.
    fn produce_affix_forms(
        &self,
        word: &LookupWord,
        limits: &FormLimits,
        visit: &mut FormVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        visit(AffixForm::base(&word.text))?;

        let suffix_allowed = word.pos.is_none()
            || word.pos == Some(CompoundPos::End)
            || !limits.suffix.is_empty();
        let prefix_allowed = word.pos.is_none()
            || word.pos == Some(CompoundPos::Begin)
            || !limits.prefix.is_empty();

        if suffix_allowed {
            self.desuffix(&word.text, &limits.suffix, &limits.forbidden, false, false, visit)?;
        }
        if prefix_allowed {
            self.deprefix(&word.text, &limits.prefix, &limits.forbidden, false, &mut |form| {
                let prefix = form.prefix;
                let stem = form.stem.clone();
                visit(form)?;
                if suffix_allowed && prefix.is_some_and(|p| p.crossproduct) {
                    self.desuffix(&stem, &limits.suffix, &limits.forbidden, false, true, &mut |mut form2| {
                        form2.text = word.text.clone();
                        form2.prefix = prefix;
                        visit(form2)
                    })?;
                }
                ControlFlow::Continue(())
            })?;
        }
        ControlFlow::Continue(())
    }

    /// Strip one suffix (and, unnested, recursively a second) off the
    /// end of `word`.
    fn desuffix(
        &self,
        word: &str,
        required: &[Flag],
        forbidden: &[Flag],
        nested: bool,
        crossproduct: bool,
        visit: &mut FormVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        for suffix in self.aff.suffixes.candidates(word.chars().rev()) {
            if crossproduct && !suffix.crossproduct {
                continue;
            }
            if !compatible(&suffix.flags, required, forbidden) {
                continue;
            }
            if !self.aff.fullstrip && suffix.add.len() == word.len() {
                continue;
            }
            if !suffix.on(word) {
                continue;
            }
            let stem = suffix.apply(word);
            visit(AffixForm {
                suffix: Some(suffix),
                ..AffixForm::base(word)
            }
            .with_stem(stem.clone()))?;
            if !nested {
                let mut inner_required = Vec::with_capacity(required.len() + 1);
                inner_required.push(suffix.flag);
                inner_required.extend_from_slice(required);
                self.desuffix(&stem, &inner_required, forbidden, true, crossproduct, &mut |mut form2| {
                    form2.text = word.to_string();
                    form2.suffix2 = Some(suffix);
                    visit(form2)
                })?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Strip one prefix (and, with COMPLEXPREFIXES, recursively a
    /// second) off the front of `word`.
    fn deprefix(
        &self,
        word: &str,
        required: &[Flag],
        forbidden: &[Flag],
        nested: bool,
        visit: &mut FormVisitor<'a, '_>,
    ) -> ControlFlow<()> {
        for prefix in self.aff.prefixes.candidates(word.chars()) {
            if !compatible(&prefix.flags, required, forbidden) {
                continue;
            }
            if !self.aff.fullstrip && prefix.add.len() == word.len() {
                continue;
            }
            if !prefix.on(word) {
                continue;
            }
            let stem = prefix.apply(word);
            visit(AffixForm {
                prefix: Some(prefix),
                ..AffixForm::base(word)
            }
            .with_stem(stem.clone()))?;
            if !nested && self.aff.complex_prefixes {
                let mut inner_required = Vec::with_capacity(required.len() + 1);
                inner_required.push(prefix.flag);
                inner_required.extend_from_slice(required);
                self.deprefix(&stem, &inner_required, forbidden, true, &mut |mut form2| {
                    form2.text = word.to_string();
                    form2.prefix2 = Some(prefix);
                    visit(form2)
                })?;
            }
        }
        ControlFlow::Continue(())
    }
}

enum Binding {
    /// All homonyms processed; keep enumerating.
    Done,
    /// The visitor asked to stop.
    Stopped,
    /// A forbidden homonym aborts the whole enumeration.
    Forbidden,
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use lexis_aff::{Aff, Dic};
    use lexis_core::casing::CapType;

    use crate::lookup::forms::FormLimits;
    use crate::lookup::word::LookupWord;
    use crate::lookup::Lookuper;

    #[test]
    fn accepted_forms_reapply_to_the_surface() {
        let aff = Aff::parse(
            "PFX B Y 1\nPFX B 0 re .\nSFX A Y 1\nSFX A e ing .\n",
        )
        .unwrap();
        let dic = Dic::parse("1\nwrite/AB\n", &aff).unwrap();
        let look = Lookuper::new(&aff, &dic);

        let mut seen = 0;
        let _ = look.affix_forms(
            &LookupWord::new("rewriting", CapType::No),
            &FormLimits::default(),
            true,
            &mut |form| {
                // Undoing the decomposition must land on the surface.
                let mut rebuilt = form.stem.clone();
                if let Some(suffix) = form.suffix {
                    let root = rebuilt.strip_suffix(&suffix.strip).unwrap();
                    rebuilt = format!("{root}{}", suffix.add);
                }
                if let Some(prefix) = form.prefix {
                    let tail = rebuilt.strip_prefix(&prefix.strip).unwrap();
                    rebuilt = format!("{}{tail}", prefix.add);
                }
                assert_eq!(rebuilt, form.text);
                seen += 1;
                ControlFlow::Continue(())
            },
        );
        assert!(seen >= 1);
    }

    #[test]
    fn enumeration_short_circuits_on_break() {
        let aff = Aff::parse("SFX A Y 1\nSFX A 0 s .\n").unwrap();
        let dic = Dic::parse("2\nhello/A\nhellos\n", &aff).unwrap();
        let look = Lookuper::new(&aff, &dic);

        let mut visits = 0;
        let flow = look.affix_forms(
            &LookupWord::new("hellos", CapType::No),
            &FormLimits::default(),
            true,
            &mut |_| {
                visits += 1;
                ControlFlow::Break(())
            },
        );
        assert!(flow.is_break());
        assert_eq!(visits, 1);
    }
}
