// Decomposition hypotheses: a surface word explained as stem + affixes,
// and ordered sequences of such explanations for compounds.

use lexis_aff::{Prefix, Suffix, Word};
use lexis_core::flags::Flag;

/// One hypothesis about a surface word: the stem it came from and the
/// affixes that produced it.
///
/// When two affixes of one side stack, `prefix`/`suffix` name the
/// stem-adjacent entry (the one whose auxiliary flags count toward the
/// form) and `prefix2`/`suffix2` the outermost one. A bound dictionary
/// word (`word`) makes the hypothesis concrete.
#[derive(Debug, Clone)]
pub struct AffixForm<'a> {
    pub text: String,
    pub stem: String,
    pub prefix: Option<&'a Prefix>,
    pub prefix2: Option<&'a Prefix>,
    pub suffix: Option<&'a Suffix>,
    pub suffix2: Option<&'a Suffix>,
    pub word: Option<&'a Word>,
}

impl<'a> AffixForm<'a> {
    /// The identity hypothesis: the surface is its own stem.
    pub fn base(text: &str) -> Self {
        AffixForm {
            text: text.to_string(),
            stem: text.to_string(),
            prefix: None,
            prefix2: None,
            suffix: None,
            suffix2: None,
            word: None,
        }
    }

    /// A hypothesis with no affixes, bound to a dictionary word.
    pub fn base_of(text: &str, word: &'a Word) -> Self {
        AffixForm {
            word: Some(word),
            ..AffixForm::base(text)
        }
    }

    pub fn with_word(&self, word: &'a Word) -> Self {
        AffixForm {
            word: Some(word),
            ..self.clone()
        }
    }

    pub fn with_stem(mut self, stem: String) -> Self {
        self.stem = stem;
        self
    }

    /// True when the form carries no affixes at all.
    pub fn is_base(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }

    /// Does the form carry `flag`, counting the dictionary word's flags
    /// and the auxiliary flags of the stem-adjacent affixes? (Outermost
    /// affixes of a doubled pair do not contribute.)
    pub fn has_flag(&self, flag: Option<Flag>) -> bool {
        let Some(flag) = flag else { return false };
        self.word.is_some_and(|w| w.flags.contains(flag))
            || self.prefix.is_some_and(|p| p.flags.contains(flag))
            || self.suffix.is_some_and(|s| s.flags.contains(flag))
    }

    /// Do *all* affixes present on the form carry `flag` in their
    /// auxiliary flag sets?
    pub fn all_affixes_have(&self, flag: Flag) -> bool {
        let mut any = false;
        let mut all = true;
        if let Some(p) = self.prefix {
            any = true;
            all &= p.flags.contains(flag);
        }
        if let Some(p) = self.prefix2 {
            any = true;
            all &= p.flags.contains(flag);
        }
        if let Some(s) = self.suffix {
            any = true;
            all &= s.flags.contains(flag);
        }
        if let Some(s) = self.suffix2 {
            any = true;
            all &= s.flags.contains(flag);
        }
        any && all
    }
}

/// An accepted segmentation of a word into dictionary-backed parts; the
/// concatenation of the parts' `text` equals the original surface.
pub type CompoundForm<'a> = [AffixForm<'a>];

/// Flag constraints threaded through decomposition during compounding:
/// flags the outer prefix / suffix must carry (empty = unconstrained) and
/// flags no affix may carry.
#[derive(Debug, Clone, Default)]
pub struct FormLimits {
    pub prefix: Vec<Flag>,
    pub suffix: Vec<Flag>,
    pub forbidden: Vec<Flag>,
}
