// Capitalization classification and case transforms.
//
// Lookup and suggestion both depend on knowing *how* a word is capitalized
// ("Kitten" may be a sentence-initial "kitten", "KITTEN" may be either) and
// on producing the candidate spellings that follow from that. German needs
// sharp-s awareness (`ß` upcases to `SS`), Turkic languages have the dotted
// and dotless i pairs; everything else uses plain Unicode case mapping.

/// Capitalization pattern of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapType {
    /// No uppercase letters: "kitten", "123".
    No,
    /// First letter uppercase, rest lowercase: "Kitten".
    Init,
    /// Every letter uppercase: "KITTEN".
    All,
    /// Mixed case, first letter lowercase: "iPhone".
    Huh,
    /// Mixed case, first letter uppercase: "McDonald".
    HuhInit,
}

/// Case-handling mode, chosen once at engine build from `CHECKSHARPS` and
/// `LANG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    #[default]
    Plain,
    /// `CHECKSHARPS`: `ß` is case-equal to `ss`/`SS`, so all-caps words
    /// containing `SS` get sharp-s lookup variants.
    German,
    /// `LANG tr`/`az`/...: `i` upcases to `İ` and `I` downcases to `ı`.
    Turkic,
}

impl Casing {
    // -----------------------------------------------------------------
    // Character-level transforms
    // -----------------------------------------------------------------

    fn lower_char(self, c: char, out: &mut String) {
        match (self, c) {
            (Casing::Turkic, 'I') => out.push('ı'),
            (Casing::Turkic, 'İ') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }

    fn upper_char(self, c: char, out: &mut String) {
        match (self, c) {
            (Casing::Turkic, 'i') => out.push('İ'),
            (Casing::Turkic, 'ı') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }

    // -----------------------------------------------------------------
    // Word-level transforms
    // -----------------------------------------------------------------

    pub fn lower(self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            self.lower_char(c, &mut out);
        }
        out
    }

    pub fn upper(self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            self.upper_char(c, &mut out);
        }
        out
    }

    /// Uppercase the first letter, lowercase the rest.
    pub fn capitalize(self, word: &str) -> String {
        let mut chars = word.chars();
        let mut out = String::with_capacity(word.len());
        if let Some(first) = chars.next() {
            self.upper_char(first, &mut out);
        }
        for c in chars {
            self.lower_char(c, &mut out);
        }
        out
    }

    /// Lowercase only the first letter.
    pub fn lower_first(self, word: &str) -> String {
        let mut chars = word.chars();
        let mut out = String::with_capacity(word.len());
        if let Some(first) = chars.next() {
            self.lower_char(first, &mut out);
        }
        out.push_str(chars.as_str());
        out
    }

    /// Uppercase only the first letter.
    pub fn upper_first(self, word: &str) -> String {
        let mut chars = word.chars();
        let mut out = String::with_capacity(word.len());
        if let Some(first) = chars.next() {
            self.upper_char(first, &mut out);
        }
        out.push_str(chars.as_str());
        out
    }

    // -----------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------

    /// Classify the capitalization pattern of a word.
    pub fn guess(self, word: &str) -> CapType {
        let mut first_upper = false;
        let mut rest_upper = false;
        let mut any_lower = false;
        let mut any_letter = false;

        for (idx, c) in word.chars().enumerate() {
            if c.is_uppercase() {
                any_letter = true;
                if idx == 0 {
                    first_upper = true;
                } else {
                    rest_upper = true;
                }
            } else if c.is_lowercase() {
                any_letter = true;
                any_lower = true;
            }
        }

        if !any_letter || (!first_upper && !rest_upper) {
            CapType::No
        } else if !any_lower {
            CapType::All
        } else if first_upper && !rest_upper {
            CapType::Init
        } else if first_upper {
            CapType::HuhInit
        } else {
            CapType::Huh
        }
    }

    // -----------------------------------------------------------------
    // Variant production
    // -----------------------------------------------------------------

    /// The spellings to try, in order, when *checking* a word.
    ///
    /// "Kitten" may be a capitalized "kitten"; "KITTEN" may be any of
    /// "KITTEN", "kitten", "Kitten". Mixed-case words are tried as
    /// written (plus first-letter-lowered for HUHINIT).
    pub fn variants(self, word: &str) -> (CapType, Vec<String>) {
        let captype = self.guess(word);
        let mut result = match captype {
            CapType::No | CapType::Huh => vec![word.to_string()],
            CapType::Init => vec![word.to_string(), self.lower(word)],
            CapType::HuhInit => vec![word.to_string(), self.lower_first(word)],
            CapType::All => vec![
                word.to_string(),
                self.lower(word),
                self.capitalize(word),
            ],
        };
        if self == Casing::German && captype == CapType::All {
            // An all-caps word spells ß as SS; recover the sharp forms.
            let lowered = self.lower(word);
            for variant in sharp_variants(&lowered) {
                if !result.contains(&variant) {
                    result.push(variant);
                }
            }
        }
        (captype, result)
    }

    /// The spellings to run the *suggestion* search from, in order.
    ///
    /// Broader than [`Casing::variants`]: a miss in one case class is often
    /// a hit in another, so the search fans out over the plausible classes.
    pub fn corrections(self, word: &str) -> (CapType, Vec<String>) {
        let captype = self.guess(word);
        let result = match captype {
            CapType::No => vec![word.to_string()],
            CapType::Init => vec![word.to_string(), self.lower(word)],
            CapType::Huh => vec![word.to_string(), self.lower(word)],
            CapType::HuhInit => vec![
                self.lower_first(word),
                word.to_string(),
                self.lower(word),
                self.capitalize(word),
            ],
            CapType::All => vec![
                self.lower(word),
                word.to_string(),
                self.capitalize(word),
            ],
        };
        (captype, result)
    }

    /// Reshape a suggestion candidate to the case class of the original
    /// misspelling.
    pub fn coerce(self, word: &str, captype: CapType) -> String {
        match captype {
            CapType::Init | CapType::HuhInit => self.upper_first(word),
            CapType::All => self.upper(word),
            CapType::No | CapType::Huh => word.to_string(),
        }
    }
}

/// All recapitalizations of `ss` into `ß` in an already-lowercased word.
///
/// Each occurrence may independently be a genuine double-s or a sharp s,
/// so every combination is produced (occurrence count capped to keep the
/// expansion bounded; real words carry at most two or three).
fn sharp_variants(word: &str) -> Vec<String> {
    const MAX_OCCURRENCES: usize = 5;

    fn expand(word: &str, from: usize, budget: usize, out: &mut Vec<String>) {
        if budget == 0 {
            return;
        }
        let Some(pos) = word[from..].find("ss").map(|p| p + from) else {
            return;
        };
        let replaced = format!("{}ß{}", &word[..pos], &word[pos + 2..]);
        // Branch 1: this occurrence is a sharp s.
        out.push(replaced.clone());
        expand(&replaced, pos + 'ß'.len_utf8(), budget - 1, out);
        // Branch 2: keep the double s, move past it.
        expand(word, pos + 2, budget - 1, out);
    }

    let mut out = Vec::new();
    expand(word, 0, MAX_OCCURRENCES, &mut out);
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_basic_patterns() {
        let c = Casing::Plain;
        assert_eq!(c.guess("kitten"), CapType::No);
        assert_eq!(c.guess("Kitten"), CapType::Init);
        assert_eq!(c.guess("KITTEN"), CapType::All);
        assert_eq!(c.guess("iPhone"), CapType::Huh);
        assert_eq!(c.guess("McDonald"), CapType::HuhInit);
    }

    #[test]
    fn guess_without_letters_is_no() {
        assert_eq!(Casing::Plain.guess("1234"), CapType::No);
        assert_eq!(Casing::Plain.guess("--"), CapType::No);
        assert_eq!(Casing::Plain.guess(""), CapType::No);
    }

    #[test]
    fn guess_single_letter() {
        assert_eq!(Casing::Plain.guess("a"), CapType::No);
        assert_eq!(Casing::Plain.guess("A"), CapType::All);
    }

    #[test]
    fn variants_for_init_include_lowercase() {
        let (captype, variants) = Casing::Plain.variants("Kitten");
        assert_eq!(captype, CapType::Init);
        assert_eq!(variants, vec!["Kitten", "kitten"]);
    }

    #[test]
    fn variants_for_all_include_capitalized() {
        let (captype, variants) = Casing::Plain.variants("KITTEN");
        assert_eq!(captype, CapType::All);
        assert_eq!(variants, vec!["KITTEN", "kitten", "Kitten"]);
    }

    #[test]
    fn variants_for_huhinit_lower_the_first_letter() {
        let (captype, variants) = Casing::Plain.variants("McDonald");
        assert_eq!(captype, CapType::HuhInit);
        assert_eq!(variants, vec!["McDonald", "mcDonald"]);
    }

    #[test]
    fn corrections_for_all_start_from_lowercase() {
        let (_, corrections) = Casing::Plain.corrections("KITTEN");
        assert_eq!(corrections[0], "kitten");
        assert!(corrections.contains(&"Kitten".to_string()));
    }

    #[test]
    fn coerce_restores_case_class() {
        let c = Casing::Plain;
        assert_eq!(c.coerce("kitten", CapType::All), "KITTEN");
        assert_eq!(c.coerce("kitten", CapType::Init), "Kitten");
        assert_eq!(c.coerce("kitTen", CapType::HuhInit), "KitTen");
        assert_eq!(c.coerce("kitten", CapType::No), "kitten");
    }

    #[test]
    fn coerce_upper_first_keeps_tail() {
        // INIT coercion must not flatten the tail of a mixed candidate.
        assert_eq!(Casing::Plain.coerce("mcDonald", CapType::Init), "McDonald");
    }

    #[test]
    fn turkic_dotted_i_round_trip() {
        let c = Casing::Turkic;
        assert_eq!(c.upper("i"), "İ");
        assert_eq!(c.upper("ı"), "I");
        assert_eq!(c.lower("I"), "ı");
        assert_eq!(c.lower("İ"), "i");
        assert_eq!(c.guess("İstanbul"), CapType::Init);
    }

    #[test]
    fn german_upper_maps_sharp_s() {
        assert_eq!(Casing::German.upper("straße"), "STRASSE");
    }

    #[test]
    fn german_all_caps_variants_recover_sharp_s() {
        let (captype, variants) = Casing::German.variants("STRASSE");
        assert_eq!(captype, CapType::All);
        assert!(variants.contains(&"straße".to_string()));
        assert!(variants.contains(&"strasse".to_string()));
    }

    #[test]
    fn sharp_variants_cover_all_combinations() {
        let variants = sharp_variants("essess");
        assert!(variants.contains(&"eßess".to_string()));
        assert!(variants.contains(&"esseß".to_string()));
        assert!(variants.contains(&"eßeß".to_string()));
    }

    #[test]
    fn sharp_variants_none_without_double_s() {
        assert!(sharp_variants("kitten").is_empty());
    }
}
