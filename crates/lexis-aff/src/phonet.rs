// The PHONE table: metaphone-style rewrite rules and key construction.
//
// Each rule maps a search pattern onto a replacement; applying the table
// left-to-right over an uppercased word produces a phonetic key. Keys of
// similar-sounding words collide, which is what the phonetic suggestion
// pass exploits.
//
// The rule dialect (inherited from aspell's phonet tables):
//   - letters match themselves, `(abc)` matches any of the class
//   - a trailing `^` anchors to word start, `$` to word end
//   - `-` splits the pattern: only the part before it is consumed
//   - digits are rule priorities (parsed and ignored here)
//   - `_` as the replacement means "emit nothing"

use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PhoneToken {
    Literal(char),
    Class(Box<[char]>),
}

impl PhoneToken {
    fn matches(&self, c: char) -> bool {
        match self {
            PhoneToken::Literal(expected) => *expected == c,
            PhoneToken::Class(chars) => chars.contains(&c),
        }
    }

    fn first_chars(&self) -> Vec<char> {
        match self {
            PhoneToken::Literal(c) => vec![*c],
            PhoneToken::Class(chars) => chars.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
struct PhoneRule {
    tokens: Vec<PhoneToken>,
    /// How many leading tokens the rule consumes (all of them unless the
    /// pattern carried a `-` marker).
    consume: usize,
    at_start: bool,
    at_end: bool,
    replacement: String,
}

impl PhoneRule {
    fn parse(search: &str, replacement: &str) -> Option<PhoneRule> {
        let mut tokens = Vec::new();
        let mut consume = None;
        let mut at_start = false;
        let mut at_end = false;
        let mut chars = search.chars();
        while let Some(c) = chars.next() {
            match c {
                '(' => {
                    let mut class = Vec::new();
                    let mut closed = false;
                    for cc in chars.by_ref() {
                        if cc == ')' {
                            closed = true;
                            break;
                        }
                        class.push(cc);
                    }
                    if !closed || class.is_empty() {
                        return None;
                    }
                    tokens.push(PhoneToken::Class(class.into_boxed_slice()));
                }
                '-' => consume = Some(tokens.len()),
                '^' => at_start = true,
                '$' => at_end = true,
                '<' | '0'..='9' => {} // followup marker / priority: ignored
                other => tokens.push(PhoneToken::Literal(other)),
            }
        }
        if tokens.is_empty() {
            return None;
        }
        let consume = consume.unwrap_or(tokens.len()).max(1);
        Some(PhoneRule {
            tokens,
            consume,
            at_start,
            at_end,
            replacement: if replacement == "_" {
                String::new()
            } else {
                replacement.to_string()
            },
        })
    }

    fn matches(&self, word: &[char], pos: usize) -> bool {
        if self.at_start && pos != 0 {
            return false;
        }
        if pos + self.tokens.len() > word.len() {
            return false;
        }
        if self.at_end && pos + self.tokens.len() != word.len() {
            return false;
        }
        self.tokens
            .iter()
            .zip(&word[pos..])
            .all(|(tok, &c)| tok.matches(c))
    }
}

/// A parsed `PHONE` table.
#[derive(Debug, Clone, Default)]
pub struct PhoneTable {
    /// Rules bucketed by possible first character, kept in file order
    /// (earlier rules win, as in the source dialect).
    rules: HashMap<char, Vec<(u32, PhoneRule)>>,
    len: u32,
}

impl PhoneTable {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one `search replacement` row. Returns `false` when the
    /// search pattern is malformed.
    pub fn push(&mut self, search: &str, replacement: &str) -> bool {
        let Some(rule) = PhoneRule::parse(search, replacement) else {
            return false;
        };
        let order = self.len;
        for c in rule.tokens[0].first_chars() {
            self.rules
                .entry(c)
                .or_default()
                .push((order, rule.clone()));
        }
        self.len += 1;
        true
    }

    /// The phonetic key of a word.
    ///
    /// The word is uppercased first (tables are written in uppercase).
    /// At each position the earliest matching rule fires; characters no
    /// rule covers contribute nothing to the key.
    pub fn encode(&self, word: &str) -> String {
        let word: Vec<char> = word.to_uppercase().chars().collect();
        let mut key = String::new();
        let mut pos = 0;
        while pos < word.len() {
            let fired = self
                .rules
                .get(&word[pos])
                .and_then(|bucket| {
                    bucket
                        .iter()
                        .filter(|(_, rule)| rule.matches(&word, pos))
                        .min_by_key(|(order, _)| *order)
                })
                .map(|(_, rule)| rule);
            match fired {
                Some(rule) => {
                    key.push_str(&rule.replacement);
                    pos += rule.consume;
                }
                None => pos += 1,
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> PhoneTable {
        let mut t = PhoneTable::default();
        for (search, replacement) in rows {
            assert!(t.push(search, replacement), "bad rule {search:?}");
        }
        t
    }

    #[test]
    fn literal_rules_rewrite() {
        let t = table(&[("PH", "F"), ("P", "P"), ("H", "H")]);
        assert_eq!(t.encode("pH"), "F");
        assert_eq!(t.encode("hp"), "HP");
    }

    #[test]
    fn earlier_rule_wins() {
        // Both rules start with A; the first one in the file fires.
        let t = table(&[("AH", "X"), ("A", "A"), ("H", "H")]);
        assert_eq!(t.encode("ah"), "X");
        assert_eq!(t.encode("ha"), "HA");
    }

    #[test]
    fn classes_match_members() {
        let t = table(&[("C(EI)", "S"), ("C", "K"), ("E", "E"), ("I", "I")]);
        assert_eq!(t.encode("ce"), "S");
        assert_eq!(t.encode("ci"), "S");
        assert_eq!(t.encode("ca"), "K");
    }

    #[test]
    fn class_consumes_its_position() {
        // "C(EI)" consumes both chars: the vowel must not re-emit.
        let t = table(&[("C(EI)", "S"), ("E", "E")]);
        assert_eq!(t.encode("ce"), "S");
    }

    #[test]
    fn anchors() {
        let t = table(&[("K^", "C"), ("K", "K")]);
        assert_eq!(t.encode("kik"), "CK");

        let t = table(&[("S$", "Z"), ("S", "S")]);
        assert_eq!(t.encode("ss"), "SZ");
    }

    #[test]
    fn hyphen_limits_consumption() {
        // "A-B" matches "AB" but only consumes the A; the B is seen again.
        let t = table(&[("A-B", "X"), ("B", "B"), ("A", "A")]);
        assert_eq!(t.encode("ab"), "XB");
        assert_eq!(t.encode("aa"), "AA");
    }

    #[test]
    fn underscore_replacement_is_silent() {
        let t = table(&[("H", "_"), ("A", "A")]);
        assert_eq!(t.encode("aha"), "AA");
    }

    #[test]
    fn uncovered_characters_are_dropped() {
        let t = table(&[("A", "A")]);
        assert_eq!(t.encode("axa"), "AA");
    }

    #[test]
    fn priorities_and_followups_parse() {
        let mut t = PhoneTable::default();
        assert!(t.push("AH3", "X"));
        assert!(t.push("A<", "A"));
        assert_eq!(t.encode("ah"), "X");
    }

    #[test]
    fn malformed_rules_rejected() {
        let mut t = PhoneTable::default();
        assert!(!t.push("", "X"));
        assert!(!t.push("(AB", "X"));
        assert!(!t.push("()", "X"));
    }
}
