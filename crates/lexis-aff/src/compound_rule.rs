// COMPOUNDRULE patterns: tiny regexes over class flags.
//
// A rule like `A*BC?` licenses sequences of dictionary words by the flags
// they carry: any number of A-words, then a B-word, then optionally a
// C-word. Long and numeric flags are written in parentheses: `(aa)(bb)*`.
//
// Matching works over a sequence of flag *sets* (one per candidate part),
// choosing one flag per part; the position-set simulation below handles
// that choice implicitly.

use lexis_core::flags::{Flag, FlagSet, FlagStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quant {
    One,
    ZeroOrMore,
    ZeroOrOne,
}

/// A parsed `COMPOUNDRULE` row.
#[derive(Debug, Clone)]
pub struct CompoundRule {
    items: Vec<(Flag, Quant)>,
    /// Every flag the rule mentions; used to pre-filter candidate parts.
    flags: FlagSet,
}

/// Parse failure: empty group, dangling quantifier, or unclosed paren.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadCompoundRule(pub String);

impl CompoundRule {
    pub fn parse(text: &str, style: FlagStyle) -> Result<CompoundRule, BadCompoundRule> {
        let bad = || BadCompoundRule(text.to_string());
        let mut items: Vec<(Flag, Quant)> = Vec::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            let flag = match c {
                '(' => {
                    let mut group = String::new();
                    let mut closed = false;
                    for gc in chars.by_ref() {
                        if gc == ')' {
                            closed = true;
                            break;
                        }
                        group.push(gc);
                    }
                    if !closed || group.is_empty() {
                        return Err(bad());
                    }
                    style
                        .parse_flag(&group)
                        .ok()
                        .flatten()
                        .ok_or_else(bad)?
                }
                '*' | '?' => return Err(bad()),
                other => Flag::scalar(other),
            };
            let quant = match chars.peek() {
                Some('*') => {
                    chars.next();
                    Quant::ZeroOrMore
                }
                Some('?') => {
                    chars.next();
                    Quant::ZeroOrOne
                }
                _ => Quant::One,
            };
            items.push((flag, quant));
        }
        if items.is_empty() {
            return Err(bad());
        }
        let flags = items.iter().map(|&(f, _)| f).collect();
        Ok(CompoundRule { items, flags })
    }

    /// The flags this rule mentions.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Position-set after consuming `parts`, or `None` when the rule is
    /// already dead. Position `i` means "items `0..i` are satisfied".
    fn run(&self, parts: &[&FlagSet]) -> Option<Vec<usize>> {
        let mut states = self.closure(vec![0]);
        for part in parts {
            let mut next = Vec::new();
            for &i in &states {
                if i >= self.items.len() {
                    continue;
                }
                let (flag, quant) = self.items[i];
                if part.contains(flag) {
                    // A starred item may consume again; others move on.
                    let target = if quant == Quant::ZeroOrMore { i } else { i + 1 };
                    if !next.contains(&target) {
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                return None;
            }
            states = self.closure(next);
        }
        Some(states)
    }

    /// Epsilon closure: optional and starred items may be skipped.
    fn closure(&self, mut states: Vec<usize>) -> Vec<usize> {
        let mut idx = 0;
        while idx < states.len() {
            let i = states[idx];
            if i < self.items.len() && self.items[i].1 != Quant::One {
                let skipped = i + 1;
                if !states.contains(&skipped) {
                    states.push(skipped);
                }
            }
            idx += 1;
        }
        states
    }

    /// Does some flag choice over `parts` match the whole rule?
    pub fn full_match(&self, parts: &[&FlagSet]) -> bool {
        match self.run(parts) {
            Some(states) => states.contains(&self.items.len()),
            None => false,
        }
    }

    /// Could `parts` be extended into a full match?
    pub fn partial_match(&self, parts: &[&FlagSet]) -> bool {
        self.run(parts).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> CompoundRule {
        CompoundRule::parse(text, FlagStyle::Short).expect("rule parses")
    }

    fn set(flags: &str) -> FlagSet {
        flags.chars().map(Flag::scalar).collect()
    }

    fn full(r: &CompoundRule, parts: &[&str]) -> bool {
        let sets: Vec<FlagSet> = parts.iter().map(|p| set(p)).collect();
        let refs: Vec<&FlagSet> = sets.iter().collect();
        r.full_match(&refs)
    }

    fn partial(r: &CompoundRule, parts: &[&str]) -> bool {
        let sets: Vec<FlagSet> = parts.iter().map(|p| set(p)).collect();
        let refs: Vec<&FlagSet> = sets.iter().collect();
        r.partial_match(&refs)
    }

    #[test]
    fn plain_sequence() {
        let r = rule("ABC");
        assert!(full(&r, &["A", "B", "C"]));
        assert!(!full(&r, &["A", "B"]));
        assert!(!full(&r, &["A", "C", "B"]));
    }

    #[test]
    fn star_absorbs_any_count() {
        let r = rule("AB*C");
        assert!(full(&r, &["A", "C"]));
        assert!(full(&r, &["A", "B", "C"]));
        assert!(full(&r, &["A", "B", "B", "B", "C"]));
        assert!(!full(&r, &["B", "C"]));
    }

    #[test]
    fn question_is_optional() {
        let r = rule("AB?C");
        assert!(full(&r, &["A", "C"]));
        assert!(full(&r, &["A", "B", "C"]));
        assert!(!full(&r, &["A", "B", "B", "C"]));
    }

    #[test]
    fn partial_match_prefixes() {
        let r = rule("AB*C");
        assert!(partial(&r, &["A"]));
        assert!(partial(&r, &["A", "B"]));
        assert!(partial(&r, &["A", "B", "C"])); // complete is also a prefix
        assert!(!partial(&r, &["C"]));
        assert!(!partial(&r, &["A", "C", "B"]));
    }

    #[test]
    fn part_with_several_flags_chooses_one() {
        // A part carrying both A and B can serve as either.
        let r = rule("AB");
        assert!(full(&r, &["AB", "AB"]));
        assert!(!full(&r, &["AB"]));
    }

    #[test]
    fn parenthesized_groups() {
        let r = CompoundRule::parse("(aa)(bb)*(cc)", FlagStyle::Long).expect("parses");
        let aa: FlagSet = vec![Flag::pair('a', 'a')].into_iter().collect();
        let cc: FlagSet = vec![Flag::pair('c', 'c')].into_iter().collect();
        assert!(r.full_match(&[&aa, &cc]));
    }

    #[test]
    fn malformed_rules_are_rejected() {
        assert!(CompoundRule::parse("", FlagStyle::Short).is_err());
        assert!(CompoundRule::parse("*A", FlagStyle::Short).is_err());
        assert!(CompoundRule::parse("(ab", FlagStyle::Long).is_err());
    }

    #[test]
    fn scenario_rule_red_green() {
        // The classic `AB*C` color fixture.
        let r = rule("AB*C");
        assert!(full(&r, &["A", "C"])); // redgreen
        assert!(full(&r, &["A", "B", "B", "C"])); // redbluebluegreen
        assert!(!full(&r, &["A", "A"])); // redred
    }
}
