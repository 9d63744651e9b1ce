// The smaller row tables of the affix description: REP replacements,
// BREAK patterns, ICONV/OCONV character conversions, MAP equivalence
// classes, and CHECKCOMPOUNDPATTERN boundary patterns.

use lexis_core::flags::Flag;

// ---------------------------------------------------------------------------
// REP
// ---------------------------------------------------------------------------

/// One `REP` row: a common misspelling pattern and its correction.
///
/// `^`/`$` anchor the pattern to the word's start/end; `_` in either side
/// denotes a space (so a replacement can produce a two-word suggestion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepPattern {
    pub from: String,
    pub to: String,
    pub at_start: bool,
    pub at_end: bool,
}

impl RepPattern {
    pub fn parse(from: &str, to: &str) -> RepPattern {
        let at_start = from.starts_with('^');
        let at_end = from.ends_with('$');
        let from = from
            .trim_start_matches('^')
            .trim_end_matches('$')
            .replace('_', " ");
        RepPattern {
            from,
            to: to.replace('_', " "),
            at_start,
            at_end,
        }
    }

    /// Byte positions in `word` where this pattern applies.
    pub fn positions(&self, word: &str) -> Vec<usize> {
        if self.from.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (pos, _) in word.match_indices(&self.from) {
            if self.at_start && pos != 0 {
                continue;
            }
            if self.at_end && pos + self.from.len() != word.len() {
                continue;
            }
            out.push(pos);
        }
        out
    }

    /// `word` with the occurrence at byte position `pos` replaced.
    pub fn apply_at(&self, word: &str, pos: usize) -> String {
        let mut out = String::with_capacity(word.len() + self.to.len());
        out.push_str(&word[..pos]);
        out.push_str(&self.to);
        out.push_str(&word[pos + self.from.len()..]);
        out
    }
}

// ---------------------------------------------------------------------------
// BREAK
// ---------------------------------------------------------------------------

/// Where a `BREAK` pattern may split a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakSide {
    /// `^…`: the word's start (the matched text is dropped).
    Start,
    /// `…$`: the word's end.
    End,
    /// Anywhere inside the word (both remaining sides must check).
    Middle,
}

/// One `BREAK` row. The default table is `^-`, `-`, `-$`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPattern {
    pub text: String,
    pub side: BreakSide,
}

impl BreakPattern {
    pub fn parse(row: &str) -> BreakPattern {
        if let Some(rest) = row.strip_prefix('^') {
            BreakPattern {
                text: rest.to_string(),
                side: BreakSide::Start,
            }
        } else if let Some(rest) = row.strip_suffix('$') {
            BreakPattern {
                text: rest.to_string(),
                side: BreakSide::End,
            }
        } else {
            BreakPattern {
                text: row.to_string(),
                side: BreakSide::Middle,
            }
        }
    }

    pub fn default_table() -> Vec<BreakPattern> {
        vec![
            BreakPattern::parse("^-"),
            BreakPattern::parse("-"),
            BreakPattern::parse("-$"),
        ]
    }
}

// ---------------------------------------------------------------------------
// ICONV / OCONV
// ---------------------------------------------------------------------------

/// An input or output conversion table: longest-match-at-position
/// substitution over the whole word.
#[derive(Debug, Clone, Default)]
pub struct ConvTable {
    /// Sorted by pattern length, longest first, so the first match at a
    /// position is the longest one.
    pairs: Vec<(String, String)>,
}

impl ConvTable {
    pub fn new(mut pairs: Vec<(String, String)>) -> ConvTable {
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        pairs.retain(|(from, _)| !from.is_empty());
        ConvTable { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Apply the table to a word. Untouched input is returned as-is.
    pub fn apply(&self, word: &str) -> String {
        if self.pairs.is_empty() {
            return word.to_string();
        }
        let mut out = String::with_capacity(word.len());
        let mut rest = word;
        'outer: while !rest.is_empty() {
            for (from, to) in &self.pairs {
                if let Some(tail) = rest.strip_prefix(from.as_str()) {
                    out.push_str(to);
                    rest = tail;
                    continue 'outer;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
        out
    }
}

// ---------------------------------------------------------------------------
// MAP
// ---------------------------------------------------------------------------

/// One `MAP` row: a class of interchangeable spellings. Parenthesized
/// members are multi-character (`(ss)(ß)`).
pub fn parse_map_row(row: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = row.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            let mut member = String::new();
            for mc in chars.by_ref() {
                if mc == ')' {
                    break;
                }
                member.push(mc);
            }
            if !member.is_empty() {
                out.push(member);
            }
        } else {
            out.push(c.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CHECKCOMPOUNDPATTERN
// ---------------------------------------------------------------------------

/// One `CHECKCOMPOUNDPATTERN` row: a forbidden shape at a compound
/// boundary. `endchars[/flag] beginchars[/flag] [replacement]`.
#[derive(Debug, Clone)]
pub struct CompoundPattern {
    /// Required ending of the left part.
    pub left: String,
    /// Required beginning of the right part.
    pub right: String,
    /// If set, the left part must also carry this flag.
    pub left_flag: Option<Flag>,
    /// If set, the right part must also carry this flag.
    pub right_flag: Option<Flag>,
    /// Simplified-spelling replacement for the boundary (parsed, kept for
    /// completeness; pattern matching alone decides rejection).
    pub replacement: Option<String>,
}

impl CompoundPattern {
    /// Text-level match at a boundary: does `left` end and `right` begin
    /// with this pattern's anchors? Flag conditions are the caller's to
    /// check, since part flags live on the engine's side.
    pub fn matches_texts(&self, left: &str, right: &str) -> bool {
        left.ends_with(&self.left) && right.starts_with(&self.right)
    }
}
