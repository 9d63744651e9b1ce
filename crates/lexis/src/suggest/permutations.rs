// The edit operators: each takes a misspelling and produces candidate
// respellings for one class of typing error. Candidates are cheap to
// produce and validated by the caller, so these stay dumb and ordered --
// the order within each operator is part of the suggestion contract.

use lexis_aff::tables::RepPattern;

/// Swaps and moves beyond this distance stop being plausible typos.
const MAX_CHAR_DISTANCE: usize = 4;

/// Apply one REP rule at one position each. A replacement containing a
/// space produces a two-word candidate in one string.
pub fn replchars(word: &str, rep: &[RepPattern]) -> Vec<String> {
    if word.chars().count() < 2 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for pattern in rep {
        for pos in pattern.positions(word) {
            out.push(pattern.apply_at(word, pos));
        }
    }
    out
}

/// Substitute related characters from MAP equivalence classes, including
/// several positions at once.
pub fn mapchars(word: &str, map: &[Vec<String>]) -> Vec<String> {
    if word.chars().count() < 2 || map.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    mapchars_inner(word, 0, map, &mut out);
    out
}

fn mapchars_inner(word: &str, start: usize, map: &[Vec<String>], out: &mut Vec<String>) {
    if start >= word.len() {
        return;
    }
    for class in map {
        for member in class {
            let Some(found) = word[start..].find(member.as_str()) else {
                continue;
            };
            let pos = start + found;
            for other in class {
                if other == member {
                    continue;
                }
                let mut replaced = String::with_capacity(word.len());
                replaced.push_str(&word[..pos]);
                replaced.push_str(other);
                replaced.push_str(&word[pos + member.len()..]);
                let next = pos + other.len();
                out.push(replaced.clone());
                mapchars_inner(&replaced, next, map, out);
            }
        }
    }
}

/// Swap adjacent characters; for 4- and 5-letter words also try the
/// double swaps that fix "ahev" -> "have" and "owudl" -> "would".
pub fn swapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for i in 0..chars.len() - 1 {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        out.push(swapped.into_iter().collect());
    }
    let n = chars.len();
    if n == 4 || n == 5 {
        let mut double: Vec<char> = vec![chars[1], chars[0]];
        if n == 5 {
            double.push(chars[2]);
        }
        double.push(chars[n - 1]);
        double.push(chars[n - 2]);
        out.push(double.into_iter().collect());
        if n == 5 {
            out.push(
                [chars[0], chars[2], chars[1], chars[4], chars[3]]
                    .into_iter()
                    .collect(),
            );
        }
    }
    out
}

/// Swap non-adjacent characters up to MAX_CHAR_DISTANCE apart.
pub fn longswapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for first in 0..chars.len() {
        let limit = (first + MAX_CHAR_DISTANCE).min(chars.len().saturating_sub(1));
        for second in first + 2..=limit {
            let mut swapped = chars.clone();
            swapped.swap(first, second);
            out.push(swapped.into_iter().collect());
        }
    }
    out
}

/// Replace one character with each character of the TRY list.
pub fn badchar(word: &str, try_chars: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for replacement in try_chars.chars() {
        for (i, &original) in chars.iter().enumerate() {
            if original == replacement {
                continue;
            }
            let mut candidate = chars.clone();
            candidate[i] = replacement;
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

/// Replace one character with its keyboard neighbors (KEY rows separated
/// by `|`), and with its own uppercase form.
pub fn badcharkey(word: &str, key: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let layout: Vec<char> = key.chars().collect();
    let mut out = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        let upper: Vec<char> = c.to_uppercase().collect();
        if upper != [c] {
            let mut candidate: Vec<char> = chars[..i].to_vec();
            candidate.extend(upper);
            candidate.extend_from_slice(&chars[i + 1..]);
            out.push(candidate.into_iter().collect());
        }
        for (pos, &layout_char) in layout.iter().enumerate() {
            if layout_char != c {
                continue;
            }
            if pos > 0 && layout[pos - 1] != '|' {
                let mut candidate = chars.clone();
                candidate[i] = layout[pos - 1];
                out.push(candidate.into_iter().collect());
            }
            if pos + 1 < layout.len() && layout[pos + 1] != '|' {
                let mut candidate = chars.clone();
                candidate[i] = layout[pos + 1];
                out.push(candidate.into_iter().collect());
            }
        }
    }
    out
}

/// Delete one character.
pub fn extrachar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    (0..chars.len())
        .map(|i| {
            let mut candidate = chars.clone();
            candidate.remove(i);
            candidate.into_iter().collect()
        })
        .collect()
}

/// Insert each TRY character at every position.
pub fn forgotchar(word: &str, try_chars: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for insertion in try_chars.chars() {
        for i in 0..=chars.len() {
            let mut candidate = chars.clone();
            candidate.insert(i, insertion);
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

/// Move one character two to four positions away, in both directions.
pub fn movechar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for from in 0..chars.len() {
        let limit = (from + MAX_CHAR_DISTANCE).min(chars.len() - 1);
        for to in from + 2..=limit {
            // remove at `from`, reinsert so the char lands at index `to`
            let mut candidate = chars.clone();
            let c = candidate.remove(from);
            candidate.insert(to, c);
            out.push(candidate.into_iter().collect());
        }
    }
    for from in (0..chars.len()).rev() {
        let lower = from.saturating_sub(MAX_CHAR_DISTANCE);
        for to in (lower..from.saturating_sub(1)).rev() {
            let mut candidate = chars.clone();
            let c = candidate.remove(from);
            candidate.insert(to, c);
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

/// Undo a doubled bigram: "vacacation" -> "vacation".
pub fn doubletwochars(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 5 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for i in 3..chars.len() {
        if chars[i] == chars[i - 2] && chars[i - 1] == chars[i - 3] {
            let mut candidate = chars.clone();
            candidate.drain(i - 1..=i);
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

/// All splits into two non-empty words.
pub fn twowords(word: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = word.chars().collect();
    (1..chars.len())
        .map(|i| {
            (
                chars[..i].iter().collect(),
                chars[i..].iter().collect(),
            )
        })
        .collect()
}
