// N-gram similarity ranking: when no edit operator finds a correction,
// rank the whole dictionary by string similarity to the misspelling.
//
// Three tiers refine one another: a cheap 3-gram root score over stems
// picks ~100 roots, a rough any-length n-gram score over their affixed
// forms picks ~200 guesses, and a precise LCS-based score orders the
// final handful. Scores are bucketed: above 1000 is "certain", below
// -100 is a last resort.

use lexis_aff::{Aff, Word};

/// Root pool retained from the whole-dictionary scan.
const MAX_ROOTS: usize = 100;
/// Guess pool retained from affixed-form expansion.
const MAX_GUESSES: usize = 200;

// ---------------------------------------------------------------------------
// Bounded top-N list
// ---------------------------------------------------------------------------

/// Keeps the N best (score, payload) pairs seen so far. Insertion only
/// displaces the current worst once full.
pub struct ScoresList<T> {
    capacity: usize,
    entries: Vec<(i64, T)>,
}

impl<T> ScoresList<T> {
    pub fn new(capacity: usize) -> Self {
        ScoresList {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, score: i64, payload: T) {
        if self.entries.len() < self.capacity {
            self.entries.push((score, payload));
            return;
        }
        let Some((worst_idx, &(worst, _))) = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, (s, _))| *s)
            .map(|(i, e)| (i, e))
        else {
            return;
        };
        if score > worst {
            self.entries[worst_idx] = (score, payload);
        }
    }

    /// The retained entries, best first.
    pub fn finish(mut self) -> Vec<(i64, T)> {
        self.entries.sort_by_key(|(s, _)| std::cmp::Reverse(*s));
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Similarity primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct NgramOpts {
    /// Penalize mismatching grams (-1, doubled at word edges).
    pub weighted: bool,
    /// Subtract for any length difference beyond 2.
    pub any_mismatch: bool,
    /// Subtract only when the candidate is longer (root scoring).
    pub longer_worse: bool,
}

/// Sum over n in 1..=max_size of the count of s1's n-grams occurring in
/// s2, with the configured length penalties.
pub fn ngram(max_size: usize, s1: &str, s2: &str, opts: NgramOpts) -> i64 {
    let c1: Vec<char> = s1.chars().collect();
    let c2: Vec<char> = s2.chars().collect();
    let l1 = c1.len();
    let l2 = c2.len();
    if l2 == 0 {
        return 0;
    }
    let mut score: i64 = 0;
    for n in 1..=max_size {
        if n > l1 {
            break;
        }
        let mut ns: i64 = 0;
        for pos in 0..=l1 - n {
            if contains_subslice(&c2, &c1[pos..pos + n]) {
                ns += 1;
            } else if opts.weighted {
                ns -= 1;
                if pos == 0 || pos + n == l1 {
                    ns -= 1; // an edge mismatch weighs double
                }
            }
        }
        score += ns;
        if ns < 2 && !opts.weighted {
            break;
        }
    }

    let diff: i64 = if opts.longer_worse {
        l2 as i64 - l1 as i64 - 2
    } else if opts.any_mismatch {
        (l2 as i64 - l1 as i64).abs() - 2
    } else {
        0
    };
    if diff > 0 {
        score -= diff;
    }
    score
}

fn contains_subslice(haystack: &[char], needle: &[char]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Length of the longest common subsequence.
pub fn lcs_len(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Length of the common prefix. A first character differing only by
/// case still anchors, but contributes alone.
pub fn left_common_substring(s1: &str, s2: &str) -> usize {
    let mut a = s1.chars();
    let mut b = s2.chars();
    let (Some(first_a), Some(first_b)) = (a.next(), b.next()) else {
        return 0;
    };
    if first_a != first_b {
        if first_a.to_lowercase().eq(first_b.to_lowercase()) {
            return 1;
        }
        return 0;
    }
    1 + a.zip(b).take_while(|(x, y)| x == y).count()
}

/// Count of positions holding the same character, and whether the two
/// strings differ by exactly one transposition.
pub fn common_char_positions(s1: &str, s2: &str) -> (usize, bool) {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut same = 0;
    let mut diffs: Vec<usize> = Vec::new();
    for (i, (ca, cb)) in a.iter().zip(&b).enumerate() {
        if ca == cb {
            same += 1;
        } else {
            diffs.push(i);
        }
    }
    let is_swap = a.len() == b.len()
        && diffs.len() == 2
        && a[diffs[0]] == b[diffs[1]]
        && a[diffs[1]] == b[diffs[0]];
    (same, is_swap)
}

// ---------------------------------------------------------------------------
// The three scoring tiers
// ---------------------------------------------------------------------------

/// First tier: stem similarity for the whole-dictionary scan.
pub fn root_score(misspelling: &str, stem: &str) -> i64 {
    ngram(
        3,
        misspelling,
        &stem.to_lowercase(),
        NgramOpts {
            longer_worse: true,
            ..NgramOpts::default()
        },
    ) + left_common_substring(misspelling, &stem.to_lowercase()) as i64
}

/// Second tier: full-length n-gram score over an affixed form.
pub fn rough_affix_score(misspelling: &str, candidate: &str) -> i64 {
    ngram(
        misspelling.chars().count(),
        misspelling,
        candidate,
        NgramOpts {
            any_mismatch: true,
            ..NgramOpts::default()
        },
    ) + left_common_substring(misspelling, candidate) as i64
}

/// Rough scores below this are not worth precise rescoring. Derived by
/// scoring the misspelling against mangled copies of itself.
pub fn score_threshold(misspelling: &str) -> i64 {
    let chars: Vec<char> = misspelling.chars().collect();
    let mut threshold = 0i64;
    for start in 1..4.min(chars.len().max(1)) {
        let mut mangled = chars.clone();
        let mut pos = start;
        while pos < mangled.len() {
            mangled[pos] = '*';
            pos += 4;
        }
        let mangled: String = mangled.into_iter().collect();
        threshold += ngram(
            chars.len(),
            misspelling,
            &mangled,
            NgramOpts {
                any_mismatch: true,
                ..NgramOpts::default()
            },
        );
    }
    threshold / 3 - 1
}

/// Third tier: the precise score that orders the final guesses.
///
/// Identical-modulo-case guesses land above 1000 ("certain"); guesses
/// whose weighted bigram similarity falls under the MAXDIFF-derived cut
/// are pushed below -100 ("last resort").
pub fn precise_affix_score(
    misspelling: &str,
    guess_lower: &str,
    diff_factor: f64,
    base: i64,
    has_phonetic: bool,
) -> i64 {
    let n = misspelling.chars().count();
    let g = guess_lower.chars().count();
    let lcs = lcs_len(misspelling, guess_lower);

    if n == g && n == lcs {
        return base + 2000;
    }

    let weighted = NgramOpts {
        weighted: true,
        any_mismatch: true,
        ..NgramOpts::default()
    };
    let bigrams = ngram(2, misspelling, guess_lower, weighted)
        + ngram(2, guess_lower, misspelling, weighted);

    let mut score = 2 * lcs as i64 - (n as i64 - g as i64).abs();
    score += left_common_substring(misspelling, guess_lower) as i64;
    let (same, is_swap) = common_char_positions(misspelling, guess_lower);
    if same > 0 {
        score += 1;
    }
    if is_swap {
        score += 10;
    }
    score += ngram(
        4,
        misspelling,
        guess_lower,
        NgramOpts {
            any_mismatch: true,
            ..NgramOpts::default()
        },
    );
    score += bigrams;

    let cut = if has_phonetic {
        n as f64 * diff_factor
    } else {
        (n + g) as f64 * diff_factor
    };
    if (bigrams as f64) < cut {
        score -= 1000;
    }
    score
}

// ---------------------------------------------------------------------------
// The ranking pass
// ---------------------------------------------------------------------------

/// Produce up to MAXNGRAMSUGS n-gram suggestions, best first. `roots`
/// is the precomputed suggestible subset of the dictionary.
pub fn ngram_suggest<'a>(
    misspelling: &str,
    roots: impl Iterator<Item = &'a Word>,
    aff: &Aff,
    has_phonetic: bool,
) -> Vec<String> {
    let miss = aff.casing.lower(misspelling);
    let miss_len = miss.chars().count() as i64;

    let mut root_pool = ScoresList::new(MAX_ROOTS);
    for word in roots {
        if (word.stem.chars().count() as i64 - miss_len).abs() > 4 {
            continue;
        }
        let mut score = root_score(&miss, &word.stem);
        for alt in &word.alt_spellings {
            score = score.max(root_score(&miss, alt));
        }
        root_pool.add(score, word);
    }

    let threshold = score_threshold(&miss);
    let mut guesses = ScoresList::new(MAX_GUESSES);
    for (_, root) in root_pool.finish() {
        for form in forms_for(root, aff, &miss) {
            let score = rough_affix_score(&miss, &aff.casing.lower(&form));
            if score > threshold {
                guesses.add(score, form);
            }
        }
    }

    let diff_factor = if aff.max_diff >= 0 {
        (10.0 - aff.max_diff as f64) / 5.0
    } else {
        1.0
    };
    let mut rescored: Vec<(i64, String)> = guesses
        .finish()
        .into_iter()
        .map(|(rough, guess)| {
            let precise = precise_affix_score(
                &miss,
                &aff.casing.lower(&guess),
                diff_factor,
                rough,
                has_phonetic,
            );
            (precise, guess)
        })
        .collect();
    rescored.sort_by(|a, b| b.0.cmp(&a.0));

    filter_guesses(rescored, aff.onlymaxdiff, aff.max_ngram_sugs)
}

/// Keep only certain guesses once one is seen; admit at most one
/// last-resort guess, and only when nothing better exists.
fn filter_guesses(guesses: Vec<(i64, String)>, onlymaxdiff: bool, limit: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut only_certain = false;
    for (score, guess) in guesses {
        if out.len() >= limit {
            break;
        }
        if only_certain && score <= 1000 {
            continue;
        }
        if score > 1000 {
            only_certain = true;
        } else if score < -100 {
            if !out.is_empty() || onlymaxdiff {
                break;
            }
            only_certain = true;
        }
        out.push(guess);
    }
    out
}

/// The surface forms of a dictionary word that resemble the misspelling:
/// the stem itself plus every affixed expansion whose add-string is
/// consistent with the misspelling's edges.
fn forms_for(word: &Word, aff: &Aff, similar_to: &str) -> Vec<String> {
    let mut res = vec![word.stem.clone()];

    let suffixes: Vec<_> = word
        .flags
        .iter()
        .flat_map(|&flag| aff.suffixes.with_flag(flag))
        .filter(|suffix| {
            suffix
                .condition
                .matches_end(word.stem.chars().rev())
                && (suffix.add.is_empty() || similar_to.ends_with(&suffix.add))
                && word.stem.ends_with(&suffix.strip)
        })
        .collect();
    let prefixes: Vec<_> = word
        .flags
        .iter()
        .flat_map(|&flag| aff.prefixes.with_flag(flag))
        .filter(|prefix| {
            prefix.condition.matches_start(word.stem.chars())
                && (prefix.add.is_empty() || similar_to.starts_with(&prefix.add))
                && word.stem.starts_with(&prefix.strip)
        })
        .collect();

    for suffix in &suffixes {
        let root = &word.stem[..word.stem.len() - suffix.strip.len()];
        res.push(format!("{root}{}", suffix.add));
    }
    for prefix in &prefixes {
        let tail = &word.stem[prefix.strip.len()..];
        res.push(format!("{}{tail}", prefix.add));
    }
    for prefix in &prefixes {
        if !prefix.crossproduct {
            continue;
        }
        for suffix in &suffixes {
            if !suffix.crossproduct {
                continue;
            }
            let tail = &word.stem[prefix.strip.len()..];
            let mid = &tail[..tail.len().saturating_sub(suffix.strip.len())];
            res.push(format!("{}{mid}{}", prefix.add, suffix.add));
        }
    }
    res
}
