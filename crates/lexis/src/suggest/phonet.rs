// Phonetic suggestion pass: rank dictionary words by similarity of their
// PHONE-table keys to the misspelling's key. Catches errors that spell
// differently but sound alike ("fonetik" -> "phonetic").

use lexis_aff::phonet::PhoneTable;
use lexis_aff::Word;
use lexis_core::casing::Casing;

use super::ngram::{ngram, root_score, NgramOpts, ScoresList};

/// Root pool retained from the dictionary scan.
const MAX_ROOTS: usize = 100;

/// Produce phonetic suggestions, best first. The caller bounds how many
/// it takes.
pub fn phonet_suggest<'a>(
    misspelling: &str,
    roots: impl Iterator<Item = &'a Word>,
    table: &PhoneTable,
    casing: Casing,
) -> Vec<String> {
    let miss = casing.lower(misspelling);
    let miss_len = miss.chars().count() as i64;
    let miss_key = table.encode(&miss);

    let mut pool = ScoresList::new(MAX_ROOTS);
    for word in roots {
        if (word.stem.chars().count() as i64 - miss_len).abs() > 3 {
            continue;
        }
        let mut score = root_score(&miss, &word.stem);
        for alt in &word.alt_spellings {
            score = score.max(root_score(&miss, alt));
        }
        if score > 2 {
            pool.add(score, word);
        }
    }

    let mut keyed = ScoresList::new(MAX_ROOTS);
    for (_, word) in pool.finish() {
        let word_key = table.encode(&casing.lower(&word.stem));
        let score = 2 * ngram(
            miss_key.chars().count().max(1),
            &miss_key,
            &word_key,
            NgramOpts {
                any_mismatch: true,
                ..NgramOpts::default()
            },
        );
        keyed.add(score, word.stem.clone());
    }

    keyed.finish().into_iter().map(|(_, stem)| stem).collect()
}
