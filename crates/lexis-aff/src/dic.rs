// The word list: stems, their flag sets and morphological data, and the
// homonym index the engine queries.
//
// Entry syntax: `stem[/flags][ key:value ...]`. A `\/` is a literal slash
// in the stem (stems may also contain spaces, so morphological fields are
// recognized by their `key:value` shape rather than by position).

use hashbrown::HashMap;
use lexis_core::casing::CapType;
use lexis_core::flags::{Flag, FlagSet};

use crate::aff::Aff;
use crate::ParseError;

/// One dictionary entry.
#[derive(Debug, Clone)]
pub struct Word {
    pub stem: String,
    /// Capitalization pattern of the stem, precomputed at load.
    pub captype: CapType,
    pub flags: FlagSet,
    /// Morphological `key:value` fields, in entry order.
    pub data: Vec<(String, String)>,
    /// `ph:` fields: known misspellings / alternate spellings of the stem.
    pub alt_spellings: Vec<String>,
}

impl Word {
    /// Values for one morphological key.
    pub fn morph<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.data
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The parsed word list with stem indexes.
#[derive(Debug)]
pub struct Dic {
    words: Vec<Word>,
    /// stem -> indexes of its homonyms.
    index: HashMap<Box<str>, Vec<u32>>,
    /// lowercased stem -> indexes (for case-insensitive fallback lookup).
    lower_index: HashMap<Box<str>, Vec<u32>>,
}

impl Dic {
    pub fn parse(text: &str, aff: &Aff) -> Result<Dic, ParseError> {
        let mut words = Vec::new();
        let mut lines = text.lines().enumerate();

        // The first non-blank line may be the entry count; it is advisory.
        for (idx, line) in lines.by_ref() {
            let line = line.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            if !line.chars().all(|c| c.is_ascii_digit()) {
                parse_entry(line, idx + 1, aff, &mut words)?;
            }
            break;
        }
        for (idx, line) in lines {
            let line = line.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            parse_entry(line, idx + 1, aff, &mut words)?;
        }

        let mut index: HashMap<Box<str>, Vec<u32>> = HashMap::new();
        let mut lower_index: HashMap<Box<str>, Vec<u32>> = HashMap::new();
        for (idx, word) in words.iter().enumerate() {
            index
                .entry(word.stem.as_str().into())
                .or_default()
                .push(idx as u32);
            lower_index
                .entry(aff.casing.lower(&word.stem).into_boxed_str())
                .or_default()
                .push(idx as u32);
        }
        Ok(Dic {
            words,
            index,
            lower_index,
        })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Entries whose stem equals `stem` exactly.
    pub fn homonyms(&self, stem: &str) -> impl Iterator<Item = &Word> {
        self.index
            .get(stem)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i as usize])
    }

    /// Entries whose lowercased stem equals the lowercased query.
    pub fn homonyms_ignorecase<'a>(&'a self, stem_lower: &str) -> impl Iterator<Item = &'a Word> {
        self.lower_index
            .get(stem_lower)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i as usize])
    }

    /// Does any homonym of `stem` carry `flag`? With `all`, every homonym
    /// must (and there must be at least one).
    pub fn has_flag(&self, stem: &str, flag: Option<Flag>, all: bool) -> bool {
        let Some(flag) = flag else { return false };
        let mut any_word = false;
        for word in self.homonyms(stem) {
            if word.flags.contains(flag) {
                if !all {
                    return true;
                }
            } else if all {
                return false;
            }
            any_word = true;
        }
        all && any_word
    }
}

/// Split an entry line into its stem/flags part and morphological fields.
///
/// Morph fields look like `po:noun` / `ph:misspelling`; stems may contain
/// spaces ("a lot"), so everything before the first such token belongs to
/// the stem.
fn split_morph(line: &str) -> (&str, Vec<&str>) {
    let is_morph_token = |token: &str| {
        token
            .split_once(':')
            .is_some_and(|(key, value)| {
                !key.is_empty()
                    && !value.is_empty()
                    && key.chars().all(|c| c.is_ascii_alphanumeric())
            })
    };
    if let Some((head, tail)) = line.split_once('\t') {
        return (head.trim(), tail.split_whitespace().collect());
    }
    let mut boundary = line.len();
    let mut morph = Vec::new();
    for (pos, token) in line
        .split_whitespace()
        .map(|t| (t.as_ptr() as usize - line.as_ptr() as usize, t))
    {
        if morph.is_empty() && !is_morph_token(token) {
            continue;
        }
        if morph.is_empty() {
            boundary = pos;
        }
        morph.push(token);
    }
    (line[..boundary].trim_end(), morph)
}

/// Split the stem/flags part at the first unescaped slash, unescaping
/// `\/` in the stem.
fn split_flags(entry: &str) -> (String, Option<&str>) {
    let bytes = entry.as_bytes();
    let mut slash = None;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == b'/' {
            slash = Some(i);
            break;
        }
        i += 1;
    }
    match slash {
        Some(pos) => (entry[..pos].replace("\\/", "/"), Some(&entry[pos + 1..])),
        None => (entry.replace("\\/", "/"), None),
    }
}

fn parse_entry(
    line: &str,
    line_no: usize,
    aff: &Aff,
    words: &mut Vec<Word>,
) -> Result<(), ParseError> {
    let (head, morph_tokens) = split_morph(line);
    let (mut stem, flag_str) = split_flags(head);
    if !aff.ignore.is_empty() {
        stem.retain(|c| !aff.ignore.contains(&c));
    }
    if stem.is_empty() {
        return Ok(());
    }

    let flags = match flag_str {
        Some(s) => aff.decode_flags(s).map_err(|e| e.at(line_no))?,
        None => FlagSet::empty(),
    };

    let mut data = Vec::new();
    let mut alt_spellings = Vec::new();
    let mut push_pair = |key: &str, value: &str| {
        if key == "ph" {
            alt_spellings.push(value.to_string());
        }
        data.push((key.to_string(), value.to_string()));
    };
    for token in morph_tokens {
        if let Some(expanded) = aff.decode_morph(token) {
            for item in expanded {
                if let Some((key, value)) = item.split_once(':') {
                    push_pair(key, value);
                }
            }
        } else if let Some((key, value)) = token.split_once(':') {
            push_pair(key, value);
        }
    }

    words.push(Word {
        captype: aff.casing.guess(&stem),
        stem,
        flags,
        data,
        alt_spellings,
    });
    Ok(())
}
