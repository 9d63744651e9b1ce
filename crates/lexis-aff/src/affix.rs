// Prefix and suffix entries and the indexes built over them.
//
// An entry carries its class flag, the strip/add strings, an attachment
// condition and the auxiliary flags it contributes to a word form. The
// index answers the two queries decomposition needs: "which entries could
// explain this surface?" (trie walk over the add-strings) and "which
// entries belong to this class flag?".

use hashbrown::HashMap;
use lexis_core::flags::{Flag, FlagSet};

use crate::condition::Condition;
use crate::trie::Trie;

/// A prefix entry (`PFX` row).
#[derive(Debug, Clone)]
pub struct Prefix {
    /// The class flag grouping this entry; words opt in by carrying it.
    pub flag: Flag,
    /// May combine with a cross-product-capable suffix.
    pub crossproduct: bool,
    /// Removed from the stem's start before `add` is attached.
    pub strip: String,
    /// The surface text this prefix contributes.
    pub add: String,
    /// Constraint on the start of the stem this prefix attaches to.
    pub condition: Condition,
    /// Flags this prefix contributes to the word form (`add/flags`).
    pub flags: FlagSet,
}

impl Prefix {
    /// Whether this entry can explain `surface`: the surface begins with
    /// `add`, and the stem restored by [`Prefix::apply`] satisfies the
    /// condition.
    pub fn on(&self, surface: &str) -> bool {
        match surface.strip_prefix(&self.add) {
            Some(rest) => self
                .condition
                .matches_start(self.strip.chars().chain(rest.chars())),
            None => false,
        }
    }

    /// Undo this prefix: strip `add` off the front, restore `strip`.
    /// Only meaningful when [`Prefix::on`] holds.
    pub fn apply(&self, surface: &str) -> String {
        let rest = surface.strip_prefix(&self.add).unwrap_or(surface);
        let mut stem = String::with_capacity(self.strip.len() + rest.len());
        stem.push_str(&self.strip);
        stem.push_str(rest);
        stem
    }
}

/// A suffix entry (`SFX` row).
#[derive(Debug, Clone)]
pub struct Suffix {
    pub flag: Flag,
    pub crossproduct: bool,
    /// Removed from the stem's end before `add` is attached.
    pub strip: String,
    pub add: String,
    /// Constraint on the end of the stem this suffix attaches to.
    pub condition: Condition,
    pub flags: FlagSet,
}

impl Suffix {
    pub fn on(&self, surface: &str) -> bool {
        match surface.strip_suffix(&self.add) {
            Some(rest) => self
                .condition
                .matches_end(self.strip.chars().rev().chain(rest.chars().rev())),
            None => false,
        }
    }

    /// Undo this suffix: strip `add` off the end, restore `strip`.
    pub fn apply(&self, surface: &str) -> String {
        let rest = surface.strip_suffix(&self.add).unwrap_or(surface);
        let mut stem = String::with_capacity(rest.len() + self.strip.len());
        stem.push_str(rest);
        stem.push_str(&self.strip);
        stem
    }
}

/// Compatibility of an affix's auxiliary flags with a requirement context.
///
/// An empty `required` set means "no requirement"; otherwise at least one
/// required flag must be present. No forbidden flag may be present.
pub fn compatible(flags: &FlagSet, required: &[Flag], forbidden: &[Flag]) -> bool {
    (required.is_empty() || required.iter().any(|&f| flags.contains(f)))
        && forbidden.iter().all(|&f| !flags.contains(f))
}

/// Flag- and substring-keyed index over one side's affix entries.
#[derive(Debug)]
pub struct AffixIndex<A> {
    entries: Vec<A>,
    by_flag: HashMap<Flag, Vec<u32>>,
    trie: Trie<u32>,
}

impl<A> Default for AffixIndex<A> {
    fn default() -> Self {
        AffixIndex {
            entries: Vec::new(),
            by_flag: HashMap::new(),
            trie: Trie::new(),
        }
    }
}

impl<A> AffixIndex<A> {
    /// Build from entries, given how to read each entry's class flag and
    /// its trie key (add-string, reversed for suffixes).
    pub fn build(
        entries: Vec<A>,
        flag_of: impl Fn(&A) -> Flag,
        key_of: impl Fn(&A) -> Vec<char>,
    ) -> Self {
        let mut by_flag: HashMap<Flag, Vec<u32>> = HashMap::new();
        let mut trie = Trie::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_flag.entry(flag_of(entry)).or_default().push(idx as u32);
            trie.insert(key_of(entry), idx as u32);
        }
        AffixIndex {
            entries,
            by_flag,
            trie,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.entries.iter()
    }

    /// Entries whose class flag is `flag`.
    pub fn with_flag(&self, flag: Flag) -> impl Iterator<Item = &A> + '_ {
        self.by_flag
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.entries[idx as usize])
    }

    /// Entries whose add-string is a prefix of the walked key. For the
    /// suffix index, pass the surface reversed.
    pub fn candidates<I>(&self, key: I) -> Candidates<'_, A, I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        Candidates {
            entries: &self.entries,
            segments: self.trie.segments(key),
            current: [].iter(),
        }
    }
}

/// Iterator over the entries reachable along a key path. The entry
/// references borrow the index; the key may borrow shorter-lived data.
pub struct Candidates<'t, A, I> {
    entries: &'t [A],
    segments: crate::trie::Segments<'t, u32, I>,
    current: std::slice::Iter<'t, u32>,
}

impl<'t, A, I: Iterator<Item = char>> Iterator for Candidates<'t, A, I> {
    type Item = &'t A;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&idx) = self.current.next() {
                return Some(&self.entries[idx as usize]);
            }
            self.current = self.segments.next()?.iter();
        }
    }
}
