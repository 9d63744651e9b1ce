// Affix flag model: the four wire encodings and the flag-set representation.
//
// A flag is an opaque token naming an affix class or a directive (NOSUGGEST,
// KEEPCASE, ...). The affix description chooses one encoding for the whole
// dictionary, so values from different encodings never have to coexist and a
// single integer namespace is enough to represent all of them.

use std::fmt;

/// An affix class or directive flag.
///
/// Internally a single `u64`: one Unicode scalar for `short`/`UTF-8` flags,
/// two packed scalars for `long` flags, the plain value for `numeric` flags.
/// Flags are only ever compared for equality/order within one dictionary,
/// which uses one encoding throughout.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(u64);

impl Flag {
    /// Flag from a single Unicode scalar (`short` and `UTF-8` encodings).
    pub fn scalar(c: char) -> Self {
        Flag(c as u64)
    }

    /// Flag from a two-scalar pair (`long` encoding).
    pub fn pair(a: char, b: char) -> Self {
        Flag(((a as u64) << 32) | b as u64)
    }

    /// Flag from a decimal number (`numeric` encoding).
    pub fn numeric(n: u32) -> Self {
        Flag(n as u64)
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Best-effort readable form; exact only within a known encoding.
        if let Some(c) = char::from_u32(u32::try_from(self.0).unwrap_or(u32::MAX)) {
            if c.is_alphanumeric() {
                return write!(f, "Flag({c:?})");
            }
        }
        write!(f, "Flag({})", self.0)
    }
}

/// The flag encoding selected by the `FLAG` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagStyle {
    /// One scalar per flag (the default, no `FLAG` directive).
    #[default]
    Short,
    /// Two consecutive scalars per flag (`FLAG long`).
    Long,
    /// Comma-separated decimal numbers (`FLAG num`).
    Numeric,
    /// One scalar per flag, any Unicode scalar (`FLAG UTF-8`).
    ///
    /// Identical to [`FlagStyle::Short`] here: both decode whole scalars.
    /// The distinction matters only for byte-oriented readers.
    Utf8,
}

/// Error from decoding a flag string under a given encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagParseError {
    /// A `long` flag string with an odd number of scalars.
    UnpairedLongFlag(String),
    /// A `num` flag element that is not a decimal number.
    BadNumericFlag(String),
}

impl fmt::Display for FlagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagParseError::UnpairedLongFlag(s) => {
                write!(f, "long flag string {s:?} has an unpaired trailing character")
            }
            FlagParseError::BadNumericFlag(s) => {
                write!(f, "numeric flag {s:?} is not a decimal number")
            }
        }
    }
}

impl std::error::Error for FlagParseError {}

impl FlagStyle {
    /// Decode a whole flag string into the flags it denotes.
    ///
    /// Alias (`AF`) resolution happens a layer above; this sees only
    /// literal flag strings.
    pub fn parse_flags(self, s: &str) -> Result<Vec<Flag>, FlagParseError> {
        match self {
            FlagStyle::Short | FlagStyle::Utf8 => Ok(s.chars().map(Flag::scalar).collect()),
            FlagStyle::Long => {
                let chars: Vec<char> = s.chars().collect();
                if chars.len() % 2 != 0 {
                    return Err(FlagParseError::UnpairedLongFlag(s.to_string()));
                }
                Ok(chars.chunks(2).map(|p| Flag::pair(p[0], p[1])).collect())
            }
            FlagStyle::Numeric => s
                .split(',')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.trim()
                        .parse::<u32>()
                        .map(Flag::numeric)
                        .map_err(|_| FlagParseError::BadNumericFlag(part.to_string()))
                })
                .collect(),
        }
    }

    /// Decode the first flag of a flag string (directive arguments are
    /// single flags).
    pub fn parse_flag(self, s: &str) -> Result<Option<Flag>, FlagParseError> {
        Ok(self.parse_flags(s)?.into_iter().next())
    }
}

/// An unordered set of flags, stored sorted for binary-search membership.
///
/// Flag sets are built once (at dictionary load) and queried heavily, so a
/// compact sorted slice beats a hash set here.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FlagSet(Box<[Flag]>);

impl FlagSet {
    pub fn new(mut flags: Vec<Flag>) -> Self {
        flags.sort_unstable();
        flags.dedup();
        FlagSet(flags.into_boxed_slice())
    }

    pub fn empty() -> Self {
        FlagSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    /// Membership test against an optional flag; `None` is never a member.
    /// Directive flags are all optional, so this shape comes up constantly.
    pub fn has(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.contains(f))
    }

    /// True when `self` contains every flag of `required`.
    pub fn contains_all(&self, required: &[Flag]) -> bool {
        required.iter().all(|&f| self.contains(f))
    }

    /// True when `self` shares at least one flag with `other`.
    pub fn intersects(&self, other: &FlagSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|&f| large.contains(f))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.0.iter()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        FlagSet::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_decode_per_scalar() {
        let flags = FlagStyle::Short.parse_flags("ABc").unwrap();
        assert_eq!(
            flags,
            vec![Flag::scalar('A'), Flag::scalar('B'), Flag::scalar('c')]
        );
    }

    #[test]
    fn utf8_flags_accept_non_ascii_scalars() {
        let flags = FlagStyle::Utf8.parse_flags("äß").unwrap();
        assert_eq!(flags, vec![Flag::scalar('ä'), Flag::scalar('ß')]);
    }

    #[test]
    fn long_flags_decode_in_pairs() {
        let flags = FlagStyle::Long.parse_flags("aXbY").unwrap();
        assert_eq!(flags, vec![Flag::pair('a', 'X'), Flag::pair('b', 'Y')]);
    }

    #[test]
    fn long_flags_reject_odd_length() {
        assert_eq!(
            FlagStyle::Long.parse_flags("aXb"),
            Err(FlagParseError::UnpairedLongFlag("aXb".to_string()))
        );
    }

    #[test]
    fn numeric_flags_decode_comma_separated() {
        let flags = FlagStyle::Numeric.parse_flags("1,999,65000").unwrap();
        assert_eq!(
            flags,
            vec![Flag::numeric(1), Flag::numeric(999), Flag::numeric(65000)]
        );
    }

    #[test]
    fn numeric_flags_reject_garbage() {
        assert!(matches!(
            FlagStyle::Numeric.parse_flags("12,x"),
            Err(FlagParseError::BadNumericFlag(_))
        ));
    }

    #[test]
    fn long_pairs_do_not_collide() {
        // ("aa","bb") vs ("ab","ab"): same scalars, different grouping.
        assert_ne!(Flag::pair('a', 'a'), Flag::pair('a', 'b'));
        assert_ne!(Flag::pair('z', 'a'), Flag::pair('a', 'z'));
    }

    #[test]
    fn parse_flag_takes_first() {
        assert_eq!(
            FlagStyle::Short.parse_flag("XY").unwrap(),
            Some(Flag::scalar('X'))
        );
        assert_eq!(FlagStyle::Short.parse_flag("").unwrap(), None);
    }

    #[test]
    fn flagset_membership() {
        let set = FlagSet::new(vec![
            Flag::scalar('B'),
            Flag::scalar('A'),
            Flag::scalar('B'),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Flag::scalar('A')));
        assert!(!set.contains(Flag::scalar('C')));
        assert!(set.has(Some(Flag::scalar('B'))));
        assert!(!set.has(None));
    }

    #[test]
    fn flagset_contains_all_and_intersects() {
        let set = FlagSet::new(vec![Flag::scalar('A'), Flag::scalar('B')]);
        assert!(set.contains_all(&[Flag::scalar('A')]));
        assert!(set.contains_all(&[]));
        assert!(!set.contains_all(&[Flag::scalar('A'), Flag::scalar('C')]));

        let other = FlagSet::new(vec![Flag::scalar('B'), Flag::scalar('Z')]);
        assert!(set.intersects(&other));
        assert!(!set.intersects(&FlagSet::new(vec![Flag::scalar('Q')])));
    }
}
