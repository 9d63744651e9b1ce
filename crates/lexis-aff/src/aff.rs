// The affix description: every directive the engine consumes, parsed from
// the line-oriented `.aff` format.
//
// Parsing is tolerant the way the format's other readers are: blank lines,
// `#` comment lines and unrecognized directives are skipped. Malformed
// *recognized* directives (bad counts, truncated tables, unparsable rows)
// fail the whole build with the offending line number.

use lexis_core::casing::Casing;
use lexis_core::flags::{Flag, FlagSet, FlagStyle};

use crate::affix::{AffixIndex, Prefix, Suffix};
use crate::compound_rule::CompoundRule;
use crate::condition::Condition;
use crate::phonet::PhoneTable;
use crate::tables::{parse_map_row, BreakPattern, CompoundPattern, ConvTable, RepPattern};
use crate::{ParseError, ParseErrorKind};

/// Default keyboard layout for `badcharkey` when no `KEY` is given.
const DEFAULT_KEY: &str = "qwertyuiop|asdfghjkl|zxcvbnm";

/// The parsed affix description.
///
/// Everything is immutable after [`Aff::parse`]; the engine shares it by
/// reference across queries.
#[derive(Debug)]
pub struct Aff {
    pub flag_style: FlagStyle,
    pub casing: Casing,
    pub lang: Option<String>,

    /// Keyboard layout rows (`|`-separated) for the keyboard-neighbor edit.
    pub key: String,
    /// Characters to try for insertion/replacement edits, best first.
    pub try_chars: String,
    /// Characters stripped from input words and stems.
    pub ignore: Vec<char>,

    // -- Directive flags --
    pub nosuggest: Option<Flag>,
    pub keepcase: Option<Flag>,
    pub needaffix: Option<Flag>,
    pub circumfix: Option<Flag>,
    pub forbiddenword: Option<Flag>,
    pub warn: Option<Flag>,
    pub onlyincompound: Option<Flag>,
    pub compound_flag: Option<Flag>,
    pub compound_begin: Option<Flag>,
    pub compound_middle: Option<Flag>,
    pub compound_end: Option<Flag>,
    pub compound_permit: Option<Flag>,
    pub compound_forbid: Option<Flag>,
    pub forceucase: Option<Flag>,

    // -- Booleans --
    pub complex_prefixes: bool,
    pub fullstrip: bool,
    pub nosplitsugs: bool,
    pub checksharps: bool,
    pub check_compound_case: bool,
    pub check_compound_dup: bool,
    pub check_compound_rep: bool,
    pub check_compound_triple: bool,
    pub simplified_triple: bool,
    pub onlymaxdiff: bool,
    pub forbidwarn: bool,

    // -- Numbers --
    pub compound_min: usize,
    pub compound_word_max: Option<usize>,
    pub max_cpd_sugs: usize,
    pub max_ngram_sugs: usize,
    pub max_diff: i32,

    // -- Tables --
    pub rep: Vec<RepPattern>,
    pub map: Vec<Vec<String>>,
    pub break_patterns: Vec<BreakPattern>,
    pub compound_rules: Vec<CompoundRule>,
    pub compound_patterns: Vec<CompoundPattern>,
    pub iconv: ConvTable,
    pub oconv: ConvTable,
    pub phone: Option<PhoneTable>,

    // -- Aliases --
    pub af: Vec<FlagSet>,
    pub am: Vec<Vec<String>>,

    // -- Affixes --
    pub prefixes: AffixIndex<Prefix>,
    pub suffixes: AffixIndex<Suffix>,
}

impl Default for Aff {
    fn default() -> Self {
        Aff {
            flag_style: FlagStyle::Short,
            casing: Casing::Plain,
            lang: None,
            key: DEFAULT_KEY.to_string(),
            try_chars: String::new(),
            ignore: Vec::new(),
            nosuggest: None,
            keepcase: None,
            needaffix: None,
            circumfix: None,
            forbiddenword: None,
            warn: None,
            onlyincompound: None,
            compound_flag: None,
            compound_begin: None,
            compound_middle: None,
            compound_end: None,
            compound_permit: None,
            compound_forbid: None,
            forceucase: None,
            complex_prefixes: false,
            fullstrip: false,
            nosplitsugs: false,
            checksharps: false,
            check_compound_case: false,
            check_compound_dup: false,
            check_compound_rep: false,
            check_compound_triple: false,
            simplified_triple: false,
            onlymaxdiff: false,
            forbidwarn: false,
            compound_min: 3,
            compound_word_max: None,
            max_cpd_sugs: 3,
            max_ngram_sugs: 4,
            max_diff: -1,
            rep: Vec::new(),
            map: Vec::new(),
            break_patterns: BreakPattern::default_table(),
            compound_rules: Vec::new(),
            compound_patterns: Vec::new(),
            iconv: ConvTable::default(),
            oconv: ConvTable::default(),
            phone: None,
            af: Vec::new(),
            am: Vec::new(),
            prefixes: AffixIndex::default(),
            suffixes: AffixIndex::default(),
        }
    }
}

impl Aff {
    pub fn parse(text: &str) -> Result<Aff, ParseError> {
        Parser::new(text).run()
    }

    /// Decode a flag string from a dictionary entry or affix row,
    /// resolving `AF` aliases.
    pub fn decode_flags(&self, s: &str) -> Result<FlagSet, ParseErrorKind> {
        decode_flags(self.flag_style, &self.af, s)
    }

    /// Resolve a morphological-data token through the `AM` alias table.
    pub fn decode_morph(&self, token: &str) -> Option<&[String]> {
        if self.am.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let idx: usize = token.parse().ok()?;
        if idx == 0 {
            return None;
        }
        self.am.get(idx - 1).map(Vec::as_slice)
    }
}

fn decode_flags(style: FlagStyle, af: &[FlagSet], s: &str) -> Result<FlagSet, ParseErrorKind> {
    if !af.is_empty() && !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        // A purely numeric flag string indexes the alias table (1-based).
        let idx: usize = s
            .parse()
            .map_err(|_| ParseErrorKind::BadAliasIndex(usize::MAX))?;
        if idx == 0 || idx > af.len() {
            return Err(ParseErrorKind::BadAliasIndex(idx));
        }
        return Ok(af[idx - 1].clone());
    }
    Ok(FlagSet::new(style.parse_flags(s)?))
}

/// Languages with the dotted/dotless i distinction.
fn is_turkic(lang: Option<&str>) -> bool {
    let Some(lang) = lang else { return false };
    let code = lang.split('_').next().unwrap_or(lang);
    matches!(code, "tr" | "az" | "crh")
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'t> {
    /// (1-based line number, content) with blanks and comments dropped.
    lines: Vec<(usize, &'t str)>,
    idx: usize,
    aff: Aff,
    prefixes: Vec<Prefix>,
    suffixes: Vec<Suffix>,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r').trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
            .collect();
        Parser {
            lines,
            idx: 0,
            aff: Aff::default(),
            prefixes: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Aff, ParseError> {
        let mut break_seen = false;
        while self.idx < self.lines.len() {
            let (line_no, line) = self.lines[self.idx];
            self.idx += 1;
            let mut fields = line.split_whitespace();
            let Some(directive) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();
            match directive {
                "FLAG" => {
                    self.aff.flag_style = match rest.first().copied() {
                        Some("long") => FlagStyle::Long,
                        Some("num") => FlagStyle::Numeric,
                        Some("UTF-8") => FlagStyle::Utf8,
                        _ => FlagStyle::Short,
                    }
                }
                "SET" => {} // input contract is UTF-8; the value is moot
                "LANG" => self.aff.lang = rest.first().map(|s| s.to_string()),
                "KEY" => {
                    if let Some(key) = rest.first() {
                        self.aff.key = key.to_string();
                    }
                }
                "TRY" => {
                    if let Some(try_chars) = rest.first() {
                        self.aff.try_chars = try_chars.to_string();
                    }
                }
                "IGNORE" => {
                    if let Some(ignore) = rest.first() {
                        self.aff.ignore = ignore.chars().collect();
                    }
                }

                "NOSUGGEST" => self.aff.nosuggest = self.flag_arg(&rest, line_no)?,
                "KEEPCASE" => self.aff.keepcase = self.flag_arg(&rest, line_no)?,
                "NEEDAFFIX" | "PSEUDOROOT" => {
                    self.aff.needaffix = self.flag_arg(&rest, line_no)?
                }
                "CIRCUMFIX" => self.aff.circumfix = self.flag_arg(&rest, line_no)?,
                "FORBIDDENWORD" => self.aff.forbiddenword = self.flag_arg(&rest, line_no)?,
                "WARN" => self.aff.warn = self.flag_arg(&rest, line_no)?,
                "ONLYINCOMPOUND" => self.aff.onlyincompound = self.flag_arg(&rest, line_no)?,
                "COMPOUNDFLAG" => self.aff.compound_flag = self.flag_arg(&rest, line_no)?,
                "COMPOUNDBEGIN" => self.aff.compound_begin = self.flag_arg(&rest, line_no)?,
                "COMPOUNDMIDDLE" => self.aff.compound_middle = self.flag_arg(&rest, line_no)?,
                "COMPOUNDEND" => self.aff.compound_end = self.flag_arg(&rest, line_no)?,
                "COMPOUNDPERMITFLAG" => {
                    self.aff.compound_permit = self.flag_arg(&rest, line_no)?
                }
                "COMPOUNDFORBIDFLAG" => {
                    self.aff.compound_forbid = self.flag_arg(&rest, line_no)?
                }
                "FORCEUCASE" => self.aff.forceucase = self.flag_arg(&rest, line_no)?,

                "COMPLEXPREFIXES" => self.aff.complex_prefixes = true,
                "FULLSTRIP" => self.aff.fullstrip = true,
                "NOSPLITSUGS" => self.aff.nosplitsugs = true,
                "CHECKSHARPS" => self.aff.checksharps = true,
                "CHECKCOMPOUNDCASE" => self.aff.check_compound_case = true,
                "CHECKCOMPOUNDDUP" => self.aff.check_compound_dup = true,
                "CHECKCOMPOUNDREP" => self.aff.check_compound_rep = true,
                "CHECKCOMPOUNDTRIPLE" => self.aff.check_compound_triple = true,
                "SIMPLIFIEDTRIPLE" => self.aff.simplified_triple = true,
                "ONLYMAXDIFF" => self.aff.onlymaxdiff = true,
                "FORBIDWARN" => self.aff.forbidwarn = true,

                "COMPOUNDMIN" => {
                    // 0 is accepted in the wild and means 1.
                    self.aff.compound_min = self.number(&rest, "COMPOUNDMIN", line_no)?.max(1)
                }
                "COMPOUNDWORDMAX" => {
                    self.aff.compound_word_max =
                        Some(self.number(&rest, "COMPOUNDWORDMAX", line_no)?)
                }
                "MAXCPDSUGS" => {
                    self.aff.max_cpd_sugs = self.number(&rest, "MAXCPDSUGS", line_no)?
                }
                "MAXNGRAMSUGS" => {
                    self.aff.max_ngram_sugs = self.number(&rest, "MAXNGRAMSUGS", line_no)?
                }
                "MAXDIFF" => {
                    self.aff.max_diff = self.number(&rest, "MAXDIFF", line_no)? as i32
                }

                "REP" => {
                    for (row_line, fields) in self.table_rows("REP", &rest, line_no)? {
                        let [from, to, ..] = fields[..] else {
                            return Err(ParseErrorKind::MalformedRow {
                                directive: "REP",
                                row: fields.join(" "),
                            }
                            .at(row_line));
                        };
                        self.aff.rep.push(RepPattern::parse(from, to));
                    }
                }
                "MAP" => {
                    for (_, fields) in self.table_rows("MAP", &rest, line_no)? {
                        if let Some(row) = fields.first() {
                            self.aff.map.push(parse_map_row(row));
                        }
                    }
                }
                "BREAK" => {
                    if !break_seen {
                        // Replace the default table on first sight.
                        self.aff.break_patterns.clear();
                        break_seen = true;
                    }
                    for (_, fields) in self.table_rows("BREAK", &rest, line_no)? {
                        if let Some(row) = fields.first() {
                            self.aff.break_patterns.push(BreakPattern::parse(row));
                        }
                    }
                }
                "COMPOUNDRULE" => {
                    let style = self.aff.flag_style;
                    for (row_line, fields) in self.table_rows("COMPOUNDRULE", &rest, line_no)? {
                        let Some(row) = fields.first() else { continue };
                        let rule = CompoundRule::parse(row, style).map_err(|e| {
                            ParseErrorKind::MalformedRow {
                                directive: "COMPOUNDRULE",
                                row: e.0,
                            }
                            .at(row_line)
                        })?;
                        self.aff.compound_rules.push(rule);
                    }
                }
                "CHECKCOMPOUNDPATTERN" => {
                    for (row_line, fields) in
                        self.table_rows("CHECKCOMPOUNDPATTERN", &rest, line_no)?
                    {
                        let pattern = self.compound_pattern(&fields).ok_or_else(|| {
                            ParseErrorKind::MalformedRow {
                                directive: "CHECKCOMPOUNDPATTERN",
                                row: fields.join(" "),
                            }
                            .at(row_line)
                        })?;
                        self.aff.compound_patterns.push(pattern);
                    }
                }
                "ICONV" | "OCONV" => {
                    let directive = if directive == "ICONV" { "ICONV" } else { "OCONV" };
                    let mut pairs = Vec::new();
                    for (row_line, fields) in self.table_rows(directive, &rest, line_no)? {
                        let [from, to, ..] = fields[..] else {
                            return Err(ParseErrorKind::MalformedRow {
                                directive,
                                row: fields.join(" "),
                            }
                            .at(row_line));
                        };
                        pairs.push((from.to_string(), to.replace('_', " ")));
                    }
                    let table = ConvTable::new(pairs);
                    if directive == "ICONV" {
                        self.aff.iconv = table;
                    } else {
                        self.aff.oconv = table;
                    }
                }
                "PHONE" => {
                    let mut table = PhoneTable::default();
                    for (row_line, fields) in self.table_rows("PHONE", &rest, line_no)? {
                        let [search, replacement, ..] = fields[..] else {
                            return Err(ParseErrorKind::MalformedRow {
                                directive: "PHONE",
                                row: fields.join(" "),
                            }
                            .at(row_line));
                        };
                        if !table.push(search, replacement) {
                            return Err(ParseErrorKind::MalformedRow {
                                directive: "PHONE",
                                row: search.to_string(),
                            }
                            .at(row_line));
                        }
                    }
                    self.aff.phone = Some(table);
                }
                "AF" => {
                    let style = self.aff.flag_style;
                    for (row_line, fields) in self.table_rows("AF", &rest, line_no)? {
                        let Some(row) = fields.first() else { continue };
                        let flags = style
                            .parse_flags(row)
                            .map_err(|e| ParseErrorKind::Flag(e).at(row_line))?;
                        self.aff.af.push(FlagSet::new(flags));
                    }
                }
                "AM" => {
                    for (_, fields) in self.table_rows("AM", &rest, line_no)? {
                        self.aff
                            .am
                            .push(fields.iter().map(|s| s.to_string()).collect());
                    }
                }

                "PFX" => self.affix_group(true, &rest, line_no)?,
                "SFX" => self.affix_group(false, &rest, line_no)?,

                _ => {} // unrecognized directive: skipped
            }
        }

        self.aff.casing = if self.aff.checksharps {
            Casing::German
        } else if is_turkic(self.aff.lang.as_deref()) {
            Casing::Turkic
        } else {
            Casing::Plain
        };

        self.aff.prefixes =
            AffixIndex::build(self.prefixes, |p| p.flag, |p| p.add.chars().collect());
        self.aff.suffixes =
            AffixIndex::build(self.suffixes, |s| s.flag, |s| s.add.chars().rev().collect());
        Ok(self.aff)
    }

    // -- helpers ---------------------------------------------------------

    fn flag_arg(&self, rest: &[&str], line_no: usize) -> Result<Option<Flag>, ParseError> {
        let Some(arg) = rest.first() else {
            return Ok(None);
        };
        self.aff
            .flag_style
            .parse_flag(arg)
            .map_err(|e| ParseErrorKind::Flag(e).at(line_no))
    }

    fn number(&self, rest: &[&str], directive: &'static str, line_no: usize) -> Result<usize, ParseError> {
        let value = rest.first().copied().unwrap_or("");
        value.parse::<usize>().map_err(|_| {
            ParseErrorKind::BadNumber {
                directive,
                value: value.to_string(),
            }
            .at(line_no)
        })
    }

    /// Consume the `count` rows following a table header. Each row must
    /// repeat the directive keyword.
    fn table_rows(
        &mut self,
        directive: &'static str,
        header_rest: &[&str],
        header_line: usize,
    ) -> Result<Vec<(usize, Vec<&'t str>)>, ParseError> {
        let count_str = header_rest.first().copied().unwrap_or("");
        let count: usize = count_str.parse().map_err(|_| {
            ParseErrorKind::BadCount {
                directive,
                value: count_str.to_string(),
            }
            .at(header_line)
        })?;
        let mut rows = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(&(line_no, line)) = self.lines.get(self.idx) else {
                return Err(ParseErrorKind::TruncatedTable(directive).at(header_line));
            };
            let mut fields = line.split_whitespace();
            if fields.next() != Some(directive) {
                return Err(ParseErrorKind::TruncatedTable(directive).at(line_no));
            }
            self.idx += 1;
            rows.push((line_no, fields.collect()));
        }
        Ok(rows)
    }

    fn compound_pattern(&self, fields: &[&str]) -> Option<CompoundPattern> {
        let (left, left_flag) = self.pattern_side(fields.first()?)?;
        let (right, right_flag) = self.pattern_side(fields.get(1)?)?;
        Some(CompoundPattern {
            left,
            right,
            left_flag,
            right_flag,
            replacement: fields.get(2).map(|s| s.to_string()),
        })
    }

    fn pattern_side(&self, field: &str) -> Option<(String, Option<Flag>)> {
        match field.split_once('/') {
            Some((text, flag)) => {
                let flag = self.aff.flag_style.parse_flag(flag).ok()??;
                Some((text.to_string(), Some(flag)))
            }
            None => Some((field.to_string(), None)),
        }
    }

    /// Parse one `PFX`/`SFX` group: header plus its entry rows.
    fn affix_group(
        &mut self,
        is_prefix: bool,
        header_rest: &[&str],
        header_line: usize,
    ) -> Result<(), ParseError> {
        let directive = if is_prefix { "PFX" } else { "SFX" };
        let malformed = |row: String, line: usize| {
            ParseErrorKind::MalformedRow { directive, row }.at(line)
        };

        let [flag_str, cross_str, count_str, ..] = header_rest[..] else {
            return Err(malformed(header_rest.join(" "), header_line));
        };
        let flag = self
            .aff
            .flag_style
            .parse_flag(flag_str)
            .map_err(|e| ParseErrorKind::Flag(e).at(header_line))?
            .ok_or_else(|| malformed(flag_str.to_string(), header_line))?;
        let crossproduct = match cross_str {
            "Y" => true,
            "N" => false,
            other => return Err(malformed(other.to_string(), header_line)),
        };
        let count: usize = count_str.parse().map_err(|_| {
            ParseErrorKind::BadCount {
                directive,
                value: count_str.to_string(),
            }
            .at(header_line)
        })?;

        for _ in 0..count {
            let Some(&(line_no, line)) = self.lines.get(self.idx) else {
                return Err(ParseErrorKind::TruncatedTable(directive).at(header_line));
            };
            self.idx += 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [kw, row_flag, strip, add_and_flags, rest @ ..] = &fields[..] else {
                return Err(malformed(line.to_string(), line_no));
            };
            if *kw != directive || *row_flag != flag_str {
                return Err(ParseErrorKind::TruncatedTable(directive).at(line_no));
            }
            let strip = if *strip == "0" { "" } else { *strip };
            let (add, flags) = match add_and_flags.split_once('/') {
                Some((add, flag_part)) => {
                    let flags = self
                        .aff
                        .decode_flags(flag_part)
                        .map_err(|e| e.at(line_no))?;
                    (add, flags)
                }
                None => (*add_and_flags, FlagSet::empty()),
            };
            let add = if add == "0" { "" } else { add };
            let condition_str = rest.first().copied().unwrap_or(".");
            let condition = Condition::parse(condition_str)
                .ok_or_else(|| ParseErrorKind::BadCondition(condition_str.to_string()).at(line_no))?;

            if is_prefix {
                self.prefixes.push(Prefix {
                    flag,
                    crossproduct,
                    strip: strip.to_string(),
                    add: add.to_string(),
                    condition,
                    flags,
                });
            } else {
                self.suffixes.push(Suffix {
                    flag,
                    crossproduct,
                    strip: strip.to_string(),
                    add: add.to_string(),
                    condition,
                    flags,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let aff = Aff::parse("").unwrap();
        assert_eq!(aff.flag_style, FlagStyle::Short);
        assert_eq!(aff.compound_min, 3);
        assert_eq!(aff.break_patterns.len(), 3);
        assert_eq!(aff.casing, Casing::Plain);
    }

    #[test]
    fn suffix_group_parses() {
        let aff = Aff::parse("SFX A Y 1\nSFX A 0 s .\n").unwrap();
        let suffixes: Vec<_> = aff.suffixes.iter().collect();
        assert_eq!(suffixes.len(), 1);
        assert_eq!(suffixes[0].add, "s");
        assert_eq!(suffixes[0].strip, "");
        assert!(suffixes[0].crossproduct);
    }

    #[test]
    fn multiple_affix_groups() {
        let text = "PFX B Y 1\nPFX B 0 re .\nSFX A Y 2\nSFX A 0 s .\nSFX A y ies [^aeiou]y\n";
        let aff = Aff::parse(text).unwrap();
        assert_eq!(aff.prefixes.iter().count(), 1);
        assert_eq!(aff.suffixes.iter().count(), 2);
    }

    #[test]
    fn truncated_affix_group_is_an_error() {
        let err = Aff::parse("SFX A Y 2\nSFX A 0 s .\n").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::TruncatedTable("SFX")));
    }

    #[test]
    fn bad_count_reports_line() {
        let err = Aff::parse("\n\nREP x\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(err.kind, ParseErrorKind::BadCount { .. }));
    }

    #[test]
    fn rep_table_with_anchors_and_spaces() {
        let aff = Aff::parse("REP 2\nREP alot a_lot\nREP ^f ph\n").unwrap();
        assert_eq!(aff.rep.len(), 2);
        assert_eq!(aff.rep[0].to, "a lot");
        assert!(aff.rep[1].at_start);
    }

    #[test]
    fn break_zero_clears_default() {
        let aff = Aff::parse("BREAK 0\n").unwrap();
        assert!(aff.break_patterns.is_empty());
    }

    #[test]
    fn flag_long_style_applies_to_directives() {
        let aff = Aff::parse("FLAG long\nKEEPCASE Kc\n").unwrap();
        assert_eq!(aff.keepcase, Some(Flag::pair('K', 'c')));
    }

    #[test]
    fn af_alias_expands_in_affix_rows() {
        let text = "AF 1\nAF AB\nSFX X Y 1\nSFX X 0 er/1 .\n";
        let aff = Aff::parse(text).unwrap();
        let sfx = aff.suffixes.iter().next().unwrap();
        assert!(sfx.flags.contains(Flag::scalar('A')));
        assert!(sfx.flags.contains(Flag::scalar('B')));
    }

    #[test]
    fn checksharps_selects_german_casing() {
        let aff = Aff::parse("CHECKSHARPS\n").unwrap();
        assert_eq!(aff.casing, Casing::German);
    }

    #[test]
    fn turkic_lang_selects_turkic_casing() {
        let aff = Aff::parse("LANG tr_TR\n").unwrap();
        assert_eq!(aff.casing, Casing::Turkic);
    }

    #[test]
    fn unknown_directives_are_skipped() {
        let aff = Aff::parse("FROBNICATE 12 yes\nTRY abc\n").unwrap();
        assert_eq!(aff.try_chars, "abc");
    }

    #[test]
    fn compoundmin_zero_is_clamped_to_one() {
        let aff = Aff::parse("COMPOUNDMIN 0\n").unwrap();
        assert_eq!(aff.compound_min, 1);
    }

    #[test]
    fn compound_pattern_rows() {
        let aff =
            Aff::parse("CHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o/X b/Y z\n").unwrap();
        let pat = &aff.compound_patterns[0];
        assert_eq!(pat.left, "o");
        assert_eq!(pat.left_flag, Some(Flag::scalar('X')));
        assert_eq!(pat.right_flag, Some(Flag::scalar('Y')));
        assert_eq!(pat.replacement.as_deref(), Some("z"));
    }

    #[test]
    fn phone_table_parses() {
        let aff = Aff::parse("PHONE 2\nPHONE PH F\nPHONE P P\n").unwrap();
        let phone = aff.phone.as_ref().unwrap();
        assert_eq!(phone.encode("ph"), "F");
    }
}
