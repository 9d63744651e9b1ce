//! End-to-end scenarios against tiny inline dictionaries, exercising the
//! public handle exactly as an application would.

use lexis::LexisHandle;

fn handle(aff: &str, dic: &str) -> LexisHandle {
    LexisHandle::from_strings(aff, dic).expect("fixture dictionaries parse")
}

// ---------------------------------------------------------------------------
// Basic affixing
// ---------------------------------------------------------------------------

#[test]
fn basic_suffix() {
    let h = handle("SFX A Y 1\nSFX A 0 s .\n", "1\nhello/A\n");
    assert!(h.lookup("hello"));
    assert!(h.lookup("hellos"));
    assert!(!h.lookup("hellox"));
    assert_eq!(h.stems("hellos"), vec!["hello"]);
}

#[test]
fn cross_product_prefix_and_suffix() {
    let aff = "PFX B Y 1\n\
               PFX B 0 re .\n\
               SFX A Y 1\n\
               SFX A 0 ing .\n";
    let h = handle(aff, "1\nwalk/AB\n");
    assert!(h.lookup("walk"));
    assert!(h.lookup("rewalk"));
    assert!(h.lookup("walking"));
    assert!(h.lookup("rewalking"));
    assert!(!h.lookup("rewalkings"));
}

#[test]
fn suffix_with_strip_and_condition() {
    let aff = "SFX A Y 2\n\
               SFX A y ies [^aeiou]y\n\
               SFX A 0 s [aeiou]y\n";
    let h = handle(aff, "2\nbody/A\nday/A\n");
    assert!(h.lookup("bodies"));
    assert!(!h.lookup("bodys"));
    assert!(h.lookup("days"));
    assert!(!h.lookup("daies"));
}

#[test]
fn double_suffix_requires_chained_flags() {
    // ation attaches to the verb, al attaches to ation-words only.
    let aff = "SFX A Y 1\n\
               SFX A e ation .\n\
               SFX B Y 1\n\
               SFX B 0 al .\n";
    let h = handle(aff, "1\ncreate/A\n");
    assert!(h.lookup("creation"));
    assert!(!h.lookup("creational")); // "al" not licensed by the chain
    let aff_chained = "SFX A Y 1\n\
                       SFX A e ation/B .\n\
                       SFX B Y 1\n\
                       SFX B 0 al .\n";
    let h = handle(aff_chained, "1\ncreate/A\n");
    assert!(h.lookup("creational"));
    assert!(!h.lookup("createal"));
}

#[test]
fn fullstrip_allows_whole_word_stripping() {
    let aff = "FULLSTRIP\n\
               SFX A Y 2\n\
               SFX A andare vado andare\n\
               SFX A are iamo andare\n";
    let h = handle(aff, "2\nandare/A\nriandare/A\n");
    assert!(h.lookup("andare"));
    assert!(h.lookup("vado"));
    assert!(h.lookup("andiamo"));
    assert!(h.lookup("riandiamo"));
    assert!(!h.lookup("vadoiamo"));
}

// ---------------------------------------------------------------------------
// Casing
// ---------------------------------------------------------------------------

#[test]
fn keepcase_scenario() {
    let h = handle("KEEPCASE K\n", "1\niPhone/K\n");
    assert!(h.lookup("iPhone"));
    assert!(!h.lookup("iphone"));
    assert!(!h.lookup("IPHONE"));
}

#[test]
fn titlecase_and_uppercase_queries() {
    let h = handle("", "2\nkitten\nParis\n");
    assert!(h.lookup("Kitten"));
    assert!(h.lookup("KITTEN"));
    assert!(h.lookup("PARIS"));
    assert!(!h.lookup("paris"));
}

#[test]
fn checksharps_accepts_uppercase_double_s() {
    let h = handle("CHECKSHARPS\n", "1\nstraße\n");
    assert!(h.lookup("straße"));
    assert!(h.lookup("STRASSE"));
    assert!(!h.lookup("strasse"));
}

#[test]
fn complex_prefixes_stack_two() {
    let aff = "COMPLEXPREFIXES\n\
               PFX A Y 1\n\
               PFX A 0 un .\n\
               PFX B Y 1\n\
               PFX B 0 re/A .\n";
    let h = handle(aff, "1\ndo/B\n");
    assert!(h.lookup("redo"));
    assert!(h.lookup("unredo"));
    assert!(!h.lookup("undo")); // "un" attaches to re-words only
}

// ---------------------------------------------------------------------------
// Compounding
// ---------------------------------------------------------------------------

#[test]
fn compound_flag_scenario() {
    let h = handle("COMPOUNDFLAG C\nCOMPOUNDMIN 3\n", "2\nfoo/C\nbar/C\n");
    assert!(h.lookup("foobar"));
    assert!(h.lookup("barfoo"));
    assert!(!h.lookup("fo"));
}

#[test]
fn compound_rule_scenario() {
    let aff = "COMPOUNDMIN 1\nCOMPOUNDRULE 1\nCOMPOUNDRULE AB*C\n";
    let h = handle(aff, "3\nred/A\nblue/B\ngreen/C\n");
    assert!(h.lookup("redgreen"));
    assert!(h.lookup("redbluebluegreen"));
    assert!(!h.lookup("redred"));
    assert!(!h.lookup("greenred"));
}

#[test]
fn forceucase_requires_capital_compound() {
    let aff = "COMPOUNDFLAG C\nCOMPOUNDMIN 3\nFORCEUCASE U\n";
    let h = handle(aff, "2\nfoo/C\nbar/CU\n");
    assert!(!h.lookup("foobar"));
    assert!(h.lookup("Foobar"));
    assert!(h.lookup("FOOBAR"));
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[test]
fn compound_suggestion_pass() {
    let h = handle("COMPOUNDFLAG C\nCOMPOUNDMIN 3\n", "2\nfoo/C\nbar/C\n");
    assert!(h.suggest("foobaar").contains(&"foobar".to_string()));
}

#[test]
fn rep_suggestion_scenario() {
    let h = handle("REP 1\nREP alot a_lot\n", "1\na lot\n");
    let suggestions = h.suggest("alot");
    assert_eq!(suggestions.first().map(String::as_str), Some("a lot"));
}

#[test]
fn keyboard_neighbor_suggestion() {
    let h = handle("KEY qwertyuiop|asdfghjkl|zxcvbnm\n", "1\nhello\n");
    // 'j' sits next to 'h' on the middle row.
    assert!(h.suggest("jello").contains(&"hello".to_string()));
}

#[test]
fn suggestions_preserve_all_caps() {
    let h = handle("", "1\nkitten\n");
    let suggestions = h.suggest("KITEN");
    assert!(suggestions.contains(&"KITTEN".to_string()));
}

#[test]
fn suggest_never_panics_on_junk() {
    let h = handle("", "1\nword\n");
    assert!(h.suggest("").is_empty());
    let _ = h.suggest("’’’---");
    let _ = h.suggest(&"x".repeat(500));
}

#[test]
fn oconv_applies_to_suggestions() {
    let h = handle(
        "OCONV 1\nOCONV ' ’\nTRY '\n",
        "1\ncan't\n",
    );
    let suggestions = h.suggest("cant");
    assert!(suggestions.contains(&"can’t".to_string()));
}

// ---------------------------------------------------------------------------
// Break patterns and input conversion
// ---------------------------------------------------------------------------

#[test]
fn hyphenated_words_check_by_parts() {
    let h = handle("", "2\nwell\nknown\n");
    assert!(h.lookup("well-known"));
    assert!(!h.lookup("well-knwon"));
    assert!(h.suggest("well-knwon").contains(&"well-known".to_string()));
}

#[test]
fn custom_break_pattern() {
    let h = handle("BREAK 1\nBREAK +\n", "2\nalpha\nbeta\n");
    assert!(h.lookup("alpha+beta"));
    assert!(!h.lookup("alpha-beta"));
}

// ---------------------------------------------------------------------------
// Morphology
// ---------------------------------------------------------------------------

#[test]
fn stems_and_data() {
    let aff = "SFX A Y 1\nSFX A 0 s .\n";
    let h = handle(aff, "1\ndrink/A\tpo:verb\n");
    assert_eq!(h.stems("drinks"), vec!["drink"]);
    let data = h.data("drinks");
    assert!(data
        .iter()
        .any(|map| map.contains(&("po".to_string(), "verb".to_string()))));
}

#[test]
fn alias_tables_resolve() {
    let aff = "AF 1\nAF A\nSFX A Y 1\nSFX A 0 s .\n";
    let h = handle(aff, "1\nhello/1\n");
    assert!(h.lookup("hellos"));
}
