//! Abbreviations that end in a period without ending a sentence.
//!
//! Two tiers: [`is_title`] covers abbreviations that essentially never close
//! a sentence and keep their period as part of the word token; the broader
//! [`is_abbreviation`] set only suppresses sentence breaks.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Honorifics, ranks and company suffixes. Always written with a period.
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "messrs", "dr", "prof", "rev", "fr", "sr", "jr", "st", "hon", "capt",
    "col", "gen", "lt", "maj", "sgt", "cpl", "adm", "cmdr", "sen", "rep", "gov", "pres", "inc",
    "corp", "ltd", "co", "bros", "vs", "etc", "viz", "cf",
];

/// Abbreviations that may appear mid-sentence but are also ordinary
/// sentence-final words often enough that they stay separate tokens.
const GENERAL: &[&str] = &[
    // Latin and scholarly
    "e.g", "i.e", "et al", "ibid", "n.b", "p.s", "approx", "est", "misc", "ref", "vol", "fig",
    "eq", "ch", "pp", "no", "nos",
    // Time and dates
    "a.m", "p.m", "b.c", "a.d", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec", "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat",
    "sun",
    // Places
    "ave", "blvd", "rd", "mt", "ft", "apt", "dept", "u.s", "u.k", "u.s.a", "e.u", "calif",
    // Degrees
    "ph.d", "m.d", "b.a", "b.s", "m.a", "m.s", "m.b.a",
    // Units
    "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "yd", "mi", "sq", "mph", "hr", "hrs",
];

static TITLE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TITLES.iter().copied().collect());

static ABBREVIATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TITLES.iter().chain(GENERAL).copied().collect());

fn normalize(word: &str) -> String {
    word.trim_matches('.').to_lowercase()
}

/// Whether `word` (with or without its trailing period) is a title-like
/// abbreviation that owns its period.
pub fn is_title(word: &str) -> bool {
    TITLE_SET.contains(normalize(word).as_str())
}

/// Whether `word` (with or without its trailing period) is any known
/// abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATION_SET.contains(normalize(word).as_str())
}
