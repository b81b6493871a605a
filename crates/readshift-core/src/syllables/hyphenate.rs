//! Heuristic hyphenation for words the pronunciation lexicon does not know.
//!
//! Syllable nuclei are maximal vowel groups, with adjustments for silent
//! endings. Boundaries are placed in the consonant run between two nuclei:
//! before a lone consonant, before a two-letter onset cluster, or after the
//! first consonant otherwise.

/// Splits a word into syllable-sized chunks joined by `-`.
pub trait Hyphenator: Send + Sync {
    /// Return `word` with a hyphen inserted at every syllable boundary.
    ///
    /// Always succeeds. Hyphens already present in `word` are kept.
    fn hyphenate(&self, word: &str) -> String;
}

/// Vowel-group hyphenator for English.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroupHyphenator;

/// Consonant pairs that open a syllable together and are never split.
const ONSET_CLUSTERS: &[[char; 2]] = &[
    ['b', 'l'],
    ['b', 'r'],
    ['c', 'h'],
    ['c', 'l'],
    ['c', 'r'],
    ['d', 'r'],
    ['f', 'l'],
    ['f', 'r'],
    ['g', 'l'],
    ['g', 'r'],
    ['p', 'h'],
    ['p', 'l'],
    ['p', 'r'],
    ['s', 'c'],
    ['s', 'h'],
    ['s', 'k'],
    ['s', 'l'],
    ['s', 'm'],
    ['s', 'n'],
    ['s', 'p'],
    ['s', 't'],
    ['s', 'w'],
    ['t', 'h'],
    ['t', 'r'],
    ['t', 'w'],
    ['w', 'h'],
    ['w', 'r'],
];

impl Hyphenator for VowelGroupHyphenator {
    fn hyphenate(&self, word: &str) -> String {
        word.split('-')
            .map(hyphenate_part)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Count the non-empty chunks of a hyphenated word.
pub fn chunk_count(hyphenated: &str) -> usize {
    hyphenated.split('-').filter(|c| !c.is_empty()).count()
}

const fn is_plain_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// `y` is a vowel except word-initially or directly before another vowel.
fn is_vowel_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'y' => i > 0 && !chars.get(i + 1).copied().is_some_and(is_plain_vowel),
        ch => is_plain_vowel(ch),
    }
}

fn is_consonant(ch: char) -> bool {
    ch.is_alphabetic() && !is_plain_vowel(ch)
}

/// Half-open index ranges of the syllable nuclei in `chars`.
fn nuclei(chars: &[char]) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut start = None;

    for i in 0..chars.len() {
        match (is_vowel_at(chars, i), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                groups.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        groups.push((s, chars.len()));
    }

    if groups.len() > 1 && has_silent_ending(chars, groups[groups.len() - 1]) {
        groups.pop();
    }
    groups
}

/// Whether the final nucleus is an `e` that is not pronounced
/// (`made`, `jumped`, `makes`), as opposed to `table`, `wanted`, `boxes`.
fn has_silent_ending(chars: &[char], last: (usize, usize)) -> bool {
    let n = chars.len();
    let at = |i: usize| chars.get(i).copied().unwrap_or(' ');

    if last == (n - 1, n) && at(n - 1) == 'e' && n >= 2 {
        let before = at(n - 2);
        let le_after_consonant = before == 'l' && n >= 3 && is_consonant(at(n - 3));
        return is_consonant(before) && !le_after_consonant;
    }

    if n >= 3 && last == (n - 2, n - 1) && at(n - 2) == 'e' {
        let before = at(n - 3);
        return match at(n - 1) {
            'd' => is_consonant(before) && !matches!(before, 't' | 'd'),
            's' => {
                let sibilant = matches!(before, 's' | 'x' | 'z' | 'c' | 'g')
                    || (before == 'h' && n >= 4 && matches!(at(n - 4), 'c' | 's'));
                is_consonant(before) && !sibilant
            }
            _ => false,
        };
    }

    false
}

/// Offset into a consonant run at which the syllable break falls.
fn split_point(run: &[char]) -> usize {
    match run.len() {
        0 | 1 => 0,
        len => {
            let tail = [run[len - 2], run[len - 1]];
            if ONSET_CLUSTERS.contains(&tail) {
                len - 2
            } else {
                len - 1
            }
        }
    }
}

fn hyphenate_part(part: &str) -> String {
    let chars: Vec<char> = part.to_lowercase().chars().collect();
    let nuclei = nuclei(&chars);
    if nuclei.len() < 2 {
        return chars.into_iter().collect();
    }

    let mut out = String::with_capacity(chars.len() + nuclei.len());
    let mut start = 0;
    for pair in nuclei.windows(2) {
        let (prev_end, next_start) = (pair[0].1, pair[1].0);
        let cut = prev_end + split_point(&chars[prev_end..next_start]);
        out.extend(&chars[start..cut]);
        out.push('-');
        start = cut;
    }
    out.extend(&chars[start..]);
    out
}
