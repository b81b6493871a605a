//! Closed-class English words and their Penn Treebank tags.
//!
//! Function words form a small, fixed inventory, so the tagger looks them up
//! directly instead of guessing from spelling.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Lowercase word → Penn Treebank tag.
pub static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "some", "any", "no", "every",
                "each", "either", "neither", "another", "all", "both",
            ],
        ),
        ("PDT", &["such", "half"]),
        (
            "IN",
            &[
                "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "upon",
                "about", "above", "across", "after", "against", "along", "among", "around",
                "before", "behind", "below", "beneath", "beside", "between", "beyond", "during",
                "except", "inside", "near", "outside", "over", "past", "since", "through",
                "throughout", "toward", "towards", "under", "underneath", "until", "unlike",
                "via", "within", "without", "because", "although", "though", "while", "whereas",
                "if", "unless", "whether", "than", "like", "as",
            ],
        ),
        ("TO", &["to"]),
        ("CC", &["and", "or", "but", "nor", "yet", "so", "plus"]),
        (
            "PRP",
            &[
                "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves",
                "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "its", "our", "their"]),
        (
            "MD",
            &[
                "can", "could", "may", "might", "must", "shall", "should", "will", "would",
                "ought", "wo", "ca",
            ],
        ),
        ("WDT", &["which", "whatever", "whichever"]),
        ("WP", &["who", "whom", "what", "whoever"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how", "wherever", "whenever"]),
        ("EX", &["there"]),
        (
            "RB",
            &[
                "not", "n't", "very", "too", "also", "only", "just", "even", "never", "always",
                "often", "sometimes", "already", "still", "again", "here", "now", "then", "soon",
                "quite", "rather", "almost", "perhaps", "ever", "once", "twice", "however",
                "therefore", "thus", "instead", "indeed", "away", "else",
            ],
        ),
        ("RP", &["up", "out", "off", "down"]),
        ("UH", &["oh", "ah", "hey", "hello", "hi", "yes", "ok", "okay", "wow"]),
        ("VB", &["be"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBP", &["am", "are", "have", "do"]),
        ("VBD", &["was", "were", "had", "did"]),
        ("VBN", &["been"]),
        ("VBG", &["being", "having", "doing"]),
    ];

    for (tag, words) in groups {
        for word in *words {
            map.insert(*word, *tag);
        }
    }
    map
});

/// Auxiliaries after which an `-ed` or irregular participle form is `VBN`.
const PERFECT_OR_PASSIVE_AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "having",
    "'s", "'re", "'ve", "'m", "'d", "get", "gets", "got", "gotten",
];

/// Tag of a closed-class word, if `word` is one.
pub fn closed_class_tag(word: &str) -> Option<&'static str> {
    CLOSED_CLASS.get(word.to_lowercase().as_str()).copied()
}

/// Whether `word` is a form of *be*, *have* or *get* that introduces a
/// participle.
pub fn introduces_participle(word: &str) -> bool {
    PERFECT_OR_PASSIVE_AUXILIARIES.contains(&word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_function_words() {
        assert_eq!(closed_class_tag("The"), Some("DT"));
        assert_eq!(closed_class_tag("of"), Some("IN"));
        assert_eq!(closed_class_tag("their"), Some("PRP$"));
        assert_eq!(closed_class_tag("would"), Some("MD"));
        assert_eq!(closed_class_tag("was"), Some("VBD"));
    }

    #[test]
    fn content_words_are_not_closed_class() {
        assert_eq!(closed_class_tag("village"), None);
        assert_eq!(closed_class_tag("quickly"), None);
    }

    #[test]
    fn participle_auxiliaries() {
        assert!(introduces_participle("was"));
        assert!(introduces_participle("Have"));
        assert!(!introduces_participle("dog"));
    }
}
