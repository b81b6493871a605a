//! Base-form reduction.
//!
//! Inflected words are reduced to the lemmas WordNet indexes: irregular forms
//! through the exception lists, regular forms through one pass of suffix
//! detachment. Only forms present in the index survive.

use super::{WordClass, WordNet};

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn detachment_rules(class: WordClass) -> &'static [(&'static str, &'static str)] {
    match class {
        WordClass::Noun => NOUN_RULES,
        WordClass::Verb => VERB_RULES,
        WordClass::Adjective => ADJECTIVE_RULES,
        WordClass::Adverb => &[],
    }
}

impl WordNet {
    /// Base forms of `form` (already normalized) that the `class` index
    /// knows, in preference order: the form itself first.
    pub(super) fn morphy(&self, form: &str, class: WordClass) -> Vec<String> {
        let index = &self.index[class.slot()];
        let mut candidates = vec![form.to_string()];

        match self.exceptions[class.slot()].get(form) {
            Some(bases) => candidates.extend(bases.iter().cloned()),
            None => {
                for (suffix, ending) in detachment_rules(class) {
                    if form.len() > suffix.len() && form.ends_with(suffix) {
                        let stem = &form[..form.len() - suffix.len()];
                        candidates.push(format!("{stem}{ending}"));
                    }
                }
            }
        }

        let mut forms: Vec<String> = Vec::new();
        for candidate in candidates {
            if index.contains_key(&candidate) && !forms.contains(&candidate) {
                forms.push(candidate);
            }
        }
        forms
    }
}
