//! Loader for the WordNet 3.x database files.
//!
//! For each class the directory may hold `data.<class>` (synsets and
//! pointers), `index.<class>` (lemma → synsets in sense order) and
//! `<class>.exc` (irregular inflections). Missing files leave that class
//! empty; only hypernym pointers (`@`) are kept.

use std::collections::HashMap;

use camino::Utf8Path;

use super::{SynsetId, WordClass, WordNet, WordNetBuilder};
use crate::error::{LexiconError, LexiconResult};

/// One parsed `data.*` record.
#[derive(Debug, PartialEq)]
struct DataRecord {
    offset: u64,
    class: WordClass,
    lemmas: Vec<String>,
    /// `(class, offset)` of each hypernym.
    hypernyms: Vec<(WordClass, u64)>,
}

impl WordNet {
    /// Load a WordNet database directory.
    #[tracing::instrument(skip_all, fields(dir = %dir))]
    pub fn load(dir: &Utf8Path) -> LexiconResult<Self> {
        if !dir.is_dir() {
            return Err(LexiconError::Missing {
                path: dir.to_path_buf(),
            });
        }

        let mut builder = WordNetBuilder::new();
        let mut by_offset: HashMap<(WordClass, u64), SynsetId> = HashMap::new();
        let mut pointers: Vec<(SynsetId, Vec<(WordClass, u64)>)> = Vec::new();

        for class in WordClass::ALL {
            let path = dir.join(format!("data.{}", class.file_suffix()));
            let Some(source) = read_optional(&path)? else {
                tracing::debug!(path = %path, "data file absent");
                continue;
            };
            for (n, line) in source.lines().enumerate() {
                let Some(record) = parse_data_line(line).map_err(|message| LexiconError::Parse {
                    path: path.clone(),
                    line: n + 1,
                    message,
                })?
                else {
                    continue;
                };
                let id = builder.add_synset(record.class, &record.lemmas);
                by_offset.insert((record.class, record.offset), id);
                if !record.hypernyms.is_empty() {
                    pointers.push((id, record.hypernyms));
                }
            }
        }

        for (id, targets) in pointers {
            for target in targets {
                match by_offset.get(&target) {
                    Some(&hypernym) => {
                        builder.add_hypernym(id, hypernym);
                    }
                    None => tracing::debug!(offset = target.1, "dangling hypernym pointer"),
                }
            }
        }

        for class in WordClass::ALL {
            let path = dir.join(format!("index.{}", class.file_suffix()));
            if let Some(source) = read_optional(&path)? {
                for (n, line) in source.lines().enumerate() {
                    let Some((lemma, offsets)) =
                        parse_index_line(line).map_err(|message| LexiconError::Parse {
                            path: path.clone(),
                            line: n + 1,
                            message,
                        })?
                    else {
                        continue;
                    };
                    let senses: Vec<SynsetId> = offsets
                        .iter()
                        .filter_map(|&offset| by_offset.get(&(class, offset)).copied())
                        .collect();
                    if !senses.is_empty() {
                        builder.set_senses(class, &lemma, senses);
                    }
                }
            }

            let path = dir.join(format!("{}.exc", class.file_suffix()));
            if let Some(source) = read_optional(&path)? {
                for line in source.lines() {
                    let mut fields = line.split_whitespace();
                    if let Some(inflected) = fields.next() {
                        for base in fields {
                            builder.add_exception(class, inflected, base);
                        }
                    }
                }
            }
        }

        let net = builder.build();
        tracing::debug!(synsets = net.len(), "loaded wordnet");
        Ok(net)
    }
}

fn read_optional(path: &Utf8Path) -> LexiconResult<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse one `data.*` line. License header lines (leading space) and blank
/// lines yield `None`.
fn parse_data_line(line: &str) -> Result<Option<DataRecord>, String> {
    if line.trim().is_empty() || line.starts_with(' ') {
        return Ok(None);
    }
    let body = line.split_once('|').map_or(line, |(body, _gloss)| body);
    let mut fields = body.split_whitespace();
    let mut next = |what: &str| fields.next().ok_or_else(|| format!("missing {what}"));

    let offset = next("offset")?
        .parse::<u64>()
        .map_err(|e| format!("bad offset: {e}"))?;
    next("lexicographer file number")?;
    let class = pos_class(next("synset type")?)?;
    let word_count = usize::from_str_radix(next("word count")?, 16)
        .map_err(|e| format!("bad word count: {e}"))?;

    let mut lemmas = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        lemmas.push(strip_adjective_marker(next("word")?).to_string());
        next("lexical id")?;
    }

    let pointer_count = next("pointer count")?
        .parse::<usize>()
        .map_err(|e| format!("bad pointer count: {e}"))?;
    let mut hypernyms = Vec::new();
    for _ in 0..pointer_count {
        let symbol = next("pointer symbol")?;
        let target = next("pointer offset")?
            .parse::<u64>()
            .map_err(|e| format!("bad pointer offset: {e}"))?;
        let target_class = pos_class(next("pointer part of speech")?)?;
        next("pointer source/target")?;
        if symbol == "@" {
            hypernyms.push((target_class, target));
        }
    }

    Ok(Some(DataRecord {
        offset,
        class,
        lemmas,
        hypernyms,
    }))
}

/// Parse one `index.*` line into the lemma and its synset offsets.
fn parse_index_line(line: &str) -> Result<Option<(String, Vec<u64>)>, String> {
    if line.trim().is_empty() || line.starts_with(' ') {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    let field = |i: usize| fields.get(i).copied().ok_or("truncated index entry");

    let lemma = field(0)?;
    let synset_count: usize = field(2)?
        .parse()
        .map_err(|e| format!("bad synset count: {e}"))?;
    let pointer_count: usize = field(3)?
        .parse()
        .map_err(|e| format!("bad pointer count: {e}"))?;
    // lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offsets...
    let first_offset = 4 + pointer_count + 2;

    let offsets = (first_offset..first_offset + synset_count)
        .map(|i| {
            field(i)?
                .parse::<u64>()
                .map_err(|e| format!("bad synset offset: {e}"))
        })
        .collect::<Result<Vec<_>, String>>()?;
    Ok(Some((lemma.to_string(), offsets)))
}

fn pos_class(field: &str) -> Result<WordClass, String> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            WordClass::from_pos_letter(letter).ok_or_else(|| format!("unknown part of speech `{field}`"))
        }
        _ => Err(format!("unknown part of speech `{field}`")),
    }
}

/// Drop syntactic markers such as `(a)`, `(p)` and `(ip)` from adjective lemmas.
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(open) if word.ends_with(')') && open > 0 => &word[..open],
        _ => word,
    }
}
