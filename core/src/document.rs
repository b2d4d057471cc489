use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tokenizer::LinguisticPreprocessor;

/// Title and body of a source file, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub title: String,
    pub body: String,
}

/// Fixed corrections for the garbled corpus file, applied in order to every repaired token.
const REPAIRS: &[(&str, &str)] = &[
    ("queu", "que"),
    ("celuio-ci", "celui-ci"),
    ("quh", "qu"),
    ("Sainteu-Lazare", "Saint-Lazare"),
    ("pardessusssssssssssssssssssss", "pardessus"),
];

pub fn load(path: &Path) -> Result<LoadedDocument> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_document(&text).map_err(|reason| Error::MalformedDocument {
        path: path.to_path_buf(),
        reason,
    })
}

/// Split source text into its title line and a single-line body.
///
/// The first line is `<prefix> <title>`: the prefix field is dropped.
pub fn parse_document(text: &str) -> std::result::Result<LoadedDocument, String> {
    let (_, title, rest) = split_header(text)?;
    Ok(LoadedDocument { title: title.to_string(), body: flatten_body(rest) })
}

fn split_header(text: &str) -> std::result::Result<(&str, &str, &str), String> {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let first = first.trim();
    let (prefix, title) = first
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("first line {first:?} has no title after its prefix"))?;
    let title = title.trim();
    if title.is_empty() {
        return Err(format!("first line {first:?} has no title after its prefix"));
    }
    Ok((prefix, title, rest))
}

fn flatten_body(rest: &str) -> String {
    rest.replace("\r\n", " ").replace('\n', " ").trim_end().to_string()
}

/// Undo the corruption of the one known garbled corpus file.
///
/// Every token longer than one character carries a stray trailing character;
/// it is dropped, a lone `i` left behind is the pronoun `il`, and the
/// [`REPAIRS`] table restores the few words the corruption mangled further.
/// The result is a clean `<prefix> <title>\n<body>` document.
pub fn repair_garbled(text: &str, preprocessor: &dyn LinguisticPreprocessor) -> std::result::Result<String, String> {
    let (prefix, title, rest) = split_header(text)?;
    let body = flatten_body(rest);
    let repaired: Vec<String> = preprocessor
        .tokenize(&body)
        .into_iter()
        .map(|token| repair_token(&token))
        .collect();
    Ok(format!("{prefix} {title}\n{}", repaired.join(" ")))
}

fn repair_token(token: &str) -> String {
    let mut chars = token.chars();
    if chars.clone().count() <= 1 {
        return token.to_string();
    }
    chars.next_back();
    let mut fixed = chars.as_str().to_string();
    if fixed == "i" {
        fixed = "il".to_string();
    }
    for (broken, good) in REPAIRS {
        fixed = fixed.replace(broken, good);
    }
    fixed
}

pub fn repair_file(input: &Path, output: &Path, preprocessor: &dyn LinguisticPreprocessor) -> Result<()> {
    let text = fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    let repaired = repair_garbled(&text, preprocessor).map_err(|reason| Error::MalformedDocument {
        path: input.to_path_buf(),
        reason,
    })?;
    fs::write(output, repaired).map_err(|e| Error::io(output, e))
}
