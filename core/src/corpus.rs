use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::{load, repair_file};
use crate::error::{Error, Result};
use crate::index::{Index, IndexBuilder};
use crate::tokenizer::{LinguisticPreprocessor, Normalizer, SnowballPreprocessor};
use crate::{DocId, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusOptions {
    /// Extension of indexable files, without the dot.
    pub extension: String,
    /// Character that marks a garbled file just before its extension.
    pub garbled_marker: char,
    /// Write a repaired copy of every garbled file before scanning.
    pub repair_garbled: bool,
    /// Lemmatize terms with the French Snowball stemmer.
    pub stemming: bool,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self { extension: "txt".into(), garbled_marker: '!', repair_garbled: true, stemming: true }
    }
}

impl CorpusOptions {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(SnowballPreprocessor::new(self.stemming))
    }
}

#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: Error,
}

#[derive(Debug)]
pub struct BuildReport {
    pub index: Index,
    pub skipped: Vec<SkippedDocument>,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(extension)
}

/// Trailing run of ASCII digits of a file stem: `exercice12` -> `12`.
fn trailing_digits(stem: &str) -> Option<&str> {
    let digits = &stem[stem.trim_end_matches(|c: char| c.is_ascii_digit()).len()..];
    (!digits.is_empty()).then_some(digits)
}

fn files_in(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::PathNotFound(dir.to_path_buf()));
    }
    Ok(WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, extension))
        .collect())
}

/// Indexable files of `dir`: stems ending in digits and not in the garbled
/// marker, ordered numerically by those digits then by name.
pub fn scan(dir: &Path, options: &CorpusOptions) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(usize, String, String, PathBuf)> = files_in(dir, &options.extension)?
        .into_iter()
        .filter_map(|p| {
            let stem = p.file_stem()?.to_str()?;
            if stem.ends_with(options.garbled_marker) {
                return None;
            }
            // numeric order without parsing: shorter digit runs first, then lexical
            let digits = trailing_digits(stem)?.to_string();
            let name = p.file_name()?.to_string_lossy().into_owned();
            Some((digits.len(), digits, name, p))
        })
        .collect();
    files.sort();
    Ok(files.into_iter().map(|(_, _, _, p)| p).collect())
}

/// Write `<stem>.<ext>` next to each `<stem><marker>.<ext>`, repaired.
pub fn repair_garbled_files(
    dir: &Path,
    options: &CorpusOptions,
    preprocessor: &dyn LinguisticPreprocessor,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for path in files_in(dir, &options.extension)? {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        let Some(clean_stem) = stem.strip_suffix(options.garbled_marker) else { continue };
        let target = path.with_file_name(format!("{clean_stem}.{}", options.extension));
        match repair_file(&path, &target, preprocessor) {
            Ok(()) => {
                tracing::info!(source = %path.display(), target = %target.display(), "repaired garbled document");
                written.push(target);
            }
            Err(e) if e.is_document_local() => {
                tracing::warn!(path = %path.display(), error = %e, "could not repair garbled document");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

/// Load, normalize and index every document of `dir`, one at a time.
///
/// Documents that fail to load are skipped and do not consume an id.
pub fn build(dir: &Path, options: &CorpusOptions, normalizer: &Normalizer) -> Result<BuildReport> {
    if !dir.is_dir() {
        return Err(Error::PathNotFound(dir.to_path_buf()));
    }
    if options.repair_garbled {
        repair_garbled_files(dir, options, normalizer.preprocessor())?;
    }

    let mut builder = IndexBuilder::new();
    let mut skipped = Vec::new();
    let mut next_doc_id: DocId = 1;
    for path in scan(dir, options)? {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let loaded = match load(&path) {
            Ok(doc) => doc,
            Err(error) if error.is_document_local() => {
                tracing::warn!(path = %path.display(), %error, "skipping document");
                skipped.push(SkippedDocument { path, error });
                continue;
            }
            Err(error) => return Err(error),
        };
        let terms = normalizer.normalize(&loaded.body);
        builder.add_document(Document::new(next_doc_id, name, loaded.title), &terms);
        next_doc_id += 1;
    }

    let index = builder.finish();
    tracing::info!(num_docs = index.num_documents(), num_terms = index.num_terms(), skipped = skipped.len(), "ingested documents");
    Ok(BuildReport { index, skipped })
}
