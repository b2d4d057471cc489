use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::search::{Evaluation, Hit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsFile {
    pub global_frequency: u64,
    pub created_at: String,
    pub hits: Vec<Hit>,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let f = File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(BufWriter::new(f))
}

/// Write the hits of one evaluation, keyed by its global frequency.
pub fn save_results(path: &Path, evaluation: &Evaluation, format: ResultsFormat) -> Result<()> {
    let mut f = create(path)?;
    match format {
        ResultsFormat::Text => write_results_text(&mut f, evaluation).map_err(|e| Error::io(path, e))?,
        ResultsFormat::Json => {
            let file = ResultsFile {
                global_frequency: evaluation.global_frequency,
                created_at: time::OffsetDateTime::now_utc()
                    .format(&time::format_description::well_known::Rfc3339)
                    .unwrap_or_else(|_| "".into()),
                hits: evaluation.hits.clone(),
            };
            serde_json::to_writer_pretty(&mut f, &file)?;
        }
    }
    f.flush().map_err(|e| Error::io(path, e))
}

pub fn write_results_text<W: Write>(w: &mut W, evaluation: &Evaluation) -> std::io::Result<()> {
    writeln!(w, "global_frequency {}", evaluation.global_frequency)?;
    for hit in &evaluation.hits {
        writeln!(w, "{}\t{}\t{}", hit.term, hit.doc_id, hit.local_frequency)?;
    }
    Ok(())
}

/// Dump every `(term, doc, frequency)` triple of the index, one per line.
pub fn save_index(path: &Path, index: &Index) -> Result<()> {
    let mut f = create(path)?;
    let mut write = || -> std::io::Result<()> {
        for (term, doc_id, freq) in index.entries() {
            writeln!(f, "{term}\t{doc_id}\t{freq}")?;
        }
        f.flush()
    };
    write().map_err(|e| Error::io(path, e))
}
