use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::value::RawValue;

use crate::filename::export_filename;
use crate::persist::{AtomicFileWriter, PersistError};

/// Export input: the display name of the source file and the exact response
/// body the service returned for it.
#[derive(Debug, Clone, Copy)]
pub struct ExportDocument<'a> {
    pub file_name: &'a str,
    pub raw_json: &'a [u8],
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write one `{stem}-outline.json` per document.
    pub per_file: bool,
    /// Write a combined file mapping source name to document, or skip it.
    pub combined_filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            per_file: true,
            combined_filename: Some("all-outlines.json".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub doc_count: usize,
    pub files: Vec<PathBuf>,
    pub combined_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("response body for {file} is not valid JSON: {reason}")]
    InvalidDocumentJson { file: String, reason: String },
    #[error("failed to assemble combined export: {0}")]
    Combined(#[from] serde_json::Error),
}

/// Writes the batch results to `output_dir`. Per-file exports are the
/// service's body bytes untouched; the combined export embeds each body via
/// `RawValue` so it stays byte-identical inside the wrapper object.
pub fn write_exports(
    output_dir: &Path,
    documents: &[ExportDocument<'_>],
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let mut files = Vec::new();

    if options.per_file {
        let mut used: HashSet<String> = HashSet::new();
        for document in documents {
            let mut filename = export_filename(document.file_name, None);
            if !used.insert(filename.clone()) {
                // Same display name twice in one batch: splice in a short
                // content hash instead of overwriting the earlier export.
                filename = export_filename(document.file_name, Some(document.raw_json));
                used.insert(filename.clone());
            }
            files.push(writer.write(&filename, document.raw_json)?);
        }
    }

    let combined_path = match &options.combined_filename {
        Some(name) if !documents.is_empty() => {
            let combined = CombinedExport::collect(documents)?;
            let content = serde_json::to_vec_pretty(&combined)?;
            Some(writer.write(name, &content)?)
        }
        _ => None,
    };

    Ok(ExportSummary {
        doc_count: documents.len(),
        files,
        combined_path,
    })
}

/// Ordered `file name -> raw document` map. Duplicate names keep their first
/// position but the later document wins, matching plain object assignment.
struct CombinedExport<'a> {
    entries: Vec<(&'a str, &'a RawValue)>,
}

impl<'a> CombinedExport<'a> {
    fn collect(documents: &[ExportDocument<'a>]) -> Result<Self, ExportError> {
        let mut entries: Vec<(&str, &RawValue)> = Vec::with_capacity(documents.len());
        for document in documents {
            let text = std::str::from_utf8(document.raw_json).map_err(|err| {
                ExportError::InvalidDocumentJson {
                    file: document.file_name.to_string(),
                    reason: err.to_string(),
                }
            })?;
            let raw: &RawValue =
                serde_json::from_str(text).map_err(|err| ExportError::InvalidDocumentJson {
                    file: document.file_name.to_string(),
                    reason: err.to_string(),
                })?;
            match entries
                .iter_mut()
                .find(|(name, _)| *name == document.file_name)
            {
                Some(entry) => entry.1 = raw,
                None => entries.push((document.file_name, raw)),
            }
        }
        Ok(Self { entries })
    }
}

impl Serialize for CombinedExport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, raw) in &self.entries {
            map.serialize_entry(name, raw)?;
        }
        map.end()
    }
}
