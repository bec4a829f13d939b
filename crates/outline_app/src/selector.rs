use std::fs;
use std::path::{Path, PathBuf};

use outline_core::SelectedFile;
use outline_logging::outline_warn;

/// Upper bound on one batch, matching what the service is sized for.
pub const MAX_FILES: usize = 10;

/// Builds the ordered selection from command-line paths. Non-PDF and
/// unreadable paths are dropped with a warning; the selection is capped at
/// [`MAX_FILES`], excess paths are dropped with a warning too.
pub fn select_files(paths: &[PathBuf]) -> Vec<SelectedFile> {
    let mut selected = Vec::new();
    for path in paths {
        if selected.len() == MAX_FILES {
            outline_warn!(
                "selection capped at {} files; ignoring the rest starting with {}",
                MAX_FILES,
                path.display()
            );
            break;
        }
        if !is_pdf(path) {
            outline_warn!("skipping {}: not a PDF", path.display());
            continue;
        }
        let metadata = match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => {
                outline_warn!("skipping {}: not a regular file", path.display());
                continue;
            }
            Err(err) => {
                outline_warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        selected.push(SelectedFile {
            name,
            path: path.clone(),
            size_bytes: metadata.len(),
        });
    }
    selected
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{select_files, MAX_FILES};

    fn touch(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"%PDF-1.4").unwrap();
        path
    }

    #[test]
    fn keeps_order_and_filters_non_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            touch(dir.path(), "b.pdf"),
            touch(dir.path(), "notes.txt"),
            touch(dir.path(), "a.pdf"),
        ];

        let selected = select_files(&paths);
        let names: Vec<_> = selected.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);
        assert!(selected.iter().all(|file| file.size_bytes > 0));
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("ghost.pdf"), touch(dir.path(), "real.pdf")];

        let selected = select_files(&paths);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "real.pdf");
    }

    #[test]
    fn selection_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..MAX_FILES + 3)
            .map(|index| touch(dir.path(), &format!("doc-{index}.pdf")))
            .collect();

        let selected = select_files(&paths);
        assert_eq!(selected.len(), MAX_FILES);
        assert_eq!(selected[0].name, "doc-0.pdf");
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![touch(dir.path(), "SCAN.PDF")];

        assert_eq!(select_files(&paths).len(), 1);
    }
}
