//! Directory-based batch SVG output.

use crate::page::VectorDocument;
use crate::svg;
use core::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Batch write failed partway through.
///
/// Fatal for the batch operation; `written` reports the pages that made it
/// to disk before the failure.
#[derive(Debug)]
pub struct BatchError {
    pub written: Vec<PathBuf>,
    pub source: io::Error,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batch write failed after {} page(s): {}",
            self.written.len(),
            self.source
        )
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Write one `result_page_{n}.svg` per document into `dir`.
///
/// Files are named by the documents' 1-based page numbers so a downstream
/// consumer can glob the directory and convert each page independently.
pub fn write_svg_pages(dir: &Path, docs: &[VectorDocument]) -> Result<Vec<PathBuf>, BatchError> {
    let mut written = Vec::with_capacity(docs.len());
    if let Err(source) = fs::create_dir_all(dir) {
        return Err(BatchError { written, source });
    }
    for doc in docs {
        let path = dir.join(format!("result_page_{}.svg", doc.page_number()));
        let result =
            File::create(&path).and_then(|file| svg::write_svg(doc, BufWriter::new(file)));
        match result {
            Ok(()) => written.push(path),
            Err(source) => return Err(BatchError { written, source }),
        }
    }
    Ok(written)
}
