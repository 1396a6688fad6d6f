//! Folder mode: build the payload from whatever the workflow wrote to a directory.
//!
//! Only immediate entries are considered. Classification is by the text after
//! the last '.':
//!   csv tsv txt -> tables
//!   jpg png     -> images
//!   html        -> figures
//!   other       -> extra artifact (raw path)
//! Names without any '.' are dropped.

use crate::error::ConfigError;
use crate::payload::{Payload, ResultFile};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Table,
    Image,
    Figure,
    Artifact,
}

fn classify(file_name: &str) -> Option<Category> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(match ext {
        "csv" | "tsv" | "txt" => Category::Table,
        "jpg" | "png" => Category::Image,
        "html" => Category::Figure,
        _ => Category::Artifact,
    })
}

/// Display title: the file name up to its first '.'.
fn title_of(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

pub fn payload_from_folder(folder: &str) -> Result<(Payload, Vec<String>), ConfigError> {
    let read_err = |source: std::io::Error| ConfigError::ReadFolder {
        path: folder.into(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(folder).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    // read_dir order is platform-dependent.
    names.sort();

    let mut tables = Vec::new();
    let mut images = Vec::new();
    let mut figures = Vec::new();
    let mut artifacts = Vec::new();

    for name in &names {
        let full = Path::new(folder).join(name).to_string_lossy().into_owned();
        match classify(name) {
            Some(Category::Table) => tables.push(result_file(full, name)),
            Some(Category::Image) => images.push(result_file(full, name)),
            Some(Category::Figure) => figures.push(result_file(full, name)),
            Some(Category::Artifact) => artifacts.push(full),
            None => debug!(entry = %name, "skipping entry without extension"),
        }
    }

    let payload = Payload {
        images: single_carousel(images),
        figures: single_carousel(figures),
        tables: single_carousel(tables),
        download: None,
    };
    Ok((payload, artifacts))
}

fn result_file(full: String, name: &str) -> ResultFile {
    ResultFile {
        file: full,
        title: title_of(name).to_string(),
    }
}

fn single_carousel(files: Vec<ResultFile>) -> Option<Vec<Vec<ResultFile>>> {
    (!files.is_empty()).then(|| vec![files])
}
