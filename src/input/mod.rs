use crate::document::{html, markdown, text, Document};
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod clipboard;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No readable text in {0}")]
    EmptyFile(PathBuf),

    #[error("Unsupported format: {0} (expected .txt, .md or .html)")]
    UnsupportedFormat(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Formats accepted by file import, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Markdown,
    Html,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(SourceFormat::Text),
            "md" | "markdown" => Ok(SourceFormat::Markdown),
            "html" | "htm" => Ok(SourceFormat::Html),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(&self, content: &str) -> Document {
        match self {
            SourceFormat::Text => text::parse(content),
            SourceFormat::Markdown => markdown::parse(content),
            SourceFormat::Html => html::parse(content),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            SourceFormat::Text => "txt",
            SourceFormat::Markdown => "md",
            SourceFormat::Html => "html",
        }
    }
}

pub struct LoadedDocument {
    pub document: Document,
    pub source: String,
}

/// Reads a file as UTF-8, rejecting files that are blank.
pub fn read_text_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }
    Ok(content)
}

/// Imports a `.txt`, `.md` or `.html` file into a document.
pub fn load_file(path: &str) -> Result<LoadedDocument, LoadError> {
    let path = Path::new(path);
    let format = SourceFormat::from_path(path)?;
    let content = read_text_file(path)?;

    let document = format.parse(&content);
    if document.is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    info!(
        "imported {} paragraphs from {}",
        document.paragraphs().len(),
        path.display()
    );
    Ok(LoadedDocument {
        document,
        source: format!("{}:{}", format.tag(), path.display()),
    })
}
