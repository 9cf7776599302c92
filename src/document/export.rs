use crate::document::entities::escape_html;
use crate::document::text::join_paragraphs;
use crate::document::{inline_text, Block, Document, Inline};
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const EXPORT_STEM: &str = "texto-exportado";

const STYLESHEET: &str = "    <style>
      body { font-family: sans-serif; line-height: 1.6; padding: 2rem; max-width: 720px; margin: auto; }
      h1, h2, h3 { margin-top: 1.5em; }
      p { margin-bottom: 1em; }
      ul { margin: 1em 0; padding-left: 1.5em; }
      li { margin-bottom: 0.5em; }
    </style>
";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Html => "text/html",
        }
    }

    /// Fixed download name, e.g. `texto-exportado.md`.
    pub fn filename(&self) -> String {
        format!("{}.{}", EXPORT_STEM, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Paragraph texts separated by a blank line.
pub fn to_plain_text(doc: &Document) -> String {
    join_paragraphs(&doc.paragraphs())
}

/// Simplified Markdown: headings down to `####`, `---` rules, one `* item`
/// entry per list item, everything else as plain text. Emphasis is dropped.
pub fn to_markdown(doc: &Document) -> String {
    let mut entries: Vec<String> = Vec::new();

    for block in doc.blocks() {
        match block {
            Block::Heading { level, content } => {
                let text = inline_text(content).trim().to_string();
                if *level <= 4 {
                    entries.push(format!("{} {}", "#".repeat(*level as usize), text));
                } else {
                    entries.push(text);
                }
            }
            Block::Rule => entries.push("---".to_string()),
            Block::List(items) => {
                for item in items {
                    entries.push(format!("* {}", inline_text(item).trim()));
                }
            }
            Block::Paragraph(content) => entries.push(inline_text(content).trim().to_string()),
        }
    }

    entries.retain(|entry| !entry.is_empty());
    entries.join("\n\n")
}

fn render_inlines(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) => escape_html(s),
            Inline::Strong(s) => format!("<strong>{}</strong>", escape_html(s)),
            Inline::Emphasis(s) => format!("<em>{}</em>", escape_html(s)),
        })
        .collect()
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, content } => {
            format!("<h{0}>{1}</h{0}>", level, render_inlines(content))
        }
        Block::Paragraph(content) => format!("<p>{}</p>", render_inlines(content)),
        Block::List(items) => {
            let items: String = items
                .iter()
                .map(|item| format!("  <li>{}</li>\n", render_inlines(item)))
                .collect();
            format!("<ul>\n{}</ul>", items)
        }
        Block::Rule => "<hr>".to_string(),
    }
}

/// Self-contained HTML page, optionally with the fixed stylesheet inlined.
pub fn to_html(doc: &Document, include_style: bool) -> String {
    let body = doc
        .blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n");
    let css = if include_style { STYLESHEET } else { "" };

    format!(
        "<!DOCTYPE html>
<html lang=\"pt-br\">
<head>
  <meta charset=\"UTF-8\">
  <title>Texto Exportado</title>
{css}</head>
<body>
{body}
</body>
</html>"
    )
}

pub fn render(doc: &Document, format: ExportFormat, include_style: bool) -> String {
    match format {
        ExportFormat::Text => to_plain_text(doc),
        ExportFormat::Markdown => to_markdown(doc),
        ExportFormat::Html => to_html(doc, include_style),
    }
}

/// Writes the export into `dir` under the format's fixed filename.
pub fn write_export(
    doc: &Document,
    format: ExportFormat,
    include_style: bool,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format.filename());
    let content = render(doc, format, include_style);

    fs::write(&path, content).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!("exported {} ({}) to {}", format, format.mime_type(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{markdown, text};

    fn sample() -> Document {
        Document::new(vec![
            Block::Heading {
                level: 1,
                content: vec![Inline::Text("Title".to_string())],
            },
            Block::Heading {
                level: 5,
                content: vec![Inline::Text("Small".to_string())],
            },
            Block::Rule,
            Block::List(vec![
                vec![Inline::Text("one".to_string())],
                vec![Inline::Text("two".to_string())],
            ]),
            Block::Paragraph(vec![
                Inline::Text("Plain & ".to_string()),
                Inline::Strong("bold".to_string()),
            ]),
        ])
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Text.filename(), "texto-exportado.txt");
        assert_eq!(ExportFormat::Markdown.filename(), "texto-exportado.md");
        assert_eq!(ExportFormat::Html.filename(), "texto-exportado.html");
        assert_eq!(ExportFormat::Markdown.mime_type(), "text/markdown");
        assert_eq!(ExportFormat::Html.mime_type(), "text/html");
        assert_eq!(ExportFormat::Text.mime_type(), "text/plain");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!(".TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(to_plain_text(&sample()), "Title\n\nSmall\n\none\n\ntwo\n\nPlain & bold");
    }

    #[test]
    fn test_markdown() {
        assert_eq!(
            to_markdown(&sample()),
            "# Title\n\nSmall\n\n---\n\n* one\n\n* two\n\nPlain & bold"
        );
    }

    #[test]
    fn test_markdown_reimport_keeps_paragraphs() {
        let doc = sample();
        let again = markdown::parse(&to_markdown(&doc));
        assert_eq!(again.paragraphs(), doc.paragraphs());
    }

    #[test]
    fn test_html_with_style() {
        let html = to_html(&sample(), true);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<hr>"));
        assert!(html.contains("<p>Plain &amp; <strong>bold</strong></p>"));
    }

    #[test]
    fn test_html_without_style() {
        assert!(!to_html(&sample(), false).contains("<style>"));
    }

    #[test]
    fn test_plain_text_round_trip() {
        let doc = Document::from_paragraphs(&["First one.", "Second,\nwith a line break."]);
        let again = text::parse(&to_plain_text(&doc));
        assert_eq!(again.paragraphs(), doc.paragraphs());
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(&sample(), ExportFormat::Markdown, false, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("texto-exportado.md"));
        assert!(fs::read_to_string(path).unwrap().starts_with("# Title"));
    }

    #[test]
    fn test_write_export_missing_dir() {
        let result = write_export(
            &sample(),
            ExportFormat::Text,
            false,
            Path::new("/nonexistent/pacer/exports"),
        );
        assert!(matches!(result, Err(ExportError::Write { .. })));
    }
}
