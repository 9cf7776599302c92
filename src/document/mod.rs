//! Structural document model shared by import, export and the reader view.
//!
//! Playback and persistence only ever see the flattened paragraph list;
//! blocks keep the extra structure (headings, lists, rules, emphasis) that the
//! Markdown and HTML exports need.

pub mod entities;
pub mod export;
pub mod html;
pub mod markdown;
pub mod text;

pub use export::ExportFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(s) | Inline::Strong(s) | Inline::Emphasis(s) => s,
        }
    }

    pub fn text_mut(&mut self) -> &mut String {
        match self {
            Inline::Text(s) | Inline::Strong(s) | Inline::Emphasis(s) => s,
        }
    }
}

/// Concatenated text of a run of inlines.
pub fn inline_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::text).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List(Vec<Vec<Inline>>),
    Rule,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(vec![Inline::Text(text.into())])
    }

    /// Readable text pieces of this block, one per paragraph-like element.
    pub fn text_pieces(&self) -> Vec<String> {
        match self {
            Block::Heading { content, .. } | Block::Paragraph(content) => {
                vec![inline_text(content).trim().to_string()]
            }
            Block::List(items) => items
                .iter()
                .map(|item| inline_text(item).trim().to_string())
                .collect(),
            Block::Rule => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// One plain paragraph block per non-blank string.
    pub fn from_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> Self {
        let blocks = paragraphs
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(Block::paragraph)
            .collect();
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs().is_empty()
    }

    pub fn push_paragraph(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(Block::paragraph(text));
        }
    }

    /// Flattened text of headings, paragraphs and list items, trimmed, with
    /// empty entries dropped.
    pub fn paragraphs(&self) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(Block::text_pieces)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paragraphs_drops_blank() {
        let doc = Document::from_paragraphs(&["  first  ", "", "   ", "second"]);
        assert_eq!(doc.paragraphs(), vec!["first", "second"]);
        assert_eq!(doc.blocks().len(), 2);
    }

    #[test]
    fn test_paragraphs_flatten_structure() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 2,
                content: vec![Inline::Text("Title".to_string())],
            },
            Block::Rule,
            Block::List(vec![
                vec![Inline::Text("one".to_string())],
                vec![Inline::Strong("two".to_string())],
            ]),
            Block::Paragraph(vec![
                Inline::Text("a ".to_string()),
                Inline::Emphasis("b".to_string()),
            ]),
        ]);
        assert_eq!(doc.paragraphs(), vec!["Title", "one", "two", "a b"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(Document::default().is_empty());
        assert!(Document::new(vec![Block::Rule]).is_empty());
    }

    #[test]
    fn test_push_paragraph_ignores_blank() {
        let mut doc = Document::default();
        doc.push_paragraph("   ");
        doc.push_paragraph(" added ");
        assert_eq!(doc.paragraphs(), vec!["added"]);
    }
}
