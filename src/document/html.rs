//! Tolerant HTML importer.
//!
//! Scans tags without building a tree. Text inside `p`, `h1`-`h6` and `li`
//! becomes blocks, `hr` becomes a rule and `strong`/`b`/`em`/`i` become inline
//! emphasis. Text outside those elements is ignored, as are `script` and
//! `style` bodies and comments.

use crate::document::entities::decode_entities;
use crate::document::{Block, Document, Inline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    current: Option<(BlockKind, Vec<Inline>)>,
    list: Vec<Vec<Inline>>,
    strong: usize,
    emphasis: usize,
    skip: usize,
}

impl Builder {
    fn start_block(&mut self, kind: BlockKind) {
        self.finish_block();
        if kind != BlockKind::ListItem {
            self.flush_list();
        }
        self.current = Some((kind, Vec::new()));
    }

    fn finish_block(&mut self) {
        let Some((kind, inlines)) = self.current.take() else {
            return;
        };
        let inlines = normalize(inlines);
        if inlines.is_empty() {
            return;
        }
        match kind {
            BlockKind::Heading(level) => self.blocks.push(Block::Heading {
                level,
                content: inlines,
            }),
            BlockKind::Paragraph => self.blocks.push(Block::Paragraph(inlines)),
            BlockKind::ListItem => self.list.push(inlines),
        }
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            self.blocks.push(Block::List(std::mem::take(&mut self.list)));
        }
    }

    fn text(&mut self, raw: &str) {
        if self.skip > 0 {
            return;
        }
        let Some((_, inlines)) = self.current.as_mut() else {
            return;
        };
        let text = collapse_whitespace(&decode_entities(raw));
        if text.is_empty() {
            return;
        }

        let inline = if self.strong > 0 {
            Inline::Strong(text)
        } else if self.emphasis > 0 {
            Inline::Emphasis(text)
        } else {
            Inline::Text(text)
        };
        push_inline(inlines, inline);
    }

    fn open(&mut self, name: &str) {
        match name {
            "p" => self.start_block(BlockKind::Paragraph),
            "li" => self.start_block(BlockKind::ListItem),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name.as_bytes()[1] - b'0';
                self.start_block(BlockKind::Heading(level));
            }
            "hr" => {
                self.finish_block();
                self.flush_list();
                self.blocks.push(Block::Rule);
            }
            "ul" | "ol" => {
                self.finish_block();
                self.flush_list();
            }
            "br" => self.text(" "),
            "strong" | "b" => self.strong += 1,
            "em" | "i" => self.emphasis += 1,
            "script" | "style" => self.skip += 1,
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "p" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.finish_block(),
            "ul" | "ol" => {
                self.finish_block();
                self.flush_list();
            }
            "strong" | "b" => self.strong = self.strong.saturating_sub(1),
            "em" | "i" => self.emphasis = self.emphasis.saturating_sub(1),
            "script" | "style" => self.skip = self.skip.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> Document {
        self.finish_block();
        self.flush_list();
        Document::new(self.blocks)
    }
}

fn push_inline(inlines: &mut Vec<Inline>, inline: Inline) {
    if let Some(prev) = inlines.last_mut() {
        if std::mem::discriminant(prev) == std::mem::discriminant(&inline) {
            let next = inline.text();
            let prev = prev.text_mut();
            if prev.ends_with(' ') && next.starts_with(' ') {
                prev.push_str(&next[1..]);
            } else {
                prev.push_str(next);
            }
            return;
        }
    }
    inlines.push(inline);
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Trims the outer edges of a run and drops inlines left empty.
fn normalize(mut inlines: Vec<Inline>) -> Vec<Inline> {
    let trim = |inline: &mut Inline, start: bool| {
        let s = inline.text_mut();
        *s = if start {
            s.trim_start().to_string()
        } else {
            s.trim_end().to_string()
        };
    };

    if let Some(first) = inlines.first_mut() {
        trim(first, true);
    }
    if let Some(last) = inlines.last_mut() {
        trim(last, false);
    }
    inlines.retain(|inline| !inline.text().is_empty());
    inlines
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

pub fn parse(html: &str) -> Document {
    let mut builder = Builder::default();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        builder.text(&rest[..lt]);
        let after = &rest[lt + 1..];

        if let Some(comment) = after.strip_prefix("!--") {
            rest = match comment.find("-->") {
                Some(end) => &comment[end + 3..],
                None => "",
            };
            continue;
        }

        let Some(gt) = after.find('>') else {
            builder.text(&rest[lt..]);
            rest = "";
            break;
        };

        let tag = &after[..gt];
        let name = tag_name(tag);
        if tag.starts_with('/') {
            builder.close(&name);
        } else {
            builder.open(&name);
            if tag.ends_with('/') {
                builder.close(&name);
            }
        }
        rest = &after[gt + 1..];
    }

    builder.text(rest);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_headings() {
        let doc = parse("<html><body><h1>Title</h1><p>Hello <b>World</b></p></body></html>");
        assert_eq!(doc.paragraphs(), vec!["Title", "Hello World"]);
        assert_eq!(
            doc.blocks()[1],
            Block::Paragraph(vec![
                Inline::Text("Hello ".to_string()),
                Inline::Strong("World".to_string()),
            ])
        );
    }

    #[test]
    fn test_list_items_group() {
        let doc = parse("<ul>\n  <li>one</li>\n  <li>two</li>\n</ul><p>after</p>");
        assert_eq!(doc.blocks().len(), 2);
        assert!(matches!(&doc.blocks()[0], Block::List(items) if items.len() == 2));
        assert_eq!(doc.paragraphs(), vec!["one", "two", "after"]);
    }

    #[test]
    fn test_rule_and_loose_text() {
        let doc = parse("loose <div>ignored</div><p>a</p><hr/><p>b</p>");
        assert_eq!(
            doc.blocks(),
            &[Block::paragraph("a"), Block::Rule, Block::paragraph("b")]
        );
    }

    #[test]
    fn test_script_style_and_comments_skipped() {
        let doc = parse("<style>p{}</style><p>x<!-- <p>no</p> -->y</p><script>var a;</script>");
        assert_eq!(doc.paragraphs(), vec!["xy"]);
    }

    #[test]
    fn test_entities_and_whitespace() {
        let doc = parse("<p>  caf&eacute;\n\n  &amp;   tea  </p>");
        assert_eq!(doc.paragraphs(), vec!["café & tea"]);
    }

    #[test]
    fn test_unclosed_paragraphs() {
        let doc = parse("<p>first<p>second");
        assert_eq!(doc.paragraphs(), vec!["first", "second"]);
    }

    #[test]
    fn test_uppercase_tags_and_attributes() {
        let doc = parse(r#"<P class="x">Hi</P><H3 id="t">Sub</H3>"#);
        assert_eq!(doc.paragraphs(), vec!["Hi", "Sub"]);
        assert!(matches!(doc.blocks()[1], Block::Heading { level: 3, .. }));
    }

    #[test]
    fn test_stray_less_than() {
        let doc = parse("<p>a < b");
        assert_eq!(doc.paragraphs(), vec!["a < b"]);
    }
}
