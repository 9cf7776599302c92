//! Minimal line-oriented Markdown importer.
//!
//! Understands `#`-headings, `* ` list items, `---` rules, `**bold**`,
//! `*italic*` and blank-line paragraph breaks. Emphasis does not nest in the
//! model: text both bold and italic is kept as bold. There are no code spans,
//! links, images, tables or escapes.

use crate::document::{Block, Document, Inline};
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    static ref CHUNK_BREAK: Regex = Regex::new(r"\n{2,}").expect("chunk pattern is valid");
    static ref RULE: Regex = Regex::new(r"^\s*-{3,}\s*$").expect("rule pattern is valid");
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})\s?(.*)$").expect("heading pattern is valid");
    static ref LIST_ITEM: Regex = Regex::new(r"^\*\s(.*)$").expect("list pattern is valid");
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid");
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").expect("italic pattern is valid");
}

pub fn parse(markdown: &str) -> Document {
    let markdown = markdown.replace("\r\n", "\n");
    let mut blocks = Vec::new();

    for chunk in CHUNK_BREAK.split(&markdown) {
        parse_chunk(chunk, &mut blocks);
    }

    Document::new(blocks)
}

fn parse_chunk(chunk: &str, blocks: &mut Vec<Block>) {
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list: Vec<Vec<Inline>> = Vec::new();

    for line in chunk.lines() {
        if RULE.is_match(line) {
            flush_paragraph(&mut paragraph, blocks);
            flush_list(&mut list, blocks);
            blocks.push(Block::Rule);
        } else if let Some(caps) = HEADING.captures(line) {
            flush_paragraph(&mut paragraph, blocks);
            flush_list(&mut list, blocks);
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                content: parse_inline(caps[2].trim()),
            });
        } else if let Some(caps) = LIST_ITEM.captures(line) {
            flush_paragraph(&mut paragraph, blocks);
            list.push(parse_inline(caps[1].trim()));
        } else {
            flush_list(&mut list, blocks);
            let line = line.trim();
            if !line.is_empty() {
                paragraph.push(line);
            }
        }
    }

    flush_paragraph(&mut paragraph, blocks);
    flush_list(&mut list, blocks);
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    blocks.push(Block::Paragraph(parse_inline(&lines.join(" "))));
    lines.clear();
}

fn flush_list(items: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if items.is_empty() {
        return;
    }
    blocks.push(Block::List(std::mem::take(items)));
}

/// Bold runs are stripped first, then italic runs over the whole remaining
/// line, bold text included. The visible text matches applying the two
/// substitutions in sequence.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut plain = String::with_capacity(text.len());
    let mut bold_at: Vec<bool> = Vec::with_capacity(text.len());
    let mut last = 0;

    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_flagged(&mut plain, &mut bold_at, &text[last..whole.start()], false);
        push_flagged(&mut plain, &mut bold_at, inner.as_str(), true);
        last = whole.end();
    }
    push_flagged(&mut plain, &mut bold_at, &text[last..], false);

    let mut inlines = Vec::new();
    let mut last = 0;
    for caps in ITALIC.captures_iter(&plain) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_runs(&mut inlines, &plain, &bold_at, last..whole.start(), false);
        push_runs(&mut inlines, &plain, &bold_at, inner.range(), true);
        last = whole.end();
    }
    push_runs(&mut inlines, &plain, &bold_at, last..plain.len(), false);
    inlines
}

/// Appends `piece`, marking each of its bytes as bold or not.
fn push_flagged(plain: &mut String, bold_at: &mut Vec<bool>, piece: &str, bold: bool) {
    plain.push_str(piece);
    bold_at.resize(plain.len(), bold);
}

/// Splits `range` of `plain` where boldness changes. Bold wins over italic,
/// since inlines carry a single emphasis.
fn push_runs(
    inlines: &mut Vec<Inline>,
    plain: &str,
    bold_at: &[bool],
    range: Range<usize>,
    italic: bool,
) {
    for (offset, c) in plain[range.clone()].char_indices() {
        let inline = match (bold_at[range.start + offset], italic) {
            (true, _) => Inline::Strong(c.to_string()),
            (false, true) => Inline::Emphasis(c.to_string()),
            (false, false) => Inline::Text(c.to_string()),
        };
        match inlines.last_mut() {
            Some(prev) if std::mem::discriminant(prev) == std::mem::discriminant(&inline) => {
                prev.text_mut().push(c);
            }
            _ => inlines.push(inline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_headings_levels() {
        let doc = parse("# One\n\n### Three\n\n###### Six");
        let levels: Vec<u8> = doc
            .blocks()
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 3, 6]);
        assert_eq!(doc.paragraphs(), vec!["One", "Three", "Six"]);
    }

    #[test]
    fn test_seven_hashes_keeps_extra_hash() {
        let doc = parse("####### deep");
        assert_eq!(
            doc.blocks()[0],
            Block::Heading {
                level: 6,
                content: vec![text("# deep")]
            }
        );
    }

    #[test]
    fn test_consecutive_items_merge_into_one_list() {
        let doc = parse("* a\n* b\n* c");
        assert_eq!(
            doc.blocks(),
            &[Block::List(vec![vec![text("a")], vec![text("b")], vec![text("c")]])]
        );
    }

    #[test]
    fn test_lists_separated_by_blank_line_stay_apart() {
        let doc = parse("* a\n\n* b");
        assert_eq!(doc.blocks().len(), 2);
    }

    #[test]
    fn test_paragraph_lines_join() {
        let doc = parse("first line\nsecond line\n\nnext para");
        assert_eq!(doc.paragraphs(), vec!["first line second line", "next para"]);
    }

    #[test]
    fn test_mixed_chunk() {
        let doc = parse("# Title\nintro text\n* item\nafter");
        assert_eq!(doc.blocks().len(), 4);
        assert!(matches!(doc.blocks()[0], Block::Heading { level: 1, .. }));
        assert!(matches!(doc.blocks()[1], Block::Paragraph(_)));
        assert!(matches!(doc.blocks()[2], Block::List(_)));
        assert!(matches!(doc.blocks()[3], Block::Paragraph(_)));
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            parse_inline("a **b** c *d* e"),
            vec![
                text("a "),
                Inline::Strong("b".to_string()),
                text(" c "),
                Inline::Emphasis("d".to_string()),
                text(" e"),
            ]
        );
    }

    #[test]
    fn test_italic_inside_bold_drops_markers() {
        assert_eq!(
            parse_inline("**a *b* c**"),
            vec![Inline::Strong("a b c".to_string())]
        );
        assert_eq!(parse("**a *b* c**").paragraphs(), vec!["a b c"]);
    }

    #[test]
    fn test_bold_inside_italic_drops_markers() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![
                Inline::Emphasis("a ".to_string()),
                Inline::Strong("b".to_string()),
                Inline::Emphasis(" c".to_string()),
            ]
        );
        assert_eq!(parse("x *a **b** c* y").paragraphs(), vec!["x a b c y"]);
    }

    #[test]
    fn test_italic_spanning_bold_boundary() {
        assert_eq!(parse("**a *b** c*").paragraphs(), vec!["a b c"]);
    }

    #[test]
    fn test_unpaired_marker_is_text() {
        assert_eq!(parse_inline("2 * 3"), vec![text("2 * 3")]);
    }

    #[test]
    fn test_rule_line() {
        let doc = parse("above\n---\nbelow");
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph(vec![text("above")]),
                Block::Rule,
                Block::Paragraph(vec![text("below")]),
            ]
        );
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse("# T\r\n\r\nbody");
        assert_eq!(doc.paragraphs(), vec!["T", "body"]);
    }
}
