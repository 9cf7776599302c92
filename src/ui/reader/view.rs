use crate::app::{Notice, NoticeLevel, RenderState};
use crate::app::mode::AppMode;
use crate::document::{Block, Document, Inline};
use crate::reading::Unit;
use crate::ui::theme::{colors, highlight_color};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// A run of text on a wrapped line; `unit` is set when it belongs to a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub unit: Option<usize>,
    pub text: String,
}

/// Units word-wrapped to a pane width.
#[derive(Debug, Default)]
pub struct UnitLayout {
    pub lines: Vec<Vec<Piece>>,
    /// First line of each unit
    pub unit_line: Vec<usize>,
}

/// Wraps units at word boundaries, one blank line between paragraphs.
///
/// A space between two words of the same unit belongs to that unit, so a
/// highlighted sentence reads as one block of color.
pub fn layout_units(units: &[Unit], width: u16) -> UnitLayout {
    let width = usize::from(width.max(1));
    let mut lines: Vec<Vec<Piece>> = Vec::new();
    let mut unit_line = vec![0; units.len()];
    let mut current: Vec<Piece> = Vec::new();
    let mut used = 0;
    let mut last_paragraph: Option<usize> = None;

    for (i, unit) in units.iter().enumerate() {
        if last_paragraph.is_some_and(|p| p != unit.paragraph) {
            lines.push(std::mem::take(&mut current));
            lines.push(Vec::new());
            used = 0;
        }
        last_paragraph = Some(unit.paragraph);

        for (w, word) in unit.text.split_whitespace().enumerate() {
            let word_width = UnicodeWidthStr::width(word);
            if used > 0 && used + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            if used > 0 {
                current.push(Piece {
                    unit: (w > 0).then_some(i),
                    text: " ".to_string(),
                });
                used += 1;
            }
            if w == 0 {
                unit_line[i] = lines.len();
            }
            current.push(Piece {
                unit: Some(i),
                text: word.to_string(),
            });
            used += word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    UnitLayout { lines, unit_line }
}

/// Offset that puts `line` in the middle of a pane `height` rows tall.
pub fn centered_offset(line: usize, height: u16) -> u16 {
    let offset = line.saturating_sub(usize::from(height / 2));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Styled lines for a laid-out document; the highlighted unit gets a
/// colored background.
pub fn render_units(layout: &UnitLayout, highlighted: Option<(usize, &str)>) -> Vec<Line<'static>> {
    let text_style = Style::default().fg(colors::text());
    let marked = highlighted.map(|(index, color)| {
        let style = Style::default()
            .fg(colors::highlight_fg())
            .bg(highlight_color(color))
            .add_modifier(Modifier::BOLD);
        (index, style)
    });

    layout
        .lines
        .iter()
        .map(|pieces| {
            let spans: Vec<Span<'static>> = pieces
                .iter()
                .map(|piece| {
                    let style = match (marked, piece.unit) {
                        (Some((index, style)), Some(unit)) if unit == index => style,
                        _ => text_style,
                    };
                    Span::styled(piece.text.clone(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Structural view of a document before playback has segmented it.
pub fn render_blocks(document: &Document) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in document.blocks() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        match block {
            Block::Heading { level, content } => {
                let mut spans = vec![Span::styled(
                    format!("{} ", "#".repeat(usize::from(*level))),
                    Style::default().fg(colors::dimmed()),
                )];
                let style = Style::default()
                    .fg(colors::heading())
                    .add_modifier(Modifier::BOLD);
                spans.extend(inline_spans(content, style));
                lines.push(Line::from(spans));
            }
            Block::Paragraph(content) => {
                let style = Style::default().fg(colors::text());
                lines.push(Line::from(inline_spans(content, style)));
            }
            Block::List(items) => {
                for item in items {
                    let style = Style::default().fg(colors::text());
                    let mut spans = vec![Span::styled("• ", Style::default().fg(colors::accent()))];
                    spans.extend(inline_spans(item, style));
                    lines.push(Line::from(spans));
                }
            }
            Block::Rule => {
                lines.push(Line::styled("─".repeat(24), Style::default().fg(colors::dimmed())));
            }
        }
    }
    lines
}

fn inline_spans(inlines: &[Inline], base: Style) -> Vec<Span<'static>> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => Span::styled(text.clone(), base),
            Inline::Strong(text) => Span::styled(text.clone(), base.add_modifier(Modifier::BOLD)),
            Inline::Emphasis(text) => {
                Span::styled(text.clone(), base.add_modifier(Modifier::ITALIC))
            }
        })
        .collect()
}

pub fn render_reader(lines: Vec<Line<'static>>, offset: u16, wrap: bool) -> Paragraph<'static> {
    let paragraph = Paragraph::new(lines)
        .scroll((offset, 0))
        .style(Style::default().bg(colors::background()));
    if wrap {
        paragraph.wrap(Wrap { trim: false })
    } else {
        paragraph
    }
}

pub fn render_empty_hint() -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::default(),
        Line::styled("No text loaded.", Style::default().fg(colors::heading())),
        Line::styled(
            "Press : then type @file.txt, @@ for the clipboard, or :h for help.",
            Style::default().fg(colors::dimmed()),
        ),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(colors::background()))
}

pub fn render_progress_bar(percent: u16, status: &str) -> Line<'static> {
    let percent = percent.min(100);
    let filled_len = usize::from(percent / 5);
    let empty_len = 20 - filled_len;

    let mut spans = Vec::new();
    spans.push(Span::styled(
        "─".repeat(filled_len),
        Style::default().fg(colors::accent()),
    ));
    spans.push(Span::styled(
        "─".repeat(empty_len),
        Style::default().fg(colors::dimmed()),
    ));
    spans.push(Span::styled(
        format!(" {:>3}%  {}", percent, status),
        Style::default().fg(colors::dimmed()),
    ));

    Line::from(spans).alignment(Alignment::Center)
}

/// Bottom line: the input line in Command mode, otherwise the notice.
pub fn render_command_deck(state: &RenderState) -> Paragraph<'static> {
    let line = if state.mode == AppMode::Command {
        Line::from(vec![
            Span::styled(":", Style::default().fg(colors::accent())),
            Span::styled(state.command_input.to_string(), Style::default().fg(colors::text())),
            Span::styled("█", Style::default().fg(colors::dimmed())),
        ])
    } else if let Some(notice) = state.notice {
        notice_line(notice)
    } else {
        Line::styled(": command   space pause   ←/→ step   q quit", Style::default().fg(colors::dimmed()))
    };

    Paragraph::new(line).style(Style::default().bg(colors::surface()))
}

fn notice_line(notice: &Notice) -> Line<'static> {
    let color = match notice.level {
        NoticeLevel::Info => colors::text(),
        NoticeLevel::Error => colors::error(),
    };
    Line::styled(notice.message.clone(), Style::default().fg(color))
}

const HELP_LINES: &[(&str, &str)] = &[
    ("@path", "import a .txt, .md or .html file"),
    ("@@", "import text from the clipboard"),
    (":start  :pause  :stop", "playback"),
    (":prev  :next", "step one unit"),
    (":mode word|sentence", "segmentation, resets delays"),
    (":delay N  :perword N", "delays in milliseconds"),
    (":color C", "highlight color, name or #rrggbb"),
    (":export txt|md|html", "write texto-exportado.*"),
    (":copy  :copymd", "copy text or Markdown"),
    (":style on|off", "stylesheet in HTML export"),
    (":shortcuts on|off", "space, enter, esc, ctrl+c, ctrl+s"),
    (":add TEXT", "append a paragraph"),
    (":clear", "forget the saved text"),
    (":q", "quit"),
];

pub fn render_help() -> Paragraph<'static> {
    let lines: Vec<Line<'static>> = HELP_LINES
        .iter()
        .map(|(command, what)| {
            Line::from(vec![
                Span::styled(format!("{:<24}", command), Style::default().fg(colors::accent())),
                Span::styled(what.to_string(), Style::default().fg(colors::text())),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Panel::default()
                .title(" Commands (any key closes) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::dimmed())),
        )
        .style(Style::default().bg(colors::surface()).fg(Color::Reset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{segment_document, SegmentMode};

    fn line_text(pieces: &[Piece]) -> String {
        pieces.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_layout_wraps_at_width() {
        let units = segment_document(SegmentMode::Word, &["one two three four"]);
        let layout = layout_units(&units, 9);
        let lines: Vec<String> = layout.lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert_eq!(layout.unit_line, vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_layout_separates_paragraphs() {
        let units = segment_document(SegmentMode::Word, &["a b", "c"]);
        let layout = layout_units(&units, 80);
        let lines: Vec<String> = layout.lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(lines, vec!["a b", "", "c"]);
        assert_eq!(layout.unit_line[2], 2);
    }

    #[test]
    fn test_sentence_spans_lines_and_owns_inner_spaces() {
        let units = segment_document(SegmentMode::Sentence, &["Hello big world. Bye."]);
        let layout = layout_units(&units, 10);
        let lines: Vec<String> = layout.lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(lines, vec!["Hello big", "world.", "Bye."]);
        assert_eq!(layout.unit_line, vec![0, 2]);
        assert_eq!(layout.lines[0][1].unit, Some(0));
    }

    #[test]
    fn test_space_between_units_is_unowned() {
        let units = segment_document(SegmentMode::Word, &["a b"]);
        let layout = layout_units(&units, 80);
        assert_eq!(layout.lines[0][1].unit, None);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let units = segment_document(SegmentMode::Word, &["日本 語"]);
        let layout = layout_units(&units, 5);
        assert_eq!(layout.lines.len(), 2);
    }

    #[test]
    fn test_centered_offset() {
        assert_eq!(centered_offset(3, 20), 0);
        assert_eq!(centered_offset(30, 20), 20);
    }

    #[test]
    fn test_render_units_highlights_one_unit() {
        let units = segment_document(SegmentMode::Word, &["a b c"]);
        let layout = layout_units(&units, 80);
        let lines = render_units(&layout, Some((1, "red")));
        let spans = &lines[0].spans;
        assert_eq!(spans[2].content, "b");
        assert_eq!(spans[2].style.bg, Some(Color::Red));
        assert_ne!(spans[0].style.bg, Some(Color::Red));
    }

    #[test]
    fn test_render_blocks_shape() {
        let document = crate::document::markdown::parse("# Title\n\n* one\n* two\n\n---");
        let lines = render_blocks(&document);
        let texts: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(texts[0], "# Title");
        assert_eq!(texts[2], "• one");
        assert_eq!(texts[3], "• two");
        assert!(texts[5].starts_with('─'));
    }

    #[test]
    fn test_progress_bar_fill() {
        let line = render_progress_bar(50, "word 5/10 running");
        assert_eq!(line.spans[0].content.chars().count(), 10);
        assert_eq!(line.spans[1].content.chars().count(), 10);
    }
}
