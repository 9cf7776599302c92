use crate::reading::unit::{SegmentMode, Unit, UnitKind};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest run up to and including a terminator, or to the end of input.
    ///
    /// A heuristic: abbreviations ("Dr."), decimals ("3.14") and quoted
    /// punctuation all split early, and a terminator run such as "?!" keeps
    /// only its first character.
    static ref SENTENCE: Regex = Regex::new(r"[^.!?]+[.!?]?").expect("sentence pattern is valid");
}

/// Splits one paragraph into display strings for the given mode.
///
/// Word pieces are bare tokens. Sentence pieces drop the leading whitespace
/// left over from the previous terminator and carry one trailing space as
/// the separator used when the view joins them back together.
pub fn split_text(mode: SegmentMode, text: &str) -> Vec<String> {
    match mode {
        SegmentMode::Word => text.split_whitespace().map(str::to_string).collect(),
        SegmentMode::Sentence => {
            let pieces: Vec<String> = SENTENCE
                .find_iter(text)
                .map(|m| m.as_str().trim_start())
                .filter(|piece| !piece.is_empty())
                .map(|piece| format!("{} ", piece))
                .collect();

            if pieces.is_empty() && !text.trim().is_empty() {
                vec![format!("{} ", text.trim())]
            } else {
                pieces
            }
        }
    }
}

/// Segments a single paragraph, numbering units from `first_index`.
pub fn segment(mode: SegmentMode, paragraph: usize, text: &str, first_index: usize) -> Vec<Unit> {
    let kind = UnitKind::from(mode);
    split_text(mode, text)
        .into_iter()
        .enumerate()
        .map(|(offset, text)| Unit {
            index: first_index + offset,
            paragraph,
            kind,
            text,
        })
        .collect()
}

/// Segments every paragraph into one flattened sequence with contiguous
/// global indices. Blank paragraphs are skipped without consuming a
/// paragraph number.
pub fn segment_document<S: AsRef<str>>(mode: SegmentMode, paragraphs: &[S]) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut paragraph = 0;

    for text in paragraphs {
        let text = text.as_ref().trim();
        if text.is_empty() {
            continue;
        }
        let next = segment(mode, paragraph, text, units.len());
        units.extend(next);
        paragraph += 1;
    }

    units
}
