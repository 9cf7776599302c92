//! Previous/next index arithmetic over the flattened unit sequence.
//!
//! Sentence mode looks for the nearest other unit tagged as a sentence. Every
//! unit produced in sentence mode carries that tag, so in practice this is
//! plain ±1 movement; the search is kept so a mixed sequence would still skip
//! to sentence boundaries.

use crate::reading::unit::{SegmentMode, Unit, UnitKind};

fn last_index(units: &[Unit]) -> usize {
    units.len().saturating_sub(1)
}

pub fn previous_index(units: &[Unit], current: usize, mode: SegmentMode) -> usize {
    match mode {
        SegmentMode::Word => current.saturating_sub(1),
        SegmentMode::Sentence => {
            let end = current.min(units.len());
            units[..end]
                .iter()
                .rposition(|unit| unit.kind == UnitKind::Sentence)
                .unwrap_or(0)
        }
    }
}

pub fn next_index(units: &[Unit], current: usize, mode: SegmentMode) -> usize {
    let last = last_index(units);
    match mode {
        SegmentMode::Word => current.saturating_add(1).min(last),
        SegmentMode::Sentence => {
            let start = current.saturating_add(1);
            if start >= units.len() {
                return last;
            }
            units[start..]
                .iter()
                .position(|unit| unit.kind == UnitKind::Sentence)
                .map(|pos| pos + start)
                .unwrap_or(last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_unit(index: usize, kind: UnitKind) -> Unit {
        Unit {
            index,
            paragraph: 0,
            kind,
            text: format!("u{}", index),
        }
    }

    fn words(n: usize) -> Vec<Unit> {
        (0..n).map(|i| create_test_unit(i, UnitKind::Word)).collect()
    }

    fn sentences(n: usize) -> Vec<Unit> {
        (0..n).map(|i| create_test_unit(i, UnitKind::Sentence)).collect()
    }

    #[test]
    fn test_word_previous_clamps_at_zero() {
        let units = words(4);
        assert_eq!(previous_index(&units, 0, SegmentMode::Word), 0);
        assert_eq!(previous_index(&units, 2, SegmentMode::Word), 1);
    }

    #[test]
    fn test_word_next_clamps_at_last() {
        let units = words(4);
        assert_eq!(next_index(&units, 3, SegmentMode::Word), 3);
        assert_eq!(next_index(&units, 1, SegmentMode::Word), 2);
    }

    #[test]
    fn test_sentence_mode_degenerates_to_step() {
        let units = sentences(5);
        assert_eq!(previous_index(&units, 3, SegmentMode::Sentence), 2);
        assert_eq!(next_index(&units, 3, SegmentMode::Sentence), 4);
        assert_eq!(previous_index(&units, 0, SegmentMode::Sentence), 0);
        assert_eq!(next_index(&units, 4, SegmentMode::Sentence), 4);
    }

    #[test]
    fn test_sentence_mode_skips_non_sentence_units() {
        let units = vec![
            create_test_unit(0, UnitKind::Sentence),
            create_test_unit(1, UnitKind::Word),
            create_test_unit(2, UnitKind::Word),
            create_test_unit(3, UnitKind::Sentence),
            create_test_unit(4, UnitKind::Word),
        ];
        assert_eq!(next_index(&units, 0, SegmentMode::Sentence), 3);
        assert_eq!(previous_index(&units, 3, SegmentMode::Sentence), 0);
        // nothing after 3 tagged as sentence: falls back to the last index
        assert_eq!(next_index(&units, 3, SegmentMode::Sentence), 4);
    }

    #[test]
    fn test_sentence_previous_without_match_is_zero() {
        let units = vec![
            create_test_unit(0, UnitKind::Word),
            create_test_unit(1, UnitKind::Word),
        ];
        assert_eq!(previous_index(&units, 1, SegmentMode::Sentence), 0);
    }

    #[test]
    fn test_cursor_past_end_is_safe() {
        let units = words(3);
        assert_eq!(next_index(&units, 3, SegmentMode::Word), 2);
        assert_eq!(previous_index(&units, 3, SegmentMode::Word), 2);
        assert_eq!(previous_index(&sentences(3), 10, SegmentMode::Sentence), 2);
    }

    #[test]
    fn test_empty_sequence() {
        let units: Vec<Unit> = vec![];
        assert_eq!(next_index(&units, 0, SegmentMode::Word), 0);
        assert_eq!(previous_index(&units, 0, SegmentMode::Sentence), 0);
        assert_eq!(next_index(&units, 0, SegmentMode::Sentence), 0);
    }
}
