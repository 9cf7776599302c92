use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How paragraph text is cut into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    #[default]
    Word,
    Sentence,
}

impl fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentMode::Word => write!(f, "word"),
            SegmentMode::Sentence => write!(f, "sentence"),
        }
    }
}

impl FromStr for SegmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "word" | "w" => Ok(SegmentMode::Word),
            "sentence" | "s" => Ok(SegmentMode::Sentence),
            other => Err(format!("unknown segmentation mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Word,
    Sentence,
}

impl From<SegmentMode> for UnitKind {
    fn from(mode: SegmentMode) -> Self {
        match mode {
            SegmentMode::Word => UnitKind::Word,
            SegmentMode::Sentence => UnitKind::Sentence,
        }
    }
}

/// Smallest addressable chunk of text for playback.
///
/// `index` is global across the whole document; `paragraph` is the position
/// of the source paragraph so the view can rebuild paragraph breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub index: usize,
    pub paragraph: usize,
    pub kind: UnitKind,
    pub text: String,
}

impl Unit {
    /// Whitespace-separated words in the unit, never less than one.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("word".parse::<SegmentMode>(), Ok(SegmentMode::Word));
        assert_eq!("Sentence".parse::<SegmentMode>(), Ok(SegmentMode::Sentence));
        assert!("paragraph".parse::<SegmentMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [SegmentMode::Word, SegmentMode::Sentence] {
            assert_eq!(mode.to_string().parse::<SegmentMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_word_count() {
        let unit = Unit {
            index: 0,
            paragraph: 0,
            kind: UnitKind::Sentence,
            text: "Hello   world. ".to_string(),
        };
        assert_eq!(unit.word_count(), 2);
    }

    #[test]
    fn test_word_count_never_zero() {
        let unit = Unit {
            index: 0,
            paragraph: 0,
            kind: UnitKind::Sentence,
            text: " ".to_string(),
        };
        assert_eq!(unit.word_count(), 1);
    }
}
