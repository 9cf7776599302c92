use crate::reading::unit::{Unit, UnitKind};
use std::time::Duration;

/// Display time for one unit, in milliseconds.
///
/// Words always get the base delay. A sentence scales with its word count
/// but never drops below the base delay, so short sentences are not flashed.
pub fn unit_delay_ms(kind: UnitKind, word_count: usize, base_delay_ms: u64, per_word_delay_ms: u64) -> u64 {
    match kind {
        UnitKind::Word => base_delay_ms,
        UnitKind::Sentence => (word_count as u64)
            .saturating_mul(per_word_delay_ms)
            .max(base_delay_ms),
    }
}

pub fn unit_delay(unit: &Unit, base_delay_ms: u64, per_word_delay_ms: u64) -> Duration {
    Duration::from_millis(unit_delay_ms(
        unit.kind,
        unit.word_count(),
        base_delay_ms,
        per_word_delay_ms,
    ))
}

/// Words-per-minute equivalent of a per-word delay, for display.
pub fn milliseconds_to_wpm(delay_ms: u64) -> u32 {
    (60_000.0 / delay_ms.max(1) as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_delay_is_base() {
        assert_eq!(unit_delay_ms(UnitKind::Word, 1, 400, 0), 400);
        assert_eq!(unit_delay_ms(UnitKind::Word, 7, 250, 999), 250);
    }

    #[test]
    fn test_sentence_delay_floored_at_base() {
        // 3 * 400 = 1200 < 1350
        assert_eq!(unit_delay_ms(UnitKind::Sentence, 3, 1350, 400), 1350);
    }

    #[test]
    fn test_sentence_delay_scales_with_words() {
        // 5 * 400 = 2000 > 1350
        assert_eq!(unit_delay_ms(UnitKind::Sentence, 5, 1350, 400), 2000);
    }

    #[test]
    fn test_unit_delay_counts_words() {
        let unit = Unit {
            index: 0,
            paragraph: 0,
            kind: UnitKind::Sentence,
            text: "one two three four. ".to_string(),
        };
        assert_eq!(unit_delay(&unit, 1000, 300), Duration::from_millis(1200));
    }

    #[test]
    fn test_milliseconds_to_wpm() {
        assert_eq!(milliseconds_to_wpm(200), 300);
        assert_eq!(milliseconds_to_wpm(400), 150);
        // 60,000 / 350 = 171.4 → 171
        assert_eq!(milliseconds_to_wpm(350), 171);
    }

    #[test]
    fn test_milliseconds_to_wpm_zero_delay() {
        assert_eq!(milliseconds_to_wpm(0), 60_000);
    }
}
