use crate::document::Document;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n{2,}").expect("blank line pattern is valid");
}

/// Splits plain text into paragraphs on runs of blank lines.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let content = content.replace("\r\n", "\n");
    BLANK_LINES
        .split(&content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse(content: &str) -> Document {
    Document::from_paragraphs(&split_paragraphs(content))
}

/// Paragraphs joined by one blank line.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<&str>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let text = "First para\nstill first.\n\nSecond.\n\n\n\nThird.";
        assert_eq!(
            split_paragraphs(text),
            vec!["First para\nstill first.", "Second.", "Third."]
        );
    }

    #[test]
    fn test_split_handles_crlf() {
        assert_eq!(split_paragraphs("a\r\n\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(split_paragraphs("\n\n  a  \n\n\n\n"), vec!["a"]);
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn test_join_then_split_round_trip() {
        let paragraphs = vec!["One.".to_string(), "Two, three.".to_string()];
        assert_eq!(split_paragraphs(&join_paragraphs(&paragraphs)), paragraphs);
    }
}
