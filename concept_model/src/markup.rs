//! Inline math spans in display text.
//!
//! Descriptions, questions, and solutions embed math between a pair of `$`
//! markers. This module only separates the spans; turning math into markup is
//! left to the renderer.

use serde::Serialize;

/// Marker opening and closing an inline math span.
pub const MATH_DELIMITER: char = '$';

/// A run of display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment<'a> {
    Text(&'a str),
    Math(&'a str),
}

/// Split text into ordered plain and math segments.
///
/// Spans are matched non-greedily from left to right. A trailing marker with
/// no partner is kept as plain text, as are empty plain runs between spans.
pub fn split_math(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(MATH_DELIMITER) {
        let after_open = &rest[open + MATH_DELIMITER.len_utf8()..];
        let Some(close) = after_open.find(MATH_DELIMITER) else {
            break;
        };

        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        segments.push(Segment::Math(&after_open[..close]));
        rest = &after_open[close + MATH_DELIMITER.len_utf8()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// Whether the text contains at least one complete math span.
pub fn contains_math(text: &str) -> bool {
    split_math(text)
        .iter()
        .any(|segment| matches!(segment, Segment::Math(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(split_math("no math here"), vec![Segment::Text("no math here")]);
        assert!(!contains_math("no math here"));
    }

    #[test]
    fn test_mixed_segments() {
        let segments = split_math("Since $a^2+b^2=c^2$, we get $c$.");
        assert_eq!(
            segments,
            vec![
                Segment::Text("Since "),
                Segment::Math("a^2+b^2=c^2"),
                Segment::Text(", we get "),
                Segment::Math("c"),
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn test_unterminated_marker_is_text() {
        assert_eq!(
            split_math("$x$ costs $5"),
            vec![Segment::Math("x"), Segment::Text(" costs $5")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split_math("").is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        let segments = split_math("正弦 $\\sin\\theta$ 函數");
        assert_eq!(segments[1], Segment::Math("\\sin\\theta"));
        assert_eq!(segments[2], Segment::Text(" 函數"));
    }
}
