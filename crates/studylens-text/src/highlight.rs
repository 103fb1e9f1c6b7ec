//! Markup for monetary amounts and percentages in display text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const CODES: &str = "AUD|USD|CAD|NZD|GBP|EUR|INR|CNY|JPY|SGD";
const NUMBER: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?";

static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

// Applied in order: prefixed currency, code-suffixed currency, percentage.
fn patterns() -> &'static [Regex] {
    PATTERNS.get_or_init(|| {
        [
            format!(r"(?:\b(?:{CODES})\s?|\b(?:A|US|C|NZ|S)\$\s?|[$€£₹¥]\s?){NUMBER}"),
            format!(r"\b{NUMBER}\s?(?:{CODES})\b"),
            r"\b\d+(?:\.\d+)?\s?%".to_string(),
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Markup wrapped around each highlighted figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub open: String,
    pub close: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            open: r#"<span class="highlight-amount">"#.to_string(),
            close: "</span>".to_string(),
        }
    }
}

enum Segment<'a> {
    Plain(&'a str),
    Marked(&'a str),
}

/// Wraps currency amounts and percentages in a configurable marker
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    style: HighlightStyle,
}

impl Highlighter {
    pub fn new(style: HighlightStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Return `text` with every recognised figure wrapped in the marker.
    /// Text without figures comes back unchanged.
    pub fn highlight(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in segments(text) {
            match segment {
                Segment::Plain(s) => out.push_str(s),
                Segment::Marked(s) => {
                    out.push_str(&self.style.open);
                    out.push_str(s);
                    out.push_str(&self.style.close);
                }
            }
        }
        out
    }
}

/// Highlight with the default `<span>` marker
pub fn highlight(text: &str) -> String {
    Highlighter::default().highlight(text)
}

/// All figures the highlighter would mark, in text order
pub fn find_amounts(text: &str) -> Vec<String> {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Marked(s) => Some(s.to_string()),
            Segment::Plain(_) => None,
        })
        .collect()
}

// Later patterns only see plain segments, so marked spans are never rescanned.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = vec![Segment::Plain(text)];
    for re in patterns() {
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Plain(s) => split_plain(re, s, &mut next),
                marked => next.push(marked),
            }
        }
        segments = next;
    }
    segments
}

fn split_plain<'a>(re: &Regex, text: &'a str, out: &mut Vec<Segment<'a>>) {
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            out.push(Segment::Plain(&text[last..m.start()]));
        }
        out.push(Segment::Marked(m.as_str()));
        last = m.end();
    }
    if last < text.len() || text.is_empty() {
        out.push(Segment::Plain(&text[last..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Your enrolment is confirmed for semester one.";
        assert_eq!(highlight(text), text);
        assert_eq!(highlight(""), "");
    }

    #[test]
    fn test_dollar_amount_wrapped() {
        let out = highlight("awarded a scholarship of $5,000 at Example University");
        assert_eq!(
            out,
            r#"awarded a scholarship of <span class="highlight-amount">$5,000</span> at Example University"#
        );
    }

    #[test]
    fn test_codes_and_percentages() {
        let text = "Tuition AUD 38,500.50 per year, deposit 5000 AUD, 20% discount";
        assert_eq!(
            find_amounts(text),
            vec!["AUD 38,500.50", "5000 AUD", "20%"]
        );
    }

    #[test]
    fn test_marked_span_not_rescanned() {
        let style = HighlightStyle {
            open: "[".to_string(),
            close: "]".to_string(),
        };
        let highlighter = Highlighter::new(style);
        assert_eq!(highlighter.highlight("£1,200 or 15%"), "[£1,200] or [15%]");
        assert_eq!(highlighter.highlight("A$250 and US$99.99"), "[A$250] and [US$99.99]");
    }

    #[test]
    fn test_bare_numbers_ignored() {
        let text = "Course code 012345G, 48 weeks";
        assert_eq!(highlight(text), text);
    }
}
