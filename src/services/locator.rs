use regex::Regex;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Finds where a warning block can be spliced into a document.
///
/// The scan looks for the first top-level title (`# `). From the line after
/// it, the first horizontal rule (`---` or longer) places the insertion point
/// right after the rule; the first second-level heading (`## `) places it
/// right before the heading, unless that heading is itself a previously
/// inserted warning. Whichever comes first wins.
///
/// # Fields
///
/// - `title_pattern`: `^# ` on the trimmed line
/// - `section_pattern`: `^## ` on the trimmed line
/// - `rule_pattern`: `^-{3,}$` on the trimmed line
/// - `warning_heading_prefix`: prefix of inserted warning headings, which are never used as anchors
#[derive(Debug, Clone)]
pub struct InsertionPointLocator {
    title_pattern: Regex,
    section_pattern: Regex,
    rule_pattern: Regex,
    warning_heading_prefix: String,
}

impl InsertionPointLocator {
    pub fn new(warning_heading_prefix: &str) -> Self {
        Self {
            title_pattern: Regex::new(r"^# ").expect("Invalid title regex"),
            section_pattern: Regex::new(r"^## ").expect("Invalid section regex"),
            rule_pattern: Regex::new(r"^-{3,}$").expect("Invalid rule regex"),
            warning_heading_prefix: warning_heading_prefix.to_string(),
        }
    }

    /// Return the line index to insert at, or `None` when the document has
    /// no title or nothing after it to anchor on.
    pub fn locate<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        let title = lines
            .iter()
            .position(|line| self.title_pattern.is_match(normalize(line.as_ref())))?;

        for (index, line) in lines.iter().enumerate().skip(title + 1) {
            let line = normalize(line.as_ref());

            if self.rule_pattern.is_match(line) {
                return Some(index + 1);
            }
            if self.section_pattern.is_match(line) && !line.starts_with(&self.warning_heading_prefix)
            {
                return Some(index);
            }
        }

        None
    }
}

fn normalize(line: &str) -> &str {
    line.trim().trim_start_matches(BYTE_ORDER_MARK)
}
