/// Line-oriented view of a text document.
///
/// Content is split on `\n` only, so carriage returns and the trailing empty
/// element after a final newline are kept and [`Document::render`] reproduces
/// the input byte-for-byte. Splicing never mutates in place: it builds a new
/// `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Return a copy with `block` placed as a single element at `index`.
    ///
    /// Every line previously at `index` or later shifts down by one. An
    /// `index` equal to [`len`](Self::len) appends.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    pub fn with_block_inserted(&self, index: usize, block: &str) -> Self {
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.extend_from_slice(&self.lines[..index]);
        lines.push(block.to_string());
        lines.extend_from_slice(&self.lines[index..]);
        Self { lines }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_trailing_empty_line() {
        let doc = Document::parse("# Title\n---\n## Next\n");
        assert_eq!(doc.lines(), &["# Title", "---", "## Next", ""]);
    }

    #[test]
    fn test_render_round_trips_crlf() {
        let content = "# Title\r\n---\r\n## Next\r\n";
        assert_eq!(Document::parse(content).render(), content);
    }

    #[test]
    fn test_insert_shifts_following_lines() {
        let doc = Document::parse("# Title\n---\n## Next\n");
        let patched = doc.with_block_inserted(2, "WARNING");

        assert_eq!(patched.lines(), &["# Title", "---", "WARNING", "## Next", ""]);
        // Original is untouched
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_multiline_block_is_one_element() {
        let doc = Document::parse("# T\n## A");
        let patched = doc.with_block_inserted(1, "\n## ⚠️ X\n---\n");

        assert_eq!(patched.len(), 3);
        assert_eq!(patched.render(), "# T\n\n## ⚠️ X\n---\n\n## A");
    }

    #[test]
    fn test_insert_at_end_appends() {
        let doc = Document::parse("# T\n---");
        let patched = doc.with_block_inserted(doc.len(), "W");
        assert_eq!(patched.render(), "# T\n---\nW");
    }
}
