//! Opening-tag scanner for citation fragments
//!
//! Walks a fragment as a small state machine so that `>` or whitespace inside
//! a quoted attribute value never ends the tag early.

use crate::error::{ReferenceError, ReferenceResult};

/// Scanner position relative to the opening tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the tag's `<`
    Default,
    /// Inside `<...`, outside any quoted value
    InsideOpenMarker,
    /// Inside a quoted attribute value opened by the given quote
    InsideQuotedAttribute(char),
}

/// Located opening tag of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpeningTag<'a> {
    /// Byte offset of `<`
    pub(crate) start: usize,
    /// Byte offset immediately after the closing `>`
    pub(crate) end: usize,
    /// Text between `<` and `>`
    pub(crate) inner: &'a str,
}

impl<'a> OpeningTag<'a> {
    /// Scan `fragment` for its first opening tag
    ///
    /// # Errors
    /// `MalformedReferenceTag` if the tag never reaches an unquoted `>`.
    pub(crate) fn scan(fragment: &'a str) -> ReferenceResult<Self> {
        let mut state = ScanState::Default;
        let mut start = 0;

        for (i, c) in fragment.char_indices() {
            state = match (state, c) {
                (ScanState::Default, '<') => {
                    start = i;
                    ScanState::InsideOpenMarker
                }
                (ScanState::Default, _) => ScanState::Default,
                (ScanState::InsideOpenMarker, '"' | '\'') => ScanState::InsideQuotedAttribute(c),
                (ScanState::InsideOpenMarker, '>') => {
                    return Ok(Self {
                        start,
                        end: i + 1,
                        inner: &fragment[start + 1..i],
                    });
                }
                (ScanState::InsideOpenMarker, _) => ScanState::InsideOpenMarker,
                (ScanState::InsideQuotedAttribute(q), c) if c == q => ScanState::InsideOpenMarker,
                (ScanState::InsideQuotedAttribute(q), _) => ScanState::InsideQuotedAttribute(q),
            };
        }

        Err(ReferenceError::malformed(fragment))
    }

    /// Whether the tag closes itself (`<ref name="x" />`)
    pub(crate) fn is_self_closing(&self) -> bool {
        self.inner.trim_end().ends_with('/')
    }

    /// Value of the first attribute called `key`, unquoted
    ///
    /// Accepts both `key=value` and spaced `key = value` forms.
    pub(crate) fn attribute(&self, key: &str) -> Option<&'a str> {
        Attributes::new(self.inner).find(|(name, _)| *name == key).map(|(_, value)| value)
    }
}

/// Iterator over `name=value` pairs inside an opening tag
struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Attributes<'a> {
    fn new(inner: &'a str) -> Self {
        // skip the element name
        let after_name = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .map_or("", |i| &inner[i..]);
        Self { rest: after_name }
    }

    fn take_while_unquoted(&mut self) -> &'a str {
        let end = self
            .rest
            .find(|c: char| c.is_whitespace() || c == '/' || c == '=')
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    fn take_value(&mut self) -> &'a str {
        match self.rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &self.rest[1..];
                let end = body.find(q).unwrap_or(body.len());
                let value = &body[..end];
                self.rest = body.get(end + 1..).unwrap_or("");
                value
            }
            _ => {
                let end = self
                    .rest
                    .find(|c: char| c.is_whitespace() || c == '/')
                    .unwrap_or(self.rest.len());
                let (value, tail) = self.rest.split_at(end);
                self.rest = tail;
                value
            }
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.rest = self.rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
            if self.rest.is_empty() {
                return None;
            }

            let name = self.take_while_unquoted();
            self.rest = self.rest.trim_start();
            if let Some(after_eq) = self.rest.strip_prefix('=') {
                self.rest = after_eq.trim_start();
                return Some((name, self.take_value()));
            }
            // bare attribute without value: keep looking
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_simple_tag() {
        let tag = OpeningTag::scan(r#"<ref name="a">body</ref>"#).unwrap();
        assert_eq!(tag.start, 0);
        assert_eq!(tag.end, 14);
        assert_eq!(tag.inner, r#"ref name="a""#);
        assert!(!tag.is_self_closing());
    }

    #[test]
    fn scan_ignores_gt_inside_quotes() {
        let tag = OpeningTag::scan(r#"<ref name="a>b">x</ref>"#).unwrap();
        assert_eq!(tag.attribute("name"), Some("a>b"));
    }

    #[test]
    fn scan_without_closing_gt_fails() {
        assert!(OpeningTag::scan(r#"<ref name="a""#).is_err());
        assert!(OpeningTag::scan(r#"<ref name="a>"#).is_err());
        assert!(OpeningTag::scan("plain text").is_err());
    }

    #[test]
    fn scan_skips_leading_text() {
        let tag = OpeningTag::scan("  texto <ref>x</ref>").unwrap();
        assert_eq!(tag.start, 8);
        assert_eq!(tag.inner, "ref");
    }

    #[test]
    fn self_closing_detection() {
        let tag = OpeningTag::scan(r#"<ref name="curran108" />"#).unwrap();
        assert!(tag.is_self_closing());
        assert_eq!(tag.attribute("name"), Some("curran108"));
    }

    #[test]
    fn attribute_forms() {
        let spaced = OpeningTag::scan(r#"<ref name = "x y">"#).unwrap();
        assert_eq!(spaced.attribute("name"), Some("x y"));

        let bare = OpeningTag::scan("<ref name=dodd40>").unwrap();
        assert_eq!(bare.attribute("name"), Some("dodd40"));

        let compact = OpeningTag::scan("<ref name=x/>").unwrap();
        assert_eq!(compact.attribute("name"), Some("x"));

        let single = OpeningTag::scan("<ref group='n' name=':0'>").unwrap();
        assert_eq!(single.attribute("group"), Some("n"));
        assert_eq!(single.attribute("name"), Some(":0"));
    }

    #[test]
    fn attribute_absent() {
        let tag = OpeningTag::scan("<ref group=nota>").unwrap();
        assert_eq!(tag.attribute("name"), None);

        let tag = OpeningTag::scan("<ref>").unwrap();
        assert_eq!(tag.attribute("name"), None);
    }
}
