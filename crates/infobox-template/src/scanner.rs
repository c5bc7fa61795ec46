//! Document scanner
//!
//! Finds the byte span of a template block inside an article and splices a
//! replacement block back in. Only doubled delimiters (`{{`, `}}`) move the
//! nesting depth; a lone `{` or `}` in free text is never counted.

use crate::error::ScanError;
use std::ops::Range;

/// Byte span of a template block inside a document
///
/// `end` is the offset right after the `}}` that brings nesting back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateSpan {
    /// Offset of the first marker byte
    pub start: usize,
    /// Offset right after the closing pair
    pub end: usize,
}

impl TemplateSpan {
    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span as a range
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Text of the span inside `document`, if it fits
    #[inline]
    #[must_use]
    pub fn slice<'d>(&self, document: &'d str) -> Option<&'d str> {
        document.get(self.range())
    }
}

/// Result of feeding one byte to a [`PairTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairEvent {
    /// A doubled opener raised the depth
    Opened,
    /// A doubled closer lowered the depth
    Closed,
}

/// Pending single delimiter waiting for its twin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairState {
    Default,
    PendingOpen,
    PendingClose,
}

/// Depth counter for one doubled-delimiter kind (`{{ }}` or `[[ ]]`)
///
/// Pairs are consumed without overlap: `{{{` is one opener plus a pending
/// `{`. Closers at depth zero are ignored.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairTracker {
    open: u8,
    close: u8,
    state: PairState,
    depth: usize,
}

impl PairTracker {
    pub(crate) const fn new(open: u8, close: u8) -> Self {
        Self {
            open,
            close,
            state: PairState::Default,
            depth: 0,
        }
    }

    pub(crate) const fn braces() -> Self {
        Self::new(b'{', b'}')
    }

    pub(crate) const fn brackets() -> Self {
        Self::new(b'[', b']')
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn feed(&mut self, byte: u8) -> Option<PairEvent> {
        let (next, event) = match self.state {
            PairState::PendingOpen if byte == self.open => {
                self.depth += 1;
                (PairState::Default, Some(PairEvent::Opened))
            }
            PairState::PendingClose if byte == self.close => {
                if self.depth == 0 {
                    (PairState::Default, None)
                } else {
                    self.depth -= 1;
                    (PairState::Default, Some(PairEvent::Closed))
                }
            }
            _ if byte == self.open => (PairState::PendingOpen, None),
            _ if byte == self.close => (PairState::PendingClose, None),
            _ => (PairState::Default, None),
        };
        self.state = next;
        event
    }
}

/// Locates and replaces template blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentScanner;

impl DocumentScanner {
    /// Create new scanner
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Span of the block opened by the first occurrence of `marker`
    ///
    /// # Errors
    /// - `ScanError::NotFound` if `marker` never occurs
    /// - `ScanError::MalformedTemplate` if the document ends before the
    ///   block's nesting returns to zero
    pub fn locate(&self, document: &str, marker: &str) -> Result<TemplateSpan, ScanError> {
        let start = document
            .find(marker)
            .ok_or_else(|| ScanError::not_found(marker))?;

        let mut braces = PairTracker::braces();
        for (offset, &byte) in document.as_bytes()[start..].iter().enumerate() {
            if braces.feed(byte) == Some(PairEvent::Closed) && braces.depth() == 0 {
                return Ok(TemplateSpan {
                    start,
                    end: start + offset + 1,
                });
            }
        }

        Err(ScanError::malformed(marker, start))
    }

    /// New document with `span` replaced by `new_block`
    ///
    /// Bytes outside `span` are copied verbatim.
    ///
    /// # Errors
    /// `ScanError::InvalidSpan` if `span` is out of bounds or splits a
    /// character.
    pub fn replace(
        &self,
        document: &str,
        span: TemplateSpan,
        new_block: &str,
    ) -> Result<String, ScanError> {
        let invalid = || ScanError::InvalidSpan {
            start: span.start,
            end: span.end,
            len: document.len(),
        };
        if span.start > span.end {
            return Err(invalid());
        }
        let head = document.get(..span.start).ok_or_else(invalid)?;
        let tail = document.get(span.end..).ok_or_else(invalid)?;

        let mut out = String::with_capacity(head.len() + new_block.len() + tail.len());
        out.push_str(head);
        out.push_str(new_block);
        out.push_str(tail);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "{{Info/Município do Brasil";

    #[test]
    fn locate_simple_block() {
        let doc = "intro {{Info/Município do Brasil\n| nome = Ijuí\n}} resto";
        let span = DocumentScanner::new().locate(doc, MARKER).unwrap();
        assert_eq!(span.slice(doc), Some("{{Info/Município do Brasil\n| nome = Ijuí\n}}"));
        assert_eq!(&doc[span.end..], " resto");
    }

    #[test]
    fn locate_skips_nested_pairs() {
        let doc = "{{Info/Município do Brasil\n| pib = {{fmtn |12.00}}\n| x = <ref>{{Citar web|a={{b}}}}</ref>\n}}\n{{outro}}";
        let span = DocumentScanner::new().locate(doc, MARKER).unwrap();
        assert!(span.slice(doc).unwrap().ends_with("</ref>\n}}"));
        assert_eq!(&doc[span.end..], "\n{{outro}}");
    }

    #[test]
    fn locate_ignores_single_delimiters() {
        let doc = "{{Info/Município do Brasil\n| lema = a } b { c\n}}!";
        let span = DocumentScanner::new().locate(doc, MARKER).unwrap();
        assert_eq!(&doc[span.end..], "!");
    }

    #[test]
    fn locate_triple_braces() {
        let doc = "{{Info/Município do Brasil\n| a = {{{param|}}}\n}}.";
        let span = DocumentScanner::new().locate(doc, MARKER).unwrap();
        assert_eq!(&doc[span.end..], ".");
    }

    #[test]
    fn locate_missing_marker() {
        let err = DocumentScanner::new().locate("sem predefinição", MARKER).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn locate_unbalanced() {
        let doc = "texto {{Info/Município do Brasil\n| nome = {{x}}\n";
        let err = DocumentScanner::new().locate(doc, MARKER).unwrap_err();
        assert_eq!(err, ScanError::malformed(MARKER, 6));
    }

    #[test]
    fn replace_keeps_outside_bytes() {
        let doc = "ab{{T|x}}cd";
        let span = DocumentScanner::new().locate(doc, "{{T").unwrap();
        let out = DocumentScanner::new().replace(doc, span, "{{T|y}}").unwrap();
        assert_eq!(out, "ab{{T|y}}cd");
    }

    #[test]
    fn replace_rejects_bad_span() {
        let scanner = DocumentScanner::new();
        let bad = TemplateSpan { start: 3, end: 99 };
        assert!(matches!(
            scanner.replace("abc", bad, "x"),
            Err(ScanError::InvalidSpan { len: 3, .. })
        ));

        // splits the two-byte 'é'
        let split = TemplateSpan { start: 1, end: 2 };
        assert!(scanner.replace("é", split, "x").is_err());
    }

    #[test]
    fn pair_tracker_counts_doubled_only() {
        let mut tracker = PairTracker::brackets();
        let events: Vec<_> = "[[a]] [b] [[".bytes().filter_map(|b| tracker.feed(b)).collect();
        assert_eq!(events, vec![PairEvent::Opened, PairEvent::Closed, PairEvent::Opened]);
        assert_eq!(tracker.depth(), 1);
    }
}
