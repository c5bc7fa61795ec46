//! Reference guard
//!
//! Reads citation fragments (`<ref ...>...</ref>`) and classifies whether the
//! citation held by a field can be overwritten without breaking reuses of the
//! same named citation elsewhere in the article.

use crate::error::{ReferenceError, ReferenceResult};
use crate::tag::OpeningTag;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

/// Overwrite safety of a field's current citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceSafety {
    /// Named citation defined exactly once; nothing else points at it
    Safe,
    /// Named citation reused elsewhere, or its name could not be read
    Unsafe,
    /// Citation has no name, so nothing can reuse it
    NotNamed,
}

impl ReferenceSafety {
    /// Whether the classification calls for manual verification
    #[inline]
    #[must_use]
    pub fn needs_review(self) -> bool {
        matches!(self, Self::Unsafe)
    }
}

impl Display for ReferenceSafety {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Safe => "safe",
            Self::Unsafe => "unsafe",
            Self::NotNamed => "not-named",
        };
        f.write_str(label)
    }
}

/// Name and body read from one citation fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    /// Value of the `name` attribute, if any
    pub name: Option<String>,
    /// Text between the opening and closing tags, if the body holds a template
    pub body: Option<String>,
}

/// Detailed outcome of [`ReferenceGuard::inspect_replacement`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCheck {
    /// Classification
    pub safety: ReferenceSafety,
    /// Citation name, when one was read
    pub name: Option<String>,
    /// Occurrences of `name` in the document
    pub occurrences: usize,
}

impl ReferenceCheck {
    fn not_named() -> Self {
        Self {
            safety: ReferenceSafety::NotNamed,
            name: None,
            occurrences: 0,
        }
    }
}

/// Citation reader and overwrite-safety classifier
///
/// Stateless; all methods are pure functions of their inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGuard;

impl ReferenceGuard {
    /// Create new guard
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read the `name` attribute of the fragment's opening tag
    ///
    /// Both `name=` and `name =` are accepted. Quoted values may contain
    /// spaces or `>`. An empty name counts as no name.
    ///
    /// # Errors
    /// `MalformedReferenceTag` if the opening tag never closes.
    pub fn extract_ref_name(&self, markup: &str) -> ReferenceResult<Option<String>> {
        let tag = OpeningTag::scan(markup)?;
        Ok(tag
            .attribute("name")
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }

    /// Read the citation body between the opening tag and the next `</`
    ///
    /// Returns `None` when the fragment holds no nested template (`{{`), as
    /// with reuse tags like `<ref name="x" />`.
    ///
    /// # Errors
    /// `MalformedReferenceTag` if the tag never closes, or if the body is
    /// empty or never reaches a closing tag.
    pub fn extract_body(&self, markup: &str) -> ReferenceResult<Option<String>> {
        if !markup.contains("{{") {
            return Ok(None);
        }

        let tag = OpeningTag::scan(markup)?;
        let rest = &markup[tag.end..];
        match rest.find("</") {
            Some(0) | None => Err(ReferenceError::malformed(markup)),
            Some(end) => Ok(Some(rest[..end].to_string())),
        }
    }

    /// Derive name and body of a fragment
    ///
    /// # Errors
    /// Propagates `MalformedReferenceTag` from either extraction.
    pub fn describe(&self, markup: &str) -> ReferenceResult<ReferenceDescriptor> {
        Ok(ReferenceDescriptor {
            name: self.extract_ref_name(markup)?,
            body: self.extract_body(markup)?,
        })
    }

    /// Classify overwriting `prior_value` inside `document`
    ///
    /// Advisory only: callers proceed with the edit in every case.
    #[must_use]
    pub fn check_replacement(&self, document: &str, prior_value: &str) -> ReferenceSafety {
        self.inspect_replacement(document, prior_value).safety
    }

    /// Like [`check_replacement`](Self::check_replacement), keeping the name
    /// and occurrence count for diagnostics
    #[must_use]
    pub fn inspect_replacement(&self, document: &str, prior_value: &str) -> ReferenceCheck {
        if prior_value.trim().is_empty() {
            return ReferenceCheck::not_named();
        }

        match self.extract_ref_name(prior_value) {
            Ok(None) => ReferenceCheck::not_named(),
            Ok(Some(name)) => {
                let occurrences = ref_tags(document)
                    .filter(|(_, tag)| tag.attribute("name") == Some(name.as_str()))
                    .count();
                let safety = if occurrences > 1 {
                    ReferenceSafety::Unsafe
                } else {
                    ReferenceSafety::Safe
                };
                tracing::debug!(%name, occurrences, %safety, "classified citation overwrite");
                ReferenceCheck {
                    safety,
                    name: Some(name),
                    occurrences,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "unreadable citation treated as unsafe");
                ReferenceCheck {
                    safety: ReferenceSafety::Unsafe,
                    name: None,
                    occurrences: 0,
                }
            }
        }
    }

    /// Byte range of the first reuse tag (`<ref name="x" />`) for `name`
    ///
    /// Opening tags that carry a body, other elements and unreadable
    /// fragments are skipped.
    #[must_use]
    pub fn find_reuse_tag(&self, text: &str, name: &str) -> Option<Range<usize>> {
        ref_tags(text)
            .find(|(_, tag)| tag.is_self_closing() && tag.attribute("name") == Some(name))
            .map(|(start, tag)| start + tag.start..start + tag.end)
    }

    /// Give a reuse tag its own body
    ///
    /// `<ref name="x" />` becomes `<ref name="x">BODY</ref>`; an already-open
    /// tag gets `body` inserted right after its `>`. Text around the tag is
    /// kept as is.
    ///
    /// # Errors
    /// `MalformedReferenceTag` if the opening tag never closes.
    pub fn inject_body(&self, reuse_markup: &str, body: &str) -> ReferenceResult<String> {
        let tag = OpeningTag::scan(reuse_markup)?;
        let before = &reuse_markup[..tag.start];
        let after = &reuse_markup[tag.end..];

        if tag.is_self_closing() {
            let open = tag.inner.trim_end().trim_end_matches('/').trim_end();
            let element = open.split_whitespace().next().unwrap_or("ref");
            Ok(format!("{before}<{open}>{body}</{element}>{after}"))
        } else {
            Ok(format!("{}{body}{after}", &reuse_markup[..tag.end]))
        }
    }
}

/// Opening `<ref` tags of `text` with their offsets, in order
///
/// Stops at the first tag that never closes.
fn ref_tags(text: &str) -> impl Iterator<Item = (usize, OpeningTag<'_>)> + '_ {
    let mut offset = 0;
    std::iter::from_fn(move || loop {
        let start = offset + text.get(offset..)?.find("<ref")?;
        let tag = OpeningTag::scan(&text[start..]).ok()?;
        offset = start + tag.end;
        let is_ref = tag.inner.strip_prefix("ref").is_some_and(|rest| {
            rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '/')
        });
        if is_ref {
            return Some((start, tag));
        }
    })
}
