//! Article title resolution
//!
//! Entity names are often ambiguous (`Bonito` exists in several states). The
//! bare name is tried first; when it is a disambiguation page or lacks the
//! template, the state-qualified title `Name (State)` is tried.

use crate::collaborator::DocumentStore;
use crate::error::{SessionError, SessionResult};

/// Marker of a disambiguation page
const DISAMBIGUATION_MARKER: &str = "{{Desambiguação|";

/// Title and text of a resolved article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArticle {
    /// Title the text was fetched under
    pub title: String,
    /// Full article text
    pub text: String,
}

fn without_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ').collect()
}

fn contains_ignoring_spaces(text: &str, needle: &str) -> bool {
    without_spaces(text).contains(&without_spaces(needle))
}

/// Whether `text` is a disambiguation page
#[must_use]
pub fn is_disambiguation(text: &str) -> bool {
    contains_ignoring_spaces(text, DISAMBIGUATION_MARKER)
}

/// Whether `text` holds the template opened by `marker`
#[must_use]
pub fn has_template(text: &str, marker: &str) -> bool {
    contains_ignoring_spaces(text, marker)
}

/// Find the article for `name`
///
/// `state` is the full state name used for the qualified title; without it
/// only the bare name is tried.
///
/// # Errors
/// `ArticleNotFound` when no candidate holds the template; `Fetch` errors from
/// the store are propagated.
pub fn resolve_article<S: DocumentStore + ?Sized>(
    store: &S,
    name: &str,
    state: Option<&str>,
    marker: &str,
) -> SessionResult<ResolvedArticle> {
    if let Some(text) = store.fetch(name)? {
        if !is_disambiguation(&text) && has_template(&text, marker) {
            return Ok(ResolvedArticle {
                title: name.to_string(),
                text,
            });
        }
        tracing::debug!(name, "bare title is not an article with the template");
    }

    if let Some(state) = state {
        let title = format!("{name} ({state})");
        if let Some(text) = store.fetch(&title)? {
            if has_template(&text, marker) {
                return Ok(ResolvedArticle { title, text });
            }
        }
    }

    Err(SessionError::ArticleNotFound {
        name: name.to_string(),
        state: state.unwrap_or_default().to_string(),
    })
}
