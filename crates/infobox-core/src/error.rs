//! Error types for the edit session
//!
//! Every failure that can end the processing of one document maps to a
//! [`FailureKind`], the stable tag recorded in the per-document outcome.

use infobox_reference::ReferenceError;
use infobox_template::{RenderError, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Template block could not be located
    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),

    /// A ranking field could not be rendered
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// A citation fragment supplied for the edit is unreadable
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Neither the entity name nor its qualified form is an article with the template
    #[error("article not found for '{name}' ({state})")]
    ArticleNotFound {
        /// Entity name
        name: String,
        /// State name used for the qualified title
        state: String,
    },

    /// Reading a document from the store failed
    #[error("fetch of '{document}' failed: {reason}")]
    Fetch {
        /// Document identifier
        document: String,
        /// Store-provided reason
        reason: String,
    },

    /// Writing a document to the store failed
    #[error("persist of '{document}' failed: {reason}")]
    Persist {
        /// Document identifier
        document: String,
        /// Store-provided reason
        reason: String,
    },

    /// The value source has no usable record for the entity
    #[error("no values for '{entity}': {reason}")]
    Source {
        /// Entity identifier
        entity: String,
        /// Source-provided reason
        reason: String,
    },

    /// Session configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Create fetch error
    #[inline]
    pub fn fetch(document: impl Into<String>, reason: impl Display) -> Self {
        Self::Fetch {
            document: document.into(),
            reason: reason.to_string(),
        }
    }

    /// Create persist error
    #[inline]
    pub fn persist(document: impl Into<String>, reason: impl Display) -> Self {
        Self::Persist {
            document: document.into(),
            reason: reason.to_string(),
        }
    }

    /// Create value source error
    #[inline]
    pub fn source(entity: impl Into<String>, reason: impl Display) -> Self {
        Self::Source {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable tag for outcome accounting
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Scan(ScanError::NotFound { .. }) => FailureKind::NotFound,
            Self::Scan(_) => FailureKind::MalformedTemplate,
            Self::Render(RenderError::MissingRankingArgument(_)) => {
                FailureKind::MissingRankingArgument
            }
            Self::Reference(ReferenceError::MalformedReferenceTag { .. }) => {
                FailureKind::MalformedReferenceTag
            }
            Self::ArticleNotFound { .. } => FailureKind::ArticleNotFound,
            Self::Fetch { .. } => FailureKind::Fetch,
            Self::Persist { .. } => FailureKind::Persist,
            Self::Source { .. } => FailureKind::Source,
            Self::Config(_) => FailureKind::Config,
        }
    }
}

/// Why a document was not edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Template marker absent from the document
    NotFound,
    /// Template nesting never balances
    MalformedTemplate,
    /// A supplied citation has no closing tag
    MalformedReferenceTag,
    /// Ranking edit lacks a code or position
    MissingRankingArgument,
    /// No article could be resolved for the entity
    ArticleNotFound,
    /// Store read failed
    Fetch,
    /// Store write failed
    Persist,
    /// Value source failed
    Source,
    /// Configuration rejected
    Config,
}

impl FailureKind {
    /// Kebab-case label used in logs and reports
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::MalformedTemplate => "malformed-template",
            Self::MalformedReferenceTag => "malformed-reference-tag",
            Self::MissingRankingArgument => "missing-ranking-argument",
            Self::ArticleNotFound => "article-not-found",
            Self::Fetch => "fetch",
            Self::Persist => "persist",
            Self::Source => "source",
            Self::Config => "config",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use infobox_template::RankingArgument;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(SessionError::from(ScanError::not_found("{{X")).kind(), FailureKind::NotFound);
        assert_eq!(
            SessionError::from(ScanError::malformed("{{X", 3)).kind(),
            FailureKind::MalformedTemplate
        );
        assert_eq!(
            SessionError::from(RenderError::MissingRankingArgument(RankingArgument::State)).kind(),
            FailureKind::MissingRankingArgument
        );
        assert_eq!(
            SessionError::from(ReferenceError::malformed("<ref")).kind(),
            FailureKind::MalformedReferenceTag
        );
        assert_eq!(SessionError::persist("Ijuí", "quota").kind(), FailureKind::Persist);
    }

    #[test]
    fn messages() {
        assert_eq!(
            SessionError::fetch("Ijuí", "timeout").to_string(),
            "fetch of 'Ijuí' failed: timeout"
        );
        assert_eq!(FailureKind::MalformedTemplate.to_string(), "malformed-template");
    }
}
