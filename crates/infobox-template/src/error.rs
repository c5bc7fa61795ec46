//! Error types for template handling
//!
//! Provides error handling for:
//! - Locating the template block inside an article
//! - Formatting field values

use std::fmt::{self, Display, Formatter};

/// Errors while locating or splicing a template block
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Marker never occurs in the document
    #[error("template marker not found: '{marker}'")]
    NotFound {
        /// Marker searched for
        marker: String,
    },

    /// Nesting never returns to zero before end of document
    #[error("template '{marker}' starting at byte {start} is never closed")]
    MalformedTemplate {
        /// Marker of the unbalanced block
        marker: String,
        /// Byte offset of the marker
        start: usize,
    },

    /// Span does not fit the document it is applied to
    #[error("span {start}..{end} is invalid for a document of {len} bytes")]
    InvalidSpan {
        /// Span start
        start: usize,
        /// Span end
        end: usize,
        /// Document length in bytes
        len: usize,
    },
}

impl ScanError {
    /// Create not-found error for marker
    pub fn not_found(marker: impl Into<String>) -> Self {
        Self::NotFound {
            marker: marker.into(),
        }
    }

    /// Create malformed-template error
    pub fn malformed(marker: impl Into<String>, start: usize) -> Self {
        Self::MalformedTemplate {
            marker: marker.into(),
            start,
        }
    }
}

/// Required argument of a ranking edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingArgument {
    /// Which ranking (population, HDI, ...)
    Kind,
    /// State or region code, e.g. `RS`
    State,
    /// Position within the state
    StatePosition,
    /// Position within the country
    CountryPosition,
}

impl Display for RankingArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Kind => "ranking kind",
            Self::State => "state code",
            Self::StatePosition => "state position",
            Self::CountryPosition => "country position",
        };
        f.write_str(label)
    }
}

/// Errors while formatting field values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Ranking edit lacks one of its four required values
    #[error("missing ranking argument: {0}")]
    MissingRankingArgument(RankingArgument),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_display() {
        let err = ScanError::not_found("{{Info/Município do Brasil");
        assert_eq!(
            err.to_string(),
            "template marker not found: '{{Info/Município do Brasil'"
        );

        let err = ScanError::malformed("{{Info", 12);
        assert!(err.to_string().contains("byte 12"));
    }

    #[test]
    fn render_error_display() {
        let err = RenderError::MissingRankingArgument(RankingArgument::CountryPosition);
        assert_eq!(err.to_string(), "missing ranking argument: country position");
    }
}
