//! Error types for citation analysis

/// Errors raised while reading citation markup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// Fragment has no closing `>` for its opening tag, or a body without `</`
    #[error("malformed reference tag: {fragment}")]
    MalformedReferenceTag {
        /// Leading part of the offending fragment
        fragment: String,
    },
}

impl ReferenceError {
    /// Longest fragment excerpt kept in the error message
    const EXCERPT_CHARS: usize = 80;

    /// Create malformed-tag error, keeping a short excerpt of the fragment
    pub fn malformed(fragment: &str) -> Self {
        let fragment = match fragment.char_indices().nth(Self::EXCERPT_CHARS) {
            Some((cut, _)) => format!("{}...", &fragment[..cut]),
            None => fragment.to_string(),
        };
        Self::MalformedReferenceTag { fragment }
    }
}

/// Result type alias for reference operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = ReferenceError::malformed("<ref name=x");
        assert_eq!(err.to_string(), "malformed reference tag: <ref name=x");
    }

    #[test]
    fn malformed_truncates_long_fragments() {
        let long = "ç".repeat(200);
        let ReferenceError::MalformedReferenceTag { fragment } = ReferenceError::malformed(&long);
        assert!(fragment.ends_with("..."));
        assert_eq!(fragment.chars().count(), 83);
    }
}
