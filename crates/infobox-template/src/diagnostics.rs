//! Structured, non-fatal findings collected while editing a template

use infobox_reference::ReferenceSafety;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// One finding for the orchestrator to log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Block token without `=` was skipped during parsing
    ParseSkip {
        /// Trimmed token text
        token: String,
    },
    /// Citation held by `field` was classified before being overwritten
    Reference {
        /// Field whose citation was replaced
        field: String,
        /// Citation name, if one was read
        name: Option<String>,
        /// Classification
        safety: ReferenceSafety,
    },
    /// Field unknown to the canonical order; rendered after known fields
    UnrankedField {
        /// Field key
        key: String,
    },
}

impl Diagnostic {
    /// Whether this finding calls for manual verification
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Reference { safety, .. } if safety.needs_review())
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseSkip { token } => write!(f, "skipped token without '=': {token}"),
            Self::Reference {
                field,
                name: Some(name),
                safety,
            } => write!(f, "citation '{name}' in '{field}' is {safety}"),
            Self::Reference {
                field,
                name: None,
                safety,
            } => write!(f, "citation in '{field}' is {safety}"),
            Self::UnrankedField { key } => write!(f, "field '{key}' has no canonical position"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        let d = Diagnostic::Reference {
            field: "população_ref".into(),
            name: Some("pop".into()),
            safety: ReferenceSafety::Unsafe,
        };
        assert_eq!(d.to_string(), "citation 'pop' in 'população_ref' is unsafe");
        assert!(d.is_warning());

        let d = Diagnostic::ParseSkip { token: "stray".into() };
        assert!(!d.is_warning());
        assert_eq!(d.to_string(), "skipped token without '=': stray");
    }
}
