//! Per-document outcomes and the session summary

use crate::error::FailureKind;
use infobox_template::Diagnostic;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of processing one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditOutcome {
    /// Document rendered; persisted unless dry-run or unchanged
    Success {
        /// Entity identifier
        entity: String,
        /// Article title edited
        title: String,
        /// Whether the text differs from the fetched one
        changed: bool,
        /// Whether the store accepted the new text
        persisted: bool,
        /// Findings collected while editing
        diagnostics: Vec<Diagnostic>,
    },
    /// Document left untouched
    Failure {
        /// Entity identifier
        entity: String,
        /// Failure tag
        kind: FailureKind,
        /// Human-readable detail
        detail: String,
    },
}

impl EditOutcome {
    /// Entity the outcome belongs to
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::Success { entity, .. } | Self::Failure { entity, .. } => entity,
        }
    }

    /// Whether the document was edited
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Diagnostics of a successful edit; empty for failures
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Success { diagnostics, .. } => diagnostics,
            Self::Failure { .. } => &[],
        }
    }
}

/// Whole percent of `part` in `total`, rounded half up; zero for an empty total
#[must_use]
pub fn whole_percent(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (part * 100 + total / 2) / total
}

/// Outcomes of a session in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    outcomes: Vec<EditOutcome>,
}

impl SessionReport {
    /// Create empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome
    pub fn push(&mut self, outcome: EditOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes
    #[inline]
    #[must_use]
    pub fn outcomes(&self) -> &[EditOutcome] {
        &self.outcomes
    }

    /// Entities attempted
    #[inline]
    #[must_use]
    pub fn ordered(&self) -> usize {
        self.outcomes.len()
    }

    /// Entities edited
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Entities left untouched
    #[must_use]
    pub fn failed(&self) -> usize {
        self.ordered() - self.succeeded()
    }

    /// Documents the store accepted
    #[must_use]
    pub fn persisted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EditOutcome::Success { persisted: true, .. }))
            .count()
    }

    /// Diagnostics that call for manual verification
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.outcomes
            .iter()
            .flat_map(EditOutcome::diagnostics)
            .filter(|d| d.is_warning())
            .count()
    }

    /// Success ratio in whole percent
    #[must_use]
    pub fn success_percent(&self) -> usize {
        whole_percent(self.succeeded(), self.ordered())
    }

    /// Failure ratio in whole percent
    #[must_use]
    pub fn failure_percent(&self) -> usize {
        whole_percent(self.failed(), self.ordered())
    }

    /// Failure counts per kind
    #[must_use]
    pub fn failures_by_kind(&self) -> BTreeMap<FailureKind, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if let EditOutcome::Failure { kind, .. } = outcome {
                *counts.entry(*kind).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Extend<EditOutcome> for SessionReport {
    fn extend<I: IntoIterator<Item = EditOutcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}

impl FromIterator<EditOutcome> for SessionReport {
    fn from_iter<I: IntoIterator<Item = EditOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infobox_reference::ReferenceSafety;

    fn success(entity: &str, persisted: bool) -> EditOutcome {
        EditOutcome::Success {
            entity: entity.into(),
            title: entity.into(),
            changed: true,
            persisted,
            diagnostics: vec![Diagnostic::Reference {
                field: "população_ref".into(),
                name: Some("pop".into()),
                safety: ReferenceSafety::Unsafe,
            }],
        }
    }

    fn failure(entity: &str, kind: FailureKind) -> EditOutcome {
        EditOutcome::Failure {
            entity: entity.into(),
            kind,
            detail: "x".into(),
        }
    }

    #[test]
    fn counts_and_ratios() {
        let report: SessionReport = vec![
            success("a", true),
            success("b", false),
            failure("c", FailureKind::NotFound),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.ordered(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.persisted(), 1);
        assert_eq!(report.warnings(), 2);
        assert_eq!(report.success_percent(), 67);
        assert_eq!(report.failure_percent(), 33);
        assert_eq!(report.failures_by_kind().get(&FailureKind::NotFound), Some(&1));
    }

    #[test]
    fn empty_report() {
        let report = SessionReport::new();
        assert_eq!(report.success_percent(), 0);
        assert_eq!(report.failure_percent(), 0);
    }

    #[test]
    fn rounding() {
        assert_eq!(whole_percent(1, 8), 13);
        assert_eq!(whole_percent(1, 3), 33);
        assert_eq!(whole_percent(5, 5), 100);
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(failure("c", FailureKind::MalformedTemplate)).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "malformed_template");
    }
}
