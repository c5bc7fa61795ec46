//! Session history ledger
//!
//! A plain-text file kept by the operators: a free-form header closed by a
//! rule of 120 dashes, then one entry per session, newest first. Entry ids
//! are zero-padded to five digits and increase by one per session.

use crate::report::SessionReport;
use chrono::{DateTime, FixedOffset, Timelike};
use infobox_reference::access_date;
use std::fmt::{self, Display, Formatter};

/// Width of the zero-padded entry id
const ENTRY_ID_DIGITS: usize = 5;

/// Length of the dash rule that ends the header
const HEADER_RULE_LEN: usize = 120;

/// One session's entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Sequential id
    pub id: u32,
    /// When the session finished
    pub recorded_at: DateTime<FixedOffset>,
    /// Entities attempted
    pub ordered: usize,
    /// Entities edited
    pub done: usize,
    /// Internal note
    pub note: String,
    /// Public edit summary
    pub summary: String,
    /// Person running the session
    pub operator: String,
}

impl HistoryEntry {
    /// Build the entry for `report`
    #[must_use]
    pub fn from_report(
        id: u32,
        report: &SessionReport,
        recorded_at: DateTime<FixedOffset>,
        summary: impl Into<String>,
        operator: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            recorded_at,
            ordered: report.ordered(),
            done: report.succeeded(),
            note: note.into(),
            summary: summary.into(),
            operator: operator.into(),
        }
    }
}

impl Display for HistoryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let failed = self.ordered - self.done;
        let at = &self.recorded_at;
        writeln!(
            f,
            "[{:0width$}] @ {} {:02}:{:02} (GMT {})",
            self.id,
            access_date(at.date_naive()),
            at.hour(),
            at.minute(),
            at.offset(),
            width = ENTRY_ID_DIGITS
        )?;
        writeln!(f, "Edições encomendadas: {}", self.ordered)?;
        writeln!(
            f,
            "Edições concluídas: {} ({}%)",
            self.done,
            crate::report::whole_percent(self.done, self.ordered)
        )?;
        writeln!(
            f,
            "Edições fracassadas: {failed} ({}%)",
            crate::report::whole_percent(failed, self.ordered)
        )?;
        writeln!(f, "Comentário interno: {}", self.note)?;
        writeln!(f, "Descrição pública da edição: {}", self.summary)?;
        writeln!(f, "Operador: {}", self.operator)
    }
}

/// Ledger text with its header located
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLedger {
    text: String,
}

impl HistoryLedger {
    /// Wrap existing ledger text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Ledger text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offset where entries start: after the rule and its line break
    fn entries_start(&self) -> usize {
        let rule = "-".repeat(HEADER_RULE_LEN);
        match self.text.find(&rule) {
            Some(at) => {
                let after = at + HEADER_RULE_LEN;
                if self.text[after..].starts_with('\n') {
                    after + 1
                } else {
                    after
                }
            }
            None => 0,
        }
    }

    /// Id for the next entry: newest id plus one, or 1 for an empty ledger
    #[must_use]
    pub fn next_id(&self) -> u32 {
        let entries = &self.text[self.entries_start()..];
        entries
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .and_then(|(digits, _)| digits.parse::<u32>().ok())
            .map_or(1, |newest| newest + 1)
    }

    /// Insert `entry` above the previous newest entry
    pub fn insert(&mut self, entry: &HistoryEntry) {
        let at = self.entries_start();
        self.text.insert_str(at, &format!("{entry}\n"));
    }

    /// Consume the ledger
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::report::EditOutcome;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn header() -> String {
        format!("Histórico de execuções\n{}\n", "-".repeat(HEADER_RULE_LEN))
    }

    fn entry(id: u32) -> HistoryEntry {
        let report: SessionReport = vec![
            EditOutcome::Success {
                entity: "Ijuí".into(),
                title: "Ijuí".into(),
                changed: true,
                persisted: true,
                diagnostics: vec![],
            },
            EditOutcome::Failure {
                entity: "Cruz".into(),
                kind: FailureKind::ArticleNotFound,
                detail: "x".into(),
            },
        ]
        .into_iter()
        .collect();
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        HistoryEntry::from_report(id, &report, at, "Atualizado IDHM.", "Ana", "teste")
    }

    #[test]
    fn entry_text() {
        assert_eq!(
            entry(7).to_string(),
            "[00007] @ 5 de março de 2024 09:07 (GMT -03:00)\n\
             Edições encomendadas: 2\n\
             Edições concluídas: 1 (50%)\n\
             Edições fracassadas: 1 (50%)\n\
             Comentário interno: teste\n\
             Descrição pública da edição: Atualizado IDHM.\n\
             Operador: Ana\n"
        );
    }

    #[test]
    fn empty_ledger_starts_at_one() {
        assert_eq!(HistoryLedger::new(header()).next_id(), 1);
        assert_eq!(HistoryLedger::new("").next_id(), 1);
    }

    #[test]
    fn newest_entry_goes_first() {
        let mut ledger = HistoryLedger::new(header());
        ledger.insert(&entry(ledger.next_id()));
        assert_eq!(ledger.next_id(), 2);
        ledger.insert(&entry(ledger.next_id()));

        let text = ledger.into_string();
        let first = text.find("[00002]").unwrap();
        let second = text.find("[00001]").unwrap();
        assert!(text.starts_with(&header()));
        assert!(first < second);
    }
}
