//! Infobox Core - Edit Session Orchestrator
//!
//! Drives batch infobox updates: resolves each entity's article, applies its
//! values through the template engine and persists the result, one document
//! at a time.
//!
//! # Architecture
//!
//! ```text
//! ValueSource ──record──▶ EditSession ──fetch/persist──▶ DocumentStore
//!                             │
//!                  resolve_article ─▶ edit_document (TemplateModel)
//!                             │
//!                      EditOutcome ─▶ SessionReport ─▶ HistoryLedger
//! ```
//!
//! A failing document yields [`EditOutcome::Failure`] with a [`FailureKind`];
//! nothing about it reaches the store and the next document proceeds.

#![warn(unreachable_pub)]

pub mod collaborator;
pub mod config;
pub mod error;
pub mod history;
pub mod record;
pub mod report;
pub mod resolve;
pub mod session;
pub mod states;

pub use collaborator::{DocumentStore, ValueSource};
pub use config::{CitationSet, CitedAttribute, RankingArticles, RankingTitles, SessionConfig};
pub use error::{FailureKind, SessionError, SessionResult};
pub use history::{HistoryEntry, HistoryLedger};
pub use record::{Area, Dated, EntityRecord, Measured, RankingPosition};
pub use report::{whole_percent, EditOutcome, SessionReport};
pub use resolve::{resolve_article, ResolvedArticle};
pub use session::{EditSession, EditedDocument};
pub use states::{normalize_state, state_acronym, state_name, STATES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
