//! Edit session orchestrator
//!
//! Processes entities strictly one at a time. Each document goes through
//! fetch, a pure in-memory transformation and persist; any failure abandons
//! that document before persistence and is recorded as a tagged outcome, so
//! one bad document never affects its neighbours.

use crate::collaborator::{DocumentStore, ValueSource};
use crate::config::{CitedAttribute, SessionConfig};
use crate::error::{SessionError, SessionResult};
use crate::record::EntityRecord;
use crate::report::{EditOutcome, SessionReport};
use crate::resolve::resolve_article;
use crate::states::{normalize_state, state_acronym};
use chrono::{Local, NaiveDate};
use infobox_reference::{ReferenceGuard, ReferenceSafety};
use infobox_template::{
    schema_for, Diagnostic, DocumentScanner, RankingArgs, TemplateModel, TemplateSchema,
};
use std::collections::HashMap;

/// A document after the in-memory transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedDocument {
    /// Full new text
    pub text: String,
    /// Whether `text` differs from the input
    pub changed: bool,
    /// Findings collected while editing
    pub diagnostics: Vec<Diagnostic>,
}

/// State of an entity in both spellings
#[derive(Debug, Clone, Copy)]
struct StateNames {
    name: &'static str,
    acronym: &'static str,
}

/// Orchestrates edits over a store and a value source
#[derive(Debug)]
pub struct EditSession<S, V> {
    config: SessionConfig,
    schema: &'static TemplateSchema,
    store: S,
    source: V,
    guard: ReferenceGuard,
    accessed: NaiveDate,
}

impl<S: DocumentStore, V: ValueSource> EditSession<S, V> {
    /// Create session
    ///
    /// # Errors
    /// `Config` if the configured template has no known schema.
    pub fn new(config: SessionConfig, store: S, source: V) -> SessionResult<Self> {
        let schema = schema_for(&config.template).ok_or_else(|| {
            SessionError::Config(format!("unknown template '{}'", config.template))
        })?;

        Ok(Self {
            config,
            schema,
            store,
            source,
            guard: ReferenceGuard::new(),
            accessed: Local::now().date_naive(),
        })
    }

    /// With the access date stamped into generated citations
    #[must_use]
    pub fn with_access_date(mut self, accessed: NaiveDate) -> Self {
        self.accessed = accessed;
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Document store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, returning its collaborators
    #[must_use]
    pub fn into_parts(self) -> (S, V) {
        (self.store, self.source)
    }

    /// Process every entity the value source lists
    pub fn run(&mut self) -> SessionReport {
        let entities = self.source.entities();
        self.run_entities(entities)
    }

    /// Process `entities` in order
    pub fn run_entities<I>(&mut self, entities: I) -> SessionReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = SessionReport::new();
        for entity in entities {
            report.push(self.process(entity.as_ref()));
        }

        tracing::info!(
            ordered = report.ordered(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            success_percent = report.success_percent(),
            dry_run = self.config.dry_run,
            "session finished"
        );
        report
    }

    /// Process one entity, never failing past its own outcome
    pub fn process(&mut self, entity: &str) -> EditOutcome {
        match self.try_process(entity) {
            Ok(outcome) => outcome,
            Err(err) => {
                let kind = err.kind();
                tracing::error!(entity, %kind, error = %err, "document abandoned");
                EditOutcome::Failure {
                    entity: entity.to_string(),
                    kind,
                    detail: err.to_string(),
                }
            }
        }
    }

    fn try_process(&mut self, entity: &str) -> SessionResult<EditOutcome> {
        let record = self.source.record(entity)?;
        let state = self.state_of(entity, &record)?;
        let name = if record.name.is_empty() {
            entity
        } else {
            record.name.as_str()
        };

        let article = resolve_article(
            &self.store,
            name,
            state.map(|s| s.name),
            &self.schema.marker(),
        )?;
        let edited = self.edit_document(&article.text, &record)?;

        let persisted = if self.config.dry_run || !edited.changed {
            false
        } else {
            self.store
                .persist(&article.title, &edited.text, &self.config.summary)?;
            true
        };

        tracing::info!(
            entity,
            title = %article.title,
            changed = edited.changed,
            persisted,
            diagnostics = edited.diagnostics.len(),
            "document edited"
        );
        Ok(EditOutcome::Success {
            entity: entity.to_string(),
            title: article.title,
            changed: edited.changed,
            persisted,
            diagnostics: edited.diagnostics,
        })
    }

    fn state_of(&self, entity: &str, record: &EntityRecord) -> SessionResult<Option<StateNames>> {
        let Some(raw) = record.state.as_deref().or(self.config.state.as_deref()) else {
            return Ok(None);
        };
        let name = normalize_state(raw)
            .ok_or_else(|| SessionError::source(entity, format!("unknown state '{raw}'")))?;
        let acronym = state_acronym(name)
            .ok_or_else(|| SessionError::source(entity, format!("unknown state '{raw}'")))?;
        Ok(Some(StateNames { name, acronym }))
    }

    /// Citation markup for `attribute`: the record's own, else the session's
    fn reference_for(&self, attribute: CitedAttribute, own: Option<&str>) -> Option<String> {
        own.map(str::to_string).or_else(|| {
            self.config
                .citations
                .get(attribute)
                .map(|citation| citation.render(self.accessed))
        })
    }

    /// Apply `record` to `document` without touching any collaborator
    ///
    /// # Errors
    /// `NotFound`/`MalformedTemplate` when the block cannot be located,
    /// `MalformedReferenceTag` when supplied citation markup is unreadable,
    /// `MissingRankingArgument` when a ranking lacks its state code,
    /// `Source` when the record names an unknown state.
    pub fn edit_document(&self, document: &str, record: &EntityRecord) -> SessionResult<EditedDocument> {
        let (span, mut model) = TemplateModel::from_document(self.schema, document)?;

        let mut references: HashMap<CitedAttribute, Option<String>> = HashMap::new();
        let cited = [
            (CitedAttribute::Population, record.population.as_ref().map(|m| m.citation.as_deref())),
            (CitedAttribute::Area, record.area.as_ref().map(|a| a.citation.as_deref())),
            (CitedAttribute::Hdi, record.hdi.as_ref().map(|m| m.citation.as_deref())),
            (CitedAttribute::Gini, record.gini.as_ref().map(|m| m.citation.as_deref())),
            (CitedAttribute::Igp, record.igp.as_ref().map(|m| m.citation.as_deref())),
        ];
        for (attribute, own) in cited {
            let Some(own) = own else { continue };
            let reference = self.reference_for(attribute, own);
            if let Some(markup) = reference.as_deref().filter(|m| !m.trim().is_empty()) {
                self.guard.describe(markup)?;
            }
            references.insert(attribute, reference);
        }
        let reference =
            |attribute: CitedAttribute| references.get(&attribute).and_then(Option::as_deref);

        let priors: HashMap<&'static str, String> = references
            .keys()
            .filter_map(|attribute| {
                let key = attribute.reference_key();
                model.get(key).map(|prior| (key, prior.to_string()))
            })
            .collect();

        if let Some(population) = &record.population {
            model.edit_population(
                population.value,
                population.year,
                reference(CitedAttribute::Population),
            );
        }
        if let Some(area) = &record.area {
            model.edit_area(area.value, reference(CitedAttribute::Area));
        }
        if let Some(hdi) = &record.hdi {
            model.edit_hdi(hdi.value, hdi.year, reference(CitedAttribute::Hdi));
        }
        if let Some(gini) = &record.gini {
            model.edit_gini(gini.value, gini.year, reference(CitedAttribute::Gini));
        }
        if let Some(igp) = &record.igp {
            model.edit_igp(igp.value, igp.year, reference(CitedAttribute::Igp));
        }
        if let Some(per_capita) = &record.igp_per_capita {
            model.edit_igp_per_capita(per_capita.value, per_capita.year);
        }

        let acronym = self.state_of(&record.name, record)?.map(|s| s.acronym);
        for position in &record.rankings {
            let titles = self.config.rankings.get(position.kind);
            let mut args = RankingArgs::new(position.kind).positions(position.state, position.country);
            args.state = acronym.map(str::to_string);
            args.state_article.clone_from(&titles.state);
            args.country_article.clone_from(&titles.country);
            model.edit_ranking_field(&args)?;
        }

        let mut diagnostics = model.take_diagnostics();
        diagnostics.extend(
            model
                .unranked_fields()
                .into_iter()
                .map(|key| Diagnostic::UnrankedField { key: key.to_string() }),
        );
        for diagnostic in &diagnostics {
            tracing::debug!(%diagnostic, "edit diagnostic");
        }

        let mut text = DocumentScanner::new().replace(document, span, &model.render())?;
        if self.config.relocate_shared_citations {
            text = self.relocate_shared_bodies(text, &diagnostics, &priors, &model)?;
        }

        Ok(EditedDocument {
            changed: text != document,
            text,
            diagnostics,
        })
    }

    /// Give each overwritten shared citation's body to its first reuse tag
    fn relocate_shared_bodies(
        &self,
        mut text: String,
        diagnostics: &[Diagnostic],
        priors: &HashMap<&'static str, String>,
        model: &TemplateModel<'_>,
    ) -> SessionResult<String> {
        for diagnostic in diagnostics {
            let Diagnostic::Reference {
                field,
                name: Some(name),
                safety: ReferenceSafety::Unsafe,
            } = diagnostic
            else {
                continue;
            };
            let Some(prior) = priors.get(field.as_str()) else {
                continue;
            };
            let Ok(Some(body)) = self.guard.extract_body(prior) else {
                continue;
            };

            // new value still defines the citation
            let current = model.get(field).unwrap_or_default();
            if let Ok(descriptor) = self.guard.describe(current) {
                if descriptor.name.as_deref() == Some(name.as_str()) && descriptor.body.is_some() {
                    continue;
                }
            }

            match self.guard.find_reuse_tag(&text, name) {
                Some(range) => {
                    let definition = self.guard.inject_body(&text[range.clone()], &body)?;
                    text.replace_range(range, &definition);
                    tracing::info!(field = %field, name = %name, "moved shared citation body to its first reuse");
                }
                None => {
                    tracing::warn!(field = %field, name = %name, "shared citation has no reuse tag to receive its body");
                }
            }
        }
        Ok(text)
    }
}
