//! Template model
//!
//! Parses a located block into a [`FieldMap`], applies attribute edits and
//! re-renders the block deterministically. Each logical attribute (population,
//! HDI, ...) spans several keys: value, year, citation, plus legacy aliases that
//! edits clear so articles migrate to the current key names.

use crate::diagnostics::Diagnostic;
use crate::error::{RankingArgument, RenderError, ScanError};
use crate::fields::FieldMap;
use crate::render::{FieldRenderer, RankingArgs};
use crate::scanner::{DocumentScanner, PairTracker, TemplateSpan};
use crate::schema::TemplateSchema;
use infobox_reference::{ReferenceGuard, ReferenceSafety};
use std::fmt::Display;

/// Fields read from a block, plus tokens that carried no `=`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBlock {
    /// Parsed fields in encounter order
    pub fields: FieldMap,
    /// Trimmed tokens skipped for lack of `=`
    pub skipped: Vec<String>,
}

/// Split a block into `key = value` fields
///
/// The outer `{{` / `}}` and the template name are dropped. Parameters are
/// separated by `|` at nesting depth zero, so pipes inside nested templates
/// (`{{fmtn |1}}`), links (`[[A|B]]`), citations, comments and `<nowiki>`
/// stay in their value. Keys and values
/// are trimmed; a token without `=` is skipped, never an error.
#[must_use]
pub fn parse_block(block: &str) -> ParsedBlock {
    let interior = block
        .strip_prefix("{{")
        .and_then(|b| b.strip_suffix("}}"))
        .unwrap_or(block);

    let mut parsed = ParsedBlock::default();
    // first token is the template name
    for token in split_top_level(interior).into_iter().skip(1) {
        match token.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                parsed.fields.set(key.trim(), value.trim());
            }
            _ => {
                let token = token.trim();
                if !token.is_empty() {
                    tracing::debug!(token, "skipping template token without '='");
                    parsed.skipped.push(token.to_string());
                }
            }
        }
    }
    parsed
}

fn split_top_level(interior: &str) -> Vec<&str> {
    let bytes = interior.as_bytes();
    let mut braces = PairTracker::braces();
    let mut links = PairTracker::brackets();
    let mut tokens = Vec::new();
    let mut from = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'<' {
            if let Some(end) = opaque_end(interior, i) {
                i = end;
                continue;
            }
        }
        braces.feed(byte);
        links.feed(byte);
        if byte == b'|' && braces.depth() == 0 && links.depth() == 0 {
            tokens.push(&interior[from..i]);
            from = i + 1;
        }
        i += 1;
    }
    tokens.push(&interior[from..]);
    tokens
}

/// Elements whose content the wiki parser never splits on `|`
const OPAQUE_ELEMENTS: &[&str] = &["ref", "nowiki"];

/// Offset right after the comment or opaque element starting at `at`
///
/// `None` when nothing opaque starts there or it never closes; the text is
/// then split as usual.
fn opaque_end(text: &str, at: usize) -> Option<usize> {
    let rest = text.get(at..)?;
    if let Some(comment) = rest.strip_prefix("<!--") {
        return comment.find("-->").map(|end| at + 4 + end + 3);
    }
    OPAQUE_ELEMENTS
        .iter()
        .find_map(|element| element_len(rest, element))
        .map(|len| at + len)
}

/// Length of `<element ...>...</element>` (or `<element ... />`) at the
/// start of `rest`, names compared ignoring ASCII case
fn element_len(rest: &str, element: &str) -> Option<usize> {
    let name = rest.get(1..=element.len())?;
    let after = rest.get(element.len() + 1..)?;
    if !name.eq_ignore_ascii_case(element)
        || !after.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/')
    {
        return None;
    }

    let mut quote = None;
    let mut open_end = None;
    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => {
                open_end = Some(i);
                break;
            }
            (None, _) => {}
        }
    }
    let open_end = open_end?;
    if rest[..open_end].ends_with('/') {
        return Some(open_end + 1);
    }

    let lower = rest.to_ascii_lowercase();
    let closing = format!("</{element}");
    let close = open_end + lower[open_end..].find(&closing)?;
    let close_end = close + lower[close..].find('>')?;
    Some(close_end + 1)
}

/// Editable view of one template block
///
/// Borrows the schema tables and the full article text; the latter is only
/// read, to classify citations before they are overwritten.
#[derive(Debug, Clone)]
pub struct TemplateModel<'a> {
    schema: &'a TemplateSchema,
    document: &'a str,
    fields: FieldMap,
    renderer: FieldRenderer,
    guard: ReferenceGuard,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TemplateModel<'a> {
    /// Parse `block`, a template block taken from `document`
    #[must_use]
    pub fn parse(schema: &'a TemplateSchema, document: &'a str, block: &str) -> Self {
        let ParsedBlock { fields, skipped } = parse_block(block);
        let diagnostics = skipped
            .into_iter()
            .map(|token| Diagnostic::ParseSkip { token })
            .collect();

        Self {
            schema,
            document,
            fields,
            renderer: FieldRenderer::new(),
            guard: ReferenceGuard::new(),
            diagnostics,
        }
    }

    /// Locate the schema's block in `document` and parse it
    ///
    /// # Errors
    /// `NotFound` or `MalformedTemplate` from the scanner.
    pub fn from_document(
        schema: &'a TemplateSchema,
        document: &'a str,
    ) -> Result<(TemplateSpan, Self), ScanError> {
        let span = DocumentScanner::new().locate(document, &schema.marker())?;
        let block = &document[span.range()];
        Ok((span, Self::parse(schema, document, block)))
    }

    /// Schema tables in use
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &TemplateSchema {
        self.schema
    }

    /// Current fields
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Value of `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    /// Insert or overwrite `key`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.set(key, value);
    }

    /// Remove `key`; absent keys are a no-op
    pub fn clear(&mut self, key: &str) {
        self.fields.clear(key);
    }

    /// Findings collected so far
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Move findings out, leaving none
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Present keys missing from the canonical order, in encounter order
    #[must_use]
    pub fn unranked_fields(&self) -> Vec<&str> {
        self.fields
            .keys()
            .filter(|key| !self.schema.is_known(key) && !self.schema.is_deprecated(key))
            .collect()
    }

    /// Render the block
    ///
    /// Fields are sorted by canonical rank, ties broken by encounter order;
    /// deprecated keys are dropped. Output depends only on the fields and the
    /// schema, so identical state always renders identical bytes.
    #[must_use]
    pub fn render(&self) -> String {
        let mut ordered: Vec<(usize, usize, &str, &str)> = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, (key, value))| (self.schema.rank(key), index, key, value))
            .collect();
        ordered.sort_by_key(|&(rank, index, _, _)| (rank, index));

        let mut out = format!("{{{{{}\n", self.schema.name());
        for (_, _, key, value) in ordered {
            if self.schema.is_deprecated(key) {
                continue;
            }
            if value.is_empty() {
                out.push_str(&format!("| {key} =\n"));
            } else {
                out.push_str(&format!("| {key} = {value}\n"));
            }
        }
        out.push_str("}}");
        out
    }

    /// Classify the citation currently in `field` before it is replaced
    fn guard_reference(&mut self, field: &str) -> ReferenceSafety {
        let prior = self.fields.get(field).unwrap_or_default();
        let check = self.guard.inspect_replacement(self.document, prior);

        if check.safety.needs_review() {
            tracing::warn!(
                field,
                name = check.name.as_deref().unwrap_or("<unreadable>"),
                occurrences = check.occurrences,
                "replacing a citation used elsewhere in the article; verify it manually"
            );
        }
        if !prior.trim().is_empty() {
            self.diagnostics.push(Diagnostic::Reference {
                field: field.to_string(),
                name: check.name,
                safety: check.safety,
            });
        }
        check.safety
    }

    /// Set population, its year and citation
    pub fn edit_population(
        &mut self,
        population: u64,
        year: i32,
        reference: Option<&str>,
    ) -> ReferenceSafety {
        let safety = self.guard_reference("população_ref");
        self.set("população", population.to_string());
        self.set("data_pop", year.to_string());
        self.set("população_ref", reference.unwrap_or_default());
        self.clear("pop_data");
        self.clear("população_data");
        safety
    }

    /// Set area (km²) and its citation
    pub fn edit_area(&mut self, area: f64, reference: Option<&str>) -> ReferenceSafety {
        let safety = self.guard_reference("área_ref");
        self.set("área", self.renderer.decimal(area));
        self.set("área_ref", reference.unwrap_or_default());
        safety
    }

    /// Set HDI (padded to three decimals), its year and citation
    pub fn edit_hdi(
        &mut self,
        hdi: impl Display,
        year: i32,
        reference: Option<&str>,
    ) -> ReferenceSafety {
        let safety = self.guard_reference("idh_ref");
        self.set("idh", self.renderer.hdi(hdi));
        self.set("data_idh", year.to_string());
        self.set("idh_ref", reference.unwrap_or_default());
        self.clear("idh_data");
        safety
    }

    /// Set Gini coefficient, its year and citation
    pub fn edit_gini(&mut self, gini: f64, year: i32, reference: Option<&str>) -> ReferenceSafety {
        let safety = self.guard_reference("gini_ref");
        self.set("gini", self.renderer.decimal(gini));
        self.set("data_gini", year.to_string());
        self.set("gini_ref", reference.unwrap_or_default());
        self.clear("gini_data");
        safety
    }

    /// Set GDP (as `{{fmtn}}`), its year and citation
    pub fn edit_igp(&mut self, igp: f64, year: i32, reference: Option<&str>) -> ReferenceSafety {
        let safety = self.guard_reference("pib_ref");
        self.set("pib", self.renderer.numeric(igp, None));
        self.set("data_pib", year.to_string());
        self.set("pib_ref", reference.unwrap_or_default());
        self.clear("pib_data");
        safety
    }

    /// Set GDP per capita and its year; this attribute has no citation field
    pub fn edit_igp_per_capita(&mut self, igp_per_capita: f64, year: i32) {
        self.set("pib_per_capita", self.renderer.decimal(igp_per_capita));
        self.set("data_pib_per_capita", year.to_string());
        self.clear("pib_per_capita_data");
    }

    /// Set a ranking field from state and country positions
    ///
    /// # Errors
    /// `MissingRankingArgument`; the model is left unchanged.
    pub fn edit_ranking_field(&mut self, args: &RankingArgs) -> Result<(), RenderError> {
        let kind = args
            .kind
            .ok_or(RenderError::MissingRankingArgument(RankingArgument::Kind))?;
        let text = self.renderer.ranking(args)?;
        self.set(kind.field_key(), text);
        Ok(())
    }
}
