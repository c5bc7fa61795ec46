//! Field value presets
//!
//! Converts domain values into the text forms the infobox fields expect.
//! Number shapes are locale independent: `.` is always the decimal separator.

use crate::error::{RankingArgument, RenderError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Width HDI values are right-padded to (`0.800`)
const HDI_WIDTH: usize = 5;

/// Country label used in ranking segments
const COUNTRY_CODE: &str = "BR";

/// Field that carries an entity's position in a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
    /// Resident population
    Population,
    /// Human development index
    Hdi,
    /// Gini coefficient
    Gini,
    /// Gross domestic product
    Igp,
}

impl RankingKind {
    /// Every ranking kind
    pub const ALL: [Self; 4] = [Self::Population, Self::Hdi, Self::Gini, Self::Igp];

    /// Template key holding this ranking
    #[must_use]
    pub fn field_key(self) -> &'static str {
        match self {
            Self::Population => "população_pos",
            Self::Hdi => "idh_pos",
            Self::Gini => "gini_pos",
            Self::Igp => "pib_pos",
        }
    }
}

/// Arguments of a ranking edit
///
/// Kind, state code and both positions are required; the article titles only
/// decide whether a segment renders as a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingArgs {
    /// Which ranking
    pub kind: Option<RankingKind>,
    /// State or region code, e.g. `RS`
    pub state: Option<String>,
    /// Position within the state (1-based)
    pub pos_in_state: Option<u32>,
    /// Position within the country (1-based)
    pub pos_in_country: Option<u32>,
    /// Title of the article listing the full state ranking
    pub state_article: Option<String>,
    /// Title of the article listing the full country ranking
    pub country_article: Option<String>,
}

impl RankingArgs {
    /// Start arguments for `kind`
    #[must_use]
    pub fn new(kind: RankingKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// With state code
    #[must_use]
    pub fn state(mut self, code: impl Into<String>) -> Self {
        self.state = Some(code.into());
        self
    }

    /// With both positions
    #[must_use]
    pub fn positions(mut self, in_state: u32, in_country: u32) -> Self {
        self.pos_in_state = Some(in_state);
        self.pos_in_country = Some(in_country);
        self
    }

    /// With state ranking article
    #[must_use]
    pub fn state_article(mut self, title: impl Into<String>) -> Self {
        self.state_article = Some(title.into());
        self
    }

    /// With country ranking article
    #[must_use]
    pub fn country_article(mut self, title: impl Into<String>) -> Self {
        self.country_article = Some(title.into());
        self
    }
}

/// Formatting presets for infobox values
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRenderer;

impl FieldRenderer {
    /// Create new renderer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Number wrapped in the `{{fmtn}}` template
    ///
    /// Integral values render as plain digits, others with exactly two
    /// decimals. `unit` becomes a second template argument.
    #[must_use]
    pub fn numeric(&self, value: f64, unit: Option<&str>) -> String {
        let number = if value.is_finite() && value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        };
        match unit.filter(|u| !u.is_empty()) {
            Some(unit) => format!("{{{{fmtn |{number} |{unit}}}}}"),
            None => format!("{{{{fmtn |{number}}}}}"),
        }
    }

    /// Plain decimal text, shortest form keeping one decimal on integral
    /// values (`1.0`, not `1`)
    #[must_use]
    pub fn decimal(&self, value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 {
            format!("{value:.1}")
        } else {
            value.to_string()
        }
    }

    /// HDI text right-padded with `0` to five characters
    ///
    /// `0.8` becomes `0.800` and a bare integer `1` becomes `1.000`; longer
    /// values are left untouched.
    #[must_use]
    pub fn hdi(&self, value: impl Display) -> String {
        let mut text = value.to_string();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            text.push('.');
        }
        let len = text.chars().count();
        if len < HDI_WIDTH {
            text.extend(std::iter::repeat('0').take(HDI_WIDTH - len));
        }
        text
    }

    /// Two-scope ranking text, e.g. `[[Lista...|RS: 3º]] BR: 120º`
    ///
    /// # Errors
    /// `MissingRankingArgument` if kind, state code or either position is
    /// absent. A position of zero counts as absent.
    pub fn ranking(&self, args: &RankingArgs) -> Result<String, RenderError> {
        let missing = RenderError::MissingRankingArgument;
        args.kind.ok_or(missing(RankingArgument::Kind))?;
        let state = args
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(missing(RankingArgument::State))?;
        let in_state = args
            .pos_in_state
            .filter(|p| *p > 0)
            .ok_or(missing(RankingArgument::StatePosition))?;
        let in_country = args
            .pos_in_country
            .filter(|p| *p > 0)
            .ok_or(missing(RankingArgument::CountryPosition))?;

        let state_segment = segment(state, in_state, args.state_article.as_deref());
        let country_segment = segment(COUNTRY_CODE, in_country, args.country_article.as_deref());
        Ok(format!("{state_segment} {country_segment}"))
    }
}

fn segment(code: &str, position: u32, article: Option<&str>) -> String {
    match article.filter(|a| !a.is_empty()) {
        Some(article) => format!("[[{article}|{code}: {position}º]]"),
        None => format!("{code}: {position}º"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_integral() {
        let r = FieldRenderer::new();
        assert_eq!(r.numeric(1_234_000.0, None), "{{fmtn |1234000}}");
        assert_eq!(r.numeric(0.0, None), "{{fmtn |0}}");
    }

    #[test]
    fn numeric_fractional() {
        let r = FieldRenderer::new();
        assert_eq!(r.numeric(1234.5, None), "{{fmtn |1234.50}}");
        assert_eq!(r.numeric(2.005_1, None), "{{fmtn |2.01}}");
    }

    #[test]
    fn numeric_with_unit() {
        let r = FieldRenderer::new();
        assert_eq!(r.numeric(42.0, Some("km2")), "{{fmtn |42 |km2}}");
        assert_eq!(r.numeric(42.0, Some("")), "{{fmtn |42}}");
    }

    #[test]
    fn decimal_is_shortest() {
        let r = FieldRenderer::new();
        assert_eq!(r.decimal(496.682), "496.682");
        assert_eq!(r.decimal(0.5), "0.5");
        assert_eq!(r.decimal(700.0), "700.0");
    }

    #[test]
    fn hdi_padding() {
        let r = FieldRenderer::new();
        assert_eq!(r.hdi("0.8"), "0.800");
        assert_eq!(r.hdi(0.8), "0.800");
        assert_eq!(r.hdi("0,8"), "0,800");
        assert_eq!(r.hdi("0.8567"), "0.8567");
        assert_eq!(r.hdi("0.812"), "0.812");
        assert_eq!(r.hdi(1.0), "1.000");
        assert_eq!(r.hdi(1), "1.000");
        assert_eq!(r.hdi(0.0), "0.000");
    }

    #[test]
    fn ranking_link_and_plain() {
        let r = FieldRenderer::new();
        let args = RankingArgs::new(RankingKind::Population)
            .state("RS")
            .positions(3, 120)
            .state_article("Lista de municípios do Rio Grande do Sul por população");
        assert_eq!(
            r.ranking(&args).unwrap(),
            "[[Lista de municípios do Rio Grande do Sul por população|RS: 3º]] BR: 120º"
        );
    }

    #[test]
    fn ranking_both_links() {
        let r = FieldRenderer::new();
        let args = RankingArgs::new(RankingKind::Hdi)
            .state("SP")
            .positions(1, 2)
            .state_article("A")
            .country_article("B");
        assert_eq!(r.ranking(&args).unwrap(), "[[A|SP: 1º]] [[B|BR: 2º]]");
    }

    #[test]
    fn ranking_plain_only() {
        let r = FieldRenderer::new();
        let args = RankingArgs::new(RankingKind::Gini).state("BA").positions(7, 900);
        assert_eq!(r.ranking(&args).unwrap(), "BA: 7º BR: 900º");
    }

    #[test]
    fn ranking_missing_arguments() {
        let r = FieldRenderer::new();
        let full = RankingArgs::new(RankingKind::Igp).state("RS").positions(1, 1);

        let mut no_kind = full.clone();
        no_kind.kind = None;
        assert_eq!(
            r.ranking(&no_kind),
            Err(RenderError::MissingRankingArgument(RankingArgument::Kind))
        );

        let mut no_state = full.clone();
        no_state.state = None;
        assert_eq!(
            r.ranking(&no_state),
            Err(RenderError::MissingRankingArgument(RankingArgument::State))
        );

        let mut zero_state_pos = full.clone();
        zero_state_pos.pos_in_state = Some(0);
        assert_eq!(
            r.ranking(&zero_state_pos),
            Err(RenderError::MissingRankingArgument(RankingArgument::StatePosition))
        );

        let mut no_country = full;
        no_country.pos_in_country = None;
        assert_eq!(
            r.ranking(&no_country),
            Err(RenderError::MissingRankingArgument(RankingArgument::CountryPosition))
        );
    }

    #[test]
    fn ranking_keys() {
        let keys: Vec<_> = RankingKind::ALL.iter().map(|k| k.field_key()).collect();
        assert_eq!(keys, vec!["população_pos", "idh_pos", "gini_pos", "pib_pos"]);
    }
}
