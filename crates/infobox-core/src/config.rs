//! Session configuration

use infobox_reference::Citation;
use infobox_template::{RankingKind, MUNICIPALITY_TEMPLATE};
use serde::{Deserialize, Serialize};

/// Attribute that carries a citation field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitedAttribute {
    /// `população_ref`
    Population,
    /// `área_ref`
    Area,
    /// `idh_ref`
    Hdi,
    /// `gini_ref`
    Gini,
    /// `pib_ref`
    Igp,
}

impl CitedAttribute {
    /// Template key holding the citation
    #[must_use]
    pub fn reference_key(self) -> &'static str {
        match self {
            Self::Population => "população_ref",
            Self::Area => "área_ref",
            Self::Hdi => "idh_ref",
            Self::Gini => "gini_ref",
            Self::Igp => "pib_ref",
        }
    }
}

/// Session-wide citations, one per attribute
///
/// Records may carry their own citation text, which wins over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationSet {
    /// Population source
    pub population: Option<Citation>,
    /// Area source
    pub area: Option<Citation>,
    /// HDI source
    pub hdi: Option<Citation>,
    /// Gini source
    pub gini: Option<Citation>,
    /// GDP source
    pub igp: Option<Citation>,
}

impl CitationSet {
    /// Citation configured for `attribute`
    #[must_use]
    pub fn get(&self, attribute: CitedAttribute) -> Option<&Citation> {
        match attribute {
            CitedAttribute::Population => self.population.as_ref(),
            CitedAttribute::Area => self.area.as_ref(),
            CitedAttribute::Hdi => self.hdi.as_ref(),
            CitedAttribute::Gini => self.gini.as_ref(),
            CitedAttribute::Igp => self.igp.as_ref(),
        }
    }

    fn slot(&mut self, attribute: CitedAttribute) -> &mut Option<Citation> {
        match attribute {
            CitedAttribute::Population => &mut self.population,
            CitedAttribute::Area => &mut self.area,
            CitedAttribute::Hdi => &mut self.hdi,
            CitedAttribute::Gini => &mut self.gini,
            CitedAttribute::Igp => &mut self.igp,
        }
    }
}

/// Titles of the full-ranking articles linked from a ranking field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingTitles {
    /// State-scope list, e.g. `Lista de municípios do Rio Grande do Sul por população`
    pub state: Option<String>,
    /// Country-scope list, e.g. `Lista de municípios do Brasil por população`
    pub country: Option<String>,
}

/// Ranking article titles per ranking kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingArticles {
    /// Population ranking
    pub population: RankingTitles,
    /// HDI ranking
    pub hdi: RankingTitles,
    /// Gini ranking
    pub gini: RankingTitles,
    /// GDP ranking
    pub igp: RankingTitles,
}

impl RankingArticles {
    /// Titles for `kind`
    #[must_use]
    pub fn get(&self, kind: RankingKind) -> &RankingTitles {
        match kind {
            RankingKind::Population => &self.population,
            RankingKind::Hdi => &self.hdi,
            RankingKind::Gini => &self.gini,
            RankingKind::Igp => &self.igp,
        }
    }

    fn get_mut(&mut self, kind: RankingKind) -> &mut RankingTitles {
        match kind {
            RankingKind::Population => &mut self.population,
            RankingKind::Hdi => &mut self.hdi,
            RankingKind::Gini => &mut self.gini,
            RankingKind::Igp => &mut self.igp,
        }
    }
}

/// Edit session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Template name; the block marker is `{{` + name
    pub template: String,
    /// Edit summary stored with every persisted document
    pub summary: String,
    /// Default state, acronym or full name, for records that carry none
    pub state: Option<String>,
    /// Compute outcomes without persisting
    pub dry_run: bool,
    /// Move the body of an overwritten shared citation to its first reuse site
    pub relocate_shared_citations: bool,
    /// Session-wide citations
    pub citations: CitationSet,
    /// Full-ranking article titles
    pub rankings: RankingArticles,
    /// Person running the session, for the history ledger
    pub operator: Option<String>,
    /// Internal note for the history ledger
    pub note: Option<String>,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With template name
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// With edit summary
    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// With default state
    #[inline]
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// With dry-run flag
    #[inline]
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// With shared-citation relocation
    #[inline]
    #[must_use]
    pub fn with_relocation(mut self, relocate: bool) -> Self {
        self.relocate_shared_citations = relocate;
        self
    }

    /// With session-wide citation for `attribute`
    #[must_use]
    pub fn with_citation(mut self, attribute: CitedAttribute, citation: Citation) -> Self {
        *self.citations.slot(attribute) = Some(citation);
        self
    }

    /// With ranking article titles for `kind`
    #[must_use]
    pub fn with_ranking_articles(
        mut self,
        kind: RankingKind,
        state: Option<String>,
        country: Option<String>,
    ) -> Self {
        *self.rankings.get_mut(kind) = RankingTitles { state, country };
        self
    }

    /// With operator name
    #[inline]
    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            template: MUNICIPALITY_TEMPLATE.to_string(),
            summary: "Atualização de dados municipais".to_string(),
            state: None,
            dry_run: false,
            relocate_shared_citations: false,
            citations: CitationSet::default(),
            rankings: RankingArticles::default(),
            operator: None,
            note: None,
        }
    }
}
