//! Attribute values supplied per entity

use infobox_template::RankingKind;
use serde::{Deserialize, Serialize};

/// Value with its reference year and optional citation markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measured<T> {
    /// Value
    pub value: T,
    /// Reference year
    pub year: i32,
    /// Citation markup; overrides the session-wide citation
    #[serde(default)]
    pub citation: Option<String>,
}

impl<T> Measured<T> {
    /// Create value without citation
    pub fn new(value: T, year: i32) -> Self {
        Self {
            value,
            year,
            citation: None,
        }
    }

    /// With citation markup
    #[must_use]
    pub fn cited(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }
}

/// Area in km², which carries no year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Area in km²
    pub value: f64,
    /// Citation markup; overrides the session-wide citation
    #[serde(default)]
    pub citation: Option<String>,
}

/// Value with its reference year; the template has no citation field for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dated<T> {
    /// Value
    pub value: T,
    /// Reference year
    pub year: i32,
}

/// Position of the entity in one ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPosition {
    /// Ranking
    pub kind: RankingKind,
    /// Position within the state
    pub state: u32,
    /// Position within the country
    pub country: u32,
}

/// Everything known about one entity
///
/// Absent attributes are left untouched in the article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRecord {
    /// Entity name, also the first article title tried
    pub name: String,
    /// State, acronym or full name; falls back to the session default
    pub state: Option<String>,
    /// Resident population
    pub population: Option<Measured<u64>>,
    /// Area
    pub area: Option<Area>,
    /// Human development index
    pub hdi: Option<Measured<f64>>,
    /// Gini coefficient
    pub gini: Option<Measured<f64>>,
    /// Gross domestic product
    pub igp: Option<Measured<f64>>,
    /// GDP per capita
    pub igp_per_capita: Option<Dated<f64>>,
    /// Ranking positions
    pub rankings: Vec<RankingPosition>,
}

impl EntityRecord {
    /// Create empty record for `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the record would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.population.is_none()
            && self.area.is_none()
            && self.hdi.is_none()
            && self.gini.is_none()
            && self.igp.is_none()
            && self.igp_per_capita.is_none()
            && self.rankings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_record() {
        let record: EntityRecord = serde_json::from_str(
            r#"{
                "name": "Ijuí",
                "state": "RS",
                "population": {"value": 83475, "year": 2021},
                "hdi": {"value": 0.781, "year": 2010, "citation": "<ref name=\"idh\" />"},
                "rankings": [{"kind": "population", "state": 14, "country": 400}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.population, Some(Measured::new(83_475, 2021)));
        assert_eq!(
            record.hdi.as_ref().and_then(|h| h.citation.as_deref()),
            Some("<ref name=\"idh\" />")
        );
        assert_eq!(record.rankings[0].kind, RankingKind::Population);
        assert!(record.area.is_none());
        assert!(!record.is_empty());
    }

    #[test]
    fn empty_record() {
        assert!(EntityRecord::new("Ijuí").is_empty());
    }
}
