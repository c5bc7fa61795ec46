//! Static field tables for a template
//!
//! The canonical order and deprecated set are fixed data; a model borrows a
//! schema for its whole lifetime and never changes it.

/// Template name of the Brazilian municipality infobox
pub const MUNICIPALITY_TEMPLATE: &str = "Info/Município do Brasil";

const MUNICIPALITY_ORDER: &[&str] = &[
    "nome",
    "nome_oficial",
    "preposição",
    "foto",
    "leg_foto",
    "oculta bandeira",
    "bandeira",
    "oculta brasão",
    "brasão",
    "link_bandeira",
    "link_brasão",
    "oculta hino",
    "link_hino",
    "lema",
    "gentílico",
    "mapa",
    "esconde_estado",
    "posição",
    "latP",
    "latG",
    "latM",
    "latS",
    "lonP",
    "lonG",
    "lonM",
    "lonS",
    "estado",
    "região_metropolitana",
    "vizinhos",
    "dist_capital",
    "dist_capital_ref",
    "capital_link",
    "fundação",
    "emancipação",
    "distritos",
    "distritos_ref",
    "prefeito",
    "partido",
    "mandato_início",
    "vereadores",
    "vereadores_ref",
    "área",
    "área_ref",
    "área_pos",
    "área_urbana",
    "área_urbana_data",
    "área_urbana_ref",
    "população",
    "data_pop",
    "pop_data",
    "população_data",
    "população_ref",
    "população_pos",
    "densidade",
    "clima",
    "sigla_clima",
    "clima_ref",
    "altitude",
    "altitude_ref",
    "fuso",
    "CEP",
    "idh",
    "idh_data",
    "data_idh",
    "idh_ref",
    "idh_pos",
    "gini",
    "gini_data",
    "data_gini",
    "gini_ref",
    "gini_pos",
    "pib",
    "pib_data",
    "data_pib",
    "pib_ref",
    "pib_pos",
    "pib_per_capita",
    "pib_per_capita_data",
    "data_pib_per_capita",
    "site_prefeitura",
    "site",
    "site_câmara",
];

const MUNICIPALITY_DEPRECATED: &[&str] = &[
    "apelido",
    "aniversário",
    "microrregião",
    "data_microrregião",
    "mesorregião",
    "data_mesorregião",
    "região_intermediária",
    "data_região_intermediária",
    "região_imediata",
    "data_região_imediata",
    "padroeiro",
];

/// Field tables of one template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSchema {
    name: &'static str,
    canonical_order: &'static [&'static str],
    deprecated: &'static [&'static str],
}

/// Brazilian municipality infobox
pub static MUNICIPALITY: TemplateSchema = TemplateSchema::new(
    MUNICIPALITY_TEMPLATE,
    MUNICIPALITY_ORDER,
    MUNICIPALITY_DEPRECATED,
);

impl TemplateSchema {
    /// Create schema from static tables
    #[must_use]
    pub const fn new(
        name: &'static str,
        canonical_order: &'static [&'static str],
        deprecated: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            canonical_order,
            deprecated,
        }
    }

    /// Template name, e.g. `Info/Município do Brasil`
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marker that opens the block in an article: `{{` + name
    #[must_use]
    pub fn marker(&self) -> String {
        format!("{{{{{}", self.name)
    }

    /// Keys never rendered
    #[inline]
    #[must_use]
    pub fn deprecated(&self) -> &'static [&'static str] {
        self.deprecated
    }

    /// Sort rank of `key`; unknown keys share the rank after all known ones
    #[must_use]
    pub fn rank(&self, key: &str) -> usize {
        self.canonical_order
            .iter()
            .position(|known| *known == key)
            .unwrap_or(self.canonical_order.len())
    }

    /// Whether `key` appears in the canonical order
    #[inline]
    #[must_use]
    pub fn is_known(&self, key: &str) -> bool {
        self.canonical_order.contains(&key)
    }

    /// Whether `key` must be dropped on render
    #[inline]
    #[must_use]
    pub fn is_deprecated(&self, key: &str) -> bool {
        self.deprecated.contains(&key)
    }
}

/// Every schema this crate ships
pub static SCHEMAS: &[&TemplateSchema] = &[&MUNICIPALITY];

/// Schema whose name matches `name`, ignoring spaces
#[must_use]
pub fn schema_for(name: &str) -> Option<&'static TemplateSchema> {
    let wanted: String = name.chars().filter(|c| *c != ' ').collect();
    SCHEMAS
        .iter()
        .copied()
        .find(|schema| schema.name().chars().filter(|c| *c != ' ').eq(wanted.chars()))
}

impl Default for TemplateSchema {
    fn default() -> Self {
        MUNICIPALITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_from_name() {
        assert_eq!(MUNICIPALITY.marker(), "{{Info/Município do Brasil");
    }

    #[test]
    fn ranks_follow_table() {
        assert!(MUNICIPALITY.rank("população") < MUNICIPALITY.rank("idh"));
        assert!(MUNICIPALITY.rank("idh") < MUNICIPALITY.rank("pib"));
        assert_eq!(MUNICIPALITY.rank("zzz"), MUNICIPALITY_ORDER.len());
        assert!(!MUNICIPALITY.is_known("zzz"));
    }

    #[test]
    fn deprecated_set() {
        assert!(MUNICIPALITY.is_deprecated("padroeiro"));
        assert!(MUNICIPALITY.is_deprecated("microrregião"));
        assert!(!MUNICIPALITY.is_deprecated("nome"));
    }

    #[test]
    fn lookup_ignores_spaces() {
        assert_eq!(schema_for("Info/Município do Brasil"), Some(&MUNICIPALITY));
        assert_eq!(schema_for("Info/MunicípiodoBrasil"), Some(&MUNICIPALITY));
        assert_eq!(schema_for("Info/País"), None);
    }

    #[test]
    fn tables_do_not_overlap() {
        for key in MUNICIPALITY.deprecated() {
            assert!(!MUNICIPALITY.is_known(key), "{key} is both ordered and deprecated");
        }
    }
}
