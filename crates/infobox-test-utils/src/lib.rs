//! Testing utilities for the infobox workspace
//!
//! Sample articles and in-memory collaborators.

#![allow(missing_docs)]

use infobox_core::{DocumentStore, EntityRecord, SessionError, SessionResult, ValueSource};
use std::collections::{BTreeMap, HashSet};

/// Municipality article with a shared population citation, nested templates
/// and links inside values, a deprecated field and text after the block
pub const SAMPLE_ARTICLE: &str = "{{Ver desambig|a cidade|Ijuí (rio)}}\n\
'''Ijuí''' é um [[município]] do estado do [[Rio Grande do Sul]].<ref name=\"IBGE_POP\" />\n\
{{Info/Município do Brasil\n\
| nome = Ijuí\n\
| padroeiro = São Geraldo\n\
| área = 689.132\n\
| área_ref = <ref name=\"area\">{{Citar web |url=https://cidades.ibge.gov.br/ |titulo=Cidades}}</ref>\n\
| população = 83089\n\
| população_ref = <ref name=\"IBGE_POP\">{{Citar web |url=https://ibge.gov.br/estimativas |titulo=Estimativas 2020}}</ref>\n\
| pop_data = 2020\n\
| idh = 0.781\n\
| idh_data = 2010\n\
| pib = {{fmtn |2500000.50}}\n\
| vizinhos = [[Ajuricaba]], [[Bozano|Coronel Bozano]]\n\
}}\n\
== História ==\n\
A colonização começou em 1890.<ref name=\"IBGE_POP\" /> { texto com chave solta }\n\
== Referências ==\n\
{{Referências}}\n";

/// Disambiguation page for a name shared by several municipalities
pub const DISAMBIGUATION_PAGE: &str =
    "'''Bonito''' pode referir-se a:\n* [[Bonito (Pará)]]\n* [[Bonito (Mato Grosso do Sul)]]\n{{Desambiguação|}}\n";

/// Minimal article holding only the template block
#[must_use]
pub fn minimal_article(name: &str) -> String {
    format!("{{{{Info/Município do Brasil\n| nome = {name}\n}}}}\n")
}

/// Article whose template block never closes
#[must_use]
pub fn unclosed_article(name: &str) -> String {
    format!("Texto\n{{{{Info/Município do Brasil\n| nome = {name}\n| idh = {{{{fmtn |1}}}}\n")
}

/// Store kept in memory, with optional refusal of writes per title
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub documents: BTreeMap<String, String>,
    pub writes: Vec<(String, String)>,
    pub refuse: HashSet<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(title.into(), text.into());
        self
    }

    /// Make `persist` fail for `title`
    #[must_use]
    pub fn refusing(mut self, title: impl Into<String>) -> Self {
        self.refuse.insert(title.into());
        self
    }

    #[must_use]
    pub fn document(&self, title: &str) -> Option<&str> {
        self.documents.get(title).map(String::as_str)
    }
}

impl DocumentStore for MemoryStore {
    fn fetch(&self, title: &str) -> SessionResult<Option<String>> {
        Ok(self.documents.get(title).cloned())
    }

    fn persist(&mut self, title: &str, text: &str, summary: &str) -> SessionResult<()> {
        if self.refuse.contains(title) {
            return Err(SessionError::persist(title, "write refused"));
        }
        self.documents.insert(title.to_string(), text.to_string());
        self.writes.push((title.to_string(), summary.to_string()));
        Ok(())
    }
}

/// Records kept in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub records: Vec<EntityRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(records: Vec<EntityRecord>) -> Self {
        Self { records }
    }
}

impl ValueSource for MemorySource {
    fn entities(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    fn record(&self, entity: &str) -> SessionResult<EntityRecord> {
        self.records
            .iter()
            .find(|r| r.name == entity)
            .cloned()
            .ok_or_else(|| SessionError::source(entity, "no record"))
    }
}
