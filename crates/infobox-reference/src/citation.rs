//! Citation builder
//!
//! Produces full named `<ref>` definitions in the `{{Citar web}}` form used by
//! the Portuguese-language infoboxes. Each definition should appear once per
//! article; later uses point at it with `<ref name="..." />`.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long-form Portuguese access date, e.g. `5 de março de 2024`
#[must_use]
pub fn access_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} de {month} de {}", date.day(), date.year())
}

/// Source for one named citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Reusable name (`<ref name="...">`)
    pub name: String,
    /// Source URL
    pub url: String,
    /// Document title
    pub title: String,
    /// Publisher, rendered as a wiki link
    pub publisher: String,
    /// Publication year
    pub year: i32,
}

impl Citation {
    /// Create citation
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            title: title.into(),
            publisher: publisher.into(),
            year,
        }
    }

    /// Render the full definition, stamped with `accessed`
    #[must_use]
    pub fn render(&self, accessed: NaiveDate) -> String {
        format!(
            "<ref name=\"{}\">{{{{Citar web |url={} |titulo={} |publicado=[[{}]] |ano={} |acessodata= {}}}}}</ref>",
            self.name,
            self.url,
            self.title,
            self.publisher,
            self.year,
            access_date(accessed)
        )
    }

    /// Render the full definition, stamped with today's local date
    #[must_use]
    pub fn render_today(&self) -> String {
        self.render(Local::now().date_naive())
    }

    /// Reuse tag pointing at this citation
    #[must_use]
    pub fn reuse_tag(&self) -> String {
        format!("<ref name=\"{}\" />", self.name)
    }
}
