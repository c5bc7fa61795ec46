//! Infobox Template Engine
//!
//! Locates a template block inside free-form wiki markup, parses it into an
//! ordered field map, applies attribute edits and renders the block back.
//! Everything outside the block stays byte-identical.
//!
//! # Architecture
//!
//! ```text
//! article ─▶ DocumentScanner::locate ─▶ TemplateSpan
//!                                          │
//!                               TemplateModel::parse ─▶ FieldMap
//!                                          │      edits (FieldRenderer, ReferenceGuard)
//!                               TemplateModel::render
//!                                          │
//! article' ◀─ DocumentScanner::replace ◀───┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use infobox_template::{DocumentScanner, TemplateModel, MUNICIPALITY};
//!
//! let article = "Intro\n{{Info/Município do Brasil\n| nome = Ijuí\n}}\nFim";
//! let (span, mut model) = TemplateModel::from_document(&MUNICIPALITY, article)?;
//! model.edit_hdi("0.78", 2010, None);
//!
//! let updated = DocumentScanner::new().replace(article, span, &model.render())?;
//! assert!(updated.contains("| idh = 0.780"));
//! assert!(updated.ends_with("}}\nFim"));
//! # Ok::<(), infobox_template::ScanError>(())
//! ```

#![warn(unreachable_pub)]

pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod model;
pub mod render;
pub mod scanner;
pub mod schema;

pub use diagnostics::Diagnostic;
pub use error::{RankingArgument, RenderError, ScanError};
pub use fields::FieldMap;
pub use model::{parse_block, ParsedBlock, TemplateModel};
pub use render::{FieldRenderer, RankingArgs, RankingKind};
pub use scanner::{DocumentScanner, TemplateSpan};
pub use schema::{schema_for, TemplateSchema, MUNICIPALITY, MUNICIPALITY_TEMPLATE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for editing infobox templates
    pub use crate::diagnostics::Diagnostic;
    pub use crate::error::{RenderError, ScanError};
    pub use crate::model::TemplateModel;
    pub use crate::render::{RankingArgs, RankingKind};
    pub use crate::scanner::{DocumentScanner, TemplateSpan};
    pub use crate::schema::{TemplateSchema, MUNICIPALITY};
    pub use infobox_reference::{ReferenceGuard, ReferenceSafety};
}
