//! Infobox Reference Guard
//!
//! Citation analysis for infobox edits. Before a field carrying a citation is
//! overwritten, the guard determines whether that citation is *named* and, if
//! so, whether other parts of the article reuse it by name. Overwriting a named
//! citation that is reused elsewhere leaves dangling `<ref name="..." />` tags,
//! so such edits are flagged for manual verification.
//!
//! # Core Concepts
//!
//! - [`ReferenceGuard`]: name/body extraction and overwrite classification
//! - [`ReferenceSafety`]: `Safe`, `Unsafe` or `NotNamed`
//! - [`ReferenceDescriptor`]: name and body derived from a fragment
//! - [`Citation`]: builder for full `<ref>` definitions
//!
//! # Example
//!
//! ```rust
//! use infobox_reference::{ReferenceGuard, ReferenceSafety};
//!
//! let guard = ReferenceGuard::new();
//! let prior = r#"<ref name="pop">{{Citar web |url=x}}</ref>"#;
//! let article = format!("| população_ref = {prior}\nTexto<ref name=\"pop\" />");
//!
//! assert_eq!(guard.check_replacement(&article, prior), ReferenceSafety::Unsafe);
//! ```

#![warn(unreachable_pub)]

pub mod citation;
pub mod error;
pub mod guard;
mod tag;

pub use citation::{access_date, Citation};
pub use error::{ReferenceError, ReferenceResult};
pub use guard::{ReferenceCheck, ReferenceDescriptor, ReferenceGuard, ReferenceSafety};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
