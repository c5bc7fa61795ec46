//! Boundaries the session calls out through
//!
//! The session never touches files, networks or process state directly; a
//! [`DocumentStore`] owns documents and a [`ValueSource`] owns the values.

use crate::error::SessionResult;
use crate::record::EntityRecord;

/// Where documents are read from and written back to
pub trait DocumentStore {
    /// Current text of the document titled `title`, `None` if it does not exist
    ///
    /// # Errors
    /// `Fetch` when the store cannot answer.
    fn fetch(&self, title: &str) -> SessionResult<Option<String>>;

    /// Replace the text of `title`, recording `summary` with the change
    ///
    /// # Errors
    /// `Persist` when the write is refused.
    fn persist(&mut self, title: &str, text: &str, summary: &str) -> SessionResult<()>;
}

/// Where attribute values come from
pub trait ValueSource {
    /// Entity identifiers in processing order
    fn entities(&self) -> Vec<String>;

    /// Values for `entity`
    ///
    /// # Errors
    /// `Source` when the entity is unknown or its values are unreadable.
    fn record(&self, entity: &str) -> SessionResult<EntityRecord>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &mut T {
    fn fetch(&self, title: &str) -> SessionResult<Option<String>> {
        (**self).fetch(title)
    }

    fn persist(&mut self, title: &str, text: &str, summary: &str) -> SessionResult<()> {
        (**self).persist(title, text, summary)
    }
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn entities(&self) -> Vec<String> {
        (**self).entities()
    }

    fn record(&self, entity: &str) -> SessionResult<EntityRecord> {
        (**self).record(entity)
    }
}
