use chrono::NaiveDate;

use crate::model::{CreatedNote, NoteMetadata, Notebook, Session};

/// Abstract interface to the remote note service.
///
/// Connecting is the implementation's constructor; a value of this type is an
/// authenticated session.
pub trait NoteService {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The authenticated user
    fn session(&self) -> &Session;

    /// List every notebook visible to the user.
    fn list_notebooks(&self) -> Result<Vec<Notebook>, Self::Error>;

    /// Resolve a notebook by display name.
    fn get_notebook_by_name(&self, name: &str) -> Result<Option<Notebook>, Self::Error> {
        Ok(self
            .list_notebooks()?
            .into_iter()
            .find(|notebook| notebook.name == name))
    }

    /// Notes created on or after `day`, oldest first.
    fn search_created_since(&self, day: NaiveDate) -> Result<Vec<NoteMetadata>, Self::Error>;

    /// Notes updated on or after `day`, oldest first.
    fn search_updated_since(&self, day: NaiveDate) -> Result<Vec<NoteMetadata>, Self::Error>;

    /// Create a note with an ENML body in the given notebook.
    fn create_note(
        &self,
        title: &str,
        content: &str,
        notebook_guid: &str,
    ) -> Result<CreatedNote, Self::Error>;
}
