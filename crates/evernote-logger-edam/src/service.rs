use chrono::NaiveDate;
use log::{debug, info, warn};
use url::Url;

use evernote_logger_core::model::{CreatedNote, NoteMetadata, Notebook, Session};
use evernote_logger_core::NoteService;

use crate::client::{NoteStore, UserStore};
use crate::error::{EdamError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{Note, NoteFilter, NoteSortOrder, NotesMetadataResultSpec};

/// `findNotesMetadata` page size
const PAGE_SIZE: i32 = 250;

/// An authenticated connection to one Evernote account.
pub struct EvernoteService<T = HttpTransport> {
    token: String,
    session: Session,
    note_store: NoteStore<T>,
}

impl EvernoteService<HttpTransport> {
    /// Authenticate against `host` (e.g. `www.evernote.com`) over HTTPS.
    pub fn connect(host: &str, user_name: &str, token: &str) -> Result<Self> {
        Self::connect_with(HttpTransport::new()?, host, user_name, token)
    }
}

impl<T: Transport> EvernoteService<T> {
    /// Authenticate using a custom transport.
    ///
    /// `host` may carry its own scheme (`http://localhost:8080`), otherwise
    /// HTTPS is assumed.
    pub fn connect_with(transport: T, host: &str, user_name: &str, token: &str) -> Result<Self> {
        let base = service_base(host)?;
        let user_store = UserStore::new(transport, base.join("edam/user")?);

        let session = user_store.get_user(token)?.into_session()?;
        if !user_name.is_empty() && session.user_name != user_name {
            warn!(
                "Token belongs to '{}', config says '{}'",
                session.user_name, user_name
            );
        }
        info!(
            "Connected as {} (user {}, shard {})",
            session.user_name, session.user_id, session.shard_id
        );

        let note_store_url = base.join(&format!("shard/{}/notestore", session.shard_id))?;
        Ok(Self {
            token: token.to_string(),
            session,
            note_store: NoteStore::new(user_store.into_transport(), note_store_url),
        })
    }

    pub fn note_store_url(&self) -> &Url {
        self.note_store.url()
    }

    fn search_since(&self, order: NoteSortOrder, day: NaiveDate) -> Result<Vec<NoteMetadata>> {
        let field = match order {
            NoteSortOrder::Created => "created",
            NoteSortOrder::Updated => "updated",
        };
        let filter = NoteFilter {
            order,
            ascending: true,
            words: format!("{}:{}", field, day.format("%Y%m%d")),
        };
        let spec = NotesMetadataResultSpec::for_daily_log();

        let mut notes = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.note_store.find_notes_metadata(
                &self.token,
                &filter,
                offset,
                PAGE_SIZE,
                &spec,
            )?;
            let fetched = page.notes.len() as i32;
            for meta in page.notes {
                notes.push(NoteMetadata::try_from(meta)?);
            }
            offset = page.start_index.checked_add(fetched).ok_or_else(|| {
                EdamError::Protocol(format!(
                    "page offset overflow: startIndex {} plus {} notes",
                    page.start_index, fetched
                ))
            })?;
            if fetched == 0 || offset >= page.total_notes {
                break;
            }
        }

        debug!("Search [{}] returned {} notes", filter.words, notes.len());
        Ok(notes)
    }
}

fn service_base(host: &str) -> Result<Url> {
    let host = host.trim_end_matches('/');
    let base = if host.contains("://") {
        format!("{}/", host)
    } else {
        format!("https://{}/", host)
    };
    Ok(Url::parse(&base)?)
}

impl<T: Transport> NoteService for EvernoteService<T> {
    type Error = EdamError;

    fn session(&self) -> &Session {
        &self.session
    }

    fn list_notebooks(&self) -> Result<Vec<Notebook>> {
        self.note_store
            .list_notebooks(&self.token)?
            .into_iter()
            .map(Notebook::try_from)
            .collect()
    }

    fn search_created_since(&self, day: NaiveDate) -> Result<Vec<NoteMetadata>> {
        self.search_since(NoteSortOrder::Created, day)
    }

    fn search_updated_since(&self, day: NaiveDate) -> Result<Vec<NoteMetadata>> {
        self.search_since(NoteSortOrder::Updated, day)
    }

    fn create_note(&self, title: &str, content: &str, notebook_guid: &str) -> Result<CreatedNote> {
        let note = Note {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            notebook_guid: Some(notebook_guid.to_string()),
            ..Note::default()
        };
        CreatedNote::try_from(self.note_store.create_note(&self.token, &note)?)
    }
}
