//! EDAM structs used by the logger, with their Thrift field ids.
//!
//! Only the fields the logger reads or writes are modelled; everything else is
//! skipped on decode.

use evernote_logger_core::model;

use crate::error::{EdamError, ErrorCode, Result};
use crate::protocol::{Decoder, Encoder, TType, ThriftDecode, ThriftEncode};

/// `NoteSortOrder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSortOrder {
    Created = 1,
    Updated = 2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub shard_id: Option<String>,
}

impl ThriftDecode for User {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let mut user = User::default();
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (1, TType::I32) => user.id = Some(dec.read_i32()?),
                (2, TType::String) => user.username = Some(dec.read_string()?),
                (14, TType::String) => user.shard_id = Some(dec.read_string()?),
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;
        Ok(user)
    }
}

impl User {
    /// Session for deep links; id and shard are required
    pub fn into_session(self) -> Result<model::Session> {
        let user_id = self
            .id
            .ok_or_else(|| EdamError::Protocol("User.id missing".to_string()))?;
        let shard_id = self
            .shard_id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EdamError::Protocol("User.shardId missing".to_string()))?;
        Ok(model::Session {
            user_id,
            shard_id,
            user_name: self.username.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    pub guid: Option<String>,
    pub name: Option<String>,
}

impl ThriftDecode for Notebook {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let mut notebook = Notebook::default();
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (1, TType::String) => notebook.guid = Some(dec.read_string()?),
                (2, TType::String) => notebook.name = Some(dec.read_string()?),
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;
        Ok(notebook)
    }
}

impl TryFrom<Notebook> for model::Notebook {
    type Error = EdamError;

    fn try_from(notebook: Notebook) -> Result<Self> {
        Ok(model::Notebook {
            guid: notebook
                .guid
                .ok_or_else(|| EdamError::Protocol("Notebook.guid missing".to_string()))?,
            name: notebook.name.unwrap_or_default(),
        })
    }
}

/// Search criteria for `findNotesMetadata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    pub order: NoteSortOrder,
    pub ascending: bool,
    /// Search grammar, e.g. `created:20240114`
    pub words: String,
}

impl ThriftEncode for NoteFilter {
    fn encode(&self, enc: &mut Encoder) {
        enc.field_i32(1, self.order as i32);
        enc.field_bool(2, self.ascending);
        enc.field_string(3, &self.words);
    }
}

/// Which `NoteMetadata` fields the server fills in. Ids mirror `NoteMetadata`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotesMetadataResultSpec {
    pub include_title: bool,
    pub include_created: bool,
    pub include_updated: bool,
    pub include_notebook_guid: bool,
}

impl NotesMetadataResultSpec {
    /// Everything the daily log needs
    pub fn for_daily_log() -> Self {
        Self {
            include_title: true,
            include_created: true,
            include_updated: true,
            include_notebook_guid: true,
        }
    }
}

impl ThriftEncode for NotesMetadataResultSpec {
    fn encode(&self, enc: &mut Encoder) {
        enc.field_bool(2, self.include_title);
        enc.field_bool(6, self.include_created);
        enc.field_bool(7, self.include_updated);
        enc.field_bool(11, self.include_notebook_guid);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub created: Option<i64>,
    pub updated: Option<i64>,
    pub notebook_guid: Option<String>,
}

impl ThriftDecode for NoteMetadata {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let mut meta = NoteMetadata::default();
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (1, TType::String) => meta.guid = Some(dec.read_string()?),
                (2, TType::String) => meta.title = Some(dec.read_string()?),
                (6, TType::I64) => meta.created = Some(dec.read_i64()?),
                (7, TType::I64) => meta.updated = Some(dec.read_i64()?),
                (11, TType::String) => meta.notebook_guid = Some(dec.read_string()?),
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;
        Ok(meta)
    }
}

impl TryFrom<NoteMetadata> for model::NoteMetadata {
    type Error = EdamError;

    fn try_from(meta: NoteMetadata) -> Result<Self> {
        let guid = meta
            .guid
            .ok_or_else(|| EdamError::Protocol("NoteMetadata.guid missing".to_string()))?;
        let created = meta.created.ok_or_else(|| {
            EdamError::Protocol(format!("NoteMetadata.created missing for {}", guid))
        })?;
        Ok(model::NoteMetadata {
            notebook_guid: meta.notebook_guid.unwrap_or_default(),
            title: meta.title.unwrap_or_default(),
            created,
            updated: meta.updated,
            guid,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesMetadataList {
    pub start_index: i32,
    pub total_notes: i32,
    pub notes: Vec<NoteMetadata>,
}

impl ThriftDecode for NotesMetadataList {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let mut list = NotesMetadataList::default();
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (1, TType::I32) => list.start_index = dec.read_i32()?,
                (2, TType::I32) => list.total_notes = dec.read_i32()?,
                (3, TType::List) => list.notes = dec.read_list(TType::Struct, NoteMetadata::decode)?,
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;
        Ok(list)
    }
}

/// Note as sent to `createNote` and returned by it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub guid: Option<String>,
    pub title: Option<String>,
    /// ENML body
    pub content: Option<String>,
    pub notebook_guid: Option<String>,
}

impl ThriftEncode for Note {
    fn encode(&self, enc: &mut Encoder) {
        if let Some(guid) = &self.guid {
            enc.field_string(1, guid);
        }
        if let Some(title) = &self.title {
            enc.field_string(2, title);
        }
        if let Some(content) = &self.content {
            enc.field_string(3, content);
        }
        if let Some(notebook_guid) = &self.notebook_guid {
            enc.field_string(11, notebook_guid);
        }
    }
}

impl ThriftDecode for Note {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let mut note = Note::default();
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (1, TType::String) => note.guid = Some(dec.read_string()?),
                (2, TType::String) => note.title = Some(dec.read_string()?),
                (3, TType::String) => note.content = Some(dec.read_string()?),
                (11, TType::String) => note.notebook_guid = Some(dec.read_string()?),
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;
        Ok(note)
    }
}

impl TryFrom<Note> for model::CreatedNote {
    type Error = EdamError;

    fn try_from(note: Note) -> Result<Self> {
        Ok(model::CreatedNote {
            guid: note
                .guid
                .ok_or_else(|| EdamError::Protocol("created Note has no guid".to_string()))?,
            title: note.title.unwrap_or_default(),
        })
    }
}

/// `EDAMUserException`, field 1 of most result structs
pub fn decode_user_exception(dec: &mut Decoder<'_>) -> Result<EdamError> {
    let mut code = ErrorCode(0);
    let mut parameter = None;
    dec.read_struct(|dec, id, ttype| {
        match (id, ttype) {
            (1, TType::I32) => code = ErrorCode(dec.read_i32()?),
            (2, TType::String) => parameter = Some(dec.read_string()?),
            _ => dec.skip(ttype)?,
        }
        Ok(())
    })?;
    Ok(EdamError::User { code, parameter })
}

/// `EDAMSystemException`, field 2 of most result structs
pub fn decode_system_exception(dec: &mut Decoder<'_>) -> Result<EdamError> {
    let mut code = ErrorCode(0);
    let mut message = None;
    let mut rate_limit_duration = None;
    dec.read_struct(|dec, id, ttype| {
        match (id, ttype) {
            (1, TType::I32) => code = ErrorCode(dec.read_i32()?),
            (2, TType::String) => message = Some(dec.read_string()?),
            (3, TType::I32) => rate_limit_duration = Some(dec.read_i32()?),
            _ => dec.skip(ttype)?,
        }
        Ok(())
    })?;
    Ok(EdamError::System {
        code,
        message,
        rate_limit_duration,
    })
}

/// `EDAMNotFoundException`, field 3 where declared
pub fn decode_not_found_exception(dec: &mut Decoder<'_>) -> Result<EdamError> {
    let mut identifier = None;
    let mut key = None;
    dec.read_struct(|dec, id, ttype| {
        match (id, ttype) {
            (1, TType::String) => identifier = Some(dec.read_string()?),
            (2, TType::String) => key = Some(dec.read_string()?),
            _ => dec.skip(ttype)?,
        }
        Ok(())
    })?;
    Ok(EdamError::NotFound { identifier, key })
}

/// `TApplicationException`, the body of an exception message
pub fn decode_application_exception(dec: &mut Decoder<'_>) -> Result<EdamError> {
    let mut message = String::new();
    let mut kind = 0;
    dec.read_struct(|dec, id, ttype| {
        match (id, ttype) {
            (1, TType::String) => message = dec.read_string()?,
            (2, TType::I32) => kind = dec.read_i32()?,
            _ => dec.skip(ttype)?,
        }
        Ok(())
    })?;
    Ok(EdamError::Application { kind, message })
}
