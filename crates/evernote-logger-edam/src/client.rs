//! Thrift RPC framing plus the UserStore and NoteStore calls the logger uses.

use log::debug;
use std::cell::Cell;
use url::Url;

use crate::error::{EdamError, Result};
use crate::protocol::{Decoder, Encoder, MessageType, TType, ThriftDecode, ThriftEncode};
use crate::transport::Transport;
use crate::types::{
    decode_application_exception, decode_not_found_exception, decode_system_exception,
    decode_user_exception, Note, NoteFilter, Notebook, NotesMetadataList, NotesMetadataResultSpec,
    User,
};

/// One Thrift service endpoint
pub struct ThriftClient<T> {
    transport: T,
    url: Url,
    seq: Cell<i32>,
}

impl<T: Transport> ThriftClient<T> {
    pub fn new(transport: T, url: Url) -> Self {
        Self {
            transport,
            url,
            seq: Cell::new(0),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send `method` with the argument fields written by `args`.
    ///
    /// `success` reads field 0 of the result struct. Fields 1..=3 are the
    /// declared EDAM exceptions and come back as errors.
    pub fn call<R, A, S>(&self, method: &str, args: A, mut success: S) -> Result<R>
    where
        A: FnOnce(&mut Encoder),
        S: FnMut(&mut Decoder<'_>, TType) -> Result<R>,
    {
        let seq = self.seq.get().wrapping_add(1);
        self.seq.set(seq);

        let mut enc = Encoder::new();
        enc.write_message_begin(method, MessageType::Call, seq);
        enc.write_struct(args);

        debug!("EDAM {} -> {}", method, self.url);
        let reply = self.transport.post(&self.url, enc.into_bytes())?;
        let mut dec = Decoder::new(&reply);

        let header = dec.read_message_begin()?;
        match header.kind {
            MessageType::Reply => {}
            MessageType::Exception => return Err(decode_application_exception(&mut dec)?),
            other => {
                return Err(EdamError::Protocol(format!(
                    "unexpected {:?} message for {}",
                    other, method
                )))
            }
        }
        if header.name != method || header.seq != seq {
            return Err(EdamError::Protocol(format!(
                "reply {}#{} does not match call {}#{}",
                header.name, header.seq, method, seq
            )));
        }

        let mut result = None;
        let mut failure = None;
        dec.read_struct(|dec, id, ttype| {
            match (id, ttype) {
                (0, _) => result = Some(success(dec, ttype)?),
                (1, TType::Struct) => failure = Some(decode_user_exception(dec)?),
                (2, TType::Struct) => failure = Some(decode_system_exception(dec)?),
                (3, TType::Struct) => failure = Some(decode_not_found_exception(dec)?),
                _ => dec.skip(ttype)?,
            }
            Ok(())
        })?;

        if let Some(err) = failure {
            return Err(err);
        }
        result.ok_or_else(|| EdamError::Protocol(format!("{} returned no result", method)))
    }
}

/// Check the result field type before decoding it
fn expect(ttype: TType, expected: TType, method: &str) -> Result<()> {
    if ttype != expected {
        return Err(EdamError::Protocol(format!(
            "{} result has type {:?}, expected {:?}",
            method, ttype, expected
        )));
    }
    Ok(())
}

pub struct UserStore<T> {
    client: ThriftClient<T>,
}

impl<T: Transport> UserStore<T> {
    pub fn new(transport: T, url: Url) -> Self {
        Self {
            client: ThriftClient::new(transport, url),
        }
    }

    pub fn into_transport(self) -> T {
        self.client.into_transport()
    }

    pub fn get_user(&self, token: &str) -> Result<User> {
        self.client.call(
            "getUser",
            |enc| enc.field_string(1, token),
            |dec, ttype| {
                expect(ttype, TType::Struct, "getUser")?;
                User::decode(dec)
            },
        )
    }
}

pub struct NoteStore<T> {
    client: ThriftClient<T>,
}

impl<T: Transport> NoteStore<T> {
    pub fn new(transport: T, url: Url) -> Self {
        Self {
            client: ThriftClient::new(transport, url),
        }
    }

    pub fn url(&self) -> &Url {
        self.client.url()
    }

    pub fn list_notebooks(&self, token: &str) -> Result<Vec<Notebook>> {
        self.client.call(
            "listNotebooks",
            |enc| enc.field_string(1, token),
            |dec, ttype| {
                expect(ttype, TType::List, "listNotebooks")?;
                dec.read_list(TType::Struct, Notebook::decode)
            },
        )
    }

    pub fn find_notes_metadata(
        &self,
        token: &str,
        filter: &NoteFilter,
        offset: i32,
        max_notes: i32,
        spec: &NotesMetadataResultSpec,
    ) -> Result<NotesMetadataList> {
        self.client.call(
            "findNotesMetadata",
            |enc| {
                enc.field_string(1, token);
                enc.field_struct(2, |enc| filter.encode(enc));
                enc.field_i32(3, offset);
                enc.field_i32(4, max_notes);
                enc.field_struct(5, |enc| spec.encode(enc));
            },
            |dec, ttype| {
                expect(ttype, TType::Struct, "findNotesMetadata")?;
                NotesMetadataList::decode(dec)
            },
        )
    }

    pub fn create_note(&self, token: &str, note: &Note) -> Result<Note> {
        self.client.call(
            "createNote",
            |enc| {
                enc.field_string(1, token);
                enc.field_struct(2, |enc| note.encode(enc));
            },
            |dec, ttype| {
                expect(ttype, TType::Struct, "createNote")?;
                Note::decode(dec)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed reply regardless of the request
    struct CannedTransport(Vec<u8>);

    impl Transport for CannedTransport {
        fn post(&self, _url: &Url, _body: Vec<u8>) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    fn reply(name: &str, seq: i32, body: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_message_begin(name, MessageType::Reply, seq);
        enc.write_struct(body);
        enc.into_bytes()
    }

    fn url() -> Url {
        Url::parse("https://www.evernote.com/edam/user").unwrap()
    }

    #[test]
    fn test_mismatched_seq_is_protocol_error() {
        let bytes = reply("getUser", 5, |enc| enc.field_struct(0, |_| {}));
        let store = UserStore::new(CannedTransport(bytes), url());
        assert!(matches!(store.get_user("tok"), Err(EdamError::Protocol(_))));
    }

    #[test]
    fn test_missing_result_is_protocol_error() {
        let bytes = reply("getUser", 1, |_| {});
        let store = UserStore::new(CannedTransport(bytes), url());
        match store.get_user("tok") {
            Err(EdamError::Protocol(msg)) => assert!(msg.contains("no result")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_wrong_result_type_is_protocol_error() {
        let bytes = reply("getUser", 1, |enc| enc.field_string(0, "not a struct"));
        let store = UserStore::new(CannedTransport(bytes), url());
        assert!(matches!(store.get_user("tok"), Err(EdamError::Protocol(_))));
    }

    #[test]
    fn test_system_exception_is_returned() {
        let bytes = reply("getUser", 1, |enc| {
            enc.field_struct(2, |enc| {
                enc.field_i32(1, 19);
                enc.field_i32(3, 120);
            })
        });
        let store = UserStore::new(CannedTransport(bytes), url());
        assert!(matches!(
            store.get_user("tok"),
            Err(EdamError::System { rate_limit_duration: Some(120), .. })
        ));
    }
}
