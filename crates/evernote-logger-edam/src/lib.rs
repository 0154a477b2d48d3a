//! Evernote Logger EDAM Library
//!
//! Protocol layer: a minimal Evernote API client speaking Thrift binary over
//! HTTPS, exposed to the core as a [`NoteService`](evernote_logger_core::NoteService).

pub mod client;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod types;

pub use error::{EdamError, ErrorCode};
pub use service::EvernoteService;
pub use transport::{HttpTransport, Transport};
