//! Evernote Logger Core Library
//!
//! Day window, merge/dedup engine, grouping and ENML rendering.
//! No IO dependencies, the remote service sits behind [`NoteService`].
//!

mod config;
pub mod error;
pub mod group;
pub mod link;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod service;
pub mod utils;
pub mod window;


pub use config::LoggerConfig;
pub use error::LoggerError;
pub use model::{ChangeKind, CreatedNote, NoteMetadata, NoteSummary, Notebook, Session};
pub use pipeline::{DailyLog, LogOptions, Publication};
pub use service::NoteService;
pub use utils::escape_html;
pub use window::DayWindow;
