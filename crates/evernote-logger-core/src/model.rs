use serde::{Deserialize, Serialize};

/// Lightweight note record returned by the remote search calls.
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub guid: String,
    pub notebook_guid: String,
    pub title: String,
    pub created: i64,
    /// Absent on pure-create results.
    pub updated: Option<i64>,
}

/// Why a note shows up in the daily log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Updated,
}

impl ChangeKind {
    /// Trailing marker printed after the note link
    pub fn marker(self) -> &'static str {
        match self {
            ChangeKind::Created => "",
            ChangeKind::Updated => "(U)",
        }
    }
}

/// One admitted note, scoped to the target day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub guid: String,
    pub notebook_guid: String,
    pub title: String,
    /// Local time formatted as `YYYY/MM/DD HH:MM`
    pub stamp: String,
    pub kind: ChangeKind,
    /// `evernote:///view/...` deep link, filled in by [`crate::link`]
    pub view_link: String,
}

impl NoteSummary {
    /// `HH:MM` part of the stamp
    pub fn time_of_day(&self) -> &str {
        self.stamp.get(11..).unwrap_or(&self.stamp)
    }
}

/// Authenticated user, scoped to one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i32,
    pub shard_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub guid: String,
    pub name: String,
}

/// The note written back by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNote {
    pub guid: String,
    pub title: String,
}
