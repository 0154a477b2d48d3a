use crate::error::{LoggerError, Result};
use crate::model::{NoteSummary, Session};

/// Builds `evernote:///view/{userId}/{shardId}/{noteGuid}/{notebookGuid}/` links
pub struct ViewLinkBuilder<'a> {
    user_id: i32,
    shard_id: &'a str,
}

impl<'a> ViewLinkBuilder<'a> {
    pub fn new(session: &'a Session) -> Result<Self> {
        if session.shard_id.is_empty() {
            return Err(LoggerError::ContractViolation(
                "session has no shard id".to_string(),
            ));
        }
        Ok(Self {
            user_id: session.user_id,
            shard_id: &session.shard_id,
        })
    }

    pub fn build(&self, note_guid: &str, notebook_guid: &str) -> String {
        format!(
            "evernote:///view/{}/{}/{}/{}/",
            self.user_id, self.shard_id, note_guid, notebook_guid
        )
    }
}

/// Fill in `view_link` for every summary
pub fn attach_view_links(session: &Session, notes: &mut [NoteSummary]) -> Result<()> {
    let builder = ViewLinkBuilder::new(session)?;
    for note in notes.iter_mut() {
        note.view_link = builder.build(&note.guid, &note.notebook_guid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeKind;

    fn session(shard: &str) -> Session {
        Session {
            user_id: 19792815,
            shard_id: shard.to_string(),
            user_name: "alice".to_string(),
        }
    }

    #[test]
    fn test_build_view_link() {
        let session = session("s172");
        let builder = ViewLinkBuilder::new(&session).unwrap();
        assert_eq!(
            builder.build(
                "640f0459-f271-a6f7-22fe-f02588dcf55b",
                "48aa7d36-8a0d-4ba0-b85a-ff3591138f04"
            ),
            "evernote:///view/19792815/s172/640f0459-f271-a6f7-22fe-f02588dcf55b/48aa7d36-8a0d-4ba0-b85a-ff3591138f04/"
        );
    }

    #[test]
    fn test_attach_view_links() {
        let mut notes = vec![NoteSummary {
            guid: "n1".to_string(),
            notebook_guid: "b1".to_string(),
            title: "T".to_string(),
            stamp: "2024/01/15 09:00".to_string(),
            kind: ChangeKind::Created,
            view_link: String::new(),
        }];
        attach_view_links(&session("s1"), &mut notes).unwrap();
        assert_eq!(notes[0].view_link, "evernote:///view/19792815/s1/n1/b1/");
    }

    #[test]
    fn test_missing_shard_is_contract_violation() {
        assert!(matches!(
            ViewLinkBuilder::new(&session("")),
            Err(LoggerError::ContractViolation(_))
        ));
    }
}
