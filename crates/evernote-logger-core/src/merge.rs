use chrono::TimeZone;
use log::{debug, info};
use std::collections::HashSet;

use crate::error::{LoggerError, Result};
use crate::model::{ChangeKind, NoteMetadata, NoteSummary};
use crate::utils::time::{format_stamp, local_datetime};
use crate::window::DayWindow;

/// Merge the created and updated search results into one day-scoped list.
///
/// Records outside the target day (by local time in `tz`) are dropped. A guid
/// admitted as created is never admitted again as updated. The result is
/// sorted by stamp; equal stamps keep admission order.
pub fn merge_notes<Tz: TimeZone>(
    window: &DayWindow,
    tz: &Tz,
    created: &[NoteMetadata],
    updated: &[NoteMetadata],
) -> Result<Vec<NoteSummary>> {
    let mut table = DedupTable::new();

    info!("Created notes: {} candidates", created.len());
    let mut created_guids = HashSet::new();
    for meta in created {
        if !created_guids.insert(meta.guid.as_str()) {
            return Err(LoggerError::ContractViolation(format!(
                "note {} returned twice by the created search",
                meta.guid
            )));
        }
        table.admit(window, tz, meta, meta.created, ChangeKind::Created)?;
    }

    info!("Updated notes: {} candidates", updated.len());
    for meta in updated {
        if table.contains(&meta.guid) {
            debug!("The note [{}] is already listed", meta.title);
            continue;
        }
        let updated_at = meta.updated.ok_or_else(|| {
            LoggerError::ContractViolation(format!(
                "updated note {} has no update time",
                meta.guid
            ))
        })?;
        table.admit(window, tz, meta, updated_at, ChangeKind::Updated)?;
    }

    let mut notes = table.into_notes();
    notes.sort_by(|a, b| a.stamp.cmp(&b.stamp));
    for note in &notes {
        info!("{} {:?} {}", note.stamp, note.kind, note.title);
    }
    Ok(notes)
}

/// Insertion-ordered guid -> summary table
struct DedupTable {
    notes: Vec<NoteSummary>,
    guids: HashSet<String>,
}

impl DedupTable {
    fn new() -> Self {
        Self {
            notes: Vec::new(),
            guids: HashSet::new(),
        }
    }

    fn contains(&self, guid: &str) -> bool {
        self.guids.contains(guid)
    }

    fn admit<Tz: TimeZone>(
        &mut self,
        window: &DayWindow,
        tz: &Tz,
        meta: &NoteMetadata,
        millis: i64,
        kind: ChangeKind,
    ) -> Result<()> {
        let local = local_datetime(millis, tz).ok_or_else(|| {
            LoggerError::ContractViolation(format!(
                "note {} has out-of-range timestamp {}",
                meta.guid, millis
            ))
        })?;

        if !window.contains(&local) {
            debug!("{}: Skip the note [{}]", local, meta.title);
            return Ok(());
        }

        debug!("{}: [{}]", local, meta.title);
        self.guids.insert(meta.guid.clone());
        self.notes.push(NoteSummary {
            guid: meta.guid.clone(),
            notebook_guid: meta.notebook_guid.clone(),
            title: meta.title.clone(),
            stamp: format_stamp(&local),
            kind,
            view_link: String::new(),
        });
        Ok(())
    }

    fn into_notes(self) -> Vec<NoteSummary> {
        self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        taipei()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn meta(guid: &str, title: &str, created: i64, updated: Option<i64>) -> NoteMetadata {
        NoteMetadata {
            guid: guid.to_string(),
            notebook_guid: "nb-1".to_string(),
            title: title.to_string(),
            created,
            updated,
        }
    }

    #[test]
    fn test_drops_notes_outside_target_day() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![
            meta("a", "Yesterday", at(2024, 1, 14, 23, 59), None),
            meta("b", "Today", at(2024, 1, 15, 0, 0), None),
            meta("c", "Tomorrow", at(2024, 1, 16, 0, 0), None),
        ];
        let updated = vec![meta("d", "Old edit", at(2024, 1, 10, 8, 0), Some(at(2024, 1, 14, 12, 0)))];

        let notes = merge_notes(&window, &taipei(), &created, &updated).unwrap();
        let guids: Vec<&str> = notes.iter().map(|n| n.guid.as_str()).collect();
        assert_eq!(guids, vec!["b"]);
        assert_eq!(notes[0].stamp, "2024/01/15 00:00");
    }

    #[test]
    fn test_created_wins_over_updated() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![meta("a", "A", at(2024, 1, 15, 9, 0), None)];
        let updated = vec![meta("a", "A", at(2024, 1, 15, 9, 0), Some(at(2024, 1, 15, 17, 30)))];

        let notes = merge_notes(&window, &taipei(), &created, &updated).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, ChangeKind::Created);
        assert_eq!(notes[0].stamp, "2024/01/15 09:00");
    }

    #[test]
    fn test_updated_admitted_when_creation_was_out_of_window() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![meta("a", "Late", at(2024, 1, 14, 22, 0), None)];
        let updated = vec![meta("a", "Late", at(2024, 1, 14, 22, 0), Some(at(2024, 1, 15, 7, 5)))];

        let notes = merge_notes(&window, &taipei(), &created, &updated).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, ChangeKind::Updated);
        assert_eq!(notes[0].time_of_day(), "07:05");
    }

    #[test]
    fn test_sorted_by_stamp_with_stable_ties() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![
            meta("late", "Late", at(2024, 1, 15, 18, 0), None),
            meta("tie-1", "Tie 1", at(2024, 1, 15, 9, 0), None),
        ];
        let updated = vec![
            meta("early", "Early", at(2023, 5, 1, 0, 0), Some(at(2024, 1, 15, 6, 0))),
            meta("tie-2", "Tie 2", at(2023, 5, 1, 0, 0), Some(at(2024, 1, 15, 9, 0) + 30_000)),
        ];

        let notes = merge_notes(&window, &taipei(), &created, &updated).unwrap();
        let guids: Vec<&str> = notes.iter().map(|n| n.guid.as_str()).collect();
        assert_eq!(guids, vec!["early", "tie-1", "tie-2", "late"]);
        assert!(notes.windows(2).all(|w| w[0].stamp <= w[1].stamp));
    }

    #[test]
    fn test_duplicate_created_guid_is_contract_violation() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![
            meta("a", "A", at(2024, 1, 15, 9, 0), None),
            meta("a", "A again", at(2024, 1, 15, 10, 0), None),
        ];
        assert!(matches!(
            merge_notes(&window, &taipei(), &created, &[]),
            Err(LoggerError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_missing_update_time_is_contract_violation() {
        let window = DayWindow::parse("20240115").unwrap();
        let updated = vec![meta("a", "A", at(2024, 1, 15, 9, 0), None)];
        assert!(matches!(
            merge_notes(&window, &taipei(), &[], &updated),
            Err(LoggerError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_missing_update_time_ignored_when_already_created() {
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![meta("a", "A", at(2024, 1, 15, 9, 0), None)];
        let updated = vec![meta("a", "A", at(2024, 1, 15, 9, 0), None)];
        let notes = merge_notes(&window, &taipei(), &created, &updated).unwrap();
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_local_zone_decides_membership() {
        // 2024-01-14 20:00 UTC is already the 15th in Taipei
        let millis = chrono::Utc
            .with_ymd_and_hms(2024, 1, 14, 20, 0, 0)
            .unwrap()
            .timestamp_millis();
        let window = DayWindow::parse("20240115").unwrap();
        let created = vec![meta("a", "A", millis, None)];

        assert_eq!(merge_notes(&window, &taipei(), &created, &[]).unwrap().len(), 1);
        assert!(merge_notes(&window, &chrono::Utc, &created, &[]).unwrap().is_empty());
    }
}
