use std::collections::HashMap;

use crate::error::{LoggerError, Result};
use crate::model::{NoteSummary, Notebook};

/// Notes rendered under one `<h2>` heading. An empty name means no heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookGroup {
    pub name: String,
    pub notes: Vec<NoteSummary>,
}

/// Everything in one unnamed group
pub fn single_group(notes: Vec<NoteSummary>) -> Vec<NotebookGroup> {
    vec![NotebookGroup {
        name: String::new(),
        notes,
    }]
}

/// Group time-ordered notes by notebook name.
///
/// Groups appear in the order their first note appears; notes keep their
/// relative order inside a group.
pub fn group_by_notebook(
    notes: Vec<NoteSummary>,
    notebooks: &[Notebook],
) -> Result<Vec<NotebookGroup>> {
    let names: HashMap<&str, &str> = notebooks
        .iter()
        .map(|nb| (nb.guid.as_str(), nb.name.as_str()))
        .collect();

    let mut groups: Vec<NotebookGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for note in notes {
        let name = *names.get(note.notebook_guid.as_str()).ok_or_else(|| {
            LoggerError::ContractViolation(format!(
                "note {} belongs to unknown notebook {}",
                note.guid, note.notebook_guid
            ))
        })?;

        let index = match positions.get(name) {
            Some(&index) => index,
            None => {
                groups.push(NotebookGroup {
                    name: name.to_string(),
                    notes: Vec::new(),
                });
                positions.insert(name.to_string(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[index].notes.push(note);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeKind;

    fn note(guid: &str, notebook: &str, stamp: &str) -> NoteSummary {
        NoteSummary {
            guid: guid.to_string(),
            notebook_guid: notebook.to_string(),
            title: guid.to_uppercase(),
            stamp: stamp.to_string(),
            kind: ChangeKind::Created,
            view_link: String::new(),
        }
    }

    fn notebooks() -> Vec<Notebook> {
        vec![
            Notebook { guid: "b-work".to_string(), name: "Work".to_string() },
            Notebook { guid: "b-home".to_string(), name: "Home".to_string() },
            Notebook { guid: "b-unused".to_string(), name: "Unused".to_string() },
        ]
    }

    fn sample() -> Vec<NoteSummary> {
        vec![
            note("n1", "b-home", "2024/01/15 08:00"),
            note("n2", "b-work", "2024/01/15 09:00"),
            note("n3", "b-home", "2024/01/15 10:00"),
            note("n4", "b-work", "2024/01/15 11:00"),
        ]
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let groups = group_by_notebook(sample(), &notebooks()).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Work"]);

        let home: Vec<&str> = groups[0].notes.iter().map(|n| n.guid.as_str()).collect();
        assert_eq!(home, vec!["n1", "n3"]);
        let work: Vec<&str> = groups[1].notes.iter().map(|n| n.guid.as_str()).collect();
        assert_eq!(work, vec!["n2", "n4"]);
    }

    #[test]
    fn test_grouping_preserves_relative_order() {
        let ungrouped = sample();
        let groups = group_by_notebook(ungrouped.clone(), &notebooks()).unwrap();

        let flattened: Vec<NoteSummary> = groups.into_iter().flat_map(|g| g.notes).collect();
        assert_eq!(flattened.len(), ungrouped.len());
        for group_name in ["b-home", "b-work"] {
            let expected: Vec<&NoteSummary> =
                ungrouped.iter().filter(|n| n.notebook_guid == group_name).collect();
            let actual: Vec<&NoteSummary> =
                flattened.iter().filter(|n| n.notebook_guid == group_name).collect();
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_same_name_notebooks_share_group() {
        let mut books = notebooks();
        books.push(Notebook { guid: "b-work-2".to_string(), name: "Work".to_string() });
        let notes = vec![
            note("n1", "b-work", "2024/01/15 08:00"),
            note("n2", "b-work-2", "2024/01/15 09:00"),
        ];
        let groups = group_by_notebook(notes, &books).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].notes.len(), 2);
    }

    #[test]
    fn test_unknown_notebook_is_contract_violation() {
        let notes = vec![note("n1", "b-missing", "2024/01/15 08:00")];
        assert!(matches!(
            group_by_notebook(notes, &notebooks()),
            Err(LoggerError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_single_group_has_empty_name() {
        let groups = single_group(sample());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "");
        assert_eq!(groups[0].notes, sample());
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_notebook(Vec::new(), &notebooks()).unwrap().is_empty());
    }
}
