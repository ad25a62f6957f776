use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::workspace::FileData;

/// Classification of a file relative to the last-committed snapshot.
///
/// `Deleted` is part of the persisted taxonomy for compatibility but is
/// never produced by the classifier: deleting a file purges its tracking
/// state instead (see `GitState::forget_file`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Created,
    Modified,
    Deleted,
}

/// A live file paired with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange<'a> {
    pub file: &'a FileData,
    pub change_type: ChangeType,
}

/// Classify the live file set against the snapshot map.
///
/// A file absent from the snapshot is `created`; one whose content
/// differs is `modified`; unchanged files are excluded. Output preserves
/// the order of the live file list. Files present only in the snapshot
/// are never reported.
pub fn compute_changes<'a>(
    files: &'a [FileData],
    snapshot: &HashMap<String, String>,
) -> Vec<FileChange<'a>> {
    let mut changes = Vec::new();
    for file in files {
        match snapshot.get(&file.id) {
            None => changes.push(FileChange {
                file,
                change_type: ChangeType::Created,
            }),
            Some(last_content) if last_content != &file.content => changes.push(FileChange {
                file,
                change_type: ChangeType::Modified,
            }),
            Some(_) => {}
        }
    }
    changes
}

/// Whole-file before/after view for one file. No line-level diffing:
/// the host renders both sides in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffView {
    pub id: String,
    pub name: String,
    pub original: String,
    pub modified: String,
}

pub fn diff_view(file: &FileData, snapshot: &HashMap<String, String>) -> DiffView {
    DiffView {
        id: file.id.clone(),
        name: file.name.clone(),
        original: snapshot.get(&file.id).cloned().unwrap_or_default(),
        modified: file.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Language;

    fn file(id: &str, content: &str) -> FileData {
        FileData {
            id: id.to_string(),
            name: format!("{id}.py"),
            language: Language::Python,
            content: content.to_string(),
        }
    }

    #[test]
    fn classifies_created_modified_and_excludes_unchanged() {
        let files = vec![file("1", "A"), file("2", "B"), file("3", "C")];
        let snapshot: HashMap<String, String> = [
            ("2".to_string(), "old".to_string()),
            ("3".to_string(), "C".to_string()),
        ]
        .into_iter()
        .collect();

        let changes = compute_changes(&files, &snapshot);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].file.id, "1");
        assert_eq!(changes[0].change_type, ChangeType::Created);
        assert_eq!(changes[1].file.id, "2");
        assert_eq!(changes[1].change_type, ChangeType::Modified);
    }

    #[test]
    fn snapshot_only_entries_are_never_reported() {
        let files = vec![file("1", "A")];
        let snapshot: HashMap<String, String> = [
            ("1".to_string(), "A".to_string()),
            ("stale".to_string(), "gone".to_string()),
        ]
        .into_iter()
        .collect();

        assert!(compute_changes(&files, &snapshot).is_empty());
    }

    #[test]
    fn output_preserves_live_list_order() {
        let files = vec![file("z", "1"), file("a", "2"), file("m", "3")];
        let changes = compute_changes(&files, &HashMap::new());
        let ids: Vec<&str> = changes.iter().map(|c| c.file.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn diff_view_falls_back_to_empty_original() {
        let f = file("1", "new text");
        let view = diff_view(&f, &HashMap::new());
        assert_eq!(view.original, "");
        assert_eq!(view.modified, "new text");

        let snapshot: HashMap<String, String> =
            [("1".to_string(), "old text".to_string())].into_iter().collect();
        let view = diff_view(&f, &snapshot);
        assert_eq!(view.original, "old text");
    }
}
