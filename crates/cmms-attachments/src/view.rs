//! View projection
//!
//! Pure functions from the selection state to render-ready data. The host
//! page renders one removable entry per working-set file plus an error panel;
//! nothing in here mutates the model, and the model never reads back from a
//! rendered list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::WorkingSetEntry;
use crate::selection::AttachmentSelection;

/// One rendered file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntryView {
    /// Display name (the server identifier for existing attachments)
    pub name: String,
    /// Human-readable size, present only for staged files
    pub size_label: Option<String>,
    /// Server identifier, present only for existing attachments; its remove
    /// control marks the attachment for deletion instead of unstaging
    pub existing_id: Option<String>,
    /// Whether a remove control is rendered
    pub removable: bool,
}

/// The error display region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    /// Current message, replacing any previous one
    pub message: Option<String>,
    /// Whether the cosmetic pulse affordance is active
    pub pulse: bool,
}

/// Everything the host page needs to render the attachment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListView {
    pub entries: Vec<FileEntryView>,
    pub error: ErrorPanel,
    /// Mirrors the form's file-count attribute: staged plus existing
    pub file_count: usize,
    /// Value of the hidden deletion field
    pub delete_attachments: String,
}

/// Project the selection into render-ready data as of `now`.
pub fn render(selection: &AttachmentSelection, now: DateTime<Utc>) -> FileListView {
    let entries = selection
        .working_set()
        .map(|entry| match entry {
            WorkingSetEntry::Existing(attachment) => FileEntryView {
                name: attachment.id.clone(),
                size_label: None,
                existing_id: Some(attachment.id.clone()),
                removable: true,
            },
            WorkingSetEntry::Staged(file) => FileEntryView {
                name: file.name.clone(),
                size_label: Some(file.human_size()),
                existing_id: None,
                removable: true,
            },
        })
        .collect();

    FileListView {
        entries,
        error: ErrorPanel {
            message: selection.error_message(),
            pulse: selection.error_pulse_active(now),
        },
        file_count: selection.file_count(),
        delete_attachments: selection.deletion_field(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StagedFile;
    use cmms_core::config::UploadLimits;

    #[test]
    fn test_render_lists_existing_before_staged() {
        let mut selection =
            AttachmentSelection::with_existing(["manual.pdf"], UploadLimits::default());
        selection.stage_files(vec![StagedFile::new("notes.txt", 1024)]);

        let view = render(&selection, Utc::now());

        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].name, "manual.pdf");
        assert_eq!(view.entries[0].existing_id.as_deref(), Some("manual.pdf"));
        assert_eq!(view.entries[0].size_label, None);
        assert_eq!(view.entries[1].name, "notes.txt");
        assert_eq!(view.entries[1].size_label.as_deref(), Some("1.0 KB"));
        assert!(view.entries.iter().all(|e| e.removable));
        assert_eq!(view.file_count, 2);
        assert_eq!(view.error.message, None);
    }

    #[test]
    fn test_render_reflects_error_and_pulse() {
        let mut selection = AttachmentSelection::default();
        selection.stage_files(vec![
            StagedFile::new("a.txt", 1),
            StagedFile::new("a.txt", 1),
        ]);

        let view = render(&selection, Utc::now());
        assert_eq!(
            view.error.message.as_deref(),
            Some("A file named a.txt already exists")
        );
        assert!(view.error.pulse);

        let later = Utc::now() + chrono::Duration::seconds(5);
        let view = render(&selection, later);
        assert!(!view.error.pulse, "pulse is a 1-second affordance");
    }

    #[test]
    fn test_render_carries_deletion_field() {
        let mut selection =
            AttachmentSelection::with_existing(["12", "34"], UploadLimits::default());
        selection.mark_existing_deleted("12");

        let view = render(&selection, Utc::now());
        assert_eq!(view.delete_attachments, "12");
        assert_eq!(view.entries.len(), 1);
    }

    #[test]
    fn test_view_serializes_for_embedding() {
        let mut selection = AttachmentSelection::default();
        selection.stage_files(vec![StagedFile::new("a.pdf", 2048)]);

        let json = serde_json::to_value(render(&selection, Utc::now())).unwrap();
        assert_eq!(json["file_count"], 1);
        assert_eq!(json["entries"][0]["name"], "a.pdf");
        assert_eq!(json["entries"][0]["size_label"], "2.0 KB");
        assert_eq!(json["error"]["message"], serde_json::Value::Null);
    }
}
