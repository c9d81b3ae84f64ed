//! Attachment selection data model

use serde::{Deserialize, Serialize};

/// A file already persisted on the record before this editing session.
///
/// Identified by its server-assigned identifier. Existing attachments are
/// never created here; a selection can only drop them from the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingAttachment {
    /// Server-assigned identifier
    pub id: String,
}

impl ExistingAttachment {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A locally selected file that has not been uploaded yet.
///
/// Identity for duplicate detection is the file name, not the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    /// File name as reported by the file chooser
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// MIME content type guessed from the name
    pub content_type: String,
}

impl StagedFile {
    /// Create a staged file, guessing the content type from the name.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            size,
            content_type,
        }
    }

    /// Check if this is an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Human-readable file size
    pub fn human_size(&self) -> String {
        let size = self.size as f64;
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

        if size == 0.0 {
            return "0 B".to_string();
        }

        let base = 1024.0_f64;
        let i = (size.ln() / base.ln()).floor() as usize;
        let i = i.min(UNITS.len() - 1);

        let value = size / base.powi(i as i32);
        format!("{:.1} {}", value, UNITS[i])
    }
}

/// One entry of the working set: an existing attachment not marked for
/// deletion, or a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingSetEntry<'a> {
    Existing(&'a ExistingAttachment),
    Staged(&'a StagedFile),
}

impl<'a> WorkingSetEntry<'a> {
    /// The name-derived identity used for duplicate detection.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Existing(attachment) => &attachment.id,
            Self::Staged(file) => &file.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_file_guesses_content_type() {
        let pdf = StagedFile::new("report.pdf", 1024);
        assert_eq!(pdf.content_type, "application/pdf");
        assert!(!pdf.is_image());

        let png = StagedFile::new("photo.png", 2048);
        assert_eq!(png.content_type, "image/png");
        assert!(png.is_image());

        let unknown = StagedFile::new("noextension", 10);
        assert_eq!(unknown.content_type, "application/octet-stream");
    }

    #[test]
    fn test_human_size() {
        let cases = [
            (0, "0 B"),
            (512, "512.0 B"),
            (1024, "1.0 KB"),
            (1536, "1.5 KB"),
            (1024 * 1024, "1.0 MB"),
        ];

        for (size, expected) in cases {
            let file = StagedFile::new("test.bin", size);
            assert_eq!(file.human_size(), expected, "Size: {}", size);
        }
    }

    #[test]
    fn test_working_set_entry_name() {
        let existing = ExistingAttachment::new("manual.pdf");
        let staged = StagedFile::new("notes.txt", 42);

        assert_eq!(WorkingSetEntry::Existing(&existing).name(), "manual.pdf");
        assert_eq!(WorkingSetEntry::Staged(&staged).name(), "notes.txt");
    }
}
