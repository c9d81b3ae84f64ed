//! # cmms-attachments
//!
//! Attachment selection and validation for CMMS RS task forms.
//!
//! ## Features
//!
//! - Staging area for files picked into a server-rendered edit form
//! - Reconciliation against attachments already persisted on the record
//! - Duplicate-name, file-count, and total-size validation
//! - Submission gate producing the final upload payload
//! - Render-ready view projection for the hosting page
//!
//! ## Example
//!
//! ```rust
//! use cmms_attachments::{AttachmentSelection, StagedFile};
//! use cmms_core::config::UploadLimits;
//!
//! let mut selection = AttachmentSelection::with_existing(
//!     ["manual.pdf"],
//!     UploadLimits::default(),
//! );
//!
//! let outcome = selection.stage_files(vec![StagedFile::new("photos.zip", 4096)]);
//! assert!(outcome.all_accepted());
//!
//! let payload = selection.submit().expect("selection is within limits");
//! assert_eq!(payload.files.len(), 1);
//! ```

pub mod model;
pub mod selection;
pub mod view;

pub use model::{ExistingAttachment, StagedFile, WorkingSetEntry};
pub use selection::{
    AttachmentSelection, SelectionError, StageOutcome, SubmissionPayload,
};
pub use view::{render, ErrorPanel, FileEntryView, FileListView};
