//! Attachment selection manager
//!
//! Owns the working set of a task edit form: the attachments already on the
//! record, the files staged for upload, and the identifiers queued for
//! server-side deletion. Every mutation goes through a command handler and is
//! followed by a validation pass, so the valid flag always reflects the
//! current state. Nothing here touches a UI; rendering is a projection over
//! this state (see [`crate::view`]).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use cmms_core::config::UploadLimits;
use cmms_core::error::ValidationErrors;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{ExistingAttachment, StagedFile, WorkingSetEntry};

/// How long the error region pulses after a new error is displayed.
/// Purely cosmetic; gates nothing.
const ERROR_PULSE_MILLIS: i64 = 1000;

/// Selection errors. All user-facing and recoverable: the user corrects the
/// selection and retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("A file named {0} already exists")]
    DuplicateName(String),
    #[error("The maximum of {max} files has been exceeded")]
    TooManyFiles { max: usize },
    #[error("The combined file size exceeds the {limit} limit")]
    TotalSizeExceeded { limit: String },
    #[error("The form cannot be submitted while errors exist")]
    SubmitBlocked,
}

/// Per-file outcome of a staging command.
///
/// Staging is partially accepting: a rejected file does not stop the rest of
/// the batch from being processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcome {
    /// Names of the files added to the staged collection, in order
    pub accepted: Vec<String>,
    /// Rejections, in the order they occurred
    pub rejected: Vec<SelectionError>,
}

impl StageOutcome {
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// What a successful submission gate hands to the native form post: the
/// staged files to upload and the comma-joined deletion field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub files: Vec<StagedFile>,
    pub delete_attachments: String,
}

/// The attachment selection manager.
///
/// State is instance-owned and mutated only through the command handlers;
/// the ordered vectors are the source of truth, never a rendered list.
#[derive(Debug, Clone)]
pub struct AttachmentSelection {
    existing: Vec<ExistingAttachment>,
    staged: Vec<StagedFile>,
    /// Identifiers queued for server-side deletion, in click order
    deleted: Vec<String>,
    limits: UploadLimits,
    valid: bool,
    error: Option<SelectionError>,
    error_shown_at: Option<DateTime<Utc>>,
}

impl AttachmentSelection {
    /// Create an empty selection (a create form with no record yet).
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            existing: Vec::new(),
            staged: Vec::new(),
            deleted: Vec::new(),
            limits,
            valid: true,
            error: None,
            error_shown_at: None,
        }
    }

    /// Create a selection seeded with the record's existing attachment
    /// identifiers, in the order they appear on the page.
    pub fn with_existing<I, S>(ids: I, limits: UploadLimits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(limits);
        selection.existing = ids
            .into_iter()
            .map(|id| ExistingAttachment::new(id))
            .collect();
        selection
    }

    /// Stage newly picked files.
    ///
    /// Each file whose name collides with an existing identifier or an
    /// already staged name is rejected individually; the rest of the batch is
    /// still processed. Afterwards the whole selection is re-validated, and
    /// if anything was rejected the last rejection becomes the displayed
    /// error (errors replace each other, they never stack).
    pub fn stage_files<I>(&mut self, files: I) -> StageOutcome
    where
        I: IntoIterator<Item = StagedFile>,
    {
        let mut outcome = StageOutcome::default();

        for file in files {
            if self.name_taken(&file.name) {
                debug!(name = %file.name, "Rejected duplicate file");
                outcome
                    .rejected
                    .push(SelectionError::DuplicateName(file.name));
                continue;
            }

            debug!(name = %file.name, size = file.size, "File staged");
            outcome.accepted.push(file.name.clone());
            self.staged.push(file);
        }

        let _ = self.validate();
        if let Some(rejection) = outcome.rejected.last() {
            self.display_error(rejection.clone());
        }

        outcome
    }

    /// Remove one staged file by name and re-validate.
    ///
    /// Unknown names are a no-op: the remove control only exists for rendered
    /// entries, so this branch is unreachable from the projection.
    pub fn remove_staged(&mut self, name: &str) -> Result<(), SelectionError> {
        if let Some(pos) = self.staged.iter().position(|f| f.name == name) {
            self.staged.remove(pos);
            debug!(name = %name, "Staged file removed");
        }
        self.validate()
    }

    /// Mark an existing attachment for server-side deletion.
    ///
    /// Appends the identifier to the deletion field exactly once and drops it
    /// from the existing set. Deliberately leaves the error display alone:
    /// the working set only shrank, which can only help pass the limits.
    pub fn mark_existing_deleted(&mut self, id: &str) {
        let Some(pos) = self.existing.iter().position(|a| a.id == id) else {
            return;
        };
        self.existing.remove(pos);

        if !self.deleted.iter().any(|d| d == id) {
            self.deleted.push(id.to_string());
        }
        info!(id = %id, "Existing attachment marked for deletion");
    }

    /// Validate the current working set.
    ///
    /// Clears any prior error, then checks in order: duplicate names (first
    /// offender wins, staged files walked in order against a set seeded with
    /// the existing identifiers), the file-count limit, the staged byte-sum
    /// limit. Sets the valid flag either way.
    pub fn validate(&mut self) -> Result<(), SelectionError> {
        self.clear_error();

        let mut names: HashSet<&str> = self.existing.iter().map(|a| a.id.as_str()).collect();
        let mut total_size: u64 = 0;

        for file in &self.staged {
            if !names.insert(&file.name) {
                return self.fail(SelectionError::DuplicateName(file.name.clone()));
            }
            total_size = total_size.saturating_add(file.size);
        }

        if self.staged.len() + self.existing.len() > self.limits.max_files {
            return self.fail(SelectionError::TooManyFiles {
                max: self.limits.max_files,
            });
        }
        if total_size > self.limits.max_total_bytes {
            return self.fail(SelectionError::TotalSizeExceeded {
                limit: self.limits.total_size_label(),
            });
        }

        Ok(())
    }

    /// Gate the form submission.
    ///
    /// Re-validates; a failure cancels the submission and surfaces both the
    /// specific cause and the generic blocking notice. A success yields the
    /// payload the native form post carries.
    pub fn submit(&mut self) -> Result<SubmissionPayload, ValidationErrors> {
        match self.validate() {
            Ok(()) => {
                info!(
                    files = self.staged.len(),
                    deletions = self.deleted.len(),
                    "Attachment selection submitted"
                );
                Ok(SubmissionPayload {
                    files: self.staged.clone(),
                    delete_attachments: self.deletion_field(),
                })
            }
            Err(cause) => {
                warn!(cause = %cause, "Submission blocked by attachment errors");
                let mut errors = ValidationErrors::new();
                errors.add("attachments", cause.to_string());
                errors.add_base(SelectionError::SubmitBlocked.to_string());
                self.display_error(SelectionError::SubmitBlocked);
                Err(errors)
            }
        }
    }

    /// Existing attachments not marked for deletion, in page order.
    pub fn existing(&self) -> &[ExistingAttachment] {
        &self.existing
    }

    /// Staged files, in staging order.
    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    /// The working set: existing attachments followed by staged files.
    pub fn working_set(&self) -> impl Iterator<Item = WorkingSetEntry<'_>> {
        self.existing
            .iter()
            .map(WorkingSetEntry::Existing)
            .chain(self.staged.iter().map(WorkingSetEntry::Staged))
    }

    /// Comma-joined identifiers the server must delete on submit.
    pub fn deletion_field(&self) -> String {
        self.deleted.join(",")
    }

    /// Total count the form carries: staged plus remaining existing files.
    pub fn file_count(&self) -> usize {
        self.staged.len() + self.existing.len()
    }

    /// Combined size of the staged files in bytes. Existing attachments do
    /// not count: their bytes are not re-uploaded.
    pub fn total_staged_size(&self) -> u64 {
        self.staged.iter().map(|f| f.size).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self) -> Option<&SelectionError> {
        self.error.as_ref()
    }

    /// The displayed error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Whether the cosmetic error pulse is still running at `now`.
    pub fn error_pulse_active(&self, now: DateTime<Utc>) -> bool {
        match self.error_shown_at {
            Some(shown) => {
                now.signed_duration_since(shown) < Duration::milliseconds(ERROR_PULSE_MILLIS)
            }
            None => false,
        }
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    fn name_taken(&self, name: &str) -> bool {
        self.existing.iter().any(|a| a.id == name) || self.staged.iter().any(|f| f.name == name)
    }

    fn display_error(&mut self, error: SelectionError) {
        self.error = Some(error);
        self.error_shown_at = Some(Utc::now());
        self.valid = false;
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.error_shown_at = None;
        self.valid = true;
    }

    fn fail(&mut self, error: SelectionError) -> Result<(), SelectionError> {
        self.display_error(error.clone());
        Err(error)
    }
}

impl Default for AttachmentSelection {
    fn default() -> Self {
        Self::new(UploadLimits::default())
    }
}
