//! Free-text note editing
//!
//! The editor keeps the draft locally until the source accepts it. Failed
//! saves leave both the draft and the editing state in place so the operator
//! can correct the text and retry.

use crate::adapters::MeterSource;
use crate::domain::{FairwattError, MeterId, Result};

/// Message shown when saving an empty note
pub const EMPTY_NOTE_MESSAGE: &str = "Note cannot be empty";

/// Edit state of one meter's note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditor {
    meter_id: MeterId,
    draft: String,
    editing: bool,
}

impl NoteEditor {
    /// Editor over the note currently stored for `meter_id`
    pub fn new(meter_id: MeterId, current: Option<&str>) -> Self {
        Self {
            meter_id,
            draft: current.unwrap_or_default().to_string(),
            editing: false,
        }
    }

    pub fn meter_id(&self) -> MeterId {
        self.meter_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.editing = true;
    }

    /// Sends the draft to `source`
    ///
    /// # Errors
    ///
    /// An empty or whitespace-only draft is rejected with a validation error
    /// before any call is made. Source errors (including server-side
    /// validation) are returned unchanged.
    pub async fn save(&mut self, source: &dyn MeterSource) -> Result<()> {
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return Err(FairwattError::Validation(EMPTY_NOTE_MESSAGE.to_string()));
        }

        match source.save_note(self.meter_id, &text).await {
            Ok(()) => {
                self.draft = text;
                self.editing = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    meter_id = %self.meter_id,
                    error = %e,
                    "Note not saved, keeping draft"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixtureSource;

    #[tokio::test]
    async fn test_empty_draft_rejected_locally() {
        let source = FixtureSource::new();
        let mut editor = NoteEditor::new(MeterId::new(1), None);
        editor.set_draft("   ");

        let err = editor.save(&source).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), EMPTY_NOTE_MESSAGE);
        assert!(editor.is_editing());
    }

    #[tokio::test]
    async fn test_successful_save_ends_editing() {
        let source = FixtureSource::new();
        let mut editor = NoteEditor::new(MeterId::new(1), Some("old"));
        editor.begin_edit();
        editor.set_draft("  Dog in the yard ");

        editor.save(&source).await.unwrap();
        assert!(!editor.is_editing());
        assert_eq!(editor.draft(), "Dog in the yard");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let source = FixtureSource::new();
        let mut editor = NoteEditor::new(MeterId::new(404), None);
        editor.set_draft("Meter moved");

        assert!(editor.save(&source).await.is_err());
        assert!(editor.is_editing());
        assert_eq!(editor.draft(), "Meter moved");
    }
}
