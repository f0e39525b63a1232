//! Draft editing around a workflow.
//!
//! [`MemoryComposer`] is what a form front end holds: it owns the draft while
//! the user edits, tracks the inline title error, and hands the draft to the
//! workflow on submit. A successful submit consumes the draft.

use memoria_common::{Draft, ImageHandle, Memory};

use crate::workflow::{MemoryWorkflow, SubmitError};

pub struct MemoryComposer {
    workflow: MemoryWorkflow,
    draft: Draft,
    title_error: Option<String>,
}

impl MemoryComposer {
    pub fn new(workflow: MemoryWorkflow) -> Self {
        Self {
            workflow,
            draft: Draft::default(),
            title_error: None,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn workflow(&self) -> &MemoryWorkflow {
        &self.workflow
    }

    /// Select or replace the image.
    pub fn select_image(&mut self, image: ImageHandle) {
        self.draft.set_image(image);
    }

    /// Edit the title. Clears any inline title error.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.set_title(title);
        self.title_error = None;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.set_description(description);
    }

    /// Inline error to show under the title field.
    pub fn title_error(&self) -> Option<&str> {
        self.title_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.workflow.is_busy()
    }

    /// Submit the current draft.
    ///
    /// On success the draft is reset to empty. On failure it is kept as-is so
    /// the user can correct it or resubmit.
    pub async fn submit(&mut self) -> Result<Memory, SubmitError> {
        match self.workflow.submit(&self.draft).await {
            Ok(memory) => {
                self.draft = Draft::default();
                self.title_error = None;
                Ok(memory)
            }
            Err(e) => {
                if let Some(inline) = e.inline_error() {
                    self.title_error = Some(inline.user_message());
                }
                Err(e)
            }
        }
    }
}
