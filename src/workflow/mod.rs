//! Upload/persist workflow for new memories.
//!
//! [`MemoryWorkflow::submit`] validates a [`memoria_common::Draft`], normalizes
//! its image, uploads it to object storage, and inserts the memory record.
//! Failures at any step come back as a [`SubmitError`]; none escape further.

mod busy;
mod error;
mod orchestrator;
mod state;

pub use busy::{BusyFlag, BusyGuard};
pub use error::{SubmitError, PERSIST_FALLBACK, UNKNOWN_FALLBACK, UPLOAD_FALLBACK};
pub use orchestrator::{MemoryWorkflow, WorkflowSettings};
pub use state::SubmissionState;
