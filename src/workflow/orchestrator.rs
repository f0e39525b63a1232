//! The submit workflow: validate, normalize, upload, persist.
//!
//! Each submission runs as an explicit state machine over [`Stage`]. Every
//! step is awaited before the next begins, and nothing is retried. A failed
//! submission must be started again from the beginning.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use memoria_common::{Draft, ImageHandle, Memory, NewMemory, ValidDraft};
use tokio::sync::watch;
use uuid::Uuid;

use super::busy::BusyFlag;
use super::error::SubmitError;
use super::state::SubmissionState;
use crate::backend::{
    PostgrestRecords, RecordStore, StorageClient, StoragePath, SupabaseStorage, UploadOptions,
};
use crate::config::Config;
use crate::images::{ImageNormalizer, JpegNormalizer, NormalizeOptions, PassthroughNormalizer};

/// Fixed parameters applied to every submission.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// Table memory rows are inserted into.
    pub table: String,
    pub normalize: NormalizeOptions,
    pub upload: UploadOptions,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            table: memoria_common::MEMORIES_TABLE.to_string(),
            normalize: NormalizeOptions::default(),
            upload: UploadOptions::default(),
        }
    }
}

impl From<&Config> for WorkflowSettings {
    fn from(config: &Config) -> Self {
        Self {
            table: config.backend.table.clone(),
            normalize: NormalizeOptions::from(&config.normalize),
            upload: UploadOptions::from(&config.upload),
        }
    }
}

/// Work remaining for an in-flight submission, with the data each step needs.
enum Stage {
    Validate,
    Normalize(ValidDraft),
    Upload {
        draft: ValidDraft,
        image: ImageHandle,
    },
    Persist {
        draft: ValidDraft,
        path: StoragePath,
        image_url: String,
    },
    Done(Memory),
}

impl Stage {
    fn state(&self) -> SubmissionState {
        match self {
            Stage::Validate => SubmissionState::Validating,
            Stage::Normalize(_) => SubmissionState::Normalizing,
            Stage::Upload { .. } => SubmissionState::Uploading,
            Stage::Persist { .. } => SubmissionState::Persisting,
            Stage::Done(_) => SubmissionState::Succeeded,
        }
    }
}

/// Orchestrates one submission at a time against the external collaborators.
pub struct MemoryWorkflow {
    normalizer: Arc<dyn ImageNormalizer>,
    storage: Arc<dyn StorageClient>,
    records: Arc<dyn RecordStore>,
    settings: WorkflowSettings,
    busy: BusyFlag,
    state: watch::Sender<SubmissionState>,
}

impl MemoryWorkflow {
    pub fn new(
        normalizer: Arc<dyn ImageNormalizer>,
        storage: Arc<dyn StorageClient>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            normalizer,
            storage,
            records,
            settings: WorkflowSettings::default(),
            busy: BusyFlag::new(),
            state,
        }
    }

    /// Build a workflow talking to the configured backend.
    pub fn from_config(config: &Config) -> Self {
        let normalizer: Arc<dyn ImageNormalizer> = if config.normalize.enabled {
            Arc::new(JpegNormalizer::new())
        } else {
            Arc::new(PassthroughNormalizer)
        };

        Self::new(
            normalizer,
            Arc::new(SupabaseStorage::new(&config.backend)),
            Arc::new(PostgrestRecords::new(&config.backend)),
        )
        .with_settings(WorkflowSettings::from(config))
    }

    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// True while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Current state of the latest submission.
    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    /// Watch state changes, e.g. to drive a progress indicator.
    ///
    /// Rapid stage changes coalesce; a receiver may skip intermediate states.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Run the full workflow for `draft`.
    ///
    /// Validation happens before any I/O. A concurrent call while another
    /// submission is in flight fails with [`SubmitError::Busy`] without
    /// touching any collaborator.
    pub async fn submit(&self, draft: &Draft) -> Result<Memory, SubmitError> {
        let Some(_guard) = self.busy.try_acquire() else {
            tracing::warn!("Rejected submission: another one is in progress");
            return Err(SubmitError::Busy);
        };

        self.transition(SubmissionState::Idle)?;

        let result = self.run(draft).await;
        match &result {
            Ok(memory) => {
                tracing::info!("Created memory {} ({})", memory.id, memory.title);
            }
            Err(e) => {
                self.enter(SubmissionState::Failed);
                tracing::warn!("Submission failed: {}", e);
            }
        }

        result
    }

    async fn run(&self, draft: &Draft) -> Result<Memory, SubmitError> {
        let mut stage = Stage::Validate;

        loop {
            self.transition(stage.state())?;

            stage = match stage {
                Stage::Validate => Stage::Normalize(draft.validate()?),
                Stage::Normalize(draft) => {
                    let image = self
                        .normalizer
                        .normalize(&draft.image, &self.settings.normalize)
                        .await;
                    Stage::Upload { draft, image }
                }
                Stage::Upload { draft, image } => {
                    let path = self.upload(&image).await?;
                    let image_url = self.storage.public_url(&path);
                    Stage::Persist {
                        draft,
                        path,
                        image_url,
                    }
                }
                Stage::Persist {
                    draft,
                    path,
                    image_url,
                } => Stage::Done(self.persist(draft, &path, image_url).await?),
                Stage::Done(memory) => return Ok(memory),
            };
        }
    }

    async fn upload(&self, image: &ImageHandle) -> Result<StoragePath, SubmitError> {
        let bytes = image
            .read_bytes()
            .await
            .map_err(|e| SubmitError::upload(Some(e.to_string())))?;

        let key = storage_key(Utc::now());
        tracing::info!("Uploading {} bytes as {}", bytes.len(), key);

        self.storage
            .put(bytes, &key, &self.settings.upload)
            .await
            .map_err(|e| {
                tracing::error!("Upload error: {}", e);
                SubmitError::upload(e.message())
            })
    }

    async fn persist(
        &self,
        draft: ValidDraft,
        path: &StoragePath,
        image_url: String,
    ) -> Result<Memory, SubmitError> {
        let new = NewMemory {
            title: draft.title,
            description: draft.description,
            image_url,
        };

        self.records
            .insert(&self.settings.table, &new)
            .await
            .map_err(|e| {
                tracing::error!("Database error: {}", e);
                tracing::warn!("Uploaded object {} left without a record", path);
                SubmitError::persist(e.message())
            })
    }

    fn transition(&self, next: SubmissionState) -> Result<(), SubmitError> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(SubmitError::unknown(Some(format!(
                "illegal submission transition {} -> {}",
                current, next
            ))));
        }
        self.enter(next);
        Ok(())
    }

    /// Publish `next`. Watchers only see the latest value, so every stage is
    /// also logged here.
    fn enter(&self, next: SubmissionState) {
        if let Some(message) = next.progress_message() {
            tracing::info!("{}", message);
        }
        self.state.send_replace(next);
    }
}

/// Object key for an upload: millisecond timestamp plus a generated file name.
fn storage_key(now: DateTime<Utc>) -> String {
    let file_name = format!("memory_{}.jpg", Uuid::new_v4().simple());
    format!("{}_{}", now.timestamp_millis(), file_name)
}
