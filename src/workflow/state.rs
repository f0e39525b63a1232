use serde::Serialize;

/// Lifecycle of one submission.
///
/// ```text
/// Idle -> Validating -> Normalizing -> Uploading -> Persisting -> Succeeded
///              |                           |             |
///              +---------------------------+-------------+--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Normalizing,
    Uploading,
    Persisting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Whether `next` is a legal successor of `self`.
    ///
    /// Only a settled submission (idle or terminal) may restart at `Idle`.
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;

        matches!(
            (self, next),
            (Idle | Succeeded | Failed, Idle)
                | (Idle, Validating)
                | (Validating, Normalizing)
                | (Normalizing, Uploading)
                | (Uploading, Persisting)
                | (Persisting, Succeeded)
                | (Validating | Uploading | Persisting, Failed)
        )
    }

    /// A submission is in flight in this state.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Validating | Self::Normalizing | Self::Uploading | Self::Persisting
        )
    }

    /// Message for the progress indicator while busy.
    pub fn progress_message(self) -> Option<&'static str> {
        match self {
            Self::Validating => Some("Validating..."),
            Self::Normalizing => Some("Compressing image..."),
            Self::Uploading => Some("Uploading your memory..."),
            Self::Persisting => Some("Saving memory..."),
            Self::Idle | Self::Succeeded | Self::Failed => None,
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Normalizing => "normalizing",
            Self::Uploading => "uploading",
            Self::Persisting => "persisting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
