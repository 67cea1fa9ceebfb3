//! Mission wizard controller.
//!
//! A four-step state machine (`Profile -> Logistics -> Narrative -> Review`)
//! owning one [`MissionDraft`] and at most one pending media file. Nothing
//! is written anywhere until [`MissionWizard::submit`] hands a snapshot to
//! the [`SubmissionAdapter`].
//!
//! Submission is split into [`MissionWizard::begin_submit`] and
//! [`MissionWizard::finish_submit`] so callers that keep wizards behind a
//! lock can release it while the collaborators run.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::{self, MediaError, MediaFile};
use crate::mission::{FieldError, Mission, MissionDraft, MissionField, MissionType};
use crate::session::Session;
use crate::submission::{SubmissionAdapter, SubmissionError, SubmissionMode, SubmissionRequest};
use crate::types::DbId;
use crate::validation::{self, StepIncomplete};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Profile,
    Logistics,
    Narrative,
    Review,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        Self::Profile,
        Self::Logistics,
        Self::Narrative,
        Self::Review,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Profile),
            2 => Ok(Self::Logistics),
            3 => Ok(Self::Narrative),
            4 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Profile => 1,
            Self::Logistics => 2,
            Self::Narrative => 3,
            Self::Review => 4,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Logistics => "Logistics",
            Self::Narrative => "Narrative",
            Self::Review => "Review",
        }
    }

    fn forward(self) -> Self {
        Self::from_number(self.to_number() + 1).unwrap_or(self)
    }

    fn backward(self) -> Self {
        Self::from_number(self.to_number().saturating_sub(1)).unwrap_or(self)
    }
}

// ---------------------------------------------------------------------------
// Mode / errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WizardMode {
    Create,
    Edit { mission_id: DbId },
}

impl WizardMode {
    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    fn submission_mode(self) -> SubmissionMode {
        match self {
            Self::Create => SubmissionMode::Create,
            Self::Edit { mission_id } => SubmissionMode::Update { mission_id },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Incomplete(#[from] StepIncomplete),

    #[error("'{action}' is only available on step {} ({}); the wizard is on step {} ({})",
        .expected.to_number(), .expected.label(), .current.to_number(), .current.label())]
    WrongStep {
        action: &'static str,
        expected: WizardStep,
        current: WizardStep,
    },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Status can only be changed when editing an existing mission")]
    StatusNotEditable,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("A submission is already in progress")]
    SubmitInFlight,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error("The wizard has already been submitted")]
    Closed,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl From<WizardError> for CoreError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Submission(e) => e.into(),
            WizardError::SubmitInFlight | WizardError::NotSubmitting | WizardError::Closed => {
                CoreError::Conflict(err.to_string())
            }
            _ => CoreError::Validation(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MissionWizard {
    mode: WizardMode,
    step: WizardStep,
    draft: MissionDraft,
    pending_media: Option<MediaFile>,
    last_error: Option<String>,
    in_flight: bool,
    closed: bool,
}

impl Default for MissionWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionWizard {
    /// A create-mode wizard on step 1 with an empty draft.
    pub fn new() -> Self {
        Self {
            mode: WizardMode::Create,
            step: WizardStep::Profile,
            draft: MissionDraft::default(),
            pending_media: None,
            last_error: None,
            in_flight: false,
            closed: false,
        }
    }

    /// An edit-mode wizard pre-populated from `mission`, still on step 1.
    pub fn for_mission(mission: &Mission) -> Self {
        Self {
            mode: WizardMode::Edit {
                mission_id: mission.id,
            },
            draft: MissionDraft::from_mission(mission),
            ..Self::new()
        }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &MissionDraft {
        &self.draft
    }

    pub fn pending_media(&self) -> Option<&MediaFile> {
        self.pending_media.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the current step's predicate holds.
    pub fn can_advance(&self) -> bool {
        validation::can_advance(self.step, &self.draft)
    }

    fn ensure_mutable(&self) -> Result<(), WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        if self.in_flight {
            return Err(WizardError::SubmitInFlight);
        }
        Ok(())
    }

    fn ensure_step(&self, action: &'static str, expected: WizardStep) -> Result<(), WizardError> {
        if self.step != expected {
            return Err(WizardError::WrongStep {
                action,
                expected,
                current: self.step,
            });
        }
        Ok(())
    }

    /// Leave the current step if its predicate holds. No-op on the last step.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_mutable()?;
        validation::validate_step(self.step, &self.draft)?;
        self.step = self.step.forward();
        Ok(self.step)
    }

    /// Go back one step. No-op on the first step.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_mutable()?;
        self.step = self.step.backward();
        Ok(self.step)
    }

    /// Choose the mission profile. Only available on step 1.
    pub fn select_profile(&mut self, mission_type: MissionType) -> Result<(), WizardError> {
        self.ensure_mutable()?;
        self.ensure_step("select profile", WizardStep::Profile)?;
        self.draft.mission_type = Some(mission_type);
        Ok(())
    }

    /// Update one named field, in any step.
    ///
    /// Typing an image URL by hand replaces any pending upload.
    pub fn edit_field(&mut self, field: MissionField, value: &str) -> Result<(), WizardError> {
        self.ensure_mutable()?;
        if field == MissionField::Status && !self.mode.is_edit() {
            return Err(WizardError::StatusNotEditable);
        }
        self.draft.set_field(field, value)?;
        if field == MissionField::ImageUrl {
            self.pending_media = None;
        }
        Ok(())
    }

    /// Hold a file for upload at submit time after the client-side checks.
    ///
    /// A rejected file leaves the draft and any previous pending file as is.
    pub fn attach_media(&mut self, file: MediaFile) -> Result<(), WizardError> {
        self.ensure_mutable()?;
        media::validate_media(&file)?;
        self.pending_media = Some(file);
        Ok(())
    }

    /// Drop the pending file, if any.
    pub fn clear_media(&mut self) -> Result<(), WizardError> {
        self.ensure_mutable()?;
        self.pending_media = None;
        Ok(())
    }

    /// Mark a submission as in flight and snapshot what it needs.
    ///
    /// Only available on the review step. Steps 1 to 3 are re-checked so a
    /// draft edited after passing a step cannot be submitted incomplete.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, WizardError> {
        self.ensure_mutable()?;
        self.ensure_step("submit", WizardStep::Review)?;
        validation::validate_through(WizardStep::Narrative, &self.draft)?;

        self.in_flight = true;
        self.last_error = None;
        Ok(SubmissionRequest {
            mode: self.mode.submission_mode(),
            draft: self.draft.clone(),
            media: self.pending_media.clone(),
        })
    }

    /// Record the outcome of a submission started with `begin_submit`.
    ///
    /// Success closes the wizard. Failure keeps it on the review step with
    /// the draft intact and the message stored in `last_error`.
    pub fn finish_submit(
        &mut self,
        result: Result<Mission, SubmissionError>,
    ) -> Result<Mission, WizardError> {
        if !self.in_flight {
            return Err(WizardError::NotSubmitting);
        }
        self.in_flight = false;

        match result {
            Ok(mission) => {
                self.closed = true;
                self.pending_media = None;
                Ok(mission)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Submit the draft through `adapter` under `session`.
    pub async fn submit(
        &mut self,
        adapter: &SubmissionAdapter,
        session: &Session,
    ) -> Result<Mission, WizardError> {
        let request = self.begin_submit()?;
        let result = adapter.submit(request, session).await;
        self.finish_submit(result)
    }

    /// Serializable snapshot for callers rendering the wizard.
    pub fn view(&self) -> WizardView {
        WizardView {
            mode: self.mode,
            step: self.step,
            step_number: self.step.to_number(),
            step_label: self.step.label(),
            total_steps: TOTAL_STEPS,
            can_advance: self.can_advance(),
            draft: self.draft.clone(),
            pending_media: self.pending_media.as_ref().map(|f| PendingMedia {
                file_name: f.file_name.clone(),
                content_type: f.content_type.clone(),
                size: f.size(),
            }),
            last_error: self.last_error.clone(),
            submitting: self.in_flight,
        }
    }
}

/// Read model of a wizard.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    #[serde(flatten)]
    pub mode: WizardMode,
    pub step: WizardStep,
    pub step_number: u8,
    pub step_label: &'static str,
    pub total_steps: u8,
    pub can_advance: bool,
    pub draft: MissionDraft,
    pub pending_media: Option<PendingMedia>,
    pub last_error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingMedia {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}
