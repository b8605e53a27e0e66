//! Tour editor state.
//!
//! The editor holds a draft in memory and never talks to the server until
//! [`TourEditor::save`]. Saving is split into [`TourEditor::begin_save`] and
//! [`TourEditor::finish_save`] so the state machine can be driven without a
//! network.
//!
//! ```text
//! Idle --begin_save--> Saving --finish_save(Ok)--> Saved
//!                             --finish_save(Err)-> Failed(message)
//! Saved | Failed --any edit--> Idle
//! ```

use marvedge_core::types::DbId;
use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{CreateTourRequest, StepInput, Tour, UpdateTourRequest};

/// Title a fresh draft starts with.
pub const DEFAULT_TITLE: &str = "New Tour";

/// Local handle for a draft step; stable across edits and deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepKey(u64);

/// A step being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftStep {
    pub key: StepKey,
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
    pub order: i32,
    pub tags: Vec<String>,
    pub duration: Option<i32>,
    pub interactive: Value,
}

impl DraftStep {
    fn to_input(&self) -> StepInput {
        StepInput {
            title: self.title.clone(),
            description: self.description.clone(),
            media_url: self.media_url.clone(),
            order: self.order,
            tags: self.tags.clone(),
            duration: self.duration,
            interactive: self.interactive.clone(),
        }
    }
}

/// Progress of the most recent save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Failed(String),
}

/// The request a save will issue.
#[derive(Debug, Clone)]
pub enum SaveRequest {
    Create(CreateTourRequest),
    Update(DbId, UpdateTourRequest),
}

/// In-memory tour draft.
#[derive(Debug, Clone)]
pub struct TourEditor {
    owner_id: DbId,
    tour_id: Option<DbId>,
    title: String,
    is_public: bool,
    steps: Vec<DraftStep>,
    active_step: Option<StepKey>,
    next_key: u64,
    save_state: SaveState,
}

impl TourEditor {
    /// Empty draft for a new tour owned by `owner_id`.
    pub fn new(owner_id: DbId) -> Self {
        Self {
            owner_id,
            tour_id: None,
            title: DEFAULT_TITLE.to_string(),
            is_public: false,
            steps: Vec::new(),
            active_step: None,
            next_key: 0,
            save_state: SaveState::Idle,
        }
    }

    /// Draft loaded from a stored tour; saving it issues an update.
    pub fn from_tour(tour: &Tour) -> Self {
        let mut editor = Self::new(tour.user_id);
        editor.tour_id = Some(tour.id);
        editor.title = tour.title.clone();
        editor.is_public = tour.is_public;
        for step in &tour.steps {
            let key = editor.fresh_key();
            editor.steps.push(DraftStep {
                key,
                title: step.title.clone(),
                description: step.description.clone(),
                media_url: step.media_url.clone(),
                order: step.order,
                tags: step.tags.clone(),
                duration: step.duration,
                interactive: step.interactive.clone(),
            });
        }
        editor
    }

    fn fresh_key(&mut self) -> StepKey {
        let key = StepKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Any edit after a finished save makes the draft unsaved again.
    fn touch(&mut self) {
        if matches!(self.save_state, SaveState::Saved | SaveState::Failed(_)) {
            self.save_state = SaveState::Idle;
        }
    }

    // ---- accessors ----

    pub fn tour_id(&self) -> Option<DbId> {
        self.tour_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn steps(&self) -> &[DraftStep] {
        &self.steps
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    /// The selected step, if any.
    pub fn active_step(&self) -> Option<&DraftStep> {
        let key = self.active_step?;
        self.steps.iter().find(|s| s.key == key)
    }

    // ---- edits ----

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.touch();
    }

    /// Append `"Step N"` with order `N`, where `N` is the new step count,
    /// and select it.
    pub fn add_step(&mut self) -> StepKey {
        let n = self.steps.len() + 1;
        let key = self.fresh_key();
        self.steps.push(DraftStep {
            key,
            title: format!("Step {n}"),
            description: String::new(),
            media_url: None,
            order: i32::try_from(n).unwrap_or(i32::MAX),
            tags: Vec::new(),
            duration: None,
            interactive: Value::Object(Default::default()),
        });
        self.active_step = Some(key);
        self.touch();
        key
    }

    /// Edit one step in place. Returns `false` if `key` is unknown.
    pub fn update_step(&mut self, key: StepKey, edit: impl FnOnce(&mut DraftStep)) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.key == key) else {
            return false;
        };
        edit(step);
        self.touch();
        true
    }

    /// Remove a step, clearing the selection if it was selected. Returns
    /// `false` if `key` is unknown.
    pub fn delete_step(&mut self, key: StepKey) -> bool {
        let before = self.steps.len();
        self.steps.retain(|s| s.key != key);
        if self.steps.len() == before {
            return false;
        }
        if self.active_step == Some(key) {
            self.active_step = None;
        }
        self.touch();
        true
    }

    /// Select a step. Returns `false` if `key` is unknown.
    pub fn select_step(&mut self, key: StepKey) -> bool {
        if self.steps.iter().any(|s| s.key == key) {
            self.active_step = Some(key);
            true
        } else {
            false
        }
    }

    // ---- saving ----

    /// Enter `Saving` and build the request. Returns `None` if a save is
    /// already in flight.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if self.save_state == SaveState::Saving {
            return None;
        }
        self.save_state = SaveState::Saving;

        let steps: Vec<StepInput> = self.steps.iter().map(DraftStep::to_input).collect();
        Some(match self.tour_id {
            None => SaveRequest::Create(CreateTourRequest {
                title: self.title.clone(),
                is_public: self.is_public,
                user_id: self.owner_id,
                steps,
            }),
            Some(id) => SaveRequest::Update(
                id,
                UpdateTourRequest {
                    title: Some(self.title.clone()),
                    is_public: Some(self.is_public),
                    steps,
                },
            ),
        })
    }

    /// Record the outcome of a save. The draft is kept either way.
    pub fn finish_save(&mut self, result: &Result<Tour, ClientError>) {
        match result {
            Ok(tour) => {
                self.tour_id = Some(tour.id);
                self.save_state = SaveState::Saved;
            }
            Err(e) => {
                self.save_state = SaveState::Failed(e.user_message());
            }
        }
    }

    /// Create or update the tour on the server.
    pub async fn save(&mut self, api: &ApiClient) -> Result<Tour, ClientError> {
        let Some(request) = self.begin_save() else {
            return Err(ClientError::SaveInProgress);
        };

        let result = match &request {
            SaveRequest::Create(input) => api.create_tour(input).await,
            SaveRequest::Update(id, input) => api.update_tour(*id, input).await,
        };

        self.finish_save(&result);
        match &result {
            Ok(tour) => tracing::debug!(tour_id = tour.id, "Tour saved"),
            Err(e) => tracing::debug!(error = %e, "Tour save failed"),
        }
        result
    }
}
