//! Dashboard state: the signed-in user's tours.
//!
//! ```text
//! Idle --load--> Loading --ok--> Ready
//!                        --err-> Failed(message)
//! ```
//!
//! Tour details are fetched lazily when a tour is opened. A tour leaves the
//! list only after the server confirms its deletion.

use marvedge_core::types::DbId;

use crate::api::ApiClient;
use crate::editor::TourEditor;
use crate::error::ClientError;
use crate::models::{Tour, User};

/// Progress of the initial load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Dashboard view model.
#[derive(Debug, Clone)]
pub struct Dashboard {
    phase: LoadPhase,
    user: Option<User>,
    tours: Vec<Tour>,
    viewing: Option<Tour>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
            user: None,
            tours: Vec::new(),
            viewing: None,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// The tour currently opened for viewing.
    pub fn viewing(&self) -> Option<&Tour> {
        self.viewing.as_ref()
    }

    fn user_id(&self) -> Result<DbId, ClientError> {
        self.user.as_ref().map(|u| u.id).ok_or(ClientError::NotSignedIn)
    }

    // ---- loading ----

    /// Resolve the current user, then list their tours.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.phase = LoadPhase::Loading;

        let result = async {
            let current = api.current_user().await?;
            let tours = api.list_user_tours(current.user.id).await?;
            Ok::<_, ClientError>((current.user, tours))
        }
        .await;

        match result {
            Ok((user, tours)) => {
                self.loaded(user, tours);
                Ok(())
            }
            Err(e) => {
                self.load_failed(&e);
                Err(e)
            }
        }
    }

    /// Enter `Ready` with the given user and tours.
    pub fn loaded(&mut self, user: User, tours: Vec<Tour>) {
        self.user = Some(user);
        self.tours = tours;
        self.phase = LoadPhase::Ready;
    }

    /// Enter `Failed`; previously loaded data is kept.
    pub fn load_failed(&mut self, error: &ClientError) {
        tracing::debug!(error = %error, "Dashboard load failed");
        self.phase = LoadPhase::Failed(error.user_message());
    }

    // ---- opening tours ----

    /// Fetch a tour's details and open it for viewing.
    pub async fn open_view(&mut self, api: &ApiClient, tour_id: DbId) -> Result<&Tour, ClientError> {
        let tour = api.get_tour(self.user_id()?, tour_id).await?;
        Ok(self.viewing.insert(tour))
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    /// Fetch a tour's details and return an editor loaded with it.
    pub async fn open_edit(&self, api: &ApiClient, tour_id: DbId) -> Result<TourEditor, ClientError> {
        let tour = api.get_tour(self.user_id()?, tour_id).await?;
        Ok(TourEditor::from_tour(&tour))
    }

    // ---- mutations ----

    /// Replace a tour in place after a successful update. Unknown tours are
    /// prepended, matching the newest-first order.
    pub fn apply_update(&mut self, tour: Tour) {
        if self.viewing.as_ref().is_some_and(|v| v.id == tour.id) {
            self.viewing = Some(tour.clone());
        }
        match self.tours.iter_mut().find(|t| t.id == tour.id) {
            Some(slot) => *slot = tour,
            None => self.tours.insert(0, tour),
        }
    }

    /// Drop a tour from the list. Returns `false` if it was not listed.
    pub fn remove(&mut self, tour_id: DbId) -> bool {
        let before = self.tours.len();
        self.tours.retain(|t| t.id != tour_id);
        if self.viewing.as_ref().is_some_and(|v| v.id == tour_id) {
            self.viewing = None;
        }
        self.tours.len() != before
    }

    /// Delete a tour on the server, then remove it locally. On failure the
    /// list is unchanged.
    pub async fn delete(&mut self, api: &ApiClient, tour_id: DbId) -> Result<(), ClientError> {
        api.delete_tour(tour_id).await?;
        self.remove(tour_id);
        tracing::debug!(tour_id, "Tour removed from dashboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": 1, "email": "a@example.com", "createdAt": "2026-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    fn tour(id: DbId, title: &str) -> Tour {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "isPublic": false,
            "userId": 1,
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z",
            "steps": []
        }))
        .unwrap()
    }

    #[test]
    fn starts_idle_and_empty() {
        let dashboard = Dashboard::new();
        assert_eq!(dashboard.phase(), &LoadPhase::Idle);
        assert!(dashboard.tours().is_empty());
        assert!(dashboard.user().is_none());
    }

    #[test]
    fn loaded_enters_ready() {
        let mut dashboard = Dashboard::new();
        dashboard.loaded(user(), vec![tour(2, "b"), tour(1, "a")]);

        assert_eq!(dashboard.phase(), &LoadPhase::Ready);
        assert_eq!(dashboard.user().map(|u| u.id), Some(1));
        assert_eq!(dashboard.tours().len(), 2);
    }

    #[test]
    fn load_failure_keeps_message() {
        let mut dashboard = Dashboard::new();
        dashboard.load_failed(&ClientError::Api {
            status: 401,
            message: "Unauthorized".into(),
        });
        assert_eq!(dashboard.phase(), &LoadPhase::Failed("Unauthorized".into()));
    }

    #[test]
    fn apply_update_replaces_in_place() {
        let mut dashboard = Dashboard::new();
        dashboard.loaded(user(), vec![tour(3, "c"), tour(2, "b"), tour(1, "a")]);

        dashboard.apply_update(tour(2, "b-renamed"));

        let titles: Vec<&str> = dashboard.tours().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b-renamed", "a"]);
    }

    #[test]
    fn apply_update_of_unknown_tour_prepends() {
        let mut dashboard = Dashboard::new();
        dashboard.loaded(user(), vec![tour(1, "a")]);

        dashboard.apply_update(tour(9, "new"));
        assert_eq!(dashboard.tours()[0].id, 9);
    }

    #[test]
    fn remove_drops_tour_and_closes_view() {
        let mut dashboard = Dashboard::new();
        dashboard.loaded(user(), vec![tour(2, "b"), tour(1, "a")]);
        dashboard.viewing = Some(tour(2, "b"));

        assert!(dashboard.remove(2));
        assert_eq!(dashboard.tours().len(), 1);
        assert!(dashboard.viewing().is_none());
        assert!(!dashboard.remove(2));
    }

    #[test]
    fn close_view_keeps_the_list() {
        let mut dashboard = Dashboard::new();
        dashboard.loaded(user(), vec![tour(1, "a")]);
        dashboard.viewing = Some(tour(1, "a"));

        dashboard.close_view();
        assert!(dashboard.viewing().is_none());
        assert_eq!(dashboard.tours().len(), 1);
    }

    #[test]
    fn user_id_requires_load() {
        let dashboard = Dashboard::new();
        assert!(matches!(dashboard.user_id(), Err(ClientError::NotSignedIn)));
    }
}
