//! Project list screen.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::filter::filter_projects;
use crate::types::{NewProject, Project, ProjectPatch};

use super::{Generation, LoadState};

/// Holds the loaded project collection and the screen's search state.
#[derive(Debug, Default)]
pub struct ProjectListScreen {
    pub state: LoadState<Vec<Project>>,
    pub search_text: String,
    generation: Generation,
}

impl ProjectListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Loading` and return the token that must accompany the
    /// eventual result.
    pub fn begin_load(&mut self) -> Generation {
        self.state = LoadState::Loading;
        self.generation.next()
    }

    /// Apply a finished load, unless a newer activation superseded it.
    pub fn finish_load(&mut self, token: Generation, result: Result<Vec<Project>>) {
        if !self.generation.is_current(token) {
            debug!("discarding stale project list load");
            return;
        }
        self.state = match result {
            Ok(projects) => LoadState::Ready(projects),
            Err(err) => LoadState::Failed(err.into()),
        };
    }

    /// Load (or retry) the project collection.
    pub async fn load(&mut self, api: &ApiClient) {
        let token = self.begin_load();
        let result = api.list_projects().await;
        self.finish_load(token, result);
    }

    /// The visible subset under the current search text, order-preserving.
    pub fn visible_projects(&self) -> Vec<&Project> {
        match self.state.ready() {
            Some(projects) => filter_projects(projects, &self.search_text),
            None => Vec::new(),
        }
    }

    /// Create a project and append the server's entity to the local copy.
    pub async fn create_project(&mut self, api: &ApiClient, data: &NewProject) -> Result<Project> {
        let created = api.create_project(data).await?;
        self.apply_created(created.clone());
        Ok(created)
    }

    /// Update a project and replace the matching element with the
    /// server's entity.
    pub async fn update_project(
        &mut self,
        api: &ApiClient,
        id: u64,
        patch: &ProjectPatch,
    ) -> Result<Project> {
        let updated = api.update_project(id, patch).await?;
        self.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Delete a project and remove the matching element. The caller must
    /// have taken the delete through a confirmation dialog first.
    pub async fn delete_project(&mut self, api: &ApiClient, id: u64) -> Result<()> {
        api.delete_project(id).await?;
        self.apply_deleted(id);
        Ok(())
    }

    pub fn apply_created(&mut self, project: Project) {
        if let Some(projects) = self.state.ready_mut() {
            projects.push(project);
        }
    }

    pub fn apply_updated(&mut self, project: Project) {
        if let Some(projects) = self.state.ready_mut()
            && let Some(existing) = projects.iter_mut().find(|p| p.id == project.id)
        {
            *existing = project;
        }
    }

    pub fn apply_deleted(&mut self, id: u64) {
        if let Some(projects) = self.state.ready_mut() {
            projects.retain(|p| p.id != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BacklogError;
    use crate::screens::FailureKind;
    use crate::types::ProjectStatus;

    fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: String::new(),
            status: ProjectStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            issues_count: None,
        }
    }

    fn ready_screen(projects: Vec<Project>) -> ProjectListScreen {
        let mut screen = ProjectListScreen::new();
        let token = screen.begin_load();
        screen.finish_load(token, Ok(projects));
        screen
    }

    #[test]
    fn test_create_appends_server_entity() {
        let mut screen = ready_screen(vec![project(1, "Alpha")]);
        screen.apply_created(project(42, "Beta"));

        let ids: Vec<u64> = screen.state.ready().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 42]);
    }

    #[test]
    fn test_update_replaces_only_matching_element() {
        let mut screen = ready_screen(vec![project(1, "Alpha"), project(2, "Beta")]);
        let mut renamed = project(2, "Beta v2");
        renamed.updated_at = "2024-02-01T00:00:00Z".to_string();
        screen.apply_updated(renamed.clone());

        let projects = screen.state.ready().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Alpha");
        assert_eq!(projects[1], renamed);
    }

    #[test]
    fn test_delete_removes_only_matching_element() {
        let mut screen = ready_screen(vec![project(1, "Alpha"), project(2, "Beta"), project(3, "Gamma")]);
        screen.apply_deleted(2);

        let ids: Vec<u64> = screen.state.ready().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_failed_load_is_classified() {
        let mut screen = ProjectListScreen::new();
        let token = screen.begin_load();
        screen.finish_load(token, Err(BacklogError::Server(502)));

        let failure = screen.state.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Server);
    }

    #[test]
    fn test_stale_load_result_is_discarded() {
        let mut screen = ProjectListScreen::new();
        let first = screen.begin_load();
        let second = screen.begin_load();

        // A late response from the first activation must not clobber the
        // in-flight second one.
        screen.finish_load(first, Ok(vec![project(1, "Stale")]));
        assert!(screen.state.is_loading());

        screen.finish_load(second, Ok(vec![project(2, "Fresh")]));
        assert_eq!(screen.state.ready().unwrap()[0].name, "Fresh");
    }

    #[test]
    fn test_retry_after_failure_reenters_loading() {
        let mut screen = ProjectListScreen::new();
        let token = screen.begin_load();
        screen.finish_load(token, Err(BacklogError::Network("refused".to_string())));
        assert!(screen.state.failure().is_some());

        let retry = screen.begin_load();
        assert!(screen.state.is_loading());
        screen.finish_load(retry, Ok(vec![project(1, "Alpha")]));
        assert!(screen.state.ready().is_some());
    }

    #[test]
    fn test_search_filters_visible_projects() {
        let mut screen = ready_screen(vec![project(1, "Website"), project(2, "Mobile app")]);
        screen.search_text = "web".to_string();
        let visible = screen.visible_projects();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }
}
