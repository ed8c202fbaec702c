//! Project detail screen: one project plus its issue collection.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::filter::{IssueCriteria, filter_issues};
use crate::types::{Issue, IssuePatch, NewIssue, Project};

use super::{Generation, LoadState};

/// The two resources this screen needs, loaded together.
#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: Project,
    pub issues: Vec<Issue>,
}

#[derive(Debug)]
pub struct ProjectDetailScreen {
    pub project_id: u64,
    pub state: LoadState<ProjectDetail>,
    pub criteria: IssueCriteria,
    generation: Generation,
}

impl ProjectDetailScreen {
    /// Filter state starts clean on every navigation to a project.
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            state: LoadState::Loading,
            criteria: IssueCriteria::default(),
            generation: Generation::default(),
        }
    }

    pub fn begin_load(&mut self) -> Generation {
        self.state = LoadState::Loading;
        self.generation.next()
    }

    pub fn finish_load(&mut self, token: Generation, result: Result<ProjectDetail>) {
        if !self.generation.is_current(token) {
            debug!(project_id = self.project_id, "discarding stale project detail load");
            return;
        }
        self.state = match result {
            Ok(detail) => LoadState::Ready(detail),
            Err(err) => LoadState::Failed(err.into()),
        };
    }

    /// Load the project and its issues concurrently; either failure fails
    /// the combined load.
    pub async fn load(&mut self, api: &ApiClient) {
        let token = self.begin_load();
        let result = Self::fetch(api, self.project_id).await;
        self.finish_load(token, result);
    }

    async fn fetch(api: &ApiClient, project_id: u64) -> Result<ProjectDetail> {
        let (project, issues) =
            tokio::try_join!(api.get_project(project_id), api.list_issues(project_id))?;
        Ok(ProjectDetail { project, issues })
    }

    /// The visible issue subset under the current criteria.
    pub fn visible_issues(&self) -> Vec<&Issue> {
        match self.state.ready() {
            Some(detail) => filter_issues(&detail.issues, &self.criteria),
            None => Vec::new(),
        }
    }

    /// Total loaded issues, for "showing X of N" style messaging.
    pub fn issue_count(&self) -> usize {
        self.state.ready().map(|d| d.issues.len()).unwrap_or(0)
    }

    pub async fn create_issue(&mut self, api: &ApiClient, data: &NewIssue) -> Result<Issue> {
        let created = api.create_issue(self.project_id, data).await?;
        self.apply_issue_created(created.clone());
        Ok(created)
    }

    pub async fn update_issue(
        &mut self,
        api: &ApiClient,
        id: u64,
        patch: &IssuePatch,
    ) -> Result<Issue> {
        let updated = api.update_issue(self.project_id, id, patch).await?;
        self.apply_issue_updated(updated.clone());
        Ok(updated)
    }

    /// Delete an issue after confirmation and drop it from the local copy.
    pub async fn delete_issue(&mut self, api: &ApiClient, id: u64) -> Result<()> {
        api.delete_issue(self.project_id, id).await?;
        self.apply_issue_deleted(id);
        Ok(())
    }

    pub fn apply_issue_created(&mut self, issue: Issue) {
        if let Some(detail) = self.state.ready_mut() {
            detail.issues.push(issue);
        }
    }

    pub fn apply_issue_updated(&mut self, issue: Issue) {
        if let Some(detail) = self.state.ready_mut()
            && let Some(existing) = detail.issues.iter_mut().find(|i| i.id == issue.id)
        {
            *existing = issue;
        }
    }

    pub fn apply_issue_deleted(&mut self, id: u64) {
        if let Some(detail) = self.state.ready_mut() {
            detail.issues.retain(|i| i.id != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BacklogError;
    use crate::filter::StatusFilter;
    use crate::screens::FailureKind;
    use crate::types::{IssueStatus, ProjectStatus};

    fn project(id: u64) -> Project {
        Project {
            id,
            name: format!("Project {}", id),
            description: String::new(),
            status: ProjectStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            issues_count: None,
        }
    }

    fn issue(id: u64, status: IssueStatus, assignee: Option<u64>) -> Issue {
        Issue {
            id,
            project_id: 7,
            title: format!("Issue {}", id),
            description: String::new(),
            status,
            assigned_to_id: assignee,
            reporter_id: 1,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            assigned_to: None,
            reporter: None,
            project: None,
        }
    }

    fn ready_screen(issues: Vec<Issue>) -> ProjectDetailScreen {
        let mut screen = ProjectDetailScreen::new(7);
        let token = screen.begin_load();
        screen.finish_load(
            token,
            Ok(ProjectDetail {
                project: project(7),
                issues,
            }),
        );
        screen
    }

    #[test]
    fn test_create_appends_server_issue_at_end() {
        let mut screen = ready_screen(vec![issue(1, IssueStatus::Active, None)]);
        let mut created = issue(42, IssueStatus::Active, None);
        created.title = "Bug".to_string();
        screen.apply_issue_created(created.clone());

        let issues = &screen.state.ready().unwrap().issues;
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1], created);
    }

    #[test]
    fn test_update_replaces_exactly_one_element() {
        let mut screen = ready_screen(vec![
            issue(1, IssueStatus::Active, None),
            issue(2, IssueStatus::Active, Some(5)),
        ]);
        let mut updated = issue(2, IssueStatus::Resolved, Some(5));
        updated.updated_at = "2024-03-01T00:00:00Z".to_string();
        screen.apply_issue_updated(updated.clone());

        let issues = &screen.state.ready().unwrap().issues;
        assert_eq!(issues[0], issue(1, IssueStatus::Active, None));
        assert_eq!(issues[1], updated);
        assert_eq!(issues.iter().filter(|i| i.id == 2).count(), 1);
    }

    #[test]
    fn test_delete_preserves_order_of_remaining() {
        let mut screen = ready_screen(vec![
            issue(1, IssueStatus::Active, None),
            issue(2, IssueStatus::Closed, Some(5)),
            issue(3, IssueStatus::OnHold, None),
        ]);
        screen.apply_issue_deleted(2);

        let ids: Vec<u64> = screen.state.ready().unwrap().issues.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    // Project 7 loads an active unassigned issue and a closed assigned
    // one; the active-status criteria shows only the first.
    #[test]
    fn test_status_criteria_narrows_visible_issues() {
        let mut screen = ready_screen(vec![
            issue(1, IssueStatus::Active, None),
            issue(2, IssueStatus::Closed, Some(5)),
        ]);
        screen.criteria.status = StatusFilter::Is(IssueStatus::Active);

        let visible = screen.visible_issues();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
        assert_eq!(screen.issue_count(), 2);
    }

    #[test]
    fn test_not_found_load_is_classified() {
        let mut screen = ProjectDetailScreen::new(404);
        let token = screen.begin_load();
        screen.finish_load(token, Err(BacklogError::NotFound("project".to_string())));

        let failure = screen.state.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert!(failure.message.contains("Project not found"));
    }

    #[test]
    fn test_stale_detail_load_is_discarded() {
        let mut screen = ProjectDetailScreen::new(7);
        let first = screen.begin_load();
        let second = screen.begin_load();

        screen.finish_load(first, Err(BacklogError::Server(500)));
        assert!(screen.state.is_loading());

        screen.finish_load(
            second,
            Ok(ProjectDetail {
                project: project(7),
                issues: vec![],
            }),
        );
        assert!(screen.state.ready().is_some());
    }

    #[test]
    fn test_mutations_ignored_outside_ready() {
        let mut screen = ProjectDetailScreen::new(7);
        screen.apply_issue_created(issue(1, IssueStatus::Active, None));
        assert!(screen.state.is_loading());
    }
}
