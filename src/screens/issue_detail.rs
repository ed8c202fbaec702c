//! Issue detail screen: one issue, its comments, and the user directory
//! for assignee/author selection.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{BacklogError, Result};
use crate::types::{Comment, Issue, NewComment, User};
use crate::workflows::IssueForm;

use super::{Generation, LoadState};

/// The resources this screen needs, loaded together.
#[derive(Debug, Clone)]
pub struct IssueDetail {
    pub issue: Issue,
    pub comments: Vec<Comment>,
    pub users: Vec<User>,
}

#[derive(Debug)]
pub struct IssueDetailScreen {
    pub project_id: u64,
    pub issue_id: u64,
    pub state: LoadState<IssueDetail>,
    /// Edit draft. The displayed issue is never overwritten by an
    /// abandoned draft; only a successful save replaces it.
    pub draft: Option<IssueForm>,
    pub saving: bool,
    generation: Generation,
}

impl IssueDetailScreen {
    pub fn new(project_id: u64, issue_id: u64) -> Self {
        Self {
            project_id,
            issue_id,
            state: LoadState::Loading,
            draft: None,
            saving: false,
            generation: Generation::default(),
        }
    }

    pub fn begin_load(&mut self) -> Generation {
        self.state = LoadState::Loading;
        self.draft = None;
        self.saving = false;
        self.generation.next()
    }

    pub fn finish_load(&mut self, token: Generation, result: Result<IssueDetail>) {
        if !self.generation.is_current(token) {
            debug!(issue_id = self.issue_id, "discarding stale issue detail load");
            return;
        }
        self.state = match result {
            Ok(detail) => LoadState::Ready(detail),
            Err(err) => LoadState::Failed(err.into()),
        };
    }

    /// Load the issue, its comments, and the user directory concurrently;
    /// any failure fails the combined load.
    pub async fn load(&mut self, api: &ApiClient) {
        let token = self.begin_load();
        let result = Self::fetch(api, self.project_id, self.issue_id).await;
        self.finish_load(token, result);
    }

    async fn fetch(api: &ApiClient, project_id: u64, issue_id: u64) -> Result<IssueDetail> {
        let (issue, comments, users) = tokio::try_join!(
            api.get_issue(project_id, issue_id),
            api.list_comments(project_id, issue_id),
            api.list_users(),
        )?;
        Ok(IssueDetail {
            issue,
            comments,
            users,
        })
    }

    /// Start editing, seeding the draft from the loaded issue.
    pub fn begin_edit(&mut self) -> Result<&mut IssueForm> {
        let detail = self
            .state
            .ready()
            .ok_or_else(|| BacklogError::Other("issue is not loaded".to_string()))?;
        let form = IssueForm::from_issue(&detail.issue);
        Ok(self.draft.insert(form))
    }

    /// Abandon the draft; the loaded snapshot stays untouched.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Submit the draft: send only the edited field set, then replace the
    /// local issue with the server's response. A failed save keeps the
    /// draft and the prior state intact.
    pub async fn save(&mut self, api: &ApiClient) -> Result<Issue> {
        let detail = self
            .state
            .ready()
            .ok_or_else(|| BacklogError::Other("issue is not loaded".to_string()))?;
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| BacklogError::Other("no edit in progress".to_string()))?;

        let patch = draft.diff(&detail.issue);
        if patch.is_empty() {
            let unchanged = detail.issue.clone();
            self.draft = None;
            return Ok(unchanged);
        }

        self.saving = true;
        let result = api.update_issue(self.project_id, self.issue_id, &patch).await;
        self.saving = false;

        match result {
            Ok(updated) => {
                self.apply_issue_updated(updated.clone());
                self.draft = None;
                Ok(updated)
            }
            Err(err) => {
                warn!(issue_id = self.issue_id, error = %err, "issue save failed");
                Err(err)
            }
        }
    }

    /// Delete the loaded issue. The caller navigates away afterwards; the
    /// confirmation dialog must already have been accepted.
    pub async fn delete(&mut self, api: &ApiClient) -> Result<()> {
        api.delete_issue(self.project_id, self.issue_id).await
    }

    /// Create a comment and append the server's entity.
    pub async fn add_comment(&mut self, api: &ApiClient, data: &NewComment) -> Result<Comment> {
        let created = api
            .create_comment(self.project_id, self.issue_id, data)
            .await
            .inspect_err(|err| {
                warn!(issue_id = self.issue_id, error = %err, "comment create failed");
            })?;
        self.apply_comment_created(created.clone());
        Ok(created)
    }

    /// Delete a comment and drop it from the local copy. Failures surface
    /// through the same classified path as other mutations.
    pub async fn delete_comment(&mut self, api: &ApiClient, comment_id: u64) -> Result<()> {
        api.delete_comment(comment_id).await.inspect_err(|err| {
            warn!(comment_id, error = %err, "comment delete failed");
        })?;
        self.apply_comment_deleted(comment_id);
        Ok(())
    }

    pub fn apply_issue_updated(&mut self, issue: Issue) {
        if let Some(detail) = self.state.ready_mut()
            && detail.issue.id == issue.id
        {
            detail.issue = issue;
        }
    }

    pub fn apply_comment_created(&mut self, comment: Comment) {
        if let Some(detail) = self.state.ready_mut() {
            detail.comments.push(comment);
        }
    }

    pub fn apply_comment_deleted(&mut self, comment_id: u64) {
        if let Some(detail) = self.state.ready_mut() {
            detail.comments.retain(|c| c.id != comment_id);
        }
    }

    /// Look up a user from the loaded directory.
    pub fn user(&self, id: u64) -> Option<&User> {
        self.state
            .ready()
            .and_then(|d| d.users.iter().find(|u| u.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueStatus;

    fn detail() -> IssueDetail {
        IssueDetail {
            issue: Issue {
                id: 9,
                project_id: 7,
                title: "Original".to_string(),
                description: "desc".to_string(),
                status: IssueStatus::Active,
                assigned_to_id: None,
                reporter_id: 1,
                created_at: "2024-01-01T00:00:00Z".to_string(),
                updated_at: "2024-01-01T00:00:00Z".to_string(),
                assigned_to: None,
                reporter: None,
                project: None,
            },
            comments: vec![comment(1, "first")],
            users: vec![
                User {
                    id: 1,
                    name: "Ana".to_string(),
                    email: "ana@example.com".to_string(),
                },
                User {
                    id: 5,
                    name: "Dana".to_string(),
                    email: "dana@example.com".to_string(),
                },
            ],
        }
    }

    fn comment(id: u64, content: &str) -> Comment {
        Comment {
            id,
            issue_id: 9,
            user_id: 1,
            content: content.to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            user: None,
        }
    }

    fn ready_screen() -> IssueDetailScreen {
        let mut screen = IssueDetailScreen::new(7, 9);
        let token = screen.begin_load();
        screen.finish_load(token, Ok(detail()));
        screen
    }

    #[test]
    fn test_cancel_edit_restores_nothing_over_snapshot() {
        let mut screen = ready_screen();
        {
            let draft = screen.begin_edit().unwrap();
            draft.title = "Mangled".to_string();
            draft.status = IssueStatus::Closed;
        }
        screen.cancel_edit();

        let issue = &screen.state.ready().unwrap().issue;
        assert_eq!(issue.title, "Original");
        assert_eq!(issue.status, IssueStatus::Active);
        assert!(screen.draft.is_none());
    }

    #[test]
    fn test_comment_reconciliation() {
        let mut screen = ready_screen();
        screen.apply_comment_created(comment(2, "second"));
        assert_eq!(screen.state.ready().unwrap().comments.len(), 2);

        screen.apply_comment_deleted(1);
        let comments = &screen.state.ready().unwrap().comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, 2);
    }

    #[test]
    fn test_issue_update_replaces_loaded_entity() {
        let mut screen = ready_screen();
        let mut updated = detail().issue;
        updated.title = "Renamed by server".to_string();
        updated.updated_at = "2024-04-01T00:00:00Z".to_string();
        screen.apply_issue_updated(updated.clone());

        assert_eq!(screen.state.ready().unwrap().issue, updated);
    }

    #[test]
    fn test_user_lookup_from_directory() {
        let screen = ready_screen();
        assert_eq!(screen.user(5).unwrap().name, "Dana");
        assert!(screen.user(99).is_none());
    }

    #[test]
    fn test_begin_edit_requires_ready_state() {
        let mut screen = IssueDetailScreen::new(7, 9);
        assert!(screen.begin_edit().is_err());
    }

    #[test]
    fn test_reactivation_clears_draft() {
        let mut screen = ready_screen();
        screen.begin_edit().unwrap();
        assert!(screen.draft.is_some());

        let token = screen.begin_load();
        assert!(screen.draft.is_none());
        screen.finish_load(token, Ok(detail()));
    }
}
