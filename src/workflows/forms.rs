//! Form state for the create and edit workflows.
//!
//! A form is a transient draft: it never becomes part of a screen's
//! collection. Create forms build a full payload once the required fields
//! are present; edit forms diff against the loaded snapshot and send only
//! the edited field set.

use crate::types::{
    Issue, IssuePatch, IssueStatus, NewComment, NewIssue, NewProject, Project, ProjectPatch,
    ProjectStatus,
};

/// Draft for creating or editing a project. Name is required.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn to_new_project(&self) -> Option<NewProject> {
        if !self.can_submit() {
            return None;
        }
        Some(NewProject {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
        })
    }

    /// Build a partial update containing only the fields that differ from
    /// the snapshot.
    pub fn diff(&self, snapshot: &Project) -> ProjectPatch {
        ProjectPatch {
            name: (self.name != snapshot.name).then(|| self.name.clone()),
            description: (self.description != snapshot.description)
                .then(|| self.description.clone()),
            status: (self.status != snapshot.status).then_some(self.status),
        }
    }
}

/// Draft for creating or editing an issue. Title and reporter are
/// required; the assignee is optional.
#[derive(Debug, Clone, Default)]
pub struct IssueForm {
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub assigned_to_id: Option<u64>,
    pub reporter_id: Option<u64>,
}

impl IssueForm {
    /// Blank create form. The reporter comes from configuration or an
    /// explicit flag, never a hidden constant.
    pub fn new(reporter_id: Option<u64>) -> Self {
        Self {
            reporter_id,
            ..Default::default()
        }
    }

    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            status: issue.status,
            assigned_to_id: issue.assigned_to_id,
            reporter_id: Some(issue.reporter_id),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && self.reporter_id.is_some()
    }

    pub fn to_new_issue(&self) -> Option<NewIssue> {
        if !self.can_submit() {
            return None;
        }
        Some(NewIssue {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
            assigned_to_id: self.assigned_to_id,
            reporter_id: self.reporter_id?,
        })
    }

    /// Build a partial update containing only the fields that differ from
    /// the snapshot. Clearing the assignee serializes as an explicit null.
    pub fn diff(&self, snapshot: &Issue) -> IssuePatch {
        IssuePatch {
            title: (self.title != snapshot.title).then(|| self.title.clone()),
            description: (self.description != snapshot.description)
                .then(|| self.description.clone()),
            status: (self.status != snapshot.status).then_some(self.status),
            assigned_to_id: (self.assigned_to_id != snapshot.assigned_to_id)
                .then_some(self.assigned_to_id),
            reporter_id: self
                .reporter_id
                .filter(|&id| id != snapshot.reporter_id),
        }
    }
}

/// Draft for a new comment. Blank or whitespace-only content cannot be
/// submitted.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub content: String,
    pub user_id: Option<u64>,
}

impl CommentForm {
    pub fn new(user_id: Option<u64>) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty() && self.user_id.is_some()
    }

    pub fn to_new_comment(&self) -> Option<NewComment> {
        if !self.can_submit() {
            return None;
        }
        Some(NewComment {
            content: self.content.trim().to_string(),
            user_id: self.user_id?,
        })
    }

    /// Reset the draft after a successful submit, keeping the selected
    /// author for the next comment.
    pub fn clear_content(&mut self) {
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_issue() -> Issue {
        Issue {
            id: 9,
            project_id: 7,
            title: "Original title".to_string(),
            description: "Original description".to_string(),
            status: IssueStatus::Active,
            assigned_to_id: Some(5),
            reporter_id: 1,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            assigned_to: None,
            reporter: None,
            project: None,
        }
    }

    #[test]
    fn test_issue_form_requires_title_and_reporter() {
        let mut form = IssueForm::new(None);
        assert!(!form.can_submit());
        assert!(form.to_new_issue().is_none());

        form.title = "  ".to_string();
        form.reporter_id = Some(1);
        assert!(!form.can_submit());

        form.title = "Bug".to_string();
        assert!(form.can_submit());
        let payload = form.to_new_issue().unwrap();
        assert_eq!(payload.title, "Bug");
        assert_eq!(payload.reporter_id, 1);
        assert_eq!(payload.assigned_to_id, None);
    }

    #[test]
    fn test_issue_form_diff_sends_only_edited_fields() {
        let snapshot = snapshot_issue();
        let mut form = IssueForm::from_issue(&snapshot);

        let untouched = form.diff(&snapshot);
        assert!(untouched.is_empty());

        form.status = IssueStatus::Resolved;
        form.title = "New title".to_string();
        let patch = form.diff(&snapshot);
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(patch.status, Some(IssueStatus::Resolved));
        assert!(patch.description.is_none());
        assert!(patch.assigned_to_id.is_none());
        assert!(patch.reporter_id.is_none());
    }

    #[test]
    fn test_issue_form_diff_clears_assignee_explicitly() {
        let snapshot = snapshot_issue();
        let mut form = IssueForm::from_issue(&snapshot);
        form.assigned_to_id = None;

        let patch = form.diff(&snapshot);
        assert_eq!(patch.assigned_to_id, Some(None));
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({"assigned_to_id": null}));
    }

    #[test]
    fn test_project_form_diff_sends_only_edited_fields() {
        let snapshot = Project {
            id: 7,
            name: "Website".to_string(),
            description: "Marketing site".to_string(),
            status: ProjectStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            issues_count: None,
        };
        let mut form = ProjectForm::from_project(&snapshot);
        assert!(form.diff(&snapshot).is_empty());

        form.status = ProjectStatus::Completed;
        let patch = form.diff(&snapshot);
        assert_eq!(patch.status, Some(ProjectStatus::Completed));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_project_form_requires_name() {
        let mut form = ProjectForm::default();
        assert!(form.to_new_project().is_none());

        form.name = "Roadmap".to_string();
        let payload = form.to_new_project().unwrap();
        assert_eq!(payload.name, "Roadmap");
        assert_eq!(payload.status, ProjectStatus::Active);
    }

    #[test]
    fn test_comment_form_rejects_whitespace_content() {
        let mut form = CommentForm::new(Some(1));
        form.content = "   \n".to_string();
        assert!(!form.can_submit());

        form.content = "  looks fixed to me  ".to_string();
        let payload = form.to_new_comment().unwrap();
        assert_eq!(payload.content, "looks fixed to me");
        assert_eq!(payload.user_id, 1);

        form.clear_content();
        assert!(form.content.is_empty());
        assert_eq!(form.user_id, Some(1));
    }
}
