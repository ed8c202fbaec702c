//! Generic yes/no confirmation dialog.

use crate::types::{Comment, Issue, Project};

/// What the user chose in a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Confirmed,
    Cancelled,
}

impl ConfirmChoice {
    pub fn is_confirmed(self) -> bool {
        matches!(self, ConfirmChoice::Confirmed)
    }
}

/// A delete-confirm dialog parameterized by title, message, labels, and a
/// danger flag. Confirming triggers exactly one delete call in the owning
/// screen; cancelling triggers none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub danger: bool,
}

impl ConfirmDialog {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
        cancel_label: impl Into<String>,
        danger: bool,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
            cancel_label: cancel_label.into(),
            danger,
        }
    }

    pub fn for_delete_project(project: &Project) -> Self {
        Self::new(
            "Delete project",
            format!(
                "Are you sure you want to delete project '{}'? Its issues will be deleted too.",
                project.name
            ),
            "Delete project",
            "Cancel",
            true,
        )
    }

    pub fn for_delete_issue(issue: &Issue) -> Self {
        Self::new(
            "Delete issue",
            format!("Are you sure you want to delete issue #{} '{}'?", issue.id, issue.title),
            "Delete issue",
            "Cancel",
            true,
        )
    }

    pub fn for_delete_comment(comment: &Comment) -> Self {
        Self::new(
            "Delete comment",
            format!("Delete comment #{}? This cannot be undone.", comment.id),
            "Delete",
            "Cancel",
            true,
        )
    }
}
