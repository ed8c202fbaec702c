use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BacklogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
    Archived,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::OnHold => write!(f, "on_hold"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ProjectStatus::Active),
            "on_hold" => Ok(ProjectStatus::OnHold),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(BacklogError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_PROJECT_STATUSES: &[&str] = &["active", "on_hold", "completed", "archived"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Active,
    OnHold,
    Resolved,
    Closed,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueStatus::Active => write!(f, "active"),
            IssueStatus::OnHold => write!(f, "on_hold"),
            IssueStatus::Resolved => write!(f, "resolved"),
            IssueStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for IssueStatus {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(IssueStatus::Active),
            "on_hold" => Ok(IssueStatus::OnHold),
            "resolved" => Ok(IssueStatus::Resolved),
            "closed" => Ok(IssueStatus::Closed),
            _ => Err(BacklogError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_ISSUE_STATUSES: &[&str] = &["active", "on_hold", "resolved", "closed"];

/// A tracker account. Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
    /// Server-computed; not kept in sync by the client after issue mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: IssueStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    pub reporter_id: u64,
    pub created_at: String,
    pub updated_at: String,

    // Denormalized read projections the server may attach for display.
    // Never authoritative for writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub issue_id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Client-writable fields for creating a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

/// Partial update for a project. Unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Client-writable fields for creating an issue.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    pub reporter_id: u64,
}

/// Partial update for an issue. Unset fields are omitted from the body.
///
/// `assigned_to_id` is doubly optional: `None` leaves the assignee alone,
/// `Some(None)` clears it, `Some(Some(id))` reassigns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<u64>,
}

impl IssuePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to_id.is_none()
            && self.reporter_id.is_none()
    }
}

/// Client-writable fields for creating a comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub content: String,
    pub user_id: u64,
}

/// Predict the next issue number from the loaded collection, for display
/// only. The real id is always assigned by the server.
pub fn estimated_next_issue_id(issues: &[Issue]) -> Option<u64> {
    issues.iter().map(|i| i.id).max().map(|max| max + 1)
}
