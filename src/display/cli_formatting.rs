//! Terminal rendering helpers for loaded entities.

use jiff::Timestamp;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{Comment, Issue, IssueStatus, Project, ProjectStatus, User};

/// Render a server timestamp as a local date. Falls back to the raw
/// string when the server sends something unparsable.
pub fn format_date(iso: &str) -> String {
    match iso.parse::<Timestamp>() {
        Ok(ts) => ts.strftime("%Y-%m-%d").to_string(),
        Err(_) => iso.to_string(),
    }
}

pub fn format_issue_status(status: IssueStatus) -> String {
    let label = format!("[{}]", status);
    match status {
        IssueStatus::Active => label.green().to_string(),
        IssueStatus::OnHold => label.yellow().to_string(),
        IssueStatus::Resolved => label.cyan().to_string(),
        IssueStatus::Closed => label.dimmed().to_string(),
    }
}

pub fn format_project_status(status: ProjectStatus) -> String {
    let label = format!("[{}]", status);
    match status {
        ProjectStatus::Active => label.green().to_string(),
        ProjectStatus::OnHold => label.yellow().to_string(),
        ProjectStatus::Completed => label.cyan().to_string(),
        ProjectStatus::Archived => label.dimmed().to_string(),
    }
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Issues")]
    issues: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

pub fn project_table(projects: &[&Project]) -> String {
    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            id: p.id,
            name: p.name.clone(),
            status: format_project_status(p.status),
            issues: p
                .issues_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            updated: format_date(&p.updated_at),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "No")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Assigned to")]
    assignee: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn issue_table(issues: &[&Issue]) -> String {
    let rows: Vec<IssueRow> = issues
        .iter()
        .map(|i| IssueRow {
            id: format!("#{}", i.id),
            title: i.title.clone(),
            created: format_date(&i.created_at),
            assignee: i
                .assigned_to
                .as_ref()
                .map(|u| u.name.clone())
                .or_else(|| i.assigned_to_id.map(|id| format!("user {}", id)))
                .unwrap_or_else(|| "Unassigned".to_string()),
            status: format_issue_status(i.status),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

pub fn user_table(users: &[User]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

/// One comment as a display block, with the author resolved from the
/// denormalized projection when present.
pub fn format_comment(comment: &Comment) -> String {
    let author = comment
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| format!("user {}", comment.user_id));
    format!(
        "{} {} {}\n  {}",
        format!("#{}", comment.id).cyan(),
        author.bold(),
        format_date(&comment.created_at).dimmed(),
        comment.content
    )
}
