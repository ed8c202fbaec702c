use owo_colors::OwoColorize;

use crate::display::{format_comment, format_date, format_issue_status, issue_table};
use crate::error::{BacklogError, Result};
use crate::filter::{AssigneeFilter, StatusFilter};
use crate::screens::{IssueDetailScreen, LoadState, ProjectDetailScreen};
use crate::types::{IssueStatus, estimated_next_issue_id};
use crate::workflows::{ConfirmDialog, IssueForm};

use super::{connect, prompt_confirm, screen_failure};

/// Show a project with its issue table, narrowed by the given criteria.
pub async fn cmd_project_show(
    project_id: u64,
    search: Option<&str>,
    status: StatusFilter,
    assignee: AssigneeFilter,
    output_json: bool,
) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = ProjectDetailScreen::new(project_id);
    screen.criteria.search_text = search.unwrap_or_default().to_string();
    screen.criteria.status = status;
    screen.criteria.assignee = assignee;
    screen.load(&api).await;

    match &screen.state {
        LoadState::Failed(err) => Err(screen_failure(err)),
        LoadState::Loading => Ok(()),
        LoadState::Ready(detail) => {
            let visible = screen.visible_issues();

            if output_json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
                return Ok(());
            }

            println!("{} (#{})", detail.project.name.bold(), detail.project.id);
            if !detail.project.description.is_empty() {
                println!("{}", detail.project.description);
            }
            println!();

            if detail.issues.is_empty() {
                println!("No issues yet.");
            } else if visible.is_empty() {
                println!("Showing 0 of {} issues.", detail.issues.len());
            } else {
                println!("{}", issue_table(&visible));
                println!(
                    "Showing {} of {} issues.",
                    visible.len(),
                    detail.issues.len()
                );
            }
            Ok(())
        }
    }
}

/// Show one issue with its comments.
pub async fn cmd_issue_show(project_id: u64, issue_id: u64, output_json: bool) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = IssueDetailScreen::new(project_id, issue_id);
    screen.load(&api).await;

    match &screen.state {
        LoadState::Failed(err) => Err(screen_failure(err)),
        LoadState::Loading => Ok(()),
        LoadState::Ready(detail) => {
            if output_json {
                println!("{}", serde_json::to_string_pretty(&detail.issue)?);
                return Ok(());
            }

            let issue = &detail.issue;
            println!(
                "Issue #{} - {} {}",
                issue.id,
                issue.title.bold(),
                format_issue_status(issue.status)
            );
            println!("Created {}", format_date(&issue.created_at));
            if let Some(reporter) = issue
                .reporter
                .as_ref()
                .map(|u| u.name.clone())
                .or_else(|| screen.user(issue.reporter_id).map(|u| u.name.clone()))
            {
                println!("Reporter: {}", reporter);
            }
            match issue
                .assigned_to
                .as_ref()
                .map(|u| u.name.clone())
                .or_else(|| {
                    issue
                        .assigned_to_id
                        .and_then(|id| screen.user(id).map(|u| u.name.clone()))
                }) {
                Some(name) => println!("Assigned to: {}", name),
                None => println!("Assigned to: Unassigned"),
            }
            if !issue.description.is_empty() {
                println!("\n{}", issue.description);
            }

            println!("\n{}", "Comments".bold());
            if detail.comments.is_empty() {
                println!("No comments yet.");
            } else {
                for comment in &detail.comments {
                    println!("{}", format_comment(comment));
                }
            }
            Ok(())
        }
    }
}

/// Create an issue in a project. The reporter comes from `--reporter` or
/// the configured default.
#[allow(clippy::too_many_arguments)]
pub async fn cmd_issue_create(
    project_id: u64,
    title: &str,
    description: Option<&str>,
    status: IssueStatus,
    assignee: Option<u64>,
    reporter: Option<u64>,
    output_json: bool,
) -> Result<()> {
    let (config, api) = connect()?;
    let reporter_id = config.resolve_reporter(reporter)?;

    let form = IssueForm {
        title: title.to_string(),
        description: description.unwrap_or_default().to_string(),
        status,
        assigned_to_id: assignee,
        reporter_id: Some(reporter_id),
    };
    let Some(data) = form.to_new_issue() else {
        return Err(BacklogError::Other("issue title is required".to_string()));
    };

    let mut screen = ProjectDetailScreen::new(project_id);
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    if let Some(next) = screen
        .state
        .ready()
        .and_then(|d| estimated_next_issue_id(&d.issues))
        && !output_json
    {
        println!("{}", format!("Issue number: #{} (estimated)", next).dimmed());
    }

    let created = screen.create_issue(&api, &data).await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!("Created issue #{}: {}", created.id, created.title);
    }
    Ok(())
}

/// Edit an issue. Only the flags given end up in the update body; the
/// loaded entity provides the snapshot the edits diff against.
#[allow(clippy::too_many_arguments)]
pub async fn cmd_issue_edit(
    project_id: u64,
    issue_id: u64,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<IssueStatus>,
    assignee: Option<&str>,
    output_json: bool,
) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = IssueDetailScreen::new(project_id, issue_id);
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let assignee = parse_assignee(assignee)?;
    {
        let draft = screen.begin_edit()?;
        if let Some(title) = title {
            draft.title = title.to_string();
        }
        if let Some(description) = description {
            draft.description = description.to_string();
        }
        if let Some(status) = status {
            draft.status = status;
        }
        if let Some(assignee) = assignee {
            draft.assigned_to_id = assignee;
        }
    }

    let updated = screen.save(&api).await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!(
            "Saved issue #{} {}",
            updated.id,
            format_issue_status(updated.status)
        );
    }
    Ok(())
}

/// Delete an issue behind a confirmation dialog.
pub async fn cmd_issue_delete(project_id: u64, issue_id: u64, assume_yes: bool) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = IssueDetailScreen::new(project_id, issue_id);
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let Some(issue) = screen.state.ready().map(|d| d.issue.clone()) else {
        return Err(BacklogError::NotFound("issue".to_string()));
    };

    let dialog = ConfirmDialog::for_delete_issue(&issue);
    if !prompt_confirm(&dialog, assume_yes)?.is_confirmed() {
        return Ok(());
    }

    screen.delete(&api).await?;
    println!("Deleted issue #{}.", issue_id);
    Ok(())
}

/// `--assignee` accepts a user id or the literal `none` to clear.
fn parse_assignee(raw: Option<&str>) -> Result<Option<Option<u64>>> {
    match raw {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("none") => Ok(Some(None)),
        Some(s) => s
            .parse::<u64>()
            .map(|id| Some(Some(id)))
            .map_err(|_| BacklogError::InvalidAssigneeFilter(s.to_string())),
    }
}
