use crate::display::format_comment;
use crate::error::{BacklogError, Result};
use crate::screens::IssueDetailScreen;
use crate::workflows::{CommentForm, ConfirmDialog};

use super::{connect, prompt_confirm, screen_failure};

/// Add a comment to an issue. The author comes from `--author` or the
/// configured default reporter.
pub async fn cmd_comment_add(
    project_id: u64,
    issue_id: u64,
    content: &str,
    author: Option<u64>,
) -> Result<()> {
    let (config, api) = connect()?;
    let user_id = config.resolve_reporter(author)?;

    let mut form = CommentForm::new(Some(user_id));
    form.content = content.to_string();
    let Some(data) = form.to_new_comment() else {
        return Err(BacklogError::Other("comment content is required".to_string()));
    };

    let mut screen = IssueDetailScreen::new(project_id, issue_id);
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let created = screen.add_comment(&api, &data).await?;
    form.clear_content();

    println!("{}", format_comment(&created));
    Ok(())
}

/// Delete a comment by its id, behind a confirmation dialog. The comment
/// must belong to the given issue so the dialog can describe it.
pub async fn cmd_comment_delete(
    project_id: u64,
    issue_id: u64,
    comment_id: u64,
    assume_yes: bool,
) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = IssueDetailScreen::new(project_id, issue_id);
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let Some(comment) = screen
        .state
        .ready()
        .and_then(|d| d.comments.iter().find(|c| c.id == comment_id))
        .cloned()
    else {
        return Err(BacklogError::NotFound("comment".to_string()));
    };

    let dialog = ConfirmDialog::for_delete_comment(&comment);
    if !prompt_confirm(&dialog, assume_yes)?.is_confirmed() {
        return Ok(());
    }

    screen.delete_comment(&api, comment_id).await?;
    println!("Deleted comment #{}.", comment_id);
    Ok(())
}
