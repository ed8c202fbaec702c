use crate::error::Result;
use crate::display::project_table;
use crate::screens::{LoadState, ProjectListScreen};
use crate::types::ProjectStatus;
use crate::workflows::{ConfirmDialog, ProjectForm};

use super::{connect, prompt_confirm, screen_failure};

/// List projects, optionally narrowed by a name search.
pub async fn cmd_project_ls(search: Option<&str>, output_json: bool) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = ProjectListScreen::new();
    screen.search_text = search.unwrap_or_default().to_string();
    screen.load(&api).await;

    match &screen.state {
        LoadState::Failed(err) => Err(screen_failure(err)),
        LoadState::Loading => Ok(()),
        LoadState::Ready(all) => {
            let visible = screen.visible_projects();

            if output_json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
                return Ok(());
            }

            if all.is_empty() {
                println!("No projects found.");
            } else if visible.is_empty() {
                println!("Showing 0 of {} projects.", all.len());
            } else {
                println!("{}", project_table(&visible));
            }
            Ok(())
        }
    }
}

/// Create a project from the collected fields.
pub async fn cmd_project_create(
    name: &str,
    description: Option<&str>,
    status: ProjectStatus,
    output_json: bool,
) -> Result<()> {
    let (_config, api) = connect()?;

    let form = ProjectForm {
        name: name.to_string(),
        description: description.unwrap_or_default().to_string(),
        status,
    };
    let Some(data) = form.to_new_project() else {
        return Err(crate::error::BacklogError::Other(
            "project name is required".to_string(),
        ));
    };

    let mut screen = ProjectListScreen::new();
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let created = screen.create_project(&api, &data).await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!("Created project #{}: {}", created.id, created.name);
    }
    Ok(())
}

/// Update a project. Only the flags given end up in the update body; the
/// loaded entity provides the snapshot the edits diff against.
pub async fn cmd_project_edit(
    id: u64,
    name: Option<&str>,
    description: Option<&str>,
    status: Option<ProjectStatus>,
    output_json: bool,
) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = ProjectListScreen::new();
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let Some(project) = screen
        .state
        .ready()
        .and_then(|projects| projects.iter().find(|p| p.id == id))
        .cloned()
    else {
        return Err(crate::error::BacklogError::NotFound("project".to_string()));
    };

    let mut form = ProjectForm::from_project(&project);
    if let Some(name) = name {
        form.name = name.to_string();
    }
    if let Some(description) = description {
        form.description = description.to_string();
    }
    if let Some(status) = status {
        form.status = status;
    }

    let patch = form.diff(&project);
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let updated = screen.update_project(&api, id, &patch).await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated project #{}: {}", updated.id, updated.name);
    }
    Ok(())
}

/// Delete a project behind a confirmation dialog. Cancelling issues no
/// network call.
pub async fn cmd_project_delete(id: u64, assume_yes: bool) -> Result<()> {
    let (_config, api) = connect()?;

    let mut screen = ProjectListScreen::new();
    screen.load(&api).await;
    if let Some(err) = screen.state.failure() {
        return Err(screen_failure(err));
    }

    let Some(project) = screen
        .state
        .ready()
        .and_then(|projects| projects.iter().find(|p| p.id == id))
        .cloned()
    else {
        return Err(crate::error::BacklogError::NotFound("project".to_string()));
    };

    let dialog = ConfirmDialog::for_delete_project(&project);
    if !prompt_confirm(&dialog, assume_yes)?.is_confirmed() {
        return Ok(());
    }

    screen.delete_project(&api, id).await?;
    println!("Deleted project #{}.", id);
    Ok(())
}
