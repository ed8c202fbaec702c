//! One handler per CLI operation. Handlers drive the view-state
//! containers and render their state; they never talk to the API without
//! going through a screen or workflow.

mod comments;
mod config;
mod issues;
mod projects;
mod users;

pub use comments::{cmd_comment_add, cmd_comment_delete};
pub use config::{cmd_config_set_reporter, cmd_config_set_url, cmd_config_show};
pub use issues::{
    cmd_issue_create, cmd_issue_delete, cmd_issue_edit, cmd_issue_show, cmd_project_show,
};
pub use projects::{cmd_project_create, cmd_project_delete, cmd_project_edit, cmd_project_ls};
pub use users::cmd_users;

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{BacklogError, Result};
use crate::screens::ScreenError;
use crate::workflows::{ConfirmChoice, ConfirmDialog};

/// Build the API client from configuration.
pub fn connect() -> Result<(Config, ApiClient)> {
    let config = Config::load()?;
    let api = ApiClient::new(config.api_url()?);
    Ok((config, api))
}

/// Turn a classified screen failure into the error the CLI exits with.
/// The message is already user-facing.
pub fn screen_failure(err: &ScreenError) -> BacklogError {
    BacklogError::Other(err.message.clone())
}

/// Present a confirmation dialog on the terminal. `assume_yes` (the
/// `--yes` flag) confirms without prompting; everything else requires an
/// explicit `y`.
pub fn prompt_confirm(dialog: &ConfirmDialog, assume_yes: bool) -> Result<ConfirmChoice> {
    if assume_yes {
        return Ok(ConfirmChoice::Confirmed);
    }

    let title = if dialog.danger {
        dialog.title.red().bold().to_string()
    } else {
        dialog.title.bold().to_string()
    };
    println!("{}", title);
    println!("{}", dialog.message);
    print!("{} [y/N]: ", dialog.confirm_label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    if line.trim().eq_ignore_ascii_case("y") {
        Ok(ConfirmChoice::Confirmed)
    } else {
        println!("{}", dialog.cancel_label.dimmed());
        Ok(ConfirmChoice::Cancelled)
    }
}
