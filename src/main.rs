use std::process::ExitCode;

use clap::Parser;

use backlog::cli::{Cli, CommentAction, Commands, ConfigAction, IssueAction, ProjectAction};
use backlog::commands::*;
use backlog::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Project { action } => match action {
            ProjectAction::Ls { search, json } => cmd_project_ls(search.as_deref(), json).await,
            ProjectAction::Show {
                id,
                search,
                status,
                assignee,
                json,
            } => cmd_project_show(id, search.as_deref(), status, assignee, json).await,
            ProjectAction::Create {
                name,
                description,
                status,
                json,
            } => cmd_project_create(&name, description.as_deref(), status, json).await,
            ProjectAction::Edit {
                id,
                name,
                description,
                status,
                json,
            } => cmd_project_edit(id, name.as_deref(), description.as_deref(), status, json).await,
            ProjectAction::Delete { id, yes } => cmd_project_delete(id, yes).await,
        },

        Commands::Issue { action } => match action {
            IssueAction::Show { project, id, json } => cmd_issue_show(project, id, json).await,
            IssueAction::Create {
                project,
                title,
                description,
                status,
                assignee,
                reporter,
                json,
            } => {
                cmd_issue_create(
                    project,
                    &title,
                    description.as_deref(),
                    status,
                    assignee,
                    reporter,
                    json,
                )
                .await
            }
            IssueAction::Edit {
                project,
                id,
                title,
                description,
                status,
                assignee,
                json,
            } => {
                cmd_issue_edit(
                    project,
                    id,
                    title.as_deref(),
                    description.as_deref(),
                    status,
                    assignee.as_deref(),
                    json,
                )
                .await
            }
            IssueAction::Delete { project, id, yes } => cmd_issue_delete(project, id, yes).await,
        },

        Commands::Comment { action } => match action {
            CommentAction::Add {
                project,
                issue,
                content,
                author,
            } => cmd_comment_add(project, issue, &content, author).await,
            CommentAction::Delete {
                project,
                issue,
                id,
                yes,
            } => cmd_comment_delete(project, issue, id, yes).await,
        },

        Commands::Users { json } => cmd_users(json).await,

        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::SetUrl { url } => cmd_config_set_url(&url),
            ConfigAction::SetReporter { id } => cmd_config_set_reporter(id),
        },
    }
}
