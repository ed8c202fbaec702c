use clap::{Parser, Subcommand};

use crate::filter::{AssigneeFilter, StatusFilter};
use crate::types::{
    IssueStatus, ProjectStatus, VALID_ISSUE_STATUSES, VALID_PROJECT_STATUSES,
};

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Terminal client for REST issue trackers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with projects
    #[command(visible_alias = "p")]
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Work with issues
    #[command(visible_alias = "i")]
    Issue {
        #[command(subcommand)]
        action: IssueAction,
    },

    /// Work with comments
    #[command(visible_alias = "c")]
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// List tracker users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects
    Ls {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project and its issues
    Show {
        /// Project id
        id: u64,

        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,

        /// Status filter: all, active, on_hold, resolved, closed
        #[arg(long, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,

        /// Assignee filter: all, unassigned, or a user id
        #[arg(long, default_value = "all", value_parser = parse_assignee_filter)]
        assignee: AssigneeFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,

        /// Description text
        #[arg(short, long)]
        description: Option<String>,

        /// Status: active, on_hold, completed, archived (default: active)
        #[arg(short, long, default_value = "active", value_parser = parse_project_status)]
        status: ProjectStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a project
    Edit {
        /// Project id
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status: active, on_hold, completed, archived
        #[arg(short, long, value_parser = parse_project_status)]
        status: Option<ProjectStatus>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a project
    Delete {
        /// Project id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum IssueAction {
    /// Show an issue with its comments
    Show {
        /// Project id
        project: u64,

        /// Issue id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an issue
    Create {
        /// Project id
        project: u64,

        /// Issue title
        title: String,

        /// Description text
        #[arg(short, long)]
        description: Option<String>,

        /// Status: active, on_hold, resolved, closed (default: active)
        #[arg(short, long, default_value = "active", value_parser = parse_issue_status)]
        status: IssueStatus,

        /// Assignee user id
        #[arg(short, long)]
        assignee: Option<u64>,

        /// Reporter user id (default: configured default_reporter_id)
        #[arg(short, long)]
        reporter: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an issue
    Edit {
        /// Project id
        project: u64,

        /// Issue id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status: active, on_hold, resolved, closed
        #[arg(short, long, value_parser = parse_issue_status)]
        status: Option<IssueStatus>,

        /// New assignee: a user id, or 'none' to unassign
        #[arg(short, long)]
        assignee: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an issue
    Delete {
        /// Project id
        project: u64,

        /// Issue id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// Add a comment to an issue
    Add {
        /// Project id
        project: u64,

        /// Issue id
        issue: u64,

        /// Comment text
        content: String,

        /// Author user id (default: configured default_reporter_id)
        #[arg(short, long)]
        author: Option<u64>,
    },

    /// Delete a comment
    Delete {
        /// Project id
        project: u64,

        /// Issue id
        issue: u64,

        /// Comment id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the resolved configuration
    Show,

    /// Set the tracker API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:3001
        url: String,
    },

    /// Set the default reporter for new issues and comments
    SetReporter {
        /// User id
        id: u64,
    },
}

fn parse_issue_status(s: &str) -> Result<IssueStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "invalid status '{}', expected one of: {}",
            s,
            VALID_ISSUE_STATUSES.join(", ")
        )
    })
}

fn parse_project_status(s: &str) -> Result<ProjectStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "invalid status '{}', expected one of: {}",
            s,
            VALID_PROJECT_STATUSES.join(", ")
        )
    })
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    s.parse().map_err(|_| {
        format!(
            "invalid status filter '{}', expected 'all' or one of: {}",
            s,
            VALID_ISSUE_STATUSES.join(", ")
        )
    })
}

fn parse_assignee_filter(s: &str) -> Result<AssigneeFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid assignee filter '{}', expected 'all', 'unassigned', or a user id", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_status_filter_parser() {
        assert_eq!(parse_status_filter("all").unwrap(), StatusFilter::All);
        assert_eq!(
            parse_status_filter("closed").unwrap(),
            StatusFilter::Is(IssueStatus::Closed)
        );
        assert!(parse_status_filter("wontfix").is_err());
    }

    #[test]
    fn test_assignee_filter_parser() {
        assert_eq!(parse_assignee_filter("unassigned").unwrap(), AssigneeFilter::Unassigned);
        assert_eq!(parse_assignee_filter("12").unwrap(), AssigneeFilter::User(12));
        assert!(parse_assignee_filter("bob").is_err());
    }
}
