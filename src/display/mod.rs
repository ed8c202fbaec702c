pub mod cli_formatting;

pub use cli_formatting::{
    format_comment, format_date, format_issue_status, format_project_status, issue_table,
    project_table, user_table,
};
