//! Pure filtering over loaded collections.
//!
//! Everything here derives the visible subset from a local collection and
//! the current criteria; nothing mutates the collection or talks to the
//! network. Containers recompute on every criteria change.

use std::fmt;
use std::str::FromStr;

use crate::error::BacklogError;
use crate::types::{Issue, IssueStatus, Project};

/// Status criterion: `all` matches everything, otherwise exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Is(IssueStatus),
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Is(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Is(s.parse()?))
    }
}

/// Assignee criterion: `all`, `unassigned`, or a specific user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    #[default]
    All,
    Unassigned,
    User(u64),
}

impl fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssigneeFilter::All => write!(f, "all"),
            AssigneeFilter::Unassigned => write!(f, "unassigned"),
            AssigneeFilter::User(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(AssigneeFilter::All);
        }
        if s.eq_ignore_ascii_case("unassigned") {
            return Ok(AssigneeFilter::Unassigned);
        }
        s.parse::<u64>()
            .map(AssigneeFilter::User)
            .map_err(|_| BacklogError::InvalidAssigneeFilter(s.to_string()))
    }
}

/// Combined issue criteria. All three predicates are ANDed.
#[derive(Debug, Clone, Default)]
pub struct IssueCriteria {
    pub search_text: String,
    pub status: StatusFilter,
    pub assignee: AssigneeFilter,
}

impl IssueCriteria {
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_search(issue) && self.matches_status(issue) && self.matches_assignee(issue)
    }

    /// Case-insensitive substring match against the title. An empty
    /// search matches everything.
    fn matches_search(&self, issue: &Issue) -> bool {
        self.search_text.is_empty()
            || issue
                .title
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    fn matches_status(&self, issue: &Issue) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Is(status) => issue.status == status,
        }
    }

    fn matches_assignee(&self, issue: &Issue) -> bool {
        match self.assignee {
            AssigneeFilter::All => true,
            AssigneeFilter::Unassigned => issue.assigned_to_id.is_none(),
            AssigneeFilter::User(id) => issue.assigned_to_id == Some(id),
        }
    }
}

/// Order-preserving filter of a loaded issue collection.
pub fn filter_issues<'a>(issues: &'a [Issue], criteria: &IssueCriteria) -> Vec<&'a Issue> {
    issues.iter().filter(|i| criteria.matches(i)).collect()
}

/// Order-preserving name search over projects. Empty search matches all.
pub fn filter_projects<'a>(projects: &'a [Project], search_text: &str) -> Vec<&'a Project> {
    let needle = search_text.to_lowercase();
    projects
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}
