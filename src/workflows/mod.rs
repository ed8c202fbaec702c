//! Self-contained create/edit/delete-confirm interactions.
//!
//! Workflows hold transient form state, validate required fields, and
//! build the API payloads. On success the owning screen reconciles its
//! local copy from the server's response; on failure entered input is
//! preserved.

pub mod confirm;
pub mod forms;

pub use confirm::{ConfirmChoice, ConfirmDialog};
pub use forms::{CommentForm, IssueForm, ProjectForm};
