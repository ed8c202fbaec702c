//! Terminal client for REST issue trackers.
//!
//! The crate is split into a thin command surface and a reusable core:
//! [`api`] speaks the tracker's JSON API, [`screens`] holds per-view
//! state containers that load, filter, and reconcile server data, and
//! [`workflows`] models the form and confirmation flows that sit in
//! front of mutations.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod screens;
pub mod types;
pub mod workflows;

pub use api::ApiClient;
pub use config::Config;
pub use error::{BacklogError, Result};
pub use types::{Comment, Issue, IssueStatus, Project, ProjectStatus, User};
