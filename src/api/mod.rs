//! HTTP client for the tracker REST API.
//!
//! One method per (resource, verb) pair. Each call is a single request:
//! no retries, no caching, no batching. Callers sequence related calls
//! themselves (screens join concurrent loads with `try_join!`).

use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::{BacklogError, Result};
use crate::types::{
    Comment, Issue, IssuePatch, NewComment, NewIssue, NewProject, Project, ProjectPatch, User,
};

/// Typed client over the tracker's REST boundary.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = self.base.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path)
            .map_err(|e| BacklogError::Config(format!("invalid API path '{path}': {e}")))
    }

    /// Classify an error response. 404 is reported against the named
    /// resource; 5xx is a server fault; remaining 4xx surface generically
    /// as validation failures.
    async fn check(response: Response, resource: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BacklogError::NotFound(resource.to_string()));
        }
        if status.is_server_error() {
            return Err(BacklogError::Server(status.as_u16()));
        }
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(BacklogError::Validation {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T> {
        debug!(path, "GET");
        let response = self.client.get(self.endpoint(path)?).send().await?;
        let response = Self::check(response, resource).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "POST");
        let response = self.client.post(self.endpoint(path)?).json(body).send().await?;
        let response = Self::check(response, resource).await?;
        Ok(response.json().await?)
    }

    async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "PUT");
        let response = self.client.put(self.endpoint(path)?).json(body).send().await?;
        let response = Self::check(response, resource).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str, resource: &str) -> Result<()> {
        debug!(path, "DELETE");
        let response = self.client.delete(self.endpoint(path)?).send().await?;
        Self::check(response, resource).await?;
        Ok(())
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json("projects", "projects").await
    }

    pub async fn get_project(&self, id: u64) -> Result<Project> {
        self.get_json(&format!("projects/{id}"), "project").await
    }

    /// Returns the full server-assigned entity, including generated id
    /// and timestamps.
    pub async fn create_project(&self, data: &NewProject) -> Result<Project> {
        self.post_json("projects", "project", data).await
    }

    /// Returns the full updated entity; the response may include
    /// server-recomputed fields beyond the patch.
    pub async fn update_project(&self, id: u64, patch: &ProjectPatch) -> Result<Project> {
        self.put_json(&format!("projects/{id}"), "project", patch)
            .await
    }

    pub async fn delete_project(&self, id: u64) -> Result<()> {
        self.delete(&format!("projects/{id}"), "project").await
    }

    // Issues (nested under a project)

    pub async fn list_issues(&self, project_id: u64) -> Result<Vec<Issue>> {
        self.get_json(&format!("projects/{project_id}/issues"), "issues")
            .await
    }

    pub async fn get_issue(&self, project_id: u64, id: u64) -> Result<Issue> {
        self.get_json(&format!("projects/{project_id}/issues/{id}"), "issue")
            .await
    }

    pub async fn create_issue(&self, project_id: u64, data: &NewIssue) -> Result<Issue> {
        self.post_json(&format!("projects/{project_id}/issues"), "issue", data)
            .await
    }

    pub async fn update_issue(&self, project_id: u64, id: u64, patch: &IssuePatch) -> Result<Issue> {
        self.put_json(&format!("projects/{project_id}/issues/{id}"), "issue", patch)
            .await
    }

    pub async fn delete_issue(&self, project_id: u64, id: u64) -> Result<()> {
        self.delete(&format!("projects/{project_id}/issues/{id}"), "issue")
            .await
    }

    // Comments (nested under an issue; deleted by bare id)

    pub async fn list_comments(&self, project_id: u64, issue_id: u64) -> Result<Vec<Comment>> {
        self.get_json(
            &format!("projects/{project_id}/issues/{issue_id}/comments"),
            "comments",
        )
        .await
    }

    pub async fn create_comment(
        &self,
        project_id: u64,
        issue_id: u64,
        data: &NewComment,
    ) -> Result<Comment> {
        self.post_json(
            &format!("projects/{project_id}/issues/{issue_id}/comments"),
            "comment",
            data,
        )
        .await
    }

    pub async fn delete_comment(&self, id: u64) -> Result<()> {
        self.delete(&format!("comments/{id}"), "comment").await
    }

    // Users (read-only)

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("users", "users").await
    }

    pub async fn get_user(&self, id: u64) -> Result<User> {
        self.get_json(&format!("users/{id}"), "user").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = ApiClient::new(Url::parse("http://localhost:3001").unwrap());
        let url = client.endpoint("projects/7/issues/2").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/projects/7/issues/2");
    }

    #[test]
    fn test_endpoint_preserves_base_path_prefix() {
        let client = ApiClient::new(Url::parse("http://tracker.example.com/api/v1").unwrap());
        let url = client.endpoint("users").unwrap();
        assert_eq!(url.as_str(), "http://tracker.example.com/api/v1/users");
    }
}
