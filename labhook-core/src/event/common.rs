//! Building blocks shared by several payload schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A GitLab user as embedded in event payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Numeric user id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Email; GitLab sends `"[REDACTED]"` unless the user made it public.
    pub email: Option<String>,
}

/// The project an event belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Numeric project id.
    pub id: u64,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: Option<String>,
    /// Browser URL.
    pub web_url: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// SSH clone URL.
    pub git_ssh_url: String,
    /// HTTP clone URL.
    pub git_http_url: String,
    /// Owning namespace name.
    pub namespace: String,
    /// 0 private, 10 internal, 20 public.
    pub visibility_level: u32,
    /// `group/subgroup/project`.
    pub path_with_namespace: String,
    /// Default branch, absent for empty repositories.
    pub default_branch: Option<String>,
    /// CI configuration path, when customised.
    pub ci_config_path: Option<String>,
}

/// Legacy repository block sent alongside `project`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// SSH URL.
    pub url: String,
    /// Description.
    pub description: Option<String>,
    /// Project home page.
    pub homepage: String,
    /// HTTP clone URL.
    pub git_http_url: Option<String>,
    /// SSH clone URL.
    pub git_ssh_url: Option<String>,
    /// 0 private, 10 internal, 20 public.
    pub visibility_level: Option<u32>,
}

/// Author of a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
}

/// A commit as listed in push, pipeline and note payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    /// Full SHA.
    pub id: String,
    /// Full commit message.
    pub message: String,
    /// First line of the message.
    pub title: String,
    /// Commit timestamp.
    #[serde(with = "crate::event::time::option")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Browser URL.
    pub url: String,
    /// Commit author.
    pub author: CommitAuthor,
    /// Paths added.
    pub added: Vec<String>,
    /// Paths modified.
    pub modified: Vec<String>,
    /// Paths removed.
    pub removed: Vec<String>,
}

/// A label attached to an issue or merge request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    /// Label id.
    pub id: u64,
    /// Label text.
    pub title: String,
    /// Hex colour.
    pub color: String,
    /// Owning project, for project labels.
    pub project_id: Option<u64>,
    /// Owning group, for group labels.
    pub group_id: Option<u64>,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether this is a template label.
    pub template: bool,
    /// Description.
    pub description: Option<String>,
    /// `ProjectLabel` or `GroupLabel`.
    #[serde(rename = "type")]
    pub label_type: Option<String>,
}

/// One entry of a `changes` block: the value before and after the update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Change {
    /// Value before the update.
    pub previous: Value,
    /// Value after the update.
    pub current: Value,
}

/// The changed-record list of an update event, keyed by attribute name.
pub type Changes = BTreeMap<String, Change>;

/// A CI runner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runner {
    /// Runner id.
    pub id: u64,
    /// Runner description.
    pub description: String,
    /// `instance_type`, `group_type` or `project_type`.
    pub runner_type: String,
    /// Whether the runner accepts jobs.
    pub active: bool,
    /// Whether the runner is shared.
    pub is_shared: bool,
    /// Runner tags.
    pub tags: Vec<String>,
}

/// The environment a job deploys to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Environment name.
    pub name: String,
    /// `start`, `stop`, `prepare`, ...
    pub action: String,
    /// `production`, `staging`, ...
    pub deployment_tier: Option<String>,
}

/// A group, as sent in group-scoped events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    /// Group id.
    pub group_id: u64,
    /// Group name.
    pub group_name: String,
    /// Group path.
    pub group_path: String,
    /// Full path including parents.
    pub full_path: Option<String>,
}
