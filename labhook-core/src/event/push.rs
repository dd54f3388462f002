//! Push and tag push payloads.

use super::common::{Commit, Project, Repository};
use serde::{Deserialize, Serialize};

const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// `Push Hook`: commits pushed to a branch.
///
/// Only `ref` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    /// Always `push`.
    #[serde(default)]
    pub object_kind: String,
    /// Always `push`.
    #[serde(default)]
    pub event_name: String,
    /// SHA before the push; all zeros when the branch was created.
    #[serde(default)]
    pub before: String,
    /// SHA after the push; all zeros when the branch was deleted.
    #[serde(default)]
    pub after: String,
    /// Full ref, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Whether the ref is protected.
    #[serde(default)]
    pub ref_protected: bool,
    /// SHA checked out after the push.
    #[serde(default)]
    pub checkout_sha: Option<String>,
    /// Pusher id.
    #[serde(default)]
    pub user_id: u64,
    /// Pusher display name.
    #[serde(default)]
    pub user_name: String,
    /// Pusher login name.
    #[serde(default)]
    pub user_username: String,
    /// Pusher email.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Pusher avatar.
    #[serde(default)]
    pub user_avatar: Option<String>,
    /// Target project id.
    #[serde(default)]
    pub project_id: u64,
    /// Target project.
    #[serde(default)]
    pub project: Project,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// Up to 20 most recent commits.
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Number of commits pushed, which can exceed `commits.len()`.
    #[serde(default)]
    pub total_commits_count: u64,
}

impl PushEvent {
    /// The branch name when `ref` is a branch.
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/heads/")
    }

    /// The push created the branch.
    pub fn is_created(&self) -> bool {
        self.before == NULL_SHA
    }

    /// The push deleted the branch.
    pub fn is_deleted(&self) -> bool {
        self.after == NULL_SHA
    }
}

/// `Tag Push Hook`: a tag was created or deleted.
///
/// Only `ref` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagPushEvent {
    /// Always `tag_push`.
    #[serde(default)]
    pub object_kind: String,
    /// Always `tag_push`.
    #[serde(default)]
    pub event_name: String,
    /// All zeros when the tag was created.
    #[serde(default)]
    pub before: String,
    /// All zeros when the tag was deleted.
    #[serde(default)]
    pub after: String,
    /// Full ref, e.g. `refs/tags/v1.0.0`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Whether the tag is protected.
    #[serde(default)]
    pub ref_protected: bool,
    /// Tagged SHA.
    #[serde(default)]
    pub checkout_sha: Option<String>,
    /// Pusher id.
    #[serde(default)]
    pub user_id: u64,
    /// Pusher display name.
    #[serde(default)]
    pub user_name: String,
    /// Pusher login name.
    #[serde(default)]
    pub user_username: String,
    /// Pusher avatar.
    #[serde(default)]
    pub user_avatar: Option<String>,
    /// Target project id.
    #[serde(default)]
    pub project_id: u64,
    /// Target project.
    #[serde(default)]
    pub project: Project,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// Commits reachable from the tag, usually empty.
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Number of commits.
    #[serde(default)]
    pub total_commits_count: u64,
}

impl TagPushEvent {
    /// The tag name when `ref` is a tag.
    pub fn tag(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/tags/")
    }

    /// The push created the tag.
    pub fn is_created(&self) -> bool {
        self.before == NULL_SHA
    }

    /// The push deleted the tag.
    pub fn is_deleted(&self) -> bool {
        self.after == NULL_SHA
    }
}
