//! Merge request payloads.

use super::common::{Changes, Commit, Label, Project, Repository, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Merge Request Hook`.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequestEvent {
    /// Always `merge_request`.
    #[serde(default)]
    pub object_kind: String,
    /// Always `merge_request`.
    #[serde(default)]
    pub event_type: String,
    /// Who triggered the event.
    #[serde(default)]
    pub user: User,
    /// Target project.
    #[serde(default)]
    pub project: Project,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// The merge request itself.
    pub object_attributes: MergeRequestAttributes,
    /// Current labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Attributes changed by an update.
    #[serde(default)]
    pub changes: Changes,
    /// Current assignees.
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Current reviewers.
    #[serde(default)]
    pub reviewers: Vec<User>,
}

impl MergeRequestEvent {
    /// `open`, `close`, `reopen`, `update`, `approved`, `unapproved`,
    /// `approval`, `unapproval` or `merge`; empty when GitLab omits it.
    pub fn action(&self) -> &str {
        self.object_attributes.action.as_deref().unwrap_or_default()
    }

    /// Whether new commits were pushed (an update carrying `oldrev`).
    pub fn has_new_commits(&self) -> bool {
        self.object_attributes.oldrev.is_some()
    }
}

/// Merge request attributes, shared with note and emoji payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeRequestAttributes {
    /// Global id.
    pub id: u64,
    /// Project-scoped id (`!42`).
    pub iid: u64,
    /// Branch merged into.
    pub target_branch: String,
    /// Branch merged from.
    pub source_branch: String,
    /// Source project id; differs from the target for forks.
    pub source_project_id: u64,
    /// Target project id.
    pub target_project_id: u64,
    /// Author id.
    pub author_id: u64,
    /// Assignee ids.
    pub assignee_ids: Vec<u64>,
    /// Reviewer ids.
    pub reviewer_ids: Vec<u64>,
    /// Title.
    pub title: String,
    /// Description in Markdown.
    pub description: Option<String>,
    /// `opened`, `closed`, `locked` or `merged`.
    pub state: String,
    /// Legacy mergeability status.
    pub merge_status: Option<String>,
    /// Detailed mergeability status.
    pub detailed_merge_status: Option<String>,
    /// What happened; only set on merge request events.
    pub action: Option<String>,
    /// Browser URL.
    pub url: String,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Head commit of the source branch.
    pub last_commit: Option<Commit>,
    /// Whether the merge request is a draft.
    pub draft: bool,
    /// Previous head SHA, present when commits were pushed.
    pub oldrev: Option<String>,
    /// Latest pipeline on the source branch.
    pub head_pipeline_id: Option<u64>,
    /// Labels at the time of the event.
    pub labels: Vec<Label>,
}
