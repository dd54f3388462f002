//! Issue payloads.

use super::common::{Changes, Label, Project, Repository, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Issue Hook` and `Confidential Issue Hook`.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueEvent {
    /// `issue` or `work_item`.
    #[serde(default)]
    pub object_kind: String,
    /// `issue` or `confidential_issue`.
    #[serde(default)]
    pub event_type: String,
    /// Who triggered the event.
    #[serde(default)]
    pub user: User,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// The issue itself.
    pub object_attributes: IssueAttributes,
    /// Current labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Attributes changed by an update.
    #[serde(default)]
    pub changes: Changes,
    /// Current assignees.
    #[serde(default)]
    pub assignees: Vec<User>,
}

impl IssueEvent {
    /// `open`, `close`, `reopen` or `update`; empty when GitLab omits it.
    pub fn action(&self) -> &str {
        self.object_attributes.action.as_deref().unwrap_or_default()
    }
}

/// Issue attributes, shared with note and emoji payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueAttributes {
    /// Global id.
    pub id: u64,
    /// Project-scoped id (`#42`).
    pub iid: u64,
    /// Title.
    pub title: String,
    /// Description in Markdown.
    pub description: Option<String>,
    /// `opened` or `closed`.
    pub state: String,
    /// What happened; only set on issue events.
    pub action: Option<String>,
    /// Author id.
    pub author_id: u64,
    /// Owning project id.
    pub project_id: u64,
    /// Assignee ids.
    pub assignee_ids: Vec<u64>,
    /// Whether the issue is confidential.
    pub confidential: bool,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Close time.
    #[serde(with = "crate::event::time::option")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: Option<String>,
    /// Browser URL.
    pub url: String,
    /// Labels at the time of the event.
    pub labels: Vec<Label>,
    /// Severity, for incidents.
    pub severity: Option<String>,
    /// Issue weight.
    pub weight: Option<u64>,
}
