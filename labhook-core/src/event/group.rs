//! Group-scoped payloads: subgroups and members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Subgroup Hook`: a subgroup was created in or removed from a group.
///
/// `event_name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgroupEvent {
    /// `subgroup_create` or `subgroup_destroy`.
    pub event_name: String,
    /// Creation time.
    #[serde(default, with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(default, with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Subgroup name.
    #[serde(default)]
    pub name: String,
    /// Subgroup path.
    #[serde(default)]
    pub path: String,
    /// Subgroup full path.
    #[serde(default)]
    pub full_path: String,
    /// Subgroup id.
    #[serde(default)]
    pub group_id: u64,
    /// Parent group id.
    #[serde(default)]
    pub parent_group_id: u64,
    /// Parent group name.
    #[serde(default)]
    pub parent_name: String,
    /// Parent group path.
    #[serde(default)]
    pub parent_path: String,
    /// Parent group full path.
    #[serde(default)]
    pub parent_full_path: String,
}

impl SubgroupEvent {
    /// Whether the subgroup was created (as opposed to removed).
    pub fn is_created(&self) -> bool {
        self.event_name == "subgroup_create"
    }
}

/// `Member Hook`: a group member was added, updated, removed or requested access.
///
/// `event_name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEvent {
    /// `user_add_to_group`, `user_update_for_group`, `user_remove_from_group`,
    /// `user_access_request_to_group`, ...
    pub event_name: String,
    /// Creation time.
    #[serde(default, with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(default, with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Group name.
    #[serde(default)]
    pub group_name: String,
    /// Group path.
    #[serde(default)]
    pub group_path: String,
    /// Group id.
    #[serde(default)]
    pub group_id: u64,
    /// Member login name.
    #[serde(default)]
    pub user_username: String,
    /// Member display name.
    #[serde(default)]
    pub user_name: String,
    /// Member email.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Member id.
    #[serde(default)]
    pub user_id: u64,
    /// `Guest`, `Reporter`, `Developer`, `Maintainer`, `Owner`.
    #[serde(default)]
    pub group_access: String,
    /// Subscription plan of the group.
    #[serde(default)]
    pub group_plan: Option<String>,
    /// Membership expiry.
    #[serde(default, with = "crate::event::time::option")]
    pub expires_at: Option<DateTime<Utc>>,
}
