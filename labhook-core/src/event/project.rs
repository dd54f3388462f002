//! Project-scoped payloads: wiki pages, releases, feature flags, emoji and
//! access tokens.

use super::{
    common::{Commit, Group, Project, User},
    issue::IssueAttributes,
    merge_request::MergeRequestAttributes,
    note::NoteAttributes,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Wiki Page Hook`.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiPageEvent {
    /// Always `wiki_page`.
    #[serde(default)]
    pub object_kind: String,
    /// Who edited the page.
    #[serde(default)]
    pub user: User,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// The wiki repository.
    #[serde(default)]
    pub wiki: Wiki,
    /// The page itself.
    pub object_attributes: WikiPageAttributes,
}

/// A project's wiki repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wiki {
    /// Browser URL.
    pub web_url: String,
    /// SSH clone URL.
    pub git_ssh_url: String,
    /// HTTP clone URL.
    pub git_http_url: String,
    /// `group/project.wiki`.
    pub path_with_namespace: String,
    /// Default branch.
    pub default_branch: String,
}

/// Wiki page attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiPageAttributes {
    /// Page title.
    pub title: String,
    /// Page content.
    pub content: String,
    /// `markdown`, `rdoc`, `asciidoc`, `org`.
    pub format: String,
    /// Commit message of the edit.
    pub message: String,
    /// URL slug.
    pub slug: String,
    /// Browser URL.
    pub url: String,
    /// `create`, `update` or `delete`.
    pub action: String,
    /// Browser URL of the diff.
    pub diff_url: Option<String>,
    /// Commit SHA of this version.
    pub version_id: Option<String>,
}

/// `Release Hook`.
///
/// `tag` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    /// Always `release`.
    #[serde(default)]
    pub object_kind: String,
    /// Release id.
    #[serde(default)]
    pub id: u64,
    /// Creation time.
    #[serde(default, with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Release time; in the future for upcoming releases.
    #[serde(default, with = "crate::event::time::option")]
    pub released_at: Option<DateTime<Utc>>,
    /// Release notes.
    #[serde(default)]
    pub description: String,
    /// Release name.
    #[serde(default)]
    pub name: String,
    /// Tag the release points at.
    pub tag: String,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Browser URL.
    #[serde(default)]
    pub url: String,
    /// `create`, `update` or `delete`.
    #[serde(default)]
    pub action: String,
    /// Assets attached to the release.
    #[serde(default)]
    pub assets: ReleaseAssets,
    /// Tagged commit.
    #[serde(default)]
    pub commit: Option<Commit>,
}

/// Release assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseAssets {
    /// Number of assets.
    pub count: u64,
    /// Asset links.
    pub links: Vec<ReleaseLink>,
    /// Source archives.
    pub sources: Vec<ReleaseSource>,
}

/// A release asset link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseLink {
    /// Link id.
    pub id: u64,
    /// Whether the asset is hosted outside GitLab.
    pub external: bool,
    /// `other`, `runbook`, `image`, `package`.
    pub link_type: String,
    /// Display name.
    pub name: String,
    /// Target URL.
    pub url: String,
}

/// A source archive of a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSource {
    /// `zip`, `tar.gz`, ...
    pub format: String,
    /// Download URL.
    pub url: String,
}

/// `Feature Flag Hook`.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlagEvent {
    /// Always `feature_flag`.
    #[serde(default)]
    pub object_kind: String,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Who toggled the flag.
    #[serde(default)]
    pub user: User,
    /// Browser URL of that user.
    #[serde(default)]
    pub user_url: String,
    /// The flag itself.
    pub object_attributes: FeatureFlagAttributes,
}

/// Feature flag attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlagAttributes {
    /// Flag id.
    pub id: u64,
    /// Flag name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the flag is now on.
    pub active: bool,
}

/// `Emoji Hook`: an emoji reaction was awarded or revoked.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiEvent {
    /// Always `emoji`.
    #[serde(default)]
    pub object_kind: String,
    /// `award` or `revoke`.
    #[serde(default)]
    pub event_type: String,
    /// Who reacted.
    #[serde(default)]
    pub user: User,
    /// Owning project id.
    #[serde(default)]
    pub project_id: u64,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// The award itself.
    pub object_attributes: EmojiAttributes,
    /// Reacted-to note.
    #[serde(default)]
    pub note: Option<NoteAttributes>,
    /// Reacted-to issue.
    #[serde(default)]
    pub issue: Option<IssueAttributes>,
    /// Reacted-to merge request.
    #[serde(default)]
    pub merge_request: Option<MergeRequestAttributes>,
}

/// Emoji award attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiAttributes {
    /// Award id.
    pub id: u64,
    /// Emoji name, e.g. `thumbsup`.
    pub name: String,
    /// Reacting user id.
    pub user_id: u64,
    /// `Issue`, `MergeRequest`, `Note`, `Snippet`, ...
    pub awardable_type: String,
    /// Id of the reacted-to object.
    pub awardable_id: u64,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `Resource Access Token Hook`: a project or group access token expires soon.
///
/// `event_name` and `object_attributes` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenEvent {
    /// Always `access_token`.
    #[serde(default)]
    pub object_kind: String,
    /// `expiring_access_token`.
    pub event_name: String,
    /// Owning project, for project tokens.
    #[serde(default)]
    pub project: Option<Project>,
    /// Owning group, for group tokens.
    #[serde(default)]
    pub group: Option<Group>,
    /// The token itself.
    pub object_attributes: AccessTokenAttributes,
}

/// Access token attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessTokenAttributes {
    /// Token id.
    pub id: u64,
    /// Token name.
    pub name: String,
    /// Bot user owning the token.
    pub user_id: u64,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Expiry date (`YYYY-MM-DD`).
    pub expires_at: Option<String>,
}
