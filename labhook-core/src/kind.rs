//! Wire identity of webhook events.

use crate::{capability::Capability, error::UnknownEventKind};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of event kinds GitLab announces in `X-Gitlab-Event`.
///
/// Each kind has exactly one decode schema (see [`Event`](crate::Event)) and is
/// observed by exactly one [`Capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum EventKind {
    /// Commits pushed to a branch.
    Push,
    /// A tag was created or deleted.
    TagPush,
    /// An issue was opened, updated, closed or reopened.
    Issue,
    /// Same as [`EventKind::Issue`] for confidential issues.
    ConfidentialIssue,
    /// A comment on a commit, merge request, issue or snippet.
    Note,
    /// Same as [`EventKind::Note`] for comments on confidential issues.
    ConfidentialNote,
    /// A merge request was opened, updated, merged or closed.
    MergeRequest,
    /// A wiki page was created, updated or deleted.
    WikiPage,
    /// A pipeline changed status.
    Pipeline,
    /// A job changed status.
    Job,
    /// A deployment started, succeeded, failed or was canceled.
    Deployment,
    /// A release was created, updated or deleted.
    Release,
    /// A subgroup was created in or removed from a group.
    Subgroup,
    /// A feature flag was turned on or off.
    FeatureFlag,
    /// A group member was added, updated or removed.
    Member,
    /// An emoji reaction was awarded or revoked.
    Emoji,
    /// A project or group access token is about to expire.
    ResourceAccessToken,
}

/// Every accepted spelling of every kind: the header value and the short
/// identifier. No spelling appears twice.
static SPELLINGS: phf::Map<&'static str, EventKind> = phf::phf_map! {
    "Push Hook" => EventKind::Push,
    "push" => EventKind::Push,
    "Tag Push Hook" => EventKind::TagPush,
    "tag_push" => EventKind::TagPush,
    "Issue Hook" => EventKind::Issue,
    "issue" => EventKind::Issue,
    "Confidential Issue Hook" => EventKind::ConfidentialIssue,
    "confidential_issue" => EventKind::ConfidentialIssue,
    "Note Hook" => EventKind::Note,
    "note" => EventKind::Note,
    "Confidential Note Hook" => EventKind::ConfidentialNote,
    "confidential_note" => EventKind::ConfidentialNote,
    "Merge Request Hook" => EventKind::MergeRequest,
    "merge_request" => EventKind::MergeRequest,
    "Wiki Page Hook" => EventKind::WikiPage,
    "wiki_page" => EventKind::WikiPage,
    "Pipeline Hook" => EventKind::Pipeline,
    "pipeline" => EventKind::Pipeline,
    "Job Hook" => EventKind::Job,
    "build" => EventKind::Job,
    "Deployment Hook" => EventKind::Deployment,
    "deployment" => EventKind::Deployment,
    "Release Hook" => EventKind::Release,
    "release" => EventKind::Release,
    "Subgroup Hook" => EventKind::Subgroup,
    "subgroup" => EventKind::Subgroup,
    "Feature Flag Hook" => EventKind::FeatureFlag,
    "feature_flag" => EventKind::FeatureFlag,
    "Member Hook" => EventKind::Member,
    "member" => EventKind::Member,
    "Emoji Hook" => EventKind::Emoji,
    "emoji" => EventKind::Emoji,
    "Resource Access Token Hook" => EventKind::ResourceAccessToken,
    "access_token" => EventKind::ResourceAccessToken,
};

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [EventKind; 17] = [
        Self::Push,
        Self::TagPush,
        Self::Issue,
        Self::ConfidentialIssue,
        Self::Note,
        Self::ConfidentialNote,
        Self::MergeRequest,
        Self::WikiPage,
        Self::Pipeline,
        Self::Job,
        Self::Deployment,
        Self::Release,
        Self::Subgroup,
        Self::FeatureFlag,
        Self::Member,
        Self::Emoji,
        Self::ResourceAccessToken,
    ];

    /// Resolve either spelling (`"Push Hook"` or `"push"`).
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        SPELLINGS.get(spelling.trim()).copied()
    }

    /// The short identifier, e.g. `"merge_request"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::TagPush => "tag_push",
            Self::Issue => "issue",
            Self::ConfidentialIssue => "confidential_issue",
            Self::Note => "note",
            Self::ConfidentialNote => "confidential_note",
            Self::MergeRequest => "merge_request",
            Self::WikiPage => "wiki_page",
            Self::Pipeline => "pipeline",
            Self::Job => "build",
            Self::Deployment => "deployment",
            Self::Release => "release",
            Self::Subgroup => "subgroup",
            Self::FeatureFlag => "feature_flag",
            Self::Member => "member",
            Self::Emoji => "emoji",
            Self::ResourceAccessToken => "access_token",
        }
    }

    /// The value GitLab sends in `X-Gitlab-Event`, e.g. `"Merge Request Hook"`.
    pub const fn header_value(&self) -> &'static str {
        match self {
            Self::Push => "Push Hook",
            Self::TagPush => "Tag Push Hook",
            Self::Issue => "Issue Hook",
            Self::ConfidentialIssue => "Confidential Issue Hook",
            Self::Note => "Note Hook",
            Self::ConfidentialNote => "Confidential Note Hook",
            Self::MergeRequest => "Merge Request Hook",
            Self::WikiPage => "Wiki Page Hook",
            Self::Pipeline => "Pipeline Hook",
            Self::Job => "Job Hook",
            Self::Deployment => "Deployment Hook",
            Self::Release => "Release Hook",
            Self::Subgroup => "Subgroup Hook",
            Self::FeatureFlag => "Feature Flag Hook",
            Self::Member => "Member Hook",
            Self::Emoji => "Emoji Hook",
            Self::ResourceAccessToken => "Resource Access Token Hook",
        }
    }

    /// The capability whose listeners observe this kind.
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Push => Capability::Push,
            Self::TagPush => Capability::TagPush,
            Self::Issue | Self::ConfidentialIssue => Capability::Issue,
            Self::Note | Self::ConfidentialNote => Capability::Comment,
            Self::MergeRequest => Capability::MergeRequest,
            Self::WikiPage => Capability::WikiPage,
            Self::Pipeline => Capability::Pipeline,
            Self::Job => Capability::Build,
            Self::Deployment => Capability::Deployment,
            Self::Release => Capability::Release,
            Self::Subgroup => Capability::Subgroup,
            Self::FeatureFlag => Capability::FeatureFlag,
            Self::Member => Capability::Member,
            Self::Emoji => Capability::Emoji,
            Self::ResourceAccessToken => Capability::AccessToken,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_spelling(s).ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

impl TryFrom<String> for EventKind {
    type Error = UnknownEventKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventKind> for &'static str {
    fn from(kind: EventKind) -> Self {
        kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_resolves_from_both_spellings() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_spelling(kind.as_str()), Some(kind));
            assert_eq!(EventKind::from_spelling(kind.header_value()), Some(kind));
        }
    }

    #[test]
    fn spellings_are_not_shared_between_kinds() {
        let mut seen = HashSet::new();
        for kind in EventKind::ALL {
            assert!(seen.insert(kind.as_str()), "duplicate identifier {kind}");
            assert!(seen.insert(kind.header_value()), "duplicate header {kind}");
        }
        assert_eq!(seen.len(), SPELLINGS.len());
    }

    #[test]
    fn unknown_spellings_are_rejected() {
        assert_eq!(EventKind::from_spelling("System Hook"), None);
        assert_eq!(EventKind::from_spelling("PUSH"), None);
        assert_eq!(EventKind::from_spelling(""), None);

        let err = "Pushed Hook".parse::<EventKind>().unwrap_err();
        assert_eq!(err.0, "Pushed Hook");
    }

    #[test]
    fn whitespace_around_spelling_is_ignored() {
        assert_eq!(EventKind::from_spelling("  Push Hook "), Some(EventKind::Push));
    }

    #[test]
    fn confidential_kinds_share_a_capability() {
        assert_eq!(
            EventKind::ConfidentialIssue.capability(),
            EventKind::Issue.capability()
        );
        assert_eq!(
            EventKind::ConfidentialNote.capability(),
            Capability::Comment
        );
        assert_eq!(EventKind::Job.capability(), Capability::Build);
    }

    #[test]
    fn serde_uses_short_identifier() {
        let json = serde_json::to_string(&EventKind::WikiPage).unwrap();
        assert_eq!(json, "\"wiki_page\"");

        let kind: EventKind = serde_json::from_str("\"Pipeline Hook\"").unwrap();
        assert_eq!(kind, EventKind::Pipeline);

        assert!(serde_json::from_str::<EventKind>("\"nope\"").is_err());
    }
}
