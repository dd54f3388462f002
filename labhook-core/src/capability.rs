//! Capabilities: the named contracts a listener can implement.

use crate::kind::EventKind;
use std::fmt;

/// A family of events a listener can subscribe to.
///
/// Each capability corresponds to one payload type and to one or more
/// [`EventKind`]s (confidential issues and notes share their public
/// counterpart's capability).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Branch pushes.
    Push,
    /// Tag pushes.
    TagPush,
    /// Issues, confidential or not.
    Issue,
    /// Comments on commits, merge requests, issues and snippets.
    Comment,
    /// Merge requests.
    MergeRequest,
    /// Wiki pages.
    WikiPage,
    /// Pipelines.
    Pipeline,
    /// Jobs (GitLab still calls them builds on the wire).
    Build,
    /// Deployments.
    Deployment,
    /// Releases.
    Release,
    /// Subgroups.
    Subgroup,
    /// Feature flags.
    FeatureFlag,
    /// Group members.
    Member,
    /// Emoji reactions.
    Emoji,
    /// Expiring project and group access tokens.
    AccessToken,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 15] = [
        Self::Push,
        Self::TagPush,
        Self::Issue,
        Self::Comment,
        Self::MergeRequest,
        Self::WikiPage,
        Self::Pipeline,
        Self::Build,
        Self::Deployment,
        Self::Release,
        Self::Subgroup,
        Self::FeatureFlag,
        Self::Member,
        Self::Emoji,
        Self::AccessToken,
    ];

    /// A stable name such as `"build-events"`, used in logs and diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push-events",
            Self::TagPush => "tag-push-events",
            Self::Issue => "issue-events",
            Self::Comment => "comment-events",
            Self::MergeRequest => "merge-request-events",
            Self::WikiPage => "wiki-page-events",
            Self::Pipeline => "pipeline-events",
            Self::Build => "build-events",
            Self::Deployment => "deployment-events",
            Self::Release => "release-events",
            Self::Subgroup => "subgroup-events",
            Self::FeatureFlag => "feature-flag-events",
            Self::Member => "member-events",
            Self::Emoji => "emoji-events",
            Self::AccessToken => "access-token-events",
        }
    }

    /// The single-bit set for this capability.
    pub const fn flag(&self) -> Capabilities {
        match self {
            Self::Push => Capabilities::PUSH,
            Self::TagPush => Capabilities::TAG_PUSH,
            Self::Issue => Capabilities::ISSUE,
            Self::Comment => Capabilities::COMMENT,
            Self::MergeRequest => Capabilities::MERGE_REQUEST,
            Self::WikiPage => Capabilities::WIKI_PAGE,
            Self::Pipeline => Capabilities::PIPELINE,
            Self::Build => Capabilities::BUILD,
            Self::Deployment => Capabilities::DEPLOYMENT,
            Self::Release => Capabilities::RELEASE,
            Self::Subgroup => Capabilities::SUBGROUP,
            Self::FeatureFlag => Capabilities::FEATURE_FLAG,
            Self::Member => Capabilities::MEMBER,
            Self::Emoji => Capabilities::EMOJI,
            Self::AccessToken => Capabilities::ACCESS_TOKEN,
        }
    }

    /// The event kinds this capability observes.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        EventKind::ALL
            .into_iter()
            .filter(move |kind| kind.capability() == *self)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// A set of capabilities, as declared by a [`Listener`](crate::Listener).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// See [`Capability::Push`].
        const PUSH = 1 << 0;
        /// See [`Capability::TagPush`].
        const TAG_PUSH = 1 << 1;
        /// See [`Capability::Issue`].
        const ISSUE = 1 << 2;
        /// See [`Capability::Comment`].
        const COMMENT = 1 << 3;
        /// See [`Capability::MergeRequest`].
        const MERGE_REQUEST = 1 << 4;
        /// See [`Capability::WikiPage`].
        const WIKI_PAGE = 1 << 5;
        /// See [`Capability::Pipeline`].
        const PIPELINE = 1 << 6;
        /// See [`Capability::Build`].
        const BUILD = 1 << 7;
        /// See [`Capability::Deployment`].
        const DEPLOYMENT = 1 << 8;
        /// See [`Capability::Release`].
        const RELEASE = 1 << 9;
        /// See [`Capability::Subgroup`].
        const SUBGROUP = 1 << 10;
        /// See [`Capability::FeatureFlag`].
        const FEATURE_FLAG = 1 << 11;
        /// See [`Capability::Member`].
        const MEMBER = 1 << 12;
        /// See [`Capability::Emoji`].
        const EMOJI = 1 << 13;
        /// See [`Capability::AccessToken`].
        const ACCESS_TOKEN = 1 << 14;
    }
}

impl Capabilities {
    /// Whether `capability` is in the set.
    pub fn has(&self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    /// The capabilities in the set, in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.has(*capability))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Capability> for Capabilities {
    fn from(capability: Capability) -> Self {
        capability.flag()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, capability| set | capability.flag())
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_str("[")?;
        for capability in self.capabilities() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            f.write_str(capability.as_str())?;
        }
        f.write_str("]")
    }
}
