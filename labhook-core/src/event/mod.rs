//! Typed webhook payloads.
//!
//! Each schema only insists on the fields that identify the event; everything
//! else defaults when absent, so older and newer GitLab releases decode alike.
//! Unknown fields are ignored.

mod ci;
mod common;
mod group;
mod issue;
mod merge_request;
mod note;
mod project;
mod push;
pub mod time;

pub use ci::{
    DeploymentEvent, JobCommit, JobEvent, PipelineAttributes, PipelineEvent, PipelineJob,
    PipelineMergeRequest,
};
pub use common::{
    Change, Changes, Commit, CommitAuthor, Environment, Group, Label, Project, Repository, Runner,
    User,
};
pub use group::{MemberEvent, SubgroupEvent};
pub use issue::{IssueAttributes, IssueEvent};
pub use merge_request::{MergeRequestAttributes, MergeRequestEvent};
pub use note::{NoteAttributes, NoteEvent, NoteTarget, Snippet};
pub use project::{
    AccessTokenAttributes, AccessTokenEvent, EmojiAttributes, EmojiEvent, FeatureFlagAttributes,
    FeatureFlagEvent, ReleaseAssets, ReleaseEvent, ReleaseLink, ReleaseSource, Wiki,
    WikiPageAttributes, WikiPageEvent,
};
pub use push::{PushEvent, TagPushEvent};

use crate::{Capability, EventKind};

/// A decoded webhook payload, tagged by the kind it was announced as.
///
/// Confidential issues and notes keep their own variants so listeners can
/// tell them apart, but carry the same schema as their public counterparts.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Event {
    Push(PushEvent),
    TagPush(TagPushEvent),
    Issue(IssueEvent),
    ConfidentialIssue(IssueEvent),
    Note(NoteEvent),
    ConfidentialNote(NoteEvent),
    MergeRequest(MergeRequestEvent),
    WikiPage(WikiPageEvent),
    Pipeline(PipelineEvent),
    Job(JobEvent),
    Deployment(DeploymentEvent),
    Release(ReleaseEvent),
    Subgroup(SubgroupEvent),
    FeatureFlag(FeatureFlagEvent),
    Member(MemberEvent),
    Emoji(EmojiEvent),
    ResourceAccessToken(AccessTokenEvent),
}

impl Event {
    /// The kind this payload was announced as.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Push(_) => EventKind::Push,
            Self::TagPush(_) => EventKind::TagPush,
            Self::Issue(_) => EventKind::Issue,
            Self::ConfidentialIssue(_) => EventKind::ConfidentialIssue,
            Self::Note(_) => EventKind::Note,
            Self::ConfidentialNote(_) => EventKind::ConfidentialNote,
            Self::MergeRequest(_) => EventKind::MergeRequest,
            Self::WikiPage(_) => EventKind::WikiPage,
            Self::Pipeline(_) => EventKind::Pipeline,
            Self::Job(_) => EventKind::Job,
            Self::Deployment(_) => EventKind::Deployment,
            Self::Release(_) => EventKind::Release,
            Self::Subgroup(_) => EventKind::Subgroup,
            Self::FeatureFlag(_) => EventKind::FeatureFlag,
            Self::Member(_) => EventKind::Member,
            Self::Emoji(_) => EventKind::Emoji,
            Self::ResourceAccessToken(_) => EventKind::ResourceAccessToken,
        }
    }

    /// The capability whose listeners receive this payload.
    pub const fn capability(&self) -> Capability {
        self.kind().capability()
    }

    /// Re-encode the payload as JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Push(e) => serde_json::to_value(e),
            Self::TagPush(e) => serde_json::to_value(e),
            Self::Issue(e) | Self::ConfidentialIssue(e) => serde_json::to_value(e),
            Self::Note(e) | Self::ConfidentialNote(e) => serde_json::to_value(e),
            Self::MergeRequest(e) => serde_json::to_value(e),
            Self::WikiPage(e) => serde_json::to_value(e),
            Self::Pipeline(e) => serde_json::to_value(e),
            Self::Job(e) => serde_json::to_value(e),
            Self::Deployment(e) => serde_json::to_value(e),
            Self::Release(e) => serde_json::to_value(e),
            Self::Subgroup(e) => serde_json::to_value(e),
            Self::FeatureFlag(e) => serde_json::to_value(e),
            Self::Member(e) => serde_json::to_value(e),
            Self::Emoji(e) => serde_json::to_value(e),
            Self::ResourceAccessToken(e) => serde_json::to_value(e),
        }
    }
}
