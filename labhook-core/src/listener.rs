//! # Listeners
//!
//! A listener is one registered handler object. It may observe any number of
//! capabilities, and it says which ones explicitly: for each capability there
//! is an accessor returning the listener as a [`DynSubscriber`] of that
//! capability's payload, or `None`.
//!
//! ```rust,ignore
//! struct Metrics;
//!
//! impl Subscriber<PushEvent> for Metrics { /* ... */ }
//! impl Subscriber<PipelineEvent> for Metrics { /* ... */ }
//!
//! impl Listener for Metrics {
//!     fn push_subscriber(&self) -> Option<&dyn DynSubscriber<PushEvent>> {
//!         Some(self)
//!     }
//!     fn pipeline_subscriber(&self) -> Option<&dyn DynSubscriber<PipelineEvent>> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! `#[derive(Listener)]` writes the accessors from a `#[listener(push, pipeline)]`
//! attribute. Returning `Some(self)` only compiles when the matching
//! `Subscriber` impl exists, so a declared capability can never be missing its
//! handler.

use crate::{
    capability::{Capabilities, Capability},
    event::{
        AccessTokenEvent, DeploymentEvent, EmojiEvent, FeatureFlagEvent, IssueEvent, JobEvent,
        MemberEvent, MergeRequestEvent, NoteEvent, PipelineEvent, PushEvent, ReleaseEvent,
        SubgroupEvent, TagPushEvent, WikiPageEvent,
    },
    subscriber::DynSubscriber,
};

/// A registered handler object, polymorphic over zero or more capabilities.
///
/// A listener declaring no capability is valid; the registry accepts it and the
/// dispatcher never invokes it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Implement `Listener` by hand or with `#[derive(Listener)]`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Identity used in logs and in [`ListenerError`](crate::ListenerError).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Declares [`Capability::Push`].
    fn push_subscriber(&self) -> Option<&dyn DynSubscriber<PushEvent>> {
        None
    }

    /// Declares [`Capability::TagPush`].
    fn tag_push_subscriber(&self) -> Option<&dyn DynSubscriber<TagPushEvent>> {
        None
    }

    /// Declares [`Capability::Issue`].
    fn issue_subscriber(&self) -> Option<&dyn DynSubscriber<IssueEvent>> {
        None
    }

    /// Declares [`Capability::Comment`].
    fn comment_subscriber(&self) -> Option<&dyn DynSubscriber<NoteEvent>> {
        None
    }

    /// Declares [`Capability::MergeRequest`].
    fn merge_request_subscriber(&self) -> Option<&dyn DynSubscriber<MergeRequestEvent>> {
        None
    }

    /// Declares [`Capability::WikiPage`].
    fn wiki_page_subscriber(&self) -> Option<&dyn DynSubscriber<WikiPageEvent>> {
        None
    }

    /// Declares [`Capability::Pipeline`].
    fn pipeline_subscriber(&self) -> Option<&dyn DynSubscriber<PipelineEvent>> {
        None
    }

    /// Declares [`Capability::Build`].
    fn build_subscriber(&self) -> Option<&dyn DynSubscriber<JobEvent>> {
        None
    }

    /// Declares [`Capability::Deployment`].
    fn deployment_subscriber(&self) -> Option<&dyn DynSubscriber<DeploymentEvent>> {
        None
    }

    /// Declares [`Capability::Release`].
    fn release_subscriber(&self) -> Option<&dyn DynSubscriber<ReleaseEvent>> {
        None
    }

    /// Declares [`Capability::Subgroup`].
    fn subgroup_subscriber(&self) -> Option<&dyn DynSubscriber<SubgroupEvent>> {
        None
    }

    /// Declares [`Capability::FeatureFlag`].
    fn feature_flag_subscriber(&self) -> Option<&dyn DynSubscriber<FeatureFlagEvent>> {
        None
    }

    /// Declares [`Capability::Member`].
    fn member_subscriber(&self) -> Option<&dyn DynSubscriber<MemberEvent>> {
        None
    }

    /// Declares [`Capability::Emoji`].
    fn emoji_subscriber(&self) -> Option<&dyn DynSubscriber<EmojiEvent>> {
        None
    }

    /// Declares [`Capability::AccessToken`].
    fn access_token_subscriber(&self) -> Option<&dyn DynSubscriber<AccessTokenEvent>> {
        None
    }

    /// Whether this listener declares `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Push => self.push_subscriber().is_some(),
            Capability::TagPush => self.tag_push_subscriber().is_some(),
            Capability::Issue => self.issue_subscriber().is_some(),
            Capability::Comment => self.comment_subscriber().is_some(),
            Capability::MergeRequest => self.merge_request_subscriber().is_some(),
            Capability::WikiPage => self.wiki_page_subscriber().is_some(),
            Capability::Pipeline => self.pipeline_subscriber().is_some(),
            Capability::Build => self.build_subscriber().is_some(),
            Capability::Deployment => self.deployment_subscriber().is_some(),
            Capability::Release => self.release_subscriber().is_some(),
            Capability::Subgroup => self.subgroup_subscriber().is_some(),
            Capability::FeatureFlag => self.feature_flag_subscriber().is_some(),
            Capability::Member => self.member_subscriber().is_some(),
            Capability::Emoji => self.emoji_subscriber().is_some(),
            Capability::AccessToken => self.access_token_subscriber().is_some(),
        }
    }

    /// The full set of declared capabilities.
    fn capabilities(&self) -> Capabilities {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.supports(*capability))
            .collect()
    }
}
