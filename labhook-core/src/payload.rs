//! Payload trait tying each decode schema to its capability.

use crate::{
    capability::Capability,
    event::{
        AccessTokenEvent, DeploymentEvent, EmojiEvent, FeatureFlagEvent, IssueEvent, JobEvent,
        MemberEvent, MergeRequestEvent, NoteEvent, PipelineEvent, PushEvent, ReleaseEvent,
        SubgroupEvent, TagPushEvent, WikiPageEvent,
    },
    listener::Listener,
    subscriber::DynSubscriber,
};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// A decoded webhook payload.
///
/// Payloads are immutable once decoded and are handed to listeners by
/// reference. `Serialize` lets listeners forward them unchanged.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a webhook payload",
    label = "not one of the payload types in `labhook::event`",
    note = "Subscribers can only be written for the payload types the decoder produces."
)]
pub trait Payload: Sized + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The capability whose listeners receive this payload.
    const CAPABILITY: Capability;

    /// Select the listener's subscriber for this payload, if it declared one.
    fn subscriber(listener: &dyn Listener) -> Option<&dyn DynSubscriber<Self>>;
}

macro_rules! payloads {
    ($($payload:ty => $capability:ident via $accessor:ident;)*) => {
        $(
            impl Payload for $payload {
                const CAPABILITY: Capability = Capability::$capability;

                fn subscriber(listener: &dyn Listener) -> Option<&dyn DynSubscriber<Self>> {
                    listener.$accessor()
                }
            }
        )*
    };
}

payloads! {
    PushEvent => Push via push_subscriber;
    TagPushEvent => TagPush via tag_push_subscriber;
    IssueEvent => Issue via issue_subscriber;
    NoteEvent => Comment via comment_subscriber;
    MergeRequestEvent => MergeRequest via merge_request_subscriber;
    WikiPageEvent => WikiPage via wiki_page_subscriber;
    PipelineEvent => Pipeline via pipeline_subscriber;
    JobEvent => Build via build_subscriber;
    DeploymentEvent => Deployment via deployment_subscriber;
    ReleaseEvent => Release via release_subscriber;
    SubgroupEvent => Subgroup via subgroup_subscriber;
    FeatureFlagEvent => FeatureFlag via feature_flag_subscriber;
    MemberEvent => Member via member_subscriber;
    EmojiEvent => Emoji via emoji_subscriber;
    AccessTokenEvent => AccessToken via access_token_subscriber;
}
