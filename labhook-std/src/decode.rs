//! Payload Decoder.

use labhook_core::{DispatchError, Event, EventKind, Payload};

/// Decode `body` with the schema of `kind`.
///
/// Malformed or truncated JSON, trailing data and missing required fields all
/// fail with [`DispatchError::PayloadDecode`]. Unknown fields are ignored.
pub fn decode(kind: EventKind, body: &[u8]) -> Result<Event, DispatchError> {
    Ok(match kind {
        EventKind::Push => Event::Push(parse(kind, body)?),
        EventKind::TagPush => Event::TagPush(parse(kind, body)?),
        EventKind::Issue => Event::Issue(parse(kind, body)?),
        EventKind::ConfidentialIssue => Event::ConfidentialIssue(parse(kind, body)?),
        EventKind::Note => Event::Note(parse(kind, body)?),
        EventKind::ConfidentialNote => Event::ConfidentialNote(parse(kind, body)?),
        EventKind::MergeRequest => Event::MergeRequest(parse(kind, body)?),
        EventKind::WikiPage => Event::WikiPage(parse(kind, body)?),
        EventKind::Pipeline => Event::Pipeline(parse(kind, body)?),
        EventKind::Job => Event::Job(parse(kind, body)?),
        EventKind::Deployment => Event::Deployment(parse(kind, body)?),
        EventKind::Release => Event::Release(parse(kind, body)?),
        EventKind::Subgroup => Event::Subgroup(parse(kind, body)?),
        EventKind::FeatureFlag => Event::FeatureFlag(parse(kind, body)?),
        EventKind::Member => Event::Member(parse(kind, body)?),
        EventKind::Emoji => Event::Emoji(parse(kind, body)?),
        EventKind::ResourceAccessToken => Event::ResourceAccessToken(parse(kind, body)?),
    })
}

fn parse<P: Payload>(kind: EventKind, body: &[u8]) -> Result<P, DispatchError> {
    serde_json::from_slice(body).map_err(|source| DispatchError::PayloadDecode { kind, source })
}
