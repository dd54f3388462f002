#![allow(dead_code)]

use http::{Method, Request};
use labhook::{
    BoxError, DispatchContext, DynSubscriber, Listener, Subscriber,
    event::{PipelineEvent, PushEvent},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Payload fixtures
// ============================================================================

pub const PUSH_MAIN: &str = r#"{"ref":"refs/heads/main"}"#;

pub const PUSH_FULL: &str = r#"{
    "object_kind": "push",
    "event_name": "push",
    "before": "95790bf891e76fee5e1747ab589903a6a1f80f22",
    "after": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
    "ref": "refs/heads/master",
    "ref_protected": true,
    "checkout_sha": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
    "user_id": 4,
    "user_name": "John Smith",
    "user_username": "jsmith",
    "user_email": "john@example.com",
    "project_id": 15,
    "project": {
        "id": 15,
        "name": "Diaspora",
        "web_url": "http://example.com/mike/diaspora",
        "path_with_namespace": "mike/diaspora",
        "default_branch": "master"
    },
    "commits": [
        {
            "id": "b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327",
            "message": "Update Catalan translation to e38cb41.\n\nSee https://gitlab.com/gitlab-org/gitlab for more information",
            "title": "Update Catalan translation to e38cb41.",
            "timestamp": "2011-12-12T14:27:31+02:00",
            "url": "http://example.com/mike/diaspora/commit/b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327",
            "author": {"name": "Jordi Mallach", "email": "jordi@softcatala.org"},
            "added": ["CHANGELOG"],
            "modified": ["app/controller/application.rb"],
            "removed": []
        }
    ],
    "total_commits_count": 4
}"#;

pub const MERGE_REQUEST_OPEN: &str = r##"{
    "object_kind": "merge_request",
    "event_type": "merge_request",
    "user": {"id": 1, "name": "Administrator", "username": "root"},
    "project": {"id": 1, "name": "Gitlab Test", "path_with_namespace": "gitlabhq/gitlab-test"},
    "object_attributes": {
        "id": 99,
        "iid": 1,
        "target_branch": "master",
        "source_branch": "ms-viewport",
        "title": "MS-Viewport",
        "state": "opened",
        "action": "open",
        "created_at": "2013-12-03T17:23:34Z",
        "updated_at": "2013-12-03 17:23:34 UTC",
        "url": "http://example.com/diaspora/merge_requests/1"
    },
    "labels": [{"id": 206, "title": "API", "color": "#ffffff"}],
    "changes": {"updated_at": {"previous": "2017-09-15 16:50:55 UTC", "current": "2017-09-15 16:52:00 UTC"}}
}"##;

pub const PIPELINE_SUCCESS: &str = r#"{
    "object_kind": "pipeline",
    "object_attributes": {
        "id": 31,
        "iid": 3,
        "ref": "master",
        "tag": false,
        "sha": "bcbb5ec396a2c0f828686f14fac9b80b780504f2",
        "source": "merge_request_event",
        "status": "success",
        "stages": ["build", "test", "deploy"],
        "created_at": "2016-08-12 15:23:28 UTC",
        "finished_at": "2016-08-12 15:26:29 UTC",
        "duration": 63
    },
    "builds": [
        {"id": 380, "stage": "deploy", "name": "production", "status": "skipped", "when": "manual", "manual": true}
    ]
}"#;

pub const COMMIT_COMMENT: &str = r#"{
    "object_kind": "note",
    "event_type": "note",
    "project_id": 5,
    "object_attributes": {
        "id": 1243,
        "note": "This is a commit comment. How does this work?",
        "noteable_type": "Commit",
        "commit_id": "cfe32cf61b73a0d5e9f13e774abde7ff789b1660",
        "url": "http://example.com/gitlab-org/gitlab-test/commit/cfe32cf6#note_1243"
    },
    "commit": {
        "id": "cfe32cf61b73a0d5e9f13e774abde7ff789b1660",
        "message": "Add submodule\n",
        "timestamp": "2014-02-27T10:06:20+02:00"
    }
}"#;

pub const JOB_FAILED: &str = r#"{
    "object_kind": "build",
    "ref": "gitlab-script-trigger",
    "tag": false,
    "build_id": 1977,
    "build_name": "test",
    "build_stage": "test",
    "build_status": "failed",
    "build_created_at": "2021-02-23T02:41:37.886Z",
    "build_finished_at": null,
    "build_failure_reason": "script_failure",
    "pipeline_id": 2366,
    "project_id": 380
}"#;

pub const DEPLOYMENT_SUCCESS: &str = r#"{
    "object_kind": "deployment",
    "status": "success",
    "status_changed_at": "2021-04-28 21:50:00 +0200",
    "deployment_id": 15,
    "deployable_id": 796,
    "environment": "staging",
    "short_sha": "279484c0"
}"#;

// ============================================================================
// Requests
// ============================================================================

/// A webhook request with the given event header, token and body.
pub fn webhook_request<B>(method: Method, event: Option<&str>, token: Option<&str>, body: B) -> Request<B> {
    let mut builder = Request::builder().method(method).uri("/webhook");
    if let Some(event) = event {
        builder = builder.header("X-Gitlab-Event", event);
    }
    if let Some(token) = token {
        builder = builder.header("X-Gitlab-Token", token);
    }
    builder.body(body).unwrap()
}

/// `POST` with a JSON body.
pub fn post(event: &str, token: Option<&str>, body: &str) -> Request<Vec<u8>> {
    webhook_request(Method::POST, Some(event), token, body.as_bytes().to_vec())
}

/// A body that fails the test if anything reads it.
pub struct UntouchableBody;

impl AsRef<[u8]> for UntouchableBody {
    fn as_ref(&self) -> &[u8] {
        panic!("request body was read");
    }
}

// ============================================================================
// Listeners
// ============================================================================

/// Observes pushes and pipelines, counting each separately.
#[derive(Clone, Default)]
pub struct PushAndPipeline {
    pub pushes: Arc<AtomicUsize>,
    pub pipelines: Arc<AtomicUsize>,
}

impl PushAndPipeline {
    pub fn pushes(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }

    pub fn pipelines(&self) -> usize {
        self.pipelines.load(Ordering::SeqCst)
    }
}

impl Subscriber<PushEvent> for PushAndPipeline {
    async fn on_event(&self, _ctx: &DispatchContext, _event: &PushEvent) -> Result<(), BoxError> {
        self.pushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Subscriber<PipelineEvent> for PushAndPipeline {
    async fn on_event(&self, _ctx: &DispatchContext, _event: &PipelineEvent) -> Result<(), BoxError> {
        self.pipelines.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Listener for PushAndPipeline {
    fn name(&self) -> &str {
        "push-and-pipeline"
    }

    fn push_subscriber(&self) -> Option<&dyn DynSubscriber<PushEvent>> {
        Some(self)
    }

    fn pipeline_subscriber(&self) -> Option<&dyn DynSubscriber<PipelineEvent>> {
        Some(self)
    }
}

/// Declares nothing.
pub struct Silent;

impl Listener for Silent {}
