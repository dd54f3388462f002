mod common;

use common::{
    COMMIT_COMMENT, DEPLOYMENT_SUCCESS, JOB_FAILED, MERGE_REQUEST_OPEN, PIPELINE_SUCCESS, PUSH_FULL,
    PUSH_MAIN, PushAndPipeline, Silent, UntouchableBody, post, webhook_request,
};
use http::{HeaderValue, Method};
use labhook::{
    Capability, DispatchContext, DispatchError, Dispatcher, Event, EventKind, decode,
    event::NoteTarget,
    testing::{CallJournal, RecordingListener},
    verify_token,
};

#[tokio::test]
async fn authenticated_push_reaches_listener() {
    let recorder = RecordingListener::new("recorder");
    let dispatcher = Dispatcher::builder()
        .secret("s3cr3t")
        .subscribe(EventKind::Push)
        .register(recorder.clone())
        .build();

    dispatcher
        .dispatch_request(post("push", Some("s3cr3t"), PUSH_MAIN), DispatchContext::new())
        .await
        .unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].capability, Capability::Push);
    assert_eq!(calls[0].payload["ref"], "refs/heads/main");
}

#[tokio::test]
async fn unsubscribed_kind_invokes_nobody() {
    let recorder = RecordingListener::new("recorder");
    let dispatcher = Dispatcher::builder()
        .subscribe(EventKind::Push)
        .register(recorder.clone())
        .build();

    let error = dispatcher
        .dispatch_request(post("wiki_page", None, "{}"), DispatchContext::new())
        .await
        .unwrap_err();

    assert!(matches!(error, DispatchError::EventNotSubscribed(EventKind::WikiPage)));
    assert!(error.is_pipeline_error());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn wrong_token_fails_before_body_is_read() {
    let recorder = RecordingListener::new("recorder");
    let dispatcher = Dispatcher::builder()
        .secret("s3cr3t")
        .subscribe(EventKind::Push)
        .register(recorder.clone())
        .build();

    let request = webhook_request(Method::POST, Some("push"), Some("wrong"), UntouchableBody);
    let error = dispatcher
        .dispatch_request(request, DispatchContext::new())
        .await
        .unwrap_err();

    assert!(matches!(error, DispatchError::AuthenticationFailed));
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn utf8_secret_matching_token_is_accepted() {
    let recorder = RecordingListener::new("recorder");
    let dispatcher = Dispatcher::builder()
        .secret("sécret")
        .subscribe(EventKind::Push)
        .register(recorder.clone())
        .build();

    let mut request = post("Push Hook", None, PUSH_MAIN);
    request.headers_mut().insert(
        "X-Gitlab-Token",
        HeaderValue::from_bytes("sécret".as_bytes()).unwrap(),
    );
    dispatcher
        .dispatch_request(request, DispatchContext::new())
        .await
        .unwrap();
    assert_eq!(recorder.count(), 1);

    let mut ascii_lookalike = post("Push Hook", None, PUSH_MAIN);
    ascii_lookalike
        .headers_mut()
        .insert("X-Gitlab-Token", HeaderValue::from_static("secret"));
    let error = dispatcher
        .dispatch_request(ascii_lookalike, DispatchContext::new())
        .await
        .unwrap_err();
    assert!(matches!(error, DispatchError::AuthenticationFailed));
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn classification_failures_do_not_read_body() {
    let dispatcher = Dispatcher::builder().subscribe(EventKind::Push).build();

    let missing = webhook_request(Method::POST, None, None, UntouchableBody);
    let unknown = webhook_request(Method::POST, Some("System Hook"), None, UntouchableBody);

    assert!(matches!(
        dispatcher.dispatch_request(missing, DispatchContext::new()).await,
        Err(DispatchError::MissingEventHeader)
    ));
    assert!(matches!(
        dispatcher.dispatch_request(unknown, DispatchContext::new()).await,
        Err(DispatchError::UnsupportedEventKind(header)) if header == "System Hook"
    ));
}

#[test]
fn verification_succeeds_iff_secret_empty_or_equal() {
    let secrets = ["", "s3cr3t", "other", "sécret"];
    let tokens = [None, Some(""), Some("s3cr3t"), Some("other"), Some("s3cr3t\n"), Some("sécret"), Some("secret")];

    for secret in secrets {
        for token in tokens {
            let expected = secret.is_empty() || token == Some(secret);
            assert_eq!(
                verify_token(secret, token.map(str::as_bytes)).is_ok(),
                expected,
                "secret {secret:?}, token {token:?}"
            );
        }
    }
}

#[tokio::test]
async fn multi_capability_listener_invoked_once_per_matching_event() {
    let listener = PushAndPipeline::default();
    let dispatcher = Dispatcher::builder()
        .subscriptions([EventKind::Push, EventKind::Pipeline, EventKind::Note])
        .register(listener.clone())
        .build();

    dispatcher
        .dispatch_request(post("Push Hook", None, PUSH_FULL), DispatchContext::new())
        .await
        .unwrap();
    assert_eq!((listener.pushes(), listener.pipelines()), (1, 0));

    dispatcher
        .dispatch_request(post("Pipeline Hook", None, PIPELINE_SUCCESS), DispatchContext::new())
        .await
        .unwrap();
    assert_eq!((listener.pushes(), listener.pipelines()), (1, 1));

    dispatcher
        .dispatch_request(post("Note Hook", None, COMMIT_COMMENT), DispatchContext::new())
        .await
        .unwrap();
    assert_eq!((listener.pushes(), listener.pipelines()), (1, 1));
}

#[tokio::test]
async fn first_failure_does_not_starve_second_listener() {
    let journal = CallJournal::new();
    let failing = RecordingListener::new("notifier").failing("smtp down").with_journal(&journal);
    let metrics = RecordingListener::new("metrics").with_journal(&journal);
    let dispatcher = Dispatcher::builder()
        .subscribe(EventKind::MergeRequest)
        .register(failing)
        .register(metrics.clone())
        .build();

    let error = dispatcher
        .dispatch_request(
            post("Merge Request Hook", None, MERGE_REQUEST_OPEN),
            DispatchContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(journal.entries(), ["notifier", "metrics"]);
    assert_eq!(metrics.count(), 1);

    let failures = error.listener_errors();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].listener, "notifier");
    assert_eq!(failures[0].capability, Capability::MergeRequest);
    assert_eq!(failures[0].kind, EventKind::MergeRequest);
    assert_eq!(failures[0].source.to_string(), "smtp down");
    assert!(!error.is_pipeline_error());
}

#[tokio::test]
async fn aggregate_lists_every_failure_in_order() {
    let dispatcher = Dispatcher::builder()
        .subscribe(EventKind::Job)
        .register(RecordingListener::new("a").failing("first"))
        .register(RecordingListener::new("b"))
        .register(RecordingListener::new("c").failing("second"))
        .build();

    let error = dispatcher
        .dispatch_request(post("Job Hook", None, JOB_FAILED), DispatchContext::new())
        .await
        .unwrap_err();

    let DispatchError::Listeners(failures) = &error else {
        panic!("unexpected {error:?}");
    };
    let who: Vec<_> = failures.iter().map(|f| (f.listener.as_str(), f.capability)).collect();
    assert_eq!(who, [("a", Capability::Build), ("c", Capability::Build)]);

    let message = error.to_string();
    assert!(message.contains("first"), "{message}");
    assert!(message.contains("second"), "{message}");
}

#[tokio::test]
async fn classified_but_unobserved_event_succeeds() {
    let dispatcher = Dispatcher::builder()
        .subscribe(EventKind::Deployment)
        .register(PushAndPipeline::default())
        .register(Silent)
        .build();

    dispatcher
        .dispatch_request(post("Deployment Hook", None, DEPLOYMENT_SUCCESS), DispatchContext::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn malformed_body_invokes_nobody() {
    let recorder = RecordingListener::new("recorder");
    let dispatcher = Dispatcher::builder()
        .subscribe(EventKind::Push)
        .register(recorder.clone())
        .build();

    let error = dispatcher
        .dispatch_request(post("push", None, r#"{"ref": "refs/heads/ma"#), DispatchContext::new())
        .await
        .unwrap_err();

    assert!(matches!(error, DispatchError::PayloadDecode { kind: EventKind::Push, .. }));
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn confidential_kinds_share_capability() {
    let recorder = RecordingListener::new("recorder").failing("nope");
    let dispatcher = Dispatcher::builder()
        .subscriptions([EventKind::ConfidentialIssue, EventKind::ConfidentialNote])
        .register(recorder.clone())
        .build();

    let error = dispatcher
        .dispatch_request(
            post("Confidential Issue Hook", None, r#"{"object_attributes": {"iid": 1}}"#),
            DispatchContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(error.listener_errors()[0].kind, EventKind::ConfidentialIssue);
    assert_eq!(error.listener_errors()[0].capability, Capability::Issue);
    assert_eq!(recorder.calls_for(Capability::Issue).len(), 1);
}

#[test]
fn sample_payloads_round_trip() {
    let samples = [
        (EventKind::Push, PUSH_FULL),
        (EventKind::MergeRequest, MERGE_REQUEST_OPEN),
        (EventKind::Pipeline, PIPELINE_SUCCESS),
        (EventKind::Note, COMMIT_COMMENT),
        (EventKind::Job, JOB_FAILED),
        (EventKind::Deployment, DEPLOYMENT_SUCCESS),
    ];

    for (kind, body) in samples {
        let decoded = decode(kind, body.as_bytes()).unwrap();
        assert_eq!(decoded.kind(), kind);

        let encoded = serde_json::to_vec(&decoded.to_json().unwrap()).unwrap();
        let again = decode(kind, &encoded).unwrap();
        assert_eq!(decoded, again, "{kind} did not round-trip");
    }
}

#[test]
fn decoded_fields_match_sample() {
    let Event::Push(push) = decode(EventKind::Push, PUSH_FULL.as_bytes()).unwrap() else {
        panic!("expected push");
    };
    assert_eq!(push.branch(), Some("master"));
    assert_eq!(push.total_commits_count, 4);
    assert_eq!(push.commits[0].author.name, "Jordi Mallach");
    assert_eq!(push.project.path_with_namespace, "mike/diaspora");
    assert!(push.commits[0].timestamp.is_some());

    let Event::Note(note) = decode(EventKind::Note, COMMIT_COMMENT.as_bytes()).unwrap() else {
        panic!("expected note");
    };
    assert!(matches!(note.target(), NoteTarget::Commit(Some(commit)) if commit.id.starts_with("cfe32cf6")));

    let Event::MergeRequest(mr) = decode(EventKind::MergeRequest, MERGE_REQUEST_OPEN.as_bytes()).unwrap() else {
        panic!("expected merge request");
    };
    assert_eq!(mr.labels.len(), 1);
    assert_eq!(mr.labels[0].color, "#ffffff");
    assert_eq!(mr.object_attributes.source_branch, "ms-viewport");
    assert!(mr.changes.contains_key("updated_at"));

    let Event::Job(job) = decode(EventKind::Job, JOB_FAILED.as_bytes()).unwrap() else {
        panic!("expected job");
    };
    assert!(job.is_finished());
    assert!(job.build_finished_at.is_none());
}
