//! End-to-end session flows against an in-memory service

use scicopilot::notify::{Outcome, RecordingSink};
use scicopilot::selection::ToggleOutcome;
use scicopilot::session::Session;
use scicopilot::types::{Answer, UploadFile};
use std::collections::HashSet;
use std::sync::Arc;

use crate::integration::test_utils::{name_set, FakeService};

fn session(service: Arc<FakeService>, namespace: &str) -> (Session, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let session = Session::new(namespace, service, sink.clone());
    (session, sink)
}

#[tokio::test]
async fn test_upload_select_build_ask() {
    let service = Arc::new(FakeService::new());
    service.set_graph(vec![vec!["dark matter", "halo"]], vec!["What is a halo?"]);
    service.set_answer("A halo is a bound structure.");
    let (session, sink) = session(service.clone(), "physics");

    let receipt = session
        .upload(Some(&UploadFile::new("paper1.pdf", b"%PDF-1.4".to_vec())))
        .await
        .unwrap();
    assert_eq!(receipt.filename, "paper1.pdf");
    assert_eq!(receipt.namespace, "physics");
    assert_eq!(session.corpus().documents(), vec!["paper1.pdf"]);

    assert_eq!(session.toggle("paper1.pdf"), ToggleOutcome::Added);
    let artifact = session.build(false).await.unwrap();
    assert_eq!(artifact.questions, vec!["What is a halo?"]);
    assert_eq!(service.graph_requests()[0].namespace, "physics");
    assert_eq!(service.graph_requests()[0].files, vec!["paper1.pdf"]);
    assert!(!service.graph_requests()[0].use_raw_text);

    let answer = session.ask("What is a halo?").await.unwrap();
    assert_eq!(answer.as_str(), "A halo is a bound structure.");

    let messages: Vec<String> = sink.events().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Document uploaded successfully.",
            "Graph created successfully.",
            "Query successful.",
        ]
    );
}

#[tokio::test]
async fn test_selection_never_exceeds_three() {
    let service = Arc::new(FakeService::with_files(&["a", "b", "c", "d"]));
    let (session, _) = session(service.clone(), "ns");
    session.refresh().await.unwrap();

    for name in ["a", "b", "c"] {
        assert_eq!(session.toggle(name), ToggleOutcome::Added);
    }
    assert_eq!(session.toggle("d"), ToggleOutcome::AtCapacity);
    assert_eq!(session.selection().len(), 3);
    assert!(!session.is_selected("d"));

    // Freeing a slot lets the rejected name in.
    assert_eq!(session.toggle("b"), ToggleOutcome::Removed);
    assert_eq!(session.toggle("d"), ToggleOutcome::Added);
    assert_eq!(
        name_set(&session.selection().names()),
        HashSet::from(["a", "c", "d"])
    );
}

#[tokio::test]
async fn test_upload_validation_sends_nothing() {
    let service = Arc::new(FakeService::new());
    let (session, sink) = session(service.clone(), "");

    let err = session
        .upload(Some(&UploadFile::new("x.pdf", vec![1u8])))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(sink.last().unwrap().message, "Namespace is required.");

    session.set_namespace("ns");
    let err = session.upload(None).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(sink.last().unwrap().message, "File is required.");

    assert_eq!(service.calls("upload"), 0);
    assert!(service.stored().is_empty());
}

#[tokio::test]
async fn test_build_with_empty_selection_sends_nothing() {
    let service = Arc::new(FakeService::with_files(&["a"]));
    let (session, sink) = session(service.clone(), "ns");

    let err = session.build(true).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(service.calls("create_graph"), 0);
    assert_eq!(
        sink.last().unwrap().message,
        "Please select at least one document to create a graph."
    );
    assert!(session.artifact().is_none());
}

#[tokio::test]
async fn test_delete_keeps_stale_selection() {
    let service = Arc::new(FakeService::with_files(&["a.pdf", "b.pdf"]));
    let (session, sink) = session(service.clone(), "ns");
    session.refresh().await.unwrap();
    session.toggle("a.pdf");

    session.delete("a.pdf").await.unwrap();
    assert_eq!(sink.last().unwrap().message, "Document a.pdf deleted successfully.");
    assert_eq!(session.corpus().documents(), vec!["b.pdf"]);
    assert!(session.is_selected("a.pdf"));

    // The stale name is still sent; the service decides what to do with it.
    session.build(false).await.unwrap();
    assert_eq!(service.graph_requests()[0].files, vec!["a.pdf"]);
}

#[tokio::test]
async fn test_failed_delete_leaves_corpus_alone() {
    let service = Arc::new(FakeService::with_files(&["a.pdf"]));
    let (session, sink) = session(service.clone(), "ns");
    session.refresh().await.unwrap();

    let err = session.delete("missing.pdf").await.unwrap_err();
    assert!(err.is_service());
    assert_eq!(session.corpus().documents(), vec!["a.pdf"]);
    let last = sink.last().unwrap();
    assert_eq!(last.outcome, Outcome::Failure);
    assert!(last.message.starts_with("Failed to delete document:"));
    assert!(last.message.contains("missing.pdf not found"));
}

#[tokio::test]
async fn test_query_failure_overwrites_answer() {
    let service = Arc::new(FakeService::new());
    service.set_answer("first");
    let (session, sink) = session(service.clone(), "ns");

    session.ask("q1").await.unwrap();
    assert_eq!(session.answer(), Some(Answer("first".to_string())));

    service.fail("query", "graph not built");
    session.ask("q2").await.unwrap_err();
    let answer = session.answer().unwrap();
    assert!(answer.as_str().starts_with("An error occurred:"));
    assert!(answer.as_str().contains("graph not built"));
    assert!(sink.last().unwrap().message.starts_with("Failed to query graph:"));
}

#[tokio::test]
async fn test_query_forwards_empty_question() {
    let service = Arc::new(FakeService::new());
    service.set_answer("ok");
    let (session, _) = session(service.clone(), "");

    session.ask("").await.unwrap();
    let sent = &service.queries()[0];
    assert_eq!(sent.namespace, "");
    assert_eq!(sent.question, "");
}

#[tokio::test]
async fn test_failed_build_keeps_previous_artifact() {
    let service = Arc::new(FakeService::with_files(&["a"]));
    service.set_graph(vec![vec!["p"]], vec!["q"]);
    let (session, _) = session(service.clone(), "ns");
    session.toggle("a");
    let first = session.build(false).await.unwrap();

    service.fail("create_graph", "extraction failed");
    session.build(true).await.unwrap_err();
    assert_eq!(session.artifact(), Some(first));
}

#[tokio::test]
async fn test_refresh_failure_keeps_list() {
    let service = Arc::new(FakeService::with_files(&["a", "b"]));
    let (session, sink) = session(service.clone(), "ns");
    session.refresh().await.unwrap();

    service.fail("list_files", "database offline");
    session.refresh().await.unwrap_err();
    assert_eq!(session.corpus().documents(), vec!["a", "b"]);
    assert!(sink
        .last()
        .unwrap()
        .message
        .starts_with("Failed to fetch documents:"));

    service.recover("list_files");
    session.refresh().await.unwrap();
    assert_eq!(sink.last().unwrap().message, "Document list refreshed.");
}

#[tokio::test]
async fn test_upload_succeeds_when_follow_up_refresh_fails() {
    let service = Arc::new(FakeService::new());
    service.fail("list_files", "database offline");
    let (session, sink) = session(service.clone(), "ns");

    session
        .upload(Some(&UploadFile::new("a.pdf", vec![0u8; 4])))
        .await
        .unwrap();
    assert_eq!(service.stored(), vec!["a.pdf"]);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.last().unwrap().outcome, Outcome::Success);
}

#[tokio::test]
async fn test_overlapping_actions_all_land() {
    let service = Arc::new(FakeService::with_files(&["a"]));
    service.set_graph(vec![], vec!["q"]);
    service.set_answer("yes");
    let (session, sink) = session(service.clone(), "ns");
    session.toggle("a");

    let (built, answered, refreshed) =
        futures::join!(session.build(false), session.ask("?"), session.refresh());
    assert!(built.is_ok());
    assert!(answered.is_ok());
    assert!(refreshed.is_ok());
    assert_eq!(sink.len(), 3);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.origin, "fake://analysis");
    assert_eq!(snapshot.documents, vec!["a"]);
    assert!(snapshot.artifact.is_some());
    assert_eq!(snapshot.answer, Some(Answer("yes".to_string())));
}

#[tokio::test]
async fn test_build_leaves_answer_untouched() {
    let service = Arc::new(FakeService::with_files(&["a"]));
    service.set_graph(vec![vec!["p"]], vec!["q"]);
    service.set_answer("kept");
    let (session, _) = session(service.clone(), "ns");
    session.ask("?").await.unwrap();
    session.toggle("a");

    session.build(false).await.unwrap();
    assert_eq!(session.answer(), Some(Answer("kept".to_string())));

    service.fail("create_graph", "extraction failed");
    session.build(false).await.unwrap_err();
    assert_eq!(session.answer(), Some(Answer("kept".to_string())));
}
