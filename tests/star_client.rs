// Integration tests for the star action against a local mock of the texts
// site. The mock records every request so the tests can assert the exact
// wire contract: one POST to /texts/{id}/star per click, CSRF header
// attached, icon mutated only on success.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use stardeck::client::{StarClient, StarOutcome, CSRF_HEADER};
use stardeck::events::UiEvent;
use stardeck::handler::{run_star_worker, InteractionHandler};
use stardeck::page::{EMPTY_STAR_CLASS, FILLED_STAR_CLASS};

/// One request as seen by the mock site.
#[derive(Debug, Clone)]
struct RecordedRequest {
    text_id: String,
    csrf_token: Option<String>,
}

#[derive(Clone)]
struct MockSite {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
}

impl MockSite {
    fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn star_route(
    State(site): State<MockSite>,
    Path(text_id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    site.requests.lock().unwrap().push(RecordedRequest {
        text_id,
        csrf_token: headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });
    site.status
}

/// Start a mock texts site on an ephemeral port, answering every star
/// request with the given status.
async fn spawn_mock_site(status: StatusCode) -> (String, MockSite) {
    let site = MockSite {
        requests: Arc::new(Mutex::new(Vec::new())),
        status,
    };
    let app = Router::new()
        .route("/texts/:text_id/star", post(star_route))
        .with_state(site.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), site)
}

#[tokio::test]
async fn star_posts_exact_path_and_csrf_header() {
    let (base_url, site) = spawn_mock_site(StatusCode::OK).await;
    let client = StarClient::new(&base_url, "abc123").unwrap();

    let outcome = client.star("42").await.unwrap();
    assert_eq!(outcome, StarOutcome::Starred);

    let requests = site.recorded();
    assert_eq!(requests.len(), 1, "exactly one request per star call");
    assert_eq!(requests[0].text_id, "42");
    assert_eq!(requests[0].csrf_token.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn created_status_also_counts_as_starred() {
    // Any 2xx is success; the body is never inspected
    let (base_url, _site) = spawn_mock_site(StatusCode::CREATED).await;
    let client = StarClient::new(&base_url, "tok").unwrap();

    let outcome = client.star("7").await.unwrap();
    assert!(outcome.is_starred());
}

#[tokio::test]
async fn server_error_is_a_rejection_not_an_err() {
    let (base_url, site) = spawn_mock_site(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = StarClient::new(&base_url, "tok").unwrap();

    let outcome = client.star("42").await.unwrap();
    assert_eq!(
        outcome,
        StarOutcome::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR
        }
    );
    // The request was still issued (failure handling happens client-side)
    assert_eq!(site.recorded().len(), 1);
}

#[tokio::test]
async fn connection_failure_surfaces_as_err() {
    // Nothing listens on port 1
    let client = StarClient::new("http://127.0.0.1:1", "tok").unwrap();
    assert!(client.star("42").await.is_err());
}

/// Drive the full click path: handler -> worker -> mock site -> UiEvent,
/// applying resolutions back to the star control the way the TUI does.
async fn click_and_resolve(
    status: StatusCode,
    clicks: usize,
) -> (MockSite, InteractionHandler, Vec<UiEvent>) {
    let (base_url, site) = spawn_mock_site(status).await;
    let client = StarClient::new(&base_url, "abc123").unwrap();

    let (star_tx, star_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(64);
    tokio::spawn(run_star_worker(client, star_rx, ui_tx, false));

    let mut handler = InteractionHandler::new("42", star_tx);
    for _ in 0..clicks {
        handler.on_star_click();
    }

    // Each click produces a StarRequested and a StarResolved
    let mut events = Vec::new();
    for _ in 0..clicks * 2 {
        let event = tokio::time::timeout(Duration::from_secs(5), ui_rx.recv())
            .await
            .expect("worker should report within the timeout")
            .expect("worker channel closed early");
        if let UiEvent::StarResolved { starred, .. } = &event {
            handler.on_star_resolved(*starred);
        }
        events.push(event);
    }

    (site, handler, events)
}

#[tokio::test]
async fn click_fills_icon_after_success() {
    let (site, handler, _events) = click_and_resolve(StatusCode::OK, 1).await;

    assert_eq!(site.recorded().len(), 1);
    assert!(handler.star.icon_classes.contains(FILLED_STAR_CLASS));
    assert!(!handler.star.icon_classes.contains(EMPTY_STAR_CLASS));
}

#[tokio::test]
async fn click_leaves_icon_unchanged_after_failure() {
    let (site, handler, _events) = click_and_resolve(StatusCode::INTERNAL_SERVER_ERROR, 1).await;

    assert_eq!(site.recorded().len(), 1);
    assert!(handler.star.icon_classes.contains(EMPTY_STAR_CLASS));
    assert!(!handler.star.icon_classes.contains(FILLED_STAR_CLASS));
}

#[tokio::test]
async fn rapid_clicks_issue_independent_requests_and_end_filled() {
    // Two clicks before either response lands: two concurrent requests,
    // unordered responses, idempotent end state
    let (site, handler, events) = click_and_resolve(StatusCode::OK, 2).await;

    assert_eq!(site.recorded().len(), 2, "no debounce, no deduplication");
    assert!(handler.star.is_starred());
    assert_eq!(handler.star.icon_classes.len(), 1);

    let resolved = events
        .iter()
        .filter(|e| matches!(e, UiEvent::StarResolved { starred: true, .. }))
        .count();
    assert_eq!(resolved, 2);
}
