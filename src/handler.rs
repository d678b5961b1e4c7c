// Interaction handler - binds the page controls to their effects
//
// The handler owns explicit references to both controls, obtained once at
// startup (no ambient element lookup). Hover is a synchronous event-to-effect
// mapping. A star click only enqueues a request and returns; the star worker
// performs the network call off the UI loop and reports back as a UiEvent.

use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::client::{StarClient, StarOutcome};
use crate::events::UiEvent;
use crate::page::{HoverControl, StarControl};

/// A queued star action for the worker.
#[derive(Debug, Clone)]
pub struct StarRequest {
    pub text_id: String,
}

/// Binds the flag and star controls and dispatches their events.
pub struct InteractionHandler {
    pub flag: HoverControl,
    pub star: StarControl,
    star_tx: mpsc::Sender<StarRequest>,
}

impl InteractionHandler {
    pub fn new(text_id: impl Into<String>, star_tx: mpsc::Sender<StarRequest>) -> Self {
        Self {
            flag: HoverControl::new(),
            star: StarControl::new(text_id),
            star_tx,
        }
    }

    /// Pointer entered the flag control.
    pub fn on_pointer_enter(&mut self) {
        self.flag.pointer_enter();
    }

    /// Pointer left the flag control.
    pub fn on_pointer_leave(&mut self) {
        self.flag.pointer_leave();
    }

    /// Click on the star control.
    ///
    /// Enqueues one request and returns immediately. There is deliberately no
    /// debounce and no disabling of the control while a request is in flight:
    /// rapid clicks produce multiple concurrent requests with no ordering
    /// guarantee between their responses.
    pub fn on_star_click(&mut self) {
        let request = StarRequest {
            text_id: self.star.text_id.clone(),
        };
        if self.star_tx.try_send(request).is_err() {
            // Worker gone or queue saturated; the click is lost, which the
            // user observes the same way as a failed request.
            tracing::warn!("Star request dropped: worker queue unavailable");
        }
    }

    /// Completion continuation for a star request.
    ///
    /// Success applies the one-way icon transition. Failure leaves the icon
    /// exactly as it was; nothing is shown to the user.
    pub fn on_star_resolved(&mut self, starred: bool) {
        if starred {
            self.star.mark_starred();
        }
    }
}

/// Star worker: drains queued requests and runs each as its own task.
///
/// Spawning per request keeps concurrent clicks concurrent; the receiver loop
/// never waits on the network. The worker exits when all click senders are
/// dropped.
pub async fn run_star_worker(
    client: StarClient,
    mut star_rx: mpsc::Receiver<StarRequest>,
    ui_tx: mpsc::Sender<UiEvent>,
    demo_mode: bool,
) {
    while let Some(request) = star_rx.recv().await {
        let client = client.clone();
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            let _ = ui_tx
                .send(UiEvent::StarRequested {
                    text_id: request.text_id.clone(),
                    timestamp: Utc::now(),
                })
                .await;

            let start = Instant::now();
            let outcome = if demo_mode {
                crate::demo::resolve_star(&request.text_id).await
            } else {
                client.star(&request.text_id).await
            };
            let duration = start.elapsed();

            let (starred, status) = match outcome {
                Ok(StarOutcome::Starred) => {
                    tracing::debug!("Star request for text {} done", request.text_id);
                    (true, None)
                }
                Ok(StarOutcome::Rejected { status }) => {
                    tracing::debug!(
                        "Star request for text {} failed: {}",
                        request.text_id,
                        status
                    );
                    (false, Some(status.as_u16()))
                }
                Err(e) => {
                    tracing::debug!("Star request for text {} failed: {:#}", request.text_id, e);
                    (false, None)
                }
            };

            let _ = ui_tx
                .send(UiEvent::StarResolved {
                    text_id: request.text_id,
                    timestamp: Utc::now(),
                    starred,
                    status,
                    duration,
                })
                .await;
        });
    }

    tracing::debug!("Star worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{EMPTY_STAR_CLASS, FILLED_STAR_CLASS};

    #[tokio::test]
    async fn test_click_enqueues_exactly_one_request() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);

        handler.on_star_click();

        let request = rx.recv().await.unwrap();
        assert_eq!(request.text_id, "42");
        assert!(rx.try_recv().is_err(), "only one request per click");
    }

    #[tokio::test]
    async fn test_rapid_clicks_enqueue_independent_requests() {
        // No debounce: two clicks before any response means two requests
        let (tx, mut rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);

        handler.on_star_click();
        handler.on_star_click();

        assert_eq!(rx.recv().await.unwrap().text_id, "42");
        assert_eq!(rx.recv().await.unwrap().text_id, "42");
    }

    #[tokio::test]
    async fn test_resolution_success_fills_icon() {
        let (tx, _rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);

        handler.on_star_resolved(true);
        assert!(handler.star.is_starred());
    }

    #[tokio::test]
    async fn test_resolution_failure_leaves_icon_unchanged() {
        let (tx, _rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);
        let before = handler.star.icon_classes.clone();

        handler.on_star_resolved(false);

        assert_eq!(handler.star.icon_classes, before);
        assert!(handler.star.icon_classes.contains(EMPTY_STAR_CLASS));
        assert!(!handler.star.icon_classes.contains(FILLED_STAR_CLASS));
    }

    #[tokio::test]
    async fn test_interleaved_successes_end_filled() {
        // Whatever order concurrent responses land in, one success is enough
        let (tx, _rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);

        handler.on_star_resolved(false);
        handler.on_star_resolved(true);
        handler.on_star_resolved(true); // late duplicate success
        assert!(handler.star.is_starred());
        assert_eq!(handler.star.icon_classes.len(), 1);
    }

    #[tokio::test]
    async fn test_hover_toggles_through_handler() {
        let (tx, _rx) = mpsc::channel(16);
        let mut handler = InteractionHandler::new("42", tx);

        handler.on_pointer_enter();
        assert!(handler.flag.is_highlighted());
        handler.on_pointer_leave();
        assert!(!handler.flag.is_highlighted());
    }
}
