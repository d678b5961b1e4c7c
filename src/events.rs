// Events that flow from the star worker to the TUI
//
// The interaction handler returns immediately on a click; the worker reports
// back through these events when a request is issued and when its response
// arrives. Using an enum keeps the channel type-safe across async tasks.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// UI-facing event emitted by the star worker.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A star request left for the server.
    StarRequested {
        text_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A star request completed (successfully or not).
    ///
    /// `starred` is the only field the UI acts on: true applies the icon
    /// transition, false leaves the icon untouched. `status` is None for
    /// transport-level failures that never produced an HTTP status.
    StarResolved {
        text_id: String,
        timestamp: DateTime<Utc>,
        starred: bool,
        status: Option<u16>,
        #[serde(skip)]
        duration: Duration,
    },
}

impl UiEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            UiEvent::StarRequested { timestamp, .. } => *timestamp,
            UiEvent::StarResolved { timestamp, .. } => *timestamp,
        }
    }
}

/// Counters for the status bar.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub star_requests: usize,
    pub star_successes: usize,
    pub star_failures: usize,
    pub total_duration: Duration,
}

impl Stats {
    /// Requests still waiting on a response.
    pub fn in_flight(&self) -> usize {
        self.star_requests
            .saturating_sub(self.star_successes + self.star_failures)
    }

    pub fn success_rate(&self) -> f64 {
        let resolved = self.star_successes + self.star_failures;
        if resolved == 0 {
            0.0
        } else {
            (self.star_successes as f64 / resolved as f64) * 100.0
        }
    }

    pub fn avg_duration(&self) -> Duration {
        let resolved = (self.star_successes + self.star_failures) as u32;
        if resolved == 0 {
            Duration::default()
        } else {
            self.total_duration / resolved
        }
    }

    /// Record an event into the counters.
    pub fn record(&mut self, event: &UiEvent) {
        match event {
            UiEvent::StarRequested { .. } => self.star_requests += 1,
            UiEvent::StarResolved {
                starred, duration, ..
            } => {
                if *starred {
                    self.star_successes += 1;
                } else {
                    self.star_failures += 1;
                }
                self.total_duration += *duration;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(starred: bool) -> UiEvent {
        UiEvent::StarResolved {
            text_id: "42".to_string(),
            timestamp: Utc::now(),
            starred,
            status: if starred { Some(200) } else { Some(500) },
            duration: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_event_json_carries_type_tag() {
        let json = serde_json::to_value(resolved(true)).unwrap();
        assert_eq!(json["type"], "star_resolved");
        assert_eq!(json["text_id"], "42");
        assert_eq!(json["starred"], true);
    }

    #[test]
    fn test_in_flight_counts_unresolved_requests() {
        let mut stats = Stats::default();
        stats.record(&UiEvent::StarRequested {
            text_id: "42".to_string(),
            timestamp: Utc::now(),
        });
        stats.record(&UiEvent::StarRequested {
            text_id: "42".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(stats.in_flight(), 2);

        stats.record(&resolved(true));
        assert_eq!(stats.in_flight(), 1);
        assert_eq!(stats.star_successes, 1);
    }

    #[test]
    fn test_success_rate_over_resolved_only() {
        let mut stats = Stats::default();
        assert_eq!(stats.success_rate(), 0.0);

        stats.record(&resolved(true));
        stats.record(&resolved(false));
        assert_eq!(stats.success_rate(), 50.0);
    }
}
