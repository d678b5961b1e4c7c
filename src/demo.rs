// Demo mode: resolve star requests locally instead of calling the site
//
// Lets the TUI be exercised with no server running - hover the flag, click
// the star, watch the icon fill. Enabled with STARDECK_DEMO=1.

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;

use crate::client::StarOutcome;

/// Simulated round-trip latency, long enough to see the in-flight counter.
const DEMO_LATENCY: Duration = Duration::from_millis(400);

/// Stand-in for [`crate::client::StarClient::star`]: always succeeds.
pub async fn resolve_star(text_id: &str) -> Result<StarOutcome> {
    anyhow::ensure!(!text_id.is_empty(), "text id is empty");
    sleep(DEMO_LATENCY).await;
    tracing::debug!("Demo: resolved star for text {}", text_id);
    Ok(StarOutcome::Starred)
}
