//! Leaderboard read path.
//!
//! The leaderboard is plain HTTP, independent of any session. Failures are
//! never fatal to the player: [`fetch_leaderboard`] logs and yields an empty
//! table, and [`try_fetch_leaderboard`] exposes the error for callers that
//! want it.

use dropfour_proto::LeaderboardEntry;

use crate::{Endpoint, transport::TransportError};

/// Fetch the leaderboard, propagating failures.
pub async fn try_fetch_leaderboard(
    client: &reqwest::Client,
    endpoint: &Endpoint,
) -> Result<Vec<LeaderboardEntry>, TransportError> {
    let url = endpoint.leaderboard_url()?;
    let entries = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Option<Vec<LeaderboardEntry>>>()
        .await?;

    // The server encodes an empty table as `null`.
    Ok(entries.unwrap_or_default())
}

/// Fetch the leaderboard. Empty on any failure.
pub async fn fetch_leaderboard(
    client: &reqwest::Client,
    endpoint: &Endpoint,
) -> Vec<LeaderboardEntry> {
    match try_fetch_leaderboard(client, endpoint).await {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "leaderboard loaded");
            entries
        },
        Err(e) => {
            tracing::warn!(error = %e, "leaderboard fetch failed");
            Vec::new()
        },
    }
}
