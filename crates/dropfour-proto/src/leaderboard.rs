//! Leaderboard rows.

use serde::{Deserialize, Serialize};

/// One player's standing as returned by the leaderboard read service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player's username.
    pub username: String,
    /// Games won.
    #[serde(default)]
    pub wins: u32,
    /// Games drawn.
    #[serde(default)]
    pub draws: u32,
    /// Games lost.
    #[serde(default)]
    pub losses: u32,
}

impl LeaderboardEntry {
    /// Total games finished.
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.draws).saturating_add(self.losses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_rows_in_order() {
        let text = r#"[
            {"username":"alice","wins":4,"losses":1,"draws":2},
            {"username":"bob","wins":1,"losses":3,"draws":0}
        ]"#;

        let rows: Vec<LeaderboardEntry> = serde_json::from_str(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "alice");
        assert_eq!(rows[0].games_played(), 7);
        assert_eq!(rows[1].losses, 3);
    }
}
