//! The checks in [`InvariantRegistry::standard`](super::InvariantRegistry::standard).

use std::collections::HashMap;

use dropfour_app::NoticeLog;
use dropfour_client::ConnectionStatus;

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// In-game statuses always carry a board.
///
/// `playing`, `rejoined` and `ended` are only reachable through messages
/// that deliver a board, so a client in one of them without a snapshot has
/// lost server state.
pub struct GameStateHasBoard;

impl Invariant for GameStateHasBoard {
    fn name(&self) -> &'static str {
        "game_state_has_board"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let in_game = matches!(
                client.status,
                ConnectionStatus::Playing | ConnectionStatus::Rejoined | ConnectionStatus::Ended
            );
            if in_game && client.board_shape.is_none() {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {}: status {} without a board",
                        client.id, client.status
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A game never changes this client's colour.
///
/// The colour is announced by `start`/`rejoined` and updates must not touch
/// it. Every observation for the same game id must agree.
pub struct ColorFixedWithinGame;

impl Invariant for ColorFixedWithinGame {
    fn name(&self) -> &'static str {
        "color_fixed_within_game"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let mut first_seen = HashMap::new();
            for (game_id, color) in &client.color_history {
                let first = *first_seen.entry(game_id).or_insert(*color);
                if first != *color {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!(
                            "client {} game {}: colour changed {} → {}",
                            client.id, game_id, first, color
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A result is only held once the game is over.
///
/// `gameOver` moves the session to `ended`; afterwards only a close or
/// teardown (`disconnected`) may follow while the result is kept.
pub struct ResultOnlyAfterGameOver;

impl Invariant for ResultOnlyAfterGameOver {
    fn name(&self) -> &'static str {
        "result_only_after_game_over"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let over =
                matches!(client.status, ConnectionStatus::Ended | ConnectionStatus::Disconnected);
            if let Some(result) = &client.result
                && !over
            {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {}: result {result:?} while {}",
                        client.id, client.status
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The column cursor stays on the board.
///
/// With a board of `n > 0` columns the cursor is below `n`; without one it
/// rests on column 0.
pub struct CursorWithinBoard;

impl Invariant for CursorWithinBoard {
    fn name(&self) -> &'static str {
        "cursor_within_board"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let columns = client.board_shape.map_or(0, |(_, cols)| cols);
            let limit = columns.max(1);
            if client.cursor >= limit {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {}: cursor {} on a board of {} columns",
                        client.id, client.cursor, columns
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The notice log never exceeds its capacity.
pub struct NoticeLogBounded;

impl Invariant for NoticeLogBounded {
    fn name(&self) -> &'static str {
        "notice_log_bounded"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            if client.notice_count > NoticeLog::DEFAULT_CAPACITY {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {}: {} notices, capacity {}",
                        client.id,
                        client.notice_count,
                        NoticeLog::DEFAULT_CAPACITY
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dropfour_proto::{GameId, PlayerColor};

    use super::*;
    use crate::invariants::ClientSnapshot;

    fn client(status: ConnectionStatus) -> ClientSnapshot {
        ClientSnapshot { status, ..ClientSnapshot::new(1) }
    }

    #[test]
    fn in_game_without_board_is_violation() {
        let snapshot = SystemSnapshot::single(client(ConnectionStatus::Rejoined));
        assert!(GameStateHasBoard.check(&snapshot).is_err());

        let snapshot = SystemSnapshot::single(ClientSnapshot {
            board_shape: Some((6, 7)),
            ..client(ConnectionStatus::Rejoined)
        });
        assert!(GameStateHasBoard.check(&snapshot).is_ok());
    }

    #[test]
    fn waiting_without_board_is_fine() {
        let snapshot = SystemSnapshot::single(client(ConnectionStatus::Waiting));
        assert!(GameStateHasBoard.check(&snapshot).is_ok());
    }

    #[test]
    fn colour_change_within_game_is_violation() {
        let mut c = client(ConnectionStatus::Playing);
        c.color_history = vec![
            (GameId::new("g1"), PlayerColor::Red),
            (GameId::new("g2"), PlayerColor::Yellow),
            (GameId::new("g1"), PlayerColor::Red),
        ];
        assert!(ColorFixedWithinGame.check(&SystemSnapshot::single(c.clone())).is_ok());

        c.color_history.push((GameId::new("g1"), PlayerColor::Yellow));
        let violation = ColorFixedWithinGame.check(&SystemSnapshot::single(c)).unwrap_err();
        assert_eq!(violation.invariant, "color_fixed_within_game");
    }

    #[test]
    fn result_while_playing_is_violation() {
        let playing =
            ClientSnapshot { result: Some("Draw".into()), ..client(ConnectionStatus::Playing) };
        assert!(ResultOnlyAfterGameOver.check(&SystemSnapshot::single(playing)).is_err());

        let dropped = ClientSnapshot {
            result: Some("Draw".into()),
            ..client(ConnectionStatus::Disconnected)
        };
        assert!(ResultOnlyAfterGameOver.check(&SystemSnapshot::single(dropped)).is_ok());
    }

    #[test]
    fn cursor_bounds() {
        let playing =
            ClientSnapshot { board_shape: Some((6, 7)), ..client(ConnectionStatus::Playing) };

        let on_board = ClientSnapshot { cursor: 6, ..playing.clone() };
        assert!(CursorWithinBoard.check(&SystemSnapshot::single(on_board)).is_ok());

        let off_board = ClientSnapshot { cursor: 7, ..playing };
        assert!(CursorWithinBoard.check(&SystemSnapshot::single(off_board)).is_err());

        let no_board = ClientSnapshot { cursor: 1, ..client(ConnectionStatus::Waiting) };
        assert!(CursorWithinBoard.check(&SystemSnapshot::single(no_board)).is_err());
    }

    #[test]
    fn notice_log_over_capacity_is_violation() {
        let capacity = NoticeLog::DEFAULT_CAPACITY;

        let full = ClientSnapshot { notice_count: capacity, ..client(ConnectionStatus::Waiting) };
        assert!(NoticeLogBounded.check(&SystemSnapshot::single(full)).is_ok());

        let over =
            ClientSnapshot { notice_count: capacity + 1, ..client(ConnectionStatus::Waiting) };
        assert!(NoticeLogBounded.check(&SystemSnapshot::single(over)).is_err());
    }
}
