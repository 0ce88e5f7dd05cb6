//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod board;
mod leaderboard;
mod login;
mod notices;
mod status;

pub use board::BoardGeometry;
use dropfour_app::Screen;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Render the entire UI.
///
/// Returns where the board cells were drawn, for mouse hit-testing. `None`
/// when no board is on screen.
pub fn render(frame: &mut Frame, app: &App) -> Option<BoardGeometry> {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return None;
    };

    let geometry = match app.screen() {
        Screen::Login => {
            render_login_screen(frame, app, *main_area);
            None
        },
        Screen::Game => render_game_screen(frame, app, *main_area),
    };
    status::render(frame, app, *status_area);

    geometry
}

/// Render the login form beside the leaderboard.
fn render_login_screen(frame: &mut Frame, app: &App, area: Rect) {
    const LEADERBOARD_WIDTH: u16 = 36;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(LEADERBOARD_WIDTH)])
        .split(area);

    let [form_area, leaderboard_area] = chunks.as_ref() else {
        return;
    };

    login::render(frame, app.input(), *form_area);
    leaderboard::render(frame, app.leaderboard(), *leaderboard_area);
}

/// Render the main area (board + sidebar).
fn render_game_screen(frame: &mut Frame, app: &App, area: Rect) -> Option<BoardGeometry> {
    const SIDEBAR_WIDTH: u16 = 36;
    const BOARD_AREA_MIN_WIDTH: u16 = 24;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(BOARD_AREA_MIN_WIDTH), Constraint::Length(SIDEBAR_WIDTH)])
        .split(area);

    let [board_area, sidebar_area] = chunks.as_ref() else {
        return None;
    };

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*sidebar_area);

    if let [leaderboard_area, notices_area] = sidebar.as_ref() {
        leaderboard::render(frame, app.leaderboard(), *leaderboard_area);
        notices::render(frame, app.notices(), *notices_area);
    }

    board::render(frame, app, *board_area)
}

#[cfg(test)]
mod tests {
    use dropfour_app::{AppEvent, KeyInput, SessionView};
    use dropfour_client::{ConnectionStatus, GameSnapshot};
    use dropfour_proto::{Board, GameId, LeaderboardEntry, PlayerColor};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Draw `app` and return the screen as lines of text.
    fn draw(app: &App) -> (Vec<String>, Option<BoardGeometry>) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut geometry = None;
        terminal
            .draw(|frame| {
                geometry = render(frame, app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let lines = buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
            .collect();
        (lines, geometry)
    }

    fn contains(lines: &[String], text: &str) -> bool {
        lines.iter().any(|line| line.contains(text))
    }

    fn playing_app() -> App {
        let mut app = App::new(false);
        let _ = app.join("alice".into());
        let _ = app.handle(AppEvent::SessionChanged(SessionView {
            status: ConnectionStatus::Playing,
            snapshot: Some(GameSnapshot {
                board: Board::empty(6, 7),
                turn: Some(PlayerColor::Red),
                color: Some(PlayerColor::Red),
            }),
            opponent: Some("bob".into()),
            game_id: Some(GameId::new("g1")),
            ..SessionView::default()
        }));
        app
    }

    #[test]
    fn login_screen_shows_form_and_leaderboard() {
        let mut app = App::new(false);
        let _ = app.handle(AppEvent::LeaderboardLoaded(vec![LeaderboardEntry {
            username: "carol".into(),
            wins: 3,
            draws: 1,
            losses: 0,
        }]));
        let _ = app.handle(AppEvent::Key(KeyInput::Char('a')));

        let (lines, geometry) = draw(&app);

        assert!(contains(&lines, "Username"));
        assert!(contains(&lines, "> a"));
        assert!(contains(&lines, "carol"));
        assert!(geometry.is_none());
    }

    #[test]
    fn game_screen_shows_board_header() {
        let (lines, geometry) = draw(&playing_app());

        assert!(contains(&lines, "Opponent: bob"));
        assert!(contains(&lines, "Your color: R"));
        assert!(contains(&lines, "Turn: R"));
        assert!(contains(&lines, "Playing"));

        let geometry = geometry.unwrap();
        assert_eq!(geometry.dimensions(), (6, 7));
    }

    #[test]
    fn game_screen_without_snapshot_has_no_board() {
        let mut app = App::new(false);
        let _ = app.join("alice".into());

        let (lines, geometry) = draw(&app);

        assert!(contains(&lines, "Waiting for the game to start"));
        assert!(geometry.is_none());
    }
}
