//! Integration tests for App and Bridge behavior.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - App state reflects the session's exposed state
//! - The right transport commands are issued, in order
//! - Moves only leave the client while playing

use dropfour_app::{App, AppAction, AppEvent, Bridge, KeyInput, Screen, TransportCommand};
use dropfour_client::{ConnectRequest, ConnectionStatus};
use dropfour_proto::{
    Board, Cell, ClientMessage, GameId, GameStart, GameUpdate, PlayerColor, ServerMessage,
};

/// Process actions from App through Bridge and update App state.
///
/// Returns the transport commands the driver would execute.
fn process_actions(
    app: &mut App,
    bridge: &mut Bridge,
    actions: Vec<AppAction>,
) -> Vec<TransportCommand> {
    let mut pending = actions;
    let mut commands = Vec::new();

    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            match action {
                AppAction::Join { .. }
                | AppAction::Rejoin { .. }
                | AppAction::SubmitMove { .. } => {
                    let events = bridge.process_app_action(action);
                    commands.extend(bridge.take_outgoing());
                    for event in events {
                        pending.extend(app.handle(event));
                    }
                },
                AppAction::Render | AppAction::Quit | AppAction::RefreshLeaderboard => {},
            }
        }
    }

    commands
}

/// Type a line and press Enter.
fn type_line(app: &mut App, bridge: &mut Bridge, text: &str) -> Vec<TransportCommand> {
    for c in text.chars() {
        let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
    }
    let actions = app.handle(AppEvent::Key(KeyInput::Enter));
    process_actions(app, bridge, actions)
}

/// Press a key on the game screen.
fn press(app: &mut App, bridge: &mut Bridge, key: KeyInput) -> Vec<TransportCommand> {
    let actions = app.handle(AppEvent::Key(key));
    process_actions(app, bridge, actions)
}

/// Feed bridge events into the App, following any actions.
fn deliver(app: &mut App, bridge: &mut Bridge, events: Vec<AppEvent>) -> Vec<TransportCommand> {
    let mut commands = Vec::new();
    for event in events {
        let actions = app.handle(event);
        commands.extend(process_actions(app, bridge, actions));
    }
    commands
}

fn receive(app: &mut App, bridge: &mut Bridge, message: ServerMessage) -> Vec<TransportCommand> {
    let events = bridge.handle_message(message);
    deliver(app, bridge, events)
}

fn start(color: PlayerColor, turn: PlayerColor) -> ServerMessage {
    ServerMessage::Start(GameStart {
        game_id: GameId::new("g1"),
        opponent: "bob".into(),
        board: Board::empty(6, 7),
        color: Some(color),
        turn: Some(turn),
    })
}

fn board_with(row: usize, col: usize, cell: Cell) -> Board {
    let mut rows = vec![vec![Cell::Empty; 7]; 6];
    rows[row][col] = cell;
    Board::new(rows).unwrap()
}

/// App logged in as alice with an open socket.
fn logged_in(auto_play: bool) -> (App, Bridge) {
    let mut app = App::new(auto_play);
    let mut bridge = Bridge::new();
    let _ = type_line(&mut app, &mut bridge, "alice");
    let events = bridge.handle_opened();
    let _ = deliver(&mut app, &mut bridge, events);
    (app, bridge)
}

#[test]
fn login_opens_one_socket() {
    let mut app = App::new(false);
    let mut bridge = Bridge::new();

    let commands = type_line(&mut app, &mut bridge, "alice");

    assert_eq!(commands, vec![TransportCommand::Connect(ConnectRequest {
        username: "alice".into(),
        game_id: None,
    })]);
    assert_eq!(app.screen(), Screen::Game);
    assert_eq!(app.session().status, ConnectionStatus::Connecting);
}

#[test]
fn full_game_from_keyboard() {
    let (mut app, mut bridge) = logged_in(false);
    assert_eq!(app.session().status, ConnectionStatus::Waiting);

    let _ = receive(&mut app, &mut bridge, ServerMessage::Queued {
        message: Some("Waiting for opponent...".into()),
    });
    assert_eq!(app.notices().latest(), Some("Waiting for opponent..."));

    let _ = receive(&mut app, &mut bridge, start(PlayerColor::Red, PlayerColor::Red));
    assert_eq!(app.session().status, ConnectionStatus::Playing);
    assert_eq!(app.session().opponent.as_deref(), Some("bob"));

    // Cursor to column 4 (index 3) and drop
    let _ = press(&mut app, &mut bridge, KeyInput::Char('4'));
    let commands = press(&mut app, &mut bridge, KeyInput::Enter);
    assert_eq!(commands, vec![TransportCommand::Send(ClientMessage::Move { col: 3 })]);

    let _ = receive(&mut app, &mut bridge, ServerMessage::Update(GameUpdate {
        board: board_with(5, 3, Cell::Red),
        turn: Some(PlayerColor::Yellow),
        last_move: None,
    }));
    let snapshot = app.session().snapshot.clone().unwrap();
    assert_eq!(snapshot.board.get(5, 3), Some(Cell::Red));
    assert_eq!(snapshot.color, Some(PlayerColor::Red));

    let _ = receive(&mut app, &mut bridge, ServerMessage::GameOver { result: "alice wins".into() });

    // Oracle: ended, result surfaced, moves no longer leave the client
    assert_eq!(app.session().status, ConnectionStatus::Ended);
    assert_eq!(app.session().result.as_deref(), Some("alice wins"));
    assert!(press(&mut app, &mut bridge, KeyInput::Enter).is_empty());
}

#[test]
fn mouse_click_moves_in_clicked_column() {
    let (mut app, mut bridge) = logged_in(false);
    let _ = receive(&mut app, &mut bridge, start(PlayerColor::Yellow, PlayerColor::Yellow));

    let actions = app.handle(AppEvent::Click { row: 0, col: 6 });
    let commands = process_actions(&mut app, &mut bridge, actions);

    assert_eq!(commands, vec![TransportCommand::Send(ClientMessage::Move { col: 6 })]);
    assert_eq!(app.cursor(), 6);
}

#[test]
fn drop_then_rejoin_opens_fresh_socket_with_game_id() {
    let (mut app, mut bridge) = logged_in(false);
    let _ = receive(&mut app, &mut bridge, start(PlayerColor::Red, PlayerColor::Yellow));

    let events = bridge.handle_closed();
    let _ = deliver(&mut app, &mut bridge, events);
    assert_eq!(app.session().status, ConnectionStatus::Disconnected);
    assert_eq!(app.session().rejoinable, Some(GameId::new("g1")));

    let commands = press(&mut app, &mut bridge, KeyInput::Char('r'));
    assert_eq!(commands, vec![
        TransportCommand::Close,
        TransportCommand::Connect(ConnectRequest {
            username: "alice".into(),
            game_id: Some(GameId::new("g1")),
        }),
    ]);

    let events = bridge.handle_opened();
    let _ = deliver(&mut app, &mut bridge, events);
    let _ = receive(&mut app, &mut bridge, ServerMessage::Rejoined(GameStart {
        game_id: GameId::new("g1"),
        opponent: "bob".into(),
        board: board_with(5, 0, Cell::Yellow),
        color: Some(PlayerColor::Red),
        turn: Some(PlayerColor::Red),
    }));

    // Oracle: resynchronized board, colour kept
    assert_eq!(app.session().status, ConnectionStatus::Rejoined);
    let snapshot = app.session().snapshot.clone().unwrap();
    assert_eq!(snapshot.board.get(5, 0), Some(Cell::Yellow));
    assert_eq!(snapshot.color, Some(PlayerColor::Red));
}

#[test]
fn new_game_after_end_replaces_session() {
    let (mut app, mut bridge) = logged_in(false);
    let _ = receive(&mut app, &mut bridge, start(PlayerColor::Red, PlayerColor::Red));
    let _ = receive(&mut app, &mut bridge, ServerMessage::GameOver { result: "Draw".into() });

    let commands = press(&mut app, &mut bridge, KeyInput::Char('n'));
    assert_eq!(commands, vec![
        TransportCommand::Close,
        TransportCommand::Connect(ConnectRequest { username: "alice".into(), game_id: None }),
    ]);

    // Oracle: the fresh session carries nothing from the finished game
    assert_eq!(app.session().status, ConnectionStatus::Connecting);
    assert!(app.session().snapshot.is_none());
}

#[test]
fn auto_play_answers_every_turn() {
    let (mut app, mut bridge) = logged_in(true);

    let commands = receive(&mut app, &mut bridge, start(PlayerColor::Red, PlayerColor::Red));
    assert_eq!(commands, vec![TransportCommand::Send(ClientMessage::Move { col: 3 })]);

    // Opponent to move: nothing sent
    let commands = receive(&mut app, &mut bridge, ServerMessage::Update(GameUpdate {
        board: board_with(5, 3, Cell::Red),
        turn: Some(PlayerColor::Yellow),
        last_move: None,
    }));
    assert!(commands.is_empty());

    // Our turn again on a new board
    let mut rows = board_with(5, 3, Cell::Red).rows().to_vec();
    rows[4][3] = Cell::Yellow;
    let commands = receive(&mut app, &mut bridge, ServerMessage::Update(GameUpdate {
        board: Board::new(rows).unwrap(),
        turn: Some(PlayerColor::Red),
        last_move: None,
    }));
    assert_eq!(commands, vec![TransportCommand::Send(ClientMessage::Move { col: 3 })]);

    // Info notice re-renders the same board: no duplicate move
    let commands = receive(&mut app, &mut bridge, ServerMessage::Info { message: "ok".into() });
    assert!(commands.is_empty());
}
