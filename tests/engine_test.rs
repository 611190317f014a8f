//! Tests for the game engine turn loop.

use std::sync::Arc;

use strictly_noughts::{
    Board, GameEngine, GameError, GameErrorKind, GameId, GameService, GameState, GameStore,
    InvalidInputPolicy, PlayerType, Renderer, ScriptedInput, Square,
};

/// Renderer that remembers every board it was shown.
#[derive(Default)]
struct RecordingRenderer {
    boards: Vec<Board>,
    messages: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, board: &Board) -> Result<(), GameError> {
        self.boards.push(board.clone());
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), GameError> {
        self.messages.push(text.to_string());
        Ok(())
    }
}

fn service() -> GameService {
    GameService::new(Arc::new(GameStore::new()))
}

/// Creates Alice (human) vs Computer on a `size` board; `human_first` picks the toss winner.
fn human_vs_computer(service: &GameService, size: usize, human_first: bool) -> GameId {
    let human = service.add_player("Alice", PlayerType::Human).unwrap();
    let bot = service.add_player("Computer", PlayerType::Automated).unwrap();
    let first = if human_first { human.id().clone() } else { bot.id().clone() };
    service
        .initialise_game(human, bot, size, &first)
        .unwrap()
        .id()
        .clone()
}

fn positions(service: &GameService, id: &GameId) -> Vec<usize> {
    let game = service.store().get_game(id).unwrap();
    let size = game.board().size();
    game.moves().iter().map(|m| m.position(size).value()).collect()
}

fn play(
    service: &GameService,
    id: &GameId,
    script: &[&str],
    policy: InvalidInputPolicy,
) -> (Result<strictly_noughts::Game, GameError>, RecordingRenderer, ScriptedInput) {
    let mut input = ScriptedInput::new(script.iter().copied());
    let mut renderer = RecordingRenderer::default();
    let result = GameEngine::new(service.store(), &mut input, &mut renderer)
        .with_policy(policy)
        .start_game(id);
    (result, renderer, input)
}

#[test]
fn test_human_and_computer_draw() {
    let service = service();
    let id = human_vs_computer(&service, 3, true);

    let (result, renderer, input) = play(
        &service,
        &id,
        &["1", "9", "7", "6", "2"],
        InvalidInputPolicy::Abort,
    );
    let game = result.expect("game should finish");

    assert_eq!(*game.state(), GameState::Draw);
    assert!(game.winner().is_none());
    assert_eq!(game.moves().len(), 9);
    assert_eq!(input.remaining(), 0);
    assert_eq!(positions(&service, &id), vec![1, 5, 9, 3, 7, 4, 6, 8, 2]);
    // One render before every move, none after a draw.
    assert_eq!(renderer.boards.len(), 9);
    assert!(renderer.boards[0].empty_cells().count() == 9);
}

#[test]
fn test_computer_wins() {
    let service = service();
    let id = human_vs_computer(&service, 3, false);

    let (result, renderer, _) = play(&service, &id, &["2", "3"], InvalidInputPolicy::Abort);
    let game = result.unwrap();

    assert_eq!(*game.state(), GameState::WinnerAutomated);
    assert_eq!(game.winner_player().unwrap().name(), "Computer");
    assert_eq!(positions(&service, &id), vec![5, 2, 1, 3, 9]);
    // Five pre-move renders plus the final board.
    assert_eq!(renderer.boards.len(), 6);
    assert_eq!(renderer.boards.last().unwrap(), game.board());
}

#[test]
fn test_human_wins_against_human() {
    let service = service();
    let alice = service.add_player("Alice", PlayerType::Human).unwrap();
    let bob = service.add_player("Bob", PlayerType::Human).unwrap();
    let first = alice.id().clone();
    let id = service
        .initialise_game(alice, bob, 3, &first)
        .unwrap()
        .id()
        .clone();

    let (result, _, _) = play(
        &service,
        &id,
        &["1", "4", "2", "5", "3"],
        InvalidInputPolicy::Abort,
    );
    let game = result.unwrap();

    assert_eq!(*game.state(), GameState::WinnerHuman);
    assert_eq!(game.winner_player().unwrap().name(), "Alice");
    assert_eq!(game.moves().len(), 5);
}

#[test]
fn test_out_of_range_position_is_fatal() {
    let service = service();
    let id = human_vs_computer(&service, 3, true);

    let (result, _, _) = play(&service, &id, &["10"], InvalidInputPolicy::Abort);
    let err = result.unwrap_err();

    assert_eq!(
        err.kind(),
        &GameErrorKind::InvalidMove {
            position: 10,
            max: 9
        }
    );
    let stored = service.store().get_game(&id).unwrap();
    assert_eq!(*stored.state(), GameState::Ongoing);
    assert!(stored.moves().is_empty());
}

#[test]
fn test_occupied_position_is_fatal() {
    let service = service();
    let id = human_vs_computer(&service, 3, false);

    // Computer opens in the centre.
    let (result, _, _) = play(&service, &id, &["5"], InvalidInputPolicy::Abort);
    let err = result.unwrap_err();

    assert_eq!(err.kind(), &GameErrorKind::CellOccupied { position: 5 });
    assert_eq!(positions(&service, &id), vec![5]);
}

#[test]
fn test_malformed_position_is_fatal() {
    let service = service();
    let id = human_vs_computer(&service, 3, true);

    let (result, _, _) = play(&service, &id, &["top left"], InvalidInputPolicy::Abort);
    assert!(matches!(
        result.unwrap_err().kind(),
        GameErrorKind::MalformedPosition(_)
    ));
}

#[test]
fn test_reprompt_policy_asks_again() {
    let service = service();
    let id = human_vs_computer(&service, 3, true);

    let (result, renderer, input) = play(
        &service,
        &id,
        &["abc", "1", "5", "10", "9", "7", "6", "2"],
        InvalidInputPolicy::Reprompt,
    );
    let game = result.unwrap();

    assert_eq!(*game.state(), GameState::Draw);
    assert_eq!(input.remaining(), 0);
    assert_eq!(positions(&service, &id), vec![1, 5, 9, 3, 7, 4, 6, 8, 2]);
    assert!(
        renderer
            .messages
            .iter()
            .any(|m| m.contains("already captured"))
    );
}

#[test]
fn test_exhausted_input_ends_run() {
    let service = service();
    let id = human_vs_computer(&service, 3, true);

    let (result, _, _) = play(&service, &id, &["1"], InvalidInputPolicy::Reprompt);
    assert!(matches!(result.unwrap_err().kind(), GameErrorKind::Io(_)));
    assert_eq!(positions(&service, &id), vec![1, 5]);
}

#[test]
fn test_unknown_game() {
    let service = service();
    let (result, renderer, _) = play(
        &service,
        &GameId::from("no-such-game"),
        &[],
        InvalidInputPolicy::Abort,
    );
    assert!(matches!(
        result.unwrap_err().kind(),
        GameErrorKind::NotFound(_)
    ));
    assert!(renderer.boards.is_empty());
}

#[test]
fn test_finished_game_is_not_replayed() {
    let service = service();
    let id = human_vs_computer(&service, 3, false);
    play(&service, &id, &["2", "3"], InvalidInputPolicy::Abort)
        .0
        .unwrap();

    let (result, renderer, _) = play(&service, &id, &[], InvalidInputPolicy::Abort);
    let game = result.unwrap();
    assert_eq!(*game.state(), GameState::WinnerAutomated);
    assert_eq!(game.moves().len(), 5);
    assert!(renderer.boards.is_empty());
}

#[test]
fn test_single_cell_board_first_move_wins() {
    let service = service();
    let id = human_vs_computer(&service, 1, true);

    let (result, _, _) = play(&service, &id, &["1"], InvalidInputPolicy::Abort);
    let game = result.unwrap();
    assert_eq!(*game.state(), GameState::WinnerHuman);
    assert_eq!(game.moves().len(), 1);
}

#[test]
fn test_computer_vs_computer_is_consistent() {
    for size in 2..=5 {
        let service = service();
        let a = service.add_player("A", PlayerType::Automated).unwrap();
        let b = service.add_player("B", PlayerType::Automated).unwrap();
        let first = a.id().clone();
        let id = service
            .initialise_game(a, b, size, &first)
            .unwrap()
            .id()
            .clone();

        let (result, _, _) = play(&service, &id, &[], InvalidInputPolicy::Abort);
        let game = result.unwrap();

        assert!(game.state().is_terminal());
        let occupied = game
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();
        assert_eq!(occupied, game.moves().len());
        if *game.state() == GameState::Draw {
            assert_eq!(game.moves().len(), size * size);
            assert!(game.winner().is_none());
        } else {
            assert!(game.winner().is_some());
        }

        // Marks alternate, starting with X.
        for (i, mv) in game.moves().iter().enumerate() {
            let expected = if i % 2 == 0 {
                strictly_noughts::Mark::X
            } else {
                strictly_noughts::Mark::O
            };
            assert_eq!(mv.mark(), expected);
        }
    }
}
