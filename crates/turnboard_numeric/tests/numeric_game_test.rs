//! Full games of numerical tic-tac-toe through the shared engine.

use turnboard_engine::{Game, GameSetup, MoveError, Outcome, Participant, SavedGame, Seat};
use turnboard_numeric::{NumberMove, NumberPool, NumericComputer, NumericRules};

fn two_humans(size: usize) -> Game<NumericRules> {
    GameSetup::new(
        NumericRules::new(size).unwrap(),
        Participant::human("Alice"),
        Participant::human("Bob"),
    )
    .start(Seat::First)
    .unwrap()
}

fn play_all(game: &mut Game<NumericRules>, moves: &[(usize, usize, u32)]) -> Option<Outcome> {
    let mut outcome = None;
    for &(row, col, value) in moves {
        outcome = game.play(NumberMove::new(row, col, value)).unwrap();
    }
    outcome
}

#[test]
fn test_completing_magic_row_wins() {
    let mut game = two_humans(3);
    // Alice 5 centre, Bob 2 corner, ..., Alice completes row 1 as 3+5+7
    let outcome = play_all(
        &mut game,
        &[(1, 1, 5), (0, 0, 2), (1, 0, 3), (2, 2, 4), (1, 2, 7)],
    );

    assert_eq!(outcome, Some(Outcome::Winner(Seat::First)));
    assert_eq!(game.winner_name(), Some("Alice"));
    assert_eq!(game.current_seat(), Seat::First);
}

#[test]
fn test_line_with_wrong_sum_keeps_playing() {
    let mut game = two_humans(3);
    let outcome = play_all(&mut game, &[(0, 0, 1), (0, 1, 2), (2, 2, 9), (0, 2, 4)]);
    assert_eq!(outcome, None);
    assert_eq!(game.current_seat(), Seat::First);
}

#[test]
fn test_reused_or_foreign_number_rejected() {
    let mut game = two_humans(3);
    game.play(NumberMove::new(0, 0, 5)).unwrap();

    assert_eq!(
        game.play(NumberMove::new(1, 1, 5)).unwrap_err(),
        MoveError::NumberUnavailable { value: 5 }
    );
    assert_eq!(
        game.play(NumberMove::new(1, 1, 3)).unwrap_err(),
        MoveError::NumberUnavailable { value: 3 }
    );
    assert_eq!(game.current_seat(), Seat::Second);
}

#[test]
fn test_undo_gives_numbers_back() {
    let mut game = two_humans(3);
    play_all(&mut game, &[(1, 1, 5), (0, 0, 2)]);
    game.undo(1);

    let pool = NumberPool::available(Seat::Second, game.board());
    assert!(pool.contains(2));
    assert_eq!(game.current_seat(), Seat::Second);
}

#[test]
fn test_save_round_trip_preserves_game() {
    let mut game = two_humans(4);
    play_all(&mut game, &[(0, 0, 1), (3, 3, 16), (1, 2, 9)]);
    let json = game.to_saved().to_json().unwrap();

    let restored = Game::from_saved(
        NumericRules::new(4).unwrap(),
        &SavedGame::from_json(&json).unwrap(),
        |p| Participant::human(p.name.clone()),
    )
    .unwrap();

    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.history(), game.history());
    assert_eq!(restored.current_player().name(), "Bob");
}

#[test]
fn test_load_rejects_illegal_history() {
    let mut game = two_humans(3);
    play_all(&mut game, &[(1, 1, 5), (0, 0, 2)]);
    let edits: [fn(&mut SavedGame); 3] = [
        |saved| saved.history[0].mv.row = 9,
        |saved| saved.history[1].mv.value = 3,
        |saved| saved.history[1].mv.value = 12,
    ];
    for edit in edits {
        let mut saved = game.to_saved();
        edit(&mut saved);
        let result = Game::from_saved(NumericRules::new(3).unwrap(), &saved, |p| {
            Participant::human(p.name.clone())
        });
        assert!(result.is_err());
    }
}

#[test]
fn test_computer_against_computer_terminates() {
    let mut game = GameSetup::new(
        NumericRules::default(),
        Participant::computer("Odd", Box::new(NumericComputer::seeded(7))),
        Participant::computer("Even", Box::new(NumericComputer::seeded(8))),
    )
    .start(Seat::First)
    .unwrap();

    let mut turns = 0;
    while !game.is_over() {
        let mv = game.computer_move().unwrap();
        game.play(mv).unwrap();
        turns += 1;
        assert!(turns <= 9);
    }
    assert!(game.outcome().is_some());
}
