//! Property tests over board sizes, seeds, and failure positions.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;

use sequence_recall::core::{ButtonId, GameConfig, GameRng};
use sequence_recall::game::{GuessOutcome, SequenceGame};
use sequence_recall::scheduler::FrameScheduler;
use sequence_recall::TurnState;

fn seeded_game(button_count: u8, seed: u64) -> (SequenceGame, Rc<RefCell<FrameScheduler>>) {
    let config = GameConfig::builder()
        .button_count(button_count)
        .start_delay(Duration::ZERO)
        .delay_between_highlights(Duration::ZERO)
        .delay_between_rounds(Duration::ZERO)
        .build()
        .unwrap();

    let scheduler = Rc::new(RefCell::new(FrameScheduler::new()));
    let game = SequenceGame::builder()
        .config(config)
        .index_source(Box::new(GameRng::new(seed)))
        .scheduler(Box::new(scheduler.clone()))
        .build()
        .unwrap();
    (game, scheduler)
}

fn settle(game: &mut SequenceGame, scheduler: &Rc<RefCell<FrameScheduler>>) {
    loop {
        let due = scheduler.borrow_mut().advance(Duration::from_secs(10));
        if due.is_empty() {
            break;
        }
        for wake in due {
            game.resume(wake);
        }
    }
}

/// Replay the current sequence correctly and settle into the next round.
fn play_round(game: &mut SequenceGame, scheduler: &Rc<RefCell<FrameScheduler>>) {
    let sequence: Vec<ButtonId> = game.session().sequence().to_vec();
    for &button in &sequence {
        game.submit_guess(button).unwrap();
    }
    settle(game, scheduler);
}

proptest! {
    /// A fresh game always presents exactly one in-range index.
    #[test]
    fn start_produces_single_in_range_entry(
        button_count in 1u8..=16,
        seed in any::<u64>(),
    ) {
        let (mut game, scheduler) = seeded_game(button_count, seed);
        game.start_new_game();
        settle(&mut game, &scheduler);

        prop_assert_eq!(game.round(), 1);
        prop_assert_eq!(game.score(), 0);
        prop_assert!(game.session().sequence()[0].in_range(button_count));
        prop_assert_eq!(game.turn_state(), TurnState::AwaitingInput);
    }

    /// Correct full replays keep completing rounds, growing the sequence by
    /// one each time, with `score == length - 1` throughout.
    #[test]
    fn correct_replays_grow_linearly(
        button_count in 1u8..=8,
        seed in any::<u64>(),
        rounds in 1usize..=6,
    ) {
        let (mut game, scheduler) = seeded_game(button_count, seed);
        game.start_new_game();
        settle(&mut game, &scheduler);

        for completed in 0..rounds {
            prop_assert_eq!(game.round(), completed + 1);
            prop_assert_eq!(game.score() as usize, game.round() - 1);
            prop_assert!(game
                .session()
                .sequence()
                .iter()
                .all(|b| b.in_range(button_count)));

            play_round(&mut game, &scheduler);
            prop_assert_eq!(game.turn_state(), TurnState::AwaitingInput);
        }

        prop_assert_eq!(game.round(), rounds + 1);
    }

    /// A wrong guess at any position ends the game with the sequence intact
    /// and a final score of `length - 1`.
    #[test]
    fn wrong_guess_anywhere_is_terminal(
        button_count in 2u8..=8,
        seed in any::<u64>(),
        rounds_before in 0usize..=4,
        wrong_at_factor in 0.0f64..1.0,
    ) {
        let (mut game, scheduler) = seeded_game(button_count, seed);
        game.start_new_game();
        settle(&mut game, &scheduler);

        for _ in 0..rounds_before {
            play_round(&mut game, &scheduler);
        }

        let sequence: Vec<ButtonId> = game.session().sequence().to_vec();
        let wrong_at = ((sequence.len() as f64) * wrong_at_factor) as usize;

        for &button in sequence.iter().take(wrong_at) {
            prop_assert_eq!(
                game.submit_guess(button).unwrap(),
                GuessOutcome::Progress
            );
        }

        let expected = sequence[wrong_at];
        let wrong = ButtonId((expected.0 + 1) % button_count);
        let outcome = game.submit_guess(wrong).unwrap();

        prop_assert_eq!(
            outcome,
            GuessOutcome::GameOver {
                final_score: (sequence.len() - 1) as u32
            }
        );
        prop_assert!(game.is_game_over());
        prop_assert_eq!(game.session().sequence(), sequence.as_slice());

        // Terminal state rejects further play until a restart.
        prop_assert_eq!(
            game.submit_guess(expected).unwrap(),
            GuessOutcome::Ignored
        );
        prop_assert!(!game.repeat_sequence());
    }

    /// Restarting always yields a playable fresh game, whatever came before.
    #[test]
    fn restart_always_recovers(
        button_count in 1u8..=8,
        seed in any::<u64>(),
        rounds_before in 0usize..=3,
    ) {
        let (mut game, scheduler) = seeded_game(button_count, seed);
        game.start_new_game();
        settle(&mut game, &scheduler);
        for _ in 0..rounds_before {
            play_round(&mut game, &scheduler);
        }

        game.start_new_game();
        settle(&mut game, &scheduler);

        prop_assert_eq!(game.round(), 1);
        prop_assert_eq!(game.score(), 0);
        prop_assert_eq!(game.turn_state(), TurnState::AwaitingInput);
    }
}
