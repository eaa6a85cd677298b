//! End-to-end session flow against the real drop simulation.

use quiz_plinko::{GameConfig, GameError, GameEvent, GameSession, RoundPhase};

/// Run the in-flight drop to resolution and return the announced exit.
fn resolved_exit(session: &mut GameSession) -> (String, i64) {
    session.run_drop_to_resolution();
    let mut resolved = None;
    for event in session.drain_events() {
        if let GameEvent::ExitResolved { exit_id, points } = event {
            resolved = Some((exit_id, points));
        }
    }
    resolved.expect("drop must resolve to an exit")
}

#[test]
fn full_game_reaches_game_over() {
    let mut session = GameSession::new(GameConfig::default(), 42).unwrap();
    let mut expected_score = 0i64;

    for round in 1..=5u32 {
        assert_eq!(session.snapshot().current_round, round);
        session
            .select_entry((round as usize - 1) % session.entry_count())
            .unwrap();
        let (exit_id, points) = resolved_exit(&mut session);
        assert_eq!(
            session.snapshot().selected_exit.as_deref(),
            Some(exit_id.as_str())
        );
        assert_eq!(session.exits().resolve(&exit_id).unwrap().points, points);

        session.submit_answer(true).unwrap();
        expected_score += points;
        assert_eq!(session.snapshot().score, expected_score);
        assert_eq!(session.snapshot().selected_exit, None);
    }

    assert_eq!(session.phase(), RoundPhase::FinalStake);
    let stake = session.snapshot().final_round_stake;
    assert_eq!(stake, expected_score.div_euclid(2).max(0));

    session.accept_final_stake().unwrap();
    assert_eq!(session.phase(), RoundPhase::FinalAnswer);
    assert_eq!(session.snapshot().final_round_stake, stake);

    let final_score = session.play_final_round(false).unwrap();
    assert_eq!(final_score, expected_score - stake);
    assert!(session.is_game_over());

    let events = session.drain_events();
    assert!(events.iter().any(
        |event| matches!(event, GameEvent::GameOver { final_score: score } if *score == final_score)
    ));
}

#[test]
fn winning_the_final_adds_the_stake() {
    let mut session = GameSession::new(GameConfig::default(), 1234).unwrap();
    for _ in 0..5 {
        session.select_entry(3).unwrap();
        session.run_drop_to_resolution();
        session.submit_answer(true).unwrap();
    }
    let banked = session.snapshot().score;
    let stake = session.snapshot().final_round_stake;
    let final_score = session.play_final_round(true).unwrap();
    assert_eq!(final_score, banked + stake);
}

#[test]
fn redrop_while_in_flight_is_rejected() {
    let mut session = GameSession::new(GameConfig::default(), 7).unwrap();
    session.select_entry(0).unwrap();
    assert_eq!(session.select_entry(1), Err(GameError::DropInFlight));
    session.run_drop_to_resolution();
    assert_eq!(session.phase(), RoundPhase::AwaitingAnswer);
}

#[test]
fn out_of_order_calls_are_rejected() {
    let mut session = GameSession::new(GameConfig::default(), 9).unwrap();
    assert!(matches!(
        session.submit_answer(true),
        Err(GameError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.accept_final_stake(),
        Err(GameError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.play_final_round(true),
        Err(GameError::InvalidTransition { .. })
    ));

    session.select_entry(3).unwrap();
    session.run_drop_to_resolution();
    assert!(matches!(
        session.select_entry(0),
        Err(GameError::InvalidTransition { .. })
    ));
}

#[test]
fn invalid_entry_index_is_rejected() {
    let mut session = GameSession::new(GameConfig::default(), 11).unwrap();
    let count = session.entry_count();
    assert_eq!(
        session.select_entry(count),
        Err(GameError::InvalidEntry {
            index: count,
            count
        })
    );
    // Still ready for a valid drop
    assert_eq!(session.phase(), RoundPhase::AwaitingEntry);
    session.select_entry(count - 1).unwrap();
}
