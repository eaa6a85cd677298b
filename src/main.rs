//! Headless demo runner: plays a full game against itself and logs the
//! event stream. Useful for eyeballing drop distributions and the round
//! flow without a frontend.
//!
//! Usage: `quiz-plinko [seed]`

use quiz_plinko::{
    Answer, GameConfig, GameSession, Question, QuestionBank, QuestionProvider, RoundPhase,
    check_answer, check_text_answer,
};

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xD20);
    match run(seed) {
        Ok(final_score) => println!("final score: {final_score}"),
        Err(err) => {
            eprintln!("demo failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run(seed: u64) -> Result<i64, Box<dyn std::error::Error>> {
    let mut session = GameSession::new(GameConfig::default(), seed)?;
    let mut bank = QuestionBank::new(demo_questions(), seed);
    log::info!(
        "board holds {} pegs across {} entry slots",
        session.board().pegs().len(),
        session.entry_count()
    );
    let exit_row: Vec<String> = session
        .exits()
        .iter()
        .map(|exit| format!("{}:{}", exit.id, exit.points))
        .collect();
    log::info!("exit row: {}", exit_row.join(" "));

    let mut entry = 0;
    let mut round = 0u32;
    while !session.is_game_over() {
        match session.phase() {
            RoundPhase::AwaitingEntry => {
                session.select_entry(entry)?;
                entry = (entry + 1) % session.entry_count();
                session.run_drop_to_resolution();
            }
            RoundPhase::AwaitingAnswer => {
                round += 1;
                let correct = match bank.question_by_tag("general") {
                    Some(question) => guess(&question, round),
                    None => {
                        log::info!("question pool exhausted; recycling");
                        bank.reset_used();
                        bank.question_by_tag("general")
                            .map(|question| guess(&question, round))
                            .unwrap_or(false)
                    }
                };
                session.submit_answer(correct)?;
            }
            RoundPhase::FinalStake => session.accept_final_stake()?,
            RoundPhase::FinalAnswer => {
                let correct = bank
                    .question_by_tag("final")
                    .map(|question| final_guess(&question))
                    .unwrap_or(false);
                session.play_final_round(correct)?;
            }
            RoundPhase::GameOver => break,
        }
        for event in session.drain_events() {
            log::info!("{event:?}");
        }
    }
    Ok(session.snapshot().score)
}

/// The demo player cycles through option indices, so some answers land and
/// some miss.
fn guess(question: &Question, round: u32) -> bool {
    match &question.answer {
        Answer::Choice { options, .. } => {
            check_answer(question, round as usize % options.len().max(1))
        }
        Answer::Text { .. } => check_text_answer(question, "dunno"),
    }
}

/// The final is free text; the demo player plays it safe and echoes the
/// accepted answer.
fn final_guess(question: &Question) -> bool {
    match &question.answer {
        Answer::Text { accept } => check_text_answer(question, accept),
        Answer::Choice { .. } => check_answer(question, 0),
    }
}

fn demo_questions() -> Vec<Question> {
    let choice = |id: &str, prompt: &str, options: &[&str], correct: usize| Question {
        id: id.to_owned(),
        tag: "general".to_owned(),
        prompt: prompt.to_owned(),
        answer: Answer::Choice {
            options: options.iter().map(|option| option.to_string()).collect(),
            correct,
        },
    };
    vec![
        choice(
            "q1",
            "Which planet is closest to the sun?",
            &["Venus", "Mercury", "Mars"],
            1,
        ),
        choice(
            "q2",
            "What do you get mixing blue and yellow?",
            &["Green", "Purple", "Orange"],
            0,
        ),
        choice(
            "q3",
            "How many minutes are in a day?",
            &["1440", "3600", "86400"],
            0,
        ),
        choice(
            "q4",
            "Which of these is a prime number?",
            &["21", "27", "31"],
            2,
        ),
        choice(
            "q5",
            "What is the chemical symbol for iron?",
            &["Ir", "Fe", "In"],
            1,
        ),
        Question {
            id: "f1".to_owned(),
            tag: "final".to_owned(),
            prompt: "What is the capital of France?".to_owned(),
            answer: Answer::Text {
                accept: "Paris".to_owned(),
            },
        },
    ]
}
