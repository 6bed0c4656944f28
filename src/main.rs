//! All-In terminal host
//!
//! Plays the quiz in a terminal: presents questions, scores answers, spins
//! the bonus wheel on streaks, and stops when the goal is reached. All game
//! rules live in the library; this binary only renders events and reads
//! stdin.
//!
//! Run with: cargo run
//! Use a custom store: cargo run -- --store path/to/questions.json

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;

use all_in_core::{GameSession, Question, QuestionBank, SessionEvent};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let store_path = match args.iter().position(|a| a == "--store") {
        Some(i) => PathBuf::from(
            args.get(i + 1)
                .context("usage: all-in [--store <questions.json>]")?,
        ),
        None => default_store_path()?,
    };

    let bank = QuestionBank::open(&store_path);
    let mut session = GameSession::new();
    let mut rng = rand::thread_rng();

    if session.begin(&bank) == SessionEvent::NoQuestionsAvailable {
        println!("No questions available.");
        println!("Import some first: cargo run --bin import -- <files-or-dirs>");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(question) = session.current_question(&bank) else {
            println!("No questions available.");
            break;
        };
        let correct_answer = question.answer().to_string();

        print_question(&session, question, &mut rng);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let input = line?;
        if input.trim() == "quit" {
            break;
        }

        let result = session.submit(&input, &correct_answer, bank.len(), &mut rng);
        let mut finished = false;
        for event in &result.events {
            match event {
                SessionEvent::AnswerFeedback { correct: true } => println!("Correct!"),
                SessionEvent::AnswerFeedback { correct: false } => {
                    println!("Wrong! The answer was: {}", correct_answer)
                }
                SessionEvent::BonusTriggered { outcome } => {
                    println!("*** 5 in a row! The bonus wheel lands on {} ***", outcome.label)
                }
                SessionEvent::GoalReached => {
                    println!("Congratulations! You reached {} points.", session.points());
                    finished = true;
                }
                SessionEvent::QuestionPresented { .. } => {}
                SessionEvent::NoQuestionsAvailable => {
                    println!("No questions available.");
                    finished = true;
                }
            }
        }
        if finished {
            break;
        }
        println!();
    }

    Ok(())
}

fn print_question(session: &GameSession, question: &Question, rng: &mut impl rand::Rng) {
    println!(
        "Points: {}/{}   Multiplier: {:.2}x   Streak: {}",
        session.points(),
        session.required_points(),
        session.multiplier(),
        session.streak()
    );
    println!(
        "Question {}: {}",
        session.question_index() + 1,
        question.question()
    );
    if let Some(mut choices) = question.choices() {
        choices.shuffle(rng);
        for choice in choices {
            println!("  - {}", choice);
        }
    }
}

fn default_store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("all-in");
    Ok(data_dir.join("questions.json"))
}
