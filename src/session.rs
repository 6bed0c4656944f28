//! Game session: the scoring, streak, and goal state machine
//!
//! The session is a plain value owned by the host; `submit` is the only
//! transition. The host decides when to call it (answer clicks, timers) and
//! renders the emitted events. Nothing here touches the screen or blocks.
//!
//! Scoring rules: a correct answer is worth one point and +0.05x multiplier;
//! five correct answers in a row trigger one bonus wheel spin; reaching the
//! required points ends the round. An incorrect answer resets the streak and
//! nothing else. The question index wraps over the bank forever.

use std::time::Duration;

use rand::Rng;

use crate::bank::QuestionBank;
use crate::types::Question;
use crate::wheel::{self, SpinOutcome};

/// Pacing hint for hosts: how long to show answer feedback before the next
/// question. Not a correctness requirement.
pub const PRESENTATION_DELAY: Duration = Duration::from_secs(1);

/// Correct answers in a row needed to trigger the bonus wheel.
pub const STREAK_BONUS_THRESHOLD: u32 = 5;

const START_POINTS: u32 = 100;
const REQUIRED_POINTS: u32 = 102;
const START_MULTIPLIER: f64 = 1.0;
const MULTIPLIER_STEP: f64 = 0.05;

/// Signals the session emits for the host to render.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    QuestionPresented { index: usize },
    AnswerFeedback { correct: bool },
    BonusTriggered { outcome: SpinOutcome },
    GoalReached,
    NoQuestionsAvailable,
}

/// Result of one submit transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub correct: bool,
    pub events: Vec<SessionEvent>,
}

/// Per-round scoring state. Create with [`GameSession::new`], drive with
/// [`submit`](GameSession::submit), throw away or [`reset`](GameSession::reset)
/// when the player leaves the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    question_index: usize,
    points: u32,
    required_points: u32,
    multiplier: f64,
    streak: u32,
    goal_reached: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            question_index: 0,
            points: START_POINTS,
            required_points: REQUIRED_POINTS,
            multiplier: START_MULTIPLIER,
            streak: 0,
            goal_reached: false,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn required_points(&self) -> u32 {
        self.required_points
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Event for entering the game: the first question, or the empty-bank
    /// signal if there is nothing to present.
    pub fn begin(&self, bank: &QuestionBank) -> SessionEvent {
        if bank.is_empty() {
            SessionEvent::NoQuestionsAvailable
        } else {
            SessionEvent::QuestionPresented {
                index: self.question_index,
            }
        }
    }

    /// The question the session is currently presenting, or `None` on an
    /// empty bank.
    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Option<&'b Question> {
        if bank.is_empty() {
            return None;
        }
        bank.questions().get(self.question_index % bank.len())
    }

    /// Score one answer. Comparison is exact string equality after trimming,
    /// case-sensitive. Emits feedback plus whatever the transition produces:
    /// the next question, a bonus spin, or the goal signal.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        user_answer: &str,
        correct_answer: &str,
        bank_size: usize,
        rng: &mut R,
    ) -> SubmitResult {
        if bank_size == 0 {
            return SubmitResult {
                correct: false,
                events: vec![SessionEvent::NoQuestionsAvailable],
            };
        }
        // Terminal for the round: the goal signal fired once already and the
        // session does not advance until externally reset.
        if self.goal_reached {
            return SubmitResult {
                correct: false,
                events: Vec::new(),
            };
        }

        let correct = user_answer.trim() == correct_answer.trim();
        let mut events = vec![SessionEvent::AnswerFeedback { correct }];

        if correct {
            self.points += 1;
            self.multiplier += MULTIPLIER_STEP;
            self.streak += 1;
            tracing::debug!(
                points = self.points,
                multiplier = self.multiplier,
                streak = self.streak,
                "correct answer"
            );

            if self.points >= self.required_points {
                self.goal_reached = true;
                events.push(SessionEvent::GoalReached);
                return SubmitResult { correct, events };
            }

            if self.streak >= STREAK_BONUS_THRESHOLD {
                self.streak = 0;
                let outcome = wheel::spin(rng);
                tracing::info!(label = outcome.label, "streak bonus triggered");
                events.push(SessionEvent::BonusTriggered { outcome });
            }
        } else {
            self.streak = 0;
            tracing::debug!("incorrect answer, streak reset");
        }

        self.question_index = (self.question_index + 1) % bank_size;
        events.push(SessionEvent::QuestionPresented {
            index: self.question_index,
        });
        SubmitResult { correct, events }
    }

    /// Back to defaults, e.g. when the player exits to the home screen.
    pub fn reset(&mut self) {
        *self = GameSession::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn has_event(result: &SubmitResult, f: impl Fn(&SessionEvent) -> bool) -> bool {
        result.events.iter().any(f)
    }

    #[test]
    fn test_defaults() {
        let s = GameSession::new();
        assert_eq!(s.points(), 100);
        assert_eq!(s.required_points(), 102);
        assert_eq!(s.multiplier(), 1.0);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.question_index(), 0);
        assert!(!s.goal_reached());
    }

    #[test]
    fn test_correct_answer_scores_and_advances() {
        let mut s = GameSession::new();
        let result = s.submit("Paris", "Paris", 10, &mut rng());
        assert!(result.correct);
        assert_eq!(s.points(), 101);
        assert!((s.multiplier() - 1.05).abs() < 1e-9);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.question_index(), 1);
        assert!(has_event(&result, |e| matches!(
            e,
            SessionEvent::QuestionPresented { index: 1 }
        )));
    }

    #[test]
    fn test_comparison_trims_but_keeps_case() {
        let mut s = GameSession::new();
        assert!(s.submit("  Paris \n", "Paris", 10, &mut rng()).correct);
        assert!(!s.submit("paris", "Paris", 10, &mut rng()).correct);
    }

    #[test]
    fn test_incorrect_resets_streak_only() {
        let mut s = GameSession::new();
        s.submit("Paris", "Paris", 10, &mut rng());
        let result = s.submit("London", "Paris", 10, &mut rng());
        assert!(!result.correct);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.points(), 101);
        assert!((s.multiplier() - 1.05).abs() < 1e-9);
        assert!(has_event(&result, |e| matches!(
            e,
            SessionEvent::AnswerFeedback { correct: false }
        )));
    }

    #[test]
    fn test_goal_reached_after_two_correct() {
        let mut s = GameSession::new();
        let first = s.submit("a", "a", 10, &mut rng());
        assert!(!has_event(&first, |e| matches!(e, SessionEvent::GoalReached)));

        let second = s.submit("a", "a", 10, &mut rng());
        assert!(has_event(&second, |e| matches!(e, SessionEvent::GoalReached)));
        assert!(s.goal_reached());
        // No advancement past the goal.
        assert!(!has_event(&second, |e| matches!(
            e,
            SessionEvent::QuestionPresented { .. }
        )));
    }

    #[test]
    fn test_goal_signal_emitted_exactly_once() {
        let mut s = GameSession::new();
        s.submit("a", "a", 10, &mut rng());
        s.submit("a", "a", 10, &mut rng());
        let after = s.submit("a", "a", 10, &mut rng());
        assert!(after.events.is_empty());
        assert_eq!(s.points(), 102);
    }

    #[test]
    fn test_streak_of_five_triggers_one_bonus() {
        let mut s = GameSession::new();
        // Raise the goal out of reach so the streak path is exercised.
        s.required_points = 1000;

        let mut r = rng();
        let mut bonus_events = 0;
        for _ in 0..5 {
            let result = s.submit("a", "a", 10, &mut r);
            bonus_events += result
                .events
                .iter()
                .filter(|e| matches!(e, SessionEvent::BonusTriggered { .. }))
                .count();
        }
        assert_eq!(bonus_events, 1);
        assert_eq!(s.streak(), 0);

        // The bonus still presents the next question afterwards.
        let result = s.submit("a", "a", 10, &mut r);
        assert!(has_event(&result, |e| matches!(
            e,
            SessionEvent::QuestionPresented { .. }
        )));
        assert_eq!(s.streak(), 1);
    }

    #[test]
    fn test_points_and_multiplier_monotonic() {
        let mut s = GameSession::new();
        s.required_points = 1000;
        let mut r = rng();
        let answers = ["a", "b", "a", "a", "c", "a", "a", "a", "a", "b", "a"];

        let mut last_points = s.points();
        let mut last_multiplier = s.multiplier();
        for given in answers {
            s.submit(given, "a", 7, &mut r);
            assert!(s.points() >= last_points);
            assert!(s.multiplier() >= last_multiplier);
            last_points = s.points();
            last_multiplier = s.multiplier();
        }
    }

    #[test]
    fn test_index_wraps_modulo_bank_size() {
        let mut s = GameSession::new();
        s.required_points = 1000;
        let mut r = rng();
        for expected in [1, 2, 0, 1] {
            s.submit("x", "y", 3, &mut r);
            assert_eq!(s.question_index(), expected);
        }
    }

    #[test]
    fn test_single_question_bank_wraps_to_itself() {
        let mut s = GameSession::new();
        let result = s.submit("x", "y", 1, &mut rng());
        assert_eq!(s.question_index(), 0);
        assert!(has_event(&result, |e| matches!(
            e,
            SessionEvent::QuestionPresented { index: 0 }
        )));
    }

    #[test]
    fn test_empty_bank_signals_no_questions() {
        let mut s = GameSession::new();
        let result = s.submit("a", "a", 0, &mut rng());
        assert!(!result.correct);
        assert_eq!(result.events, vec![SessionEvent::NoQuestionsAvailable]);
        assert_eq!(s.points(), 100);

        let dir = tempdir().unwrap();
        let bank = QuestionBank::open(dir.path().join("questions.json"));
        assert_eq!(s.begin(&bank), SessionEvent::NoQuestionsAvailable);
        assert!(s.current_question(&bank).is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut s = GameSession::new();
        s.submit("a", "a", 10, &mut rng());
        s.submit("a", "a", 10, &mut rng());
        assert!(s.goal_reached());
        s.reset();
        assert_eq!(s, GameSession::default());
    }
}
