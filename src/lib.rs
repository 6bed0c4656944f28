//! All-In core - quiz engine
//!
//! The engine behind the All-In quiz game: a persisted question bank, a
//! document ingestion pipeline, the scoring session state machine, and the
//! streak-triggered bonus wheel. Rendering, layout, and navigation belong to
//! the host; this crate only emits [`SessionEvent`] signals for it to draw.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use all_in_core::{GameSession, QuestionBank, SessionEvent};
//!
//! let mut bank = QuestionBank::open(store_path);
//! let mut session = GameSession::new();
//! let mut rng = rand::thread_rng();
//!
//! if let Some(q) = session.current_question(&bank) {
//!     let correct_answer = q.answer().to_string();
//!     let result = session.submit(&user_input, &correct_answer, bank.len(), &mut rng);
//!     for event in &result.events {
//!         // render feedback, the next question, a wheel spin, or the win
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! documents ──> ingest ──> QuestionBank (questions.json)
//!                              │
//!                              ▼
//!                        GameSession ──streak──> wheel
//!                              │
//!                              ▼
//!                       SessionEvent stream ──> host UI
//! ```

pub mod bank;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod session;
pub mod types;
pub mod wheel;

pub use bank::{AppendOutcome, BatchReport, QuestionBank};
pub use error::CoreError;
pub use ingest::{ingest_documents, IngestReport};
pub use session::{GameSession, SessionEvent, SubmitResult, PRESENTATION_DELAY};
pub use types::{Question, QuestionKind};
pub use wheel::{SpinOutcome, SpinPlan};
