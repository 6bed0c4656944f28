//! Question bank: the persisted, deduplicated question collection
//!
//! Single flat JSON file, loaded at startup and rewritten in full on every
//! mutation (load-modify-save, not append-only). Works offline, zero network
//! dependencies. The process is the only writer; the host enforces one
//! mutator at a time.
//!
//! A missing or malformed store is never fatal: the bank starts empty and
//! logs a warning, and the next successful mutation writes a fresh store.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::normalize::dedup_key;
use crate::types::{Question, QuestionRecord};

/// Result of attempting to append a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// A question with the same normalized text already exists. Not an
    /// error; the candidate is skipped.
    Duplicate,
}

/// Per-item tally for a batch insertion (ingestion path).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

/// The validated, deduplicated question collection and its backing store.
#[derive(Debug)]
pub struct QuestionBank {
    path: PathBuf,
    questions: Vec<Question>,
    keys: HashSet<String>,
}

impl QuestionBank {
    /// Open the bank at `path`, loading any existing store. An unreadable
    /// store degrades to an empty bank with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let questions = match read_store(&path) {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!("starting with an empty bank: {}", err);
                Vec::new()
            }
        };
        let mut bank = QuestionBank {
            path,
            questions,
            keys: HashSet::new(),
        };
        bank.rebuild_keys();
        tracing::info!("loaded {} question(s) from {:?}", bank.len(), bank.path);
        bank
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ordered view of the bank, insertion order preserved.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Whether a question with the same normalized text is already stored.
    pub fn contains(&self, question_text: &str) -> bool {
        self.keys.contains(&dedup_key(question_text))
    }

    /// Validate and append a single question, persisting on acceptance.
    /// Duplicates of existing normalized question text are skipped.
    pub fn append(&mut self, question: Question) -> Result<AppendOutcome, CoreError> {
        question.validate()?;
        if !self.insert_in_memory(question) {
            return Ok(AppendOutcome::Duplicate);
        }
        self.persist()?;
        Ok(AppendOutcome::Appended)
    }

    /// Append a batch of candidates with the same per-item semantics as
    /// [`append`](Self::append), persisting once at the end. Candidates
    /// accepted earlier in the batch count as existing for later ones.
    pub fn append_batch(
        &mut self,
        candidates: impl IntoIterator<Item = Question>,
    ) -> Result<BatchReport, CoreError> {
        let mut report = BatchReport::default();
        for candidate in candidates {
            if let Err(err) = candidate.validate() {
                tracing::warn!("rejected candidate: {}", err);
                report.invalid += 1;
                continue;
            }
            if self.insert_in_memory(candidate) {
                report.added += 1;
            } else {
                report.duplicates += 1;
            }
        }
        if report.added > 0 {
            self.persist()?;
        }
        Ok(report)
    }

    /// Remove every record whose stored question text matches `question_text`
    /// by normalized key. Order of the remaining entries is unchanged.
    /// Returns the number of records removed.
    pub fn remove(&mut self, question_text: &str) -> Result<usize, CoreError> {
        let key = dedup_key(question_text);
        let before = self.questions.len();
        self.questions.retain(|q| dedup_key(q.question()) != key);
        let removed = before - self.questions.len();
        if removed > 0 {
            self.keys.remove(&key);
            self.persist()?;
            tracing::info!("removed {} question(s) matching {:?}", removed, question_text);
        }
        Ok(removed)
    }

    /// Reread the store, discarding the in-memory view. Consumers call this
    /// after any mutation elsewhere to avoid a stale view.
    pub fn reload(&mut self) {
        self.questions = match read_store(&self.path) {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!("reload failed, treating store as empty: {}", err);
                Vec::new()
            }
        };
        self.rebuild_keys();
    }

    fn insert_in_memory(&mut self, question: Question) -> bool {
        let key = dedup_key(question.question());
        if self.keys.contains(&key) {
            tracing::debug!("skipped duplicate: {}", question.question());
            return false;
        }
        self.keys.insert(key);
        self.questions.push(question);
        true
    }

    fn rebuild_keys(&mut self) {
        self.keys = self
            .questions
            .iter()
            .map(|q| dedup_key(q.question()))
            .collect();
    }

    fn persist(&self) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CoreError::StoreUnwritable {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        let records: Vec<QuestionRecord> =
            self.questions.iter().map(QuestionRecord::from).collect();
        let json = serde_json::to_string_pretty(&records).map_err(|source| {
            CoreError::StoreUnwritable {
                path: self.path.clone(),
                source: source.into(),
            }
        })?;
        fs::write(&self.path, json).map_err(|source| CoreError::StoreUnwritable {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_store(path: &Path) -> Result<Vec<Question>, CoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        // First run: no store yet. Quietly start empty.
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(CoreError::store_unreadable(path, err)),
    };
    let records: Vec<QuestionRecord> =
        serde_json::from_str(&raw).map_err(|err| CoreError::store_unreadable(path, err))?;
    let mut questions = Vec::with_capacity(records.len());
    for record in records {
        match Question::try_from(record) {
            Ok(q) => questions.push(q),
            // One bad record should not take the whole bank down.
            Err(err) => tracing::warn!("skipped invalid stored record: {}", err),
        }
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn short(question: &str, answer: &str) -> Question {
        Question::ShortAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    fn bank_in(dir: &tempfile::TempDir) -> QuestionBank {
        QuestionBank::open(dir.path().join("questions.json"))
    }

    #[test]
    fn test_open_missing_store_is_empty() {
        let dir = tempdir().unwrap();
        let bank = bank_in(&dir);
        assert!(bank.is_empty());
    }

    #[test]
    fn test_append_persists_and_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");

        let mut bank = QuestionBank::open(&path);
        assert_eq!(
            bank.append(short("Capital of France?", "Paris")).unwrap(),
            AppendOutcome::Appended
        );

        let reopened = QuestionBank::open(&path);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.questions()[0].question(), "Capital of France?");
    }

    #[test]
    fn test_append_duplicate_by_normalized_text() {
        let dir = tempdir().unwrap();
        let mut bank = bank_in(&dir);
        bank.append(short("What’s a “crate”?", "A package")).unwrap();
        // Same question with straight quotes and different case.
        assert_eq!(
            bank.append(short("what's a \"crate\"?", "A package")).unwrap(),
            AppendOutcome::Duplicate
        );
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_append_rejects_invalid() {
        let dir = tempdir().unwrap();
        let mut bank = bank_in(&dir);
        assert!(bank.append(short("", "Paris")).is_err());
        assert!(bank.is_empty());
    }

    #[test]
    fn test_remove_all_matching_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");

        // Seed a store that already contains two records with the same
        // normalized question text (pre-dedup data).
        let seed = serde_json::json!([
            {"question_type": "Short Answer", "question": "A?", "answer": "1"},
            {"question_type": "Short Answer", "question": "Dup?", "answer": "2"},
            {"question_type": "Short Answer", "question": "B?", "answer": "3"},
            {"question_type": "Short Answer", "question": "dup?", "answer": "4"},
            {"question_type": "Short Answer", "question": "C?", "answer": "5"}
        ]);
        std::fs::write(&path, serde_json::to_string(&seed).unwrap()).unwrap();

        let mut bank = QuestionBank::open(&path);
        assert_eq!(bank.remove("DUP?").unwrap(), 2);

        let remaining: Vec<&str> = bank.questions().iter().map(|q| q.question()).collect();
        assert_eq!(remaining, vec!["A?", "B?", "C?"]);

        // Removal is persisted immediately.
        let reopened = QuestionBank::open(&path);
        assert_eq!(reopened.len(), 3);
    }

    #[test]
    fn test_remove_no_match_is_noop() {
        let dir = tempdir().unwrap();
        let mut bank = bank_in(&dir);
        bank.append(short("A?", "1")).unwrap();
        assert_eq!(bank.remove("missing?").unwrap(), 0);
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_malformed_store_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut bank = QuestionBank::open(&path);
        assert!(bank.is_empty());

        // A mutation writes a fresh, valid store over the corrupt one.
        bank.append(short("A?", "1")).unwrap();
        let reopened = QuestionBank::open(&path);
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_invalid_record_skipped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        let seed = serde_json::json!([
            {"question_type": "Short Answer", "question": "A?", "answer": "1"},
            {"question_type": "Essay", "question": "B?", "answer": "2"}
        ]);
        std::fs::write(&path, serde_json::to_string(&seed).unwrap()).unwrap();

        let bank = QuestionBank::open(&path);
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_reload_picks_up_external_rewrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        let mut bank = QuestionBank::open(&path);
        bank.append(short("A?", "1")).unwrap();

        let mut other = QuestionBank::open(&path);
        other.append(short("B?", "2")).unwrap();

        bank.reload();
        assert_eq!(bank.len(), 2);
        assert!(bank.contains("B?"));
    }

    #[test]
    fn test_batch_counts_added_duplicates_invalid() {
        let dir = tempdir().unwrap();
        let mut bank = bank_in(&dir);
        bank.append(short("Existing?", "x")).unwrap();

        let report = bank
            .append_batch(vec![
                short("New one?", "a"),
                short("existing?", "x"),
                short("New one?", "b"), // duplicate within the same batch
                short("", "oops"),
            ])
            .unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 2);
        assert_eq!(report.invalid, 1);
        assert_eq!(bank.len(), 2);
    }
}
