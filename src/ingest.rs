//! Content ingestion: documents in, validated questions out
//!
//! The pipeline concatenates document text, scans it for repeating
//! `Question[: ] ... Answer: ...` blocks, classifies each answer into a
//! question type, and hands the candidates to the bank for deduplicated
//! insertion. Files that cannot be read are skipped with a warning; the
//! batch always runs to completion over the remaining files.
//!
//! Callers wanting an abortable run split their file list and call
//! [`ingest_documents`] per batch; every call commits its accepted
//! questions.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::bank::QuestionBank;
use crate::error::CoreError;
use crate::normalize::normalize;
use crate::types::Question;

/// One extracted Question/Answer block, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaBlock {
    pub question: String,
    pub answer: String,
}

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Files whose text was extracted.
    pub files_read: usize,
    /// Questions newly added to the bank.
    pub added: usize,
    /// Candidates skipped because their normalized text already existed,
    /// in the bank or earlier in this run.
    pub duplicates: usize,
    /// Blocks that did not yield a valid question.
    pub invalid: usize,
    /// Per-file failures; the batch continued without these files.
    pub warnings: Vec<IngestWarning>,
}

#[derive(Debug)]
pub struct IngestWarning {
    pub path: PathBuf,
    pub error: CoreError,
}

/// Read one document as UTF-8 text. The caller has already filtered paths to
/// a supported document type.
pub fn extract_text(path: &Path) -> Result<String, CoreError> {
    std::fs::read_to_string(path).map_err(|source| CoreError::DocumentUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Question\s*\d*:").unwrap())
}

/// Greedy, non-overlapping, order-preserving scan for question blocks. Each
/// block runs from one `Question` marker up to the next marker or end of
/// input, and must contain an `Answer:` line to count.
pub fn scan_blocks(text: &str) -> Vec<QaBlock> {
    let starts: Vec<(usize, usize)> = marker_re()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut blocks = Vec::new();
    for (i, (_, body_start)) in starts.iter().enumerate() {
        let body_end = starts
            .get(i + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(text.len());
        let body = &text[*body_start..body_end];

        let Some((question, answer)) = body.split_once("\nAnswer:") else {
            continue;
        };
        blocks.push(QaBlock {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }
    blocks
}

/// Classify one block into a typed question.
///
/// The answer text is split on commas into trimmed non-empty fragments:
/// two or more make a multiple choice question (first fragment is correct,
/// choices shuffled), a lone `True`/`False` makes a true/false question,
/// anything else is a short answer. Returns `None` when the block has no
/// usable answer.
pub fn classify<R: Rng + ?Sized>(block: &QaBlock, rng: &mut R) -> Option<Question> {
    let question = normalize(&block.question);
    let fragments: Vec<String> = block
        .answer
        .split(',')
        .map(normalize)
        .filter(|s| !s.is_empty())
        .collect();
    let answer = fragments.first()?.clone();

    let q = if fragments.len() >= 2 {
        let mut choices = fragments;
        choices.shuffle(rng);
        Question::MultipleChoice {
            question,
            answer,
            choices,
        }
    } else if answer == "True" || answer == "False" {
        Question::TrueFalse { question, answer }
    } else {
        Question::ShortAnswer { question, answer }
    };
    Some(q)
}

/// Run the full pipeline over `paths`: extract, scan, classify, and insert
/// with deduplication. The bank is persisted once after the whole batch.
pub fn ingest_documents<R: Rng + ?Sized>(
    bank: &mut QuestionBank,
    paths: &[PathBuf],
    rng: &mut R,
) -> Result<IngestReport, CoreError> {
    let mut report = IngestReport::default();

    let mut all_text = String::new();
    for path in paths {
        match extract_text(path) {
            Ok(text) => {
                all_text.push_str(&text);
                all_text.push('\n');
                report.files_read += 1;
            }
            Err(error) => {
                tracing::warn!("skipping document: {}", error);
                report.warnings.push(IngestWarning {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    let all_text = all_text.replace("\r\n", "\n");

    let mut candidates = Vec::new();
    for block in scan_blocks(&all_text) {
        match classify(&block, rng) {
            Some(candidate) => candidates.push(candidate),
            None => report.invalid += 1,
        }
    }

    let batch = bank.append_batch(candidates)?;
    report.added = batch.added;
    report.duplicates = batch.duplicates;
    report.invalid += batch.invalid;

    tracing::info!(
        "ingested {} file(s): {} added, {} duplicate(s), {} invalid",
        report.files_read,
        report.added,
        report.duplicates,
        report.invalid
    );
    Ok(report)
}
