//! Question selection and answer checking.
//!
//! The game core only consumes the [`QuestionProvider`] capability; where
//! question content comes from is the embedder's business. [`QuestionBank`]
//! is the bundled in-memory provider with seeded, non-repeating selection.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Pick one of the options
    Choice {
        options: Vec<String>,
        correct: usize,
    },
    /// Free text, matched case-insensitively after trimming
    Text { accept: String },
}

/// One quiz question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Round/category key the provider selects by
    pub tag: String,
    pub prompt: String,
    pub answer: Answer,
}

/// Supplies a non-repeating question per tag.
pub trait QuestionProvider {
    /// Next unused question for the tag, or `None` once the tag is
    /// exhausted for this session.
    fn question_by_tag(&mut self, tag: &str) -> Option<Question>;

    /// Forget which questions were already handed out.
    fn reset_used(&mut self);
}

/// Check a selected option against a choice question.
pub fn check_answer(question: &Question, selected: usize) -> bool {
    match &question.answer {
        Answer::Choice { correct, .. } => selected == *correct,
        Answer::Text { .. } => false,
    }
}

/// Check free text against a text question: trimmed, case-insensitive
/// exact match.
pub fn check_text_answer(question: &Question, text: &str) -> bool {
    match &question.answer {
        Answer::Text { accept } => {
            text.trim().to_lowercase() == accept.trim().to_lowercase()
        }
        Answer::Choice { .. } => false,
    }
}

/// In-memory question store with seeded random selection.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    used: HashSet<String>,
    rng: Pcg32,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, seed: u64) -> Self {
        Self {
            questions,
            used: HashSet::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Load a bank from a JSON array of questions.
    pub fn from_json(json: &str, seed: u64) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?, seed))
    }

    /// Extend the pool; already-used ids stay used.
    pub fn add_questions(&mut self, questions: Vec<Question>) {
        self.questions.extend(questions);
    }
}

impl QuestionProvider for QuestionBank {
    fn question_by_tag(&mut self, tag: &str) -> Option<Question> {
        let available: Vec<usize> = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.tag == tag && !self.used.contains(&q.id))
            .map(|(index, _)| index)
            .collect();
        if available.is_empty() {
            return None;
        }
        let pick = available[self.rng.random_range(0..available.len())];
        let question = self.questions[pick].clone();
        self.used.insert(question.id.clone());
        Some(question)
    }

    fn reset_used(&mut self) {
        self.used.clear();
    }
}
