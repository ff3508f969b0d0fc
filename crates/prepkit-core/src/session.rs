//! Quiz session bookkeeping.
//!
//! Holds the client-side state machine: one question at a time, unlimited
//! re-attempts on an incorrect answer, and an attempt counter per question
//! that feeds the struggled-question filter once the session completes.

use serde::{Deserialize, Serialize};

use crate::feedback::StruggledQuestion;
use crate::quiz::{parse_quiz, QuizQuestion};

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for an answer to the question at this index.
    Answering(usize),
    /// Every question has been answered correctly.
    Completed,
}

/// Outcome of a single answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// A quiz in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    attempts: Vec<u32>,
    state: SessionState,
}

impl QuizSession {
    /// Start a session over an already-parsed question sequence.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let attempts = vec![0; questions.len()];
        let state = if questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::Answering(0)
        };
        Self {
            questions,
            attempts,
            state,
        }
    }

    /// Start a session directly from raw model output.
    pub fn from_text(raw: &str) -> Self {
        Self::new(parse_quiz(raw))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Per-question attempt counts, index-aligned with `questions`.
    pub fn attempts(&self) -> &[u32] {
        &self.attempts
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            SessionState::Answering(i) => self.questions.get(i),
            SessionState::Completed => None,
        }
    }

    /// Submit the zero-based option index selected for the current
    /// question. Increments that question's attempt counter exactly once,
    /// advances on a correct answer, and stays put otherwise. Returns
    /// `None` when the session is already complete.
    pub fn submit_answer(&mut self, option_index: usize) -> Option<AnswerOutcome> {
        let index = match self.state {
            SessionState::Answering(i) => i,
            SessionState::Completed => return None,
        };

        self.attempts[index] += 1;

        if self.questions[index].is_correct(option_index) {
            self.state = if index + 1 < self.questions.len() {
                SessionState::Answering(index + 1)
            } else {
                SessionState::Completed
            };
            Some(AnswerOutcome::Correct)
        } else {
            Some(AnswerOutcome::Incorrect)
        }
    }

    /// Questions that took more than one attempt, for the feedback flow.
    pub fn struggled(&self) -> Vec<StruggledQuestion> {
        self.questions
            .iter()
            .zip(self.attempts.iter())
            .filter(|(_, &n)| n > 1)
            .map(|(q, &n)| StruggledQuestion {
                question: q.question.clone(),
                attempts: n,
            })
            .collect()
    }

    /// Replace the question set from freshly generated text and restart at
    /// the first question with zeroed counters ("Practice More").
    pub fn practice_more(&mut self, raw: &str) {
        *self = Self::from_text(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str =
        "{First?}[a) right\nb) wrong]\n(a)\n\n{Second?}[a) wrong\nb) right]\n(b)";

    #[test]
    fn test_new_session_starts_at_first_question() {
        let session = QuizSession::from_text(TWO_QUESTIONS);
        assert_eq!(session.state(), SessionState::Answering(0));
        assert_eq!(session.attempts(), &[0, 0]);
        assert_eq!(session.current_question().unwrap().question, "First?");
    }

    #[test]
    fn test_correct_answer_advances() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        assert_eq!(session.submit_answer(0), Some(AnswerOutcome::Correct));
        assert_eq!(session.state(), SessionState::Answering(1));
        assert_eq!(session.attempts(), &[1, 0]);
    }

    #[test]
    fn test_incorrect_answer_stays_and_counts() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        assert_eq!(session.submit_answer(1), Some(AnswerOutcome::Incorrect));
        assert_eq!(session.submit_answer(1), Some(AnswerOutcome::Incorrect));
        assert_eq!(session.state(), SessionState::Answering(0));
        assert_eq!(session.attempts(), &[2, 0]);
    }

    #[test]
    fn test_last_correct_answer_completes() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        session.submit_answer(0);
        session.submit_answer(1);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_submission_after_completion_is_ignored() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        session.submit_answer(0);
        session.submit_answer(1);
        assert_eq!(session.submit_answer(0), None);
        // Counters are untouched.
        assert_eq!(session.attempts(), &[1, 1]);
    }

    #[test]
    fn test_struggled_reflects_retries() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        session.submit_answer(1); // wrong
        session.submit_answer(1); // wrong again
        session.submit_answer(0); // right
        session.submit_answer(1); // right first try
        assert!(session.is_complete());

        let struggled = session.struggled();
        assert_eq!(struggled.len(), 1);
        assert_eq!(struggled[0].question, "First?");
        assert_eq!(struggled[0].attempts, 3);
    }

    #[test]
    fn test_practice_more_resets_with_new_questions() {
        let mut session = QuizSession::from_text(TWO_QUESTIONS);
        session.submit_answer(1);
        session.practice_more("{Fresh?}[a) yes\nb) no]\n(a)");
        assert_eq!(session.state(), SessionState::Answering(0));
        assert_eq!(session.questions().len(), 1);
        assert_eq!(session.attempts(), &[0]);
    }

    #[test]
    fn test_empty_parse_completes_immediately() {
        let session = QuizSession::from_text("nothing parseable here");
        assert!(session.is_complete());
        assert!(session.struggled().is_empty());
    }

    #[test]
    fn test_question_without_answer_key_never_advances() {
        let mut session = QuizSession::from_text("{Unanswerable?}[a) x\nb) y]");
        assert_eq!(session.submit_answer(0), Some(AnswerOutcome::Incorrect));
        assert_eq!(session.submit_answer(1), Some(AnswerOutcome::Incorrect));
        assert_eq!(session.attempts(), &[2]);
    }
}
