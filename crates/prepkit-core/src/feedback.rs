//! Struggled-question filtering for the feedback and practice flows.

use serde::{Deserialize, Serialize};

/// Canned reply returned without calling the remote model when no question
/// took more than one attempt.
pub const NO_FEEDBACK_NEEDED: &str =
    "No additional feedback is needed. All questions were answered correctly in one attempt.";

/// A question the user needed more than one attempt to answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StruggledQuestion {
    pub question: String,
    pub attempts: u32,
}

/// Pair questions with their attempt counts and keep those answered in more
/// than one attempt.
///
/// The two slices are index-aligned; on a length mismatch the unpaired
/// tail is skipped.
pub fn struggled(questions: &[String], attempts: &[u32]) -> Vec<StruggledQuestion> {
    questions
        .iter()
        .zip(attempts.iter())
        .filter(|(_, &n)| n > 1)
        .map(|(q, &n)| StruggledQuestion {
            question: q.clone(),
            attempts: n,
        })
        .collect()
}

/// Split generated feedback text into the flat line sequence the client
/// displays. No structural parsing beyond newlines.
pub fn split_feedback_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filters_to_multi_attempt_indices() {
        let questions = qs(&["q0", "q1", "q2", "q3"]);
        let result = struggled(&questions, &[1, 2, 1, 3]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].question, "q1");
        assert_eq!(result[0].attempts, 2);
        assert_eq!(result[1].question, "q3");
        assert_eq!(result[1].attempts, 3);
    }

    #[test]
    fn test_all_first_try_yields_empty() {
        let questions = qs(&["q0", "q1", "q2"]);
        assert!(struggled(&questions, &[1, 1, 1]).is_empty());
    }

    #[test]
    fn test_zero_attempts_not_struggled() {
        // An unanswered question never triggers feedback.
        let questions = qs(&["q0"]);
        assert!(struggled(&questions, &[0]).is_empty());
    }

    #[test]
    fn test_length_mismatch_skips_unpaired() {
        let questions = qs(&["q0", "q1", "q2"]);
        let result = struggled(&questions, &[2, 2]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_split_feedback_lines_preserves_blank_lines() {
        let lines = split_feedback_lines("first\n\nsecond");
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_canned_line_mentions_one_attempt() {
        assert!(NO_FEEDBACK_NEEDED.contains("one attempt"));
    }
}
