//! Tolerant parser for the bracket-delimited quiz text convention.
//!
//! The model is instructed (see [`crate::prompts`]) to emit questions as
//! `{Question text?} [a) ...\nb) ...\nc) ...\nd) ...]\n(b)`. Model output
//! carries no schema guarantee, so this parser is a best-effort heuristic:
//! malformed segments contribute nothing and never raise an error. The
//! number of silently dropped segments is exposed for diagnostics via
//! [`parse_quiz_counting`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::defaults::QUIZ_OPTION_LIMIT;

/// First bracketed substring; the body holds the newline-separated options.
static OPTIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// First parenthesized single lowercase letter a-d; the correct answer.
static ANSWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([a-d])\)").unwrap());

/// One multiple-choice question recovered from model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text, trimmed.
    pub question: String,
    /// Up to four options, source order preserved.
    pub options: Vec<String>,
    /// Correct option letter in `'a'..='d'`, when the model supplied one.
    pub correct_answer: Option<char>,
}

impl QuizQuestion {
    /// True iff selecting the zero-based option `index` matches the
    /// correct answer letter (position = letter - 'a').
    pub fn is_correct(&self, index: usize) -> bool {
        if index > 25 {
            return false;
        }
        self.correct_answer == Some((b'a' + index as u8) as char)
    }
}

/// Parse result with drop diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizParse {
    pub questions: Vec<QuizQuestion>,
    /// Question-bearing segments excluded for missing a closing `}`.
    pub dropped_segments: usize,
}

/// Parse a raw model reply into quiz questions, counting dropped segments.
pub fn parse_quiz_counting(raw: &str) -> QuizParse {
    let mut questions = Vec::new();
    let mut dropped_segments = 0;

    // A segment without a '?' is assumed to be framing text, not a question.
    for segment in raw.split('{').filter(|s| s.contains('?')) {
        let parts: Vec<&str> = segment.split('}').collect();
        if parts.len() < 2 {
            dropped_segments += 1;
            continue;
        }

        let question = parts[0].trim().to_string();
        let options_part = parts[1];

        let options = match OPTIONS_RE.captures(options_part) {
            Some(caps) => caps[1]
                .split('\n')
                .map(str::trim)
                .filter(|opt| !opt.is_empty())
                .take(QUIZ_OPTION_LIMIT)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        let correct_answer = ANSWER_RE
            .captures(options_part)
            .and_then(|caps| caps[1].chars().next());

        questions.push(QuizQuestion {
            question,
            options,
            correct_answer,
        });
    }

    QuizParse {
        questions,
        dropped_segments,
    }
}

/// Parse a raw model reply into quiz questions.
///
/// Degrades by omission: segments that do not follow the convention are
/// silently excluded.
pub fn parse_quiz(raw: &str) -> Vec<QuizQuestion> {
    parse_quiz_counting(raw).questions
}
