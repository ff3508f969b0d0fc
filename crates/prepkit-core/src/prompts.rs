//! Prompt construction for the remote model.
//!
//! The quiz and cheat-sheet prompts double as the informal wire contract:
//! they instruct the model to emit the exact bracket conventions that
//! [`crate::quiz`] and [`crate::cheatsheet`] assume. Changing the wording
//! here without updating the parsers breaks the round trip.

use crate::feedback::StruggledQuestion;

/// Default prompt for cheat-sheet generation when the client supplies none.
pub const CHEATSHEET_PROMPT: &str = "Please create a cheat sheet based on the provided document. \
    Enclose each main topic title in curly brackets {}, enclose each subtopic in square \
    brackets [], and list the key points under it as bullet points starting with '- '. \
    Separate topics with a blank line.";

/// Quiz generation prompt. The format instruction is reproduced verbatim for
/// every quiz request so the reply stays parseable.
pub const QUIZ_PROMPT: &str = "Generate 5 multiple-choice questions based on the document \
    provided. Each question should be enclosed in curly brackets {}. List the four options \
    within square brackets [], with each option labeled with a), b), c), and d) on a new line \
    using \n to separate them. Place the correct option in parentheses () as a letter \
    (a, b, c, or d) on a new line after the options. Ensure the output strictly follows this \
    format: {Question text} [a) Option A\nb) Option B\nc) Option C\nd) Option D] \n(Correct \
    option letter). Please use this format exactly as described.";

/// Build the feedback prompt: document text first, then each struggled
/// question with its attempt count.
pub fn feedback_prompt(file_content: &str, struggled: &[StruggledQuestion]) -> String {
    let question_lines = struggled
        .iter()
        .map(|s| format!("Question: \"{}\" ({} attempts)", s.question, s.attempts))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Given the following file content on which the quiz questions are based:\n\n\
         {file_content}\n\n\
         Provide feedback summary for these quiz questions where the user took more than one \
         attempt and refer to the file content to provide the feedback:\n{question_lines}"
    )
}

/// Feedback prompt variant used when the document is attached as a stored
/// file reference instead of inlined text.
pub fn feedback_prompt_for_document(struggled: &[StruggledQuestion]) -> String {
    let question_lines = struggled
        .iter()
        .map(|s| format!("Question: \"{}\" ({} attempts)", s.question, s.attempts))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Provide feedback summary for these quiz questions where the user took more than one \
         attempt and refer to the provided document to explain the underlying concepts:\n\
         {question_lines}"
    )
}

/// Build the practice prompt: replacement questions covering the same topic
/// areas as the struggled ones, worded differently, in the quiz format.
pub fn more_questions_prompt(struggled: &[StruggledQuestion]) -> String {
    let question_lines = struggled
        .iter()
        .map(|s| format!("Question: \"{}\" ({} attempts)", s.question, s.attempts))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate new multiple-choice questions based on the areas where the user struggled in \
         the previous quiz. Ensure that the new questions are not the same as those in the \
         previous quiz, but focus on the same topic areas where the user faced difficulty, as \
         indicated by the number of attempts provided. Each question should help the user learn \
         from their mistakes by covering similar concepts but with different wording or \
         structure. Each question should be enclosed in curly brackets {{}}. List the four \
         options within square brackets [], with each option labeled with a), b), c), and d) on \
         a new line using \n to separate them. Place the correct option in parentheses () as a \
         letter (a, b, c, or d) on a new line after the options. Ensure the output strictly \
         follows this format: {{Question text}} [a) Option A\nb) Option B\nc) Option C\nd) \
         Option D] \n(Correct option letter). Please use this format exactly as described.:\n\
         {question_lines}"
    )
}
