//! Contract tests for the bracket text conventions.
//!
//! The prompt instructs the model to emit these shapes and the parsers
//! assume them; there is no versioned schema in between. These tests pin
//! the tolerant behavior: adversarial and malformed replies must degrade
//! by omission, never by panic or error.

use prepkit_core::{parse_quiz, parse_quiz_counting, render_cheatsheet};

#[test]
fn quiz_reference_reply_parses_completely() {
    let reply = "\
Here are your practice questions!

{Which layer of the OSI model handles routing?}
[a) Transport
b) Network
c) Data link
d) Session]
(b)

{What does TCP stand for?}
[a) Transfer Control Protocol
b) Transmission Control Protocol
c) Transport Connection Protocol
d) Timed Connection Protocol]
(b)
Good luck!";

    let parse = parse_quiz_counting(reply);
    assert_eq!(parse.questions.len(), 2);
    assert_eq!(parse.dropped_segments, 0);
    assert!(parse.questions.iter().all(|q| q.options.len() == 4));
    assert!(parse.questions.iter().all(|q| q.is_correct(1)));
}

#[test]
fn quiz_parser_never_panics_on_adversarial_input() {
    let adversarial = [
        "",
        "{",
        "}",
        "{}",
        "{?}",
        "{?",
        "?}",
        "{{{{????",
        "}}}}????",
        "{a?}{b?}{c?}",
        "{q?}[]()",
        "{q?}[\n\n\n](z)",
        "{q?}[a) [nested] brackets]\n(a)",
        "{q?}](a)[",
        "\u{0}\u{1}{q?}\u{2}}[a) x]\n(a)",
        "{emoji 🦀 question?}[a) 🦀\nb) 🐍]\n(a)",
        "(a)[a) x]{backwards?}",
    ];

    for input in adversarial {
        // Degrade by omission: no panic, and anything returned obeys the
        // option cap.
        let questions = parse_quiz(input);
        for q in &questions {
            assert!(q.options.len() <= 4, "input {:?}", input);
            if let Some(c) = q.correct_answer {
                assert!(('a'..='d').contains(&c), "input {:?}", input);
            }
        }
    }
}

#[test]
fn quiz_partial_garbage_keeps_the_good_questions() {
    let reply = "{Good one?}[a) 1\nb) 2\nc) 3\nd) 4]\n(d)\n{truncated and never closed?";
    let parse = parse_quiz_counting(reply);
    assert_eq!(parse.questions.len(), 1);
    assert_eq!(parse.questions[0].question, "Good one?");
    assert_eq!(parse.dropped_segments, 1);
}

#[test]
fn cheatsheet_reference_reply_renders_completely() {
    let reply = "\
{Photosynthesis}
[Light reactions]
- occur in the **thylakoid** membrane
- produce *ATP* and NADPH

[Calvin cycle]
- fixes CO2 into sugar

{Cellular Respiration}
[Glycolysis]
- splits glucose into pyruvate";

    let sections = render_cheatsheet(reply);
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].title.as_deref(), Some("Photosynthesis"));
    assert_eq!(sections[0].subsections.len(), 1);
    assert_eq!(
        sections[0].subsections[0].bullets[0].plain_text(),
        "occur in the thylakoid membrane"
    );
    assert_eq!(sections[1].title, None);
    assert_eq!(
        sections[1].subsections[0].subtitle.as_deref(),
        Some("Calvin cycle")
    );
    assert_eq!(sections[2].title.as_deref(), Some("Cellular Respiration"));
}

#[test]
fn cheatsheet_renderer_never_panics_on_adversarial_input() {
    let adversarial = [
        "",
        "\n\n\n\n",
        "{",
        "{}",
        "[]",
        "-",
        "- ",
        "{unclosed\n[also unclosed\nbullet",
        "***\n**\n*",
        "{🦀}\n[émphasis]\n- *ünïcode* **test**",
    ];

    for input in adversarial {
        let sections = render_cheatsheet(input);
        for section in &sections {
            for sub in &section.subsections {
                for bullet in &sub.bullets {
                    // plain_text must always be derivable.
                    let _ = bullet.plain_text();
                }
            }
        }
    }
}
