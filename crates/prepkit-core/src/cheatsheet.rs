//! Renderer for the cheat-sheet text convention.
//!
//! The model is instructed to emit blank-line-separated sections where a
//! `{...}` line is a section title, a `[...]` line is a subtopic heading,
//! and remaining lines are bullet points (optionally prefixed `- `).
//! Like the quiz parser this is tolerant: stray lines become bullets, a
//! bullet seen before any heading is emitted unparented, and inline
//! emphasis markers that never close fall back to literal text.

use serde::{Deserialize, Serialize};

/// Inline fragment of a bullet with emphasis applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    /// `**bold**` in the source text.
    Bold(String),
    /// `*italic*` in the source text.
    Italic(String),
}

/// One bullet point, split into emphasis spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub spans: Vec<Span>,
}

impl Bullet {
    /// The bullet text with emphasis markers removed.
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|span| match span {
                Span::Text(t) | Span::Bold(t) | Span::Italic(t) => t.as_str(),
            })
            .collect()
    }
}

/// Subtopic heading with its bullets. `subtitle` is `None` for bullets
/// that appeared before any `[...]` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub subtitle: Option<String>,
    pub bullets: Vec<Bullet>,
}

/// One blank-line-delimited section of the cheat sheet. `title` is `None`
/// when the section never contained a `{...}` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheatsheetSection {
    pub title: Option<String>,
    pub subsections: Vec<Subsection>,
}

/// Split bullet text into emphasis spans.
///
/// `**...**` is matched before `*...*` so bold never degenerates into two
/// empty italics. An opener without a closer is literal text.
fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (marker, len) = if rest.starts_with("**") {
            ("**", 2)
        } else if rest.starts_with('*') {
            ("*", 1)
        } else {
            let mut chars = rest.char_indices();
            chars.next();
            let next = chars.next().map(|(i, _)| i).unwrap_or(rest.len());
            plain.push_str(&rest[..next]);
            rest = &rest[next..];
            continue;
        };

        match rest[len..].find(marker) {
            Some(end) if end > 0 => {
                if !plain.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut plain)));
                }
                let body = rest[len..len + end].to_string();
                spans.push(if len == 2 {
                    Span::Bold(body)
                } else {
                    Span::Italic(body)
                });
                rest = &rest[len + end + len..];
            }
            _ => {
                // Unclosed or empty marker: keep it literal.
                plain.push_str(&rest[..len]);
                rest = &rest[len..];
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// Strip a leading `- ` marker the way the display layer always has:
/// only when the hyphen is the very first character of the raw line.
fn clean_line(line: &str) -> &str {
    match line.strip_prefix('-') {
        Some(rest) => rest.trim_start().trim_end(),
        None => line.trim(),
    }
}

/// Render a raw model reply into cheat-sheet sections.
pub fn render_cheatsheet(raw: &str) -> Vec<CheatsheetSection> {
    let mut sections = Vec::new();

    for block in raw.split("\n\n").filter(|b| !b.trim().is_empty()) {
        let mut section = CheatsheetSection {
            title: None,
            subsections: Vec::new(),
        };

        for line in block.split('\n').filter(|l| !l.trim().is_empty()) {
            let cleaned = clean_line(line);
            if cleaned.len() >= 2 && cleaned.starts_with('{') && cleaned.ends_with('}') {
                // A second title inside one block starts a fresh section so
                // display order is preserved.
                if section.title.is_some() || !section.subsections.is_empty() {
                    sections.push(std::mem::replace(
                        &mut section,
                        CheatsheetSection {
                            title: None,
                            subsections: Vec::new(),
                        },
                    ));
                }
                section.title = Some(cleaned[1..cleaned.len() - 1].to_string());
            } else if cleaned.len() >= 2 && cleaned.starts_with('[') && cleaned.ends_with(']') {
                section.subsections.push(Subsection {
                    subtitle: Some(cleaned[1..cleaned.len() - 1].to_string()),
                    bullets: Vec::new(),
                });
            } else {
                let bullet = Bullet {
                    spans: parse_spans(cleaned),
                };
                match section.subsections.last_mut() {
                    Some(sub) => sub.bullets.push(bullet),
                    None => section.subsections.push(Subsection {
                        subtitle: None,
                        bullets: vec![bullet],
                    }),
                }
            }
        }

        if section.title.is_some() || !section.subsections.is_empty() {
            sections.push(section);
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet_texts(section: &CheatsheetSection) -> Vec<String> {
        section
            .subsections
            .iter()
            .flat_map(|s| s.bullets.iter().map(|b| b.plain_text()))
            .collect()
    }

    #[test]
    fn test_two_sections_with_subtopics_and_bullets() {
        let sections =
            render_cheatsheet("{Title}\n[Sub]\n- point one\n\n{Title2}\n[Sub2]\n- point two");
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].title.as_deref(), Some("Title"));
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].subtitle.as_deref(), Some("Sub"));
        assert_eq!(bullet_texts(&sections[0]), vec!["point one"]);

        assert_eq!(sections[1].title.as_deref(), Some("Title2"));
        assert_eq!(sections[1].subsections[0].subtitle.as_deref(), Some("Sub2"));
        assert_eq!(bullet_texts(&sections[1]), vec!["point two"]);
    }

    #[test]
    fn test_empty_sections_dropped() {
        let sections = render_cheatsheet("\n\n{A}\n- x\n\n\n\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_bullet_before_any_heading_is_unparented() {
        let sections = render_cheatsheet("- stray point\n[Sub]\n- parented");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[0].subsections.len(), 2);
        assert_eq!(sections[0].subsections[0].subtitle, None);
        assert_eq!(sections[0].subsections[0].bullets[0].plain_text(), "stray point");
        assert_eq!(sections[0].subsections[1].subtitle.as_deref(), Some("Sub"));
    }

    #[test]
    fn test_leading_hyphen_stripped_only_at_line_start() {
        let sections = render_cheatsheet("-point\n  - indented");
        let bullets = bullet_texts(&sections[0]);
        assert_eq!(bullets[0], "point");
        // Indented hyphens are kept verbatim.
        assert_eq!(bullets[1], "- indented");
    }

    #[test]
    fn test_hyphen_prefixed_headings_still_classify() {
        let sections = render_cheatsheet("- {Title}\n- [Sub]\n- body");
        assert_eq!(sections[0].title.as_deref(), Some("Title"));
        assert_eq!(sections[0].subsections[0].subtitle.as_deref(), Some("Sub"));
    }

    #[test]
    fn test_second_title_in_block_starts_new_section() {
        let sections = render_cheatsheet("{One}\n- a\n{Two}\n- b");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title.as_deref(), Some("One"));
        assert_eq!(sections[1].title.as_deref(), Some("Two"));
        assert_eq!(bullet_texts(&sections[1]), vec!["b"]);
    }

    #[test]
    fn test_bold_and_italic_spans() {
        let spans = parse_spans("know **these** and *those* cold");
        assert_eq!(
            spans,
            vec![
                Span::Text("know ".to_string()),
                Span::Bold("these".to_string()),
                Span::Text(" and ".to_string()),
                Span::Italic("those".to_string()),
                Span::Text(" cold".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_marker_stays_literal() {
        assert_eq!(
            parse_spans("a *dangling start"),
            vec![Span::Text("a *dangling start".to_string())]
        );
        assert_eq!(
            parse_spans("**also dangling"),
            vec![Span::Text("**also dangling".to_string())]
        );
    }

    #[test]
    fn test_plain_text_strips_markers() {
        let bullet = Bullet {
            spans: parse_spans("**Mnemonic**: *Every* Good Boy"),
        };
        assert_eq!(bullet.plain_text(), "Mnemonic: Every Good Boy");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(render_cheatsheet("").is_empty());
        assert!(render_cheatsheet("\n\n\n").is_empty());
    }

    #[test]
    fn test_unicode_bullets_survive() {
        let sections = render_cheatsheet("{Résumé}\n- naïve ≠ wrong");
        assert_eq!(sections[0].title.as_deref(), Some("Résumé"));
        assert_eq!(bullet_texts(&sections[0]), vec!["naïve ≠ wrong"]);
    }
}
