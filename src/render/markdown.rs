use thiserror::Error;

use crate::document::Section;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Section '{heading}' has level 0; levels start at 1")]
    ZeroLevel { heading: String },
}

/// Renders `sections`, in the order given, under a level-1 `title` heading.
///
/// Each section becomes a heading with `level` markers followed by its trimmed content.
/// Sections with blank content contribute only their heading. Levels are used as stored;
/// a child whose level skips relative to its parent is rendered as is.
///
/// Level 0 is the one exception: rather than emitting a heading with no markers
/// (`" heading"`), it is reported as malformed input with [`RenderError::ZeroLevel`].
pub fn render_markdown(title: &str, sections: &[Section]) -> Result<String, RenderError> {
    let mut lines: Vec<String> = Vec::with_capacity(2 + sections.len() * 4);

    lines.push(format!("# {title}"));
    lines.push(String::new());

    for section in sections {
        if section.level == 0 {
            return Err(RenderError::ZeroLevel {
                heading: section.heading.clone(),
            });
        }

        let marker = "#".repeat(section.level as usize);
        lines.push(format!("{marker} {}", section.heading));
        lines.push(String::new());

        let content = section.content.trim();
        if !content.is_empty() {
            lines.push(content.to_string());
            lines.push(String::new());
        }
    }

    Ok(lines.join("\n").trim().to_string())
}
