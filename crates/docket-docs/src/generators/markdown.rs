use std::fmt::Write;

use docket_config::Locale;

use crate::model::{DocRecord, ParamItem};

/// Markdown for one module plus its content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
    pub content: String,
    /// BLAKE3 hex digest of `content`.
    pub fingerprint: String,
}

/// Render module documentation as Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    locale: Locale,
}

impl MarkdownRenderer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Render every record of `module` into one document.
    ///
    /// File records come first, then everything else by display name. The title
    /// is the alias of a leading file record, falling back to the module name.
    pub fn render(&self, module: &str, records: &[&DocRecord]) -> RenderedModule {
        let mut items = records.to_vec();
        items.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.display_name().cmp(b.display_name()))
        });

        let title = items
            .first()
            .filter(|record| record.is_file())
            .and_then(|record| record.alias.as_deref())
            .unwrap_or(module);

        let mut blocks = vec![format!("# {title}")];
        blocks.extend(
            items
                .iter()
                .map(|record| self.render_record(record))
                .filter(|block| !block.is_empty()),
        );

        let mut content = blocks.join("\n\n");
        content.push('\n');
        let fingerprint = blake3::hash(content.as_bytes()).to_hex().to_string();
        RenderedModule {
            content,
            fingerprint,
        }
    }

    fn render_record(&self, record: &DocRecord) -> String {
        let mut sections = Vec::new();

        let name = record.display_name();
        if !record.is_file() && !name.is_empty() {
            sections.push(format!("## {name}"));
        }
        if let Some(desc) = record.desc.as_deref().and_then(non_empty) {
            sections.push(desc.to_string());
        }
        if !record.params.is_empty() {
            sections.push(self.render_entries(&self.locale.params, &record.params));
        }
        if let Some(returns) = &record.returns {
            sections.push(self.render_entries(&self.locale.returns, std::slice::from_ref(returns)));
        }
        if !record.examples.is_empty() {
            let mut section = format!("#### {}", self.locale.example);
            for example in &record.examples {
                let _ = write!(section, "\n\n{}", example.trim_end());
            }
            sections.push(section);
        }

        sections.join("\n\n")
    }

    fn render_entries(&self, title: &str, entries: &[ParamItem]) -> String {
        let mut section = format!("#### {title}");
        for entry in entries {
            let _ = write!(section, "\n\n- {}", self.entry_line(entry));
            if let Some(desc) = entry.desc.as_deref().and_then(non_empty) {
                section.push('\n');
                for row in desc.lines() {
                    section.push('\n');
                    if !row.is_empty() {
                        let _ = write!(section, "    {row}");
                    }
                }
            }
        }
        section
    }

    fn entry_line(&self, entry: &ParamItem) -> String {
        let mut parts = Vec::new();
        if !entry.name.is_empty() {
            parts.push(as_code(&entry.name));
        }
        let types = escape_angles(&entry.types.join(" | "));
        if !types.is_empty() {
            parts.push(format!("*{types}*"));
        }
        if entry.optional {
            parts.push(format!("({})", self.locale.optional));
        }
        if let Some(default) = &entry.default {
            parts.push(format!("{} {}", self.locale.default_as, as_code(default)));
        }
        parts.join(" ")
    }
}

fn escape_angles(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Inline code span; the fence grows past the longest backtick run in `value`.
fn as_code(value: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in value.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    if longest == 0 {
        return format!("`{value}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {value} {fence}")
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocKind;

    #[test]
    fn code_spans_grow_around_backticks() {
        assert_eq!(as_code("x"), "`x`");
        assert_eq!(as_code("a`b"), "`` a`b ``");
        assert_eq!(as_code("``"), "``` `` ```");
    }

    #[test]
    fn generic_types_are_escaped() {
        let renderer = MarkdownRenderer::default();
        let entry = ParamItem::new("list").with_type("Array<string>");
        assert_eq!(renderer.entry_line(&entry), r"`list` *Array\<string\>*");
    }

    #[test]
    fn optional_and_default_markers() {
        let renderer = MarkdownRenderer::default();
        let entry = ParamItem::new("x").with_type("number").with_default("5");
        assert_eq!(renderer.entry_line(&entry), "`x` *number* (optional) Default: `5`");
    }

    #[test]
    fn nameless_block_has_no_heading() {
        let renderer = MarkdownRenderer::default();
        let record = DocRecord {
            kind: DocKind::Block,
            desc: Some("Just text.".to_string()),
            ..DocRecord::default()
        };
        assert_eq!(renderer.render_record(&record), "Just text.");
    }

    #[test]
    fn fingerprint_tracks_content() {
        let renderer = MarkdownRenderer::default();
        let record = DocRecord {
            name: "a".to_string(),
            ..DocRecord::default()
        };
        let first = renderer.render("m", &[&record]);
        let again = renderer.render("m", &[&record]);
        let other = renderer.render("n", &[&record]);
        assert_eq!(first, again);
        assert_ne!(first.fingerprint, other.fingerprint);
        assert_eq!(first.fingerprint.len(), 64);
    }
}
