//! Tag grammar for doc comments.
//!
//! A comment body is split into logical lines with the `*` decoration removed.
//! Lines of the form `@tag rest` open a new block; any other line continues
//! the block that is currently open (or starts the description when none is).
//! Every tag transition flushes the open block into the [`ParsedJsDoc`].

use crate::error::{DocsError, Result};
use crate::merge::{fold_duplicate, merge_seed};
use crate::model::{DocKind, DocRecord, DocSeed, ParamItem};

/// Info string used when an `@example` has to be fenced.
const EXAMPLE_FENCE_LANG: &str = "js";

/// Text of a comment without its `/*`, `*/` or `//` delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawComment<'a> {
    pub text: &'a str,
    /// `true` for `/* */` comments, `false` for `//` comments.
    pub block: bool,
}

impl<'a> RawComment<'a> {
    pub fn block(text: &'a str) -> Self {
        Self { text, block: true }
    }

    pub fn line(text: &'a str) -> Self {
        Self { text, block: false }
    }

    /// Block comments whose body starts with the `*` sigil (`/** ... */`).
    pub fn is_doc_style(&self) -> bool {
        self.block && self.text.starts_with('*')
    }
}

/// What the comment itself says, before any seed is applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedJsDoc {
    pub kind: DocKind,
    /// Set by `@name`.
    pub name: Option<String>,
    pub alias: Option<String>,
    pub desc: Option<String>,
    pub params: Vec<ParamItem>,
    pub returns: Option<ParamItem>,
    pub examples: Vec<String>,
}

/// Parse one comment into a record, merging it with `seed` when given.
///
/// Returns `Ok(None)` for comments that are not doc style.
///
/// # Errors
///
/// [`DocsError::MalformedTagHeader`] when a `@param` or `@returns` header
/// cannot be read. The whole comment is rejected in that case.
pub fn parse_comment(
    comment: &RawComment<'_>,
    seed: Option<&DocSeed>,
) -> Result<Option<DocRecord>> {
    if !comment.is_doc_style() {
        return Ok(None);
    }
    let parsed = parse_jsdoc(&comment.text[1..])?;
    Ok(Some(merge_seed(seed, parsed)))
}

enum OpenBlock {
    Desc(Vec<String>),
    Param { item: ParamItem, lines: Vec<String> },
    Returns { item: ParamItem, lines: Vec<String> },
    /// First line is the caption.
    Example(Vec<String>),
    /// Body of a tag we do not know; swallowed.
    Ignored,
}

impl OpenBlock {
    fn push(&mut self, line: String) {
        match self {
            OpenBlock::Desc(lines)
            | OpenBlock::Example(lines)
            | OpenBlock::Param { lines, .. }
            | OpenBlock::Returns { lines, .. } => lines.push(line),
            OpenBlock::Ignored => {}
        }
    }
}

/// Parse a comment body (text after the leading `*` sigil).
pub fn parse_jsdoc(body: &str) -> Result<ParsedJsDoc> {
    let mut doc = ParsedJsDoc::default();
    let mut block: Option<OpenBlock> = None;

    for line in normalize_lines(body) {
        let Some((tag, payload)) = split_tag(&line) else {
            block
                .get_or_insert_with(|| OpenBlock::Desc(Vec::new()))
                .push(line);
            continue;
        };

        flush(&mut doc, block.take());
        block = match tag {
            "desc" | "description" => Some(OpenBlock::Desc(vec![payload.trim().to_string()])),
            "param" | "arg" | "argument" => {
                let (item, first) = parse_header(tag, payload, true)?;
                Some(OpenBlock::Param {
                    item,
                    lines: vec![first],
                })
            }
            "returns" | "return" => {
                let (item, first) = parse_header(tag, payload, false)?;
                Some(OpenBlock::Returns {
                    item,
                    lines: vec![first],
                })
            }
            "example" => Some(OpenBlock::Example(vec![payload.trim().to_string()])),
            "name" => {
                doc.name = non_empty(payload);
                None
            }
            "alias" => {
                doc.alias = non_empty(payload);
                None
            }
            "file" | "fileoverview" | "overview" => {
                doc.kind = DocKind::File;
                Some(OpenBlock::Desc(vec![payload.trim().to_string()]))
            }
            _ => Some(OpenBlock::Ignored),
        };
    }
    flush(&mut doc, block.take());

    Ok(doc)
}

fn flush(doc: &mut ParsedJsDoc, block: Option<OpenBlock>) {
    let Some(block) = block else {
        return;
    };
    match block {
        OpenBlock::Desc(lines) => {
            if let Some(content) = block_content(&lines) {
                doc.desc = Some(match doc.desc.take() {
                    Some(existing) => format!("{existing}\n{content}"),
                    None => content,
                });
            }
        }
        OpenBlock::Param { mut item, lines } => {
            item.desc = block_content(&lines);
            let existing = doc
                .params
                .iter_mut()
                .find(|param| !item.name.is_empty() && param.name == item.name);
            match existing {
                Some(param) => fold_duplicate(param, item),
                None => doc.params.push(item),
            }
        }
        OpenBlock::Returns { mut item, lines } => {
            item.desc = block_content(&lines);
            match doc.returns.as_mut() {
                Some(returns) => fold_duplicate(returns, item),
                None => doc.returns = Some(item),
            }
        }
        OpenBlock::Example(lines) => {
            if let Some(example) = render_example(&lines) {
                doc.examples.push(example);
            }
        }
        OpenBlock::Ignored => {}
    }
}

fn normalize_lines(body: &str) -> Vec<String> {
    body.trim_end()
        .lines()
        .map(|line| strip_decoration(line).trim_end().to_string())
        .collect()
}

fn strip_decoration(line: &str) -> &str {
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        // `/** text */` keeps the space after the sigil
        None => line.strip_prefix(char::is_whitespace).unwrap_or(line),
    }
}

/// `@tag rest` → `("tag", " rest")`. The tag must be followed by whitespace or
/// the end of the line.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('@')?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let (tag, payload) = rest.split_at(end);
    if !payload.is_empty() && !payload.starts_with(char::is_whitespace) {
        return None;
    }
    Some((tag, payload))
}

/// Lines joined with blank lines trimmed from both ends.
fn block_content(lines: &[String]) -> Option<String> {
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let end = lines.iter().rposition(|line| !line.trim().is_empty())?;
    Some(lines[start..=end].join("\n"))
}

/// `[{type}] [name | [name=default]] [description]`
///
/// `named` is false for `@returns`, where everything after the type is description.
fn parse_header(tag: &str, payload: &str, named: bool) -> Result<(ParamItem, String)> {
    let malformed = || DocsError::malformed(tag, payload);
    let mut item = ParamItem::default();
    let mut rest = payload.trim_start();

    if rest.starts_with('{') {
        let close = matching_close(rest, '{', '}').ok_or_else(malformed)?;
        let inner = rest[1..close].trim();
        if inner.is_empty() {
            return Err(malformed());
        }
        item.types = split_union(inner);
        rest = rest[close + 1..].trim_start();
    }

    if named {
        if rest.starts_with('[') {
            let close = matching_close(rest, '[', ']').ok_or_else(malformed)?;
            let inner = &rest[1..close];
            let (name, default) = match inner.split_once('=') {
                Some((name, default)) => (name.trim(), Some(default.trim())),
                None => (inner.trim(), None),
            };
            if name.is_empty() {
                return Err(malformed());
            }
            item.name = name.to_string();
            item.optional = true;
            item.default = default.filter(|value| !value.is_empty()).map(str::to_string);
            rest = rest[close + 1..].trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            if !token.is_empty() && token.chars().all(is_name_char) {
                item.name = token.to_string();
                rest = rest[end..].trim_start();
            }
        }
    }

    let desc = match rest.strip_prefix('-') {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => after.trim(),
        _ => rest.trim(),
    };
    Ok((item, desc.to_string()))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.')
}

/// Byte index of the bracket closing the one `text` starts with.
fn matching_close(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Split a type expression on top-level `|`.
fn split_union(ty: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut prev = ' ';
    for (idx, c) in ty.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            // `=>` of a function type is not a closing bracket
            '>' if prev == '=' => {}
            ')' | ']' | '}' | '>' => depth -= 1,
            '|' if depth == 0 => {
                parts.push(&ty[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&ty[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fence the example unless it already carries its own fence.
fn render_example(lines: &[String]) -> Option<String> {
    if lines.iter().any(|line| line.trim_start().starts_with("```")) {
        return block_content(lines);
    }
    let caption = lines.first().map(|line| line.trim()).unwrap_or_default();
    let code = lines.get(1..).and_then(block_content);
    if caption.is_empty() && code.is_none() {
        return None;
    }

    let mut out = Vec::new();
    if !caption.is_empty() {
        out.push(caption.to_string());
    }
    out.push(format!("```{EXAMPLE_FENCE_LANG}"));
    if let Some(code) = code {
        out.push(code);
    }
    out.push("```".to_string());
    Some(out.join("\n"))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
