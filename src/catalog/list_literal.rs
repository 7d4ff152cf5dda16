//! Parsing of the list-literal cells used by the catalog source file, e.g.
//! `['Nirvana', "Guns N' Roses"]`.

use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ITEM_REGEX: Regex =
        Regex::new(r#"\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*(?:,|$)"#)
            .expect("Invalid Regex, this should be fixed at compile time.");
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('\\' | '\'' | '"')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parses a list literal of quoted strings. A blank input is an empty list.
pub fn parse_list_literal(text: &str) -> Result<Vec<String>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(vec![]);
    }

    let inner = match trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Some(inner) => inner,
        None => bail!("Not a list literal: {}", text),
    };

    if inner.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut items = vec![];
    let mut position = 0;
    for captures in ITEM_REGEX.captures_iter(inner) {
        let whole = captures.get(0).expect("Capture group 0 is always present.");
        if whole.start() != position {
            bail!("Unexpected content in list literal: {}", text);
        }
        position = whole.end();

        let raw = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        items.push(unescape(raw));

        if position == inner.len() {
            break;
        }
    }

    if position != inner.len() || items.is_empty() {
        bail!("Malformed list literal: {}", text);
    }
    Ok(items)
}

/// Serializes items back into the list-literal form.
pub fn format_list_literal<T: AsRef<str>>(items: &[T]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            if item.contains('\'') && !item.contains('"') {
                format!("\"{}\"", item)
            } else {
                format!("'{}'", item.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}
