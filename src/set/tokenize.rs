//! Set-notation tokenizer
//!
//! A token is a run of non-space, non-quote characters and/or single-quoted
//! spans, so `'my node'-3` is one token.

use crate::error::{GraphError, GraphResult};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"(?:[^\s']+|'[^']*')+").expect("token pattern is valid"))
}

/// Split text into raw tokens, quotes kept
pub fn tokenize(text: &str) -> GraphResult<Vec<String>> {
    if text.matches('\'').count() % 2 != 0 {
        return Err(GraphError::validation("unterminated quoted label"));
    }
    Ok(token_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect())
}

pub fn strip_quotes(token: &str) -> String {
    token.replace('\'', "")
}

pub fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'')
}

/// Split an edge token on `-` outside quoted spans
pub fn split_edge_token(token: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in token.char_indices() {
        match c {
            '\'' => in_quotes = !in_quotes,
            '-' if !in_quotes => {
                parts.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&token[start..]);
    parts
}

fn numeric_value(value: &str) -> Option<u64> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

/// Numeric tokens first, by value; everything else after, lexicographically
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub(crate) fn parse_index(value: &str) -> Option<u64> {
    numeric_value(value)
}
