//! Structured Response Parser
//!
//! Generative models wrap their JSON in prose or markdown fences. This module
//! pulls the first balanced JSON fragment of the requested kind out of free
//! text and deserializes it. It never fails past its boundary: callers get an
//! `Option` or supply a fallback.

use serde::de::DeserializeOwned;
use tracing::debug;

// == Shape Hint ==
/// Kind of JSON fragment to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl Shape {
    fn opening(self) -> char {
        match self {
            Shape::Object => '{',
            Shape::Array => '[',
        }
    }
}

// == Fragment Scan ==
/// Returns the first top-level balanced fragment of `shape` in `text`.
///
/// Brackets of both kinds are tracked from the start of the text, so an
/// opening delimiter nested inside an earlier fragment of the other kind is
/// skipped. Delimiters inside string literals are ignored. Once a fragment of
/// the requested kind has started, a mismatched or unterminated fragment
/// yields `None`; no later candidate is tried. Stray closers in surrounding
/// prose are ignored.
pub fn extract_fragment(text: &str, shape: Shape) -> Option<&str> {
    let opening = shape.opening();
    let mut stack: Vec<char> = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            // Quotes in prose outside any fragment are not string literals
            '"' if !stack.is_empty() => in_string = true,
            '{' | '[' => {
                if stack.is_empty() && ch == opening {
                    start = Some(idx);
                }
                stack.push(if ch == '{' { '}' } else { ']' });
            }
            '}' | ']' => {
                if stack.is_empty() {
                    continue;
                }
                if stack.pop() != Some(ch) {
                    if start.is_some() {
                        return None;
                    }
                    // Broken fragment of the other kind: resume scanning at top level
                    stack.clear();
                    continue;
                }
                if stack.is_empty() {
                    if let Some(begin) = start {
                        return Some(&text[begin..idx + ch.len_utf8()]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

// == Typed Extraction ==
/// Extracts and deserializes the first fragment of `shape` from `text`.
pub fn extract<T: DeserializeOwned>(text: &str, shape: Shape) -> Option<T> {
    let Some(fragment) = extract_fragment(text, shape) else {
        debug!(?shape, "No balanced JSON fragment in response");
        return None;
    };

    match serde_json::from_str(fragment) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(?shape, error = %e, "JSON fragment did not match expected type");
            None
        }
    }
}

/// Like [`extract`], returning `fallback` when nothing usable is found.
pub fn extract_or<T: DeserializeOwned>(text: &str, shape: Shape, fallback: T) -> T {
    extract(text, shape).unwrap_or(fallback)
}
