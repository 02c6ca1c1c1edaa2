// ABOUTME: Tolerant JSON extraction from free-text model completions
// ABOUTME: Brace-matching scan that locates the first well-formed JSON object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # JSON Extraction
//!
//! Text-completion models are not guaranteed to return bare JSON; the
//! document is routinely wrapped in commentary ("Sure! Here you go: {...}
//! Hope that helps!") or a Markdown code fence. These helpers locate the
//! embedded document without assuming anything about its surroundings.

/// Locate the first balanced JSON object embedded in `text`.
///
/// Scans for the first `{` and walks forward tracking brace depth, string
/// state, and escape sequences, returning the slice from the opening brace
/// through its matching close. Returns `None` when no balanced object
/// exists. The slice is not validated as JSON beyond brace balance; callers
/// parse it and treat a parse failure as a malformed response.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strip a surrounding Markdown code fence (```json ... ``` or ``` ... ```)
/// from a chat-model reply, returning the inner text trimmed.
///
/// Chat models asked for "exactly this JSON structure" still wrap the
/// document in a fence often enough that stripping one is the single
/// leniency the strict parse path allows.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the optional language tag on the fence line
    let rest = rest
        .split_once('\n')
        .map_or(rest, |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
