//! Recursive-descent parser for type expressions.
//!
//! Rules, tried in order on the trimmed input:
//!
//! 1. empty → `Empty`
//! 2. builtin name → `Builtin`
//! 3. top-level `=>` → `Function` (split at the first such arrow)
//! 4. `[` outside any parentheses → `Generic` (split at the first `[`)
//! 5. a fully parenthesized comma list → `Tuple`
//! 6. anything else → unqualified `User`

use super::{Builtin, TypeParseError, TypeRef};

/// Parse a type expression.
pub fn parse(input: &str) -> Result<TypeRef, TypeParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(TypeRef::Empty);
    }
    if let Some(builtin) = Builtin::from_name(s) {
        return Ok(TypeRef::Builtin(builtin));
    }
    check_balanced(s)?;

    if let Some(arrow) = find_top_level_arrow(s) {
        return parse_function(&s[..arrow], &s[arrow + 2..]);
    }
    if let Some(open) = first_unparenthesized_bracket(s) {
        return parse_generic(s, open);
    }
    if let Some(inner) = parenthesized_inner(s) {
        let params = chop_generic_parameters(inner)
            .into_iter()
            .map(parse)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeRef::Tuple(params));
    }
    Ok(TypeRef::user(s))
}

fn parse_function(left: &str, right: &str) -> Result<TypeRef, TypeParseError> {
    let left = left.trim();
    let inputs = match parenthesized_inner(left) {
        Some(inner) => chop_generic_parameters(inner)
            .into_iter()
            .map(parse)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![parse(left)?],
    };
    let output = parse(right)?;
    Ok(TypeRef::Function {
        inputs,
        output: Box::new(output),
    })
}

fn parse_generic(s: &str, open: usize) -> Result<TypeRef, TypeParseError> {
    let close = matching_close(s, open).ok_or_else(|| TypeParseError::Unbalanced(s.to_string()))?;
    if !s[close + 1..].trim().is_empty() {
        return Err(TypeParseError::TrailingInput(s.to_string()));
    }

    let base_text = s[..open].trim();
    let base = parse(base_text)?;
    if !matches!(base, TypeRef::Builtin(_) | TypeRef::User(_)) {
        return Err(TypeParseError::InvalidGenericBase {
            input: s.to_string(),
            base: base_text.to_string(),
        });
    }

    let params = chop_generic_parameters(&s[open + 1..close])
        .into_iter()
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TypeRef::Generic {
        base: Box::new(base),
        params,
    })
}

// ============================================================================
// SCANNING HELPERS
// ============================================================================

/// Split a comma-separated list at top-level commas only.
///
/// Commas nested inside `[...]` or `(...)` are not split points. Pieces are
/// trimmed; a blank input yields no pieces.
pub fn chop_generic_parameters(s: &str) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts
}

/// Byte offset of the first `=>` outside all brackets and parentheses.
pub fn find_top_level_arrow(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth -= 1,
            b'=' if depth == 0 && bytes.get(i + 1) == Some(&b'>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte offset of the first `[` that is not inside parentheses.
fn first_unparenthesized_bracket(s: &str) -> Option<usize> {
    let mut parens = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '(' => parens += 1,
            ')' => parens -= 1,
            '[' if parens == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// The content of `s` if it is `( ... )` with the outer pair matching.
fn parenthesized_inner(s: &str) -> Option<&str> {
    if !s.starts_with('(') {
        return None;
    }
    let close = matching_close(s, 0)?;
    (close == s.len() - 1).then(|| &s[1..close])
}

/// Byte offset of the bracket closing the one opened at `open`.
fn matching_close(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s[open..].char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Reject unpaired or crossed brackets and parentheses.
fn check_balanced(s: &str) -> Result<(), TypeParseError> {
    let mut open = Vec::new();
    for c in s.chars() {
        match c {
            '[' => open.push(']'),
            '(' => open.push(')'),
            ']' | ')' => {
                if open.pop() != Some(c) {
                    return Err(TypeParseError::Unbalanced(s.to_string()));
                }
            }
            _ => {}
        }
    }
    if open.is_empty() {
        Ok(())
    } else {
        Err(TypeParseError::Unbalanced(s.to_string()))
    }
}
