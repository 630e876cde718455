//! Identifier casing for declaration names.
//!
//! Schema names arrive in every flavour: dotted component references
//! (`layout.hero-banner`), snake or screaming case (`SOME_FIELD`), camel case
//! (`blogPost`). [`case_name`] folds any of them into a single PascalCase
//! identifier so the same schema always produces the same TypeScript name.
//!
//! Segmentation rules, tried in order at each position:
//!
//! 1. an uppercase run of two or more letters that is followed by a
//!    capitalised word or by a boundary (`XMLHttp` yields `XML`)
//! 2. an optional capital, one or more lowercase letters, trailing digits
//! 3. a single uppercase letter
//! 4. a run of digits
//!
//! Anything else (separators, whitespace, non-ASCII) is dropped.

/// Error produced when casing cannot derive an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("no identifier segment in {0:?}")]
    NoSegments(String),
}

/// Convert an arbitrary name into a PascalCase identifier.
///
/// Fails when `input` holds no letters or digits at all; an empty identifier
/// is never returned.
pub fn case_name(input: &str) -> Result<String, NamingError> {
    let segments = segments(input);
    if segments.is_empty() {
        return Err(NamingError::NoSegments(input.to_string()));
    }

    let mut out = String::with_capacity(input.len());
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    Ok(out)
}

/// Append a plural `s` unless the name already ends in one.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{name}s")
    }
}

fn segments(input: &str) -> Vec<&str> {
    // Every match starts and ends on an ASCII byte, so the slices below
    // always fall on char boundaries.
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match match_at(bytes, pos) {
            Some(end) => {
                out.push(&input[pos..end]);
                pos = end;
            }
            None => pos += 1,
        }
    }
    out
}

fn match_at(bytes: &[u8], pos: usize) -> Option<usize> {
    acronym(bytes, pos)
        .or_else(|| word(bytes, pos))
        .or_else(|| bytes[pos].is_ascii_uppercase().then_some(pos + 1))
        .or_else(|| digits(bytes, pos))
}

fn run(bytes: &[u8], pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[pos..].iter().take_while(|b| pred(**b)).count()
}

fn acronym(bytes: &[u8], pos: usize) -> Option<usize> {
    let len = run(bytes, pos, |b| b.is_ascii_uppercase());
    (2..=len).rev().map(|n| pos + n).find(|&end| {
        is_boundary(bytes, end)
            || (bytes[end].is_ascii_uppercase()
                && bytes.get(end + 1).is_some_and(u8::is_ascii_lowercase))
    })
}

fn word(bytes: &[u8], pos: usize) -> Option<usize> {
    let start = if bytes[pos].is_ascii_uppercase() {
        pos + 1
    } else {
        pos
    };
    let lower = run(bytes, start, |b| b.is_ascii_lowercase());
    if lower == 0 {
        return None;
    }
    let end = start + lower;
    Some(end + run(bytes, end, |b| b.is_ascii_digit()))
}

fn digits(bytes: &[u8], pos: usize) -> Option<usize> {
    match run(bytes, pos, |b| b.is_ascii_digit()) {
        0 => None,
        n => Some(pos + n),
    }
}

fn is_boundary(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos).is_none_or(|b| !b.is_ascii_alphanumeric())
}
