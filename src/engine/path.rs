//! Path resolution over JSON value trees
//!
//! A path expression addresses a location inside a decoded JSON response:
//! dotted segments for object keys, `key[n]` for an index into an array
//! held under a key, and a bare `[n]` for an index into the current value.
//! Resolution never fails the call; a missing key, a type mismatch, an
//! out-of-range index, or a malformed index all mean "not found".

use serde_json::Value;

/// Resolve `expression` against `root`, returning the addressed value.
///
/// Short-circuits on the first segment that does not resolve; a partial
/// traversal never yields a partial result.
pub fn resolve<'a>(root: &'a Value, expression: &str) -> Option<&'a Value> {
    // Plain single-level key: direct lookup, no segment parsing.
    if !expression.contains('.') && !expression.contains('[') {
        return root.as_object()?.get(expression);
    }

    let mut current = root;
    for segment in expression.split('.') {
        current = resolve_segment(current, segment)?;
    }
    Some(current)
}

fn resolve_segment<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match segment.find('[') {
        // A bracket only counts when the segment also closes it; anything
        // else is treated as a literal key.
        Some(open) if segment.ends_with(']') => {
            let key = &segment[..open];
            let index: usize = segment[open + 1..segment.len() - 1].parse().ok()?;

            let array = if key.is_empty() {
                // Bare `[n]`: index into the current value itself.
                current.as_array()?
            } else {
                current.as_object()?.get(key)?.as_array()?
            };
            array.get(index)
        }
        _ => current.as_object()?.get(segment),
    }
}
