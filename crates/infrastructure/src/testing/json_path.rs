//! Minimal JSONPath-like selection.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]`, `$[0].field` and
//! `$.array[*]` (which selects the array itself).

use serde_json::Value;

/// Selects the value at `path`. `Ok(None)` means the path is well formed but
/// absent from the document.
///
/// # Errors
///
/// Returns a description of the problem when the path is malformed.
pub fn query<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let path = path.trim();
    let Some(rest) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let mut current = json;
    for segment in split_segments(rest) {
        let (name, index) = parse_array_access(segment);
        if !name.is_empty() {
            match current.get(name) {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        match index {
            None => {}
            Some("*") => return Ok(current.is_array().then_some(current)),
            Some(index) => {
                let idx: usize = index
                    .parse()
                    .map_err(|_| format!("Invalid array index: {index}"))?;
                match current.get(idx) {
                    Some(value) => current = value,
                    None => return Ok(None),
                }
            }
        }
    }

    Ok(Some(current))
}

/// Splits on `.` outside brackets.
fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_bracket = false;

    for (i, ch) in path.char_indices() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            '.' if !in_bracket => {
                if i > start {
                    segments.push(&path[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < path.len() {
        segments.push(&path[start..]);
    }
    segments
}

/// Splits `field[0]` into `("field", Some("0"))`.
fn parse_array_access(segment: &str) -> (&str, Option<&str>) {
    match (segment.find('['), segment.strip_suffix(']')) {
        (Some(open), Some(inner)) => (&segment[..open], Some(&inner[open + 1..])),
        _ => (segment, None),
    }
}
