//! Cell-level coercions for ratings and categorical text.

/// Parse a rating on a `0..=scale` scale.
///
/// Returns `None` for anything non-numeric, non-finite or off the scale;
/// callers treat that as the lowest score. Off-scale values such as `7` on a
/// five-point scale are treated as entry mistakes and rejected rather than
/// kept or clamped, so they can never outrank a genuine top rating.
pub fn parse_rating(raw: &str, scale: f64) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && (0.0..=scale).contains(&value)).then_some(value)
}

/// Title-case free text: trim, collapse inner whitespace, uppercase each letter
/// that follows a non-letter and lowercase the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for (i, word) in raw.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
            prev_is_letter = false;
        }
        for ch in word.chars() {
            if ch.is_alphabetic() {
                if prev_is_letter {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                prev_is_letter = true;
            } else {
                out.push(ch);
                prev_is_letter = false;
            }
        }
    }

    out
}
