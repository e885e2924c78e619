//! Term dialect handling for raw triple lines.
//!
//! Three dialects are recognized, matching the datasets the engine is fed:
//! angle-bracketed IRIs where only the trailing local name is kept, quoted
//! literals kept verbatim, and `prefix:local` names where the prefix is
//! dropped.

/// Resolve a raw token to the term identity that is stored and joined on.
///
/// - `<...>`: the trailing maximal run of ASCII-alphanumeric characters
///   before the closing bracket (`<http://example.org/person/Alice0>` keeps
///   `Alice0`)
/// - `"..."`: kept verbatim, quotes included
/// - `ns:local`: everything after the first `:`; tokens without a colon are
///   kept whole
pub fn parse_term(raw: &str) -> &str {
    if let Some(body) = raw.strip_suffix('>') {
        return trailing_alphanumeric_run(body);
    }
    if raw.ends_with('"') {
        return raw;
    }
    match raw.find(':') {
        Some(index) => &raw[index + 1..],
        None => raw,
    }
}

/// The longest suffix of `body` consisting only of ASCII-alphanumeric
/// characters. For `<a>`-style tokens the leading `<` guarantees the run is
/// a proper suffix.
fn trailing_alphanumeric_run(body: &str) -> &str {
    match body.char_indices().rev().find(|(_, c)| !c.is_ascii_alphanumeric()) {
        Some((index, c)) => &body[index + c.len_utf8()..],
        None => body,
    }
}

/// Split one input line into raw subject, property and object tokens.
///
/// Trailing whitespace and line punctuation (`.`) are stripped before
/// tokenization. The object is the whitespace-join of every token after the
/// property, so quoted literals containing spaces survive. Returns `None`
/// when the line has fewer than three fields.
pub fn split_triple_line(line: &str) -> Option<(&str, &str, String)> {
    let line = line.trim().trim_end_matches('.').trim_end();

    let mut tokens = line.split_whitespace();
    let subject = tokens.next()?;
    let property = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        return None;
    }

    Some((subject, property, rest.join(" ")))
}
