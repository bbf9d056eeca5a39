// src/core/sanitize.rs

/// Decode the five predefined XML entities (plus `&nbsp;`).
/// `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Attribute or element text as a usable value: entities decoded, outer
/// whitespace trimmed. Empty results count as absent.
pub fn clean_value(s: &str) -> Option<String> {
    let v = decode_entities(s).trim().to_string();
    if v.is_empty() { None } else { Some(v) }
}
