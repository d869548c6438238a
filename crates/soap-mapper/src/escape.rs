//! XML text escaping for element content and attribute values.

/// Escape a string for safe inclusion in XML content or attribute values.
///
/// The five predefined entities are replaced, and characters that XML 1.0
/// does not allow anywhere (most C0 controls, U+FFFE, U+FFFF) are dropped.
///
/// # Example
///
/// ```rust
/// use busbar_soap_mapper::escape;
///
/// assert_eq!(escape("Fish & \"Chips\""), "Fish &amp; &quot;Chips&quot;");
/// assert_eq!(escape("bell\u{7}"), "bell");
/// ```
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Returns true if the character may appear in an XML 1.0 document.
#[must_use]
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}'
            | '\u{A}'
            | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
