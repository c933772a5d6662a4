//! Input cleaning for freeform text pasted in by clients.

/// Characters removed even if a future category check lets them through.
const ALWAYS_STRIPPED: &[char] = &['\u{0}', '\u{8}', '\u{c}', '\u{b}'];

/// Removes control characters other than newline, carriage return and tab.
///
/// Total and idempotent: empty input yields empty output.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars().filter(|c| keep_char(*c)).collect()
}

fn keep_char(c: char) -> bool {
    if ALWAYS_STRIPPED.contains(&c) {
        return false;
    }
    matches!(c, '\n' | '\r' | '\t') || !c.is_control()
}

/// Escapes raw newline, carriage return and tab characters that sit inside
/// JSON string literals, leaving everything outside strings untouched.
///
/// Clients paste multi-line job descriptions straight into `{"content": "..."}`;
/// strict JSON rejects those, so the body is repaired before decoding.
pub fn escape_bare_controls_in_strings(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_null_and_bell() {
        let clean = sanitize_text("Senior\u{0} Engineer\u{7}");
        assert_eq!(clean, "Senior Engineer");
    }

    #[test]
    fn test_keeps_newline_cr_and_tab() {
        let raw = "Line one\r\n\tLine two\n";
        assert_eq!(sanitize_text(raw), raw);
    }

    #[test]
    fn test_strips_form_feed_vertical_tab_and_backspace() {
        let clean = sanitize_text("a\u{c}b\u{b}c\u{8}d");
        assert_eq!(clean, "abcd");
    }

    #[test]
    fn test_strips_c1_controls() {
        let clean = sanitize_text("caf\u{85}e\u{9f}");
        assert_eq!(clean, "cafe");
    }

    #[test]
    fn test_no_control_characters_survive() {
        let raw: String = (0u32..0x200).filter_map(char::from_u32).collect();
        let clean = sanitize_text(&raw);
        assert!(clean
            .chars()
            .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t')));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let raw = "Job\u{0}\u{1b}[31m Description\n\u{7f}Über";
        let once = sanitize_text(raw);
        assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn test_escape_bare_newline_inside_string() {
        let body = "{\"content\": \"line one\nline two\"}";
        let repaired = escape_bare_controls_in_strings(body);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["content"], "line one\nline two");
    }

    #[test]
    fn test_escape_leaves_structural_whitespace_alone() {
        let body = "{\n\t\"content\": \"x\"\n}";
        assert_eq!(escape_bare_controls_in_strings(body), body);
    }

    #[test]
    fn test_escape_respects_escaped_quotes() {
        let body = "{\"content\": \"say \\\"hi\\\"\tnow\"}";
        let repaired = escape_bare_controls_in_strings(body);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["content"], "say \"hi\"\tnow");
    }
}
