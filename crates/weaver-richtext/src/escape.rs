//! Escaping for text interpolated into runtime scripts.
//!
//! Every free-text or HTML argument of a [`Command`](crate::Command) ends up
//! inside a quoted string literal in the generated script. The escape here
//! guarantees the argument cannot terminate that literal early, whichever
//! quote character the literal uses.

use std::borrow::Cow;

/// Escape `s` for use inside a single- or double-quoted script string literal.
///
/// Rewrites backslash, both quote characters and the line terminators the
/// script grammar rejects inside string literals (LF, CR, U+2028, U+2029).
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_script_str(s: &str) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '\\' | '\'' | '"' | '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reads back a single-quoted literal the way the runtime's parser would.
    fn unescape_literal(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                assert_ne!(c, '\'', "unescaped quote would end the literal");
                assert_ne!(c, '\n', "raw newline inside literal");
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let code = u32::from_str_radix(&hex, 16).unwrap();
                    out.push(char::from_u32(code).unwrap());
                }
                Some(other) => out.push(other),
                None => panic!("dangling backslash"),
            }
        }
        out
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_script_str("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escapes_quotes_and_backslashes() {
        assert_eq!(escape_script_str(r"it's a \ test"), r"it\'s a \\ test");
        assert_eq!(escape_script_str(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn test_escapes_line_terminators() {
        assert_eq!(escape_script_str("a\nb\r\nc"), "a\\nb\\r\\nc");
        assert_eq!(escape_script_str("x\u{2028}y\u{2029}"), "x\\u2028y\\u2029");
    }

    #[test]
    fn test_round_trip_through_literal_parser() {
        let samples = [
            "plain",
            "O'Reilly",
            r"C:\path\to\file",
            "<p class='a'>x</p>\n<p>y</p>",
            r"ends with backslash \",
            "'); alert('pwned'); ('",
            "mixed \\' quote after backslash",
            "line\u{2028}separator",
        ];
        for sample in samples {
            let escaped = escape_script_str(sample);
            assert_eq!(unescape_literal(&escaped), sample, "sample: {sample:?}");
        }
    }

    proptest! {
        #[test]
        fn test_any_string_round_trips(s in any::<String>()) {
            let round = unescape_literal(&escape_script_str(&s));
            prop_assert_eq!(round, s);
        }

        #[test]
        fn test_escaped_output_has_no_raw_terminators(s in "[a-z'\"\\\\\n\r\u{2028}\u{2029}]{0,32}") {
            let escaped = escape_script_str(&s);
            let terminators = ['\n', '\r', '\u{2028}', '\u{2029}'];
            prop_assert!(!escaped.contains(terminators));
        }
    }
}
