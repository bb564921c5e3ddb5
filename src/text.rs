/// Break up dotted names so chat clients do not turn them into links.
///
/// Every `.` directly followed by something other than a space gets one
/// space inserted after it. A trailing `.` is left as is.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '.' && chars.peek().is_some_and(|&next| next != ' ') {
            out.push(' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_inserts_space_after_dot() {
        assert_eq!(sanitize_name("v2.contest"), "v2. contest");
        assert_eq!(sanitize_name("codeforces.com"), "codeforces. com");
        assert_eq!(sanitize_name("3.5 hours"), "3. 5 hours");
    }

    #[test]
    fn test_sanitize_keeps_spaced_and_trailing_dots() {
        assert_eq!(
            sanitize_name("Codeforces Round 950 (Div. 3)"),
            "Codeforces Round 950 (Div. 3)"
        );
        assert_eq!(sanitize_name("3. 5 hours"), "3. 5 hours");
        assert_eq!(sanitize_name("Final."), "Final.");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_sanitize_consecutive_dots() {
        // each dot is examined once, inserted spaces are not rescanned
        assert_eq!(sanitize_name("a..b"), "a. . b");
        assert_eq!(sanitize_name("...."), ". . . .");
    }

    #[test]
    fn test_sanitize_preserves_multibyte_text() {
        assert_eq!(sanitize_name("牛客.周赛"), "牛客. 周赛");
    }
}
