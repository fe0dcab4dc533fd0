//! Splitting request paths into segments.

/// Splits a path into its non-empty segments.
///
/// Leading, trailing and duplicate slashes produce no segments, so `/` yields
/// nothing and `/p//x/` yields `["p", "x"]`.
///
/// ```rust
/// assert_eq!(curly::tokenize("/p/x/"), vec!["p", "x"]);
/// assert!(curly::tokenize("/").is_empty());
/// ```
pub fn tokenize(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Joins segments back together with `/`, without a leading slash.
///
/// ```rust
/// assert_eq!(curly::untokenize(&["remain", "der"]), "remain/der");
/// ```
pub fn untokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut joined = String::new();

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            joined.push('/');
        }
        joined.push_str(token.as_ref());
    }

    joined
}

// Splits a template on `/`, except inside `{...}`, so that a pattern such as
// `{path:[a-z/]+}` stays a single segment. Returns `None` on unbalanced braces.
pub(crate) fn split_template(template: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in template.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1)?,
            '/' if depth == 0 => {
                if i > start {
                    segments.push(&template[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }

    if template.len() > start {
        segments.push(&template[start..]);
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    // path, segments
    fn tokenize_tests() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![
            ("", vec![]),
            ("/", vec![]),
            ("//", vec![]),
            ("/p", vec!["p"]),
            ("p", vec!["p"]),
            ("/p/x", vec!["p", "x"]),
            ("/p/x/", vec!["p", "x"]),
            ("//p//x//", vec!["p", "x"]),
            ("/resources:run", vec!["resources:run"]),
            ("/static/test/sub/hi.html", vec!["static", "test", "sub", "hi.html"]),
            ("/β/ʯ", vec!["β", "ʯ"]),
        ]
    }

    #[test]
    fn test_tokenize() {
        for (path, expected) in tokenize_tests() {
            assert_eq!(tokenize(path), expected, "{path}");
        }
    }

    #[test]
    fn test_untokenize() {
        assert_eq!(untokenize::<&str>(&[]), "");
        assert_eq!(untokenize(&["a"]), "a");
        assert_eq!(untokenize(&["test", "sub", "hi.html"]), "test/sub/hi.html");
    }

    #[test]
    fn test_split_template() {
        assert_eq!(split_template("/"), Some(vec![]));
        assert_eq!(split_template("/p/{q}/"), Some(vec!["p", "{q}"]));
        assert_eq!(
            split_template("/files/{path:[a-z/]+}"),
            Some(vec!["files", "{path:[a-z/]+}"])
        );
        assert_eq!(
            split_template("/users/{userId:^prefix-}:start"),
            Some(vec!["users", "{userId:^prefix-}:start"])
        );
        assert_eq!(split_template("/a/{b"), None);
        assert_eq!(split_template("/a/b}"), None);
    }
}
