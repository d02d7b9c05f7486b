//! crates/callsite/src/path.rs
//! Shortening of source paths and symbol names for display.

const fn is_separator(ch: char) -> bool {
    ch == '/' || ch == std::path::MAIN_SEPARATOR
}

/// Reduces `path` to its last two segments.
///
/// The scan runs from the start of the string and remembers the positions
/// following the last two separators, so `"/src/app/main.rs"` becomes
/// `"app/main.rs"`. Paths with a single leading directory are returned from
/// the start of the string.
///
/// # Examples
///
/// ```
/// use callsite::short_path;
///
/// assert_eq!(short_path("/home/dev/app/src/main.rs"), "src/main.rs");
/// assert_eq!(short_path("src/main.rs"), "src/main.rs");
/// assert_eq!(short_path("main.rs"), "main.rs");
/// ```
#[must_use]
pub fn short_path(path: &str) -> &str {
    let mut previous = 0;
    let mut last = 0;
    for (index, ch) in path.char_indices() {
        if is_separator(ch) {
            previous = last;
            last = index + ch.len_utf8();
        }
    }
    &path[previous..]
}

/// Strips the module path from a symbol name.
///
/// # Examples
///
/// ```
/// use callsite::short_function;
///
/// assert_eq!(short_function("app::net::connect"), "connect");
/// assert_eq!(short_function("main"), "main");
/// ```
#[must_use]
pub fn short_function(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_two_segments() {
        assert_eq!(short_path("/a/b/c/d.rs"), "c/d.rs");
    }

    #[test]
    fn leading_separator_survives_when_only_one_directory() {
        assert_eq!(short_path("/d.rs"), "/d.rs");
    }

    #[test]
    fn empty_path_stays_empty() {
        assert_eq!(short_path(""), "");
    }

    #[test]
    fn trailing_separator_keeps_final_directory() {
        assert_eq!(short_path("/a/b/c/"), "c/");
    }

    #[test]
    fn short_function_handles_closures() {
        assert_eq!(short_function("app::run::{{closure}}"), "{{closure}}");
    }

    proptest! {
        #[test]
        fn short_path_is_a_suffix(segments in prop::collection::vec("[a-z]{1,8}", 0..6)) {
            let path = segments.join("/");
            let short = short_path(&path);
            prop_assert!(path.ends_with(short));
        }

        #[test]
        fn short_path_has_at_most_one_separator(segments in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let path = segments.join("/");
            let short = short_path(&path);
            prop_assert!(short.matches('/').count() <= 1);
            prop_assert!(short.ends_with(segments.last().unwrap().as_str()));
        }
    }
}
