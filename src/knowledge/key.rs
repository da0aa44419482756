/// Normalize a free-text question into its lookup key.
///
/// Lowercases, strips everything that is not alphanumeric or whitespace,
/// and collapses whitespace runs to a single space. The result is
/// idempotent: normalizing a normalized key changes nothing.
pub fn normalize_key(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_key("  What IS Rust  "), "what is rust");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize_key("What is Rust?!"), "what is rust");
        assert_eq!(normalize_key("foo-bar, baz."), "foobar baz");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_key("what\t\tis\n  rust"), "what is rust");
    }

    #[test]
    fn test_keeps_digits_and_unicode_letters() {
        assert_eq!(normalize_key("Top 10 crates"), "top 10 crates");
        assert_eq!(normalize_key("Что такое Rust?"), "что такое rust");
    }

    #[test]
    fn test_is_idempotent() {
        let inputs = [
            "What is Rust?",
            "  mixed   CASE with, punctuation!  ",
            "already normalized key",
            "",
        ];
        for input in inputs {
            let once = normalize_key(input);
            assert_eq!(normalize_key(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_symbols_only_becomes_empty() {
        assert_eq!(normalize_key("?!... --- !!!"), "");
    }
}
