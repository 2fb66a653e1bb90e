use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Punctuation, currency and bullet symbols and digit runs, removed outright
    static ref REPLACE_NO_SPACE: Regex =
        Regex::new(r#"[&%$€.;:!'?,"()\[\]⁰•]|\d+"#).expect("valid regex");

    /// HTML line-break pairs, hyphens and slashes, each replaced by a single space
    static ref REPLACE_WITH_SPACE: Regex =
        Regex::new(r"<br\s*/><br\s*/>|-|/").expect("valid regex");
}

/// Lowercase a document and strip the characters that carry no signal for a bag-of-words model.
///
/// Deletions happen before space replacements, so `"a-1b"` becomes `"a b"`. Whitespace is left
/// irregular; the tokenizer splits on any run of it.
pub fn clean(document: &str) -> String {
    let lowered = document.to_lowercase();
    let stripped = REPLACE_NO_SPACE.replace_all(&lowered, "");

    REPLACE_WITH_SPACE.replace_all(&stripped, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_lowercases_and_deletes_without_spaces() {
        assert_eq!(clean("Prices rose 20% in 2021!!"), "prices rose  in ");
        assert_eq!(clean("Don't (ever) say \"never\"; ok?"), "dont ever say never ok");
        assert_eq!(clean("[1] €5 & $10 • ⁰"), "     ");
    }

    #[test]
    fn test_replaces_breaks_hyphens_and_slashes_with_spaces() {
        assert_eq!(clean("one<br /><br />two"), "one two");
        assert_eq!(clean("one<br/><br/>two"), "one two");
        assert_eq!(clean("well-known and/or"), "well known and or");
    }

    #[test]
    fn test_leaves_other_characters_alone() {
        assert_eq!(clean("Café naïve #tag"), "café naïve #tag");
    }

    #[test]
    fn test_idempotent_once_clean() {
        for text in ["Prices rose 20% in 2021!!", "a/b-c<br/><br/>d", "Hello, World."] {
            let once = clean(text);
            assert_eq!(clean(&once), once);
        }
    }
}
