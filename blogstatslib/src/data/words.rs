//! Word counting over raw document markup.
//!
//! Markup is stripped by a fixed sequence of substitutions before counting.
//! The order matters: tags go first, then fenced code, inline code, links, and
//! finally stray emphasis and heading characters.

use lazy_regex::regex;

/// Words read per minute when estimating reading time.
pub const WORDS_PER_MINUTE: u64 = 200;

/// Strip markup from a document body, leaving plain prose.
pub fn strip_markup(body: &str) -> String {
    let text = regex!(r"<[^>]*>").replace_all(body, " ");
    let text = regex!(r"```[\s\S]*?```").replace_all(&text, " ").into_owned();
    let text = regex!(r"`[^`]*`").replace_all(&text, " ").into_owned();
    let text = regex!(r"\[([^\]]*)\]\([^)]*\)")
        .replace_all(&text, "${1}")
        .into_owned();
    regex!(r"[#*_~`]").replace_all(&text, "").into_owned()
}

/// Count the words in a document body.
///
/// A word is a whitespace separated token of the stripped text that holds at
/// least one letter, digit or underscore. Both tests follow Unicode: any
/// Unicode whitespace (including no-break space) separates words, and letters
/// from any script count.
pub fn word_count(body: &str) -> u64 {
    strip_markup(body)
        .split_whitespace()
        .filter(|token| regex!(r"\w").is_match(token))
        .count() as u64
}

/// Minutes needed to read `words` words, rounded up.
pub fn reading_minutes(words: u64) -> u64 {
    words.div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(word_count("Hello world this is a test post."), 7);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t  "), 0);
    }

    #[test]
    fn test_strips_html_tags() {
        assert_eq!(word_count("<p>Hello</p> <div>world</div>"), 2);
        assert_eq!(word_count("one<br/>two"), 2);
    }

    #[test]
    fn test_strips_markdown_links() {
        assert_eq!(word_count("Check out [this link](https://example.com) here"), 5);
        assert_eq!(strip_markup("[a b](/x)"), "a b");
    }

    #[test]
    fn test_strips_fenced_code() {
        let body = "Before\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\nAfter";
        assert_eq!(word_count(body), 2);
    }

    #[test]
    fn test_strips_inline_code() {
        assert_eq!(word_count("Run `cargo test --all` now"), 2);
    }

    #[test]
    fn test_strips_emphasis_and_headings() {
        assert_eq!(word_count("# Title\n\n**bold** and _em_ ~~gone~~"), 5);
        assert_eq!(strip_markup("## Heading"), " Heading");
    }

    #[test]
    fn test_punctuation_only_tokens_do_not_count() {
        assert_eq!(word_count("Hello - world ... !"), 2);
        assert_eq!(word_count("*** --- ###"), 0);
    }

    #[test]
    fn test_tags_removed_before_code() {
        // The tag is removed first, so the backticks inside it never pair up.
        assert_eq!(word_count("<span title=\"`\">one</span> `two` three"), 2);
    }

    #[test]
    fn test_non_ascii_words() {
        assert_eq!(word_count("Grüße aus Köln"), 3);
        assert_eq!(word_count("日本語 - русский"), 2);
    }

    #[test]
    fn test_unicode_whitespace_separates_words() {
        assert_eq!(word_count("a\u{00A0}b"), 2);
        assert_eq!(word_count("one\u{2003}two\u{3000}three"), 3);
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(0), 0);
        assert_eq!(reading_minutes(1), 1);
        assert_eq!(reading_minutes(200), 1);
        assert_eq!(reading_minutes(201), 2);
        assert_eq!(reading_minutes(400), 2);
    }
}
