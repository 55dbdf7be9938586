use std::sync::LazyLock;

use regex::Regex;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`\n]+`").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[[^\]]*\]\([^)]+\)").unwrap());
static FOOTNOTE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\[\^[^\]]+\]:.*$").unwrap());
static FOOTNOTE_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\^[^\]]*\]").unwrap());
static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());
static SYMBOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`>#~\-]+").unwrap());
static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\\\[\](){}<>]").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static BANG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\s+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduces markdown to prose: code, links, URLs, HTML, footnotes, shortcodes and markup
/// symbols become spaces, standalone numbers are dropped and whitespace is collapsed.
///
/// Regex based and best-effort, so malformed markup is passed through rather than rejected.
/// The output is a fixed point: stripping it again changes nothing.
pub fn strip_markdown(text: &str) -> String {
    let passes: [&Regex; 10] = [
        &*CODE_BLOCK,
        &*INLINE_CODE,
        &*MARKDOWN_LINK,
        &*URL,
        &*HTML_TAG,
        &*FOOTNOTE_DEF,
        &*FOOTNOTE_REF,
        &*SHORTCODE,
        &*SYMBOLS,
        &*BRACKETS,
    ];

    let mut text = text.to_string();
    for pattern in passes {
        text = pattern.replace_all(&text, " ").into_owned();
    }

    // `!` must go after numbers, which can leave a `!` followed by a space
    text = remove_standalone_numbers(&text);
    text = BANG.replace_all(&text, " ").into_owned();

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Drops digit runs that do not touch an ASCII letter (`2025` goes, `mp3` and `1080p` stay).
fn remove_standalone_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in DIGITS.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let touches_letter = before.is_some_and(|c| c.is_ascii_alphabetic())
            || after.is_some_and(|c| c.is_ascii_alphabetic());

        if touches_letter {
            continue;
        }

        out.push_str(&text[last..m.start()]);
        out.push(' ');
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_code_and_urls() {
        let input = "Intro\n```rust\nfn main() { println!(\"hi\"); }\n```\nUse `cargo run` at https://example.com/x?y=1 or www.rust-lang.org today";
        assert_eq!(strip_markdown(input), "Intro Use at or today");
    }

    #[test]
    fn test_strips_links_html_and_footnotes() {
        let input = "See [the docs](https://docs.rs) and ![alt](img.png).<br/>Text[^1] more.\n[^1]: A footnote body\nEnd";
        assert_eq!(strip_markdown(input), "See and . Text more. End");
    }

    #[test]
    fn test_strips_headings_emphasis_and_shortcodes() {
        let input = "# Title\n\n> quote with **bold** and _em_ ~~gone~~\n{{< figure src=\"a.png\" >}}\n- item";
        assert_eq!(strip_markdown(input), "Title quote with bold and em gone item");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(strip_markdown("In 2025 I watched 1080p video as mp3"), "In I watched 1080p video as mp3");
        assert_eq!(strip_markdown("第3回の会議"), "第 回の会議");
        assert_eq!(strip_markdown("Wow!2025 yes"), "Wow yes");
    }

    #[test]
    fn test_japanese_prose_survives() {
        let input = "## 今日の**日記**\n\n猫が[かわいい](https://example.com)。";
        assert_eq!(strip_markdown(input), "今日の 日記 猫が 。");
    }

    #[test]
    fn test_malformed_markup_is_best_effort() {
        assert_eq!(strip_markdown("```unterminated code [link( text"), "unterminated code link text");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "The cat sat on a mat.",
            "# Heading\n\nSome *markdown* with [a link](http://x.y) and `code`.",
            "Wow!2025 yes! and! more",
            "  spaced\t\tout \n text  ",
            "混在した text と 2025年 の記事!",
            "",
        ];
        for input in inputs {
            let once = strip_markdown(input);
            assert_eq!(strip_markdown(&once), once, "input: {input:?}");
        }
    }
}
