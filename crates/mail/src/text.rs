//! Plain-text alternative derived from rendered HTML.

use std::sync::LazyLock;

use regex::Regex;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("Invalid tag regex"));

/// Strip every tag, decode the entities the templates emit, and drop blank
/// lines left behind by the markup.
pub fn html_to_text(html: &str) -> String {
    let stripped = TAG_REGEX.replace_all(html, "");
    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
