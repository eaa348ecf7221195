//! Cleanup of model output before it is shown or published
//!
//! The rules run in a fixed order; later rules see the output of earlier ones.
//! Parenthesis escaping is not idempotent: running [`sanitize`] over text it
//! already escaped turns `\(` into `\\(`.

use std::sync::LazyLock;

use regex::Regex;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("valid think-block regex"));

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading regex"));

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));

/// Strip reasoning blocks and markdown, then escape parentheses for the
/// publishing endpoint's text format.
pub fn sanitize(text: &str) -> String {
    let text = THINK_BLOCK.replace_all(text, "");
    let text = HEADING_MARKER.replace_all(&text, "");

    let text = text.replace("**", "").replace('*', "");
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    let text = text.replace("__", "").replace('_', "");

    let text = text.replace('(', "\\(").replace(')', "\\)");

    text.trim().to_string()
}
