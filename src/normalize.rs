//! Cleanup of HTML-ish model output before block parsing.
//!
//! Language models often answer with `<br>`, `<p>` or `<div>` markup, and
//! sometimes with entity-escaped copies of those tags. They are turned into
//! plain line structure here; every other tag is left alone for the escaper.

use std::sync::LazyLock;

use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("normalizer pattern must compile"),
        replacement,
    }
}

/// Literal tags first, then their `&lt;...&gt;` forms.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"(?i)<br\s*/?>", "\n"),
        rule(r"(?i)</p\s*>", "\n\n"),
        rule(r"(?i)<p(?:\s[^>]*)?>", ""),
        rule(r"(?i)</div\s*>", "\n"),
        rule(r"(?i)<div(?:\s[^>]*)?>", ""),
        rule(r"(?i)</?(?:font|span)(?:\s[^>]*)?>", ""),
        rule(r"(?i)&lt;br\s*/?&gt;", "\n"),
        rule(r"(?i)&lt;/p\s*&gt;", "\n\n"),
        rule(r"(?i)&lt;p(?:\s.*?)?&gt;", ""),
        rule(r"(?i)&lt;/div\s*&gt;", "\n"),
        rule(r"(?i)&lt;div(?:\s.*?)?&gt;", ""),
        rule(r"(?i)&lt;/?(?:font|span)(?:\s.*?)?&gt;", ""),
    ]
});

/// Normalize raw model output into Markdown-like text.
///
/// Idempotent: passes repeat until nothing changes, which also catches tags
/// that only appear once an enclosing removal has happened
/// (`<sp<span>an>`). Every pass that changes the text shortens it.
pub fn normalize(raw: &str) -> String {
    let mut text = normalize_pass(raw);
    loop {
        let next = normalize_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn normalize_pass(raw: &str) -> String {
    let mut text = raw.replace("\r\n", "\n").replace('\r', "\n");
    for rule in RULES.iter() {
        if rule.pattern.is_match(&text) {
            text = rule
                .pattern
                .replace_all(&text, rule.replacement)
                .into_owned();
        }
    }
    text.replace("&nbsp;", " ")
}
