use crate::block::Span;

/// Split one line of text into inline spans.
///
/// Single left-to-right pass. At each position the first matching construct
/// wins, in order: link, code span, `***`, `**`, `*`. A marker without a
/// closer is kept as a literal character and the scan moves on. Matched
/// interiors are not scanned again, so emphasis never nests.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match match_span(rest) {
            Some((span, consumed)) => {
                if !literal.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut literal)));
                }
                spans.push(span);
                rest = &rest[consumed..];
            }
            None => {
                literal.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    if !literal.is_empty() {
        spans.push(Span::Text(literal));
    }
    spans
}

/// Try every construct that can start at the head of `s`.
/// Returns the span and the number of bytes it covers.
fn match_span(s: &str) -> Option<(Span, usize)> {
    match *s.as_bytes().first()? {
        b'[' => link(s),
        b'`' => delimited(s, "`").map(|(content, n)| (Span::Code(content), n)),
        b'*' => delimited(s, "***")
            .map(|(content, n)| (Span::BoldItalic(content), n))
            .or_else(|| delimited(s, "**").map(|(content, n)| (Span::Bold(content), n)))
            .or_else(|| delimited(s, "*").map(|(content, n)| (Span::Italic(content), n))),
        _ => None,
    }
}

/// `marker content marker`, closed by the next occurrence of `marker`.
fn delimited(s: &str, marker: &str) -> Option<(String, usize)> {
    let inner = s.strip_prefix(marker)?;
    let end = inner.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((inner[..end].to_string(), marker.len() * 2 + end))
}

/// `[label](href)` with `](` adjacent and both parts non-empty.
fn link(s: &str) -> Option<(Span, usize)> {
    let inner = s.strip_prefix('[')?;
    let close = inner.find(']')?;
    let label = &inner[..close];
    let target = inner[close + 1..].strip_prefix('(')?;
    let end = target.find(')')?;
    let href = &target[..end];
    if label.is_empty() || href.is_empty() {
        return None;
    }
    let consumed = 1 + close + 2 + end + 1;
    Some((
        Span::Link {
            label: label.to_string(),
            href: href.to_string(),
        },
        consumed,
    ))
}
