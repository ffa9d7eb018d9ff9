use crate::block::{Block, List, Span, Table};
use crate::escape::escape_into;
use crate::inline::parse_inline;

/// Attribute carried by the table container, holding the table id.
pub const TABLE_ID_ATTR: &str = "data-md-table-id";
/// Attribute carried by the toolbar buttons, holding the action name.
pub const TABLE_ACTION_ATTR: &str = "data-md-table-action";

/// Convert blocks to markup
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, &mut out);
    }
    out
}

/// Wrap rendered blocks in the document container.
pub fn wrap_container(body: &str, base_class: &str, extra_class: Option<&str>) -> String {
    let mut out = String::with_capacity(body.len() + 64);
    out.push_str("<div class=\"");
    escape_into(base_class, &mut out);
    if let Some(extra) = extra_class.map(str::trim).filter(|c| !c.is_empty()) {
        out.push(' ');
        escape_into(extra, &mut out);
    }
    out.push_str("\">\n");
    out.push_str(body);
    out.push_str("</div>");
    out
}

/// Format one run of text as inline markup.
pub fn format_inline(text: &str) -> String {
    let mut out = String::new();
    spans_to_html(&parse_inline(text), &mut out);
    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { lines } => {
            out.push_str("<p>");
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    out.push_str("<br>");
                }
                spans_to_html(line, out);
            }
            out.push_str("</p>\n");
        }
        Block::CodeBlock { content, .. } => {
            out.push_str("<pre><code>");
            escape_into(content, out);
            out.push_str("</code></pre>\n");
        }
        Block::List(list) => list_to_html(list, out),
        Block::Table(table) => table_to_html(table, out),
    }
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_into(text, out),
        Span::Link { label, href } if !is_navigable_href(href) => {
            tracing::debug!(%href, "link target dropped");
            escape_into(label, out);
        }
        Span::Link { label, href } => {
            out.push_str("<a href=\"");
            escape_into(href, out);
            out.push_str("\" target=\"_blank\">");
            escape_into(label, out);
            out.push_str("</a>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            escape_into(text, out);
            out.push_str("</code>");
        }
        Span::Bold(text) => {
            out.push_str("<b>");
            escape_into(text, out);
            out.push_str("</b>");
        }
        Span::Italic(text) => {
            out.push_str("<i>");
            escape_into(text, out);
            out.push_str("</i>");
        }
        Span::BoldItalic(text) => {
            out.push_str("<b><i>");
            escape_into(text, out);
            out.push_str("</i></b>");
        }
    }
}

/// Relative targets and `http`, `https` or `mailto` URLs. Tabs and line
/// breaks are ignored the way browsers ignore them when reading a scheme.
fn is_navigable_href(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let compact = compact.trim_start_matches(|c: char| c <= ' ');
    let Some((scheme, _)) = compact.split_once(':') else {
        return true;
    };
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        // colon inside a path or query
        return true;
    }
    ["http", "https", "mailto"]
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(item, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn table_to_html(table: &Table, out: &mut String) {
    let columns = table.column_count();

    out.push_str(&format!("<div class=\"md-table\" {TABLE_ID_ATTR}=\""));
    escape_into(&table.id, out);
    out.push_str("\">");

    out.push_str("<div class=\"md-table-toolbar\">");
    out.push_str(&format!(
        "<button type=\"button\" {TABLE_ACTION_ATTR}=\"copy\">Copy table</button>"
    ));
    out.push_str(&format!(
        "<button type=\"button\" {TABLE_ACTION_ATTR}=\"csv\">Export CSV</button>"
    ));
    out.push_str("</div>");

    out.push_str("<div class=\"md-table-scroll\"><table><thead>");
    row_to_html(table, &table.headers, "th", columns, out);
    out.push_str("</thead><tbody>");
    for row in &table.rows {
        row_to_html(table, row, "td", columns, out);
    }
    out.push_str("</tbody></table></div></div>\n");
}

/// Emit exactly `columns` cells, padding short rows and truncating long ones.
fn row_to_html(table: &Table, cells: &[String], tag: &str, columns: usize, out: &mut String) {
    out.push_str("<tr>");
    for index in 0..columns {
        let cell = cells.get(index).map(String::as_str).unwrap_or("");
        out.push_str(&format!(
            "<{tag} style=\"text-align:{}\">",
            table.alignment(index).as_css()
        ));
        spans_to_html(&parse_inline(cell), out);
        out.push_str(&format!("</{tag}>"));
    }
    out.push_str("</tr>");
}
