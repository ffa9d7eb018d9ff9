use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, List, TableIds};
use crate::inline::parse_inline;
use crate::table;

const FENCE: &str = "```";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern must compile"));
static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(.*)$").expect("bullet pattern must compile"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").expect("ordered pattern must compile"));

/// Parse normalized text into a list of blocks.
///
/// The text is first split on code fences; odd fragments are code. With an
/// odd number of fences the trailing fragment is therefore code as well.
pub fn parse(text: &str, ids: &mut TableIds) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (index, fragment) in text.split(FENCE).enumerate() {
        if index % 2 == 1 {
            blocks.push(code_block(fragment));
        } else {
            parse_fragment(fragment, ids, &mut blocks);
        }
    }
    blocks
}

fn code_block(fragment: &str) -> Block {
    let (language, body) = match fragment.split_once('\n') {
        Some((first, rest)) => {
            let tag = first.trim();
            if tag.is_empty() {
                (None, rest)
            } else if !tag.contains(char::is_whitespace) {
                (Some(tag.to_string()), rest)
            } else {
                (None, fragment)
            }
        }
        None => (None, fragment),
    };
    Block::CodeBlock {
        language,
        content: body.trim_end_matches('\n').to_string(),
    }
}

fn parse_fragment(fragment: &str, ids: &mut TableIds, blocks: &mut Vec<Block>) {
    let lines: Vec<&str> = fragment.split('\n').collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some((table, next)) = table::parse_table(&lines, i, ids) {
            blocks.push(Block::Table(table));
            i = next;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len().min(4) as u8;
            blocks.push(Block::Heading {
                level,
                content: parse_inline(caps[2].trim()),
            });
            i += 1;
            continue;
        }

        if let Some((ordered, _)) = list_item(line) {
            let mut items = Vec::new();
            while let Some((same, content)) = lines.get(i).and_then(|l| list_item(l.trim())) {
                if same != ordered {
                    break;
                }
                items.push(parse_inline(content));
                i += 1;
            }
            blocks.push(Block::List(List { ordered, items }));
            continue;
        }

        let mut paragraph = Vec::new();
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() || (!paragraph.is_empty() && starts_block(&lines, i)) {
                break;
            }
            paragraph.push(parse_inline(line));
            i += 1;
        }
        blocks.push(Block::Paragraph { lines: paragraph });
    }
}

/// `(ordered, content)` when the trimmed line is a list item.
fn list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(caps) = BULLET_ITEM.captures(line) {
        return caps.get(1).map(|m| (false, m.as_str()));
    }
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (true, m.as_str()))
}

/// Whether `lines[index]` opens a heading, list or table.
fn starts_block(lines: &[&str], index: usize) -> bool {
    let line = lines[index].trim();
    HEADING.is_match(line) || list_item(line).is_some() || table::is_table_start(lines, index)
}
