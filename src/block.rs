/// Inline text spans with formatting.
///
/// Payloads hold raw text; escaping happens when the span is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Link { label: String, href: String },
    Code(String),
    Bold(String),
    Italic(String),
    BoldItalic(String),
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Span>>,
}

/// Column alignment declared by a table's divider row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A pipe table. Cells keep their raw text; rows may be ragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub id: String,
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns every emitted row is normalized to.
    pub fn column_count(&self) -> usize {
        self.headers.len().max(self.alignments.len())
    }

    /// Alignment of column `index`, `Left` when the divider is short.
    pub fn alignment(&self, index: usize) -> Alignment {
        self.alignments.get(index).copied().unwrap_or_default()
    }
}

/// Block-level elements parsed from Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        lines: Vec<Vec<Span>>,
    },
    CodeBlock {
        /// Info token after the opening fence; has no effect on output
        language: Option<String>,
        content: String,
    },
    List(List),
    Table(Table),
}

/// Generates table identifiers. Owned by the caller and threaded through
/// parsing, so ids are unique for as long as the same generator is reused.
#[derive(Debug, Clone)]
pub struct TableIds {
    prefix: String,
    next: u64,
}

impl TableIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl Default for TableIds {
    fn default() -> Self {
        Self::new("md-table-")
    }
}
