mod block;
mod config;
mod error;
mod escape;
mod html;
mod inline;
mod normalize;
mod parser;
mod table;

pub mod interaction;

pub use block::{Alignment, Block, List, Span, Table, TableIds};
pub use config::{Config, DownloadsConfig, RenderConfig, TablesConfig};
pub use error::{ClipboardError, ConfigError, DownloadError};
pub use escape::escape_html;
pub use html::{TABLE_ACTION_ATTR, TABLE_ID_ATTR, format_inline};
pub use normalize::normalize;
pub use table::{alignment_row, split_cells};

/// Normalize and parse markdown text into a vector of blocks.
pub fn parse(markdown: &str, ids: &mut TableIds) -> Vec<Block> {
    parser::parse(&normalize(markdown), ids)
}

/// Convert markdown to markup, numbering tables from 1.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to markup with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    let mut ids = TableIds::new(config.tables.id_prefix.clone());
    html::blocks_to_html(&parse(markdown, &mut ids))
}

/// Renders successive messages, keeping table ids unique across them.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: Config,
    ids: TableIds,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        let ids = TableIds::new(config.tables.id_prefix.clone());
        Self { config, ids }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `markdown` inside the container element, appending `class` to
    /// the configured container class.
    pub fn render(&mut self, markdown: &str, class: Option<&str>) -> String {
        let body = self.render_body(markdown);
        html::wrap_container(&body, &self.config.render.container_class, class)
    }

    /// Render `markdown` without the container element.
    pub fn render_body(&mut self, markdown: &str) -> String {
        html::blocks_to_html(&parse(markdown, &mut self.ids))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Config::compiled_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_keeps_ids_unique_across_messages() {
        let mut renderer = Renderer::default();
        let first = renderer.render("a|b\n---|---", None);
        let second = renderer.render("c|d\n---|---", Some("reply"));
        assert!(first.contains("data-md-table-id=\"md-table-1\""));
        assert!(second.contains("data-md-table-id=\"md-table-2\""));
        assert!(second.starts_with("<div class=\"md-content reply\">"));
    }

    #[test]
    fn custom_id_prefix() {
        let mut config = Config::default();
        config.tables.id_prefix = "t".to_string();
        let html = markdown_to_html_with_config("a|b\n---|---", &config);
        assert!(html.contains("data-md-table-id=\"t1\""));
    }

    #[test]
    fn parse_normalizes_first() {
        let blocks = parse("one<br>two", &mut TableIds::default());
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec![
                    vec![Span::Text("one".to_string())],
                    vec![Span::Text("two".to_string())],
                ],
            }]
        );
    }
}
