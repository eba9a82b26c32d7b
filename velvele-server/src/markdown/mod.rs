//! Markdown content pipeline: parse into typed blocks, then render HTML.

mod annotations;
mod model;
mod parser;
mod render;
mod style;

use serde::Serialize;

pub(crate) use model::Block;
use parser::parse;
use render::render_html;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RenderedMarkdown {
    pub(crate) blocks: Vec<Block>,
    pub(crate) html: String,
}

pub(crate) fn render(markdown: &str) -> RenderedMarkdown {
    let blocks = parse(markdown);
    let html = render_html(&blocks);
    RenderedMarkdown { blocks, html }
}

#[cfg(test)]
mod tests {
    use super::{Block, render};

    #[test]
    fn render_returns_blocks_and_html_together() {
        let rendered = render("# Merhaba\n\nİlk yazı.");
        assert_eq!(rendered.blocks.len(), 2);
        assert!(matches!(rendered.blocks[0], Block::Heading { level: 1, .. }));
        assert!(rendered.html.contains("<h1 class="));
        assert!(rendered.html.contains("İlk yazı."));
    }

    #[test]
    fn blocks_serialize_with_type_tags() {
        let rendered = render("> note: Not düş\n\n![a | b](/x.png)");
        let json = serde_json::to_value(&rendered.blocks).expect("blocks serialize");
        assert_eq!(json[0]["type"], "blockquote");
        assert_eq!(json[0]["quote"]["variant"], "annotated");
        assert_eq!(json[0]["quote"]["kind"], "note");
        assert_eq!(json[1]["type"], "image");
        assert_eq!(json[1]["caption"], "b");
    }
}
