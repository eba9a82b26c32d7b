use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use super::annotations::{BlockquoteClass, classify_blockquote, split_caption};
use super::model::{Block, Blockquote, CaptionedImage, Inline, blocks_plain_text, plain_text};

pub(crate) fn parse(markdown: &str) -> Vec<Block> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.finish()
}

enum Frame {
    Root(Vec<Block>),
    Quote(Vec<Block>),
    Passthrough(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item {
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    Heading(u8, Vec<Inline>),
    Code {
        lang: Option<String>,
        code: String,
    },
    RawHtml(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        href: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    Image {
        src: String,
        title: Option<String>,
        alt: String,
    },
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    TableHead(Vec<Vec<Inline>>),
    TableRow(Vec<Vec<Inline>>),
    TableCell(Vec<Inline>),
}

/// Folds the flat event stream into a tree; every `End` closes the innermost frame.
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root(Vec::new())],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(Inline::Code {
                code: code.into_string(),
            }),
            // raw HTML is shown, never interpreted
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::TaskListMarker(checked) => self.push_inline(Inline::TaskMarker { checked }),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading(heading_level(level), Vec::new()),
            Tag::BlockQuote(_) => Frame::Quote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::Code {
                lang: code_lang(kind),
                code: String::new(),
            },
            Tag::HtmlBlock => Frame::RawHtml(String::new()),
            Tag::List(start) => Frame::List {
                start,
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
            Tag::Table(_) => Frame::Table {
                header: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::TableHead(Vec::new()),
            Tag::TableRow => Frame::TableRow(Vec::new()),
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                href: dest_url.into_string(),
                title: non_empty(title.into_string()),
                children: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.into_string(),
                title: non_empty(title.into_string()),
                alt: String::new(),
            },
            _ => Frame::Passthrough(Vec::new()),
        };
        self.stack.push(frame);
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Root(_) => {}
            Frame::Paragraph(content) => self.close_paragraph(content),
            Frame::Heading(level, content) => self.push_block(Block::Heading { level, content }),
            Frame::Quote(children) => {
                let class = match children.first() {
                    Some(Block::Paragraph { .. }) => {
                        classify_blockquote(&blocks_plain_text(&children))
                    }
                    _ => BlockquoteClass::Default,
                };
                let quote = match class {
                    BlockquoteClass::Annotated { kind, body } => {
                        Blockquote::Annotated { kind, body }
                    }
                    BlockquoteClass::Default => Blockquote::Default { children },
                };
                self.push_block(Block::Blockquote { quote });
            }
            Frame::Passthrough(blocks) => {
                for block in blocks {
                    self.push_block(block);
                }
            }
            Frame::Code { lang, code } => self.push_block(Block::CodeBlock { lang, code }),
            Frame::RawHtml(html) => {
                let html = html.trim_end();
                if !html.is_empty() {
                    self.push_block(Block::Paragraph {
                        content: vec![Inline::text(html)],
                    });
                }
            }
            Frame::List { start, items } => self.push_block(Block::List {
                ordered: start.is_some(),
                start,
                items,
            }),
            Frame::Item { mut blocks, inlines } => {
                flush_inlines(&mut blocks, inlines);
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(blocks);
                }
            }
            Frame::Table { header, rows } => self.push_block(Block::Table { header, rows }),
            Frame::TableHead(cells) => {
                if let Some(Frame::Table { header, .. }) = self.stack.last_mut() {
                    *header = cells;
                }
            }
            Frame::TableRow(cells) => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::TableCell(content) => match self.stack.last_mut() {
                Some(Frame::TableHead(cells)) | Some(Frame::TableRow(cells)) => cells.push(content),
                _ => {}
            },
            Frame::Emphasis(children) => self.push_inline(Inline::Emphasis { children }),
            Frame::Strong(children) => self.push_inline(Inline::Strong { children }),
            Frame::Strikethrough(children) => self.push_inline(Inline::Strikethrough { children }),
            Frame::Link {
                href,
                title,
                children,
            } => self.push_inline(Inline::Link {
                href,
                title,
                children,
            }),
            Frame::Image { src, title, alt } => {
                let (alt, caption) = split_caption(&alt);
                self.push_inline(Inline::Image {
                    image: CaptionedImage {
                        src,
                        alt,
                        caption,
                        title,
                    },
                });
            }
        }
    }

    /// A paragraph holding nothing but an image becomes a figure.
    fn close_paragraph(&mut self, mut content: Vec<Inline>) {
        if content.is_empty() {
            return;
        }
        if let [Inline::Image { .. }] = content.as_slice()
            && let Some(Inline::Image { image }) = content.pop()
        {
            self.push_block(Block::Image { image });
            return;
        }
        self.push_block(Block::Paragraph { content });
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::Code { code, .. }) => code.push_str(text),
            Some(Frame::RawHtml(html)) => html.push_str(text),
            Some(Frame::Image { alt, .. }) => alt.push_str(text),
            _ => self.push_inline(Inline::text(text)),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        match self.stack.last_mut() {
            Some(
                Frame::Paragraph(target)
                | Frame::Heading(_, target)
                | Frame::Emphasis(target)
                | Frame::Strong(target)
                | Frame::Strikethrough(target)
                | Frame::TableCell(target)
                | Frame::Link {
                    children: target, ..
                }
                | Frame::Item {
                    inlines: target, ..
                },
            ) => push_merged(target, inline),
            Some(Frame::Image { alt, .. }) => alt.push_str(&plain_text(&[inline])),
            Some(Frame::Code { code, .. }) => code.push_str(&plain_text(&[inline])),
            Some(Frame::RawHtml(html)) => html.push_str(&plain_text(&[inline])),
            Some(Frame::Root(_) | Frame::Quote(_) | Frame::Passthrough(_)) => {
                self.push_block(Block::Paragraph {
                    content: vec![inline],
                });
            }
            // stray whitespace between table or list structure
            _ => {}
        }
    }

    fn push_block(&mut self, block: Block) {
        for frame in self.stack.iter_mut().rev() {
            match frame {
                Frame::Root(blocks) | Frame::Quote(blocks) | Frame::Passthrough(blocks) => {
                    blocks.push(block);
                    return;
                }
                Frame::Item { blocks, inlines } => {
                    flush_inlines(blocks, std::mem::take(inlines));
                    blocks.push(block);
                    return;
                }
                _ => continue,
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(Frame::Root(blocks)) => blocks,
            _ => Vec::new(),
        }
    }
}

fn push_merged(target: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text { text } = &inline
        && let Some(Inline::Text { text: last }) = target.last_mut()
    {
        last.push_str(text);
        return;
    }
    target.push(inline);
}

fn flush_inlines(blocks: &mut Vec<Block>, inlines: Vec<Inline>) {
    if !inlines.is_empty() {
        blocks.push(Block::Paragraph { content: inlines });
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        _ => 4,
    }
}

fn code_lang(kind: CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
