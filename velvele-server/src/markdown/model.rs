use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Block {
    Paragraph {
        content: Vec<Inline>,
    },
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    List {
        ordered: bool,
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        lang: Option<String>,
        code: String,
    },
    Blockquote {
        quote: Blockquote,
    },
    Image {
        #[serde(flatten)]
        image: CaptionedImage,
    },
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    ThematicBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub(crate) enum Blockquote {
    Default { children: Vec<Block> },
    Annotated { kind: CalloutKind, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Inline {
    Text {
        text: String,
    },
    Emphasis {
        children: Vec<Inline>,
    },
    Strong {
        children: Vec<Inline>,
    },
    Strikethrough {
        children: Vec<Inline>,
    },
    Code {
        code: String,
    },
    Link {
        href: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    Image {
        #[serde(flatten)]
        image: CaptionedImage,
    },
    TaskMarker {
        checked: bool,
    },
    SoftBreak,
    HardBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CaptionedImage {
    pub(crate) src: String,
    pub(crate) alt: String,
    pub(crate) caption: Option<String>,
    pub(crate) title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CalloutKind {
    Info,
    Warning,
    Error,
    Success,
    Note,
}

impl CalloutKind {
    pub(crate) const ALL: [CalloutKind; 5] = [
        CalloutKind::Info,
        CalloutKind::Warning,
        CalloutKind::Error,
        CalloutKind::Success,
        CalloutKind::Note,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Info => "info",
            CalloutKind::Warning => "warning",
            CalloutKind::Error => "error",
            CalloutKind::Success => "success",
            CalloutKind::Note => "note",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Inline {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }
}

/// Text content with markup removed; breaks become newlines.
pub(crate) fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(&mut out, inlines);
    out
}

fn push_plain_text(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text { text } => out.push_str(text),
            Inline::Code { code } => out.push_str(code),
            Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Strikethrough { children }
            | Inline::Link { children, .. } => push_plain_text(out, children),
            Inline::Image { image } => out.push_str(&image.alt),
            Inline::SoftBreak | Inline::HardBreak => out.push('\n'),
            Inline::TaskMarker { .. } => {}
        }
    }
}

pub(crate) fn blocks_plain_text(blocks: &[Block]) -> String {
    let parts: Vec<String> = blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph { content } | Block::Heading { content, .. } => plain_text(content),
            Block::List { items, .. } => items
                .iter()
                .map(|item| blocks_plain_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::CodeBlock { code, .. } => code.trim_end().to_string(),
            Block::Blockquote { quote } => match quote {
                Blockquote::Default { children } => blocks_plain_text(children),
                Blockquote::Annotated { kind, body } => format!("{kind}: {body}"),
            },
            Block::Image { image } => image.alt.clone(),
            Block::Table { header, rows } => header
                .iter()
                .chain(rows.iter().flatten())
                .map(|cell| plain_text(cell))
                .collect::<Vec<_>>()
                .join(" "),
            Block::ThematicBreak => String::new(),
        })
        .filter(|part| !part.is_empty())
        .collect();
    parts.join("\n")
}
