use std::sync::LazyLock;

use regex::Regex;

use super::model::CalloutKind;

const CAPTION_SEPARATOR: &str = " | ";

static CALLOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(info|warning|error|success|note):\s*(.*)\z")
        .expect("callout pattern must compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockquoteClass {
    Default,
    Annotated { kind: CalloutKind, body: String },
}

/// Recognises `<kind>: <text>` at the start of a quote's text. Kinds are
/// case-sensitive; anything else stays a plain quote.
pub(crate) fn classify_blockquote(text: &str) -> BlockquoteClass {
    let text = text.trim_start();
    let text = text.strip_prefix("> ").unwrap_or(text);

    let Some(captures) = CALLOUT.captures(text) else {
        return BlockquoteClass::Default;
    };

    let kind = captures
        .get(1)
        .and_then(|name| CalloutKind::from_name(name.as_str()));
    match kind {
        Some(kind) => BlockquoteClass::Annotated {
            kind,
            body: captures
                .get(2)
                .map(|body| body.as_str().trim_end().to_string())
                .unwrap_or_default(),
        },
        None => BlockquoteClass::Default,
    }
}

/// Splits `"alt | caption"` on the first separator.
pub(crate) fn split_caption(alt: &str) -> (String, Option<String>) {
    match alt.split_once(CAPTION_SEPARATOR) {
        Some((alt, caption)) => (alt.to_string(), Some(caption.to_string())),
        None => (alt.to_string(), None),
    }
}
