use std::borrow::Cow;

use super::model::{Block, Blockquote, CaptionedImage, CalloutKind, Inline};
use super::style;

const SAFE_PROTOCOLS: [&str; 6] = ["http", "https", "mailto", "xmpp", "irc", "ircs"];

/// Renders blocks into a single HTML fragment. All text and attribute values
/// are escaped; URLs with unknown schemes are dropped.
pub(crate) fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    out.push_str(&format!("<div class=\"{}\">", style::CONTAINER));
    for block in blocks {
        render_block(&mut out, block);
    }
    out.push_str("</div>");
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph { content } => {
            out.push_str(&format!("<p class=\"{}\">", style::PARAGRAPH));
            render_inlines(out, content);
            out.push_str("</p>");
        }
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 4);
            out.push_str(&format!("<h{level} class=\"{}\">", style::heading(level)));
            render_inlines(out, content);
            out.push_str(&format!("</h{level}>"));
        }
        Block::List {
            ordered,
            start,
            items,
        } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag} class=\"{}\"", style::list(*ordered)));
            if let Some(start) = start
                && *start != 1
            {
                out.push_str(&format!(" start=\"{start}\""));
            }
            out.push('>');
            for item in items {
                out.push_str("<li>");
                for block in item {
                    render_block(out, block);
                }
                out.push_str("</li>");
            }
            out.push_str(&format!("</{tag}>"));
        }
        Block::CodeBlock { lang, code } => {
            out.push_str("<pre><code class=\"");
            out.push_str(style::BLOCK_CODE);
            if let Some(lang) = lang {
                out.push_str(" language-");
                out.push_str(&escape(lang));
            }
            out.push_str("\">");
            out.push_str(&escape(code));
            out.push_str("</code></pre>");
        }
        Block::Blockquote { quote } => match quote {
            Blockquote::Default { children } => {
                out.push_str(&format!("<blockquote class=\"{}\">", style::BLOCKQUOTE));
                for block in children {
                    render_block(out, block);
                }
                out.push_str("</blockquote>");
            }
            Blockquote::Annotated { kind, body } => render_callout(out, *kind, body),
        },
        Block::Image { image } => render_figure(out, image),
        Block::Table { header, rows } => {
            out.push_str("<table><thead><tr>");
            for cell in header {
                out.push_str("<th>");
                render_inlines(out, cell);
                out.push_str("</th>");
            }
            out.push_str("</tr></thead><tbody>");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str("<td>");
                    render_inlines(out, cell);
                    out.push_str("</td>");
                }
                out.push_str("</tr>");
            }
            out.push_str("</tbody></table>");
        }
        Block::ThematicBreak => out.push_str("<hr />"),
    }
}

fn render_callout(out: &mut String, kind: CalloutKind, body: &str) {
    let callout = style::callout(kind);
    out.push_str(&format!(
        "<div class=\"{}\"><div class=\"flex items-start\"><div class=\"flex-shrink-0\">",
        callout.container_class()
    ));
    out.push_str(&format!(
        "<svg class=\"{}\" fill=\"currentColor\" viewBox=\"0 0 20 20\" aria-hidden=\"true\">\
         <path fill-rule=\"evenodd\" d=\"{}\" clip-rule=\"evenodd\" /></svg>",
        callout.icon_class, callout.icon_path
    ));
    out.push_str(&format!(
        "</div><div class=\"ml-3\"><p class=\"{}\">{}</p><div class=\"{}\">{}</div></div></div></div>",
        style::CALLOUT_LABEL,
        callout.label,
        style::CALLOUT_BODY,
        escape(body)
    ));
}

fn render_figure(out: &mut String, image: &CaptionedImage) {
    out.push_str(&format!("<figure class=\"{}\">", style::FIGURE));
    render_img(out, image, Some(style::FIGURE_IMAGE));
    if let Some(caption) = &image.caption {
        out.push_str(&format!(
            "<figcaption class=\"{}\">{}</figcaption>",
            style::FIGCAPTION,
            escape(caption)
        ));
    }
    out.push_str("</figure>");
}

fn render_img(out: &mut String, image: &CaptionedImage, class: Option<&str>) {
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\"",
        escape(&safe_url(&image.src)),
        escape(&image.alt)
    ));
    if let Some(class) = class {
        out.push_str(&format!(" class=\"{class}\""));
    }
    if let Some(title) = &image.title {
        out.push_str(&format!(" title=\"{}\"", escape(title)));
    }
    out.push_str(" />");
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        render_inline(out, inline);
    }
}

fn render_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text { text } => out.push_str(&escape(text)),
        Inline::Emphasis { children } => wrap(out, "em", children),
        Inline::Strong { children } => wrap(out, "strong", children),
        Inline::Strikethrough { children } => wrap(out, "del", children),
        Inline::Code { code } => out.push_str(&format!(
            "<code class=\"{}\">{}</code>",
            style::INLINE_CODE,
            escape(code)
        )),
        Inline::Link {
            href,
            title,
            children,
        } => {
            let href = safe_url(href);
            out.push_str(&format!(
                "<a href=\"{}\" class=\"{}\"",
                escape(&href),
                style::LINK
            ));
            if let Some(title) = title {
                out.push_str(&format!(" title=\"{}\"", escape(title)));
            }
            if style::is_external(&href) {
                out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
            }
            out.push('>');
            render_inlines(out, children);
            out.push_str("</a>");
        }
        Inline::Image { image } => {
            render_img(out, image, None);
            if let Some(caption) = &image.caption {
                out.push_str(&format!(
                    "<span class=\"{}\">{}</span>",
                    style::FIGCAPTION,
                    escape(caption)
                ));
            }
        }
        Inline::TaskMarker { checked } => {
            out.push_str("<input type=\"checkbox\" disabled");
            if *checked {
                out.push_str(" checked");
            }
            out.push_str(" /> ");
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />"),
    }
}

fn wrap(out: &mut String, tag: &str, children: &[Inline]) {
    out.push_str(&format!("<{tag}>"));
    render_inlines(out, children);
    out.push_str(&format!("</{tag}>"));
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Relative URLs pass through; absolute ones must use a known protocol.
fn safe_url(url: &str) -> Cow<'_, str> {
    let Some(colon) = url.find(':') else {
        return Cow::Borrowed(url);
    };
    if url[..colon].contains(['/', '?', '#']) {
        return Cow::Borrowed(url);
    }

    let scheme = url[..colon].to_ascii_lowercase();
    if SAFE_PROTOCOLS.contains(&scheme.as_str()) {
        Cow::Borrowed(url)
    } else {
        Cow::Borrowed("")
    }
}

#[cfg(test)]
mod tests {
    use super::{escape, render_html, safe_url};
    use crate::markdown::parser::parse;

    fn html(markdown: &str) -> String {
        render_html(&parse(markdown))
    }

    #[test]
    fn escapes_text_and_raw_html() {
        let out = html("<script>alert('x')</script>\n\nA & B");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(out.contains("A &amp; B"));
    }

    #[test]
    fn callout_renders_kind_label_and_body() {
        let out = html("> success: Kayıt tamamlandı");
        assert!(out.contains("bg-green-50"));
        assert!(out.contains(">success</p>"));
        assert!(out.contains("<div class=\"mt-1 text-sm\">Kayıt tamamlandı</div>"));
        assert!(!out.contains("<blockquote"));
    }

    #[test]
    fn plain_quote_renders_blockquote() {
        let out = html("> Just a quote");
        assert!(out.contains("<blockquote class=\"my-6 border-l-4"));
        assert!(out.contains("Just a quote"));
    }

    #[test]
    fn figure_caption_only_when_present() {
        let captioned = html("![Cover photo | A scenic view](/a.jpg)");
        assert!(captioned.contains("<figure class=\"my-6\">"));
        assert!(captioned.contains("alt=\"Cover photo\""));
        assert!(captioned.contains("<figcaption class=\"mt-2 text-center text-sm text-gray-600\">A scenic view</figcaption>"));

        let bare = html("![Cover photo](/a.jpg)");
        assert!(bare.contains("<figure"));
        assert!(!bare.contains("<figcaption"));
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let external = html("[dış](https://example.com)");
        assert!(external.contains("target=\"_blank\" rel=\"noopener noreferrer\""));

        let internal = html("[iç](/posts/merhaba)");
        assert!(internal.contains("href=\"/posts/merhaba\""));
        assert!(!internal.contains("target="));
    }

    #[test]
    fn unsafe_link_protocol_is_dropped() {
        let out = html("[tıkla](javascript:alert(1))");
        assert!(out.contains("href=\"\""));
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn inline_and_block_code_use_different_classes() {
        let out = html("`x`\n\n```\ny\n```");
        assert!(out.contains("<code class=\"rounded bg-gray-100"));
        assert!(out.contains("<pre><code class=\"block rounded-lg bg-gray-900"));
    }

    #[test]
    fn ordered_list_keeps_start() {
        let out = html("3. üç\n4. dört");
        assert!(out.contains("<ol class=\"my-4 list-decimal space-y-2 pl-6 text-gray-700\" start=\"3\">"));
    }

    #[test]
    fn task_list_renders_checkboxes() {
        let out = html("- [x] bitti\n- [ ] kaldı");
        assert!(out.contains("<input type=\"checkbox\" disabled checked />"));
        assert!(out.contains("<input type=\"checkbox\" disabled />"));
    }

    #[test]
    fn url_filter_allows_relative_and_known_schemes() {
        assert_eq!(safe_url("/a/b:c"), "/a/b:c");
        assert_eq!(safe_url("#frag"), "#frag");
        assert_eq!(safe_url("MAILTO:a@b.c"), "MAILTO:a@b.c");
        assert_eq!(safe_url("data:text/html,x"), "");
    }

    #[test]
    fn escape_borrows_clean_input() {
        assert!(matches!(escape("temiz"), std::borrow::Cow::Borrowed(_)));
        assert_eq!(escape("\"q\""), "&quot;q&quot;");
    }
}
