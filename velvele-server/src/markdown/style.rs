use super::model::CalloutKind;

pub(crate) const CONTAINER: &str = "prose prose-gray max-w-none";
pub(crate) const PARAGRAPH: &str = "mb-4 leading-relaxed text-gray-700 last:mb-0";
pub(crate) const LINK: &str = "text-blue-600 underline decoration-blue-300 underline-offset-2 hover:text-blue-800 hover:decoration-blue-500";
pub(crate) const INLINE_CODE: &str = "rounded bg-gray-100 px-1.5 py-0.5 text-sm font-mono text-gray-800";
pub(crate) const BLOCK_CODE: &str = "block rounded-lg bg-gray-900 p-4 text-sm text-gray-100";
pub(crate) const BLOCKQUOTE: &str =
    "my-6 border-l-4 border-gray-300 bg-gray-50 pl-4 italic text-gray-700";
pub(crate) const FIGURE: &str = "my-6";
pub(crate) const FIGURE_IMAGE: &str = "w-full rounded-lg";
pub(crate) const FIGCAPTION: &str = "mt-2 text-center text-sm text-gray-600";

const CALLOUT_BASE: &str = "my-6 rounded-lg border-l-4 p-4";
pub(crate) const CALLOUT_LABEL: &str = "text-sm font-medium capitalize";
pub(crate) const CALLOUT_BODY: &str = "mt-1 text-sm";

const INFO_ICON: &str = "M18 10a8 8 0 11-16 0 8 8 0 0116 0zm-7-4a1 1 0 11-2 0 1 1 0 012 0zM9 9a1 1 0 000 2v3a1 1 0 001 1h1a1 1 0 100-2v-3a1 1 0 00-1-1H9z";
const WARNING_ICON: &str = "M8.257 3.099c.765-1.36 2.722-1.36 3.486 0l5.58 9.92c.75 1.334-.213 2.98-1.742 2.98H4.42c-1.53 0-2.493-1.646-1.743-2.98l5.58-9.92zM11 13a1 1 0 11-2 0 1 1 0 012 0zm-1-8a1 1 0 00-1 1v3a1 1 0 002 0V6a1 1 0 00-1-1z";
const ERROR_ICON: &str = "M10 18a8 8 0 100-16 8 8 0 000 16zM8.707 7.293a1 1 0 00-1.414 1.414L8.586 10l-1.293 1.293a1 1 0 101.414 1.414L10 11.414l1.293 1.293a1 1 0 001.414-1.414L11.414 10l1.293-1.293a1 1 0 00-1.414-1.414L10 8.586 8.707 7.293z";
const SUCCESS_ICON: &str = "M10 18a8 8 0 100-16 8 8 0 000 16zm3.707-9.293a1 1 0 00-1.414-1.414L9 10.586 7.707 9.293a1 1 0 00-1.414 1.414l2 2a1 1 0 001.414 0l4-4z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalloutStyle {
    pub(crate) container: &'static str,
    pub(crate) tone: &'static str,
    pub(crate) icon_class: &'static str,
    pub(crate) icon_path: &'static str,
    pub(crate) label: &'static str,
}

impl CalloutStyle {
    pub(crate) fn container_class(&self) -> String {
        format!("{} {}", self.container, self.tone)
    }
}

pub(crate) fn callout(kind: CalloutKind) -> CalloutStyle {
    let (tone, icon_class, icon_path) = match kind {
        CalloutKind::Info => (
            "border-blue-200 bg-blue-50 text-blue-800",
            "h-5 w-5 text-blue-400",
            INFO_ICON,
        ),
        CalloutKind::Warning => (
            "border-yellow-200 bg-yellow-50 text-yellow-800",
            "h-5 w-5 text-yellow-400",
            WARNING_ICON,
        ),
        CalloutKind::Error => (
            "border-red-200 bg-red-50 text-red-800",
            "h-5 w-5 text-red-400",
            ERROR_ICON,
        ),
        CalloutKind::Success => (
            "border-green-200 bg-green-50 text-green-800",
            "h-5 w-5 text-green-400",
            SUCCESS_ICON,
        ),
        // notes reuse the info glyph
        CalloutKind::Note => (
            "border-purple-200 bg-purple-50 text-purple-800",
            "h-5 w-5 text-purple-400",
            INFO_ICON,
        ),
    };

    CalloutStyle {
        container: CALLOUT_BASE,
        tone,
        icon_class,
        icon_path,
        label: kind.as_str(),
    }
}

pub(crate) fn heading(level: u8) -> &'static str {
    match level {
        1 => "mb-6 mt-8 text-3xl font-bold text-gray-900 first:mt-0",
        2 => "mb-4 mt-8 text-2xl font-semibold text-gray-900 first:mt-0",
        3 => "mb-3 mt-6 text-xl font-semibold text-gray-900 first:mt-0",
        _ => "mb-2 mt-4 text-lg font-medium text-gray-900 first:mt-0",
    }
}

pub(crate) fn list(ordered: bool) -> &'static str {
    if ordered {
        "my-4 list-decimal space-y-2 pl-6 text-gray-700"
    } else {
        "my-4 list-disc space-y-2 pl-6 text-gray-700"
    }
}

/// Links leaving the site open in a new tab.
pub(crate) fn is_external(href: &str) -> bool {
    href.starts_with("http")
}
