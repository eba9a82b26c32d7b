use std::borrow::Cow;

use axum::{extract::State, http::header, response::IntoResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::application::post_service::SITEMAP_POST_LIMIT;
use crate::domain::post::Post;
use crate::presentation::AppState;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// (path, changefreq, priority)
const STATIC_PAGES: [(&str, &str, &str); 3] = [
    ("", "daily", "1.0"),
    ("/arsiv", "daily", "0.8"),
    ("/etiket", "weekly", "0.7"),
];

#[derive(Debug, Clone, PartialEq)]
struct UrlEntry {
    loc: String,
    lastmod: DateTime<Utc>,
    changefreq: &'static str,
    priority: &'static str,
}

fn static_entries(site_url: &str, now: DateTime<Utc>) -> Vec<UrlEntry> {
    STATIC_PAGES
        .into_iter()
        .map(|(path, changefreq, priority)| UrlEntry {
            loc: format!("{site_url}{path}"),
            lastmod: now,
            changefreq,
            priority,
        })
        .collect()
}

fn post_entry(site_url: &str, post: &Post) -> UrlEntry {
    UrlEntry {
        loc: format!("{site_url}/posts/{}", post.slug),
        lastmod: post.updated_at,
        changefreq: "monthly",
        priority: "0.6",
    }
}

fn into_xml(entries: &[UrlEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&entry.lastmod.to_rfc3339_opts(SecondsFormat::Secs, true));
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(entry.changefreq);
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(entry.priority);
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    tag = "seo",
    responses(
        (status = 200, description = "Sitemap of static pages and recent posts", content_type = "application/xml", body = String)
    )
)]
pub(crate) async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let site_url = state.site.site_url.as_str();
    let mut entries = static_entries(site_url, Utc::now());

    match state.post_service.sitemap_entries(SITEMAP_POST_LIMIT).await {
        Ok(posts) => entries.extend(posts.iter().map(|post| post_entry(site_url, post))),
        Err(err) => warn!(error = %err, "sitemap falls back to static pages"),
    }

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        into_xml(&entries),
    )
}

#[utoipa::path(
    get,
    path = "/robots.txt",
    tag = "seo",
    responses(
        (status = 200, description = "Crawler rules", content_type = "text/plain", body = String)
    )
)]
pub(crate) async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "User-Agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        state.site.site_url
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{escape_xml, into_xml, static_entries};

    #[test]
    fn static_pages_come_first_with_their_priorities() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let entries = static_entries("https://velvele.net", now);
        let locs: Vec<&str> = entries.iter().map(|entry| entry.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://velvele.net",
                "https://velvele.net/arsiv",
                "https://velvele.net/etiket"
            ]
        );
        assert_eq!(entries[2].changefreq, "weekly");
    }

    #[test]
    fn xml_lists_each_entry() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let xml = into_xml(&static_entries("https://velvele.net", now));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<lastmod>2024-06-01T12:00:00Z</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn escape_xml_handles_specials() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
