use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use velvele_client::{
    Lang, PageLink, PostDetail, PostList, PostSummary, TagPosts, TagWithCount, VelveleClient,
    VelveleClientError,
};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "VELVELE_SERVER";

#[derive(Debug, Parser)]
#[command(name = "velvele-cli", version, about = "CLI для чтения блога Velvele")]
struct Cli {
    /// Адрес сервера (по умолчанию $VELVELE_SERVER или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Язык контента: tr или en. Без флага язык выбирает сервер.
    #[arg(long, global = true)]
    lang: Option<Lang>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список опубликованных постов.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Только посты с этим тегом (slug).
        #[arg(long)]
        tag: Option<String>,
    },
    /// Последние посты.
    Latest {
        #[arg(long, default_value_t = 1)]
        limit: u32,
    },
    /// Пост по slug.
    Get {
        #[arg(long)]
        slug: String,
        /// Вывести готовый HTML вместо markdown.
        #[arg(long, conflicts_with = "blocks")]
        html: bool,
        /// Вывести типизированные блоки в JSON.
        #[arg(long)]
        blocks: bool,
    },
    /// Теги с количеством постов.
    Tags,
    /// Посты тега.
    Tag {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = VelveleClient::new(server).context("не удалось создать HTTP-клиент")?;
    if let Some(lang) = cli.lang {
        client = client.with_lang(lang);
    }

    match cli.command {
        Command::List { page, limit, tag } => {
            let list = client
                .list_posts(page, limit, tag.as_deref())
                .await
                .map_err(map_client_error)?;
            print_list(&list);
        }
        Command::Latest { limit } => {
            let posts = client
                .latest_posts(Some(limit))
                .await
                .map_err(map_client_error)?;
            for post in &posts {
                print_summary(post);
            }
        }
        Command::Get { slug, html, blocks } => {
            let detail = client.get_post(&slug).await.map_err(map_client_error)?;
            if blocks {
                let json = serde_json::to_string_pretty(&detail.content_blocks)
                    .context("не удалось сериализовать блоки")?;
                println!("{json}");
            } else {
                print_detail(&detail, html);
            }
        }
        Command::Tags => {
            let tags = client.list_tags().await.map_err(map_client_error)?;
            print_tags(&tags);
        }
        Command::Tag { slug, page, limit } => {
            let tag = client
                .tag_posts(&slug, page, limit)
                .await
                .map_err(map_client_error)?;
            print_tag(&tag);
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .map(|server| server.trim().to_string())
        .filter(|server| !server.is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: VelveleClientError) -> anyhow::Error {
    let message = match err {
        VelveleClientError::NotFound => "не найдено (или ещё не опубликовано)".to_string(),
        VelveleClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        VelveleClientError::Server(message) => format!("ошибка сервера: {message}"),
        VelveleClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn format_window(window: &[PageLink], current: u32) -> String {
    window
        .iter()
        .map(|link| match link.page {
            Some(page) if page == current => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_summary(post: &PostSummary) {
    let published = post
        .published_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let tags = post
        .tags
        .iter()
        .map(|tag| tag.slug.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!("- {published} {} ({}) [{tags}]", post.title, post.slug);
}

fn print_list(list: &PostList) {
    println!(
        "Постов: {} (страница {}/{}, всего {})",
        list.posts.len(),
        list.pagination.current_page,
        list.pagination.total_pages,
        list.pagination.total_count
    );
    for post in &list.posts {
        print_summary(post);
    }
    if !list.page_window.is_empty() {
        println!(
            "Страницы: {}",
            format_window(&list.page_window, list.pagination.current_page)
        );
    }
}

fn print_detail(detail: &PostDetail, html: bool) {
    let post = &detail.post;
    println!("{}", post.title);
    println!("slug: {}", post.slug);
    println!("lang: {}", post.lang.as_str());
    if let Some(author) = &post.author {
        println!("автор: {}", author.name);
    }
    if let Some(published_at) = post.published_at {
        println!("опубликовано: {published_at}");
    }
    println!("время чтения: {} мин", detail.reading_minutes);
    println!();
    if html {
        println!("{}", detail.content_html);
    } else {
        println!("{}", detail.content_md.as_deref().unwrap_or_default());
    }
    if !detail.related.is_empty() {
        println!();
        println!("Похожие посты:");
        for related in &detail.related {
            print_summary(related);
        }
    }
}

fn print_tags(tags: &[TagWithCount]) {
    println!("Тегов: {}", tags.len());
    for tag in tags {
        println!("- {} ({}): {}", tag.name, tag.slug, tag.post_count);
    }
}

fn print_tag(tag: &TagPosts) {
    println!("Тег: {} ({})", tag.tag.name, tag.tag.slug);
    println!(
        "Постов: {} (страница {}/{}, всего {})",
        tag.posts.len(),
        tag.pagination.current_page,
        tag.pagination.total_pages,
        tag.pagination.total_count
    );
    for post in &tag.posts {
        print_summary(post);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env() {
        assert_eq!(resolve_server(None, None), DEFAULT_HTTP_SERVER);
        assert_eq!(
            resolve_server(None, Some("localhost:9000".to_string())),
            "http://localhost:9000"
        );
        assert_eq!(
            resolve_server(
                Some("https://velvele.net".to_string()),
                Some("localhost:9000".to_string())
            ),
            "https://velvele.net"
        );
        assert_eq!(resolve_server(Some("  ".to_string()), None), DEFAULT_HTTP_SERVER);
    }

    #[test]
    fn page_window_marks_current_page() {
        let window = vec![
            PageLink {
                page: Some(1),
                ellipsis: false,
            },
            PageLink {
                page: None,
                ellipsis: true,
            },
            PageLink {
                page: Some(4),
                ellipsis: false,
            },
            PageLink {
                page: Some(5),
                ellipsis: false,
            },
        ];
        assert_eq!(format_window(&window, 4), "1 … [4] 5");
    }

    #[test]
    fn cli_parses_lang_flag() {
        let cli = Cli::try_parse_from(["velvele-cli", "--lang", "en", "tags"])
            .expect("arguments must parse");
        assert_eq!(cli.lang, Some(Lang::En));
        assert!(matches!(cli.command, Command::Tags));

        assert!(Cli::try_parse_from(["velvele-cli", "--lang", "de", "tags"]).is_err());
    }
}
