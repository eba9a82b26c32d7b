use velvele_client::{Lang, VelveleClient, VelveleClientError};

fn base_url() -> String {
    std::env::var("VELVELE_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

#[tokio::test]
#[ignore = "requires running HTTP server with seeded data"]
async fn http_read_flow() {
    let client = VelveleClient::new(base_url()).expect("client must build");

    let list = client
        .list_posts(Some(1), Some(5), None)
        .await
        .expect("list_posts must succeed");
    assert!(list.posts.len() <= 5);
    assert_eq!(list.pagination.current_page, 1);
    assert_eq!(
        list.pagination.total_pages,
        list.pagination.total_count.div_ceil(5) as u32
    );

    let Some(first) = list.posts.first() else {
        return;
    };

    let detail = client
        .get_post(&first.slug)
        .await
        .expect("get_post must succeed");
    assert_eq!(detail.post.id, first.id);
    assert!(detail.reading_minutes >= 1);
    assert!(detail.related.iter().all(|post| post.id != first.id));

    let latest = client
        .latest_posts(None)
        .await
        .expect("latest_posts must succeed");
    assert_eq!(latest.first().map(|post| post.id), Some(first.id));

    let tags = client.list_tags().await.expect("list_tags must succeed");
    if let Some(tag) = tags.first() {
        let page = client
            .tag_posts(&tag.slug, None, None)
            .await
            .expect("tag_posts must succeed");
        assert_eq!(page.pagination.total_count, tag.post_count);
    }
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_missing_post_is_not_found() {
    let client = VelveleClient::new(base_url())
        .expect("client must build")
        .with_lang(Lang::En);

    let result = client.get_post("boyle-bir-yazi-yok").await;
    assert!(matches!(result, Err(VelveleClientError::NotFound)));

    let invalid = client.list_posts(Some(0), None, None).await;
    assert!(matches!(invalid, Err(VelveleClientError::InvalidRequest(_))));
}
