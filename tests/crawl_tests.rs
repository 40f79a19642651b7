//! Integration tests for the crawl pipeline
//!
//! These use wiremock to stand in for the chart sites and exercise the
//! full fetch -> extract -> normalize -> aggregate cycle end to end.

use topshelf::crawler::{build_http_client, crawl_source, CancelToken, CrawlOptions, Pacing};
use topshelf::config::HttpConfig;
use topshelf::sources::{BookSource, MovieSource, SourceAdapter};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zero_pacing_options(first_page: u32, last_page: u32) -> CrawlOptions {
    CrawlOptions {
        first_page,
        last_page,
        pacing: Pacing::zero(),
    }
}

fn book_block(rank: u32, title: &str, price: &str) -> String {
    format!(
        r#"<li>
            <div class="list_num red">{rank}.</div>
            <div class="pic"><a href="/p/{rank}"><img src="http://img.test/{rank}.jpg" alt="{title}"/></a></div>
            <div class="name"><a href="/p/{rank}" target="_blank" title="{title}">{title}</a></div>
            <div class="star"><span class="tuijian">98.5%推荐</span></div>
            <div class="publisher_info"><a href="/a" target="_blank">An Author</a></div>
            <div class="biaosheng">销量<span>2023-01-01</span></div>
            <p><span class="price_n">{price}</span></p>
        </li>"#
    )
}

fn book_page(blocks: &[String]) -> String {
    format!(
        r#"<html><body><ul class="bang_list">{}</ul></body></html>"#,
        blocks.join("\n")
    )
}

fn movie_item(rank: u32, title: &str, rating: &str, tagline: Option<&str>) -> String {
    let quote = match tagline {
        Some(q) => format!(r#"<p class="quote"><span class="inq">{q}</span></p>"#),
        None => String::new(),
    };
    format!(
        r#"<li>
            <div class="item">
                <div class="pic">
                    <em class="">{rank}</em>
                    <a href="/subject/{rank}/"><img src="https://img.test/{rank}.webp" alt="{title}"></a>
                </div>
                <div class="info">
                    <div class="hd"><a href="/subject/{rank}/"><span class="title">{title}</span></a></div>
                    <div class="bd">
                        <p>导演: 某导演&nbsp;主演: 某主演</p>
                        <div class="star"><span class="rating_num" property="v:average">{rating}</span></div>
                        {quote}
                    </div>
                </div>
            </div>
        </li>"#
    )
}

fn movie_page(items: &[String]) -> String {
    format!(
        r#"<html><body><ol class="grid_view">{}</ol></body></html>"#,
        items.join("\n")
    )
}

fn book_path(page: u32) -> String {
    format!("/books/fivestars/01.00.00.00.00.00-recent30-0-0-1-{}", page)
}

#[tokio::test]
async fn test_book_crawl_skips_failing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(book_path(1)))
        .respond_with(ResponseTemplate::new(200).set_body_string(book_page(&[
            book_block(1, "Book One", "&yen;59.80"),
            book_block(2, "Book Two", "&yen;32.00"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(book_path(2)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(book_path(3)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(book_page(&[book_block(5, "Book Five", "&yen;45.50")])),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = BookSource::new(server.uri()).unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 3),
        &CancelToken::new(),
    )
    .await;

    // Pages 1 and 3 contribute listings; page 2 contributes one failure.
    let ranks: Vec<u32> = result.listings.iter().map(|b| b.rank).collect();
    assert_eq!(ranks, vec![1, 2, 5]);

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].page, 2);
    assert!(result.failures[0].reason.contains("500"));
}

#[tokio::test]
async fn test_book_listing_fields_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(book_path(1)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(book_page(&[book_block(1, "活着", "&yen;28.00")])),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = BookSource::new(server.uri()).unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 1),
        &CancelToken::new(),
    )
    .await;

    assert_eq!(result.listings.len(), 1);
    let book = &result.listings[0];
    assert_eq!(book.rank, 1);
    assert_eq!(book.title, "活着");
    assert!((book.price - 28.0).abs() < f64::EPSILON);
    assert_eq!(book.author, "An Author");
    assert_eq!(book.note, "98.5%推荐");
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_movie_crawl_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top250"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(movie_page(&[
            movie_item(1, "肖申克的救赎", "9.7", Some("希望让人自由。")),
            movie_item(2, "霸王别姬", "9.6", None),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/top250"))
        .and(query_param("start", "25"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(movie_page(&[movie_item(26, "第二页", "8.9", None)])),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = MovieSource::new(server.uri(), "TestAgent/1.0").unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 2),
        &CancelToken::new(),
    )
    .await;

    assert!(result.failures.is_empty());
    assert_eq!(result.listings.len(), 3);

    assert_eq!(result.listings[0].rank, 1);
    assert_eq!(result.listings[0].note, "希望让人自由。");
    assert_eq!(result.listings[1].note, "NOT AVAILABLE");
    assert_eq!(result.listings[2].rank, 26);
    assert!((result.listings[2].rating - 8.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_movie_source_sends_user_agent() {
    let server = MockServer::start().await;

    // Only a request carrying the configured user agent is answered.
    Mock::given(method("GET"))
        .and(path("/top250"))
        .and(header("user-agent", "TestAgent/1.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(movie_page(&[movie_item(1, "Title", "9.0", None)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = MovieSource::new(server.uri(), "TestAgent/1.0").unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 1),
        &CancelToken::new(),
    )
    .await;

    assert_eq!(result.listings.len(), 1);
}

#[tokio::test]
async fn test_missing_container_is_empty_page_not_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>检测到异常请求</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = MovieSource::new(server.uri(), "ua").unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 1),
        &CancelToken::new(),
    )
    .await;

    assert!(result.listings.is_empty());
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_malformed_listing_dropped_siblings_survive() {
    let server = MockServer::start().await;

    // Rank 2 carries an out-of-range rating and must be dropped alone.
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(ResponseTemplate::new(200).set_body_string(movie_page(&[
            movie_item(1, "Fine", "9.1", None),
            movie_item(2, "Broken", "15.0", None),
            movie_item(3, "Also fine", "8.8", None),
        ])))
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = MovieSource::new(server.uri(), "ua").unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 1),
        &CancelToken::new(),
    )
    .await;

    let ranks: Vec<u32> = result.listings.iter().map(|m| m.rank).collect();
    assert_eq!(ranks, vec![1, 3]);
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_cancelled_crawl_fetches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(book_page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = BookSource::new(server.uri()).unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();

    let result = crawl_source(&client, &adapter, &zero_pacing_options(1, 5), &cancel).await;

    assert!(result.listings.is_empty());
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_duplicate_ranks_surfaced_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(book_path(1)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(book_page(&[book_block(1, "One", "&yen;10.00")])),
        )
        .mount(&server)
        .await;

    // A malformed source repeating rank 1 on the next page.
    Mock::given(method("GET"))
        .and(path(book_path(2)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(book_page(&[book_block(1, "One again", "&yen;10.00")])),
        )
        .mount(&server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let adapter = BookSource::new(server.uri()).unwrap();
    let result = crawl_source(
        &client,
        &adapter,
        &zero_pacing_options(1, 2),
        &CancelToken::new(),
    )
    .await;

    // Both entries retained; the duplicate surfaces through the helper.
    assert_eq!(result.listings.len(), 2);
    assert_eq!(result.duplicate_ranks(), vec![1]);
}

#[tokio::test]
async fn test_adapter_names() {
    let books = BookSource::new("http://x").unwrap();
    let movies = MovieSource::new("https://y", "ua").unwrap();
    assert_eq!(books.name(), "books");
    assert_eq!(movies.name(), "movies");
}
