use std::time::Duration;

use feed_core::Query;
use feed_engine::{FailureKind, FetchSettings, PageFetcher, PageRequest, ReqwestPageFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> ReqwestPageFetcher {
    ReqwestPageFetcher::new(FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    })
    .expect("fetcher")
}

fn first_page() -> PageRequest {
    PageRequest {
        query: Query::default(),
        offset: 0,
        limit: 20,
    }
}

const PAGE_JSON: &str = r#"{
    "offset": 20,
    "limit": 20,
    "total": 21,
    "items": [
        {"id": "21", "title": "Mock post #21", "body": "body", "createdAt": "2024-05-01T12:00:00Z"}
    ]
}"#;

#[tokio::test]
async fn fetcher_sends_cursor_params_and_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "20"))
        .and(query_param("q", "mock post"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let request = PageRequest {
        query: Query::new(" Mock Post "),
        offset: 20,
        limit: 20,
    };
    let page = fetcher_for(&server)
        .fetch_page(&request)
        .await
        .expect("fetch ok");

    assert_eq!(page.offset, 20);
    assert_eq!(page.total, 21);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "21");
    assert!(page.items[0].created_at.is_some());
}

#[tokio::test]
async fn fetcher_omits_q_for_empty_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"offset":0,"limit":20,"total":0,"items":[]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher_for(&server)
        .fetch_page(&first_page())
        .await
        .expect("fetch ok");
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(r#"{"message":"Internal server error"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch_page(&first_page())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(r#"{"offset":0,"limit":20,"total":0,"items":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    })
    .expect("fetcher");

    let err = fetcher.fetch_page(&first_page()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"items":"nope"}"#, "application/json"))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch_page(&first_page())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_JSON, "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..FetchSettings::default()
    })
    .expect("fetcher");

    let err = fetcher.fetch_page(&first_page()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}
