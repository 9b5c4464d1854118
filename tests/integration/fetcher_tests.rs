use super::*;
use bullion_watcher::FetchError;
use bullion_watcher::fetcher::{FetchRequest, HttpFetcher, PageFetcher};
use std::time::Duration;

#[tokio::test]
async fn test_fetch_sends_browser_headers_and_referer() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let referer = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/coin/2952"))
        .and(header("user-agent", TEST_USER_AGENT))
        .and(header("referer", referer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&get_test_config())?;
    let request = FetchRequest::new(&format!("{}/coin/2952", server.uri())).with_referer(Some(referer));
    let page = fetcher.fetch(&request).await?;

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "<html>ok</html>");
    assert!(page.final_url.ends_with("/coin/2952"));
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access denied"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&get_test_config())?;
    let result = fetcher.fetch(&FetchRequest::new(&server.uri())).await;

    assert!(matches!(result, Err(FetchError::Status { status: 403, .. })));
    Ok(())
}

#[tokio::test]
async fn test_slow_page_times_out() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let config = ScraperConfig {
        request_timeout: 1,
        ..get_test_config()
    };
    let fetcher = HttpFetcher::new(&config)?;
    let result = fetcher.fetch(&FetchRequest::new(&server.uri())).await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&get_test_config())?;
    let result = fetcher.fetch(&FetchRequest::new("http://127.0.0.1:1/")).await;

    assert!(matches!(result, Err(FetchError::Transport { .. }) | Err(FetchError::Timeout { .. })));
    Ok(())
}
