use super::*;

#[tokio::test]
async fn test_exhausted_extraction_logs_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/sovereign", "<html><body><p>No prices today</p></body></html>").await;
    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;

    let (logs, _guard) = capture_logs();
    let result = watcher.resolve("sovereign").await;
    let output = logs.contents();

    assert_eq!(result.source, PriceSource::None);
    assert!(output.contains("Price table not found") || output.contains("price table not found"));
    assert!(output.contains("ERROR"));
    assert!(output.contains("extraction_failed"));
    assert!(!output.contains("unknown_identifier"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_identifier_has_its_own_category() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;

    let (logs, _guard) = capture_logs();
    watcher.resolve("platinum_eagle").await;
    let output = logs.contents();

    assert!(output.contains("ERROR"));
    assert!(output.contains("unknown_identifier"));
    assert!(output.contains("platinum_eagle"));
    assert!(!output.contains("extraction_failed"));
    assert!(!output.contains("fetch_error"));
    Ok(())
}

#[tokio::test]
async fn test_degraded_fallback_logs_warning() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/gold-britannia", "<p>Delivery £12.00</p><p>Gift box £25.00</p>").await;
    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;

    let (logs, _guard) = capture_logs();
    let result = watcher.resolve("gold_britannia").await;
    let output = logs.contents();

    assert_eq!(result.price, Some(12.00));
    assert_eq!(result.source, PriceSource::Fallback);
    assert!(output.contains("WARN"));
    assert!(output.contains("No prices in Gold Britannia range found"));
    assert!(!output.contains("ERROR"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_logged_with_item_context() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;

    let (logs, _guard) = capture_logs();
    watcher.resolve("XAG").await;
    let output = logs.contents();

    assert!(output.contains("fetch_error"));
    assert!(output.contains("503"));
    assert!(output.contains("resolve{vendor=Atkinsons item=XAG}"));
    Ok(())
}

#[tokio::test]
async fn test_fetched_page_metadata_is_logged() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/", ATKINSONS_PAGE).await;
    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;

    let (logs, _guard) = capture_logs();
    let result = watcher.resolve("XAU").await;
    let output = logs.contents();

    assert_eq!(result.price, Some(2104.03));
    assert!(output.contains("Fetched price page"));
    assert!(output.contains(&format!("final_url={}/", server.uri())));
    assert!(output.contains("response_time_ms="));
    Ok(())
}
