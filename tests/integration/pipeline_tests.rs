use super::*;
use std::time::Duration;

fn chards_only(server: &MockServer) -> Catalog {
    catalog_for(server).for_vendor(Vendor::Chards)
}

#[tokio::test]
async fn test_structural_price_from_configured_column() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/sovereign", &chards_page("£690.00", "£682.50", "£699.99")).await;

    let watcher = PriceWatcher::from_config(chards_only(&server), &get_test_config())?;
    let result = watcher.resolve("sovereign").await;

    assert_eq!(result, PriceResult::found("sovereign", "Gold Sovereign", 682.50, PriceSource::Structural));
    Ok(())
}

#[tokio::test]
async fn test_fallback_uses_plausible_range() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/sovereign",
        "<html><body><p>Delivery £12.00</p><p>Price £682.50</p></body></html>",
    )
    .await;

    let watcher = PriceWatcher::from_config(chards_only(&server), &get_test_config())?;
    let result = watcher.resolve("sovereign").await;

    assert_eq!(result.price, Some(682.50));
    assert_eq!(result.source, PriceSource::Fallback);
    Ok(())
}

#[tokio::test]
async fn test_table_with_broken_row_falls_back_to_cells() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/silver-britannia",
        r#"<table aria-labelledby="table-title">
            <tr><th>Quantity</th><th>Price</th></tr>
            <tr><td>1+</td><td>£31.20</td></tr>
        </table>"#,
    )
    .await;

    let watcher = PriceWatcher::from_config(chards_only(&server), &get_test_config())?;
    let result = watcher.resolve("silver_britannia").await;

    assert_eq!(result.price, Some(31.20));
    assert_eq!(result.source, PriceSource::Fallback);
    Ok(())
}

#[tokio::test]
async fn test_page_without_prices_is_missing() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/gold-britannia", "<html><body>Coming soon</body></html>").await;

    let watcher = PriceWatcher::from_config(chards_only(&server), &get_test_config())?;
    let result = watcher.resolve("gold_britannia").await;

    assert_eq!(result, PriceResult::missing("gold_britannia", "Gold Britannia"));
    Ok(())
}

#[tokio::test]
async fn test_failed_item_does_not_abort_batch() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sovereign"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/gold-britannia", &chards_page("£2,150.00", "£2,104.03", "£2,190.00")).await;
    mount_page(&server, "/silver-britannia", &chards_page("£33.00", "£31.90", "£31.20")).await;

    let watcher = PriceWatcher::from_config(chards_only(&server), &get_test_config())?;
    let results = watcher.resolve_all().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].price, None);
    assert_eq!(results[1].price, Some(2104.03));
    assert_eq!(results[2].price, Some(31.20));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_results_keep_catalog_order() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sovereign"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(chards_page("£690.00", "£682.50", "£699.99"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/gold-britannia", &chards_page("£2,150.00", "£2,104.03", "£2,190.00")).await;
    mount_page(&server, "/silver-britannia", &chards_page("£33.00", "£31.90", "£31.20")).await;

    let config = ScraperConfig {
        max_concurrent_checks: 3,
        ..get_test_config()
    };
    let watcher = PriceWatcher::from_config(chards_only(&server), &config)?;
    let results = watcher.resolve_all().await;

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["sovereign", "gold_britannia", "silver_britannia"]);
    assert_eq!(results[0].price, Some(682.50));
    Ok(())
}

#[tokio::test]
async fn test_resolving_twice_gives_identical_results() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/", ATKINSONS_PAGE).await;

    let catalog = catalog_for(&server).for_vendor(Vendor::Atkinsons);
    let watcher = PriceWatcher::from_config(catalog, &get_test_config())?;

    let first = watcher.resolve_all().await;
    let second = watcher.resolve_all().await;
    assert_eq!(first, second);
    assert!(first.iter().all(|r| r.source == PriceSource::Structural));
    Ok(())
}

#[tokio::test]
async fn test_unknown_identifier() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let watcher = PriceWatcher::from_config(catalog_for(&server), &get_test_config())?;
    let result = watcher.resolve("platinum_eagle").await;

    assert_eq!(result.price, None);
    assert_eq!(result.source, PriceSource::None);
    Ok(())
}
