mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn home_page_renders() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to our website"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn pages_share_navigation_and_footer() -> Result<()> {
    let test = common::seeded();
    let (_, _, body) = common::get(&test.app, "/").await?;
    assert!(body.contains("<nav>"), "navigation missing: {}", body);
    assert!(body.contains("/products/womens"), "nav links missing: {}", body);
    assert!(body.contains("<footer>&copy;"), "footer year missing: {}", body);

    // Error pages carry the same furniture
    let (_, _, body) = common::get(&test.app, "/definitely/not/here").await?;
    assert!(body.contains("<nav>"), "navigation missing on error page: {}", body);
    Ok(())
}

#[tokio::test]
async fn products_index_redirects_to_a_category() -> Result<()> {
    let test = common::seeded();
    let (status, headers, _) = common::get(&test.app, "/products").await?;
    assert_eq!(status, StatusCode::FOUND);
    let location = headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert!(location.starts_with("/products/"), "unexpected redirect target: {}", location);
    Ok(())
}

#[tokio::test]
async fn products_index_on_empty_catalog_is_page_not_found() -> Result<()> {
    let test = common::empty();
    let (status, _, body) = common::get(&test.app, "/products").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn category_page_lists_its_products() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/products/mens").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Men's Clothing"), "category name missing: {}", body);
    assert!(body.contains("Classic T-Shirt"), "products missing: {}", body);
    assert!(body.contains("/products/mens/123"), "item links missing: {}", body);
    Ok(())
}

#[tokio::test]
async fn unknown_category_is_page_not_found() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/products/garden").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn invalid_display_mode_is_bad_request() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/products/mens?display=carousel").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("display mode"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn item_page_renders_the_product() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/products/mens/123").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Classic T-Shirt"), "unexpected body: {}", body);
    assert!(body.contains("29.99"), "price missing: {}", body);
    Ok(())
}

#[tokio::test]
async fn missing_item_is_item_not_found() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/products/mens/999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Item Not Found"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn cross_category_item_is_item_not_found() -> Result<()> {
    let test = common::seeded();
    // 231 exists in the catalog, but under womens
    let (status, _, body) = common::get(&test.app, "/products/mens/231").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Item Not Found"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn non_numeric_item_id_is_bad_request() -> Result<()> {
    let test = common::seeded();
    let (status, _, _) = common::get(&test.app, "/products/mens/widget").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unmatched_route_is_page_not_found() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/definitely/not/here").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn testcode_echoes_numeric_status() -> Result<()> {
    let test = common::seeded();
    let (status, _, body) = common::get(&test.app, "/testcode/503").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Test Error"), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn testcode_rejects_non_numeric_code() -> Result<()> {
    let test = common::seeded();
    let (status, _, _) = common::get(&test.app, "/testcode/abc").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn responses_carry_timing_header() -> Result<()> {
    let test = common::seeded();
    let (_, headers, _) = common::get(&test.app, "/about").await?;
    let timing = headers
        .get("x-response-time")
        .and_then(|v| v.to_str().ok())
        .expect("timing header");
    assert!(timing.ends_with("ms"), "unexpected timing value: {}", timing);
    Ok(())
}
