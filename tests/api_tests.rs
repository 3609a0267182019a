//! Tests for the HTTP API
//!
//! Drives the real router through tower's `oneshot` with a mocked price
//! history source, so every status code and body shape is checked without
//! touching the network.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use chrono::DateTime;
    use mockall::mock;
    use serde_json::Value;
    use tower::ServiceExt;

    use stocklens::api::create_router;
    use stocklens::types::PricePoint;
    use stocklens::upstream::PriceHistorySource;

    mock! {
        Source {}

        #[async_trait]
        impl PriceHistorySource for Source {
            async fn price_history(&self, ticker: &str, minutes: u32) -> Result<Vec<PricePoint>>;
        }
    }

    fn make_app(source: MockSource) -> Router {
        create_router(Arc::new(source))
    }

    fn make_point(price: f64, offset_secs: i64) -> PricePoint {
        PricePoint::new(
            price,
            DateTime::from_timestamp(1_746_677_000 + offset_secs, 0).unwrap(),
        )
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Bytes) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    fn json(body: &Bytes) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    // ============================================================================
    // Average price endpoint
    // ============================================================================

    #[tokio::test]
    async fn test_average_returns_summary_with_history() {
        let mut source = MockSource::new();
        let points = vec![
            make_point(10.0, 0),
            make_point(20.0, 30),
            make_point(30.0, 60),
        ];
        source
            .expect_price_history()
            .withf(|ticker: &str, minutes: &u32| ticker == "NVDA" && *minutes == 50)
            .returning(move |_, _| Ok(points.clone()));

        let (status, body) = send(
            make_app(source),
            "/stocks/NVDA?minutes=50&aggregation=average",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["averagePrice"], 20.0);
        assert_eq!(body["priceHistory"].as_array().unwrap().len(), 3);
        assert_eq!(body["priceHistory"][0]["price"], 10.0);
        assert!(body["priceHistory"][0]["lastUpdatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_average_of_empty_history_is_null() {
        let mut source = MockSource::new();
        source
            .expect_price_history()
            .returning(|_, _| Ok(Vec::new()));

        let (status, body) = send(
            make_app(source),
            "/stocks/GOOG?minutes=10&aggregation=average",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert!(body["averagePrice"].is_null());
        assert_eq!(body["priceHistory"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_average_requires_aggregation_parameter() {
        let (status, body) = send(make_app(MockSource::new()), "/stocks/NVDA?minutes=50").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");
    }

    #[tokio::test]
    async fn test_average_rejects_unknown_aggregation() {
        let (status, body) = send(
            make_app(MockSource::new()),
            "/stocks/NVDA?minutes=50&aggregation=median",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");
    }

    #[tokio::test]
    async fn test_average_requires_minutes_parameter() {
        let (status, body) = send(
            make_app(MockSource::new()),
            "/stocks/NVDA?aggregation=average",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");
    }

    #[tokio::test]
    async fn test_average_rejects_non_numeric_minutes() {
        // Rejected by query deserialization before the handler runs, so only
        // the status is pinned here.
        let (status, _body) = send(
            make_app(MockSource::new()),
            "/stocks/NVDA?minutes=soon&aggregation=average",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ============================================================================
    // Correlation endpoint
    // ============================================================================

    #[tokio::test]
    async fn test_correlation_returns_both_summaries() {
        let mut source = MockSource::new();
        let nvda = vec![make_point(10.0, 0), make_point(20.0, 60)];
        let pypl = vec![make_point(100.0, 0), make_point(200.0, 60)];
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "NVDA")
            .returning(move |_, _| Ok(nvda.clone()));
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "PYPL")
            .returning(move |_, _| Ok(pypl.clone()));

        let (status, body) = send(
            make_app(source),
            "/stockcorrelation?ticker=NVDA&ticker=PYPL&minutes=50",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        let correlation = body["correlation"].as_f64().unwrap();
        assert!((correlation - 1.0).abs() < 1e-9);
        assert_eq!(body["stocks"]["NVDA"]["averagePrice"], 15.0);
        assert_eq!(body["stocks"]["PYPL"]["averagePrice"], 150.0);
        assert_eq!(
            body["stocks"]["NVDA"]["priceHistory"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_correlation_trims_to_shortest_series() {
        let mut source = MockSource::new();
        let long = vec![
            make_point(3.0, 0),
            make_point(2.0, 60),
            make_point(1.0, 120),
            make_point(10.0, 180),
            make_point(20.0, 240),
        ];
        let short = vec![
            make_point(1.0, 0),
            make_point(2.0, 60),
            make_point(3.0, 120),
        ];
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "AAPL")
            .returning(move |_, _| Ok(long.clone()));
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "MSFT")
            .returning(move |_, _| Ok(short.clone()));

        let (status, body) = send(
            make_app(source),
            "/stockcorrelation?ticker=AAPL&ticker=MSFT&minutes=30",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        // Only the first three points of each series feed the coefficient;
        // those move in exact opposition.
        let correlation = body["correlation"].as_f64().unwrap();
        assert!((correlation + 1.0).abs() < 1e-9);
        // The summaries still report the full windows.
        assert_eq!(body["stocks"]["AAPL"]["averagePrice"], 7.2);
        assert_eq!(
            body["stocks"]["AAPL"]["priceHistory"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[tokio::test]
    async fn test_correlation_requires_exactly_two_tickers() {
        let (status, body) = send(
            make_app(MockSource::new()),
            "/stockcorrelation?ticker=NVDA&minutes=50",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");

        let (status, body) = send(
            make_app(MockSource::new()),
            "/stockcorrelation?ticker=NVDA&ticker=PYPL&ticker=AAPL&minutes=50",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");
    }

    #[tokio::test]
    async fn test_correlation_requires_minutes_parameter() {
        let (status, body) = send(
            make_app(MockSource::new()),
            "/stockcorrelation?ticker=NVDA&ticker=PYPL",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Invalid request parameters");
    }

    #[tokio::test]
    async fn test_correlation_strips_braces_from_tickers() {
        let mut source = MockSource::new();
        let points = vec![make_point(10.0, 0), make_point(20.0, 60)];
        let points_b = points.clone();
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "NVDA")
            .returning(move |_, _| Ok(points.clone()));
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "PYPL")
            .returning(move |_, _| Ok(points_b.clone()));

        let (status, body) = send(
            make_app(source),
            "/stockcorrelation?ticker=%7BNVDA%7D&ticker=PYPL&minutes=50",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert!(body["stocks"].get("NVDA").is_some());
        assert!(body["stocks"].get("{NVDA}").is_none());
    }

    // ============================================================================
    // Upstream failure mapping
    // ============================================================================

    #[tokio::test]
    async fn test_average_upstream_failure_maps_to_500() {
        let mut source = MockSource::new();
        source
            .expect_price_history()
            .returning(|_, _| Err(anyhow!("connection refused")));

        let (status, body) = send(
            make_app(source),
            "/stocks/NVDA?minutes=50&aggregation=average",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "Failed to fetch stock data");
    }

    #[tokio::test]
    async fn test_correlation_upstream_failure_maps_to_500() {
        let mut source = MockSource::new();
        let points = vec![make_point(10.0, 0), make_point(20.0, 60)];
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "NVDA")
            .returning(move |_, _| Ok(points.clone()));
        source
            .expect_price_history()
            .withf(|ticker: &str, _: &u32| ticker == "PYPL")
            .returning(|_, _| Err(anyhow!("connection refused")));

        let (status, body) = send(
            make_app(source),
            "/stockcorrelation?ticker=NVDA&ticker=PYPL&minutes=50",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "Failed to calculate correlation");
    }

    // ============================================================================
    // Health
    // ============================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = send(make_app(MockSource::new()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }
}
