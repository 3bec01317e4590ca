#[cfg(test)]
mod http_api {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use nyumba::{
        config,
        models::property_type::TransactionType,
        web::{parse_bedrooms, router, AppState, ListingsParams},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            config: Arc::new(config::create_test_config()),
        })
    }

    async fn get(uri: &str) -> (StatusCode, Option<Value>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn canonical_endpoint_returns_the_specific_page() {
        let (status, body) = get(
            "/api/canonical?slug=nairobi-county&property_type=apartment&transaction=rent&bedrooms=2",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.unwrap()["data"]["canonical_url"],
            "https://newkenyan.com/2-bedroom-apartment-nairobi"
        );
    }

    #[tokio::test]
    async fn canonical_endpoint_returns_null_without_a_match() {
        let (status, body) =
            get("/api/canonical?slug=nyali&property_type=house&transaction=For%20Sale").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.unwrap()["data"]["canonical_url"].is_null());
    }

    #[tokio::test]
    async fn bad_transaction_is_a_bad_request() {
        let (status, _) = get("/api/canonical?slug=westlands&property_type=flat&transaction=swap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get("/api/locations/westlands/listings?transaction=swap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get("/api/locations/westlands/listings?bedrooms=two").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn preflight_gets_cors_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/canonical")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[test]
    fn bedrooms_parse_as_a_list() {
        assert_eq!(parse_bedrooms(Some("2, 3")), Ok(vec![2, 3]));
        assert_eq!(parse_bedrooms(Some("")), Ok(vec![]));
        assert_eq!(parse_bedrooms(None), Ok(vec![]));
        assert_eq!(parse_bedrooms(Some("2,x")), Err(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn listings_transaction_defaults_to_rent() {
        let request = ListingsParams::default().into_request(12).unwrap();
        assert_eq!(request.transaction, TransactionType::Rent);
        assert_eq!(request.page.index, 0);
        assert!(request.filters.bedrooms.is_empty());

        let request = ListingsParams {
            transaction: Some("For Sale".to_string()),
            ..ListingsParams::default()
        }
        .into_request(12)
        .unwrap();
        assert_eq!(request.transaction, TransactionType::Sale);
    }
}
