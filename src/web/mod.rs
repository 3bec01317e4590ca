use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::{
    canonical,
    config::Config,
    matcher::{ListingFilters, Page},
    models::{location::Location, property_type::TransactionType},
    services::listings::{self, ListingRequest, LocationPage},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Deserialize, Default)]
pub struct ListingsParams {
    pub property_type: Option<String>,
    pub transaction: Option<String>,
    pub page: Option<u32>,
    /// Comma separated, e.g. `2,3`.
    pub bedrooms: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

#[derive(Deserialize)]
pub struct CanonicalParams {
    pub slug: String,
    pub property_type: String,
    pub transaction: String,
    pub bedrooms: Option<i32>,
}

#[derive(Serialize)]
pub struct CanonicalResponse {
    pub canonical_url: Option<String>,
}

#[derive(Serialize)]
pub struct RelatedResponse {
    pub locations: Vec<Location>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/locations/:slug/listings", get(get_location_listings))
        .route("/api/locations/:slug/related", get(get_related_locations))
        .route("/api/canonical", get(get_canonical))
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

pub async fn start_http_server(
    state: AppState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> Result<()> {
    let bind_addr = state.config.bind_address();

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    Ok(())
}

async fn cors_layer(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cors_headers(response.headers_mut());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        let mut response = next.run(req).await;
        apply_cors_headers(response.headers_mut());
        response
    }
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
}

pub fn parse_bedrooms(raw: Option<&str>) -> Result<Vec<i32>, StatusCode> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i32>().map_err(|_| StatusCode::BAD_REQUEST))
        .collect()
}

impl ListingsParams {
    /// A missing `transaction` means rent.
    pub fn into_request(self, page_size: u32) -> Result<ListingRequest, StatusCode> {
        let transaction = match self.transaction.as_deref() {
            Some(raw) => raw
                .parse::<TransactionType>()
                .map_err(|_| StatusCode::BAD_REQUEST)?,
            None => TransactionType::Rent,
        };

        Ok(ListingRequest {
            property_keyword: self.property_type.unwrap_or_default(),
            transaction,
            page: Page::new(self.page.unwrap_or(0), page_size),
            filters: ListingFilters {
                bedrooms: parse_bedrooms(self.bedrooms.as_deref())?,
                min_price: self.min_price,
                max_price: self.max_price,
            },
        })
    }
}

async fn get_location_listings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingsParams>,
) -> Result<Json<ApiResponse<LocationPage>>, StatusCode> {
    let request = params.into_request(state.config.page_size)?;
    let config = state.config.clone();

    let page = tokio::task::spawn_blocking(move || listings::location_page(&config, &slug, &request))
        .await
        .map_err(|e| {
            error!("Listing task panicked: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    page.map(|data| Json(ApiResponse { data }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_related_locations(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<RelatedResponse>>, StatusCode> {
    let config = state.config.clone();

    let related = tokio::task::spawn_blocking(move || {
        let location = listings::find_location(&config, &slug)?;
        let related = listings::related_locations(&config, &location).unwrap_or_else(|e| {
            error!(target: crate::logger::BACKEND_TARGET, "Related locations for '{}' failed: {:?}", slug, e);
            Vec::new()
        });
        Some(related)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    related
        .map(|locations| Json(ApiResponse { data: RelatedResponse { locations } }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_canonical(
    State(state): State<AppState>,
    Query(params): Query<CanonicalParams>,
) -> Result<Json<ApiResponse<CanonicalResponse>>, StatusCode> {
    let transaction = params
        .transaction
        .parse::<TransactionType>()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let canonical_url = canonical::full_canonical_url(
        &state.config.site_url,
        &params.slug,
        &params.property_type,
        transaction,
        params.bedrooms,
    );

    Ok(Json(ApiResponse {
        data: CanonicalResponse { canonical_url },
    }))
}
