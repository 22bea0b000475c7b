//! 商品列表 HTTP 服务
//!
//! 提供两个端点：
//! - `GET /` 返回固定状态对象与可用端点
//! - `GET /products` 对 Azure SQL 执行一次固定查询并返回 JSON 数组

pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;

use axum::{routing::get, Json, Router};
use state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "商品服务 API",
        version = "0.1.0",
        description = "Azure SQL 商品列表演示服务"
    ),
    paths(handlers::root, handlers::list_products),
    components(schemas(
        common::models::Product,
        handlers::RootStatus,
    )),
    tags(
        (name = "status", description = "状态端点"),
        (name = "products", description = "商品查询端点")
    )
)]
struct ApiDoc;

/// Builds the application router with the shared middleware stack.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
