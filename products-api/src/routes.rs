//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// 创建产品服务路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/products", get(handlers::list_products))
}
