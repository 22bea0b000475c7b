//! Handler 模块

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use common::config::SqlServerConfig;
use common::errors::AppError;
use common::models::Product;

use crate::service;
use crate::state::AppState;

/// 根路由的固定状态对象
#[derive(Serialize, ToSchema)]
pub struct RootStatus {
    pub status: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// 服务状态与可用端点
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses(
        (status = 200, description = "服务状态", body = RootStatus)
    )
)]
pub async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        status: "ok",
        endpoints: vec!["/products"],
    })
}

/// 商品列表（至多 10 行，按查询自然顺序）
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "商品列表", body = Vec<Product>),
        (status = 500, description = "配置缺失或查询失败"),
        (status = 502, description = "数据库不可达")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    // Fresh config and fresh connection per request; nothing is shared.
    let config = SqlServerConfig::resolve(state.env.as_ref())?;
    let products = service::fetch_products(&config).await?;
    Ok(Json(products))
}
