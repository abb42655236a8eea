use axum::{
    Json,
    extract::{Extension, Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    cache::{
        keys::{RATE_LIMIT_PREFIX, rate_limit_pattern},
        models::RateLimitEntry,
        operations::{CounterStore, clear_namespace},
    },
    error::AppError,
    utils::Claims,
};

use super::model::{ClearRateLimitsResponse, ListRateLimitsQuery, ListRateLimitsResponse};

/// 清除全部速率限制计数器
/// 安全敏感操作：授权失败时不碰存储，成功与否都写审计日志
#[axum::debug_handler]
pub async fn clear_rate_limits(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    if !claims.is_admin {
        tracing::warn!(
            admin = %claims.sub,
            "rate limit clear denied: missing admin privilege"
        );
        return Err(AppError::Forbidden);
    }

    let audit_id = Uuid::new_v4();
    let deleted = match clear_namespace(&state.store, RATE_LIMIT_PREFIX).await {
        Ok(deleted) => deleted,
        Err(err) => {
            tracing::error!(
                audit_id = %audit_id,
                admin = %claims.sub,
                "rate limit clear failed: {}",
                err
            );
            return Err(err.into());
        }
    };

    tracing::info!(
        audit_id = %audit_id,
        admin = %claims.sub,
        cleared = deleted,
        "rate limit counters cleared"
    );

    Ok(Json(ClearRateLimitsResponse {
        success: true,
        message: format!("已清除{}个速率限制计数器", deleted),
        count: deleted,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// 查看当前速率限制计数器（单页）
#[axum::debug_handler]
pub async fn list_rate_limits(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListRateLimitsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !claims.is_admin {
        return Err(AppError::Forbidden);
    }

    let count = query.count.clamp(1, 1000);
    let (next_cursor, keys) = state
        .store
        .scan_page(&rate_limit_pattern(), query.cursor, count)
        .await?;

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        // 键可能在扫描和读取之间过期
        if let Some(count) = state.store.get(&key).await? {
            entries.push(RateLimitEntry { key, count });
        }
    }

    Ok(Json(ListRateLimitsResponse {
        success: true,
        entries,
        next_cursor,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
