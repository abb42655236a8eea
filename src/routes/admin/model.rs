use serde::{Deserialize, Serialize};

use crate::cache::models::RateLimitEntry;

/// 清除速率限制响应
#[derive(Debug, Serialize)]
pub struct ClearRateLimitsResponse {
    pub success: bool,
    pub message: String,
    /// 实际删除的计数器数量
    pub count: u64,
    /// ISO-8601 时间戳
    pub timestamp: String,
}

/// 速率限制列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListRateLimitsQuery {
    /// 扫描游标，缺省从头开始
    #[serde(default)]
    pub cursor: u64,
    /// 单页数量
    #[serde(default = "default_page_size")]
    pub count: usize,
}

fn default_page_size() -> usize {
    100
}

/// 速率限制列表响应（单页）
#[derive(Debug, Serialize)]
pub struct ListRateLimitsResponse {
    pub success: bool,
    pub entries: Vec<RateLimitEntry>,
    /// 为0时表示没有更多页
    pub next_cursor: u64,
    pub timestamp: String,
}
