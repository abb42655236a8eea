use serde::{Deserialize, Serialize};

/// 速率限制计数器视图
/// 过期时间由存储的TTL管理，不再序列化到值里
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitEntry {
    pub key: String,
    pub count: u64,
}
