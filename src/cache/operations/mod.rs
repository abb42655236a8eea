/// 缓存操作
/// 提供计数器存储的接口和实现

use std::time::Duration;

// 内存计数器存储
pub mod memory;
// 速率限制缓存操作（Redis）
pub mod rate_limit;
// 批量清除操作
pub mod reset;

// 重新导出常用操作
pub use memory::MemoryCounterStore;
pub use rate_limit::RedisCounterStore;
pub use reset::{ResetError, clear_namespace};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 无法建立存储连接
    #[error("connection error: {0}")]
    Connection(String),
    /// 存储命令执行失败
    #[error("command error: {0}")]
    Command(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

/// 计数器存储接口
/// 所有同步都委托给存储本身，进程内不再加锁；
/// 不同键的递增之间没有顺序保证，同一个键的递增必须原子
#[allow(async_fn_in_trait)]
pub trait CounterStore: Send + Sync {
    /// 原子递增计数器，键不存在时以给定TTL创建
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;

    /// 读取计数器当前值，键不存在时返回 None
    async fn get(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// 删除给定的键集合，返回实际删除数量；不存在的键直接忽略
    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError>;

    /// 按模式扫描一页键
    /// 游标为0时从头开始，返回的游标为0时表示扫描结束
    async fn scan_page(
        &self,
        pattern: &str,
        cursor: u64,
        count: usize,
    ) -> Result<(u64, Vec<String>), StoreError>;
}
