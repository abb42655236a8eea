use std::sync::Arc;
use std::time::Duration;

use redis::{AsyncCommands, Client as RedisClient};

use super::{CounterStore, StoreError};

/// Redis速率限制计数器存储
/// 连接在启动时创建一次，句柄显式传入，不使用模块级单例
#[derive(Clone)]
pub struct RedisCounterStore {
    redis: Arc<RedisClient>,
}

impl RedisCounterStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        self.redis
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::from)
    }
}

impl CounterStore for RedisCounterStore {
    /// 使用 Redis 的 INCR 和 EXPIRE 命令实现计数器
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let mut conn = self.connection().await?;

        let count: u64 = conn.incr(key, 1).await?;

        if count == 1 {
            // 第一次请求时设置过期时间
            let _: () = conn.expire(key, ttl.as_secs() as i64).await?;
        }

        Ok(count)
    }

    async fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.connection().await?;

        let count: Option<u64> = conn.get(key).await?;

        Ok(count)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        // DEL 不接受空键列表
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connection().await?;

        let deleted: u64 = conn.del(keys).await?;

        Ok(deleted)
    }

    /// 用 SCAN 游标分页枚举键，替代会阻塞服务的 KEYS
    async fn scan_page(
        &self,
        pattern: &str,
        cursor: u64,
        count: usize,
    ) -> Result<(u64, Vec<String>), StoreError> {
        let mut conn = self.connection().await?;

        let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await?;

        Ok((next_cursor, keys))
    }
}
