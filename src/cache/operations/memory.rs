use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::{CounterStore, StoreError};

struct MemoryEntry {
    count: u64,
    expires_at: Instant,
}

/// 内存计数器存储
/// 用于本地开发和测试，语义与Redis实现保持一致
#[derive(Default)]
pub struct MemoryCounterStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清除已过期的键
    fn purge_expired(entries: &mut HashMap<String, MemoryEntry>) {
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
    }

    /// 只支持 `<前缀>*` 形式的匹配模式，键模块不会生成其他形式
    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        }
    }
}

impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries);

        let entry = entries.entry(key.to_string()).or_insert(MemoryEntry {
            count: 0,
            expires_at: Instant::now() + ttl,
        });
        entry.count += 1;

        Ok(entry.count)
    }

    async fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries);

        Ok(entries.get(key).map(|entry| entry.count))
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        let mut entries = self.entries.lock().await;

        let mut deleted = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// 游标是排序后键列表中的偏移量，扫描期间不应删除键
    async fn scan_page(
        &self,
        pattern: &str,
        cursor: u64,
        count: usize,
    ) -> Result<(u64, Vec<String>), StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries);

        let mut matching: Vec<String> = entries
            .keys()
            .filter(|key| Self::matches(pattern, key))
            .cloned()
            .collect();
        matching.sort();

        let start = cursor as usize;
        let page: Vec<String> = matching.iter().skip(start).take(count).cloned().collect();

        let consumed = start + page.len();
        let next_cursor = if consumed >= matching.len() {
            0
        } else {
            consumed as u64
        };

        Ok((next_cursor, page))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn first_increment_returns_one() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(60);

        let count = store.increment("rate_limit:user1", window).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.get("rate_limit:user1").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.get("rate_limit:nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_increments_are_atomic() {
        let store = Arc::new(MemoryCounterStore::new());
        let window = Duration::from_secs(60);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment("rate_limit:shared", window).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("rate_limit:shared").await.unwrap(), Some(20));
    }

    #[tokio::test]
    async fn delete_ignores_missing_keys() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(60);

        store.increment("rate_limit:a", window).await.unwrap();

        let deleted = store
            .delete(&[
                "rate_limit:a".to_string(),
                "rate_limit:missing".to_string(),
            ])
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let deleted = store
            .delete(&["rate_limit:missing".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 0);

        let deleted = store.delete(&[]).await.unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn counters_expire_after_ttl() {
        let store = MemoryCounterStore::new();

        store
            .increment("rate_limit:short", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.get("rate_limit:short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn scan_pages_cover_all_keys() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(60);

        for i in 0..5 {
            store
                .increment(&format!("rate_limit:user{}", i), window)
                .await
                .unwrap();
        }
        store.increment("session:other", window).await.unwrap();

        let mut seen = Vec::new();
        let mut cursor = 0;
        let mut pages = 0;
        loop {
            let (next, page) = store.scan_page("rate_limit:*", cursor, 2).await.unwrap();
            seen.extend(page);
            pages += 1;
            if next == 0 {
                break;
            }
            cursor = next;
        }

        assert_eq!(pages, 3);
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|key| key.starts_with("rate_limit:")));
    }
}
