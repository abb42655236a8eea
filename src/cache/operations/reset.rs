use tracing::debug;

use super::{CounterStore, StoreError};

/// 单次扫描请求的键数量
const SCAN_COUNT: usize = 100;
/// 单次删除的键数量上限
const DELETE_BATCH: usize = 100;

/// 批量清除错误
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    /// 尚未删除任何键时存储失败，重新调用即可
    #[error("store failure before any deletion: {0}")]
    Store(#[from] StoreError),
    /// 已删除部分键后存储失败，必须向调用方报告已删除数量
    #[error("partial reset, {deleted} keys deleted before failure")]
    Partial {
        deleted: u64,
        #[source]
        source: StoreError,
    },
}

/// 清除命名空间前缀下的全部计数器，返回删除数量
/// 前缀只能传入固定常量，不接受调用方输入
///
/// 先用游标分页扫描出完整键集合，再分批删除；
/// 键删除是幂等的，失败后整个操作可以安全重试
pub async fn clear_namespace<S: CounterStore>(store: &S, prefix: &str) -> Result<u64, ResetError> {
    let pattern = format!("{}*", prefix);

    // 扫描阶段：游标循环直到存储返回0，中间页可能为空
    let mut keys = Vec::new();
    let mut cursor = 0u64;
    loop {
        let (next_cursor, page) = store.scan_page(&pattern, cursor, SCAN_COUNT).await?;
        keys.extend(page);
        if next_cursor == 0 {
            break;
        }
        cursor = next_cursor;
    }

    // 删除阶段：分批删除，失败时报告已删除数量而不是假装成功
    let mut deleted = 0u64;
    for batch in keys.chunks(DELETE_BATCH) {
        match store.delete(batch).await {
            Ok(n) => deleted += n,
            Err(source) if deleted == 0 => return Err(ResetError::Store(source)),
            Err(source) => return Err(ResetError::Partial { deleted, source }),
        }
    }

    debug!("cleared {} keys under prefix {}", deleted, prefix);
    Ok(deleted)
}
